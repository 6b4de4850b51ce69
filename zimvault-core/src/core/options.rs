//! Conversion options and their JSON persistence.
//!
//! A run with [`ConvertOptions::default()`] behaves exactly like the fixed
//! converter: `.md` files, the four quote/wildcard characters stripped from
//! derived names, colliding renames overwrite, no markup conversion.
//!
//! Options can be stored next to the notes in [`DEFAULT_OPTIONS_FILE`]:
//!
//! ```rust
//! use zimvault_core::{CollisionPolicy, ConvertOptions};
//!
//! let json = r#"{ "onCollision": "skip", "convertMarkup": true }"#;
//! let options: ConvertOptions = serde_json::from_str(json).unwrap();
//! assert_eq!(options.on_collision, CollisionPolicy::Skip);
//! assert!(options.convert_markup);
//! assert_eq!(options.extension, "md");
//! ```

use crate::{Result, ZimvaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// File name looked up in the conversion root when no options file is given.
pub const DEFAULT_OPTIONS_FILE: &str = ".zimvault.json";

/// What to do when a derived file name is already taken on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file. The collision is still logged and reported.
    #[default]
    Overwrite,

    /// Leave the note under its old name and do not record a rename.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Extension of note files, without the leading dot.
    pub extension: String,

    /// Characters deleted from a title before it becomes a file name.
    pub forbidden_characters: Vec<char>,

    pub on_collision: CollisionPolicy,

    /// Also convert Zim rulers, checkboxes, highlighting and tags.
    pub convert_markup: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            forbidden_characters: vec!['"', '\'', '?', '*'],
            on_collision: CollisionPolicy::Overwrite,
            convert_markup: false,
        }
    }
}

impl ConvertOptions {
    /// Reads options from an explicitly requested file.
    ///
    /// # Errors
    ///
    /// Returns [`ZimvaultError::Io`] if the file cannot be read and
    /// [`ZimvaultError::Options`] if it is not valid options JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ZimvaultError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| ZimvaultError::Options(format!("{}: {e}", path.display())))
    }

    /// Loads [`DEFAULT_OPTIONS_FILE`] from `root`; returns defaults if the file
    /// is missing or corrupt.
    pub fn load_from_root<P: AsRef<Path>>(root: P) -> Self {
        let path = root.as_ref().join(DEFAULT_OPTIONS_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable options file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Ignoring options file {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
