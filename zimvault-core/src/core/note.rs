//! A single Markdown note on disk, held as a sequence of lines.

use crate::{Result, ZimvaultError};
use std::fs;
use std::path::{Path, PathBuf};

/// Line terminator used both for splitting on read and joining on write.
pub const LINE_SEPARATOR: char = '\n';

const CARRIAGE_RETURN: char = '\r';

/// A note file loaded into memory.
///
/// Lines are split on [`LINE_SEPARATOR`] without dropping the trailing empty
/// line, so `"a\nb\n"` becomes `["a", "b", ""]` and joins back to the same text.
/// Windows line endings are read as plain `\n` and written back that way.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl NoteFile {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ZimvaultError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: split_lines(&text),
        })
    }

    /// The bare file name, extension included (e.g. `"Projects.md"`).
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Path of a sibling file called `<stem>.<this file's extension>`.
    pub fn sibling_with_stem(&self, stem: &str) -> PathBuf {
        let name = match self.extension().as_str() {
            "" => stem.to_string(),
            ext => format!("{stem}.{ext}"),
        };
        match self.path.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    pub fn content(&self) -> String {
        join_lines(&self.lines)
    }
}

/// Splits `text` into lines, dropping the `\r` of `\r\n` endings.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(LINE_SEPARATOR)
        .map(|line| line.strip_suffix(CARRIAGE_RETURN).unwrap_or(line).to_string())
        .collect()
}

pub fn join_lines(lines: &[String]) -> String {
    lines.join(&LINE_SEPARATOR.to_string())
}

/// Writes `content` to `path` as UTF-8, replacing whatever was there.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| ZimvaultError::io(path, e))
}
