//! Companion clean-ups for a Zim export, run separately from the converter.

use crate::core::note::write_text;
use crate::core::tree::list_note_files;
use crate::{Result, ZimvaultError};
use std::fs;
use std::path::Path;

const TAB_SUBSTITUTE: &str = "&emsp;";
const SPACE_SUBSTITUTE: &str = "&nbsp;";

/// Renames every `*.<from>` file below `root` to `*.<to>` and fixes local
/// links of the form `(... .<from>)` in its content.
///
/// Returns the number of files converted.
pub fn normalize_extensions<P: AsRef<Path>>(root: P, from: &str, to: &str) -> Result<usize> {
    let old_link_end = format!(".{from})");
    let new_link_end = format!(".{to})");
    let mut converted = 0;
    for path in list_note_files(root, from)? {
        let target = path.with_extension(to);
        log::info!("Converting \"{}\" to \"{}\"", path.display(), target.display());
        if target.exists() {
            log::warn!("\"{}\" already exists and is replaced", target.display());
        }
        let text = fs::read_to_string(&path).map_err(|e| ZimvaultError::io(&path, e))?;
        write_text(&target, &text.replace(&old_link_end, &new_link_end))?;
        fs::remove_file(&path).map_err(|e| ZimvaultError::io(&path, e))?;
        converted += 1;
    }
    Ok(converted)
}

/// Replaces the `&emsp;` and `&nbsp;` placeholders Zim's exporter leaves for
/// leading indentation with a tab and a space. Every occurrence is replaced,
/// not only leading ones.
///
/// Returns the number of files that changed.
pub fn restore_indentation<P: AsRef<Path>>(root: P, extension: &str) -> Result<usize> {
    let mut changed = 0;
    for path in list_note_files(root, extension)? {
        let page = fs::read_to_string(&path).map_err(|e| ZimvaultError::io(&path, e))?;
        let restored = page
            .replace(TAB_SUBSTITUTE, "\t")
            .replace(SPACE_SUBSTITUTE, " ");
        if restored != page {
            log::info!("Restoring indentation in \"{}\"", path.display());
            write_text(&path, &restored)?;
            changed += 1;
        }
    }
    Ok(changed)
}
