//! Discovery of note files below a root directory.

use crate::{Result, ZimvaultError};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Lists every file below `root` whose extension is `extension`, recursively.
///
/// Hidden files and directories (leading `.`) are skipped, matching how a
/// `**/*.md` glob behaves. The result is sorted so runs are deterministic.
///
/// # Errors
///
/// Returns [`ZimvaultError::InvalidRoot`] if `root` is not a directory and
/// [`ZimvaultError::Walk`] if a directory cannot be read.
pub fn list_note_files<P: AsRef<Path>>(root: P, extension: &str) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ZimvaultError::InvalidRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
