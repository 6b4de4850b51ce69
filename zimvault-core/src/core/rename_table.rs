//! Ordered mapping from original note file names to their new names.

use serde::{Deserialize, Serialize};

/// Old file name to new file name, in the order the renames happened.
///
/// Keys and values are bare file names with extension (`"Projects.md"`).
/// Link rewriting checks keys in insertion order, which matters when one
/// old name is a substring of another.
///
/// ```rust
/// use zimvault_core::RenameTable;
///
/// let mut table = RenameTable::new();
/// assert!(table.insert("Projects.md", "My Projects.md"));
/// assert!(!table.insert("Projects.md", "Other.md"));
/// assert_eq!(table.get("Projects.md"), Some("My Projects.md"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenameTable {
    entries: Vec<(String, String)>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rename. Returns `false` and leaves the table unchanged if
    /// `old_name` is already present.
    pub fn insert(&mut self, old_name: impl Into<String>, new_name: impl Into<String>) -> bool {
        let old_name = old_name.into();
        if self.contains(&old_name) {
            return false;
        }
        self.entries.push((old_name, new_name.into()));
        true
    }

    pub fn get(&self, old_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(old, _)| old == old_name)
            .map(|(_, new)| new.as_str())
    }

    pub fn contains(&self, old_name: &str) -> bool {
        self.get(old_name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
