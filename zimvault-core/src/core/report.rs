//! Summary of a conversion run.

use crate::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One note moved to a new name during the rename pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRecord {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A derived name that was already taken on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collision {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// How the collision was resolved.
    pub resolution: CollisionPolicy,
}

/// Counters and events gathered while converting a tree.
///
/// Serializes in camelCase, e.g. `filesScanned`, `linksRewritten`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    /// Notes read by the rename pass.
    pub files_scanned: usize,
    /// Writes performed across both passes.
    pub files_written: usize,
    pub renames: Vec<RenameRecord>,
    pub collisions: Vec<Collision>,
    pub links_rewritten: usize,
}

impl ConversionReport {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
