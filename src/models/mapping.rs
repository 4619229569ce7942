//! Mapping record data model.
//!
//! The record is written into the source folder after a successful apply and
//! is the only input revert needs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mapping record file name inside a source folder.
pub const MAPPING_FILE: &str = ".series_mapping.json";

/// Applied-marker file name inside a source folder.
pub const APPLIED_MARKER: &str = ".series_applied";

/// Ledger of one apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Apply timestamp (RFC 3339).
    pub applied_at: String,
    /// Series name used for the destination folder.
    pub series_name: String,
    /// Series year, if known.
    pub year: Option<u16>,
    /// Absolute path of the series folder in the destination tree.
    pub destination_folder: PathBuf,
    /// Every file linked by the apply pass, in materialization order.
    pub file_mappings: Vec<FileMapping>,
}

/// One physical file relocated by an apply pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    /// Absolute path of the original file.
    pub old_path: PathBuf,
    /// Absolute path of the created link or copy.
    pub new_path: PathBuf,
    /// Original file name.
    pub old_name: String,
    /// Destination file name.
    pub new_name: String,
}

impl FileMapping {
    /// Build a mapping from the two absolute paths.
    pub fn new(old_path: PathBuf, new_path: PathBuf) -> Self {
        let name_of = |p: &PathBuf| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        };
        Self {
            old_name: name_of(&old_path),
            new_name: name_of(&new_path),
            old_path,
            new_path,
        }
    }
}
