//! Revert module.
//!
//! Undoes an apply pass using the mapping record of a source folder:
//! - Delete every link listed in the record (originals are never touched)
//! - Remove season/series folders left empty by those deletions
//! - Clear the mapping record and applied-marker

use crate::core::mapping_store;
use crate::models::mapping::MappingRecord;
use crate::Result;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Result of a revert.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RevertResult {
    /// Number of links removed.
    pub files_reverted: usize,
    /// Per-entry problems (missing links, failed deletions).
    pub errors: Vec<String>,
}

impl RevertResult {
    /// Whether every listed link was removed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Revert executor.
#[derive(Debug, Default)]
pub struct RevertExecutor {
    /// Report what would be removed without touching anything.
    dry_run: bool,
}

impl RevertExecutor {
    /// Create a new revert executor.
    pub fn new() -> Self {
        Self { dry_run: false }
    }

    /// Create a revert executor that only reports.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Revert the apply pass recorded in `source_folder`.
    ///
    /// Fails only when there is no record, the record is corrupt, or the
    /// record itself cannot be cleared. Missing links are noted and skipped.
    pub fn revert(&self, source_folder: &Path) -> Result<RevertResult> {
        let record = mapping_store::load(source_folder)?
            .ok_or_else(|| crate::Error::NoRecord(source_folder.display().to_string()))?;

        tracing::info!(
            "Reverting {} files of {} ({})",
            record.file_mappings.len(),
            record.series_name,
            record.applied_at
        );

        let mut result = RevertResult::default();

        for mapping in &record.file_mappings {
            if mapping.new_path == mapping.old_path {
                result.errors.push(format!(
                    "Refusing to delete original: {}",
                    mapping.old_path.display()
                ));
                continue;
            }

            match fs::symlink_metadata(&mapping.new_path) {
                Ok(_) if self.dry_run => {
                    tracing::info!("[DRY RUN] Would delete {:?}", mapping.new_path);
                    result.files_reverted += 1;
                }
                Ok(_) => match fs::remove_file(&mapping.new_path) {
                    Ok(()) => {
                        tracing::debug!("Deleted: {:?}", mapping.new_path);
                        result.files_reverted += 1;
                    }
                    Err(e) => {
                        let msg = format!("{}: {}", mapping.new_path.display(), e);
                        tracing::error!("Revert failed: {}", msg);
                        result.errors.push(msg);
                    }
                },
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!("Link already gone: {:?}", mapping.new_path);
                    result
                        .errors
                        .push(format!("Not found: {}", mapping.new_path.display()));
                }
                Err(e) => {
                    result
                        .errors
                        .push(format!("{}: {}", mapping.new_path.display(), e));
                }
            }
        }

        if self.dry_run {
            return Ok(result);
        }

        remove_empty_dirs(&record);
        mapping_store::clear(source_folder)?;

        Ok(result)
    }
}

/// Remove the season folders and series folder of a record if they are empty.
///
/// Only parents of recorded links are considered, deepest first.
fn remove_empty_dirs(record: &MappingRecord) {
    let mut dirs: BTreeSet<PathBuf> = record
        .file_mappings
        .iter()
        .filter_map(|m| m.new_path.parent().map(Path::to_path_buf))
        .filter(|p| p.starts_with(&record.destination_folder))
        .collect();
    dirs.insert(record.destination_folder.clone());

    for dir in dirs.iter().rev() {
        match fs::remove_dir(dir) {
            Ok(()) => tracing::debug!("Removed empty directory: {:?}", dir),
            Err(e) => tracing::debug!("Keeping directory {:?}: {}", dir, e),
        }
    }
}

/// Revert a source folder (convenience function).
pub fn revert(source_folder: &Path) -> Result<RevertResult> {
    RevertExecutor::new().revert(source_folder)
}
