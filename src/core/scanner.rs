//! Candidate folder scanner.
//!
//! Lists the series folders waiting in the unordered directory together
//! with their organized state.

use crate::core::mapping_store;
use crate::utils::fs::{ensure_directory, is_hidden, is_video_file};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A folder that can be analyzed and organized.
#[derive(Debug, Clone)]
pub struct CandidateFolder {
    /// Folder name.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// Number of video files found recursively.
    pub video_count: usize,
    /// Apply timestamp when the folder has a valid mapping record.
    pub applied_at: Option<String>,
}

impl CandidateFolder {
    /// Whether the folder has already been organized.
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// Count video files below a folder.
pub fn count_videos(path: &Path) -> usize {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_video_file(e.path()))
        .count()
}

/// List every immediate subfolder of `unordered_dir`, sorted by name.
///
/// A corrupt mapping record is logged and the folder reported as not applied.
pub fn scan_candidates(unordered_dir: &Path) -> Result<Vec<CandidateFolder>> {
    ensure_directory(unordered_dir)?;

    let mut folders = Vec::new();
    for entry in fs::read_dir(unordered_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir() || is_hidden(&path) {
            continue;
        }

        let applied_at = match mapping_store::load(&path) {
            Ok(record) => record.map(|r| r.applied_at),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };

        folders.push(CandidateFolder {
            name: entry.file_name().to_string_lossy().to_string(),
            video_count: count_videos(&path),
            applied_at,
            path,
        });
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!("Found {} candidate folders in {:?}", folders.len(), unordered_dir);
    Ok(folders)
}
