//! Pending plan data model.
//!
//! A plan is produced by the analyze step and handed explicitly to apply,
//! so no state is held between the two.

use super::series::SeriesStructure;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A classified folder waiting to be applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPlan {
    /// Plan version.
    pub version: String,
    /// Unique plan ID.
    pub id: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Folder holding the unorganized files.
    pub source_folder: PathBuf,
    /// Root of the organized tree.
    pub destination_root: PathBuf,
    /// Listing that was sent to the classifier.
    pub original_tree: String,
    /// Rendered destination layout.
    pub preview_tree: String,
    /// Classifier result.
    pub structure: SeriesStructure,
}
