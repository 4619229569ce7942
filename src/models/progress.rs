//! Progress events emitted by an apply pass.

use serde::{Deserialize, Serialize};

/// A single event in the apply progress stream.
///
/// Serialized as `{"type": "...", ...}`, one object per event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// Number of files the pass will try to materialize. Always first.
    Total { total: usize },
    /// One file was materialized.
    Progress {
        current: usize,
        total: usize,
        filename: String,
    },
    /// Terminal event on success.
    Complete { message: String, total: usize },
    /// Terminal event on failure.
    #[serde(rename = "error")]
    Failed { error: String },
}

impl ProgressEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressEvent::Complete { .. } | ProgressEvent::Failed { .. })
    }
}
