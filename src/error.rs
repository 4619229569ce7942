//! Error types for the series organizer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the series organizer.
#[derive(Error, Debug)]
pub enum Error {
    // Preflight errors
    #[error("DeepSeek API key not configured. Set DEEPSEEK_API_KEY environment variable")]
    ApiKeyMissing,

    // Classifier errors
    #[error("Classifier failed: {0}")]
    Classifier(String),

    #[error("Invalid series structure: {0}")]
    InvalidStructure(String),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Source file not found: {0}")]
    MissingSourceFile(String),

    #[error("Failed to link {path}: {reason}")]
    Link { path: String, reason: String },

    // Mapping record errors
    #[error("Corrupt mapping record {path}: {reason}")]
    CorruptRecord { path: String, reason: String },

    #[error("Nothing to revert: no mapping record in {0}")]
    NoRecord(String),

    #[error("Folder already organized: {0}")]
    AlreadyApplied(String),

    // Plan errors
    #[error("Invalid plan file: {0}")]
    InvalidPlanFile(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a link error for a destination path.
    pub fn link<S: Into<String>>(path: &std::path::Path, reason: S) -> Self {
        Error::Link {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
