//! CLI command implementations.

pub mod apply;
pub mod list;
pub mod plan;
pub mod revert;

use crate::models::config::Config;
use std::path::{Path, PathBuf};

/// Resolve a folder argument: an existing path as given, otherwise a name
/// under the configured unordered directory.
pub fn resolve_folder(config: &Config, folder: &str) -> PathBuf {
    let as_path = Path::new(folder);
    if as_path.is_dir() {
        as_path.to_path_buf()
    } else {
        config.library.unordered_dir.join(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_folder() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.library.unordered_dir = temp_dir.path().join("unordered");

        assert_eq!(
            resolve_folder(&config, "Show"),
            temp_dir.path().join("unordered").join("Show")
        );

        let existing = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(resolve_folder(&config, &existing), temp_dir.path());
    }
}
