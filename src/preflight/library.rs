//! Library folders preflight check.

use super::CheckResult;
use crate::models::config::LibraryConfig;

/// Check that the unordered folder exists and the organized root can be created.
pub fn check(library: &LibraryConfig) -> CheckResult {
    if !library.unordered_dir.is_dir() {
        return CheckResult::fail(
            "Library",
            &format!("{} not found", library.unordered_dir.display()),
            "Create it or set [library] unordered_dir in config.toml",
        );
    }

    let organized_ok = library.organized_dir.is_dir()
        || library
            .organized_dir
            .parent()
            .map(|p| p.as_os_str().is_empty() || p.is_dir())
            .unwrap_or(false);

    if organized_ok {
        CheckResult::ok(
            "Library",
            &format!(
                "{} -> {}",
                library.unordered_dir.display(),
                library.organized_dir.display()
            ),
        )
    } else {
        CheckResult::fail(
            "Library",
            &format!("cannot create {}", library.organized_dir.display()),
            "Set [library] organized_dir in config.toml",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_check() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let library = LibraryConfig {
            unordered_dir: temp_dir.path().to_path_buf(),
            organized_dir: temp_dir.path().join("tv"),
        };
        assert!(check(&library).success);

        let missing = LibraryConfig {
            unordered_dir: temp_dir.path().join("missing"),
            organized_dir: temp_dir.path().join("tv"),
        };
        assert!(!check(&missing).success);
    }
}
