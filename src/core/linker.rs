//! File materialization.
//!
//! Places a file at its destination without touching the source: a hard
//! link when the filesystem allows it, a metadata-preserving copy otherwise.

use crate::utils::hash;
use filetime::FileTime;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Outcome of materializing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A hard link was created.
    Linked,
    /// The file was copied byte for byte.
    Copied,
    /// Neither strategy worked.
    Failed(String),
}

impl LinkOutcome {
    /// Name of the strategy that succeeded.
    pub fn strategy(&self) -> Option<&'static str> {
        match self {
            LinkOutcome::Linked => Some("link"),
            LinkOutcome::Copied => Some("copy"),
            LinkOutcome::Failed(_) => None,
        }
    }

    /// Convert into a result, mapping failure to a link error for `dest`.
    pub fn into_result(self, dest: &Path) -> crate::Result<LinkOutcome> {
        match self {
            LinkOutcome::Failed(reason) => Err(crate::Error::link(dest, reason)),
            outcome => Ok(outcome),
        }
    }
}

/// Hard-link-with-copy-fallback strategy.
#[derive(Debug, Clone)]
pub struct LinkStrategy {
    /// Compare checksums after a fallback copy.
    verify_copies: bool,
}

impl LinkStrategy {
    /// Create a strategy.
    pub fn new(verify_copies: bool) -> Self {
        Self { verify_copies }
    }

    /// Materialize `source` at `dest`.
    ///
    /// The parent of `dest` must already exist. An existing `dest` is never
    /// overwritten. Symlinked sources are resolved first.
    pub fn materialize(&self, source: &Path, dest: &Path) -> LinkOutcome {
        match fs::metadata(source) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return LinkOutcome::Failed("source is not a regular file".to_string()),
            Err(e) => return LinkOutcome::Failed(format!("cannot read source: {}", e)),
        }

        if fs::symlink_metadata(dest).is_ok() {
            return LinkOutcome::Failed("destination already exists".to_string());
        }

        // Link the file a symlinked source points at, not the symlink itself.
        let target = match fs::canonicalize(source) {
            Ok(target) => target,
            Err(e) => return LinkOutcome::Failed(format!("cannot resolve source: {}", e)),
        };

        let link_err = match fs::hard_link(&target, dest) {
            Ok(()) => {
                tracing::debug!("Linked: {:?} -> {:?}", source, dest);
                return LinkOutcome::Linked;
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return LinkOutcome::Failed("destination already exists".to_string());
            }
            Err(e) => e,
        };

        tracing::debug!("Hard link failed ({}), falling back to copy: {:?}", link_err, dest);

        match self.copy_preserving(source, dest) {
            Ok(()) => {
                tracing::debug!("Copied: {:?} -> {:?}", source, dest);
                LinkOutcome::Copied
            }
            Err(copy_err) => LinkOutcome::Failed(format!(
                "hard link failed ({}); copy failed ({})",
                link_err, copy_err
            )),
        }
    }

    /// Copy contents, permissions and timestamps; remove the partial file on failure.
    fn copy_preserving(&self, source: &Path, dest: &Path) -> crate::Result<()> {
        let result = self.copy_contents(source, dest);
        if result.is_err() {
            let _ = fs::remove_file(dest);
        }
        result
    }

    fn copy_contents(&self, source: &Path, dest: &Path) -> crate::Result<()> {
        let meta = fs::metadata(source)?;

        {
            let mut reader = fs::File::open(source)?;
            let mut writer = OpenOptions::new().write(true).create_new(true).open(dest)?;
            io::copy(&mut reader, &mut writer)?;
            writer.sync_all()?;
        }

        if let Err(e) = fs::set_permissions(dest, meta.permissions()) {
            tracing::warn!("Could not preserve permissions on {:?}: {}", dest, e);
        }
        let atime = FileTime::from_last_access_time(&meta);
        let mtime = FileTime::from_last_modification_time(&meta);
        if let Err(e) = filetime::set_file_times(dest, atime, mtime) {
            tracing::warn!("Could not preserve timestamps on {:?}: {}", dest, e);
        }

        if self.verify_copies {
            let expected = hash::sha256_file(source)?;
            let actual = hash::sha256_file(dest)?;
            if expected != actual {
                return Err(crate::Error::link(dest, "checksum mismatch after copy"));
            }
        }

        Ok(())
    }
}

impl Default for LinkStrategy {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_materialize_links() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.mkv");
        let dest = temp_dir.path().join("b.mkv");
        fs::write(&source, "video").unwrap();

        let outcome = LinkStrategy::default().materialize(&source, &dest);
        assert_eq!(outcome, LinkOutcome::Linked);
        assert_eq!(outcome.strategy(), Some("link"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "video");
        assert!(source.exists());
    }

    #[test]
    fn test_materialize_refuses_existing_dest() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.mkv");
        let dest = temp_dir.path().join("b.mkv");
        fs::write(&source, "video").unwrap();
        fs::write(&dest, "other").unwrap();

        let outcome = LinkStrategy::default().materialize(&source, &dest);
        assert!(matches!(outcome, LinkOutcome::Failed(_)));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "other");
    }

    #[test]
    fn test_materialize_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = LinkStrategy::default().materialize(
            &temp_dir.path().join("missing.mkv"),
            &temp_dir.path().join("b.mkv"),
        );
        assert!(outcome.into_result(&temp_dir.path().join("b.mkv")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_materialize_symlinked_source_links_target() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.mkv");
        let source = temp_dir.path().join("a.mkv");
        let dest = temp_dir.path().join("b.mkv");
        fs::write(&real, "video").unwrap();
        std::os::unix::fs::symlink(&real, &source).unwrap();

        let outcome = LinkStrategy::default().materialize(&source, &dest);
        assert_eq!(outcome, LinkOutcome::Linked);
        assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_file());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "video");
    }

    #[test]
    fn test_copy_preserves_content_and_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.srt");
        let dest = temp_dir.path().join("b.srt");
        fs::write(&source, "subtitle").unwrap();
        let mtime = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&source, mtime).unwrap();

        LinkStrategy::default().copy_preserving(&source, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "subtitle");
        let dest_meta = fs::metadata(&dest).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&dest_meta), mtime);
    }
}
