//! Mapping record persistence.
//!
//! The record and the applied-marker live inside the source folder. The
//! record is the authoritative "already organized" state; the marker is a
//! human-readable timestamp written after it.

use crate::models::mapping::{MappingRecord, APPLIED_MARKER, MAPPING_FILE};
use crate::Result;
use chrono::Utc;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Path of the mapping record for a source folder.
pub fn record_path(source_folder: &Path) -> PathBuf {
    source_folder.join(MAPPING_FILE)
}

/// Path of the applied-marker for a source folder.
pub fn marker_path(source_folder: &Path) -> PathBuf {
    source_folder.join(APPLIED_MARKER)
}

/// Load the mapping record of a source folder.
///
/// Returns `Ok(None)` when no record exists and `Error::CorruptRecord` when
/// one exists but cannot be parsed.
pub fn load(source_folder: &Path) -> Result<Option<MappingRecord>> {
    let path = record_path(source_folder);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| crate::Error::CorruptRecord {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Save the mapping record, then the applied-marker.
pub fn save(source_folder: &Path, record: &MappingRecord) -> Result<()> {
    let path = record_path(source_folder);
    let tmp_path = source_folder.join(format!("{}.tmp", MAPPING_FILE));

    let json = serde_json::to_string_pretty(record)?;
    if let Err(e) = write_synced(&tmp_path, json.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    fs::write(
        marker_path(source_folder),
        format!("Organized at {}\n", Utc::now().to_rfc3339()),
    )?;

    tracing::info!("Mapping record saved to {:?}", path);
    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

/// Remove the applied-marker and the mapping record. Missing files are fine.
pub fn clear(source_folder: &Path) -> Result<()> {
    for path in [marker_path(source_folder), record_path(source_folder)] {
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Removed {:?}", path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Whether a source folder carries a mapping record.
pub fn is_applied(source_folder: &Path) -> bool {
    record_path(source_folder).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mapping::FileMapping;
    use tempfile::TempDir;

    fn sample_record() -> MappingRecord {
        MappingRecord {
            applied_at: "2024-01-01T00:00:00Z".to_string(),
            series_name: "Show".to_string(),
            year: Some(2020),
            destination_folder: PathBuf::from("/tv/Show (2020)"),
            file_mappings: vec![FileMapping::new(
                PathBuf::from("/src/a.mkv"),
                PathBuf::from("/tv/Show (2020)/Season 01/Show S01E01.mkv"),
            )],
        }
    }

    #[test]
    fn test_load_absent() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load(temp_dir.path()).unwrap().is_none());
        assert!(!is_applied(temp_dir.path()));
    }

    #[test]
    fn test_save_writes_record_and_marker() {
        let temp_dir = TempDir::new().unwrap();
        let record = sample_record();

        save(temp_dir.path(), &record).unwrap();

        assert!(is_applied(temp_dir.path()));
        assert!(marker_path(temp_dir.path()).exists());
        assert_eq!(load(temp_dir.path()).unwrap(), Some(record));
        assert_eq!(record_path(temp_dir.path()).file_name().unwrap(), MAPPING_FILE);
    }

    #[test]
    fn test_load_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(record_path(temp_dir.path()), "{ not json").unwrap();

        let err = load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, crate::Error::CorruptRecord { .. }));
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory where the record belongs makes the rename fail.
        fs::create_dir(record_path(temp_dir.path())).unwrap();
        fs::write(record_path(temp_dir.path()).join("keep"), "x").unwrap();

        assert!(save(temp_dir.path(), &sample_record()).is_err());
        assert!(!temp_dir
            .path()
            .join(format!("{}.tmp", MAPPING_FILE))
            .exists());
        assert!(!marker_path(temp_dir.path()).exists());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        save(temp_dir.path(), &sample_record()).unwrap();

        clear(temp_dir.path()).unwrap();
        assert!(!record_path(temp_dir.path()).exists());
        assert!(!marker_path(temp_dir.path()).exists());

        clear(temp_dir.path()).unwrap();
    }
}
