//! File system utilities.

use crate::Result;
use std::path::{Component, Path, PathBuf};

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "m4v", "ts", "m2ts", "flv", "webm", "mpg", "mpeg",
];

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if a file is a video file based on extension.
pub fn is_video_file(path: &Path) -> bool {
    get_extension(path)
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Check that a relative path cannot climb out of the folder it is joined to.
pub fn is_contained_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Resolve a path to an absolute one, following symlinks when it exists.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.canonicalize()?);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// Check if a file name is hidden (starts with a dot).
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(&PathBuf::from("episode.mkv")));
        assert!(is_video_file(&PathBuf::from("episode.MP4")));
        assert!(!is_video_file(&PathBuf::from("episode.srt")));
        assert!(!is_video_file(&PathBuf::from("episode.nfo")));
    }

    #[test]
    fn test_is_contained_relative() {
        assert!(is_contained_relative(Path::new("Show S01E01.mkv")));
        assert!(is_contained_relative(Path::new("Disc 1/Show S01E01.mkv")));
        assert!(!is_contained_relative(Path::new("../other/Show.mkv")));
        assert!(!is_contained_relative(Path::new("/etc/passwd")));
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/src/.series_mapping.json")));
        assert!(!is_hidden(Path::new("/src/Show.mkv")));
    }
}
