//! Related file discovery.
//!
//! Subtitles, NFO files and other sidecars travel with the video whose
//! base name they share: `Show - 01.mkv` brings `Show - 01.srt` along.

use crate::Result;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Find every regular file in the same directory whose stem equals the stem
/// of `source_file`, including `source_file` itself.
///
/// Stems are compared literally, so names with brackets, asterisks or other
/// pattern characters match exactly. Only the last extension is stripped:
/// `Show.en.srt` has stem `Show.en` and does not travel with `Show.mkv`.
/// Symlinks are followed. The source file comes first, followed by siblings
/// sorted by name.
pub fn expand(source_file: &Path) -> Result<Vec<PathBuf>> {
    let (parent, stem) = match (source_file.parent(), source_file.file_stem()) {
        (Some(parent), Some(stem)) => (parent, stem),
        _ => return Ok(Vec::new()),
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    let mut found_source = false;
    let mut siblings = Vec::new();

    for entry in fs::read_dir(parent)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.file_name() == source_file.file_name() {
            found_source = true;
        } else if path.extension().is_some() && path.file_stem() == Some(stem) {
            siblings.push(path);
        }
    }

    siblings.sort();

    let mut related = Vec::with_capacity(siblings.len() + 1);
    if found_source {
        related.push(source_file.to_path_buf());
    }
    related.extend(siblings);
    Ok(related)
}

/// Destination file name for a related file.
///
/// The exact source file takes the episode's canonical name; other siblings
/// take the canonical stem plus their own extension.
pub fn destination_name(new_filename: &str, source_file: &Path, related: &Path) -> String {
    if related.file_name() == source_file.file_name() {
        return new_filename.to_string();
    }

    let new_stem = Path::new(new_filename)
        .file_stem()
        .unwrap_or_else(|| OsStr::new(new_filename))
        .to_string_lossy();

    match related.extension() {
        Some(ext) => format!("{}.{}", new_stem, ext.to_string_lossy()),
        None => new_stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        path
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_expand_finds_sidecars() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let video = touch(dir, "Show S01E01.mkv");
        touch(dir, "Show S01E01.srt");
        touch(dir, "Show S01E01.nfo");
        touch(dir, "Show S01E02.mkv");
        touch(dir, "Show S01E01 extra.srt");

        let related = expand(&video).unwrap();
        assert_eq!(
            names(&related),
            vec!["Show S01E01.mkv", "Show S01E01.nfo", "Show S01E01.srt"]
        );
    }

    #[test]
    fn test_expand_handles_pattern_characters() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let video = touch(dir, "Series [Group] - 01.mkv");
        touch(dir, "Series [Group] - 01.ass");
        touch(dir, "Series G - 01.ass");
        touch(dir, "Series [Group] - 01*.ass");
        touch(dir, "Series [Group] - 02.ass");

        let related = expand(&video).unwrap();
        assert_eq!(
            names(&related),
            vec!["Series [Group] - 01.mkv", "Series [Group] - 01.ass"]
        );
    }

    #[test]
    fn test_expand_ignores_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let video = touch(dir, "Show S01E01.mkv");
        fs::create_dir(dir.join("Show S01E01.extras")).unwrap();

        assert_eq!(expand(&video).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_follows_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let store = dir.join("store");
        fs::create_dir(&store).unwrap();
        let real = touch(&store, "real.mkv");
        let video = dir.join("a.mkv");
        std::os::unix::fs::symlink(&real, &video).unwrap();
        touch(dir, "a.srt");

        let related = expand(&video).unwrap();
        assert_eq!(names(&related), vec!["a.mkv", "a.srt"]);
        assert_eq!(related[0], video);
    }

    #[test]
    fn test_expand_keeps_multi_dot_sidecars_apart() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let video = touch(dir, "Show.mkv");
        touch(dir, "Show.srt");
        touch(dir, "Show.en.srt");

        assert_eq!(names(&expand(&video).unwrap()), vec!["Show.mkv", "Show.srt"]);
    }

    #[test]
    fn test_destination_name() {
        let source = Path::new("/src/[Grp] Show - 01.mkv");
        assert_eq!(
            destination_name("Show S01E01.mkv", source, source),
            "Show S01E01.mkv"
        );
        assert_eq!(
            destination_name("Show S01E01.mkv", source, Path::new("/src/[Grp] Show - 01.srt")),
            "Show S01E01.srt"
        );
    }
}
