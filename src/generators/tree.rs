//! Text tree rendering.
//!
//! Used for the listing sent to the classifier and for the destination
//! preview shown before apply.

use crate::models::series::SeriesStructure;
use crate::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Default depth of the classifier listing.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Render a directory as an indented tree.
///
/// Directories come first, then files, each sorted by name. Hidden entries
/// (including the organizer's own record files) are left out.
pub fn directory_tree(path: &Path, max_depth: usize) -> Result<String> {
    crate::utils::fs::ensure_directory(path)?;
    let mut lines = Vec::new();
    render_dir(path, "", 0, max_depth, &mut lines)?;
    Ok(lines.join("\n"))
}

fn render_dir(
    path: &Path,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    lines: &mut Vec<String>,
) -> Result<()> {
    if depth >= max_depth {
        return Ok(());
    }

    let mut entries: Vec<_> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .filter(|e| !crate::utils::fs::is_hidden(&e.path()))
        .map(|e| {
            let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
            (is_dir, e.file_name().to_string_lossy().to_string())
        })
        .collect();
    entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let count = entries.len();
    for (i, (is_dir, name)) in entries.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, name));

        if is_dir {
            let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
            render_dir(&path.join(&name), &child_prefix, depth + 1, max_depth, lines)?;
        }
    }

    Ok(())
}

/// Render the destination layout a structure would produce.
///
/// Seasons are listed in ascending order and file names sorted within each.
pub fn preview_tree(structure: &SeriesStructure) -> String {
    let mut seasons: BTreeMap<u16, Vec<&str>> = BTreeMap::new();
    for ep in &structure.episodes {
        seasons
            .entry(ep.season)
            .or_default()
            .push(ep.new_filename.as_str());
    }

    let mut lines = vec![structure.destination_folder_name()];
    let season_count = seasons.len();

    for (i, (season, mut files)) in seasons.into_iter().enumerate() {
        let last_season = i + 1 == season_count;
        lines.push(format!(
            "{}{}",
            if last_season { LAST_BRANCH } else { BRANCH },
            super::folder::season_folder(season)
        ));

        files.sort_unstable();
        let file_count = files.len();
        let prefix = if last_season { SPACE } else { PIPE };
        for (j, file) in files.into_iter().enumerate() {
            let connector = if j + 1 == file_count { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{}{}{}", prefix, connector, file));
        }
    }

    lines.join("\n")
}
