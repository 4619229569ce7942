//! Classified series data model.
//!
//! This is the shape the classifier must return, and the immutable input
//! handed to the reconciliation engine.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Highest season number a `Season NN` folder can represent.
pub const MAX_SEASON: u16 = 99;

/// One classified episode file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifiedEpisode {
    /// File name (or path relative to the source folder) as found on disk.
    pub original_filename: String,
    /// Canonical file name, e.g. `Show S01E01.mkv`.
    pub new_filename: String,
    /// Season number, 0 for specials.
    pub season: u16,
    /// Episode number, starting at 1.
    pub episode: u16,
}

/// Classified series structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesStructure {
    /// Clean series name.
    pub series_name: String,
    /// Release year; the key must be present, but may be null.
    #[serde(deserialize_with = "required_nullable")]
    pub year: Option<u16>,
    /// Episodes in processing order.
    pub episodes: Vec<ClassifiedEpisode>,
}

fn required_nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

impl SeriesStructure {
    /// Name of the series root folder in the destination tree.
    pub fn destination_folder_name(&self) -> String {
        crate::generators::folder::series_folder(&self.series_name, self.year)
    }

    /// Check the invariants the engine relies on.
    ///
    /// Returns a list of problems; empty means the structure is usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let name = self.series_name.trim();
        if name.is_empty() {
            problems.push("series_name is empty".to_string());
        } else if name == "." || name == ".." {
            problems.push(format!("series_name '{}' is not a folder name", name));
        }

        for ep in &self.episodes {
            if ep.original_filename.trim().is_empty() {
                problems.push("episode with empty original_filename".to_string());
            }
            if !crate::utils::fs::is_contained_relative(Path::new(&ep.original_filename)) {
                problems.push(format!(
                    "{}: original_filename must stay inside the source folder",
                    ep.original_filename
                ));
            }
            if ep.new_filename == "." || ep.new_filename == ".." {
                problems.push(format!("{}: invalid new_filename", ep.original_filename));
            }
            if ep.new_filename.trim().is_empty() {
                problems.push(format!("{}: empty new_filename", ep.original_filename));
            }
            if ep.new_filename.contains('/') || ep.new_filename.contains('\\') {
                problems.push(format!(
                    "{}: new_filename must not contain path separators",
                    ep.original_filename
                ));
            }
            if ep.episode == 0 {
                problems.push(format!("{}: episode must be >= 1", ep.original_filename));
            }
            if ep.season > MAX_SEASON {
                problems.push(format!(
                    "{}: season {} exceeds {}",
                    ep.original_filename, ep.season, MAX_SEASON
                ));
            }
        }

        problems
    }

    /// Validate the structure, failing on the first set of problems.
    pub fn validate(&self) -> crate::Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::InvalidStructure(problems.join("; ")))
        }
    }
}
