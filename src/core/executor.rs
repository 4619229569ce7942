//! Apply executor.
//!
//! Materializes a classified series structure into the organized tree:
//! - mkdir: `Series (Year)/Season NN`
//! - link: every episode file and its sidecars (hard link, copy fallback)
//! - record: mapping record + applied-marker in the source folder
//!
//! Work is driven by the consumer: `Executor::apply` returns an iterator
//! that does one file's worth of work per `next()` call.

use crate::core::linker::LinkStrategy;
use crate::core::{mapping_store, related};
use crate::generators::folder;
use crate::models::config::{ApplyConfig, LinkErrorPolicy};
use crate::models::mapping::{FileMapping, MappingRecord};
use crate::models::progress::ProgressEvent;
use crate::models::series::{ClassifiedEpisode, SeriesStructure};
use crate::utils::fs::{absolute_path, ensure_directory};
use crate::Result;
use chrono::Utc;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Apply executor.
#[derive(Debug, Clone)]
pub struct Executor {
    strategy: LinkStrategy,
    on_link_error: LinkErrorPolicy,
}

impl Executor {
    /// Create a new executor with default configuration.
    pub fn new() -> Self {
        Self::with_config(&ApplyConfig::default())
    }

    /// Create a new executor with custom configuration.
    pub fn with_config(config: &ApplyConfig) -> Self {
        Self {
            strategy: LinkStrategy::new(config.verify_copies),
            on_link_error: config.on_link_error,
        }
    }

    /// Start an apply pass.
    ///
    /// Nothing happens until the returned iterator is polled. The first
    /// event is `Total`, the last is `Complete` or `Failed`.
    pub fn apply(
        &self,
        structure: &SeriesStructure,
        source_folder: &Path,
        destination_root: &Path,
    ) -> ApplyRun {
        ApplyRun {
            strategy: self.strategy.clone(),
            on_link_error: self.on_link_error,
            structure: structure.clone(),
            source_folder: source_folder.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            series_dir: PathBuf::new(),
            queue: VecDeque::new(),
            phase: Phase::Start,
            total: 0,
            current: 0,
            skipped_episodes: 0,
            failures: Vec::new(),
            mappings: Vec::new(),
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Running,
    Done,
}

/// One episode waiting to be materialized.
#[derive(Debug)]
struct EpisodeWork {
    episode: ClassifiedEpisode,
    source: PathBuf,
    season_dir: PathBuf,
    related: VecDeque<PathBuf>,
    started: bool,
}

/// An in-progress apply pass.
#[derive(Debug)]
pub struct ApplyRun {
    strategy: LinkStrategy,
    on_link_error: LinkErrorPolicy,
    structure: SeriesStructure,
    source_folder: PathBuf,
    destination_root: PathBuf,
    series_dir: PathBuf,
    queue: VecDeque<EpisodeWork>,
    phase: Phase,
    total: usize,
    current: usize,
    skipped_episodes: usize,
    failures: Vec<String>,
    mappings: Vec<FileMapping>,
}

impl ApplyRun {
    /// Per-file failures recorded so far (link errors under the skip policy).
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Number of episodes skipped because their source file was missing.
    pub fn skipped_episodes(&self) -> usize {
        self.skipped_episodes
    }

    /// Validate inputs and pre-scan every episode. Touches nothing on disk.
    fn prepare(&mut self) -> Result<usize> {
        self.structure.validate()?;
        ensure_directory(&self.source_folder)?;
        self.source_folder = absolute_path(&self.source_folder)?;
        self.destination_root = absolute_path(&self.destination_root)?;

        if mapping_store::load(&self.source_folder)?.is_some() {
            return Err(crate::Error::AlreadyApplied(
                self.source_folder.display().to_string(),
            ));
        }

        self.series_dir = self
            .destination_root
            .join(self.structure.destination_folder_name());

        let mut total = 0;
        for episode in &self.structure.episodes {
            let source = self.source_folder.join(&episode.original_filename);
            let related: VecDeque<PathBuf> = if source.is_file() {
                related::expand(&source)?.into()
            } else {
                VecDeque::new()
            };
            total += related.len();

            self.queue.push_back(EpisodeWork {
                episode: episode.clone(),
                season_dir: self.series_dir.join(folder::season_folder(episode.season)),
                source,
                related,
                started: false,
            });
        }

        tracing::info!(
            "Applying {} episodes ({} files) from {:?} to {:?}",
            self.structure.episodes.len(),
            total,
            self.source_folder,
            self.series_dir
        );

        self.total = total;
        Ok(total)
    }

    /// Materialize files until one succeeds. `Ok(None)` means the queue is empty.
    fn step(&mut self) -> Result<Option<ProgressEvent>> {
        while let Some(work) = self.queue.front_mut() {
            if !work.started {
                work.started = true;
                if !work.source.is_file() {
                    let err = crate::Error::MissingSourceFile(work.source.display().to_string());
                    tracing::warn!("Skipping episode: {}", err);
                    self.skipped_episodes += 1;
                    self.queue.pop_front();
                    continue;
                }
                fs::create_dir_all(&work.season_dir)?;
            }

            let Some(file) = work.related.pop_front() else {
                self.queue.pop_front();
                continue;
            };

            let new_name = related::destination_name(&work.episode.new_filename, &work.source, &file);
            let dest = work.season_dir.join(&new_name);

            match self.strategy.materialize(&file, &dest).into_result(&dest) {
                Ok(outcome) => {
                    tracing::debug!(
                        "[{}/{}] {:?} ({})",
                        self.current + 1,
                        self.total,
                        dest,
                        outcome.strategy().unwrap_or_default()
                    );
                    self.mappings.push(FileMapping::new(file, dest));
                    self.current += 1;
                    return Ok(Some(ProgressEvent::Progress {
                        current: self.current,
                        total: self.total,
                        filename: new_name,
                    }));
                }
                Err(e) => match self.on_link_error {
                    LinkErrorPolicy::Skip => {
                        tracing::warn!("{}", e);
                        self.failures.push(e.to_string());
                    }
                    LinkErrorPolicy::Abort => return Err(e),
                },
            }
        }

        Ok(None)
    }

    /// Persist the mapping record and build the terminal event.
    fn finish(&mut self) -> Result<ProgressEvent> {
        let moved = self.mappings.len();

        if moved == 0 {
            tracing::info!("Nothing was materialized, no mapping record written");
            return Ok(ProgressEvent::Complete {
                message: self.summary("No files organized"),
                total: 0,
            });
        }

        let record = MappingRecord {
            applied_at: Utc::now().to_rfc3339(),
            series_name: self.structure.series_name.clone(),
            year: self.structure.year,
            destination_folder: self.series_dir.clone(),
            file_mappings: std::mem::take(&mut self.mappings),
        };
        mapping_store::save(&self.source_folder, &record)?;

        let headline = format!(
            "Organized {} files into {}",
            moved,
            self.series_dir.display()
        );
        Ok(ProgressEvent::Complete {
            message: self.summary(&headline),
            total: moved,
        })
    }

    fn summary(&self, headline: &str) -> String {
        let mut message = headline.to_string();
        if self.skipped_episodes > 0 {
            message.push_str(&format!(
                ", {} episodes skipped (source missing)",
                self.skipped_episodes
            ));
        }
        if !self.failures.is_empty() {
            message.push_str(&format!(", {} files failed", self.failures.len()));
        }
        message
    }

    fn fail(&mut self, err: crate::Error) -> ProgressEvent {
        tracing::error!("Apply failed: {}", err);
        self.phase = Phase::Done;
        ProgressEvent::Failed {
            error: err.to_string(),
        }
    }
}

impl Iterator for ApplyRun {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        match self.phase {
            Phase::Done => None,
            Phase::Start => {
                self.phase = Phase::Running;
                Some(match self.prepare() {
                    Ok(total) => ProgressEvent::Total { total },
                    Err(e) => self.fail(e),
                })
            }
            Phase::Running => match self.step() {
                Ok(Some(event)) => Some(event),
                Ok(None) => {
                    self.phase = Phase::Done;
                    Some(match self.finish() {
                        Ok(event) => event,
                        Err(e) => self.fail(e),
                    })
                }
                Err(e) => Some(self.fail(e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn structure(episodes: Vec<(&str, &str, u16, u16)>) -> SeriesStructure {
        SeriesStructure {
            series_name: "Show".to_string(),
            year: Some(2020),
            episodes: episodes
                .into_iter()
                .map(|(orig, new, season, episode)| ClassifiedEpisode {
                    original_filename: orig.to_string(),
                    new_filename: new.to_string(),
                    season,
                    episode,
                })
                .collect(),
        }
    }

    #[test]
    fn test_apply_is_lazy() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.mkv"), "a").unwrap();

        let s = structure(vec![("a.mkv", "Show S01E01.mkv", 1, 1)]);
        let mut run = Executor::new().apply(&s, &src, &dst);
        assert!(!dst.exists());

        assert_eq!(run.next(), Some(ProgressEvent::Total { total: 1 }));
        assert!(!dst.exists());

        assert!(matches!(run.next(), Some(ProgressEvent::Progress { current: 1, .. })));
        assert!(dst.join("Show (2020)/Season 01/Show S01E01.mkv").exists());
        assert!(!mapping_store::is_applied(&src));

        assert!(matches!(run.next(), Some(ProgressEvent::Complete { total: 1, .. })));
        assert!(mapping_store::is_applied(&src));
        assert_eq!(run.next(), None);
    }

    #[test]
    fn test_apply_empty_structure_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let s = structure(vec![]);
        let events: Vec<_> = Executor::new()
            .apply(&s, temp_dir.path(), &temp_dir.path().join("dst"))
            .collect();

        assert_eq!(events[0], ProgressEvent::Total { total: 0 });
        assert!(matches!(events[1], ProgressEvent::Complete { total: 0, .. }));
        assert_eq!(events.len(), 2);
        assert!(!mapping_store::is_applied(temp_dir.path()));
    }

    #[test]
    fn test_apply_missing_source_folder_fails() {
        let temp_dir = TempDir::new().unwrap();
        let s = structure(vec![("a.mkv", "Show S01E01.mkv", 1, 1)]);
        let events: Vec<_> = Executor::new()
            .apply(&s, &temp_dir.path().join("nope"), temp_dir.path())
            .collect();

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ProgressEvent::Failed { .. }));
    }

    #[test]
    fn test_apply_invalid_structure_fails() {
        let temp_dir = TempDir::new().unwrap();
        let s = structure(vec![("a.mkv", "Show S01E00.mkv", 1, 0)]);
        let events: Vec<_> = Executor::new()
            .apply(&s, temp_dir.path(), &temp_dir.path().join("dst"))
            .collect();

        assert_eq!(events.len(), 1);
        assert!(events[0].is_terminal());
    }
}
