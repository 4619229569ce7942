//! Plan generation module.
//!
//! Builds a pending plan for one source folder: directory tree, classifier
//! result and destination preview. The plan file is the only thing that
//! links the analyze step to the apply step.

use crate::core::classifier::SeriesClassifier;
use crate::core::mapping_store;
use crate::generators::tree;
use crate::models::plan::PendingPlan;
use crate::utils::fs::{absolute_path, ensure_directory};
use crate::Result;
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Plan generator.
pub struct Planner {
    classifier: SeriesClassifier,
}

impl Planner {
    /// Create a planner on top of a classifier.
    pub fn new(classifier: SeriesClassifier) -> Self {
        Self { classifier }
    }

    /// Analyze a source folder and build a pending plan.
    pub async fn analyze(&self, source_folder: &Path, destination_root: &Path) -> Result<PendingPlan> {
        ensure_directory(source_folder)?;
        let source_folder = absolute_path(source_folder)?;

        if mapping_store::is_applied(&source_folder) {
            return Err(crate::Error::AlreadyApplied(
                source_folder.display().to_string(),
            ));
        }

        let folder_name = source_folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let original_tree = tree::directory_tree(&source_folder, tree::DEFAULT_MAX_DEPTH)?;
        tracing::info!("Analyzing {:?}", source_folder);

        let structure = self.classifier.classify(&folder_name, &original_tree).await?;
        tracing::info!(
            "Detected {} ({}) with {} episodes",
            structure.series_name,
            structure
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "no year".to_string()),
            structure.episodes.len()
        );

        Ok(PendingPlan {
            version: "1.0".to_string(),
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            source_folder,
            destination_root: absolute_path(destination_root)?,
            original_tree,
            preview_tree: tree::preview_tree(&structure),
            structure,
        })
    }
}

/// Default location of a plan file.
pub fn plan_path(plans_dir: &Path, plan: &PendingPlan) -> PathBuf {
    plans_dir.join(format!("{}.json", plan.id))
}

/// Save a plan to a JSON file.
pub fn save_plan(plan: &PendingPlan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!("Plan saved to {:?}", path);
    Ok(())
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<PendingPlan> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let plan: PendingPlan = serde_json::from_str(&content)
        .map_err(|e| crate::Error::InvalidPlanFile(format!("{}: {}", path.display(), e)))?;
    plan.structure
        .validate()
        .map_err(|e| crate::Error::InvalidPlanFile(e.to_string()))?;
    Ok(plan)
}

/// Delete a plan file. A missing file is not an error.
pub fn discard_plan(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Discarded plan {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
