//! Plan command implementation.
//!
//! Implements the `plan` and `cancel` subcommands. `plan` classifies a
//! folder and writes a pending plan file that `apply` consumes.

use crate::core::classifier::SeriesClassifier;
use crate::core::planner::{self, Planner};
use crate::models::config::Config;
use crate::services::deepseek::DeepSeekClient;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Analyze a folder and save a pending plan.
pub async fn plan_folder(config: &Config, source: &Path, output: Option<&Path>) -> Result<()> {
    println!("{}", "📺 Analyzing series folder...".bold().cyan());
    println!();

    println!("  {} {}", "Source:".bold(), source.display());
    println!("  {} {}", "Target:".bold(), config.library.organized_dir.display());
    println!("  {} {}", "Model:".bold(), config.classifier.model);
    println!();

    let client = DeepSeekClient::with_config(config.classifier.clone())?;
    let planner = Planner::new(SeriesClassifier::new(client));
    let plan = planner
        .analyze(source, &config.library.organized_dir)
        .await?;

    println!("{}", "Directory structure:".bold());
    println!("{}", plan.original_tree);
    println!();

    println!("{} {}", "[OK] Series:".green(), plan.structure.series_name);
    if let Some(year) = plan.structure.year {
        println!("{} {}", "[OK] Year:".green(), year);
    }
    println!(
        "{} {}",
        "[OK] Episodes:".green(),
        plan.structure.episodes.len()
    );
    println!();

    println!("{}", "📋 Preview".bold().green());
    println!("{}", plan.preview_tree);
    println!();

    let plan_path = match output {
        Some(p) => p.to_path_buf(),
        None => planner::plan_path(&config.plans_dir, &plan),
    };
    planner::save_plan(&plan, &plan_path)?;

    println!("{} {}", "📄 Plan saved to:".bold(), plan_path.display());
    println!();
    println!("{}", "[Next Steps]".bold().yellow());
    println!(
        "  Apply:  {}",
        format!("series-organizer apply {}", plan_path.display()).cyan()
    );
    println!(
        "  Cancel: {}",
        format!("series-organizer cancel {}", plan_path.display()).cyan()
    );

    Ok(())
}

/// Discard a pending plan.
pub async fn cancel_plan(plan_file: &Path) -> Result<()> {
    if !plan_file.exists() {
        return Err(crate::Error::PathNotFound(plan_file.display().to_string()));
    }

    planner::discard_plan(plan_file)?;
    println!("{} {}", "[OK] Plan discarded:".green(), plan_file.display());
    Ok(())
}
