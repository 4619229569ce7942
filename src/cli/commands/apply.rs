//! Apply command implementation.
//!
//! Reads a plan file, materializes the organized layout and removes the
//! plan once its mapping record has been written.

use crate::core::executor::Executor;
use crate::core::planner;
use crate::models::config::Config;
use crate::models::progress::ProgressEvent;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Apply a plan file.
pub async fn apply_plan(config: &Config, plan_file: &Path, json: bool) -> Result<()> {
    let plan = planner::load_plan(plan_file)?;

    if !json {
        println!("{}", "[APPLY] Applying plan...".bold().cyan());
        println!();
        println!("  {} {}", "Series:".bold(), plan.structure.destination_folder_name());
        println!("  {} {}", "Source:".bold(), plan.source_folder.display());
        println!("  {} {}", "Target:".bold(), plan.destination_root.display());
        println!("  {} {}", "Episodes:".bold(), plan.structure.episodes.len());
        println!();
    }

    let executor = Executor::with_config(&config.apply);
    let run = executor.apply(&plan.structure, &plan.source_folder, &plan.destination_root);

    let outcome = if json {
        print_json(run)?
    } else {
        print_progress(run)
    };

    match outcome {
        ProgressEvent::Complete { .. } => {
            planner::discard_plan(plan_file)?;
            if !json {
                println!();
                println!("{}", "[Next Steps]".bold().yellow());
                println!(
                    "  To undo: {}",
                    format!("series-organizer revert {:?}", plan.source_folder.display().to_string())
                        .cyan()
                );
            }
            Ok(())
        }
        ProgressEvent::Failed { error } => Err(crate::Error::other(error)),
        _ => Err(crate::Error::other("apply ended without a result")),
    }
}

/// Stream events as JSON lines; returns the terminal event.
fn print_json(run: impl Iterator<Item = ProgressEvent>) -> Result<ProgressEvent> {
    let mut last = None;
    for event in run {
        println!("{}", serde_json::to_string(&event)?);
        last = Some(event);
    }
    Ok(last.unwrap_or(ProgressEvent::Failed {
        error: "no events".to_string(),
    }))
}

/// Drive a progress bar from the events; returns the terminal event.
fn print_progress(run: impl Iterator<Item = ProgressEvent>) -> ProgressEvent {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut last = ProgressEvent::Failed {
        error: "no events".to_string(),
    };

    for event in run {
        match &event {
            ProgressEvent::Total { total } => pb.set_length(*total as u64),
            ProgressEvent::Progress {
                current, filename, ..
            } => {
                pb.set_position(*current as u64);
                pb.set_message(filename.clone());
            }
            ProgressEvent::Complete { message, .. } => {
                pb.finish_with_message("Done!");
                println!();
                println!("{} {}", "[OK]".bold().green(), message);
            }
            ProgressEvent::Failed { error } => {
                pb.abandon_with_message("Failed");
                println!();
                println!("{} {}", "[FAILED]".bold().red(), error);
            }
        }
        last = event;
    }

    last
}
