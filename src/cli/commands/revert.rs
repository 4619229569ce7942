//! Revert command implementation.
//!
//! Removes every link an apply pass created for a folder and clears its
//! mapping record. Original files are never touched.

use crate::core::mapping_store;
use crate::core::rollback::RevertExecutor;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Revert a folder.
pub async fn revert(source: &Path, dry_run: bool) -> Result<()> {
    println!("{}", "[REVERT] Revert command".bold().cyan());
    println!();
    println!("  {} {}", "Source:".bold(), source.display());
    println!();

    if dry_run {
        println!("{}", "[DRY-RUN] Showing what would be done:".bold().yellow());
        println!();
    }

    let executor = if dry_run {
        RevertExecutor::dry_run()
    } else {
        RevertExecutor::new()
    };
    let result = executor.revert(source)?;

    println!("{}", "📊 Revert Summary".bold().green());
    println!(
        "  {} {}",
        (if dry_run { "Would remove:" } else { "Removed:" }).bold(),
        result.files_reverted
    );
    println!("  {} {}", "Problems:".bold(), result.errors.len());

    if !result.is_clean() {
        println!();
        println!("{}", "⚠️  Problems:".bold().yellow());
        for error in &result.errors {
            println!("  - {}", error);
        }
    }

    println!();
    if dry_run {
        println!("{}", "[OK] Dry run complete - no changes were made".green());
    } else {
        println!("{}", "[OK] Folder reverted; it can be planned again".green());
    }

    Ok(())
}

/// Show the mapping record of a folder.
pub async fn status(source: &Path) -> Result<()> {
    match mapping_store::load(source)? {
        None => {
            println!("{} {}", "Not organized:".yellow(), source.display());
        }
        Some(record) => {
            println!("{}", "📋 Mapping Record".bold().cyan());
            println!("  {} {}", "Applied:".bold(), record.applied_at);
            println!("  {} {}", "Series:".bold(), record.series_name);
            if let Some(year) = record.year {
                println!("  {} {}", "Year:".bold(), year);
            }
            println!("  {} {}", "Destination:".bold(), record.destination_folder.display());
            println!("  {} {}", "Files:".bold(), record.file_mappings.len());
            println!();

            for mapping in record.file_mappings.iter().take(20) {
                let marker = if mapping.new_path.exists() {
                    "✓".green()
                } else {
                    "✗".red()
                };
                println!("  {} {} -> {}", marker, mapping.old_name, mapping.new_name);
            }
            if record.file_mappings.len() > 20 {
                println!("  ... and {} more", record.file_mappings.len() - 20);
            }
        }
    }

    Ok(())
}
