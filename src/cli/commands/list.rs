//! List command implementation.
//!
//! Shows the folders waiting in the unordered directory.

use crate::core::scanner;
use crate::models::config::Config;
use crate::Result;
use colored::Colorize;

/// List candidate folders.
pub async fn list_folders(config: &Config) -> Result<()> {
    println!("{}", "📁 Folders".bold().cyan());
    println!();

    let unordered_dir = &config.library.unordered_dir;
    let folders = scanner::scan_candidates(unordered_dir)?;

    if folders.is_empty() {
        println!("No folders found in {}", unordered_dir.display());
        return Ok(());
    }

    println!(
        "{:<4} {:<8} {:<28} {}",
        "#".bold(),
        "Videos".bold(),
        "Status".bold(),
        "Folder".bold()
    );
    println!("{}", "-".repeat(80));

    for (i, folder) in folders.iter().enumerate() {
        let status = match folder.applied_at {
            Some(ref at) => format!("organized {}", at).green(),
            None => "pending".yellow(),
        };
        println!(
            "{:<4} {:<8} {:<28} {}",
            i + 1,
            folder.video_count,
            status,
            folder.name
        );
    }

    let pending = folders.iter().filter(|f| !f.is_applied()).count();
    println!();
    println!(
        "{} folders, {} pending. Source: {}",
        folders.len(),
        pending,
        unordered_dir.display()
    );

    Ok(())
}
