//! Series Organizer CLI
//!
//! A command-line tool for organizing TV series folders using an LLM classifier.

use clap::Parser;
use series_organizer::cli::{
    args::{Cli, Commands},
    commands::{apply, list, plan, resolve_folder, revert},
};
use series_organizer::models::config::{self, Config};
use series_organizer::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Load configuration, CLI flags win
    let mut config = config::load_config();
    if let Some(ref dir) = cli.source_root {
        config.library.unordered_dir = dir.clone();
    }
    if let Some(ref dir) = cli.dest_root {
        config.library.organized_dir = dir.clone();
    }

    // Run the appropriate command
    match cli.command {
        Commands::List => {
            list::list_folders(&config).await?;
        }

        Commands::Plan { folder, output } => {
            // Run preflight checks unless skipped
            if !cli.skip_preflight {
                run_preflight_checks(&config).await?;
            }

            let source = resolve_folder(&config, &folder);
            plan::plan_folder(&config, &source, output.as_deref()).await?;
        }

        Commands::Apply { plan_file, json } => {
            apply::apply_plan(&config, &plan_file, json).await?;
        }

        Commands::Cancel { plan_file } => {
            plan::cancel_plan(&plan_file).await?;
        }

        Commands::Revert { folder, dry_run } => {
            let source = resolve_folder(&config, &folder);
            revert::revert(&source, dry_run).await?;
        }

        Commands::Status { folder } => {
            let source = resolve_folder(&config, &folder);
            revert::status(&source).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("series_organizer=debug")
    } else {
        EnvFilter::new("series_organizer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await?;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
