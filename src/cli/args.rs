//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Series Organizer - Organize your TV series folders with AI
#[derive(Parser, Debug)]
#[command(name = "series-organizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Folder holding unorganized series folders (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Root of the organized tree (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub dest_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List candidate folders and their organized state
    List,

    /// Analyze a folder and write a pending plan
    Plan {
        /// Folder name under the source root, or a path
        #[arg(value_name = "FOLDER")]
        folder: String,

        /// Output path for the plan file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Apply a pending plan
    Apply {
        /// Path to the plan file
        #[arg(value_name = "PLAN_FILE")]
        plan_file: PathBuf,

        /// Print progress events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Discard a pending plan
    Cancel {
        /// Path to the plan file
        #[arg(value_name = "PLAN_FILE")]
        plan_file: PathBuf,
    },

    /// Remove every link created for a folder
    Revert {
        /// Folder name under the source root, or a path
        #[arg(value_name = "FOLDER")]
        folder: String,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the mapping record of a folder
    Status {
        /// Folder name under the source root, or a path
        #[arg(value_name = "FOLDER")]
        folder: String,
    },
}
