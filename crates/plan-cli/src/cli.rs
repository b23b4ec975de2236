//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// taskplan - Resolve project task configuration for a workspace
#[derive(Parser, Debug)]
#[command(name = "taskplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: search upward for taskplan.json)
    #[arg(short, long, global = true, env = "TASKPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve tasks into an ordered execution plan
    ///
    /// Examples:
    ///   taskplan resolve                      # Every task of every project
    ///   taskplan resolve -e prod -p web       # Project 'web' with prod overrides
    ///   taskplan resolve -t build --json      # Build tasks only, as JSON
    Resolve(ResolveArgs),

    /// Validate the configuration file and report every issue
    Validate {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List projects with their extends chains and tasks
    Projects {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Selectors for the `resolve` command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Workspace root (default: directory of the configuration file)
    #[arg(short, long, env = "TASKPLAN_WORKSPACE_ROOT")]
    pub workspace_root: Option<PathBuf>,

    /// Environment whose overrides to apply
    #[arg(short, long, env = "TASKPLAN_ENV")]
    pub env: Option<String>,

    /// Project to resolve; repeat for several (default: all)
    #[arg(short, long = "project", value_name = "NAME")]
    pub projects: Vec<String>,

    /// Task to resolve, or "all"
    #[arg(short, long, default_value = "all")]
    pub task: String,

    /// Output the plan as JSON
    #[arg(long)]
    pub json: bool,
}
