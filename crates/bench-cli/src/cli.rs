//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bench manager - install, remove and track applications in a bench
#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Bench directory to operate on
    #[arg(long, global = true, env = "BENCH_PATH", default_value = ".")]
    pub bench: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the bench directory layout
    ///
    /// Examples:
    ///   bench init                 # Initialize the bench directory
    ///   bench init my-bench        # Create and initialize my-bench/
    Init {
        /// Directory to initialize; defaults to --bench
        path: Option<PathBuf>,
    },

    /// Clone an application, install it and register it
    ///
    /// Examples:
    ///   bench get-app https://github.com/org/crm.git
    ///   bench get-app https://github.com/org/crm.git --branch develop
    ///   bench get-app ../local/accounts --name accounts
    GetApp {
        /// Repository URL or local path
        source: String,

        /// Branch to check out
        #[arg(short, long)]
        branch: Option<String>,

        /// Register under this name instead of the one derived from the source
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Uninstall an application and remove it from the bench
    RemoveApp {
        /// Name of the app to remove
        app: String,

        /// Delete the app directory instead of archiving it
        #[arg(long)]
        no_backup: bool,

        /// Remove even if sites still have the app installed
        #[arg(short, long)]
        force: bool,
    },

    /// Rescan apps/, rewrite apps.txt and reconcile apps.json
    Sync {
        /// App to record state for if it has no entry yet
        #[arg(long)]
        app: Option<String>,

        /// Directory of --app under apps/ when it differs from the name
        #[arg(long, requires = "app")]
        app_dir: Option<String>,

        /// Branch to record for --app instead of the checked-out one
        #[arg(long, requires = "app")]
        branch: Option<String>,

        /// Dependencies to record on new entries
        #[arg(long)]
        required: Vec<String>,
    },

    /// List registered apps in order
    ListApps {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Only apps an update would touch: not excluded, and installed in
        /// the bench environment when it has one
        #[arg(long)]
        updatable: bool,
    },

    /// Exclude an app from update operations
    ExcludeApp {
        /// Name of the app
        app: String,
    },

    /// Include a previously excluded app in update operations
    IncludeApp {
        /// Name of the app
        app: String,
    },
}
