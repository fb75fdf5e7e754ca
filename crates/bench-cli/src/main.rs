//! Bench manager CLI
//!
//! Installs, removes and tracks the applications of a bench directory.

mod cli;
mod commands;
mod error;
mod installer;
mod logging;
mod packages;

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(bench = %cli.bench.display(), "starting");

    match cli.command {
        Some(cmd) => execute_command(&cli.bench, cmd),
        None => {
            println!("{} Bench manager CLI", "bench".green().bold());
            println!();
            println!("Run {} for available commands.", "bench --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(bench: &Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init { path } => commands::run_init(path.as_deref().unwrap_or(bench)),
        Commands::GetApp {
            source,
            branch,
            name,
        } => commands::run_get_app(bench, &source, branch.as_deref(), name.as_deref()),
        Commands::RemoveApp {
            app,
            no_backup,
            force,
        } => commands::run_remove_app(bench, &app, no_backup, force),
        Commands::Sync {
            app,
            app_dir,
            branch,
            required,
        } => commands::run_sync(
            bench,
            app.as_deref(),
            app_dir.as_deref(),
            branch.as_deref(),
            &required,
        ),
        Commands::ListApps { json, updatable } => commands::run_list_apps(bench, json, updatable),
        Commands::ExcludeApp { app } => commands::run_exclude_app(bench, &app),
        Commands::IncludeApp { app } => commands::run_include_app(bench, &app),
    }
}
