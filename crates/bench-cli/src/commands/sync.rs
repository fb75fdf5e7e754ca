//! Sync command implementation

use std::path::Path;

use bench_core::{AppName, Bench, ReconcileOutcome, SyncRequest};
use colored::Colorize;

use crate::error::Result;

/// Run the sync command
///
/// Rescans `apps/`, rewrites `sites/apps.txt` and reconciles
/// `sites/apps.json`, optionally recording state for one app.
pub fn run_sync(
    bench_root: &Path,
    app: Option<&str>,
    app_dir: Option<&str>,
    branch: Option<&str>,
    required: &[String],
) -> Result<()> {
    let mut bench = Bench::open(bench_root)?;

    let mut request = match app {
        Some(app) => SyncRequest::for_app(AppName::new(app)?),
        None => SyncRequest::new(),
    };
    if let Some(dir) = app_dir {
        request = request.with_app_dir(dir);
    }
    if let Some(branch) = branch {
        request = request.with_branch(branch);
    }
    request = request.with_required(required.to_vec());

    println!("{} Syncing app states...", "=>".blue().bold());
    let outcome = bench.registry_mut().sync(&request)?;
    print_outcome(&outcome, bench.registry().len());
    Ok(())
}

fn print_outcome(outcome: &ReconcileOutcome, app_count: usize) {
    if outcome.bootstrapped {
        println!("   {} Created app states for {} apps", "+".green(), app_count);
    }
    for app in &outcome.pruned {
        println!("   {} {}", "-".red(), app);
    }
    if let Some(app) = &outcome.inserted {
        println!("   {} {}", "+".green(), app);
    }

    if !outcome.bootstrapped && outcome.pruned.is_empty() && outcome.inserted.is_none() {
        println!("{} Already synchronized. No changes needed.", "OK".green().bold());
    } else {
        println!("{} Synchronization complete.", "OK".green().bold());
    }
}
