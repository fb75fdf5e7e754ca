//! get-app and remove-app command implementations

use std::path::Path;

use bench_core::{AppName, Bench, InstallRequest, SiteConfigInspector};
use colored::Colorize;

use crate::error::Result;
use crate::installer::GitInstaller;

fn installer_for(bench: &Bench) -> GitInstaller {
    GitInstaller::new(bench.root().clone(), bench.config().shallow_clone)
}

/// Run the get-app command
pub fn run_get_app(
    bench_root: &Path,
    source: &str,
    branch: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let mut bench = Bench::open(bench_root)?;

    let mut request = InstallRequest::new(source);
    if let Some(name) = name {
        request = request.with_name(AppName::new(name)?);
    }
    if let Some(branch) = branch {
        request = request.with_branch(branch);
    }
    let app = request.app_name()?;

    println!("{} Getting {}...", "=>".blue().bold(), app.as_str().cyan());
    let outcome = bench.install(&installer_for(&bench), &request)?;

    let state = bench.registry().state_of(app.as_str());
    match state.and_then(|s| s.resolution.branch()) {
        Some(branch) => println!(
            "{} Installed {} ({})",
            "OK".green().bold(),
            app.as_str().green(),
            branch.yellow()
        ),
        None => println!("{} Installed {}", "OK".green().bold(), app.as_str().green()),
    }
    if outcome.bootstrapped {
        println!("   Created app states for {} existing apps", bench.registry().len());
    }
    Ok(())
}

/// Run the remove-app command
pub fn run_remove_app(bench_root: &Path, app: &str, no_backup: bool, force: bool) -> Result<()> {
    let mut bench = Bench::open(bench_root)?;
    let sites = SiteConfigInspector::new(bench.root().clone());
    let installer = installer_for(&bench);

    println!("{} Removing {}...", "=>".blue().bold(), app.cyan());
    bench.uninstall(&installer, &sites, app, no_backup, force)?;

    let disposition = if no_backup { "deleted" } else { "archived" };
    println!(
        "{} Removed {} ({})",
        "OK".green().bold(),
        app.green(),
        disposition.dimmed()
    );
    Ok(())
}
