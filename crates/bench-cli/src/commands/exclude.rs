//! exclude-app and include-app command implementations

use std::path::Path;

use bench_core::{AppName, Bench};
use colored::Colorize;

use crate::error::{CliError, Result};

/// Run the exclude-app command
pub fn run_exclude_app(bench_root: &Path, app: &str) -> Result<()> {
    let bench = Bench::open(bench_root)?;
    if !bench.registry().contains(app) {
        return Err(CliError::user(format!("App '{app}' is not installed in this bench")));
    }

    if bench.exclude_app(&AppName::new(app)?)? {
        println!("{} Excluded {} from updates", "OK".green().bold(), app.green());
    } else {
        println!("{} {} is already excluded", "=>".blue().bold(), app.cyan());
    }
    Ok(())
}

/// Run the include-app command
pub fn run_include_app(bench_root: &Path, app: &str) -> Result<()> {
    let bench = Bench::open(bench_root)?;

    if bench.include_app(&AppName::new(app)?)? {
        println!("{} Included {} in updates", "OK".green().bold(), app.green());
    } else {
        println!("{} {} was not excluded", "=>".blue().bold(), app.cyan());
    }
    Ok(())
}
