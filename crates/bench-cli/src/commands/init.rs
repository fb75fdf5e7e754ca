//! Init command implementation

use std::path::Path;

use bench_core::{Bench, BenchConfig};
use colored::Colorize;

use crate::error::Result;

/// Run the init command
///
/// Creates the bench directories, an empty `sites/apps.txt` and, if absent,
/// a default `sites/common_site_config.json`. Safe to rerun.
pub fn run_init(path: &Path) -> Result<()> {
    println!(
        "{} Initializing bench in {}...",
        "=>".blue().bold(),
        path.display().to_string().cyan()
    );

    let root = Bench::init(path)?;
    if !BenchConfig::path(&root).exists() {
        BenchConfig::default().save(&root)?;
    }

    println!("{} Bench initialized!", "OK".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_bench_that_opens() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my-bench");

        run_init(&root).unwrap();

        assert!(root.join("sites/apps.txt").is_file());
        assert!(root.join("sites/common_site_config.json").is_file());
        let bench = Bench::open(&root).unwrap();
        assert_eq!(bench.config().primary_app, "sparrow");
    }

    #[test]
    fn init_keeps_existing_config() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("sites")).unwrap();
        std::fs::write(
            temp.path().join("sites/common_site_config.json"),
            r#"{"primary_app": "platform"}"#,
        )
        .unwrap();

        run_init(temp.path()).unwrap();

        let bench = Bench::open(temp.path()).unwrap();
        assert_eq!(bench.config().primary_app, "platform");
    }
}
