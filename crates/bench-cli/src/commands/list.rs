//! list-apps command implementation

use std::path::Path;

use bench_core::{AppState, Bench, PackageInspector, Resolution};
use colored::Colorize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::packages::PipFreezeInspector;

/// One registered app as shown by list-apps.
#[derive(Debug, Clone, PartialEq)]
pub struct AppRow {
    pub name: String,
    pub state: Option<AppState>,
    pub excluded: bool,
}

impl AppRow {
    fn to_json(&self) -> Value {
        let (is_repo, branch, commit_hash) = match &self.state {
            Some(s) => (s.is_repo, s.resolution.branch(), s.resolution.commit_hash()),
            None => (false, None, None),
        };
        json!({
            "name": self.name,
            "idx": self.state.as_ref().map(|s| s.idx),
            "version": self.state.as_ref().and_then(|s| s.version.clone()),
            "is_repo": is_repo,
            "branch": branch,
            "commit_hash": commit_hash,
            "excluded": self.excluded,
        })
    }
}

/// Registered apps in registry order, joined with their state.
pub fn collect_rows(bench: &Bench) -> Result<Vec<AppRow>> {
    let excluded = bench.excluded_apps()?;
    Ok(bench
        .registry()
        .iter()
        .map(|app| AppRow {
            name: app.to_string(),
            state: bench.registry().state_of(app.as_str()).cloned(),
            excluded: excluded.iter().any(|e| e == app.as_str()),
        })
        .collect())
}

fn describe(state: Option<&AppState>) -> String {
    match state.map(|s| &s.resolution) {
        None => "untracked".dimmed().to_string(),
        Some(Resolution::NotARepository) => "not a repository".dimmed().to_string(),
        Some(resolution) => match (resolution.branch(), resolution.commit_hash()) {
            (Some(branch), Some(commit)) => {
                let short = commit.get(..7).unwrap_or(commit);
                format!("{} {}", branch.yellow(), short.dimmed())
            }
            (Some(branch), None) => branch.yellow().to_string(),
            _ => "unresolved".dimmed().to_string(),
        },
    }
}

/// Keep only rows for apps an update would touch.
fn retain_updatable(bench: &Bench, rows: &mut Vec<AppRow>) -> Result<()> {
    let pip = PipFreezeInspector::new(bench.root());
    let packages = pip.as_ref().map(|p| p as &dyn PackageInspector);
    let updatable = bench.updatable_apps(packages)?;
    rows.retain(|row| updatable.iter().any(|app| app.as_str() == row.name));
    Ok(())
}

/// Run the list-apps command
pub fn run_list_apps(bench_root: &Path, json: bool, updatable: bool) -> Result<()> {
    let bench = Bench::open(bench_root)?;
    let mut rows = collect_rows(&bench)?;
    if updatable {
        retain_updatable(&bench, &mut rows)?;
    }

    if json {
        let value = Value::Array(rows.iter().map(AppRow::to_json).collect());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if rows.is_empty() && updatable {
        println!("No apps to update.");
        return Ok(());
    }
    if rows.is_empty() {
        println!("No apps installed. Use {} to add one.", "bench get-app <source>".cyan());
        return Ok(());
    }

    for row in &rows {
        let version = row
            .state
            .as_ref()
            .and_then(|s| s.version.as_deref())
            .unwrap_or("-");
        let excluded = if row.excluded { " (excluded)".red().to_string() } else { String::new() };
        println!(
            "  {:<20} {:<10} {}{}",
            row.name.green(),
            version,
            describe(row.state.as_ref()),
            excluded
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_test_utils::bench::TestBench;
    use bench_core::SyncRequest;

    #[test]
    fn rows_follow_registry_order() {
        let bench = TestBench::new();
        bench.add_app("crm", Some("3.1.0"));
        bench.add_app("sparrow", Some("15.0.0"));
        bench.write_file("sites/excluded_apps.txt", "crm\n");

        let mut opened = Bench::open(bench.root()).unwrap();
        opened.registry_mut().sync(&SyncRequest::new()).unwrap();
        let rows = collect_rows(&opened).unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sparrow", "crm"]);
        assert!(rows[1].excluded);
        assert_eq!(rows[1].to_json()["version"], "3.1.0");
        assert_eq!(rows[0].to_json()["idx"], 1);
    }

    #[test]
    fn untracked_app_has_null_fields() {
        let bench = TestBench::new();
        bench.add_app("crm", None);

        let opened = Bench::open(bench.root()).unwrap();
        let rows = collect_rows(&opened).unwrap();

        assert_eq!(rows[0].to_json()["idx"], Value::Null);
        assert_eq!(rows[0].to_json()["is_repo"], false);
    }

    #[test]
    fn list_apps_runs() {
        let bench = TestBench::new();
        bench.add_app("sparrow", None);
        assert!(run_list_apps(bench.root(), false, false).is_ok());
        assert!(run_list_apps(bench.root(), true, true).is_ok());
    }

    #[test]
    fn updatable_rows_skip_excluded_apps() {
        let bench = TestBench::new();
        bench.add_app("sparrow", None);
        bench.add_app("crm", None);
        bench.write_file("sites/excluded_apps.txt", "crm\n");

        let opened = Bench::open(bench.root()).unwrap();
        let mut rows = collect_rows(&opened).unwrap();
        retain_updatable(&opened, &mut rows).unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sparrow"]);
    }
}
