//! [`TestBench`] builder for bench directory scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Files that mark a directory under `apps/` as an application.
pub const APP_MARKERS: [&str; 3] = ["hooks.py", "modules.txt", "patches.txt"];

/// A temporary bench directory with helpers for laying out applications
/// and inspecting the files the registry writes.
///
/// # Example
///
/// ```rust,no_run
/// use bench_test_utils::bench::TestBench;
///
/// let bench = TestBench::new();
/// bench.add_app("sparrow", Some("15.0.0"));
/// bench.add_git_app("toolkit", None);
/// assert!(bench.path("apps/toolkit/.git").exists());
/// ```
pub struct TestBench {
    temp_dir: TempDir,
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBench {
    /// Create a bench with empty `apps/` and `sites/` directories.
    pub fn new() -> Self {
        let bench = Self::bare();
        fs::create_dir_all(bench.path("apps")).unwrap();
        fs::create_dir_all(bench.path("sites")).unwrap();
        bench
    }

    /// Create an empty temporary directory with no bench structure.
    pub fn bare() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the bench.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Lay out a valid application directory under `apps/<name>`.
    ///
    /// With `version`, writes `__version__` into the package `__init__.py`.
    pub fn add_app(&self, name: &str, version: Option<&str>) -> PathBuf {
        let app_dir = self.path(&format!("apps/{name}"));
        let package = app_dir.join(name);
        fs::create_dir_all(&package).unwrap();
        for marker in APP_MARKERS {
            fs::write(package.join(marker), "").unwrap();
        }
        let init = match version {
            Some(v) => format!("__version__ = \"{v}\"\n"),
            None => String::new(),
        };
        fs::write(package.join("__init__.py"), init).unwrap();
        app_dir
    }

    /// Lay out a valid application and commit it to a git repository on
    /// `main`. Returns the commit id.
    pub fn add_git_app(&self, name: &str, version: Option<&str>) -> String {
        let app_dir = self.add_app(name, version);
        crate::git::git_repo_with_commit(&app_dir)
    }

    /// Create a directory under `apps/` that lacks the application markers.
    pub fn add_invalid_dir(&self, name: &str) -> PathBuf {
        let dir = self.path(&format!("apps/{name}"));
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("README.md"), "not an app").unwrap();
        dir
    }

    /// Delete an application directory.
    pub fn remove_app_dir(&self, name: &str) {
        fs::remove_dir_all(self.path(&format!("apps/{name}"))).unwrap();
    }

    /// Create a site directory with a `site_config.json`.
    pub fn add_site(&self, name: &str, installed_apps: &[&str]) {
        let site = self.path(&format!("sites/{name}"));
        fs::create_dir_all(&site).unwrap();
        let apps = installed_apps
            .iter()
            .map(|a| format!("\"{a}\""))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(
            site.join("site_config.json"),
            format!("{{\"db_name\": \"{name}\", \"installed_apps\": [{apps}]}}\n"),
        )
        .unwrap();
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Read a file inside the bench.
    ///
    /// # Panics
    /// Panics with the path if the file cannot be read.
    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("TestBench::read_file: {relative}: {e}"))
    }

    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.path(relative).exists(),
            "Expected {relative} to exist in {}",
            self.root().display()
        );
    }

    pub fn assert_file_not_exists(&self, relative: &str) {
        assert!(
            !self.path(relative).exists(),
            "Expected {relative} to not exist in {}",
            self.root().display()
        );
    }
}
