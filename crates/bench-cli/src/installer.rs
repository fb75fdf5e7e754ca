//! Git-based application installer
//!
//! Clones application repositories into `apps/`, installs them into the
//! bench's Python environment when one exists, and archives or deletes them
//! on removal.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use bench_core::{
    AppDirectoryScanner, AppInstaller, AppName, Error, InstallRequest, InstalledApp, Result,
};
use bench_fs::{BenchPath, NormalizedPath};
use bench_git::CloneOptions;

/// [`AppInstaller`] that fetches with git and installs with the bench's pip.
#[derive(Debug, Clone)]
pub struct GitInstaller {
    root: NormalizedPath,
    shallow: bool,
}

impl GitInstaller {
    pub fn new(root: NormalizedPath, shallow: bool) -> Self {
        Self { root, shallow }
    }

    fn app_path(&self, app: &AppName) -> NormalizedPath {
        self.root.join(BenchPath::AppsDir.as_str()).join(app.as_str())
    }

    fn python(&self) -> Option<PathBuf> {
        let python = self.root.join("env/bin/python").to_native();
        python.is_file().then_some(python)
    }

    fn pip(&self, app: &AppName, args: &[&str]) -> Result<()> {
        let Some(python) = self.python() else {
            tracing::warn!(app = %app, "no env/bin/python in bench, skipping pip");
            return Ok(());
        };

        tracing::debug!(app = %app, ?args, "running pip");
        let output = Command::new(&python)
            .args(["-m", "pip"])
            .args(args)
            .current_dir(self.root.to_native())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::installer(app.as_str(), stderr.trim()));
        }
        Ok(())
    }

    fn archive_path(&self, app: &AppName) -> NormalizedPath {
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        self.root
            .join(BenchPath::ArchivedAppsDir.as_str())
            .join(&format!("{app}-{stamp}"))
    }
}

impl AppInstaller for GitInstaller {
    fn fetch_and_install(&self, request: &InstallRequest) -> Result<InstalledApp> {
        let name = request.app_name()?;
        let dest = self.app_path(&name);
        let options = CloneOptions {
            branch: request.branch.clone(),
            shallow: self.shallow,
        };

        tracing::info!(app = %name, source = %request.source, "fetching app");
        let cloned = bench_git::clone_app(&request.source, &dest, &options)
            .map_err(|e| Error::installer(name.as_str(), e.to_string()))?;

        if !AppDirectoryScanner::new().is_valid_app(dest.as_ref()) {
            fs::remove_dir_all(dest.to_native())?;
            return Err(Error::installer(
                name.as_str(),
                format!(
                    "{} is not an app (missing hooks.py, modules.txt or patches.txt)",
                    request.source
                ),
            ));
        }

        let editable = dest.to_native().to_string_lossy().into_owned();
        let args = ["install", "--quiet", "--upgrade", "-e", editable.as_str()];
        if let Err(e) = self.pip(&name, &args) {
            fs::remove_dir_all(dest.to_native())?;
            return Err(e);
        }

        Ok(InstalledApp {
            branch: Some(cloned.branch),
            ..InstalledApp::new(name)
        })
    }

    fn uninstall_and_remove(&self, app: &AppName, no_backup: bool) -> Result<()> {
        let path = self.app_path(app);

        self.pip(app, &["uninstall", "--yes", app.as_str()])?;

        if !path.exists() {
            tracing::warn!(app = %app, path = %path, "app directory already gone");
            return Ok(());
        }

        if no_backup {
            fs::remove_dir_all(path.to_native())?;
            tracing::info!(app = %app, "deleted app directory");
        } else {
            let archive = self.archive_path(app);
            if let Some(parent) = archive.parent() {
                fs::create_dir_all(parent.to_native())?;
            }
            fs::rename(path.to_native(), archive.to_native())?;
            tracing::info!(app = %app, archive = %archive, "archived app");
        }
        Ok(())
    }
}
