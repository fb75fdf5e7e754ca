//! Discovery of application directories under `apps/`

use std::fs;
use std::path::Path;

use bench_fs::NormalizedPath;

use crate::{AppName, Result};

/// Files an application package must contain somewhere one level below
/// its directory.
pub const APP_MARKERS: [&str; 3] = ["hooks.py", "modules.txt", "patches.txt"];

/// Lists the directories under a bench's `apps/` folder that look like
/// applications. Pure filesystem reads, no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppDirectoryScanner;

impl AppDirectoryScanner {
    pub fn new() -> Self {
        Self
    }

    /// Structural check: every marker in [`APP_MARKERS`] exists inside some
    /// immediate subdirectory of `dir`.
    pub fn is_valid_app(&self, dir: &Path) -> bool {
        let Ok(entries) = fs::read_dir(dir) else {
            return false;
        };
        let packages: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();

        APP_MARKERS
            .iter()
            .all(|marker| packages.iter().any(|pkg| pkg.join(marker).exists()))
    }

    /// Valid application directories under `apps_path`, sorted by name.
    ///
    /// A missing `apps_path` yields an empty list. Hidden entries, plain
    /// files and names that are not valid identifiers are skipped.
    pub fn list_valid_app_dirs(&self, apps_path: &NormalizedPath) -> Result<Vec<AppName>> {
        let native = apps_path.to_native();
        let entries = match fs::read_dir(&native) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %apps_path, "apps directory missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(bench_fs::Error::io(native, e).into()),
        };

        let mut apps = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| bench_fs::Error::io(&native, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if file_name.starts_with('.') || !self.is_valid_app(&path) {
                continue;
            }
            match AppName::new(file_name) {
                Ok(name) => apps.push(name),
                Err(e) => tracing::debug!(error = %e, "skipping app directory"),
            }
        }

        apps.sort();
        Ok(apps)
    }
}
