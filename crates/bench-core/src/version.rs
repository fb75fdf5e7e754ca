//! Self-reported application versions

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use bench_fs::{ConfigStore, NormalizedPath, io};

use crate::AppName;

/// Reports the version an application declares about itself.
///
/// Resolution is best effort: an unreadable or unparsable marker is `None`,
/// never an error, so callers cannot turn a missing version into a failed
/// sync.
pub trait VersionResolver {
    fn resolve_version(&self, app: &AppName, bench_root: &NormalizedPath) -> Option<String>;
}

static VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^__version__\s*=\s*["']([^"']+)["']"#)
        .expect("Invalid version assignment regex")
});

#[derive(Deserialize)]
struct PyProject {
    project: Option<ProjectTable>,
}

#[derive(Deserialize)]
struct ProjectTable {
    version: Option<String>,
}

/// Reads `apps/<app>/<app>/__init__.py` for a `__version__` assignment,
/// falling back to `[project].version` in `apps/<app>/pyproject.toml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerVersionResolver;

impl MarkerVersionResolver {
    pub fn new() -> Self {
        Self
    }

    fn from_init(&self, app_dir: &NormalizedPath, app: &AppName) -> Option<String> {
        let init = app_dir.join(app.as_str()).join("__init__.py");
        let content = io::read_text_opt(&init).ok()??;
        VERSION_ASSIGNMENT
            .captures(&content)
            .map(|caps| caps[1].trim().to_string())
    }

    fn from_pyproject(&self, app_dir: &NormalizedPath) -> Option<String> {
        let path = app_dir.join("pyproject.toml");
        let doc: PyProject = match ConfigStore::new().load_opt(&path) {
            Ok(doc) => doc?,
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "unreadable pyproject.toml");
                return None;
            }
        };
        doc.project?.version
    }
}

impl VersionResolver for MarkerVersionResolver {
    fn resolve_version(&self, app: &AppName, bench_root: &NormalizedPath) -> Option<String> {
        let app_dir = bench_root.join("apps").join(app.as_str());
        let version = self
            .from_init(&app_dir, app)
            .or_else(|| self.from_pyproject(&app_dir));

        if version.is_none() {
            tracing::debug!(app = %app, "no version marker found");
        }
        version
    }
}
