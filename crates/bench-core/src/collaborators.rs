//! Interfaces to the services the registry delegates to
//!
//! Downloading code, installing it into the environment and inspecting site
//! databases all happen outside this crate. The registry only needs to know
//! whether they succeeded.

use crate::{AppName, Result};

/// A request to add an application to a bench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Repository URL, local path or bare name
    pub source: String,
    /// Identifier override; derived from `source` when `None`
    pub name: Option<AppName>,
    pub branch: Option<String>,
}

impl InstallRequest {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: None,
            branch: None,
        }
    }

    pub fn with_name(mut self, name: AppName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// The identifier the installed application will be registered under.
    pub fn app_name(&self) -> Result<AppName> {
        match &self.name {
            Some(name) => Ok(name.clone()),
            None => AppName::from_source(&self.source),
        }
    }
}

/// What an [`AppInstaller`] reports after a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    pub name: AppName,
    /// Directory under `apps/` when it differs from `name`
    pub app_dir: Option<String>,
    /// Branch that was checked out, if known
    pub branch: Option<String>,
    /// Dependencies the application declares
    pub required: Vec<String>,
}

impl InstalledApp {
    pub fn new(name: AppName) -> Self {
        Self {
            name,
            app_dir: None,
            branch: None,
            required: Vec::new(),
        }
    }
}

/// Acquires, installs, uninstalls and removes application code.
///
/// Both operations are opaque and synchronous; a failure must leave the
/// application either fully present or fully absent on disk.
pub trait AppInstaller {
    fn fetch_and_install(&self, request: &InstallRequest) -> Result<InstalledApp>;

    fn uninstall_and_remove(&self, app: &AppName, no_backup: bool) -> Result<()>;
}

/// Answers which tenant sites have an application installed.
pub trait SiteInspector {
    fn sites_with_app(&self, app: &AppName) -> Result<Vec<String>>;
}

/// Lists the Python distributions installed in the bench environment.
pub trait PackageInspector {
    fn installed_packages(&self) -> Result<Vec<String>>;
}

/// Comparison key for a distribution name: case-insensitive, with `-` and
/// `.` treated like `_`.
pub fn package_key(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', '.'], "_")
}
