//! Well-known paths inside a bench directory.

use std::path::Path;

/// Standard bench filesystem locations, relative to the bench root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchPath {
    /// `apps/`, one checkout per application
    AppsDir,
    /// `sites/`, tenant sites and bench-wide state files
    SitesDir,
    /// `config/`
    ConfigDir,
    /// `logs/`
    LogsDir,
    /// `archived/apps/`, removed applications kept as backups
    ArchivedAppsDir,
    /// `sites/apps.txt`, the plain installed-app listing
    AppsTxt,
    /// `sites/apps.json`, the structured state document
    AppsJson,
    /// `sites/excluded_apps.txt`, apps skipped by update operations
    ExcludedAppsTxt,
    /// `sites/common_site_config.json`
    CommonSiteConfig,
}

impl BenchPath {
    /// Directories created when a bench is initialized.
    pub const DIRECTORIES: [BenchPath; 5] = [
        BenchPath::AppsDir,
        BenchPath::SitesDir,
        BenchPath::ConfigDir,
        BenchPath::LogsDir,
        BenchPath::ArchivedAppsDir,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppsDir => "apps",
            Self::SitesDir => "sites",
            Self::ConfigDir => "config",
            Self::LogsDir => "logs",
            Self::ArchivedAppsDir => "archived/apps",
            Self::AppsTxt => "sites/apps.txt",
            Self::AppsJson => "sites/apps.json",
            Self::ExcludedAppsTxt => "sites/excluded_apps.txt",
            Self::CommonSiteConfig => "sites/common_site_config.json",
        }
    }
}

impl AsRef<Path> for BenchPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for BenchPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for BenchPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
