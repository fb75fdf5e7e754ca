//! Error types for bench-core

use std::path::PathBuf;

/// Result type for bench-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bench-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operation targets an application the registry does not list
    #[error("No app named {app}")]
    NotInstalled { app: String },

    /// Removal blocked because sites still have the application installed
    #[error("Cannot remove {app}: installed on site(s) {}", sites.join(", "))]
    ValidationFailure { app: String, sites: Vec<String> },

    /// The application is already registered in this bench
    #[error("App {app} is already installed")]
    AlreadyInstalled { app: String },

    /// The state document exists but is not a valid state document
    #[error("Corrupt app state at {path}: {message}")]
    CorruptState { path: PathBuf, message: String },

    /// A version-controlled app directory failed a branch/commit query
    #[error(transparent)]
    RepoQuery(#[from] bench_git::Error),

    #[error("Invalid app name '{name}': {reason}")]
    InvalidAppName { name: String, reason: String },

    #[error("Not a bench directory: {path} (missing sites/)")]
    NotABench { path: PathBuf },

    /// Acquisition, installation or removal failed in an external collaborator
    #[error("Installer failed for {app}: {message}")]
    Installer { app: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from bench-fs
    #[error(transparent)]
    Fs(#[from] bench_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn installer(app: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Installer {
            app: app.into(),
            message: message.into(),
        }
    }
}
