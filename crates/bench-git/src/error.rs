//! Error types for bench-git

use std::path::PathBuf;

/// Result type for bench-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bench-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directory with git metadata could not answer a ref query.
    #[error("Git query '{query}' failed in {path}: {message}")]
    Query {
        path: PathBuf,
        query: String,
        message: String,
    },

    /// A ref query was made against a directory with no `.git`.
    #[error("Not a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Clone of {url} failed: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },
}

impl Error {
    pub(crate) fn query(path: &std::path::Path, query: &str, source: git2::Error) -> Self {
        Self::Query {
            path: path.to_path_buf(),
            query: query.to_string(),
            message: source.message().to_string(),
        }
    }
}
