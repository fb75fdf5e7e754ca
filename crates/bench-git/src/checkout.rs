//! Cloning application repositories into a bench

use git2::FetchOptions;
use git2::build::RepoBuilder;

use bench_fs::NormalizedPath;

use crate::{Error, Git2Inspector, GitRefInspector, Result};

/// Options for [`clone_app`].
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Branch to check out; the remote's default branch when `None`.
    pub branch: Option<String>,
    /// Fetch only the tip commit. Ignored for local sources.
    pub shallow: bool,
}

/// The checkout produced by [`clone_app`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedApp {
    pub path: NormalizedPath,
    pub branch: String,
    pub commit: String,
}

fn is_remote(url: &str) -> bool {
    url.contains("://") && !url.starts_with("file://")
}

/// Clone `url` into `dest` and report the resolved branch and commit.
///
/// Fails with [`Error::DestinationExists`] rather than overwriting an
/// existing application directory.
pub fn clone_app(url: &str, dest: &NormalizedPath, options: &CloneOptions) -> Result<ClonedApp> {
    if dest.exists() {
        return Err(Error::DestinationExists {
            path: dest.to_native(),
        });
    }

    let mut builder = RepoBuilder::new();
    if let Some(branch) = &options.branch {
        builder.branch(branch);
    }
    if options.shallow && is_remote(url) {
        let mut fetch = FetchOptions::new();
        fetch.depth(1);
        builder.fetch_options(fetch);
    }

    tracing::info!(url = %url, dest = %dest, branch = ?options.branch, "cloning app");
    builder
        .clone(url, &dest.to_native())
        .map_err(|e| Error::CloneFailed {
            url: url.to_string(),
            message: e.message().to_string(),
        })?;

    let inspector = Git2Inspector::new();
    let branch = inspector.current_branch(dest)?;
    let commit = inspector.resolve_commit(dest, &branch)?;

    Ok(ClonedApp {
        path: dest.clone(),
        branch,
        commit,
    })
}
