//! Branch and commit inspection for application checkouts

use git2::Repository;

use bench_fs::NormalizedPath;

use crate::{Error, Result};

/// Read-only questions the registry asks about an application directory.
///
/// `is_version_controlled` is a cheap structural check and never fails.
/// The ref queries fail hard: a directory that carries git metadata but
/// cannot resolve its refs is treated as corrupt, not as "not a repository".
pub trait GitRefInspector {
    /// Whether `path` carries git metadata.
    fn is_version_controlled(&self, path: &NormalizedPath) -> bool;

    /// Name of the checked-out branch, or `"HEAD"` when detached.
    fn current_branch(&self, path: &NormalizedPath) -> Result<String>;

    /// Full commit id that `branch` resolves to.
    fn resolve_commit(&self, path: &NormalizedPath, branch: &str) -> Result<String>;
}

/// [`GitRefInspector`] backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Inspector;

impl Git2Inspector {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, path: &NormalizedPath, query: &str) -> Result<Repository> {
        if !self.is_version_controlled(path) {
            return Err(Error::NotARepository {
                path: path.to_native(),
            });
        }
        Repository::open(path.to_native()).map_err(|e| Error::query(path.as_ref(), query, e))
    }
}

impl GitRefInspector for Git2Inspector {
    fn is_version_controlled(&self, path: &NormalizedPath) -> bool {
        // `.git` may be a file for worktrees and submodules
        path.join(".git").exists()
    }

    fn current_branch(&self, path: &NormalizedPath) -> Result<String> {
        let query = "rev-parse --abbrev-ref HEAD";
        let repo = self.open(path, query)?;
        let head = repo
            .head()
            .map_err(|e| Error::query(path.as_ref(), query, e))?;

        let branch = if head.is_branch() {
            head.shorthand().unwrap_or("HEAD").to_string()
        } else {
            "HEAD".to_string()
        };

        tracing::debug!(path = %path, branch = %branch, "resolved current branch");
        Ok(branch)
    }

    fn resolve_commit(&self, path: &NormalizedPath, branch: &str) -> Result<String> {
        let query = format!("rev-parse {branch}");
        let repo = self.open(path, &query)?;
        let commit = repo
            .revparse_single(branch)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| Error::query(path.as_ref(), &query, e))?;

        let hash = commit.id().to_string();
        tracing::debug!(path = %path, branch = %branch, commit = %hash, "resolved commit");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn plain_directory_is_not_version_controlled() {
        let temp = TempDir::new().unwrap();
        let inspector = Git2Inspector::new();
        assert!(!inspector.is_version_controlled(&NormalizedPath::new(temp.path())));
    }

    #[test]
    fn ref_queries_outside_repository_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path());
        let inspector = Git2Inspector::new();

        let branch = inspector.current_branch(&path);
        assert!(matches!(branch, Err(Error::NotARepository { .. })), "got: {branch:?}");
        let commit = inspector.resolve_commit(&path, "main");
        assert!(matches!(commit, Err(Error::NotARepository { .. })), "got: {commit:?}");
    }
}
