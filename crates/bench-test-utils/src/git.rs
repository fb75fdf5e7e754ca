//! Git repository fixtures at three realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.

use std::fs;
use std::path::Path;

use git2::{Repository, Signature};

/// Creates a `.git` directory that is **not** a usable repository.
///
/// Realism level: **FAKE**, directory structure only, no object store.
///
/// Use for: tests that need repository detection to succeed while every ref
/// query fails.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises a real git repository with no commits.
///
/// Realism level: **REAL**, valid object store, unborn `HEAD`.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises a real git repository on `main` with one commit of every file
/// currently under `path`, and returns the commit id.
///
/// Realism level: **REAL WITH HISTORY**. Uses a fixed signature so no user
/// git config is needed.
///
/// # Panics
/// Panics if any git operation fails.
pub fn git_repo_with_commit(path: &Path) -> String {
    let repo = real_git_repo(path);
    repo.set_head("refs/heads/main")
        .unwrap_or_else(|e| panic!("git_repo_with_commit: set_head failed: {e}"));

    if fs::read_dir(path).map(|d| d.count()).unwrap_or(0) <= 1 {
        fs::write(path.join("README.md"), "# Test")
            .unwrap_or_else(|e| panic!("git_repo_with_commit: failed to write README.md: {e}"));
    }

    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap_or_else(|e| panic!("git_repo_with_commit: add_all failed: {e}"));
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .unwrap_or_else(|e| panic!("git_repo_with_commit: commit failed: {e}"));
    oid.to_string()
}

/// Create `branch` at the current `HEAD` commit without checking it out.
///
/// # Panics
/// Panics if the repository has no commits.
pub fn create_branch(path: &Path, branch: &str) {
    let repo = Repository::open(path).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(branch, &head, false)
        .unwrap_or_else(|e| panic!("create_branch: failed to create {branch}: {e}"));
}

/// Detach `HEAD` at its current commit.
///
/// # Panics
/// Panics if the repository has no commits.
pub fn detach_head(path: &Path) {
    let repo = Repository::open(path).unwrap();
    let oid = repo.head().unwrap().target().unwrap();
    repo.set_head_detached(oid).unwrap();
}
