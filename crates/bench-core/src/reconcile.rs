//! Reconciliation of the state document with the registry and the disk

use std::path::Path;

use bench_fs::NormalizedPath;
use bench_git::GitRefInspector;

use crate::state::{AppState, Resolution, StateDocument};
use crate::version::VersionResolver;
use crate::{AppList, AppName, Result};

/// Optional inputs to a sync: which app was just added and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncRequest {
    /// Application to record if it has no state entry yet
    pub app_name: Option<AppName>,
    /// Directory under `apps/` (or absolute) when it differs from the name
    pub app_dir: Option<String>,
    /// Branch to record instead of the checked-out one
    pub branch: Option<String>,
    /// Dependencies recorded on new entries
    pub required: Vec<String>,
}

impl SyncRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_app(app: AppName) -> Self {
        Self {
            app_name: Some(app),
            ..Self::default()
        }
    }

    pub fn with_app_dir(mut self, app_dir: impl Into<String>) -> Self {
        self.app_dir = Some(app_dir.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }
}

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The legacy bootstrap ran; the listing must be rewritten
    pub bootstrapped: bool,
    /// Entries dropped because their app is no longer listed
    pub pruned: Vec<String>,
    /// Entry added by the targeted upsert
    pub inserted: Option<AppName>,
}

/// Brings a [`StateDocument`] into agreement with an [`AppList`].
///
/// Works purely in memory; persisting the result is the caller's job.
pub struct StateReconciler<'a> {
    bench_root: &'a NormalizedPath,
    primary_app: &'a str,
    inspector: &'a dyn GitRefInspector,
    versions: &'a dyn VersionResolver,
}

impl<'a> StateReconciler<'a> {
    pub fn new(
        bench_root: &'a NormalizedPath,
        primary_app: &'a str,
        inspector: &'a dyn GitRefInspector,
        versions: &'a dyn VersionResolver,
    ) -> Self {
        Self {
            bench_root,
            primary_app,
            inspector,
            versions,
        }
    }

    fn app_path(&self, dir: &str) -> NormalizedPath {
        if Path::new(dir).is_absolute() {
            NormalizedPath::new(dir)
        } else {
            self.bench_root.join("apps").join(dir)
        }
    }

    /// Run the bootstrap, prune and upsert steps in order.
    ///
    /// `state_file_exists` gates the legacy bootstrap: it fires only when no
    /// state document has ever been written and the registry is non-empty.
    /// On error, `apps` and `state` may be partially modified; callers
    /// reconcile on copies and discard them on failure.
    pub fn update_apps_states(
        &self,
        apps: &mut AppList,
        state: &mut StateDocument,
        request: &SyncRequest,
        state_file_exists: bool,
    ) -> Result<ReconcileOutcome> {
        let mut outcome = ReconcileOutcome::default();

        if !apps.is_empty() && !state_file_exists {
            self.bootstrap(apps, state, &request.required);
            outcome.bootstrapped = true;
        }

        outcome.pruned = self.prune(apps, state);

        if let Some(app) = &request.app_name {
            outcome.inserted = self.upsert(apps, state, app, request)?;
        }

        Ok(outcome)
    }

    /// Synthesizes an entry for every listed app in one pass.
    ///
    /// `is_repo` is probed, but the resolution is left as `{null, null}` even
    /// for repositories: no branch or commit is looked up here. A targeted
    /// upsert never touches an existing entry, so these stay unresolved until
    /// the app is removed and installed again.
    fn bootstrap(&self, apps: &mut AppList, state: &mut StateDocument, required: &[String]) {
        apps.pin_primary(self.primary_app);
        tracing::info!(count = apps.len(), "found existing apps, creating app states");

        for (pos, app) in apps.iter().enumerate() {
            let app_dir = self.app_path(app.as_str());
            state.insert(
                app.as_str(),
                AppState {
                    is_repo: self.inspector.is_version_controlled(&app_dir),
                    resolution: Resolution::unresolved(),
                    required: required.to_vec(),
                    idx: pos + 1,
                    version: self.versions.resolve_version(app, self.bench_root),
                },
            );
        }
    }

    fn prune(&self, apps: &AppList, state: &mut StateDocument) -> Vec<String> {
        let stale: Vec<String> = state
            .keys()
            .filter(|key| !apps.contains(key))
            .map(str::to_string)
            .collect();

        for app in &stale {
            state.remove(app);
            tracing::debug!(app = %app, "pruned stale app state");
        }
        stale
    }

    fn upsert(
        &self,
        apps: &AppList,
        state: &mut StateDocument,
        app: &AppName,
        request: &SyncRequest,
    ) -> Result<Option<AppName>> {
        if state.contains(app.as_str()) {
            return Ok(None);
        }
        if !apps.contains(app.as_str()) {
            tracing::warn!(app = %app, "not a registered app, state entry not created");
            return Ok(None);
        }

        let app_dir = self.app_path(request.app_dir.as_deref().unwrap_or(app.as_str()));
        let is_repo = self.inspector.is_version_controlled(&app_dir);

        let resolution = if is_repo {
            let branch = match &request.branch {
                Some(branch) => branch.clone(),
                None => self.inspector.current_branch(&app_dir)?,
            };
            let commit_hash = self.inspector.resolve_commit(&app_dir, &branch)?;
            Resolution::git(branch, commit_hash)
        } else {
            Resolution::NotARepository
        };

        let entry = AppState {
            is_repo,
            resolution,
            required: request.required.clone(),
            idx: state.len() + 1,
            version: self.versions.resolve_version(app, self.bench_root),
        };
        tracing::info!(app = %app, idx = entry.idx, is_repo, "recorded app state");
        state.insert(app.as_str(), entry);

        Ok(Some(app.clone()))
    }
}
