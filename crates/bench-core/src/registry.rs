//! The per-bench application registry
//!
//! [`AppRegistry`] owns the ordered list of installed applications and the
//! state document that describes them. Every mutation goes through it so the
//! two persisted forms (`sites/apps.txt` and `sites/apps.json`) stay truthful.

use bench_fs::{BenchPath, NormalizedPath, io};
use bench_git::GitRefInspector;

use crate::collaborators::{AppInstaller, InstallRequest, InstalledApp};
use crate::reconcile::{ReconcileOutcome, StateReconciler, SyncRequest};
use crate::scanner::AppDirectoryScanner;
use crate::state::{AppState, StateDocument};
use crate::version::VersionResolver;
use crate::{AppList, AppName, Error, Result};

/// Ordered application list plus its state document, for one bench.
///
/// Construct one per command invocation; there is no shared cache, so each
/// registry reflects the disk as of [`AppRegistry::open`].
pub struct AppRegistry {
    root: NormalizedPath,
    primary_app: String,
    apps: AppList,
    state: StateDocument,
    scanner: AppDirectoryScanner,
    inspector: Box<dyn GitRefInspector>,
    versions: Box<dyn VersionResolver>,
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRegistry")
            .field("root", &self.root)
            .field("primary_app", &self.primary_app)
            .field("apps", &self.apps)
            .finish_non_exhaustive()
    }
}

impl AppRegistry {
    /// Scan `apps/` and load `sites/apps.json` for the bench at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the state document exists but
    /// cannot be parsed.
    pub fn open(
        root: NormalizedPath,
        primary_app: impl Into<String>,
        inspector: Box<dyn GitRefInspector>,
        versions: Box<dyn VersionResolver>,
    ) -> Result<Self> {
        let mut registry = Self {
            root,
            primary_app: primary_app.into(),
            apps: AppList::new(),
            state: StateDocument::new(),
            scanner: AppDirectoryScanner::new(),
            inspector,
            versions,
        };
        registry.initialize()?;
        registry.load_state()?;
        Ok(registry)
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn primary_app(&self) -> &str {
        &self.primary_app
    }

    pub fn apps_path(&self) -> NormalizedPath {
        self.root.join(BenchPath::AppsDir.as_str())
    }

    pub fn listing_path(&self) -> NormalizedPath {
        self.root.join(BenchPath::AppsTxt.as_str())
    }

    pub fn state_path(&self) -> NormalizedPath {
        self.root.join(BenchPath::AppsJson.as_str())
    }

    /// Reset the list to the valid application directories on disk, primary
    /// first. A missing `apps/` directory gives an empty list.
    pub fn initialize(&mut self) -> Result<()> {
        let found = self.scanner.list_valid_app_dirs(&self.apps_path())?;
        let mut apps = AppList::from_names(found);
        apps.pin_primary(&self.primary_app);
        tracing::debug!(count = apps.len(), "initialized app list");
        self.apps = apps;
        Ok(())
    }

    /// Reload the state document; an absent file is an empty document.
    pub fn load_state(&mut self) -> Result<()> {
        self.state = StateDocument::load(&self.state_path())?.unwrap_or_default();
        Ok(())
    }

    /// Fetch and install an application, then register it.
    ///
    /// The list is re-sorted alphabetically with the primary app pinned
    /// first. Nothing is registered if the installer fails, and nothing is
    /// written to disk here; call [`AppRegistry::sync`] afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyInstalled`] if the identifier is already registered,
    /// checked before the installer runs. Installer failures propagate
    /// unchanged.
    pub fn add(
        &mut self,
        installer: &dyn AppInstaller,
        request: &InstallRequest,
    ) -> Result<InstalledApp> {
        let name = request.app_name()?;
        if self.apps.contains(name.as_str()) {
            return Err(Error::AlreadyInstalled {
                app: name.to_string(),
            });
        }

        let installed = installer.fetch_and_install(request)?;
        if !self.apps.insert(installed.name.clone()) {
            return Err(Error::AlreadyInstalled {
                app: installed.name.to_string(),
            });
        }
        self.apps.sort_with_primary(&self.primary_app);

        tracing::info!(app = %installed.name, "added app");
        Ok(installed)
    }

    /// Uninstall and remove an application, then unregister it.
    ///
    /// The list is unchanged if the installer fails.
    pub fn remove(
        &mut self,
        installer: &dyn AppInstaller,
        app: &str,
        no_backup: bool,
    ) -> Result<AppName> {
        let Some(pos) = self.apps.position(app) else {
            return Err(Error::NotInstalled {
                app: app.to_string(),
            });
        };
        let name = self.apps.as_slice()[pos].clone();

        installer.uninstall_and_remove(&name, no_backup)?;
        self.apps.remove(name.as_str());

        tracing::info!(app = %name, "removed app");
        Ok(name)
    }

    /// Rescan the apps directory, rewrite the listing and reconcile state.
    pub fn sync(&mut self, request: &SyncRequest) -> Result<ReconcileOutcome> {
        self.initialize()?;
        self.write_listing()?;
        self.update_apps_states(request)
    }

    /// Reconcile the state document with the current list and persist it.
    ///
    /// Reconciliation runs on copies. If it fails, neither the in-memory
    /// registry nor `sites/apps.json` changes.
    pub fn update_apps_states(&mut self, request: &SyncRequest) -> Result<ReconcileOutcome> {
        let state_path = self.state_path();
        let mut apps = self.apps.clone();
        let mut state = self.state.clone();

        let reconciler = StateReconciler::new(
            &self.root,
            &self.primary_app,
            self.inspector.as_ref(),
            self.versions.as_ref(),
        );
        let outcome =
            reconciler.update_apps_states(&mut apps, &mut state, request, state_path.exists())?;

        self.apps = apps;
        self.state = state;

        if outcome.bootstrapped {
            self.write_listing()?;
        }
        self.state.save(&state_path)?;

        tracing::debug!(
            bootstrapped = outcome.bootstrapped,
            pruned = outcome.pruned.len(),
            inserted = ?outcome.inserted,
            "app states updated"
        );
        Ok(outcome)
    }

    /// Write `sites/apps.txt` in registry order.
    pub fn write_listing(&self) -> Result<()> {
        io::write_lines(&self.listing_path(), self.apps.as_slice())?;
        Ok(())
    }

    pub fn apps(&self) -> &AppList {
        &self.apps
    }

    pub fn get(&self, idx: usize) -> Option<&AppName> {
        self.apps.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AppName> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn contains(&self, app: &str) -> bool {
        self.apps.contains(app)
    }

    pub fn state(&self) -> &StateDocument {
        &self.state
    }

    pub fn state_of(&self, app: &str) -> Option<&AppState> {
        self.state.get(app)
    }
}

impl<'a> IntoIterator for &'a AppRegistry {
    type Item = &'a AppName;
    type IntoIter = std::slice::Iter<'a, AppName>;

    fn into_iter(self) -> Self::IntoIter {
        self.apps.iter()
    }
}
