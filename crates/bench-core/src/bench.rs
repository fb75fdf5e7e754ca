//! A bench directory and the operations commands run against it

use std::collections::BTreeSet;
use std::path::Path;

use bench_fs::{BenchPath, NormalizedPath, io};
use bench_git::{Git2Inspector, GitRefInspector};

use crate::collaborators::{
    AppInstaller, InstallRequest, PackageInspector, SiteInspector, package_key,
};
use crate::config::BenchConfig;
use crate::reconcile::{ReconcileOutcome, SyncRequest};
use crate::version::{MarkerVersionResolver, VersionResolver};
use crate::{AppName, AppRegistry, Error, Result, sites};

/// An opened bench: its configuration and its app registry.
#[derive(Debug)]
pub struct Bench {
    root: NormalizedPath,
    config: BenchConfig,
    registry: AppRegistry,
}

impl Bench {
    /// Create the bench directory layout under `root`.
    ///
    /// Idempotent: existing directories and an existing `sites/apps.txt` are
    /// left alone.
    pub fn init(root: impl AsRef<Path>) -> Result<NormalizedPath> {
        let root = NormalizedPath::new(root.as_ref());
        for dir in BenchPath::DIRECTORIES {
            let path = root.join(dir.as_str()).to_native();
            std::fs::create_dir_all(&path).map_err(|e| bench_fs::Error::io(&path, e))?;
        }

        let listing = root.join(BenchPath::AppsTxt.as_str());
        if !listing.exists() {
            io::write_text(&listing, "")?;
        }

        tracing::info!(path = %root, "bench initialized");
        Ok(root)
    }

    /// Open the bench at `root` with the git2 inspector and marker-file
    /// version resolver.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(
            root,
            Box::new(Git2Inspector::new()),
            Box::new(MarkerVersionResolver::new()),
        )
    }

    /// Open the bench at `root` with explicit leaf services.
    ///
    /// # Errors
    ///
    /// [`Error::NotABench`] if `root/sites` does not exist.
    pub fn open_with(
        root: impl AsRef<Path>,
        inspector: Box<dyn GitRefInspector>,
        versions: Box<dyn VersionResolver>,
    ) -> Result<Self> {
        let root = root.as_ref();
        if !root.join(BenchPath::SitesDir.as_str()).is_dir() {
            return Err(Error::NotABench {
                path: root.to_path_buf(),
            });
        }
        // `.` and `..` would otherwise leak into every path the bench reports
        let root = NormalizedPath::canonicalize(root)?;

        let config = BenchConfig::load(&root)?;
        let registry = AppRegistry::open(
            root.clone(),
            config.primary_app.clone(),
            inspector,
            versions,
        )?;

        Ok(Self {
            root,
            config,
            registry,
        })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AppRegistry {
        &mut self.registry
    }

    fn excluded_path(&self) -> NormalizedPath {
        self.root.join(BenchPath::ExcludedAppsTxt.as_str())
    }

    /// Apps listed in `sites/excluded_apps.txt`; empty if the file is absent.
    pub fn excluded_apps(&self) -> Result<Vec<String>> {
        Ok(io::read_lines(&self.excluded_path())?)
    }

    /// Exclude `app` from update operations. Returns `false` if it already
    /// was excluded.
    pub fn exclude_app(&self, app: &AppName) -> Result<bool> {
        let mut excluded = self.excluded_apps()?;
        if excluded.iter().any(|a| a == app.as_str()) {
            return Ok(false);
        }
        excluded.push(app.to_string());
        io::write_lines(&self.excluded_path(), &excluded)?;
        tracing::info!(app = %app, "excluded app from updates");
        Ok(true)
    }

    /// Include `app` in update operations again. Returns `false` if it was
    /// not excluded.
    pub fn include_app(&self, app: &AppName) -> Result<bool> {
        let mut excluded = self.excluded_apps()?;
        let before = excluded.len();
        excluded.retain(|a| a != app.as_str());
        if excluded.len() == before {
            return Ok(false);
        }
        io::write_lines(&self.excluded_path(), &excluded)?;
        tracing::info!(app = %app, "included app in updates");
        Ok(true)
    }

    /// Registered apps not excluded from updates, in registry order.
    ///
    /// With `packages`, apps missing from the environment are skipped as
    /// well. A package listing that fails counts as nothing installed.
    pub fn updatable_apps(
        &self,
        packages: Option<&dyn PackageInspector>,
    ) -> Result<Vec<AppName>> {
        let excluded = self.excluded_apps()?;
        let installed: Option<BTreeSet<String>> = packages.map(|p| match p.installed_packages() {
            Ok(names) => names.iter().map(|n| package_key(n)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "could not list installed packages");
                BTreeSet::new()
            }
        });

        Ok(self
            .registry
            .iter()
            .filter(|app| !excluded.iter().any(|e| e == app.as_str()))
            .filter(|app| {
                installed
                    .as_ref()
                    .is_none_or(|set| set.contains(&package_key(app.as_str())))
            })
            .cloned()
            .collect())
    }

    /// Site directories in this bench.
    pub fn sites(&self) -> Result<Vec<String>> {
        sites::list_sites(&self.root)
    }

    /// Fetch, install and register an application, then sync.
    pub fn install(
        &mut self,
        installer: &dyn AppInstaller,
        request: &InstallRequest,
    ) -> Result<ReconcileOutcome> {
        let installed = self.registry.add(installer, request)?;

        let mut sync = SyncRequest::for_app(installed.name).with_required(installed.required);
        if let Some(dir) = installed.app_dir {
            sync = sync.with_app_dir(dir);
        }
        if let Some(branch) = installed.branch {
            sync = sync.with_branch(branch);
        }
        self.registry.sync(&sync)
    }

    /// Check that `app` is registered and not installed on any site.
    pub fn validate_app_uninstall(
        &self,
        sites: &dyn SiteInspector,
        app: &str,
    ) -> Result<AppName> {
        let Some(name) = self.registry.iter().find(|a| a.as_str() == app) else {
            return Err(Error::NotInstalled {
                app: app.to_string(),
            });
        };

        let using = sites.sites_with_app(name)?;
        if !using.is_empty() {
            return Err(Error::ValidationFailure {
                app: app.to_string(),
                sites: using,
            });
        }
        Ok(name.clone())
    }

    /// Uninstall and remove an application, then sync.
    ///
    /// Without `force`, fails before touching anything if the app is not
    /// registered or is still installed on a site. With `force`, an
    /// unregistered app is still handed to the installer for removal.
    pub fn uninstall(
        &mut self,
        installer: &dyn AppInstaller,
        sites: &dyn SiteInspector,
        app: &str,
        no_backup: bool,
        force: bool,
    ) -> Result<ReconcileOutcome> {
        if !force {
            self.validate_app_uninstall(sites, app)?;
        }

        if self.registry.contains(app) {
            self.registry.remove(installer, app, no_backup)?;
        } else {
            let name = AppName::new(app)?;
            tracing::warn!(app = %name, "app not registered, forcing removal");
            installer.uninstall_and_remove(&name, no_backup)?;
        }

        self.registry.sync(&SyncRequest::new())
    }
}
