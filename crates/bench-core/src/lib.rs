//! App registry and state reconciliation for the bench manager
//!
//! A bench is a directory holding applications under `apps/` and tenant
//! sites under `sites/`. This crate tracks which applications are installed:
//!
//! - **AppRegistry**: the ordered, duplicate-free app list, primary app first
//! - **StateDocument**: per-app resolution, dependencies, order and version,
//!   persisted as `sites/apps.json`
//! - **StateReconciler**: keeps the state document consistent with the list
//!   and the filesystem, including the one-time bootstrap for benches that
//!   only have a `sites/apps.txt`
//! - **Bench**: configuration, excluded apps, sites and the install/uninstall
//!   flows that drive the registry
//!
//! # Architecture
//!
//! ```text
//!                 bench-cli
//!                     |
//!                bench-core
//!                     |
//!            +--------+--------+
//!            |                 |
//!        bench-fs          bench-git
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bench_core::{Bench, SyncRequest};
//!
//! let mut bench = Bench::open(".")?;
//! let outcome = bench.registry_mut().sync(&SyncRequest::new())?;
//! println!("pruned {:?}", outcome.pruned);
//! ```

pub mod app;
pub mod bench;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod list;
pub mod reconcile;
pub mod registry;
pub mod scanner;
pub mod sites;
pub mod state;
pub mod version;

pub use app::AppName;
pub use bench::Bench;
pub use collaborators::{
    AppInstaller, InstallRequest, InstalledApp, PackageInspector, SiteInspector, package_key,
};
pub use config::{BenchConfig, DEFAULT_PRIMARY_APP};
pub use error::{Error, Result};
pub use list::AppList;
pub use reconcile::{ReconcileOutcome, StateReconciler, SyncRequest};
pub use registry::AppRegistry;
pub use scanner::AppDirectoryScanner;
pub use sites::SiteConfigInspector;
pub use state::{AppState, NOT_A_REPOSITORY, Resolution, StateDocument};
pub use version::{MarkerVersionResolver, VersionResolver};
