//! Bench-wide configuration (`sites/common_site_config.json`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use bench_fs::{BenchPath, ConfigStore, NormalizedPath};

use crate::Result;

/// Identifier of the foundational application every bench depends on.
pub const DEFAULT_PRIMARY_APP: &str = "sparrow";

fn default_primary_app() -> String {
    DEFAULT_PRIMARY_APP.to_string()
}

fn default_true() -> bool {
    true
}

/// Settings read from the bench's common site config.
///
/// Only the keys the registry uses are typed; everything else in the file is
/// carried through `extra` so saving never drops keys written by other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Application always ordered first
    #[serde(default = "default_primary_app")]
    pub primary_app: String,

    /// Clone new apps with depth 1
    #[serde(default = "default_true")]
    pub shallow_clone: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            primary_app: default_primary_app(),
            shallow_clone: true,
            extra: Map::new(),
        }
    }
}

impl BenchConfig {
    pub fn path(bench_root: &NormalizedPath) -> NormalizedPath {
        bench_root.join(BenchPath::CommonSiteConfig.as_str())
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load(bench_root: &NormalizedPath) -> Result<Self> {
        let path = Self::path(bench_root);
        let config = ConfigStore::new()
            .load_opt::<Self>(&path)?
            .unwrap_or_default();
        Ok(config)
    }

    pub fn save(&self, bench_root: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(&Self::path(bench_root), self)?;
        Ok(())
    }
}
