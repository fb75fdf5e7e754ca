//! Tenant sites living under `sites/`

use std::fs;

use serde::Deserialize;

use bench_fs::{BenchPath, ConfigStore, NormalizedPath};

use crate::collaborators::SiteInspector;
use crate::{AppName, Result};

const SITE_CONFIG: &str = "site_config.json";

/// Names of the site directories (those holding a `site_config.json`),
/// sorted.
pub fn list_sites(bench_root: &NormalizedPath) -> Result<Vec<String>> {
    let sites_path = bench_root.join(BenchPath::SitesDir.as_str());
    let native = sites_path.to_native();
    let entries = match fs::read_dir(&native) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(bench_fs::Error::io(native, e).into()),
    };

    let mut sites: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().join(SITE_CONFIG).is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    sites.sort();
    Ok(sites)
}

#[derive(Debug, Default, Deserialize)]
struct SiteConfig {
    #[serde(default)]
    installed_apps: Vec<String>,
}

/// [`SiteInspector`] that reads the `installed_apps` list each site keeps in
/// its `site_config.json`.
#[derive(Debug, Clone)]
pub struct SiteConfigInspector {
    bench_root: NormalizedPath,
}

impl SiteConfigInspector {
    pub fn new(bench_root: NormalizedPath) -> Self {
        Self { bench_root }
    }
}

impl SiteInspector for SiteConfigInspector {
    fn sites_with_app(&self, app: &AppName) -> Result<Vec<String>> {
        let store = ConfigStore::new();
        let mut using = Vec::new();

        for site in list_sites(&self.bench_root)? {
            let path = self
                .bench_root
                .join(BenchPath::SitesDir.as_str())
                .join(&site)
                .join(SITE_CONFIG);
            let config: SiteConfig = store.load(&path)?;
            if config.installed_apps.iter().any(|a| a == app.as_str()) {
                using.push(site);
            }
        }
        Ok(using)
    }
}
