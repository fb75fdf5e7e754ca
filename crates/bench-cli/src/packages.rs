//! Installed-package listing through the bench's pip

use std::process::Command;

use bench_core::{Error, PackageInspector, Result};
use bench_fs::NormalizedPath;

/// [`PackageInspector`] that runs `python -m pip freeze` in the bench env.
#[derive(Debug, Clone)]
pub struct PipFreezeInspector {
    root: NormalizedPath,
    python: NormalizedPath,
}

impl PipFreezeInspector {
    /// `None` when the bench has no `env/bin/python`.
    pub fn new(root: &NormalizedPath) -> Option<Self> {
        let python = root.join("env/bin/python");
        python.to_native().is_file().then(|| Self {
            root: root.clone(),
            python,
        })
    }
}

impl PackageInspector for PipFreezeInspector {
    fn installed_packages(&self) -> Result<Vec<String>> {
        tracing::debug!(python = %self.python, "running pip freeze");
        let output = Command::new(self.python.to_native())
            .args(["-m", "pip", "freeze"])
            .current_dir(self.root.to_native())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::installer("pip", stderr.trim()));
        }
        Ok(parse_freeze(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Distribution names from `pip freeze` output.
///
/// Handles `name==version`, `name @ url`, `-e ...#egg=name` and editable
/// installs given as a bare path, where the last path segment is the name.
fn parse_freeze(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            if let Some((_, egg)) = line.split_once("#egg=") {
                return Some(egg.split('&').next().unwrap_or(egg).to_string());
            }
            if let Some(path) = line.strip_prefix("-e ") {
                let path = path.trim().trim_end_matches('/');
                return path.rsplit('/').next().map(str::to_string);
            }
            line.split(['=', '@', '<', '>', '~', ' '])
                .next()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_test_utils::bench::TestBench;

    #[test]
    fn freeze_lines_yield_names() {
        let output = "\
# Editable install with no version control (sparrow==15.0.0)
-e /srv/bench/apps/sparrow
-e git+https://github.com/org/crm.git@abc123#egg=crm
requests==2.31.0
payments @ file:///srv/bench/apps/payments

";
        assert_eq!(parse_freeze(output), vec!["sparrow", "crm", "requests", "payments"]);
    }

    #[test]
    fn absent_when_bench_has_no_python() {
        let bench = TestBench::new();
        assert!(PipFreezeInspector::new(&NormalizedPath::new(bench.root())).is_none());
    }
}
