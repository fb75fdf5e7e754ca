//! Ordered, duplicate-free application list

use crate::AppName;

/// The ordered set of applications installed in a bench.
///
/// Order is meaningful: it is the order written to `sites/apps.txt` and the
/// order `idx` values are derived from. Only named operations are exposed;
/// there is deliberately no way to overwrite an entry by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppList {
    names: Vec<AppName>,
}

impl AppList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from `names`, keeping the first occurrence of duplicates.
    pub fn from_names(names: impl IntoIterator<Item = AppName>) -> Self {
        let mut list = Self::new();
        for name in names {
            list.insert(name);
        }
        list
    }

    /// Append `name`. Returns `false` and leaves the list untouched if it is
    /// already present.
    pub fn insert(&mut self, name: AppName) -> bool {
        if self.contains(name.as_str()) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Remove `name`, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<AppName> {
        let pos = self.position(name)?;
        Some(self.names.remove(pos))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_str() == name)
    }

    pub fn get(&self, idx: usize) -> Option<&AppName> {
        self.names.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AppName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_slice(&self) -> &[AppName] {
        &self.names
    }

    /// Move `primary` to index 0, keeping the relative order of the rest.
    ///
    /// Returns `true` if the order changed.
    pub fn pin_primary(&mut self, primary: &str) -> bool {
        match self.position(primary) {
            Some(0) | None => false,
            Some(pos) => {
                let name = self.names.remove(pos);
                self.names.insert(0, name);
                true
            }
        }
    }

    /// Sort alphabetically, then pin `primary` first.
    pub fn sort_with_primary(&mut self, primary: &str) {
        self.names.sort();
        self.pin_primary(primary);
    }
}

impl<'a> IntoIterator for &'a AppList {
    type Item = &'a AppName;
    type IntoIter = std::slice::Iter<'a, AppName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
