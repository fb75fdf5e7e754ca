//! Application identifiers

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A validated application identifier, unique within a bench.
///
/// The identifier doubles as the directory name under `apps/`, so it must be
/// a single path component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    /// Validate `name` as-is.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name == "." || name == ".." || name.starts_with('.') {
            Some("name must not start with '.'")
        } else if name.contains(['/', '\\']) {
            Some("name must not contain path separators")
        } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("name must not contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::InvalidAppName {
                name,
                reason: reason.to_string(),
            }),
            None => Ok(Self(name)),
        }
    }

    /// Derive an identifier from a repository URL, path or bare name.
    ///
    /// `https://github.com/org/My-App.git` becomes `my_app`.
    pub fn from_source(source: &str) -> Result<Self> {
        let trimmed = source.trim().trim_end_matches('/');
        let last = trimmed
            .rsplit(['/', ':'])
            .next()
            .unwrap_or(trimmed);
        let last = last.strip_suffix(".git").unwrap_or(last);
        Self::new(last.replace('-', "_").to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AppName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AppName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AppName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for AppName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AppName> for String {
    fn from(value: AppName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://github.com/sparrow/sparrow", "sparrow")]
    #[case("https://github.com/org/My-App.git", "my_app")]
    #[case("git@github.com:org/toolkit.git", "toolkit")]
    #[case("/tmp/local-apps/payments/", "payments")]
    #[case("hrms", "hrms")]
    fn from_source_normalizes(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(AppName::from_source(source).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(".git")]
    #[case("..")]
    #[case("a/b")]
    #[case("has space")]
    fn invalid_names_are_rejected(#[case] name: &str) {
        assert!(matches!(
            AppName::new(name),
            Err(Error::InvalidAppName { .. })
        ));
    }

    #[test]
    fn deserializing_validates() {
        let ok: AppName = serde_json::from_str("\"toolkit\"").unwrap();
        assert_eq!(ok, "toolkit");
        assert!(serde_json::from_str::<AppName>("\"../etc\"").is_err());
    }
}
