//! The persisted per-application state document (`sites/apps.json`)

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use bench_fs::{ConfigStore, NormalizedPath};

use crate::{Error, Result};

/// Marker recorded for application directories without git metadata.
pub const NOT_A_REPOSITORY: &str = "not a repository";

/// Older benches wrote this shorter marker.
const LEGACY_NOT_A_REPOSITORY: &str = "not a repo";

/// Where an application's code came from at reconciliation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serialized as the string [`NOT_A_REPOSITORY`].
    NotARepository,
    /// Serialized as `{"commit_hash": ..., "branch": ...}`. Both are `null`
    /// for entries created by the legacy bootstrap.
    Git {
        branch: Option<String>,
        commit_hash: Option<String>,
    },
}

impl Resolution {
    /// The unresolved `{commit_hash: null, branch: null}` pair.
    pub fn unresolved() -> Self {
        Self::Git {
            branch: None,
            commit_hash: None,
        }
    }

    pub fn git(branch: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self::Git {
            branch: Some(branch.into()),
            commit_hash: Some(commit_hash.into()),
        }
    }

    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Git { branch, .. } => branch.as_deref(),
            Self::NotARepository => None,
        }
    }

    pub fn commit_hash(&self) -> Option<&str> {
        match self {
            Self::Git { commit_hash, .. } => commit_hash.as_deref(),
            Self::NotARepository => None,
        }
    }
}

#[derive(Serialize)]
struct GitRef<'a> {
    commit_hash: &'a Option<String>,
    branch: &'a Option<String>,
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::NotARepository => serializer.serialize_str(NOT_A_REPOSITORY),
            Self::Git {
                branch,
                commit_hash,
            } => GitRef {
                commit_hash,
                branch,
            }
            .serialize(serializer),
        }
    }
}

/// A nullable field that must still be present.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGitRef {
    #[serde(deserialize_with = "present")]
    branch: Option<String>,
    #[serde(deserialize_with = "present")]
    commit_hash: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResolution {
    Marker(String),
    Git(RawGitRef),
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawResolution::deserialize(deserializer)? {
            RawResolution::Marker(marker)
                if marker == NOT_A_REPOSITORY || marker == LEGACY_NOT_A_REPOSITORY =>
            {
                Ok(Self::NotARepository)
            }
            RawResolution::Marker(other) => Err(de::Error::custom(format!(
                "unknown resolution marker '{other}'"
            ))),
            RawResolution::Git(RawGitRef {
                branch,
                commit_hash,
            }) => Ok(Self::Git {
                branch,
                commit_hash,
            }),
        }
    }
}

/// Tracked metadata for one installed application.
///
/// Unknown keys are rejected so a malformed entry surfaces as
/// [`Error::CorruptState`] instead of being rewritten without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppState {
    /// Absent in documents written by older benches
    #[serde(default)]
    pub is_repo: bool,
    pub resolution: Resolution,
    /// Declared dependencies, recorded as given and never validated
    #[serde(default)]
    pub required: Vec<String>,
    /// 1-based position at the time the entry was computed
    pub idx: usize,
    #[serde(default)]
    pub version: Option<String>,
}

/// Mapping from application identifier to [`AppState`].
///
/// Keys serialize in sorted order so rewriting an unchanged document is
/// byte-identical; `idx` carries the registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDocument {
    apps: BTreeMap<String, AppState>,
}

impl StateDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the document at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist and an empty document
    /// when it is empty. Anything unparsable is [`Error::CorruptState`]; it is
    /// never silently replaced.
    pub fn load(path: &NormalizedPath) -> Result<Option<Self>> {
        ConfigStore::new()
            .load_opt::<Self>(path)
            .map_err(|e| match e {
                bench_fs::Error::ConfigParse { path, message, .. } => {
                    Error::CorruptState { path, message }
                }
                other => Error::Fs(other),
            })
    }

    /// Overwrite the document at `path` as a whole.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    pub fn get(&self, app: &str) -> Option<&AppState> {
        self.apps.get(app)
    }

    pub fn contains(&self, app: &str) -> bool {
        self.apps.contains_key(app)
    }

    pub fn insert(&mut self, app: impl Into<String>, state: AppState) -> Option<AppState> {
        self.apps.insert(app.into(), state)
    }

    pub fn remove(&mut self, app: &str) -> Option<AppState> {
        self.apps.remove(app)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AppState)> {
        self.apps.iter().map(|(k, v)| (k.as_str(), v))
    }
}
