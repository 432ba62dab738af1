use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one application.
///
/// Doubles as the application's directory name under the apps root, so it
/// must be a single, non-special path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        let reason = if id.trim().is_empty() {
            Some("must not be empty")
        } else if id == "." || id == ".." {
            Some("must not be a relative directory reference")
        } else if id.contains(['/', '\\']) {
            Some("must not contain a path separator")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(crate::Error::InvalidAppId { id, reason }),
            None => Ok(Self(id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationState {
    #[default]
    Idle,
    Building,
    Failed,
}

impl ApplicationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Building => "building",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "idle" => Some(Self::Idle),
            "building" => Some(Self::Building),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Whether a new build may start from this state.
    pub fn can_start_build(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-application configuration: a flat map of string settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApplicationConfig(HashMap<String, String>);

impl ApplicationConfig {
    /// Source repository URL.
    pub const GIT: &'static str = "git";
    /// Subpath of the source tree used as the deploy root.
    pub const DEPLOY_BASE: &'static str = "deploy_base";
    /// Deploy destination directory.
    pub const DEPLOY_TO: &'static str = "deploy_to";
    /// Ignore spec for the mirror copy.
    pub const DEPLOY_IGNORE: &'static str = "deploy_ignore";

    pub fn new(values: HashMap<String, String>) -> Self {
        Self(values)
    }

    /// Raw value, including blank ones.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, treating blank values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).filter(|v| !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApplicationConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
