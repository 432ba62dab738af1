use std::path::PathBuf;

use shipyard_core::{ApplicationId, ApplicationState};
use shipyard_deploy::ScanError;
use shipyard_exec::RunnerError;

use crate::steps::Step;

/// Coarse classification of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required setting is missing or the config is unreadable.
    Configuration,
    /// A build was requested while one is already running.
    StateConflict,
    /// An external tool could not start or exited unexpectedly.
    ToolExecution,
    /// Directory creation, tree scan, state or log I/O failed.
    Filesystem,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("can't build '{app}': current state is {state}")]
    StateConflict {
        app: ApplicationId,
        state: ApplicationState,
    },

    #[error("missing {what}: `{key}` not set in application config")]
    MissingSetting {
        key: &'static str,
        what: &'static str,
    },

    #[error(transparent)]
    Store(#[from] shipyard_core::Error),

    #[error("{step} failed")]
    Tool { step: Step, source: RunnerError },

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to resolve path {path}")]
    ResolvePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to search for dependency manifests under {root}")]
    ManifestSearch {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to resolve deploy exclusions")]
    Exclusions(#[from] ScanError),

    #[error("failed to write build log {path}")]
    Log {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        use shipyard_core::Error as StoreError;

        match self {
            Self::StateConflict { .. } => ErrorKind::StateConflict,
            Self::MissingSetting { .. } => ErrorKind::Configuration,
            Self::Store(
                StoreError::SettingsLoad { .. }
                | StoreError::SettingsParse { .. }
                | StoreError::InvalidAppId { .. }
                | StoreError::AppNotFound { .. }
                | StoreError::AppConfigLoad { .. }
                | StoreError::AppConfigParse { .. },
            ) => ErrorKind::Configuration,
            Self::Store(
                StoreError::StateRead { .. }
                | StoreError::StateWrite { .. }
                | StoreError::UnknownState { .. },
            ) => ErrorKind::Filesystem,
            Self::Tool { .. } => ErrorKind::ToolExecution,
            Self::CreateDir { .. }
            | Self::ResolvePath { .. }
            | Self::ManifestSearch { .. }
            | Self::Exclusions(_)
            | Self::Log { .. } => ErrorKind::Filesystem,
        }
    }

    /// This error followed by its chain of causes, `: `-separated.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        detail
    }
}
