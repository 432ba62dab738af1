use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load settings from {path}")]
    SettingsLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings at {path}")]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Applications ──
    #[error("invalid application id {id:?}: {reason}")]
    InvalidAppId { id: String, reason: &'static str },

    #[error("application '{id}' has no config at {path}")]
    AppNotFound { id: String, path: PathBuf },

    #[error("failed to read application config at {path}")]
    AppConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse application config at {path}")]
    AppConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── State ──
    #[error("failed to read state at {path}")]
    StateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write state at {path}")]
    StateWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown application state {value:?} in {path}")]
    UnknownState { path: PathBuf, value: String },
}
