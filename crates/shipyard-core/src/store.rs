use std::path::{Path, PathBuf};

use crate::{ApplicationConfig, ApplicationId, ApplicationState, Error, Result};

const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "state";

/// Persistent lifecycle state, one value per application. Last write wins.
pub trait StateStore: Send + Sync {
    fn get_state(&self, id: &ApplicationId) -> Result<ApplicationState>;

    fn set_state(&self, id: &ApplicationId, state: ApplicationState) -> Result<()>;
}

/// Per-application configuration and working directory.
pub trait ConfigStore: Send + Sync {
    fn app_dir(&self, id: &ApplicationId) -> PathBuf;

    fn load_config(&self, id: &ApplicationId) -> Result<ApplicationConfig>;
}

/// File-backed store: `<root>/<id>/config.toml` and `<root>/<id>/state`.
#[derive(Debug, Clone)]
pub struct FileDb {
    root: PathBuf,
}

impl FileDb {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn state_path(&self, id: &ApplicationId) -> PathBuf {
        self.app_dir(id).join(STATE_FILE)
    }
}

impl StateStore for FileDb {
    fn get_state(&self, id: &ApplicationId) -> Result<ApplicationState> {
        let path = self.state_path(id);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ApplicationState::default());
            }
            Err(e) => return Err(Error::StateRead { path, source: e }),
        };

        ApplicationState::parse(&content).ok_or_else(|| Error::UnknownState {
            path,
            value: content.trim().to_owned(),
        })
    }

    fn set_state(&self, id: &ApplicationId, state: ApplicationState) -> Result<()> {
        let dir = self.app_dir(id);
        std::fs::create_dir_all(&dir).map_err(|e| Error::StateWrite {
            path: dir.clone(),
            source: e,
        })?;

        let path = self.state_path(id);
        std::fs::write(&path, state.as_str())
            .map_err(|e| Error::StateWrite { path, source: e })?;
        tracing::debug!(app = %id, %state, "state recorded");
        Ok(())
    }
}

impl ConfigStore for FileDb {
    fn app_dir(&self, id: &ApplicationId) -> PathBuf {
        self.root.join(id.as_str())
    }

    fn load_config(&self, id: &ApplicationId) -> Result<ApplicationConfig> {
        let path = self.app_dir(id).join(CONFIG_FILE);
        if !path.exists() {
            return Err(Error::AppNotFound {
                id: id.to_string(),
                path,
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::AppConfigLoad {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| Error::AppConfigParse { path, source: e })
    }
}
