use std::path::PathBuf;

use shipyard_core::{ApplicationConfig, ApplicationId};

use crate::BuildLog;

/// Checkout directory name inside the application directory.
pub const SOURCE_DIR: &str = "source";
/// Build log file name inside the application directory.
pub const LOG_FILE: &str = "log.txt";

/// Everything one build needs. Owned by a single build and dropped with it.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub app: ApplicationId,
    /// Absolute application directory.
    pub app_dir: PathBuf,
    pub source_dir: PathBuf,
    pub log: BuildLog,
    pub config: ApplicationConfig,
}

impl BuildContext {
    pub fn new(app: ApplicationId, app_dir: PathBuf, config: ApplicationConfig) -> Self {
        Self {
            source_dir: app_dir.join(SOURCE_DIR),
            log: BuildLog::new(app_dir.join(LOG_FILE)),
            app,
            app_dir,
            config,
        }
    }
}
