use std::io::Write;
use std::path::{Path, PathBuf};

use crate::BuildError;

/// Plain-text build log, one line per event. Only the holder of the
/// application's lock writes to it.
#[derive(Debug, Clone)]
pub struct BuildLog {
    path: PathBuf,
}

impl BuildLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start an empty log, discarding the previous build's.
    pub fn truncate(&self) -> Result<(), BuildError> {
        std::fs::File::create(&self.path)
            .map(drop)
            .map_err(|e| self.error(e))
    }

    pub fn line(&self, message: &str) -> Result<(), BuildError> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.error(e))?;
        writeln!(file, "{message}").map_err(|e| self.error(e))
    }

    fn error(&self, source: std::io::Error) -> BuildError {
        BuildError::Log {
            path: self.path.clone(),
            source,
        }
    }
}
