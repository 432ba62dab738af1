use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Lists every directory under a root, the root included.
///
/// Snapshots are taken fresh for each call and never cached: a deploy may run
/// right after a clone created the tree or a purge emptied it.
pub trait DirectoryScanner: Send + Sync {
    fn directories(&self, root: &Path) -> Result<Vec<String>, ScanError>;
}

impl<T: DirectoryScanner + ?Sized> DirectoryScanner for &T {
    fn directories(&self, root: &Path) -> Result<Vec<String>, ScanError> {
        (**self).directories(root)
    }
}

/// Recursive scan with `walkdir`. Paths are absolute and end with a
/// separator, so ignore tokens such as `bin\` also match leaf directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirScanner;

impl DirectoryScanner for WalkDirScanner {
    fn directories(&self, root: &Path) -> Result<Vec<String>, ScanError> {
        let root = std::path::absolute(root).map_err(|e| ScanError::Resolve {
            root: root.to_path_buf(),
            source: e,
        })?;

        let mut dirs = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| ScanError::Walk {
                root: root.clone(),
                source: e,
            })?;
            if entry.file_type().is_dir() {
                let mut path = entry.path().display().to_string();
                if !path.ends_with(std::path::is_separator) {
                    path.push(std::path::MAIN_SEPARATOR);
                }
                dirs.push(path);
            }
        }

        tracing::debug!(root = %root.display(), count = dirs.len(), "scanned directories");
        Ok(dirs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to resolve scan root {root}")]
    Resolve {
        root: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to scan directories under {root}")]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },
}
