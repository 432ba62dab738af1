use std::collections::HashSet;
use std::path::Path;

use crate::ignore::{self, IgnoreToken};
use crate::matcher::{match_directories, quote_spaces};
use crate::scan::{DirectoryScanner, ScanError, WalkDirScanner};

/// Exclusions for a mirror copy, already quoted for the copy tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Simple tokens; excluded as file names.
    pub files: Vec<String>,
    /// Simple tokens followed by matched directories.
    pub directories: Vec<String>,
}

impl ExclusionSet {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Directory entries that came from tree matching rather than simple tokens.
    pub fn matched_directories(&self) -> impl Iterator<Item = &str> {
        self.directories
            .iter()
            .filter(|d| !self.files.contains(d))
            .map(String::as_str)
    }
}

/// Turns an ignore spec into an [`ExclusionSet`], scanning the source and
/// destination trees for path-segment tokens.
pub struct ExclusionResolver<S: DirectoryScanner = WalkDirScanner> {
    scanner: S,
}

impl ExclusionResolver<WalkDirScanner> {
    pub fn new() -> Self {
        Self {
            scanner: WalkDirScanner,
        }
    }
}

impl Default for ExclusionResolver<WalkDirScanner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DirectoryScanner> ExclusionResolver<S> {
    pub fn with_scanner(scanner: S) -> Self {
        Self { scanner }
    }

    /// Resolve `ignore` against both trees. A blank spec touches nothing.
    pub fn resolve(
        &self,
        source_root: &Path,
        dest_root: &Path,
        ignore: &str,
    ) -> Result<ExclusionSet, ScanError> {
        let mut simple = Vec::new();
        let mut segments = Vec::new();
        for token in ignore::parse(ignore) {
            match token {
                IgnoreToken::Simple(name) => simple.push(quote_spaces(&name)),
                IgnoreToken::PathSegment(segment) => segments.push(segment),
            }
        }

        let mut matched = Vec::new();
        if !segments.is_empty() {
            let source_dirs = self.scanner.directories(source_root)?;
            let dest_dirs = self.scanner.directories(dest_root)?;

            for segment in &segments {
                for dirs in [&source_dirs, &dest_dirs] {
                    matched.extend(
                        match_directories(segment, dirs.as_slice())
                            .iter()
                            .map(|d| quote_spaces(d)),
                    );
                }
            }
        }

        let files = dedup(simple.iter().cloned());
        let directories = dedup(simple.into_iter().chain(matched));

        tracing::debug!(
            files = files.len(),
            directories = directories.len(),
            "resolved deploy exclusions"
        );
        Ok(ExclusionSet { files, directories })
    }
}

/// Keep the first occurrence of each entry.
fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
