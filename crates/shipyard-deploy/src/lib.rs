//! Deploy exclusions and mirror-copy commands for shipyard.
//!
//! # Exclusion resolution
//!
//! ```text
//! deploy_ignore = "*.log temp\cache My\ Docs"
//!   1. Tokenize   ── split on unescaped whitespace, `\ ` → ` `
//!   2. Classify   ── no separator → simple, separator → path segment
//!   3. Scan       ── source and destination trees (only if any path segment)
//!   4. Match      ── substring search, shortest path first, prefix-collapse
//!   5. Quote      ── entries with whitespace are wrapped in `"`
//! ```
//!
//! Simple tokens are excluded both as files and as directories. Matched
//! directories only ever land in the directory list.
//!
//! # Mirror
//!
//! [`mirror_invocation`] renders the resolved set for robocopy (`/xf`, `/xd`)
//! or rsync (`--exclude`). The destination tree is scanned too, so excluded
//! entries that only exist there survive the purge.

pub mod exclusions;
pub mod ignore;
pub mod matcher;
pub mod mirror;
pub mod scan;

pub use exclusions::{ExclusionResolver, ExclusionSet};
pub use matcher::{match_directories, quote_spaces};
pub use mirror::mirror_invocation;
pub use scan::{DirectoryScanner, ScanError, WalkDirScanner};
