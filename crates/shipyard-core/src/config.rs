use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default settings file name, resolved against the working directory.
pub const SETTINGS_FILE: &str = "shipyard.toml";

/// shipyard.toml: process-wide settings shared by every application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding one subdirectory per application
    #[serde(default = "default_apps_root")]
    pub apps_root: PathBuf,
    #[serde(default)]
    pub git: GitSettings,
    #[serde(default)]
    pub restore: RestoreSettings,
    #[serde(default)]
    pub compile: CompileSettings,
    #[serde(default)]
    pub mirror: MirrorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSettings {
    /// Version-control executable
    #[serde(default = "default_git_program")]
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreSettings {
    /// Package-restore executable
    #[serde(default = "default_restore_program")]
    pub program: String,
    /// Manifest file name searched for anywhere under the source tree
    #[serde(default = "default_restore_manifest")]
    pub manifest: String,
    /// Arguments; `{manifest}` is replaced with the manifest path
    #[serde(default = "default_restore_args")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileSettings {
    /// Build tool executable, shared by all applications
    #[serde(default = "default_compile_tool")]
    pub tool: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorSettings {
    #[serde(default)]
    pub tool: MirrorTool,
}

/// Copy tool used to mirror the deploy root into the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorTool {
    Robocopy,
    Rsync,
}

impl Default for MirrorTool {
    fn default() -> Self {
        if cfg!(windows) {
            Self::Robocopy
        } else {
            Self::Rsync
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            apps_root: default_apps_root(),
            git: GitSettings::default(),
            restore: RestoreSettings::default(),
            compile: CompileSettings::default(),
            mirror: MirrorSettings::default(),
        }
    }
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

impl Default for RestoreSettings {
    fn default() -> Self {
        Self {
            program: default_restore_program(),
            manifest: default_restore_manifest(),
            args: default_restore_args(),
        }
    }
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            tool: default_compile_tool(),
            args: Vec::new(),
        }
    }
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            tool: MirrorTool::default(),
        }
    }
}

impl Settings {
    /// Load from the given settings file, or return defaults if not found.
    ///
    /// A relative `apps_root` is resolved against the settings file's directory.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::SettingsLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut settings: Self =
            toml::from_str(&content).map_err(|e| crate::Error::SettingsParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        if settings.apps_root.is_relative() {
            if let Some(dir) = path.parent() {
                settings.apps_root = dir.join(&settings.apps_root);
            }
        }

        Ok(settings)
    }
}

fn default_apps_root() -> PathBuf {
    PathBuf::from("apps")
}

fn default_git_program() -> String {
    "git".to_owned()
}

fn default_restore_program() -> String {
    "nuget".to_owned()
}

fn default_restore_manifest() -> String {
    "packages.config".to_owned()
}

fn default_restore_args() -> Vec<String> {
    ["install", "{manifest}", "-o", "packages"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_compile_tool() -> String {
    "msbuild".to_owned()
}
