//! Configuration primitives for the workspace.
//!
//! Stored in a machine-readable TOML file located at
//! `<workspace root>/config/config.toml`. The root resolves to
//! `$JWORKSPACE_HOME` when set, otherwise to the OS data directory:
//!   %APPDATA%/JWorkspace on Windows
//!   $XDG_DATA_HOME/JWorkspace on Linux
//!   ~/Library/Application Support/JWorkspace on macOS
//!
//! The config tracks the last user who logged in and where profiles live.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::profiles::{DEFAULT_PARAMETERS_HEADER, USERS_SUBDIR};

/// Environment variable overriding the workspace root.
pub const HOME_ENV: &str = "JWORKSPACE_HOME";

/// Standard relative path to the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Name of the user who was logged in most recently.
    pub last_user: Option<String>,
    #[serde(default)]
    pub profiles: ProfileSettings,
}

/// Where and how profiles are stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Directory (relative to the workspace root) holding one folder per user.
    #[serde(default = "default_users_dir")]
    pub users_dir: String,
    /// Comment written at the top of each `var.cfg`.
    #[serde(default = "default_parameters_header")]
    pub parameters_header: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            users_dir: default_users_dir(),
            parameters_header: default_parameters_header(),
        }
    }
}

fn default_users_dir() -> String {
    USERS_SUBDIR.to_string()
}

fn default_parameters_header() -> String {
    DEFAULT_PARAMETERS_HEADER.to_string()
}

/// Returns the root directory where the workspace stores data.
///
/// Order of precedence:
/// 1. `JWORKSPACE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("JWorkspace"))
}

/// Convenience struct exposing important workspace paths.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub users_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>, settings: &ProfileSettings) -> Self {
        let root = root.into();
        Self {
            config_dir: root.join("config"),
            users_dir: root.join(&settings.users_dir),
            root,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }
}

/// Loads the configuration stored under `root`, or defaults when absent.
pub fn load_or_default(root: &Path) -> Result<AppConfig> {
    let path = root.join("config").join(CONFIG_FILE_NAME);
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(paths: &WorkspacePaths, config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&paths.config_dir)
        .with_context(|| format!("Failed to create config directory {:?}", paths.config_dir))?;
    let path = paths.config_file();
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data).with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}

/// Resolves the workspace root, loads its config and ensures the config and
/// users directories exist.
pub fn ensure_workspace_structure() -> Result<(AppConfig, WorkspacePaths)> {
    let root = workspace_root()?;
    ensure_workspace_structure_at(root)
}

pub fn ensure_workspace_structure_at(root: impl Into<PathBuf>) -> Result<(AppConfig, WorkspacePaths)> {
    let root = root.into();
    let config = load_or_default(&root)?;
    let paths = WorkspacePaths::new(root, &config.profiles);
    fs::create_dir_all(&paths.config_dir)?;
    fs::create_dir_all(&paths.users_dir)
        .with_context(|| format!("Failed to create users directory {:?}", paths.users_dir))?;
    Ok((config, paths))
}
