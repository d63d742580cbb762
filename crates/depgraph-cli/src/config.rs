//! Project and user configuration for `dg`.
//!
//! Two optional TOML files are read on startup:
//!
//! - `./depgraph.toml` in the working directory (project settings);
//! - `<config_dir>/depgraph/config.toml` (user settings, located via `dirs`).
//!
//! A missing file yields defaults. A file that exists but does not parse is
//! a hard error naming the path.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// File name of the project config, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = "depgraph.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output mode override for this project.
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Default root for `dg depth`.
    #[serde(default)]
    pub root: Option<String>,
    /// Default for `-v` on `dg analyze` and `dg stats`.
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
}

impl EffectiveConfig {
    /// Configured output mode name; the project file wins over the user file.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.project
            .output
            .as_deref()
            .or(self.user.output.as_deref())
    }
}

fn load_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<T>(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    load_toml(&project_root.join(PROJECT_CONFIG_FILE))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_toml(&config_dir.join("depgraph/config.toml"))
}

pub fn resolve_config(project_root: &Path) -> Result<EffectiveConfig> {
    Ok(EffectiveConfig {
        project: load_project_config(project_root)?,
        user: load_user_config()?,
    })
}
