//! Configuration file support for makeplan.
//!
//! makeplan supports two configuration file locations:
//! - Global: `~/.makeplan/config.toml` - User-wide defaults
//! - Project: `.makeplan/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and CLI flags take
//! precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::shell::ColorChoice;

/// Default plan file name.
pub const PLAN_FILE: &str = "makeplan.toml";

/// Default rendered output file name.
pub const OUTPUT_FILE: &str = "Makefile";

/// makeplan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation settings
    pub generate: GenerateConfig,

    /// Terminal output settings
    pub shell: ShellConfig,
}

/// Generation-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Plan file to read (default: makeplan.toml)
    pub plan: Option<PathBuf>,

    /// Output file to write (default: the plan's `[output] path`, then Makefile)
    pub output: Option<PathBuf>,

    /// Always write the JSON plan dump instead of a Makefile
    #[serde(default)]
    pub json: bool,
}

/// Terminal output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Color mode (auto, always, never)
    pub color: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.plan.is_some() {
            self.generate.plan = other.generate.plan;
        }
        if other.generate.output.is_some() {
            self.generate.output = other.generate.output;
        }
        if other.generate.json {
            self.generate.json = true;
        }

        if other.shell.color.is_some() {
            self.shell.color = other.shell.color;
        }
    }

    /// Parse the color mode from config string.
    pub fn color(&self) -> Option<ColorChoice> {
        self.shell.color.as_ref().and_then(|s| s.parse().ok())
    }
}

/// Get the global makeplan config directory (~/.makeplan).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".makeplan"))
}

/// Get the global config path (~/.makeplan/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.makeplan/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".makeplan").join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.makeplan/config.toml)
/// 2. Global config (~/.makeplan/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}
