//! Configuration for logveil
//!
//! Loaded from `.logveil.toml` (working directory) or
//! `~/.config/logveil/config.toml` (global).

pub mod preset;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::enhancers::EnhancerConfig;
use crate::error::PresetError;
pub use preset::Preset;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = ".logveil.toml";

/// Full logveil configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogveilConfig {
    /// Preset used when none is given on the command line
    pub default_preset: String,

    /// User presets; an id matching a shipped preset replaces it
    pub presets: Vec<Preset>,

    /// Per-enhancer settings, keyed by enhancer name
    pub enhancers: BTreeMap<String, EnhancerConfig>,
}

impl Default for LogveilConfig {
    fn default() -> Self {
        Self {
            default_preset: "default".to_string(),
            presets: Vec::new(),
            enhancers: BTreeMap::new(),
        }
    }
}

impl LogveilConfig {
    /// Load configuration from `dir`, falling back to global config
    pub fn load(dir: &Path) -> Result<Self> {
        let local = Self::local_config_path(dir);
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from_file(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), presets = config.presets.len(), "loaded config");

        Ok(config)
    }

    /// Get global config path (~/.config/logveil/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("logveil").join("config.toml"))
    }

    pub fn local_config_path(dir: &Path) -> PathBuf {
        dir.join(LOCAL_CONFIG_FILE)
    }

    /// Resolve a preset by id, user presets first
    pub fn preset(&self, id: &str) -> Result<Preset, PresetError> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .or_else(|| preset::builtin(id))
            .ok_or_else(|| PresetError::Unknown(id.to_string()))
    }

    /// Shipped presets (with user overrides applied) followed by user-only presets
    pub fn all_presets(&self) -> Vec<Preset> {
        let mut all: Vec<Preset> = preset::builtin_presets()
            .into_iter()
            .map(|builtin| {
                self.presets
                    .iter()
                    .find(|p| p.id == builtin.id)
                    .cloned()
                    .unwrap_or(builtin)
            })
            .collect();

        for user in &self.presets {
            if !all.iter().any(|p| p.id == user.id) {
                all.push(user.clone());
            }
        }

        all
    }
}
