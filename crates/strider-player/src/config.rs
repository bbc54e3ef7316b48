//! Layered configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `STRIDER_SPEED`, `STRIDER_ROTATION_SPEED`
//! 2. Project-local: `.strider/config.toml`
//! 3. Global: `~/.strider/config.toml`
//!
//! Tables are merged key by key; arrays such as `[[scenes]]` replace the
//! lower layer's list.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strider_animation::ClipNames;
use strider_core::{Result, StriderError};
use strider_locomotion::LocomotionConfig;
use strider_scene::SceneDescriptor;

/// Top-level `strider.toml` structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StriderConfig {
    #[serde(default)]
    pub locomotion: LocomotionConfig,
    /// Ordered scene list cycled by next/previous requests
    #[serde(default = "default_scenes")]
    pub scenes: Vec<SceneDescriptor>,
    /// Character model such as "/models/xiaowalk.gltf"; placeholder clips
    /// are used without one
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub clips: ClipNames,
    /// Directory asset paths are resolved against
    #[serde(default)]
    pub asset_root: Option<PathBuf>,
}

fn default_scenes() -> Vec<SceneDescriptor> {
    vec![SceneDescriptor::new("Comisaria", "/models/comisaria/scene.gltf")]
}

impl Default for StriderConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            scenes: default_scenes(),
            character: None,
            clips: ClipNames::default(),
            asset_root: None,
        }
    }
}

impl StriderConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut merged = toml::Table::new();

        // Layer 1: Global config (~/.strider/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_tables(&mut merged, Self::read_table(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.strider/config.toml)
        let local_path = PathBuf::from(".strider/config.toml");
        if local_path.exists() {
            merge_tables(&mut merged, Self::read_table(&local_path)?);
        }

        let mut config = Self::from_table(merged)?;

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific file only, then apply env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_table(Self::read_table(path)?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `load_from_file` when a path is given, `load` otherwise
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `STRIDER_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("STRIDER_SPEED") {
            self.locomotion.speed = parse_env_float("STRIDER_SPEED", &value)?;
        }
        if let Some(value) = lookup("STRIDER_ROTATION_SPEED") {
            self.locomotion.rotation_speed = parse_env_float("STRIDER_ROTATION_SPEED", &value)?;
        }
        Ok(())
    }

    /// Index of the scene called `name` (case-insensitive)
    pub fn scene_index(&self, name: &str) -> Option<usize> {
        self.scenes
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".strider").join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<toml::Table>().map_err(|e| {
            StriderError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| StriderError::ConfigError(e.to_string()))
    }
}

fn parse_env_float(key: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse()
        .map_err(|_| StriderError::ConfigError(format!("{} must be a number, got '{}'", key, value)))
}

/// Merge `overlay` into `base`: nested tables merge, everything else replaces
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
