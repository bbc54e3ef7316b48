//! Error types for Strider

use thiserror::Error;

/// The main error type for Strider operations
#[derive(Debug, Error)]
pub enum StriderError {
    #[error("Asset load failed for '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("Spawn unresolved in scene '{0}'")]
    SpawnUnresolved(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Scene transition rejected: {0}")]
    TransitionRejected(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlParseError(String),

    #[error("Animation error: {0}")]
    AnimationError(String),
}

impl StriderError {
    /// Shorthand for an asset load failure
    pub fn asset_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        StriderError::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for Strider operations
pub type Result<T> = std::result::Result<T, StriderError>;

impl From<toml::de::Error> for StriderError {
    fn from(err: toml::de::Error) -> Self {
        StriderError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_load_message_names_path() {
        let err = StriderError::asset_load("/models/scene.gltf", "not found");
        assert_eq!(
            err.to_string(),
            "Asset load failed for '/models/scene.gltf': not found"
        );
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("a = [");
        let err: StriderError = parsed.unwrap_err().into();
        assert!(matches!(err, StriderError::TomlParseError(_)));
    }
}
