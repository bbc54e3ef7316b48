//! CLI command implementations

pub mod classify;
pub mod scenes;
pub mod simulate;
pub mod spawn;

use anyhow::{Context, Result};
use std::path::PathBuf;
use strider_player::StriderConfig;
use strider_scene::{load_scene, SceneGraph};

/// A scene picked on the command line
pub struct ResolvedScene {
    pub name: String,
    pub path: PathBuf,
    pub ground_y_offset: f32,
}

/// Look `arg` up among the configured scenes, or treat it as a file path
pub fn resolve_scene(config: &StriderConfig, arg: &str) -> ResolvedScene {
    let root = |asset: &str| match &config.asset_root {
        Some(root) => root.join(asset.trim_start_matches('/')),
        None => PathBuf::from(asset),
    };

    match config.scene_index(arg).and_then(|i| config.scenes.get(i)) {
        Some(descriptor) => ResolvedScene {
            name: descriptor.name.clone(),
            path: root(&descriptor.asset_path),
            ground_y_offset: descriptor.ground_y_offset,
        },
        None => ResolvedScene {
            name: arg.to_string(),
            path: PathBuf::from(arg),
            ground_y_offset: 0.0,
        },
    }
}

pub fn load(config: &StriderConfig, arg: &str) -> Result<(ResolvedScene, SceneGraph)> {
    let resolved = resolve_scene(config, arg);
    let graph = load_scene(&resolved.path)
        .with_context(|| format!("Failed to load scene '{}'", resolved.path.display()))?;
    Ok((resolved, graph))
}

/// Reject anything but "text" and "json"
pub fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_scene::SceneDescriptor;

    #[test]
    fn configured_names_resolve_against_asset_root() {
        let config = StriderConfig {
            scenes: vec![SceneDescriptor::new("Roof", "/scenes/roof.toml").with_ground_y_offset(0.2)],
            asset_root: Some(PathBuf::from("assets")),
            ..StriderConfig::default()
        };

        let r = resolve_scene(&config, "roof");
        assert_eq!(r.name, "Roof");
        assert_eq!(r.path, PathBuf::from("assets/scenes/roof.toml"));
        assert_eq!(r.ground_y_offset, 0.2);

        let p = resolve_scene(&config, "levels/yard.toml");
        assert_eq!(p.path, PathBuf::from("levels/yard.toml"));
        assert_eq!(p.ground_y_offset, 0.0);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(check_format("json").is_ok());
        assert!(check_format("yaml").is_err());
    }
}
