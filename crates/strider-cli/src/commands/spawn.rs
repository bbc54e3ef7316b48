//! Spawn command

use super::{check_format, load};
use anyhow::{Context, Result};
use serde_json::json;
use strider_locomotion::{LocomotionState, Placement};
use strider_player::StriderConfig;

pub fn run(config: &StriderConfig, scene: &str, format: &str) -> Result<()> {
    check_format(format)?;
    let (resolved, graph) = load(config, scene)?;

    let mut state = LocomotionState::new(config.locomotion.clone());
    let world = state.load_world(graph, resolved.ground_y_offset);
    let ground = world.classified.ground.len();
    let obstacles = world.classified.obstacles.len();

    let result = state
        .spawn()
        .with_context(|| format!("No spawn point in scene '{}'", resolved.name))?;

    let placement = match result.placement {
        Placement::Grid(_) => "grid",
        Placement::Fallback(_) => "fallback",
    };
    let position = result.position;

    if format == "json" {
        let out = json!({
            "scene": resolved.name,
            "ground_meshes": ground,
            "obstacle_meshes": obstacles,
            "placement": placement,
            "placed_at": result.placement.position().to_array(),
            "unstuck": result.unstuck,
            "position": position.to_array(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Scene '{}' ({} ground, {} obstacle meshes)",
        resolved.name, ground, obstacles
    );
    println!(
        "  spawn: ({:.3}, {:.3}, {:.3}) via {}{}",
        position.x,
        position.y,
        position.z,
        placement,
        if result.unstuck { ", unstuck" } else { "" }
    );
    Ok(())
}
