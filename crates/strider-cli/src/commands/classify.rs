//! Classify command

use super::{check_format, load};
use anyhow::Result;
use serde::Serialize;
use strider_locomotion::{classify_with, Classification};
use strider_player::StriderConfig;

#[derive(Serialize)]
struct MeshRow {
    name: String,
    classification: Classification,
    min: [f32; 3],
    max: [f32; 3],
}

pub fn run(config: &StriderConfig, scene: &str, format: &str) -> Result<()> {
    check_format(format)?;
    let (resolved, graph) = load(config, scene)?;
    let thresholds = &config.locomotion.classifier;

    let rows: Vec<MeshRow> = graph
        .iter()
        .filter_map(|(_, node)| node.as_mesh())
        .filter(|mesh| mesh.visible)
        .map(|mesh| {
            let bounds = mesh.world_bounds();
            MeshRow {
                name: mesh.name.clone(),
                classification: classify_with(&mesh.name, &bounds, thresholds),
                min: bounds.min.to_array(),
                max: bounds.max.to_array(),
            }
        })
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let count = |c: Classification| rows.iter().filter(|r| r.classification == c).count();
    println!(
        "Scene '{}': {} ground, {} obstacle, {} ignored",
        resolved.name,
        count(Classification::Ground),
        count(Classification::Obstacle),
        count(Classification::Ignored)
    );
    for row in &rows {
        println!(
            "  {:<24} {:<9} [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
            row.name,
            format!("{:?}", row.classification).to_lowercase(),
            row.min[0],
            row.min[1],
            row.min[2],
            row.max[0],
            row.max[1],
            row.max[2]
        );
    }
    Ok(())
}
