//! Scenes command

use super::check_format;
use anyhow::Result;
use strider_player::StriderConfig;

pub fn run(config: &StriderConfig, format: &str) -> Result<()> {
    check_format(format)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&config.scenes)?);
        return Ok(());
    }

    if config.scenes.is_empty() {
        println!("No scenes configured");
        return Ok(());
    }
    for (index, scene) in config.scenes.iter().enumerate() {
        println!(
            "{:>2}  {:<20} {}  (ground offset {:+.2})",
            index, scene.name, scene.asset_path, scene.ground_y_offset
        );
    }
    Ok(())
}
