//! Strider CLI - inspect scenes and run the locomotion loop headlessly

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{classify, scenes, simulate, spawn};
use std::path::PathBuf;
use strider_player::StriderConfig;

#[derive(Parser)]
#[command(name = "strider")]
#[command(about = "Terrain-following character locomotion, headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.strider/config.toml then .strider/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every mesh of a scene as ground, obstacle or ignored
    Classify {
        /// Configured scene name or path to a scene file
        scene: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run spawn placement and unstick on a scene
    Spawn {
        /// Configured scene name or path to a scene file
        scene: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Walk the character through a scene with a key script
    Simulate {
        /// Configured scene name or path to a scene file
        scene: String,

        /// Comma-separated `keys:frames` segments, e.g. "w:30,wd:20,:10"
        #[arg(long)]
        script: String,

        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the configured scenes
    Scenes {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = StriderConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { scene, format } => classify::run(&config, &scene, &format),
        Commands::Spawn { scene, format } => spawn::run(&config, &scene, &format),
        Commands::Simulate {
            scene,
            script,
            dt,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config: &config,
            scene,
            script,
            dt,
            format,
        }),
        Commands::Scenes { format } => scenes::run(&config, &format),
    }
}
