//! Kinema CLI - headless editing and simulation of Kinema scenes

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{export, new, object, simulate, template};
use kinema_runtime::EditorConfig;

#[derive(Parser)]
#[command(name = "kinema")]
#[command(about = "Scene editor core: objects, keyframe tracks and behaviors", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty scene document
    New {
        /// Output document path
        path: String,

        /// Scene name
        #[arg(long, default_value = "My Game")]
        name: String,
    },

    /// Object operations
    #[command(subcommand)]
    Object(object::ObjectCommands),

    /// Create a scene document from a template seed
    Template {
        /// Template seed JSON file
        seed: String,

        /// Output document path
        #[arg(short, long)]
        output: String,

        /// Scene name (defaults to the seed's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Run a scene headlessly and print the resulting state as JSON
    Simulate {
        /// Path to scene document
        scene: String,

        /// Number of ticks to run
        #[arg(long, default_value = "60")]
        ticks: u32,

        /// Playback speed multiplier
        #[arg(long)]
        speed: Option<f64>,

        /// JSON file with an array of editor commands applied before running
        #[arg(long)]
        script: Option<String>,

        /// Do not start timeline playback
        #[arg(long)]
        no_playback: bool,

        /// Do not start the behavior simulation
        #[arg(long)]
        no_behaviors: bool,

        /// Write the final state back to this document path
        #[arg(long)]
        save: Option<String>,
    },

    /// Export a scene as a self-contained HTML page
    Export {
        /// Path to scene document
        scene: String,

        /// Output HTML path
        #[arg(short, long, default_value = "game.html")]
        output: String,
    },

    /// Print the resolved configuration
    Config,
}

fn parse_vec3(s: &str) -> Result<kinema_core::Vec3, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f64 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f64 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f64 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok(kinema_core::Vec3::new(x, y, z))
}

fn init_logging(config: &EditorConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EditorConfig::load().context("Failed to load configuration")?;
    init_logging(&config);

    match cli.command {
        Commands::New { path, name } => new::run(&path, &name),
        Commands::Object(cmd) => object::run(cmd, &config),
        Commands::Template { seed, output, name } => {
            template::run(&seed, &output, name.as_deref())
        }
        Commands::Simulate {
            scene,
            ticks,
            speed,
            script,
            no_playback,
            no_behaviors,
            save,
        } => simulate::run(
            simulate::SimulateArgs {
                scene,
                ticks,
                speed,
                script,
                playback: !no_playback,
                behaviors: !no_behaviors,
                save,
            },
            &config,
        ),
        Commands::Export { scene, output } => export::run(&scene, &output, &config),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
