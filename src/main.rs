//! mirror-trace: render sphere scenes with mirror reflections to PNG.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use mirror_trace::config::{clamp_bounce_limit, load_scene};
use mirror_trace::presets;
use mirror_trace::render::{render, RenderSettings};
use mirror_trace::scene::Scene;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "mirror-trace")]
#[command(version)]
#[command(about = "Ray trace spheres with mirror reflections and an environment map")]
struct Cli {
    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene file or a built-in preset to a PNG
    Render {
        /// Scene description (JSON)
        #[arg(short, long, conflicts_with = "preset")]
        scene: Option<PathBuf>,

        /// Built-in scene: mirrors, single, random
        #[arg(short, long, default_value = "mirrors")]
        preset: String,

        /// Seed for the random preset
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output image path
        #[arg(short, long, default_value = "image.png")]
        output: PathBuf,

        #[arg(long, default_value_t = 800)]
        width: u32,

        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Override the scene's bounce limit
        #[arg(short, long)]
        bounces: Option<u32>,

        /// Write background pixels with zero alpha
        #[arg(long)]
        transparent: bool,
    },

    /// Validate a scene file without rendering it
    Check {
        scene: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level_filter = match cli.log_level {
        Some(level) => level.to_string(),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .init();

    match cli.command {
        Commands::Render { scene, preset, seed, output, width, height, bounces, transparent } => {
            if width == 0 || height == 0 {
                anyhow::bail!("width and height must be positive");
            }

            let scene = open_scene(scene, &preset, seed)?;
            let bounce_limit = clamp_bounce_limit(bounces.unwrap_or(scene.bounce_limit));

            tracing::info!(
                scene = %scene.name,
                width,
                height,
                bounce_limit,
                threads = rayon::current_num_threads(),
                "rendering"
            );

            let settings = RenderSettings { width, height, bounce_limit, transparent_background: transparent };

            let started = Instant::now();
            let frame = render(&scene, &settings);
            frame.image.save(&output).with_context(|| format!("failed to write {}", output.display()))?;

            println!(
                "Rendered scene '{}' ({}x{}, {} bounces) in {} ms: {}",
                scene.name,
                width,
                height,
                bounce_limit,
                started.elapsed().as_millis(),
                output.display()
            );
        }
        Commands::Check { scene } => {
            let loaded = load_scene(&scene).with_context(|| format!("invalid scene {}", scene.display()))?;
            println!(
                "Scene '{}' is valid: {} spheres, {} lights, bounce limit {}",
                loaded.name,
                loaded.world.spheres.len(),
                loaded.world.lights.len(),
                loaded.bounce_limit
            );
        }
    }

    Ok(())
}

fn open_scene(path: Option<PathBuf>, preset: &str, seed: u64) -> anyhow::Result<Scene> {
    match path {
        Some(path) => load_scene(&path).with_context(|| format!("failed to load scene {}", path.display())),
        None => presets::build(preset, seed)
            .with_context(|| format!("available presets: {}", presets::NAMES.join(", "))),
    }
}
