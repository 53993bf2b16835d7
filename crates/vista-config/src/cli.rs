//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Vista command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "vista", about = "Procedural terrain and sky renderer")]
pub struct CliArgs {
    /// Canvas width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Terrain seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Render this many frames headless and exit.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Directory for headless frame output.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(seed) = args.seed {
            self.world.terrain_seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(frames) = args.frames {
            self.capture.frames = frames;
        }
        if let Some(ref dir) = args.output {
            self.capture.output_dir = dir.clone();
        }
    }
}
