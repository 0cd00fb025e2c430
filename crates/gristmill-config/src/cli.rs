//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use gristmill_scene::QualityTier;

use crate::Config;

/// Gristmill command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "gristmill", about = "Headless factory render-core demo")]
pub struct CliArgs {
    /// Quality tier (low, medium, high).
    #[arg(long)]
    pub quality: Option<QualityTier>,

    /// Simulated seconds per real second.
    #[arg(long)]
    pub acceleration: Option<f64>,

    /// Hour of day at startup.
    #[arg(long)]
    pub start_hour: Option<f64>,

    /// Frames to render before exiting.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(quality) = args.quality {
            self.render.quality = quality;
        }
        if let Some(acceleration) = args.acceleration {
            self.time.acceleration = acceleration;
        }
        if let Some(hour) = args.start_hour {
            self.time.start_hour = hour;
        }
        if let Some(frames) = args.frames {
            self.demo.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
