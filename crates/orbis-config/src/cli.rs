//! Command-line argument parsing for Orbis.

use std::path::PathBuf;

use clap::Parser;

use crate::{BaseMeshKind, Config};

/// Orbis command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orbis", about = "Adaptive cube-sphere planet LOD demo")]
pub struct CliArgs {
    /// Planet radius.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Subdivision depth when the camera is far away.
    #[arg(long)]
    pub min_resolution: Option<u32>,

    /// Subdivision depth when the camera is at the planet center.
    #[arg(long)]
    pub max_resolution: Option<u32>,

    /// Camera distance at which depth reaches the minimum.
    #[arg(long)]
    pub max_subdivision_distance: Option<f32>,

    /// Seconds between mesh rebuilds.
    #[arg(long)]
    pub update_interval: Option<f32>,

    /// Use the area-corrected cube-to-sphere projection.
    #[arg(long)]
    pub even_distribution: Option<bool>,

    /// Base mesh construction.
    #[arg(long, value_enum)]
    pub base_mesh: Option<BaseMeshKind>,

    /// Cells per face edge for the six-face base mesh.
    #[arg(long)]
    pub face_resolution: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of simulated camera steps.
    #[arg(long, default_value_t = 40)]
    pub ticks: u32,

    /// Camera distance from the planet center at the first step.
    #[arg(long, default_value_t = 250.0)]
    pub start_distance: f32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.planet.radius = radius;
        }
        if let Some(kind) = args.base_mesh {
            self.planet.base_mesh = kind;
        }
        if let Some(resolution) = args.face_resolution {
            self.planet.face_resolution = resolution;
        }
        if let Some(even) = args.even_distribution {
            self.planet.use_even_vert_distribution = even;
        }
        if let Some(min) = args.min_resolution {
            self.lod.min_resolution = min;
        }
        if let Some(max) = args.max_resolution {
            self.lod.max_resolution = max;
        }
        if let Some(distance) = args.max_subdivision_distance {
            self.lod.max_subdivision_distance = distance;
        }
        if let Some(interval) = args.update_interval {
            self.lod.update_interval_secs = interval;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
