//! Orbis demo: flies a scripted camera toward a cube-sphere planet and logs
//! how the adaptive mesh responds.

mod flight;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use glam::Vec3;
use orbis_config::{BaseMeshKind, CliArgs, Config};
use orbis_cubesphere::{BaseMeshMode, ProjectionMethod};
use orbis_lod::{PlanetLod, PlanetLodSettings, UpdateOutcome};
use tracing::{debug, error, info, warn};

use crate::flight::FlightPath;

/// Map the persisted configuration onto LOD settings.
fn planet_settings(config: &Config) -> PlanetLodSettings {
    let base_mesh = match config.planet.base_mesh {
        BaseMeshKind::CubeSeed => BaseMeshMode::CubeSeed,
        BaseMeshKind::SixFaces => BaseMeshMode::SixFaces {
            resolution: config.planet.face_resolution,
        },
    };
    PlanetLodSettings {
        min_resolution: config.lod.min_resolution,
        max_resolution: config.lod.max_resolution,
        radius: config.planet.radius,
        center: Vec3::ZERO,
        max_subdivision_distance: config.lod.max_subdivision_distance,
        update_interval: config.lod.update_interval(),
        projection: ProjectionMethod::from_even_distribution(
            config.planet.use_even_vert_distribution,
        ),
        base_mesh,
    }
}

fn fly(planet: &mut PlanetLod, args: &CliArgs) {
    let settings = planet.settings();
    let path = FlightPath::new(
        settings.center,
        settings.radius,
        args.start_distance,
        args.ticks,
    );
    let step = FlightPath::tick_step(settings.update_interval);
    let start = Instant::now();

    let mut rebuilds = 0u32;
    for tick in 0..args.ticks {
        let now = start + step * tick;
        let camera = path.pose_at(tick);
        match planet.update(now, Some(&camera)) {
            Ok(UpdateOutcome::Rebuilt { depth }) => {
                rebuilds += 1;
                info!(
                    tick,
                    distance = path.distance_at(tick),
                    depth,
                    vertices = planet.mesh().vertex_count(),
                    triangles = planet.mesh().triangle_count(),
                    "planet rebuilt"
                );
            }
            Ok(UpdateOutcome::Throttled) => {
                debug!(tick, "rebuild throttled");
            }
            Err(e) => {
                error!(tick, "rebuild failed: {e}");
                return;
            }
        }
    }

    let buffers = planet.buffers();
    let inward = planet.mesh().count_inward_triangles();
    if inward > 0 {
        warn!(inward, "mesh has inward-facing triangles");
    }
    if let Some(bounds) = planet.mesh().bounds() {
        info!(
            min = ?bounds.min,
            max = ?bounds.max,
            "final mesh bounds"
        );
    }
    info!(
        rebuilds,
        ticks = args.ticks,
        depth = planet.current_depth(),
        positions = buffers.positions.len(),
        indices = buffers.indices.len(),
        normals = buffers.normals.len(),
        has_uvs = buffers.uvs.is_some(),
        "flight complete"
    );
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from(".orbis"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        return ExitCode::from(2);
    }

    let log_dir = config_dir.join("logs");
    orbis_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "configuration loaded");

    let mut planet = match PlanetLod::new(planet_settings(&config)) {
        Ok(planet) => planet,
        Err(e) => {
            error!("failed to build planet: {e}");
            return ExitCode::FAILURE;
        }
    };

    fly(&mut planet, &args);

    match config.reload(&config_dir) {
        Ok(Some(_)) => info!("config file differs from the active settings"),
        Ok(None) => {}
        Err(e) => warn!("could not re-read config: {e}"),
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_maps_to_default_settings() {
        let settings = planet_settings(&Config::default());
        assert_eq!(settings, PlanetLodSettings::default());
    }

    #[test]
    fn test_six_faces_and_even_distribution_map_through() {
        let mut config = Config::default();
        config.planet.base_mesh = BaseMeshKind::SixFaces;
        config.planet.face_resolution = 7;
        config.planet.use_even_vert_distribution = true;
        let settings = planet_settings(&config);
        assert_eq!(settings.base_mesh, BaseMeshMode::SixFaces { resolution: 7 });
        assert_eq!(settings.projection, ProjectionMethod::AreaCorrected);
    }

    #[test]
    fn test_short_flight_rebuilds() {
        let mut config = Config::default();
        config.lod.min_resolution = 1;
        config.lod.max_resolution = 3;
        let mut planet = PlanetLod::new(planet_settings(&config)).expect("valid settings");
        let args = CliArgs::parse_from(["orbis", "--ticks", "6", "--start-distance", "120"]);
        fly(&mut planet, &args);
        assert!(planet.current_depth() >= 1);
        assert_eq!(planet.mesh().count_inward_triangles(), 0);
    }
}
