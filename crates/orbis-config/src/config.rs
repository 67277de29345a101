//! Configuration structs with sensible defaults and RON persistence.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_DIR: &str = "orbis";

/// Allowed cells per face edge for the six-face base mesh.
pub const FACE_RESOLUTION_RANGE: RangeInclusive<u32> = 2..=15;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet shape settings.
    pub planet: PlanetConfig,
    /// Level-of-detail settings.
    pub lod: LodConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which base mesh the planet is built from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum BaseMeshKind {
    /// Watertight cube refined by subdivision.
    #[default]
    CubeSeed,
    /// Six independent face grids.
    SixFaces,
}

/// Planet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius in world units.
    pub radius: f32,
    /// Base mesh construction.
    pub base_mesh: BaseMeshKind,
    /// Cells per face edge, used by [`BaseMeshKind::SixFaces`].
    pub face_resolution: u32,
    /// Use the area-corrected cube-to-sphere projection instead of plain
    /// normalization.
    pub use_even_vert_distribution: bool,
}

/// Level-of-detail configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Subdivision depth when the camera is far away.
    pub min_resolution: u32,
    /// Subdivision depth when the camera is at the planet center.
    pub max_resolution: u32,
    /// Camera distance at which depth bottoms out at `min_resolution`.
    pub max_subdivision_distance: f32,
    /// Seconds between camera-driven mesh rebuilds.
    pub update_interval_secs: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            base_mesh: BaseMeshKind::CubeSeed,
            face_resolution: 5,
            use_even_vert_distribution: false,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            min_resolution: 3,
            max_resolution: 6,
            max_subdivision_distance: 100.0,
            update_interval_secs: 0.5,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl LodConfig {
    /// The rebuild interval as a [`Duration`]. Values that cannot be
    /// represented collapse to zero.
    pub fn update_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.update_interval_secs).unwrap_or(Duration::ZERO)
    }
}

// --- Validation ---

impl Config {
    /// Check ranges that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let planet = &self.planet;
        let lod = &self.lod;

        if !(planet.radius > 0.0 && planet.radius.is_finite()) {
            return Err(invalid(
                "planet.radius",
                format!("must be positive and finite, got {}", planet.radius),
            ));
        }
        if !FACE_RESOLUTION_RANGE.contains(&planet.face_resolution) {
            return Err(invalid(
                "planet.face_resolution",
                format!(
                    "must be in {}..={}, got {}",
                    FACE_RESOLUTION_RANGE.start(),
                    FACE_RESOLUTION_RANGE.end(),
                    planet.face_resolution
                ),
            ));
        }
        if lod.min_resolution > lod.max_resolution {
            return Err(invalid(
                "lod.min_resolution",
                format!(
                    "{} exceeds lod.max_resolution {}",
                    lod.min_resolution, lod.max_resolution
                ),
            ));
        }
        if !(lod.max_subdivision_distance > 0.0 && lod.max_subdivision_distance.is_finite()) {
            return Err(invalid(
                "lod.max_subdivision_distance",
                format!(
                    "must be positive and finite, got {}",
                    lod.max_subdivision_distance
                ),
            ));
        }
        if !(lod.update_interval_secs >= 0.0 && lod.update_interval_secs.is_finite()) {
            return Err(invalid(
                "lod.update_interval_secs",
                format!(
                    "must be non-negative and finite, got {}",
                    lod.update_interval_secs
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

// --- Load / Save / Reload ---

impl Config {
    /// The platform config directory for Orbis, e.g. `~/.config/orbis`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
