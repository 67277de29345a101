//! Configuration for the Orbis planet renderer.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and support hot-reload detection. Unknown fields are
//! ignored and missing fields take their defaults, so config files survive
//! version changes in both directions.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{BaseMeshKind, Config, DebugConfig, LodConfig, PlanetConfig};
pub use error::ConfigError;
