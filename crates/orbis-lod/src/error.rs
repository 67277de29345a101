//! LOD configuration error types.

use orbis_cubesphere::MeshError;

/// Errors raised while configuring the LOD pipeline.
///
/// Settings are validated at construction, so a rebuild only fails if mesh
/// projection rejects its input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LodError {
    /// A resolution bound, radius, distance or interval is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in [`PlanetLodSettings`](crate::PlanetLodSettings).
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// Building or projecting the planet mesh failed.
    #[error("mesh: {0}")]
    Mesh(#[from] MeshError),
}

impl LodError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
