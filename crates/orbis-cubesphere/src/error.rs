//! Mesh construction error types.

/// Errors raised while building or validating a [`Mesh`](crate::Mesh).
///
/// All of these are configuration-time failures; a rebuild that has been
/// handed valid parameters never produces one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A resolution, radius or other construction parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the public API.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position of the offending triangle in the triangle list.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The UV buffer is populated but not parallel to the position buffer.
    #[error("mesh has {uvs} uvs for {positions} positions")]
    UvLengthMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of UVs.
        uvs: usize,
    },
}

impl MeshError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
