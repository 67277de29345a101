//! The six faces of the cube that seeds a planet, and their basis vectors.

use glam::Vec3;

/// One of the six cube faces.
///
/// Each variant names the axis its outward normal points along. The basis
/// satisfies `tangent × bitangent = normal`, so a grid laid out with `u`
/// along the tangent and `v` along the bitangent winds outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face
    PosX = 0,
    /// −X face
    NegX = 1,
    /// +Y face
    PosY = 2,
    /// −Y face
    NegY = 3,
    /// +Z face
    PosZ = 4,
    /// −Z face
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in canonical order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Outward-pointing unit normal.
    #[must_use]
    pub fn normal(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::X,
            CubeFace::NegX => Vec3::NEG_X,
            CubeFace::PosY => Vec3::Y,
            CubeFace::NegY => Vec3::NEG_Y,
            CubeFace::PosZ => Vec3::Z,
            CubeFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Direction of increasing grid column.
    #[must_use]
    pub fn tangent(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::NEG_Z,
            CubeFace::NegX => Vec3::Z,
            CubeFace::PosY | CubeFace::NegY | CubeFace::PosZ => Vec3::X,
            CubeFace::NegZ => Vec3::NEG_X,
        }
    }

    /// Direction of increasing grid row.
    #[must_use]
    pub fn bitangent(self) -> Vec3 {
        match self {
            CubeFace::PosY => Vec3::NEG_Z,
            CubeFace::NegY => Vec3::Z,
            CubeFace::PosX | CubeFace::NegX | CubeFace::PosZ | CubeFace::NegZ => Vec3::Y,
        }
    }

    /// The face whose normal is most aligned with `direction`.
    ///
    /// Ties resolve in favour of X, then Y. A zero vector maps to `PosY`.
    #[must_use]
    pub fn from_direction(direction: Vec3) -> CubeFace {
        let abs = direction.abs();
        if abs == Vec3::ZERO {
            return CubeFace::PosY;
        }
        if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x >= 0.0 {
                CubeFace::PosX
            } else {
                CubeFace::NegX
            }
        } else if abs.y >= abs.z {
            if direction.y >= 0.0 {
                CubeFace::PosY
            } else {
                CubeFace::NegY
            }
        } else if direction.z >= 0.0 {
            CubeFace::PosZ
        } else {
            CubeFace::NegZ
        }
    }
}
