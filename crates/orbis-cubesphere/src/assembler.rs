//! Base planet meshes: six independent face grids, or a single cube seed.

use glam::Vec3;
use tracing::debug;

use crate::{CubeFace, Mesh, MeshError, ProjectionMethod, build_face_grid, project_mesh};

/// How the base planet mesh is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BaseMeshMode {
    /// One watertight 8-vertex, 12-triangle cube refined by subdivision.
    #[default]
    CubeSeed,
    /// Six independent face grids of the given resolution. Edge vertices are
    /// duplicated between faces, so the result has seams.
    SixFaces {
        /// Cells along each face edge.
        resolution: u32,
    },
}

/// Corners of the `[-1, 1]` cube.
const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Two outward-wound triangles per cube face.
#[rustfmt::skip]
const CUBE_TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1], [0, 3, 2], // -Z
    [4, 5, 6], [4, 6, 7], // +Z
    [0, 1, 5], [0, 5, 4], // -Y
    [2, 3, 7], [2, 7, 6], // +Y
    [0, 4, 7], [0, 7, 3], // -X
    [1, 2, 6], [1, 6, 5], // +X
];

/// The unit cube seed: 8 corners of `[-1, 1]^3` and 12 outward triangles.
pub fn cube_seed() -> Mesh {
    let mut mesh = Mesh::with_capacity(CUBE_CORNERS.len(), CUBE_TRIANGLES.len(), false);
    for corner in CUBE_CORNERS {
        mesh.push_vertex(corner);
    }
    for triangle in CUBE_TRIANGLES {
        mesh.push_triangle(triangle);
    }
    mesh
}

/// Six face grids on the `[-1, 1]` cube surface, concatenated unprojected.
///
/// Face `i` of [`CubeFace::ALL`] owns vertices
/// `i * (resolution+1)^2 .. (i+1) * (resolution+1)^2`. Grid points are scaled
/// from the `[-0.5, 0.5]` cube to `[-1, 1]` so either projection method
/// receives true cube-surface points.
pub fn six_face_cube(resolution: u32) -> Result<Mesh, MeshError> {
    let mut cube = Mesh::new();
    for face in CubeFace::ALL {
        let mut grid = build_face_grid(resolution, face, true)?;
        for p in grid.positions_mut() {
            *p *= 2.0;
        }
        cube.append(&grid);
    }
    Ok(cube)
}

/// Six projected face grids concatenated into one mesh of the given radius.
pub fn assemble_six_faces(
    resolution: u32,
    method: ProjectionMethod,
    radius: f32,
) -> Result<Mesh, MeshError> {
    let mut planet = six_face_cube(resolution)?;
    project_mesh(&mut planet, method, radius)?;
    debug!(
        resolution,
        ?method,
        vertices = planet.vertex_count(),
        triangles = planet.triangle_count(),
        "assembled six-face planet"
    );
    Ok(planet)
}
