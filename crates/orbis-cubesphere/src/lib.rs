//! Cube-sphere geometry: face grids, cube seeds, cube-to-sphere projection and
//! the triangle mesh container shared by every stage of the planet pipeline.

mod assembler;
mod bounds;
mod cube_face;
mod error;
mod grid;
mod mesh;
mod projection;

pub use assembler::{BaseMeshMode, assemble_six_faces, cube_seed, six_face_cube};
pub use bounds::Aabb;
pub use cube_face::CubeFace;
pub use error::MeshError;
pub use grid::{build_face_grid, build_grid};
pub use mesh::{Mesh, MeshBuffers, triangle_winds_outward};
pub use projection::{ProjectionMethod, project_mesh, safe_normalize};
