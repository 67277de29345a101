//! Flat grid meshes placed on a cube face.

use glam::{Vec2, Vec3};

use crate::{CubeFace, Mesh, MeshError};

/// Largest resolution whose vertex count still fits a `u32` index.
const MAX_RESOLUTION: u32 = 65_534;

/// Build a grid on one cube face of the `[-0.5, 0.5]` cube.
///
/// See [`build_grid`] for the layout.
pub fn build_face_grid(
    resolution: u32,
    face: CubeFace,
    with_uvs: bool,
) -> Result<Mesh, MeshError> {
    build_grid(
        resolution,
        face.normal(),
        face.tangent(),
        face.bitangent(),
        with_uvs,
    )
}

/// Build a `resolution × resolution` cell grid centred at `normal * 0.5`.
///
/// Vertices are row-major: row `r` runs along `bitangent`, column `c` along
/// `tangent`, and vertex `r * (resolution + 1) + c` sits at
/// `normal/2 + tangent * (c/res - 0.5) + bitangent * (r/res - 0.5)`.
/// Each cell becomes two triangles wound so their normal is
/// `tangent × bitangent`, which equals `normal` for a [`CubeFace`] basis.
/// UVs are `(c/res, r/res)`.
pub fn build_grid(
    resolution: u32,
    normal: Vec3,
    tangent: Vec3,
    bitangent: Vec3,
    with_uvs: bool,
) -> Result<Mesh, MeshError> {
    if resolution == 0 {
        return Err(MeshError::invalid("resolution", "must be at least 1"));
    }
    if resolution > MAX_RESOLUTION {
        return Err(MeshError::invalid(
            "resolution",
            format!("must not exceed {MAX_RESOLUTION}, got {resolution}"),
        ));
    }

    let side = resolution + 1;
    let vertex_count = (side * side) as usize;
    let triangle_count = resolution as usize * resolution as usize * 2;
    let mut mesh = Mesh::with_capacity(vertex_count, triangle_count, with_uvs);

    let step = 1.0 / resolution as f32;
    let origin = normal * 0.5;
    for row in 0..side {
        let v = row as f32 * step;
        for col in 0..side {
            let u = col as f32 * step;
            let position = origin + tangent * (u - 0.5) + bitangent * (v - 0.5);
            mesh.push_vertex_with_uv(position, Vec2::new(u, v));
        }
    }

    for row in 0..resolution {
        for col in 0..resolution {
            let i00 = row * side + col;
            let i10 = i00 + 1;
            let i01 = i00 + side;
            let i11 = i01 + 1;

            mesh.push_triangle([i00, i10, i01]);
            mesh.push_triangle([i10, i11, i01]);
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_index_bounds() {
        for resolution in 1..=8 {
            for face in CubeFace::ALL {
                let mesh = build_face_grid(resolution, face, false).unwrap();
                let side = (resolution + 1) as usize;
                assert_eq!(mesh.vertex_count(), side * side);
                assert_eq!(mesh.triangle_count(), (resolution * resolution * 2) as usize);
                assert!(mesh.validate().is_ok(), "{face:?} @ {resolution}");
            }
        }
    }

    #[test]
    fn test_zero_resolution_is_invalid() {
        assert!(matches!(
            build_face_grid(0, CubeFace::PosY, true),
            Err(MeshError::InvalidParameter {
                name: "resolution",
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_resolution_is_invalid() {
        assert!(build_face_grid(MAX_RESOLUTION + 1, CubeFace::PosY, false).is_err());
    }

    #[test]
    fn test_grid_spans_face_at_half_offset() {
        for face in CubeFace::ALL {
            let mesh = build_face_grid(4, face, false).unwrap();
            for p in mesh.positions() {
                assert!((p.dot(face.normal()) - 0.5).abs() < 1e-6);
                assert!(p.dot(face.tangent()).abs() <= 0.5 + 1e-6);
                assert!(p.dot(face.bitangent()).abs() <= 0.5 + 1e-6);
            }
            let first = mesh.positions()[0];
            let expected = face.normal() * 0.5 - face.tangent() * 0.5 - face.bitangent() * 0.5;
            assert!((first - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_triangles_face_along_normal() {
        for face in CubeFace::ALL {
            let mesh = build_face_grid(3, face, false).unwrap();
            for i in 0..mesh.triangle_count() {
                let [a, b, c] = mesh.triangle_positions(i);
                let n = (b - a).cross(c - a).normalize();
                assert!(
                    (n - face.normal()).length() < 1e-5,
                    "{face:?} triangle {i} faces {n:?}"
                );
            }
            assert_eq!(mesh.count_inward_triangles(), 0);
        }
    }

    #[test]
    fn test_uvs_are_parametric() {
        let mesh = build_face_grid(2, CubeFace::PosZ, true).unwrap();
        let uvs = mesh.uvs().unwrap();
        assert_eq!(uvs.len(), mesh.vertex_count());
        assert_eq!(uvs[0], Vec2::new(0.0, 0.0));
        assert_eq!(uvs[2], Vec2::new(1.0, 0.0));
        assert_eq!(uvs[4], Vec2::new(0.5, 0.5));
        assert_eq!(uvs[8], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_no_uvs_when_not_requested() {
        assert!(build_face_grid(2, CubeFace::NegX, false).unwrap().uvs().is_none());
    }

    #[test]
    fn test_grid_is_deterministic() {
        let a = build_face_grid(5, CubeFace::NegZ, true).unwrap();
        let b = build_face_grid(5, CubeFace::NegZ, true).unwrap();
        assert_eq!(a, b);
    }
}
