//! Cube-to-sphere projection methods.
//!
//! Provides two projection approaches:
//! - **Naive**: plain normalization. Cheap, but vertices bunch up near cube
//!   edges and corners.
//! - **Area-corrected**: analytic remapping that keeps triangle areas close
//!   to uniform across the sphere, at roughly three times the arithmetic.

use glam::Vec3;
use tracing::debug;

use crate::{CubeFace, Mesh, MeshError};

/// Squared length below which a vector is treated as degenerate.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// Selects which cube-to-sphere projection to apply to a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ProjectionMethod {
    /// `p / |p|`.
    #[default]
    Naive,
    /// Area-preserving analytic mapping followed by normalization.
    AreaCorrected,
}

impl ProjectionMethod {
    /// Map the `use_even_vert_distribution` switch onto a method.
    #[must_use]
    pub fn from_even_distribution(even: bool) -> Self {
        if even {
            ProjectionMethod::AreaCorrected
        } else {
            ProjectionMethod::Naive
        }
    }

    /// Project a point on the `[-1, 1]` cube surface onto the unit sphere.
    #[inline]
    #[must_use]
    pub fn project(self, point: Vec3) -> Vec3 {
        match self {
            ProjectionMethod::Naive => safe_normalize(point),
            ProjectionMethod::AreaCorrected => safe_normalize(area_corrected(point)),
        }
    }

    /// Project onto a sphere of the given radius.
    #[inline]
    #[must_use]
    pub fn project_scaled(self, point: Vec3, radius: f32) -> Vec3 {
        self.project(point) * radius
    }
}

/// The area-corrected remapping, before normalization:
///
/// ```text
/// x' = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)
/// y' = y * sqrt(1 - z²/2 - x²/2 + z²x²/3)
/// z' = z * sqrt(1 - x²/2 - y²/2 + x²y²/3)
/// ```
///
/// Radicands are clamped at zero so points slightly off the cube stay finite.
#[inline]
fn area_corrected(p: Vec3) -> Vec3 {
    let x2 = p.x * p.x;
    let y2 = p.y * p.y;
    let z2 = p.z * p.z;

    Vec3::new(
        p.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).max(0.0).sqrt(),
        p.y * (1.0 - z2 / 2.0 - x2 / 2.0 + z2 * x2 / 3.0).max(0.0).sqrt(),
        p.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).max(0.0).sqrt(),
    )
}

/// Normalize `v`, substituting a signed unit axis when `v` is near zero.
///
/// The fallback is the axis of the largest component, keeping its sign, so a
/// degenerate vertex still lands on the right side of the planet. An exact
/// zero vector maps to `+Y`.
#[inline]
#[must_use]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > DEGENERATE_LENGTH_SQUARED && len_sq.is_finite() {
        return v / len_sq.sqrt();
    }
    let fallback = CubeFace::from_direction(v).normal();
    debug!(?v, ?fallback, "degenerate vector during projection; using axis fallback");
    fallback
}

/// Project every vertex of `mesh` with one method and scale to `radius`.
///
/// Applying a single method to the whole mesh is the only way this crate
/// projects geometry, so methods never mix within one mesh.
pub fn project_mesh(
    mesh: &mut Mesh,
    method: ProjectionMethod,
    radius: f32,
) -> Result<(), MeshError> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(MeshError::invalid(
            "radius",
            format!("must be positive and finite, got {radius}"),
        ));
    }
    for p in mesh.positions_mut() {
        *p = method.project_scaled(*p, radius);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    /// Sample points on every face of the `[-1, 1]` cube.
    fn cube_surface_samples() -> Vec<Vec3> {
        let mut points = Vec::new();
        for face in CubeFace::ALL {
            for i in 0..=10 {
                for j in 0..=10 {
                    let s = i as f32 / 5.0 - 1.0;
                    let t = j as f32 / 5.0 - 1.0;
                    points.push(face.normal() + s * face.tangent() + t * face.bitangent());
                }
            }
        }
        points
    }

    #[test]
    fn test_naive_outputs_on_unit_sphere() {
        for p in cube_surface_samples() {
            let s = ProjectionMethod::Naive.project(p);
            assert!(
                (s.length() - 1.0).abs() < EPSILON,
                "naive projection of {p:?} has length {}",
                s.length()
            );
        }
    }

    #[test]
    fn test_area_corrected_outputs_on_unit_sphere() {
        for p in cube_surface_samples() {
            let s = ProjectionMethod::AreaCorrected.project(p);
            assert!(
                (s.length() - 1.0).abs() < EPSILON,
                "area-corrected projection of {p:?} has length {}",
                s.length()
            );
        }
    }

    #[test]
    fn test_face_centers_agree_between_methods() {
        for face in CubeFace::ALL {
            let center = face.normal();
            let naive = ProjectionMethod::Naive.project(center);
            let corrected = ProjectionMethod::AreaCorrected.project(center);
            assert!(
                (naive - corrected).length() < EPSILON,
                "{face:?}: naive {naive:?} != corrected {corrected:?}"
            );
            assert!((naive - center).length() < EPSILON);
        }
    }

    #[test]
    fn test_area_corrected_is_unit_before_normalizing() {
        // On the cube surface the remapping already lands on the sphere.
        for p in cube_surface_samples() {
            let len = area_corrected(p).length();
            assert!((len - 1.0).abs() < 1e-4, "{p:?} remapped to length {len}");
        }
    }

    #[test]
    fn test_area_corrected_pulls_interior_toward_face_center() {
        // Halfway along a face diagonal, the corrected point sits closer to
        // the face center than the naive one, thinning the corner regions.
        let p = Vec3::new(0.5, 0.5, 1.0);
        let naive = ProjectionMethod::Naive.project(p);
        let corrected = ProjectionMethod::AreaCorrected.project(p);
        assert!(corrected.dot(Vec3::Z) > naive.dot(Vec3::Z));
    }

    #[test]
    fn test_methods_preserve_octant() {
        for p in cube_surface_samples() {
            for method in [ProjectionMethod::Naive, ProjectionMethod::AreaCorrected] {
                let s = method.project(p);
                for axis in 0..3 {
                    assert!(
                        p[axis] * s[axis] >= 0.0,
                        "{method:?} flipped axis {axis} of {p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_vector_falls_back_to_signed_axis() {
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::Y);
        assert_eq!(safe_normalize(Vec3::new(0.0, 0.0, -1e-9)), Vec3::NEG_Z);
        assert_eq!(safe_normalize(Vec3::new(2e-8, -1e-8, 0.0)), Vec3::X);
    }

    #[test]
    fn test_project_scaled_uses_radius() {
        let p = ProjectionMethod::AreaCorrected.project_scaled(Vec3::new(1.0, 0.3, -0.2), 50.0);
        assert!((p.length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_project_mesh_rejects_bad_radius() {
        let mut mesh = Mesh::new();
        mesh.push_vertex(Vec3::ONE);
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                project_mesh(&mut mesh, ProjectionMethod::Naive, radius),
                Err(MeshError::InvalidParameter { name: "radius", .. })
            ));
        }
    }

    #[test]
    fn test_project_mesh_moves_every_vertex() {
        let mut mesh = Mesh::new();
        mesh.push_vertex(Vec3::ONE);
        mesh.push_vertex(Vec3::new(-1.0, 0.2, 0.4));
        project_mesh(&mut mesh, ProjectionMethod::Naive, 3.0).unwrap();
        for p in mesh.positions() {
            assert!((p.length() - 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_even_distribution_flag() {
        assert_eq!(
            ProjectionMethod::from_even_distribution(true),
            ProjectionMethod::AreaCorrected
        );
        assert_eq!(
            ProjectionMethod::from_even_distribution(false),
            ProjectionMethod::Naive
        );
    }
}
