//! View-frustum planes and conservative AABB visibility tests.

use glam::{Mat4, Vec3, Vec4};
use orbis_cubesphere::Aabb;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// A view frustum defined by six inward-pointing planes.
///
/// Each `Vec4(a, b, c, d)` describes the half-space `a*x + b*y + c*z + d >= 0`
/// with `(a, b, c)` normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Build a frustum from six pre-derived planes, normalizing each one.
    ///
    /// Order is left, right, bottom, top, near, far, though the visibility
    /// tests do not depend on it.
    pub fn from_planes(planes: [Vec4; 6]) -> Self {
        Self {
            planes: planes.map(normalize_plane),
        }
    }

    /// Extract frustum planes from a combined view-projection matrix
    /// using the Gribb-Hartmann method.
    ///
    /// Expects a `[0, 1]` clip depth range (glam's `*_rh` / `*_lh`
    /// projections). Reverse-Z projections clip to the same range and work
    /// unchanged.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        planes[NEAR] = rows[2];
        planes[FAR] = rows[3] - rows[2];

        Self::from_planes(planes)
    }

    /// The six normalized planes.
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Re-express this frustum in the local space of an object whose
    /// local-to-world transform is `model`.
    pub fn to_local(&self, model: &Mat4) -> Self {
        let transpose = model.transpose();
        Self::from_planes(self.planes.map(|plane| transpose * plane))
    }

    /// Whether a point lies inside or on every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// Uses the p-vertex (positive vertex) method: for each plane, find
    /// the corner of the AABB furthest along the plane normal. If that
    /// corner is behind the plane, the entire AABB is outside.
    ///
    /// This is conservative: boxes near frustum corners may report visible
    /// while lying fully outside, but a box touching the frustum never
    /// reports hidden.
    pub fn is_visible(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            let p = Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            normal.dot(p) + plane.w >= 0.0
        })
    }
}

fn normalize_plane(plane: Vec4) -> Vec4 {
    let len = plane.truncate().length();
    if len > 0.0 { plane / len } else { plane }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera_vp() -> Mat4 {
        let view = Mat4::look_to_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0);
        proj * view
    }

    fn frustum() -> Frustum {
        Frustum::from_view_projection(&default_camera_vp())
    }

    #[test]
    fn test_object_in_front_visible() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -5.0), Vec3::new(1.0, 1.0, -3.0));
        assert!(frustum().is_visible(&aabb));
    }

    #[test]
    fn test_object_behind_camera_not_visible() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 10.0));
        assert!(!frustum().is_visible(&aabb));
    }

    #[test]
    fn test_object_partially_in_frustum_is_visible() {
        let aabb = Aabb::new(Vec3::new(-100.0, -1.0, -10.0), Vec3::new(1.0, 1.0, -5.0));
        assert!(frustum().is_visible(&aabb));
    }

    #[test]
    fn test_all_six_planes_tested() {
        let f = frustum();
        let cases = [
            ("behind", [10.0, 10.0, 10.0], [20.0, 20.0, 20.0]),
            ("left", [-1000.0, 0.0, -5.0], [-999.0, 1.0, -4.0]),
            ("right", [999.0, 0.0, -5.0], [1000.0, 1.0, -4.0]),
            ("above", [0.0, 999.0, -5.0], [1.0, 1000.0, -4.0]),
            ("below", [0.0, -1000.0, -5.0], [1.0, -999.0, -4.0]),
            ("beyond far", [0.0, 0.0, -2000.0], [1.0, 1.0, -1500.0]),
            ("before near", [-0.01, -0.01, -0.05], [0.01, 0.01, -0.01]),
        ];
        for (label, min, max) in cases {
            let aabb = Aabb::new(Vec3::from_array(min), Vec3::from_array(max));
            assert!(!f.is_visible(&aabb), "{label} box reported visible");
        }
    }

    #[test]
    fn test_contains_point() {
        let f = frustum();
        assert!(f.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        assert!(!f.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        assert!(!f.contains_point(Vec3::new(0.0, 0.0, -2000.0)));
    }

    #[test]
    fn test_planes_are_normalized() {
        for plane in frustum().planes() {
            let normal_len = plane.truncate().length();
            assert!(
                (normal_len - 1.0).abs() < 1e-4,
                "plane normal not normalized: {normal_len}"
            );
        }
    }

    #[test]
    fn test_reverse_z_projection_matches() {
        let view = Mat4::look_to_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 1000.0, 0.1);
        let reverse = Frustum::from_view_projection(&(proj * view));
        assert!(reverse.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        assert!(!reverse.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        assert!(!reverse.contains_point(Vec3::new(0.0, 0.0, -2000.0)));
    }

    #[test]
    fn test_to_local_matches_world_test() {
        // An object scaled by 10 and moved to z = -50: local point (0, 0, 1)
        // sits at world (0, 0, -40).
        let translation = Mat4::from_translation(Vec3::new(0.0, 0.0, -50.0));
        let model = translation * Mat4::from_scale(Vec3::splat(10.0));
        let local = frustum().to_local(&model);
        for p in [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 6.0),
            Vec3::new(30.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -200.0),
        ] {
            assert_eq!(
                local.contains_point(p),
                frustum().contains_point(model.transform_point3(p)),
                "local {p:?}"
            );
        }
    }

    #[test]
    fn test_from_planes_normalizes() {
        let f = Frustum::from_planes([Vec4::new(0.0, 0.0, 2.0, 4.0); 6]);
        assert_eq!(f.planes()[0], Vec4::new(0.0, 0.0, 1.0, 2.0));
        assert!(f.contains_point(Vec3::new(0.0, 0.0, -2.0)));
        assert!(!f.contains_point(Vec3::new(0.0, 0.0, -2.5)));
    }
}
