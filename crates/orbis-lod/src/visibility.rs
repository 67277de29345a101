//! Per-rebuild visibility predicate: frustum membership plus back-face test.

use glam::{Mat4, Vec3};
use orbis_cubesphere::Aabb;

use crate::Frustum;

/// Camera state for one rebuild, expressed in mesh-local space.
///
/// Built fresh for every rebuild and dropped afterwards; nothing here is
/// persisted between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityContext {
    frustum: Frustum,
    camera_position: Vec3,
    /// Unit vector from the mesh center to the camera. `None` when the
    /// camera sits on the center, in which case every triangle counts as
    /// front-facing.
    view_direction: Option<Vec3>,
}

impl VisibilityContext {
    /// Build a context from a frustum and camera position already in the
    /// mesh's local space. The mesh center is the local origin.
    pub fn new(frustum: Frustum, camera_position: Vec3) -> Self {
        Self {
            frustum,
            camera_position,
            view_direction: camera_position.try_normalize(),
        }
    }

    /// Build a context from world-space camera data and the mesh's
    /// local-to-world transform.
    pub fn from_world(world_frustum: &Frustum, camera_world: Vec3, model: &Mat4) -> Self {
        let camera_local = model.inverse().transform_point3(camera_world);
        Self::new(world_frustum.to_local(model), camera_local)
    }

    /// The frustum in mesh-local space.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// The camera position in mesh-local space.
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Whether the triangle's bounding box is not culled by any frustum plane.
    pub fn is_in_view(&self, a: Vec3, b: Vec3, c: Vec3) -> bool {
        self.frustum.is_visible(&Aabb::from_triangle(a, b, c))
    }

    /// Whether the triangle's outward normal has a positive component toward
    /// the camera, as seen from the mesh center.
    pub fn is_front_facing(&self, a: Vec3, b: Vec3, c: Vec3) -> bool {
        match self.view_direction {
            Some(to_camera) => (b - a).cross(c - a).dot(to_camera) > 0.0,
            None => true,
        }
    }

    /// Whether a triangle qualifies for refinement.
    pub fn should_refine(&self, a: Vec3, b: Vec3, c: Vec3) -> bool {
        self.is_in_view(a, b, c) && self.is_front_facing(a, b, c)
    }
}
