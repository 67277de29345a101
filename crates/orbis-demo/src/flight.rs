//! Scripted camera path: a descending spiral toward the planet surface.

use std::time::Duration;

use glam::{Mat4, Vec3};
use orbis_lod::CameraPose;

/// Vertical field of view of the demo camera, in degrees.
const FOV_Y_DEGREES: f32 = 60.0;
const ASPECT: f32 = 16.0 / 9.0;
/// Radians the camera orbits per tick.
const ORBIT_STEP: f32 = 0.15;
/// Closest approach, as a multiple of the planet radius.
const SURFACE_MARGIN: f32 = 1.05;

/// A camera that spirals from `start_distance` down to just above the
/// surface over `ticks` steps, always looking at the planet center.
#[derive(Clone, Debug)]
pub(crate) struct FlightPath {
    center: Vec3,
    radius: f32,
    start_distance: f32,
    ticks: u32,
}

impl FlightPath {
    pub(crate) fn new(center: Vec3, radius: f32, start_distance: f32, ticks: u32) -> Self {
        Self {
            center,
            radius,
            start_distance,
            ticks,
        }
    }

    /// Camera distance from the center at `tick`.
    pub(crate) fn distance_at(&self, tick: u32) -> f32 {
        let end = self.radius * SURFACE_MARGIN;
        let t = if self.ticks > 1 {
            tick.min(self.ticks - 1) as f32 / (self.ticks - 1) as f32
        } else {
            0.0
        };
        self.start_distance + (end - self.start_distance) * t
    }

    /// Camera pose at `tick`.
    pub(crate) fn pose_at(&self, tick: u32) -> CameraPose {
        let distance = self.distance_at(tick);
        let angle = tick as f32 * ORBIT_STEP;
        let offset = Vec3::new(angle.sin(), 0.3, angle.cos()).normalize() * distance;
        let position = self.center + offset;

        let view = Mat4::look_at_rh(position, self.center, Vec3::Y);
        let near = (distance - self.radius).max(0.01) * 0.1;
        let far = distance + self.radius * 2.0;
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), ASPECT, near, far);
        CameraPose::new(position, proj * view)
    }

    /// Simulated time between ticks, chosen so that every other tick lands
    /// inside the rebuild interval.
    pub(crate) fn tick_step(update_interval: Duration) -> Duration {
        if update_interval.is_zero() {
            Duration::from_millis(16)
        } else {
            update_interval / 2
        }
    }
}
