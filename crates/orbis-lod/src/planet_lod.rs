//! Camera-driven planet mesh: picks a subdivision depth from camera distance,
//! refines the cached base mesh where the camera can see it, and projects the
//! result onto the planet sphere.

use std::time::{Duration, Instant};

use glam::{Mat4, Vec3};
use orbis_cubesphere::{
    BaseMeshMode, Mesh, MeshBuffers, ProjectionMethod, cube_seed, project_mesh, six_face_cube,
};
use tracing::{debug, info};

use crate::{
    AdaptiveSubdivider, Frustum, LodError, LodSelector, UpdateThrottle, VisibilityContext,
};

/// Deepest subdivision level a planet may be configured for. Each level
/// quadruples the triangle count of the visible region.
pub const MAX_SUBDIVISION_DEPTH: u32 = 10;

/// Parameters for a [`PlanetLod`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetLodSettings {
    /// Depth used when the camera is far away or absent.
    pub min_resolution: u32,
    /// Depth used when the camera sits on the planet center.
    pub max_resolution: u32,
    /// Planet radius in world units.
    pub radius: f32,
    /// Planet center in world space.
    pub center: Vec3,
    /// Camera distance from the center at which depth reaches `min_resolution`.
    pub max_subdivision_distance: f32,
    /// Minimum time between camera-driven rebuilds.
    pub update_interval: Duration,
    /// Cube-to-sphere mapping applied after subdivision.
    pub projection: ProjectionMethod,
    /// How the unrefined planet is built.
    pub base_mesh: BaseMeshMode,
}

impl Default for PlanetLodSettings {
    fn default() -> Self {
        Self {
            min_resolution: 3,
            max_resolution: 6,
            radius: 50.0,
            center: Vec3::ZERO,
            max_subdivision_distance: 100.0,
            update_interval: Duration::from_millis(500),
            projection: ProjectionMethod::Naive,
            base_mesh: BaseMeshMode::CubeSeed,
        }
    }
}

impl PlanetLodSettings {
    /// Check every parameter that [`PlanetLod::new`] relies on.
    pub fn validate(&self) -> Result<(), LodError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(LodError::invalid(
                "radius",
                format!("must be positive and finite, got {}", self.radius),
            ));
        }
        if !self.center.is_finite() {
            return Err(LodError::invalid(
                "center",
                format!("must be finite, got {}", self.center),
            ));
        }
        if self.max_resolution > MAX_SUBDIVISION_DEPTH {
            return Err(LodError::invalid(
                "max_resolution",
                format!(
                    "{} exceeds the supported depth {MAX_SUBDIVISION_DEPTH}",
                    self.max_resolution
                ),
            ));
        }
        LodSelector::new(
            self.min_resolution,
            self.max_resolution,
            self.max_subdivision_distance,
        )?;
        Ok(())
    }

    /// Local-to-world transform of the unprojected planet mesh.
    fn model(&self) -> Mat4 {
        Mat4::from_translation(self.center) * Mat4::from_scale(Vec3::splat(self.radius))
    }
}

/// World-space camera state for one update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Combined projection * view matrix with a `[0, 1]` depth range.
    pub view_projection: Mat4,
}

impl CameraPose {
    /// Pair a world-space position with its view-projection matrix.
    pub fn new(position: Vec3, view_projection: Mat4) -> Self {
        Self {
            position,
            view_projection,
        }
    }

    /// World-space frustum extracted from the view-projection matrix.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection)
    }
}

/// Result of a [`PlanetLod::update`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The mesh was rebuilt at the given depth.
    Rebuilt { depth: u32 },
    /// The update interval has not elapsed; the previous mesh is kept.
    Throttled,
}

/// Owns a planet's mesh and rebuilds it as the camera moves.
///
/// The mesh is in planet-local space: centered on the origin with the
/// configured radius. Callers place it at [`PlanetLodSettings::center`].
#[derive(Debug)]
pub struct PlanetLod {
    settings: PlanetLodSettings,
    selector: LodSelector,
    throttle: UpdateThrottle,
    subdivider: AdaptiveSubdivider,
    /// Unprojected mesh at `min_resolution`, reused by every rebuild.
    base: Mesh,
    mesh: Mesh,
    current_depth: u32,
}

impl PlanetLod {
    /// Validate the settings, cache the base mesh and build the initial mesh
    /// at `min_resolution`.
    pub fn new(settings: PlanetLodSettings) -> Result<Self, LodError> {
        settings.validate()?;
        let selector = LodSelector::new(
            settings.min_resolution,
            settings.max_resolution,
            settings.max_subdivision_distance,
        )?;
        let subdivider = AdaptiveSubdivider::for_projection(settings.projection);

        let base = match settings.base_mesh {
            BaseMeshMode::CubeSeed => {
                subdivider.subdivide_levels(&cube_seed(), None, settings.min_resolution)
            }
            BaseMeshMode::SixFaces { resolution } => six_face_cube(resolution)?,
        };
        info!(
            mode = ?settings.base_mesh,
            min_resolution = settings.min_resolution,
            vertices = base.vertex_count(),
            triangles = base.triangle_count(),
            "cached planet base mesh"
        );

        let mut planet = Self {
            throttle: UpdateThrottle::new(settings.update_interval),
            current_depth: settings.min_resolution,
            mesh: Mesh::new(),
            settings,
            selector,
            subdivider,
            base,
        };
        planet.rebuild(None)?;
        Ok(planet)
    }

    /// Rebuild for the given camera unless the update interval has not
    /// elapsed since the last rebuild.
    ///
    /// Without a camera the mesh is rebuilt at `min_resolution` with no
    /// visibility culling.
    pub fn update(
        &mut self,
        now: Instant,
        camera: Option<&CameraPose>,
    ) -> Result<UpdateOutcome, LodError> {
        if !self.throttle.ready(now) {
            return Ok(UpdateOutcome::Throttled);
        }
        let depth = self.rebuild(camera)?;
        Ok(UpdateOutcome::Rebuilt { depth })
    }

    /// Rebuild immediately, ignoring the update interval.
    pub fn force_rebuild(
        &mut self,
        camera: Option<&CameraPose>,
    ) -> Result<UpdateOutcome, LodError> {
        let depth = self.rebuild(camera)?;
        Ok(UpdateOutcome::Rebuilt { depth })
    }

    /// The current mesh in planet-local space.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Renderer buffers for the current mesh, with freshly computed normals.
    pub fn buffers(&self) -> MeshBuffers {
        self.mesh.to_buffers()
    }

    /// Depth selected by the most recent rebuild.
    pub fn current_depth(&self) -> u32 {
        self.current_depth
    }

    /// The validated settings this planet was built with.
    pub fn settings(&self) -> &PlanetLodSettings {
        &self.settings
    }

    fn rebuild(&mut self, camera: Option<&CameraPose>) -> Result<u32, LodError> {
        let depth = match camera {
            Some(camera) => self
                .selector
                .select_depth(camera.position.distance(self.settings.center)),
            None => self.settings.min_resolution,
        };
        let model = self.settings.model();
        let visibility = camera.map(|camera| {
            VisibilityContext::from_world(&camera.frustum(), camera.position, &model)
        });

        let levels = depth.saturating_sub(self.settings.min_resolution);
        let mut mesh = self
            .subdivider
            .subdivide_levels(&self.base, visibility.as_ref(), levels);
        project_mesh(&mut mesh, self.settings.projection, self.settings.radius)?;

        debug!(
            depth,
            levels,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "rebuilt planet mesh"
        );
        self.mesh = mesh;
        self.current_depth = depth;
        Ok(depth)
    }
}
