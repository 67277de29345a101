//! Visibility-driven 1-to-4 triangle refinement.
//!
//! Each pass walks the source triangles in order. Triangles that pass the
//! [`VisibilityContext`] test are split at their edge midpoints; the rest are
//! copied through unchanged. Output vertices are never shared between
//! triangles, so adjacent triangles at different depths leave T-junctions.

use glam::{Vec2, Vec3};
use orbis_cubesphere::{Mesh, ProjectionMethod, safe_normalize};
use tracing::trace;

use crate::VisibilityContext;

/// Where new midpoint vertices are placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SubdivisionSurface {
    /// Midpoints are pushed onto the unit sphere: `normalize(a + b)`.
    #[default]
    Sphere,
    /// Midpoints stay on the flat cube face: `(a + b) / 2`. Used when the
    /// final projection expects cube-surface input.
    Cube,
}

impl SubdivisionSurface {
    /// The surface whose midpoints suit a given projection.
    pub fn for_projection(method: ProjectionMethod) -> Self {
        match method {
            ProjectionMethod::Naive => SubdivisionSurface::Sphere,
            ProjectionMethod::AreaCorrected => SubdivisionSurface::Cube,
        }
    }

    #[inline]
    fn midpoint(self, a: Vec3, b: Vec3) -> Vec3 {
        match self {
            SubdivisionSurface::Sphere => safe_normalize(a + b),
            SubdivisionSurface::Cube => (a + b) * 0.5,
        }
    }
}

/// Per-pass refinement counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubdivisionStats {
    /// Triangles split into four.
    pub refined: usize,
    /// Triangles copied through as-is.
    pub passed_through: usize,
}

/// Splits visible, front-facing triangles into four.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdaptiveSubdivider {
    surface: SubdivisionSurface,
    /// When set, visibility is judged on the projected triangle rather than
    /// the working positions.
    projection: Option<ProjectionMethod>,
}

impl AdaptiveSubdivider {
    /// A subdivider that tests visibility on the working positions as-is.
    pub fn new(surface: SubdivisionSurface) -> Self {
        Self {
            surface,
            projection: None,
        }
    }

    /// A subdivider for meshes that will be projected with `method`.
    ///
    /// Midpoints follow [`SubdivisionSurface::for_projection`] and each
    /// triangle is tested for visibility where it will actually be drawn, so
    /// cube-surface corners sitting outside the sphere never hide the patch
    /// under a low camera.
    pub fn for_projection(method: ProjectionMethod) -> Self {
        Self {
            surface: SubdivisionSurface::for_projection(method),
            projection: Some(method),
        }
    }

    /// Where midpoints are placed.
    pub fn surface(&self) -> SubdivisionSurface {
        self.surface
    }

    /// The projection visibility is tested against, if any.
    pub fn projection(&self) -> Option<ProjectionMethod> {
        self.projection
    }

    #[inline]
    fn should_refine(&self, ctx: &VisibilityContext, corners: [Vec3; 3]) -> bool {
        let [a, b, c] = match self.projection {
            Some(method) => corners.map(|p| method.project(p)),
            None => corners,
        };
        ctx.should_refine(a, b, c)
    }

    /// Run one refinement pass.
    ///
    /// With no visibility context every triangle is refined.
    pub fn subdivide(&self, mesh: &Mesh, visibility: Option<&VisibilityContext>) -> Mesh {
        self.subdivide_with_stats(mesh, visibility).0
    }

    /// Run one refinement pass and report how many triangles were split.
    pub fn subdivide_with_stats(
        &self,
        mesh: &Mesh,
        visibility: Option<&VisibilityContext>,
    ) -> (Mesh, SubdivisionStats) {
        let source_triangles = mesh.triangle_count();
        let mut out = Mesh::with_capacity(
            source_triangles * 6,
            source_triangles * 4,
            mesh.uvs().is_some(),
        );
        let mut stats = SubdivisionStats::default();

        for i in 0..source_triangles {
            let [a, b, c] = mesh.triangle_positions(i);
            let [ua, ub, uc] = mesh.triangle_uvs(i).unwrap_or([Vec2::ZERO; 3]);

            let refine = visibility.is_none_or(|ctx| self.should_refine(ctx, [a, b, c]));
            if !refine {
                let ia = out.push_vertex_with_uv(a, ua);
                let ib = out.push_vertex_with_uv(b, ub);
                let ic = out.push_vertex_with_uv(c, uc);
                out.push_triangle([ia, ib, ic]);
                stats.passed_through += 1;
                continue;
            }

            let ab = self.surface.midpoint(a, b);
            let bc = self.surface.midpoint(b, c);
            let ca = self.surface.midpoint(c, a);

            let ia = out.push_vertex_with_uv(a, ua);
            let ib = out.push_vertex_with_uv(b, ub);
            let ic = out.push_vertex_with_uv(c, uc);
            let iab = out.push_vertex_with_uv(ab, (ua + ub) * 0.5);
            let ibc = out.push_vertex_with_uv(bc, (ub + uc) * 0.5);
            let ica = out.push_vertex_with_uv(ca, (uc + ua) * 0.5);

            out.push_triangle([ia, iab, ica]);
            out.push_triangle([iab, ib, ibc]);
            out.push_triangle([ica, ibc, ic]);
            out.push_triangle([iab, ibc, ica]);
            stats.refined += 1;
        }

        (out, stats)
    }

    /// Run `levels` refinement passes against the same visibility context.
    ///
    /// Stops early once a pass refines nothing, since further passes would
    /// only copy the mesh again.
    pub fn subdivide_levels(
        &self,
        mesh: &Mesh,
        visibility: Option<&VisibilityContext>,
        levels: u32,
    ) -> Mesh {
        let mut current = mesh.clone();
        for level in 0..levels {
            let (next, stats) = self.subdivide_with_stats(&current, visibility);
            trace!(
                level,
                refined = stats.refined,
                passed_through = stats.passed_through,
                triangles = next.triangle_count(),
                "subdivision pass"
            );
            current = next;
            if stats.refined == 0 {
                break;
            }
        }
        current
    }
}
