use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Mat4, Vec3};
use orbis_cubesphere::{Mesh, cube_seed};
use orbis_lod::{
    AdaptiveSubdivider, CameraPose, Frustum, PlanetLod, PlanetLodSettings, SubdivisionSurface,
    VisibilityContext,
};

fn base_mesh(levels: u32) -> Mesh {
    AdaptiveSubdivider::default().subdivide_levels(&cube_seed(), None, levels)
}

fn camera_context() -> VisibilityContext {
    let eye = Vec3::new(0.0, 0.0, 1.5);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.01, 100.0);
    VisibilityContext::new(Frustum::from_view_projection(&(proj * view)), eye)
}

fn bench_uniform_subdivision(c: &mut Criterion) {
    let base = base_mesh(3);
    let subdivider = AdaptiveSubdivider::new(SubdivisionSurface::Sphere);
    c.bench_function("uniform_subdivide_3_levels", |bencher| {
        bencher.iter(|| black_box(subdivider.subdivide_levels(black_box(&base), None, 3)))
    });
}

fn bench_frustum_limited_subdivision(c: &mut Criterion) {
    let base = base_mesh(3);
    let ctx = camera_context();
    let subdivider = AdaptiveSubdivider::new(SubdivisionSurface::Sphere);
    c.bench_function("frustum_subdivide_3_levels", |bencher| {
        bencher.iter(|| black_box(subdivider.subdivide_levels(black_box(&base), Some(&ctx), 3)))
    });
}

fn bench_visibility_test(c: &mut Criterion) {
    let ctx = camera_context();
    let (a, b, cc) = (
        Vec3::new(-0.1, -0.1, 1.0),
        Vec3::new(0.1, -0.1, 1.0),
        Vec3::new(0.0, 0.1, 1.0),
    );
    c.bench_function("should_refine", |bencher| {
        bencher.iter(|| black_box(ctx.should_refine(black_box(a), black_box(b), black_box(cc))))
    });
}

fn bench_planet_rebuild(c: &mut Criterion) {
    let mut planet = PlanetLod::new(PlanetLodSettings::default()).expect("valid settings");
    let eye = Vec3::new(0.0, 10.0, 60.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    let camera = CameraPose::new(eye, proj * view);
    c.bench_function("planet_force_rebuild", |bencher| {
        bencher.iter(|| black_box(planet.force_rebuild(Some(&camera))))
    });
}

criterion_group!(
    benches,
    bench_uniform_subdivision,
    bench_frustum_limited_subdivision,
    bench_visibility_test,
    bench_planet_rebuild,
);
criterion_main!(benches);
