//! Indexed triangle mesh with optional parallel UVs.
//!
//! Triangles wind counter-clockwise when viewed from outside the planet: the
//! outward face normal of `[a, b, c]` is `(b - a) × (c - a)`.

use glam::{Vec2, Vec3};

use crate::{Aabb, MeshError};

/// An indexed triangle mesh.
///
/// Vertex insertion order is the vertex index. When UVs are enabled there is
/// exactly one UV per position, in the same order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    uvs: Option<Vec<Vec2>>,
}

/// Flat buffers handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
    /// Texture coordinates, parallel to `positions` when present.
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Area-weighted vertex normals, parallel to `positions`.
    pub normals: Vec<[f32; 3]>,
}

impl Mesh {
    /// An empty mesh without UVs.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty mesh that carries UVs.
    pub fn with_uvs() -> Self {
        Self {
            uvs: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// An empty mesh with room for the given number of vertices and triangles.
    pub fn with_capacity(vertices: usize, triangles: usize, uvs: bool) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            uvs: uvs.then(|| Vec::with_capacity(vertices)),
        }
    }

    /// Build a mesh from raw parts, checking the index and UV invariants.
    pub fn from_parts(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        uvs: Option<Vec<Vec2>>,
    ) -> Result<Self, MeshError> {
        let mesh = Self {
            positions,
            triangles,
            uvs,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Append a vertex and return its index.
    ///
    /// If the mesh carries UVs, a zero UV is recorded to keep the buffers
    /// parallel; use [`Mesh::push_vertex_with_uv`] to supply one.
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        if let Some(uvs) = &mut self.uvs {
            uvs.push(Vec2::ZERO);
        }
        index
    }

    /// Append a vertex with a UV and return its index.
    ///
    /// The UV is dropped if this mesh does not carry UVs.
    pub fn push_vertex_with_uv(&mut self, position: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        if let Some(uvs) = &mut self.uvs {
            uvs.push(uv);
        }
        index
    }

    /// Append a triangle.
    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        debug_assert!(
            triangle.iter().all(|&i| (i as usize) < self.positions.len()),
            "triangle {triangle:?} references a vertex that has not been pushed"
        );
        self.triangles.push(triangle);
    }

    /// Append every vertex and triangle of `other`, offsetting its indices.
    ///
    /// UVs survive only if both meshes carry them (or `self` is still empty).
    pub fn append(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        let was_empty = self.positions.is_empty();

        self.positions.extend_from_slice(&other.positions);
        self.triangles
            .extend(other.triangles.iter().map(|t| t.map(|i| i + base)));

        match (&mut self.uvs, &other.uvs) {
            (Some(ours), Some(theirs)) => ours.extend_from_slice(theirs),
            (None, None) => {}
            (slot, theirs) => {
                *slot = if was_empty { theirs.clone() } else { None };
            }
        }
    }

    /// Vertex positions in index order.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable access to positions; the vertex count cannot change.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    /// Triangles as index triples.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// UVs, if this mesh carries them.
    pub fn uvs(&self) -> Option<&[Vec2]> {
        self.uvs.as_deref()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flat index buffer view, three indices per triangle.
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// The three corner positions of triangle `index`.
    pub fn triangle_positions(&self, index: usize) -> [Vec3; 3] {
        self.triangles[index].map(|i| self.positions[i as usize])
    }

    /// The three corner UVs of triangle `index`, if the mesh carries UVs.
    pub fn triangle_uvs(&self, index: usize) -> Option<[Vec2; 3]> {
        let uvs = self.uvs.as_ref()?;
        Some(self.triangles[index].map(|i| uvs[i as usize]))
    }

    /// Check that every index is in range and UVs are parallel to positions.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();
        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        if let Some(uvs) = &self.uvs
            && uvs.len() != vertex_count
        {
            return Err(MeshError::UvLengthMismatch {
                positions: vertex_count,
                uvs: uvs.len(),
            });
        }
        Ok(())
    }

    /// Bounding box of all vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Area-weighted vertex normals.
    ///
    /// Vertices not referenced by any non-degenerate triangle fall back to
    /// their radial direction.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for &[a, b, c] in &self.triangles {
            let (pa, pb, pc) = (
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            );
            // Unnormalised cross product weights by twice the triangle area.
            let n = (pb - pa).cross(pc - pa);
            normals[a as usize] += n;
            normals[b as usize] += n;
            normals[c as usize] += n;
        }
        normals
            .iter()
            .zip(&self.positions)
            .map(|(n, p)| n.try_normalize().unwrap_or_else(|| p.normalize_or(Vec3::Y)))
            .collect()
    }

    /// Number of triangles whose normal points toward the mesh origin.
    pub fn count_inward_triangles(&self) -> usize {
        (0..self.triangles.len())
            .filter(|&i| {
                let [a, b, c] = self.triangle_positions(i);
                !triangle_winds_outward(a, b, c)
            })
            .count()
    }

    /// Flatten into renderer buffers.
    pub fn to_buffers(&self) -> MeshBuffers {
        MeshBuffers {
            positions: self.positions.iter().map(|p| p.to_array()).collect(),
            indices: self.indices().to_vec(),
            uvs: self
                .uvs
                .as_ref()
                .map(|uvs| uvs.iter().map(|uv| uv.to_array()).collect()),
            normals: self
                .vertex_normals()
                .iter()
                .map(|n| n.to_array())
                .collect(),
        }
    }
}

/// Whether a triangle's normal points away from the mesh origin.
///
/// Vertices are relative to the planet center; the centroid approximates the
/// outward direction.
pub fn triangle_winds_outward(a: Vec3, b: Vec3, c: Vec3) -> bool {
    let face_normal = (b - a).cross(c - a);
    let centroid = (a + b + c) / 3.0;
    face_normal.dot(centroid) > 0.0
}
