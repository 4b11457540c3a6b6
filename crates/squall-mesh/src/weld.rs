//! Collision geometry preparation: vertex welding and degenerate removal.
//!
//! Welding is greedy and first-come-first-served. Each input vertex is
//! compared against the already-kept vertices in insertion order and
//! merged into the first one closer than the threshold. The result
//! therefore depends on input order: with three collinear vertices
//! spaced just under the threshold, the middle one joins whichever
//! neighbour was kept first.
//!
//! After remapping, any triangle whose three indices are not pairwise
//! distinct is dropped. No other topology (adjacency, normals) survives.

use squall_math::{Mat4, Vec3};
use squall_types::{SquallError, SquallResult};

use crate::mesh::TriangleMesh;
use crate::triangle::Triangle;

/// Output of [`weld_vertices`].
#[derive(Debug, Clone)]
pub struct VertexWeld {
    /// Kept vertex positions, in first-seen order.
    pub vertices: Vec<Vec3>,
    /// For every input vertex, the index of the kept vertex it maps to.
    pub remap: Vec<u32>,
}

impl VertexWeld {
    /// Number of input vertices folded into an earlier one.
    pub fn merged_count(&self) -> usize {
        self.remap.len() - self.vertices.len()
    }
}

/// A welded, degenerate-free mesh ready for collision.
#[derive(Debug, Clone)]
pub struct PreparedMesh {
    /// Welded mesh. Every triangle has three distinct vertex indices.
    pub mesh: TriangleMesh,
    /// Number of input vertices merged away.
    pub merged_vertices: usize,
    /// Number of input triangles dropped as degenerate.
    pub dropped_triangles: usize,
}

impl PreparedMesh {
    /// Materializes every triangle in world space.
    pub fn world_triangles(&self, transform: &Mat4) -> Vec<Triangle> {
        extract_triangles(&self.mesh, transform)
    }
}

fn check_threshold(threshold: f32) -> SquallResult<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(SquallError::InvalidConfig(format!(
            "Weld threshold must be finite and non-negative, got {threshold}"
        )));
    }
    Ok(())
}

/// Merge vertices closer than `threshold` to an already-kept vertex.
pub fn weld_vertices(positions: &[Vec3], threshold: f32) -> SquallResult<VertexWeld> {
    check_threshold(threshold)?;

    let mut vertices: Vec<Vec3> = Vec::new();
    let mut remap = Vec::with_capacity(positions.len());

    for &p in positions {
        match vertices.iter().position(|&kept| p.distance(kept) < threshold) {
            Some(j) => remap.push(j as u32),
            None => {
                remap.push(vertices.len() as u32);
                vertices.push(p);
            }
        }
    }

    Ok(VertexWeld { vertices, remap })
}

/// Weld vertices and drop triangles that collapse under the remapping.
pub fn prepare(mesh: &TriangleMesh, threshold: f32) -> SquallResult<PreparedMesh> {
    mesh.validate()?;
    let weld = weld_vertices(&mesh.positions(), threshold)?;

    let mut welded = TriangleMesh::with_capacity(weld.vertices.len(), mesh.triangle_count());
    for &v in &weld.vertices {
        welded.push_vertex(v);
    }

    let mut dropped = 0;
    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t);
        let (a, b, c) = (
            weld.remap[a as usize],
            weld.remap[b as usize],
            weld.remap[c as usize],
        );
        if a != b && a != c && b != c {
            welded.push_triangle([a, b, c]);
        } else {
            dropped += 1;
        }
    }

    tracing::debug!(
        input_vertices = mesh.vertex_count(),
        kept_vertices = welded.vertex_count(),
        input_triangles = mesh.triangle_count(),
        dropped_triangles = dropped,
        "welded collision mesh"
    );

    Ok(PreparedMesh {
        merged_vertices: weld.merged_count(),
        dropped_triangles: dropped,
        mesh: welded,
    })
}

/// Transform every triangle of `mesh` into world space.
pub fn extract_triangles(mesh: &TriangleMesh, transform: &Mat4) -> Vec<Triangle> {
    (0..mesh.triangle_count())
        .map(|t| {
            let [a, b, c] = mesh.triangle(t);
            Triangle::new(
                transform.transform_point3(mesh.position_vec3(a as usize)),
                transform.transform_point3(mesh.position_vec3(b as usize)),
                transform.transform_point3(mesh.position_vec3(c as usize)),
            )
        })
        .collect()
}
