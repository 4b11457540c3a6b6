//! Core indexed triangle mesh with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Meshes are `serde` types so obstacle geometry can be loaded from JSON.

use serde::{Deserialize, Serialize};
use squall_math::Vec3;
use squall_types::{SquallError, SquallResult};

/// An indexed triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, p: Vec3) -> u32 {
        let index = self.pos_x.len() as u32;
        self.pos_x.push(p.x);
        self.pos_y.push(p.y);
        self.pos_z.push(p.z);
        index
    }

    /// Appends a triangle by vertex indices.
    pub fn push_triangle(&mut self, tri: [u32; 3]) {
        self.indices.extend_from_slice(&tri);
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Returns all vertex positions as `Vec3`s.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position_vec3(i)).collect()
    }

    /// Counts triangles that reference the same vertex index twice.
    pub fn repeated_index_count(&self) -> usize {
        (0..self.triangle_count())
            .filter(|&t| {
                let [a, b, c] = self.triangle(t);
                a == b || b == c || a == c
            })
            .count()
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Index count is a multiple of 3
    /// - Triangle indices are within bounds
    /// - Positions are finite
    ///
    /// Repeated indices are allowed here; [`crate::weld::prepare`] removes them.
    pub fn validate(&self) -> SquallResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(SquallError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(SquallError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(SquallError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for i in 0..n {
            if !self.position_vec3(i).is_finite() {
                return Err(SquallError::InvalidMesh(format!(
                    "Vertex {} has a non-finite position {:?}",
                    i,
                    self.position(i)
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from `Vec3` positions and flat indices.
    pub fn from_positions(positions: &[Vec3], indices: &[u32]) -> SquallResult<Self> {
        let mut mesh = Self::with_capacity(positions.len(), indices.len() / 3);
        for &p in positions {
            mesh.push_vertex(p);
        }
        mesh.indices = indices.to_vec();
        mesh.validate()?;
        Ok(mesh)
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> SquallResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(SquallError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for i in 0..n {
            mesh.pos_x.push(positions[i * 3]);
            mesh.pos_y.push(positions[i * 3 + 1]);
            mesh.pos_z.push(positions[i * 3 + 2]);
        }

        mesh.indices = indices.to_vec();
        mesh.validate()?;
        Ok(mesh)
    }
}
