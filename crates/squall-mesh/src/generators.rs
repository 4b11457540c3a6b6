//! Procedural mesh generators for scenarios and testing.
//!
//! These generators produce deterministic, resolution-configurable meshes
//! with consistent winding order.

use squall_math::Vec3;

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XZ plane at `y = 0`.
///
/// The grid spans `[-width/2, width/2]` in X and `[-depth/2, depth/2]` in Z,
/// centered at the origin, with normals facing +Y.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Z (vertex count = rows + 1).
/// - `width` — Total extent along X.
/// - `depth` — Total extent along Z.
///
/// # Example
/// ```
/// use squall_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, depth: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_z = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_z, cols * rows * 2);

    let half_w = width / 2.0;
    let half_d = depth / 2.0;

    for j in 0..verts_z {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            mesh.push_vertex(Vec3::new(-half_w + u * width, 0.0, -half_d + v * depth));
        }
    }

    // Two triangles per quad, wound so the normal faces +Y
    for j in 0..rows {
        for i in 0..cols {
            let near_left = (j * verts_x + i) as u32;
            let near_right = near_left + 1;
            let far_left = near_left + verts_x as u32;
            let far_right = far_left + 1;

            mesh.push_triangle([near_left, far_left, near_right]);
            mesh.push_triangle([near_right, far_left, far_right]);
        }
    }

    mesh
}

/// Generates a UV sphere centered at the origin.
///
/// Pole and seam vertices are duplicated (one per slice column), so a
/// fresh sphere is a natural input for vertex welding.
///
/// # Arguments
/// - `radius` — Sphere radius.
/// - `stacks` — Number of horizontal slices (latitude divisions).
/// - `slices` — Number of vertical slices (longitude divisions).
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> TriangleMesh {
    let vertex_count = (stacks + 1) * (slices + 1);
    let mut mesh = TriangleMesh::with_capacity(vertex_count, stacks * slices * 2);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32; // 0 to PI
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            mesh.push_vertex(
                Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta) * radius,
            );
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Skip the zero-area triangles that touch the poles
            if i != 0 {
                mesh.push_triangle([a, b, a + 1]);
            }
            if i != stacks - 1 {
                mesh.push_triangle([a + 1, b, b + 1]);
            }
        }
    }

    mesh
}
