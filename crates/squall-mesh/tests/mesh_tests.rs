//! Integration tests for squall-mesh.

use squall_math::{Mat4, Vec3};
use squall_mesh::generators::{quad_grid, uv_sphere};
use squall_mesh::{extract_triangles, prepare, weld_vertices, Triangle, TriangleMesh};

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_non_finite_vertex() {
    let mut mesh = make_single_triangle();
    mesh.pos_z[1] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_allows_repeated_indices() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.repeated_index_count(), 1);
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
    assert!(TriangleMesh::from_interleaved(&positions[..8], &[0, 1, 2]).is_err());
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = make_single_triangle();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Triangle Tests ───────────────────────────────────────────

#[test]
fn triangle_area_and_normal() {
    let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
    assert!((tri.area() - 0.5).abs() < 1e-6);
    assert_eq!(tri.normal(), Some(Vec3::Z));
    assert!(!tri.is_degenerate());
}

#[test]
fn collinear_triangle_is_degenerate() {
    let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
    assert!(tri.is_degenerate());
    assert!(tri.normal().is_none());
    assert!(tri.closest_point(Vec3::Y).is_none());
}

// ─── Welding Tests ────────────────────────────────────────────

#[test]
fn weld_merges_near_duplicates_first_come() {
    let positions = [
        Vec3::ZERO,
        Vec3::new(0.0006, 0.0, 0.0),
        Vec3::new(0.0012, 0.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
    ];
    let weld = weld_vertices(&positions, 0.001).unwrap();
    // Vertex 2 is 0.0012 from the kept vertex 0, so it stays separate even
    // though it is within threshold of the merged vertex 1.
    assert_eq!(weld.vertices.len(), 3);
    assert_eq!(weld.remap, vec![0, 0, 1, 2]);
    assert_eq!(weld.merged_count(), 1);
}

#[test]
fn weld_order_sensitivity() {
    let a = Vec3::ZERO;
    let b = Vec3::new(0.0008, 0.0, 0.0);
    let c = Vec3::new(0.0016, 0.0, 0.0);

    let forward = weld_vertices(&[a, b, c], 0.001).unwrap();
    let middle_first = weld_vertices(&[b, a, c], 0.001).unwrap();

    assert_eq!(forward.vertices, vec![a, c]);
    assert_eq!(middle_first.vertices, vec![b]);
}

#[test]
fn weld_rejects_bad_threshold() {
    assert!(weld_vertices(&[Vec3::ZERO], -1.0).is_err());
    assert!(weld_vertices(&[Vec3::ZERO], f32::NAN).is_err());
}

#[test]
fn zero_threshold_keeps_everything() {
    let positions = [Vec3::ZERO, Vec3::ZERO];
    let weld = weld_vertices(&positions, 0.0).unwrap();
    assert_eq!(weld.vertices.len(), 2);
}

#[test]
fn prepare_drops_triangle_with_duplicate_positions() {
    // Triangle 1 references vertex 3, which sits on top of vertex 1.
    let positions = [
        Vec3::ZERO,
        Vec3::X,
        Vec3::Y,
        Vec3::X,
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let mesh = TriangleMesh::from_positions(&positions, &[0, 1, 2, 1, 3, 4]).unwrap();
    let prepared = prepare(&mesh, 0.001).unwrap();

    assert_eq!(prepared.mesh.triangle_count(), 1);
    assert_eq!(prepared.mesh.triangle(0), [0, 1, 2]);
    assert_eq!(prepared.dropped_triangles, 1);
    assert_eq!(prepared.merged_vertices, 1);
    assert_eq!(prepared.mesh.repeated_index_count(), 0);
}

#[test]
fn prepare_keeps_clean_mesh() {
    let mesh = quad_grid(3, 3, 1.0, 1.0);
    let prepared = prepare(&mesh, 0.001).unwrap();
    assert_eq!(prepared.mesh, mesh);
    assert_eq!(prepared.dropped_triangles, 0);
}

#[test]
fn prepare_is_idempotent() {
    let sphere = uv_sphere(1.0, 8, 16);
    let once = prepare(&sphere, 0.001).unwrap();
    let twice = prepare(&once.mesh, 0.001).unwrap();

    assert!(once.merged_vertices > 0);
    assert_eq!(twice.merged_vertices, 0);
    assert_eq!(twice.dropped_triangles, 0);
    assert_eq!(twice.mesh.triangle_count(), once.mesh.triangle_count());
    assert_eq!(twice.mesh.vertex_count(), once.mesh.vertex_count());
}

#[test]
fn prepare_welds_sphere_seams_and_poles() {
    let (stacks, slices) = (8, 16);
    let sphere = uv_sphere(1.0, stacks, slices);
    let prepared = prepare(&sphere, 0.001).unwrap();
    // One vertex per pole plus one per interior ring position.
    assert_eq!(prepared.mesh.vertex_count(), (stacks - 1) * slices + 2);
    assert_eq!(prepared.mesh.triangle_count(), sphere.triangle_count());
}

#[test]
fn prepare_rejects_invalid_mesh() {
    let mut mesh = make_single_triangle();
    mesh.indices.push(0);
    assert!(prepare(&mesh, 0.001).is_err());
}

#[test]
fn world_triangles_apply_transform() {
    let prepared = prepare(&make_single_triangle(), 0.001).unwrap();
    let transform = Mat4::from_scale_rotation_translation(
        Vec3::splat(2.0),
        squall_math::Quat::IDENTITY,
        Vec3::new(0.0, -3.0, 0.0),
    );
    let tris = prepared.world_triangles(&transform);
    assert_eq!(tris.len(), 1);
    assert_eq!(tris[0].v0, Vec3::new(0.0, -3.0, 0.0));
    assert_eq!(tris[0].v1, Vec3::new(2.0, -3.0, 0.0));
    assert_eq!(tris[0].v2, Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn extract_identity_matches_positions() {
    let mesh = quad_grid(1, 1, 2.0, 2.0);
    let tris = extract_triangles(&mesh, &Mat4::IDENTITY);
    assert_eq!(tris.len(), 2);
    assert_eq!(tris[0].v0, mesh.position_vec3(0));
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(20, 20, 2.0, 2.0);
    assert_eq!(mesh.vertex_count(), 441);
    assert_eq!(mesh.triangle_count(), 800);
    assert!(mesh.validate().is_ok());
}

#[test]
fn quad_grid_faces_up() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    for tri in extract_triangles(&mesh, &Mat4::IDENTITY) {
        let n = tri.normal().unwrap();
        assert!((n - Vec3::Y).length() < 1e-6, "normal {:?}", n);
    }
}

#[test]
fn uv_sphere_radius() {
    let mesh = uv_sphere(2.5, 8, 16);
    for i in 0..mesh.vertex_count() {
        let dist = mesh.position_vec3(i).length();
        assert!((dist - 2.5).abs() < 1e-4, "Vertex {} at distance {}", i, dist);
    }
}
