//! # squall-mesh
//!
//! Triangle mesh representation and collision geometry preparation.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — Indexed mesh with Structure-of-Arrays position channels.
//! - [`Triangle`] — World-space triangle consumed by the collision pipeline.
//! - [`weld::prepare`] — Vertex welding plus degenerate-triangle removal.
//! - Procedural generators for scenario meshes (quad grids, UV spheres).

pub mod generators;
pub mod mesh;
pub mod triangle;
pub mod weld;

pub use mesh::TriangleMesh;
pub use triangle::Triangle;
pub use weld::{extract_triangles, prepare, weld_vertices, PreparedMesh, VertexWeld};
