//! # squall-math
//!
//! Vector math for the Squall particle simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat4`, etc.)
//! - Closest point on a triangle (barycentric region classification)

pub mod closest_point;

pub use closest_point::{closest_point_on_triangle, ClosestPoint};

// Re-export glam types as the canonical math types for Squall.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
