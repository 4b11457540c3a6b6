//! Scalar type alias for the simulation.

/// The floating-point type used throughout the simulation.
///
/// Matches the `f32` lanes of `glam::Vec3`.
pub type Scalar = f32;
