//! # squall-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Squall particle simulator.
//!
//! No domain logic lives here. Every other Squall crate depends on
//! these names.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{SquallError, SquallResult};
pub use ids::{ParticleId, TriangleId};
pub use scalar::Scalar;
