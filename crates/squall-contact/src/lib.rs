//! # squall-contact
//!
//! Neighbor search and collision response for Squall particles.
//!
//! Each simulation step resolves contacts in a fixed order:
//! 1. **Boundary containment** — inelastic reflection off the bounding box
//! 2. **Particle pairs** — candidates from a [`BroadPhase`], exact distance
//!    re-check, positional split plus restitution impulse
//! 3. **Particle–triangle** — closest point on static triangles, push-out
//!    and elastic reflection
//!
//! The broad phase is a pluggable trait; [`SpatialHash`] is the production
//! implementation and [`BruteForceBroadPhase`] the reference one.

pub mod boundary;
pub mod broad;
pub mod particle_pair;
pub mod particle_triangle;
pub mod response;
pub mod spatial_hash;

pub use boundary::BoundingVolume;
pub use broad::{BroadPhase, BruteForceBroadPhase};
pub use particle_pair::{resolve_pair, resolve_particle_pairs, PairOutcome};
pub use particle_triangle::{reflect, resolve_triangle_contacts};
pub use response::ContactResult;
pub use spatial_hash::SpatialHash;
