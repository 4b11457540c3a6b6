//! Broad phase neighbor search trait.
//!
//! Quickly identifies *candidate* neighbors of a point. Candidates may be
//! farther than the requested distance; the caller re-checks exact
//! distances before responding.

use squall_math::Vec3;
use squall_types::{SquallError, SquallResult};

/// Trait for broad phase neighbor search.
///
/// The structure is rebuilt wholesale from a position array and then
/// queried point by point. Query results live in an internal scratch
/// buffer that the next query overwrites.
///
/// # Implementations
/// - [`SpatialHash`](crate::spatial_hash::SpatialHash) — uniform grid over a hash table
/// - [`BruteForceBroadPhase`] — every object is a candidate
pub trait BroadPhase: Send {
    /// Rebuild the acceleration structure from `positions`.
    ///
    /// Fails with [`SquallError::CapacityExceeded`] when more positions are
    /// supplied than the structure was sized for.
    fn rebuild(&mut self, positions: &[Vec3]) -> SquallResult<()>;

    /// Indices of all objects that may lie within `max_distance` of `point`.
    ///
    /// Must never omit an object whose true distance is `≤ max_distance`.
    fn query(&mut self, point: Vec3, max_distance: f32) -> &[usize];

    /// Maximum number of objects a rebuild accepts.
    fn capacity(&self) -> usize;

    /// Returns the broad phase strategy name.
    fn name(&self) -> &str;
}

/// Reference broad phase: every indexed object is a candidate.
///
/// O(n) per query. Useful for validating [`SpatialHash`](crate::SpatialHash)
/// and for scenes with only a handful of particles.
pub struct BruteForceBroadPhase {
    ids: Vec<usize>,
    capacity: usize,
}

impl BruteForceBroadPhase {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn rebuild(&mut self, positions: &[Vec3]) -> SquallResult<()> {
        if positions.len() > self.capacity {
            return Err(SquallError::CapacityExceeded {
                requested: positions.len(),
                capacity: self.capacity,
            });
        }
        self.ids.clear();
        self.ids.extend(0..positions.len());
        Ok(())
    }

    fn query(&mut self, _point: Vec3, _max_distance: f32) -> &[usize] {
        &self.ids
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn name(&self) -> &str {
        "brute_force"
    }
}
