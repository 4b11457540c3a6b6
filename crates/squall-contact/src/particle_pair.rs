//! Particle–particle collision response.
//!
//! Single pass in index order. For every particle `i`, neighbors come
//! from the broad phase as it was last rebuilt (the previous step's
//! positions), and each candidate `j ≠ i` closer than `2r` gets:
//!
//! 1. a positional split: both move half the penetration depth apart
//!    along `n = normalize(p_i - p_j)`;
//! 2. a restitution impulse `j = -(1 + e) · (v_rel · n) / 2`, applied
//!    with opposite signs, unless the pair is already separating.
//!
//! An unordered pair is visited from both sides, and a particle may be
//! corrected several times in one pass. There is no relaxation loop.

use squall_math::Vec3;
use squall_types::Scalar;

use crate::broad::BroadPhase;
use crate::response::ContactResult;

/// Outcome of testing a single pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Centers at least `2r` apart.
    Apart,
    /// Penetration of the given depth was corrected.
    Resolved(Scalar),
    /// Overlapping with coincident centers; no separation normal.
    Degenerate,
}

/// Resolve one overlapping pair in place.
pub fn resolve_pair(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    i: usize,
    j: usize,
    min_distance: Scalar,
    restitution: Scalar,
) -> PairOutcome {
    let delta = positions[i] - positions[j];
    let distance = delta.length();
    if !(distance < min_distance) {
        return PairOutcome::Apart;
    }
    let Some(normal) = delta.try_normalize() else {
        return PairOutcome::Degenerate;
    };

    let depth = min_distance - distance;
    let correction = normal * (depth * 0.5);
    positions[i] += correction;
    positions[j] -= correction;

    let velocity_along_normal = (velocities[i] - velocities[j]).dot(normal);
    if velocity_along_normal <= 0.0 {
        let impulse = normal * (-(1.0 + restitution) * velocity_along_normal * 0.5);
        velocities[i] += impulse;
        velocities[j] -= impulse;
    }

    PairOutcome::Resolved(depth)
}

/// Resolve all particle pairs closer than `2 × radius`.
///
/// `broad` must have been rebuilt from positions with the same indexing
/// as `positions`. Candidate indices outside `positions` are ignored.
pub fn resolve_particle_pairs(
    broad: &mut dyn BroadPhase,
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    radius: Scalar,
    restitution: Scalar,
) -> ContactResult {
    let min_distance = 2.0 * radius;
    let n = positions.len();
    let mut result = ContactResult::default();

    for i in 0..n {
        let neighbors = broad.query(positions[i], min_distance);
        for &j in neighbors {
            if j == i || j >= n {
                continue;
            }
            match resolve_pair(positions, velocities, i, j, min_distance, restitution) {
                PairOutcome::Apart => {}
                PairOutcome::Resolved(depth) => result.record(depth),
                PairOutcome::Degenerate => {
                    result.skipped_count += 1;
                    tracing::warn!(i, j, "coincident particle centers, pair skipped");
                }
            }
        }
    }

    result
}
