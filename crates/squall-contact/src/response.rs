//! Contact resolution statistics.

use serde::{Deserialize, Serialize};
use squall_types::Scalar;

/// Result of one contact resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResult {
    /// Number of contacts resolved.
    pub resolved_count: u32,
    /// Contacts skipped because no separation direction could be computed
    /// (coincident centers, particle center on the triangle, degenerate triangle).
    pub skipped_count: u32,
    /// Largest penetration depth corrected during the pass.
    pub max_penetration: Scalar,
}

impl ContactResult {
    /// Records one resolved contact of the given depth.
    #[inline]
    pub fn record(&mut self, depth: Scalar) {
        self.resolved_count += 1;
        self.max_penetration = self.max_penetration.max(depth);
    }

    /// Accumulates another pass into this one.
    pub fn merge(&mut self, other: &ContactResult) {
        self.resolved_count += other.resolved_count;
        self.skipped_count += other.skipped_count;
        self.max_penetration = self.max_penetration.max(other.max_penetration);
    }
}
