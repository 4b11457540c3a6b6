//! Closest point on a triangle.
//!
//! Classifies the projection of a query point into one of the seven
//! Voronoi regions of the triangle's parameter plane and clamps the
//! barycentric pair `(s, t)` to the simplex `{s ≥ 0, t ≥ 0, s + t ≤ 1}`:
//!
//! ```text
//!        t
//!   \ 2 |
//!    \  |
//!     \ |
//!      \|
//!       *
//!       |\
//!    3  | \   1
//!       |  \
//!       | 0 \
//!   ----*----*---- s
//!    4  |  5  \ 6
//! ```
//!
//! Region 0 is the interior. Regions 1, 3 and 5 clamp to a single edge.
//! Regions 2, 4 and 6 border a vertex and pick between its two edges.
//! The branch taken for points exactly on a region border is part of
//! the contract: collision response depends on it being repeatable.
//!
//! The Gram system is solved in `f64`. Long thin triangles have
//! `a * c ≈ b * b`, and in `f32` the determinant cancels to zero well
//! before the triangle's area reaches the degeneracy threshold.

use glam::{DVec3, Vec3};
use squall_types::constants::DEGENERATE_AREA_THRESHOLD;

/// Result of a closest-point query against a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// Closest point on the triangle surface.
    pub point: Vec3,
    /// Barycentric weight along `v1 - v0`.
    pub s: f32,
    /// Barycentric weight along `v2 - v0`.
    pub t: f32,
}

impl ClosestPoint {
    /// Returns true when `(s, t)` lies strictly inside the triangle.
    pub fn is_interior(&self) -> bool {
        self.s > 0.0 && self.t > 0.0 && self.s + self.t < 1.0
    }
}

#[inline]
fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Smallest accepted Gram determinant. `det = |edge0 × edge1|² = 4·area²`,
/// so this rejects exactly the triangles whose area is below
/// [`DEGENERATE_AREA_THRESHOLD`].
fn min_gram_determinant() -> f64 {
    let twice_area = 2.0 * DEGENERATE_AREA_THRESHOLD as f64;
    twice_area * twice_area
}

/// Compute the closest point on triangle `(v0, v1, v2)` to `point`.
///
/// Returns `None` for degenerate triangles (area below
/// [`DEGENERATE_AREA_THRESHOLD`] or non-finite vertices), whose Gram
/// determinant cannot be inverted.
pub fn closest_point_on_triangle(
    point: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<ClosestPoint> {
    let origin = v0.as_dvec3();
    let edge0: DVec3 = v1.as_dvec3() - origin;
    let edge1: DVec3 = v2.as_dvec3() - origin;
    let diff = origin - point.as_dvec3();

    let a = edge0.dot(edge0);
    let b = edge0.dot(edge1);
    let c = edge1.dot(edge1);
    let d = edge0.dot(diff);
    let e = edge1.dot(diff);

    let det = a * c - b * b;
    if !(a > 0.0 && c > 0.0 && det >= min_gram_determinant()) {
        return None;
    }

    let mut s = b * e - c * d;
    let mut t = b * d - a * e;

    if s + t <= det {
        if s < 0.0 {
            if t < 0.0 {
                // Region 4
                if d < 0.0 {
                    s = clamp01(-d / a);
                    t = 0.0;
                } else {
                    s = 0.0;
                    t = clamp01(-e / c);
                }
            } else {
                // Region 3
                s = 0.0;
                t = clamp01(-e / c);
            }
        } else if t < 0.0 {
            // Region 5
            s = clamp01(-d / a);
            t = 0.0;
        } else {
            // Region 0
            let inv_det = 1.0 / det;
            s *= inv_det;
            t *= inv_det;
        }
    } else if s < 0.0 {
        // Region 2
        let tmp0 = b + d;
        let tmp1 = c + e;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            s = clamp01(numer / denom);
            t = 1.0 - s;
        } else {
            s = 0.0;
            t = clamp01(-e / c);
        }
    } else if t < 0.0 {
        // Region 6
        let tmp0 = b + e;
        let tmp1 = a + d;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            t = clamp01(numer / denom);
            s = 1.0 - t;
        } else {
            s = clamp01(-d / a);
            t = 0.0;
        }
    } else {
        // Region 1
        let numer = (c + e) - (b + d);
        let denom = a - 2.0 * b + c;
        s = clamp01(numer / denom);
        t = 1.0 - s;
    }

    Some(ClosestPoint {
        point: (origin + edge0 * s + edge1 * t).as_vec3(),
        s: s as f32,
        t: t as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_determinant_matches_area_threshold() {
        let area = DEGENERATE_AREA_THRESHOLD as f64;
        assert!((min_gram_determinant() - 4.0 * area * area).abs() < 1e-30);
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(3.0), 1.0);
    }
}
