//! World-space collision triangle.

use squall_math::{closest_point_on_triangle, ClosestPoint, Vec3};
use squall_types::constants::DEGENERATE_AREA_THRESHOLD;

/// A triangle in world space. Immutable static collision geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Surface area.
    pub fn area(&self) -> f32 {
        0.5 * (self.v1 - self.v0).cross(self.v2 - self.v0).length()
    }

    /// Unit normal following the `v0 → v1 → v2` winding, or `None` when degenerate.
    pub fn normal(&self) -> Option<Vec3> {
        (self.v1 - self.v0).cross(self.v2 - self.v0).try_normalize()
    }

    /// True for zero-area (collapsed or collinear) triangles and non-finite vertices.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.v0.is_finite() && self.v1.is_finite() && self.v2.is_finite();
        !finite || self.area() < DEGENERATE_AREA_THRESHOLD
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Closest point on this triangle's surface to `point`.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Option<ClosestPoint> {
        closest_point_on_triangle(point, self.v0, self.v1, self.v2)
    }
}
