//! Spatial hash broad phase over a uniform grid.
//!
//! Space is divided into cubic cells of side `spacing`. Integer cell
//! coordinates are hashed into `2 × max_objects` buckets, and bucket
//! contents are stored in compressed sparse row layout:
//!
//! ```text
//! cell_start:   [0, 0, 2, 3, 3, ..., n]   (table_size + 1 entries)
//! cell_entries: [7, 2, 5, ...]            (bucket h = entries[start[h]..start[h+1]])
//! ```
//!
//! The table is rebuilt from scratch every step with a counting sort, so
//! there is no incremental update path. Distinct cells may share a bucket;
//! queries then return extra candidates, never fewer.

use squall_math::Vec3;
use squall_types::{SquallError, SquallResult};

use crate::broad::BroadPhase;

/// Spatial hash broad phase with fixed capacity.
///
/// Cell spacing should be at least the interaction distance so that a
/// query box spans few cells.
pub struct SpatialHash {
    /// Cell side length.
    spacing: f32,
    /// Number of hash buckets (`2 × max_objects`).
    table_size: usize,
    /// Maximum number of objects accepted by `build`.
    max_objects: usize,
    /// Bucket start offsets, with a guard entry at `table_size`.
    cell_start: Vec<usize>,
    /// Object indices grouped by bucket.
    cell_entries: Vec<usize>,
    /// Number of objects in the current build.
    num_objects: usize,
    /// Scratch buffer holding the last query result.
    query_ids: Vec<usize>,
    /// Per-bucket stamp of the last query that visited it.
    bucket_stamp: Vec<u32>,
    /// Stamp of the current query.
    stamp: u32,
}

impl SpatialHash {
    /// Create an empty spatial hash.
    ///
    /// Fails if `spacing` is not a positive finite number or if
    /// `max_objects` is zero.
    pub fn new(spacing: f32, max_objects: usize) -> SquallResult<Self> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(SquallError::InvalidConfig(format!(
                "Spatial hash cell spacing must be positive and finite, got {spacing}"
            )));
        }
        if max_objects == 0 {
            return Err(SquallError::InvalidConfig(
                "Spatial hash needs room for at least one object".into(),
            ));
        }

        let table_size = 2 * max_objects;
        Ok(Self {
            spacing,
            table_size,
            max_objects,
            cell_start: vec![0; table_size + 1],
            cell_entries: vec![0; max_objects],
            num_objects: 0,
            query_ids: Vec::with_capacity(max_objects),
            bucket_stamp: vec![0; table_size],
            stamp: 0,
        })
    }

    /// Cell side length.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Number of hash buckets.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Number of objects in the current build.
    pub fn len(&self) -> usize {
        self.num_objects
    }

    pub fn is_empty(&self) -> bool {
        self.num_objects == 0
    }

    /// Integer cell coordinate of a scalar: `floor(coord / spacing)`.
    #[inline]
    pub fn cell_coord(&self, coord: f32) -> i32 {
        (coord / self.spacing).floor() as i32
    }

    /// Bucket index of an integer cell.
    #[inline]
    pub fn hash_cell(&self, xi: i32, yi: i32, zi: i32) -> usize {
        let h = xi.wrapping_mul(92_837_111)
            ^ yi.wrapping_mul(689_287_499)
            ^ zi.wrapping_mul(283_923_481);
        h.unsigned_abs() as usize % self.table_size
    }

    /// Bucket index of the cell containing `p`.
    #[inline]
    pub fn hash_position(&self, p: Vec3) -> usize {
        self.hash_cell(self.cell_coord(p.x), self.cell_coord(p.y), self.cell_coord(p.z))
    }

    /// Object indices stored in bucket `h`, in no particular order.
    pub fn bucket(&self, h: usize) -> &[usize] {
        &self.cell_entries[self.cell_start[h]..self.cell_start[h + 1]]
    }

    /// Rebuild the table from `positions` with a counting sort.
    ///
    /// Object `i` is the position `positions[i]`. Prior contents and the
    /// last query result are discarded.
    pub fn build(&mut self, positions: &[Vec3]) -> SquallResult<()> {
        let n = positions.len();
        if n > self.max_objects {
            return Err(SquallError::CapacityExceeded {
                requested: n,
                capacity: self.max_objects,
            });
        }

        self.cell_start.fill(0);
        self.cell_entries.fill(0);
        self.query_ids.clear();

        // Count bucket occupancy
        for &p in positions {
            let h = self.hash_position(p);
            self.cell_start[h] += 1;
        }

        // Inclusive prefix sums, guard at table_size
        let mut start = 0;
        for h in 0..self.table_size {
            start += self.cell_start[h];
            self.cell_start[h] = start;
        }
        self.cell_start[self.table_size] = start;

        // Fill, walking each bucket cursor back to its start offset
        for (i, &p) in positions.iter().enumerate() {
            let h = self.hash_position(p);
            self.cell_start[h] -= 1;
            self.cell_entries[self.cell_start[h]] = i;
        }

        self.num_objects = n;
        Ok(())
    }

    /// Collect candidates from every cell overlapping the cube
    /// `[point - max_distance, point + max_distance]`.
    ///
    /// Each bucket is read at most once per query, so the result holds no
    /// duplicate indices even when several cells of the cube share a bucket.
    pub fn query(&mut self, point: Vec3, max_distance: f32) -> &[usize] {
        let x0 = self.cell_coord(point.x - max_distance);
        let y0 = self.cell_coord(point.y - max_distance);
        let z0 = self.cell_coord(point.z - max_distance);

        let x1 = self.cell_coord(point.x + max_distance);
        let y1 = self.cell_coord(point.y + max_distance);
        let z1 = self.cell_coord(point.z + max_distance);

        self.query_ids.clear();
        self.next_stamp();

        for xi in x0..=x1 {
            for yi in y0..=y1 {
                for zi in z0..=z1 {
                    let h = self.hash_cell(xi, yi, zi);
                    if self.bucket_stamp[h] == self.stamp {
                        continue;
                    }
                    self.bucket_stamp[h] = self.stamp;

                    let start = self.cell_start[h];
                    let end = self.cell_start[h + 1];
                    self.query_ids.extend_from_slice(&self.cell_entries[start..end]);
                }
            }
        }

        &self.query_ids
    }

    /// Number of candidates produced by the last query.
    pub fn query_size(&self) -> usize {
        self.query_ids.len()
    }

    /// Candidates produced by the last query.
    pub fn query_ids(&self) -> &[usize] {
        &self.query_ids
    }

    fn next_stamp(&mut self) {
        if self.stamp == u32::MAX {
            self.bucket_stamp.fill(0);
            self.stamp = 0;
        }
        self.stamp += 1;
    }
}

impl BroadPhase for SpatialHash {
    fn rebuild(&mut self, positions: &[Vec3]) -> SquallResult<()> {
        self.build(positions)
    }

    fn query(&mut self, point: Vec3, max_distance: f32) -> &[usize] {
        SpatialHash::query(self, point, max_distance)
    }

    fn capacity(&self) -> usize {
        self.max_objects
    }

    fn name(&self) -> &str {
        "spatial_hash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_coord_floors_negative_values() {
        let hash = SpatialHash::new(0.5, 4).unwrap();
        assert_eq!(hash.cell_coord(0.0), 0);
        assert_eq!(hash.cell_coord(0.49), 0);
        assert_eq!(hash.cell_coord(0.5), 1);
        assert_eq!(hash.cell_coord(-0.01), -1);
        assert_eq!(hash.cell_coord(-0.5), -1);
        assert_eq!(hash.cell_coord(-0.51), -2);
    }

    #[test]
    fn hash_handles_extreme_cells() {
        let hash = SpatialHash::new(1.0, 8).unwrap();
        for &c in &[i32::MIN, -1, 0, 1, i32::MAX] {
            assert!(hash.hash_cell(c, c, c) < hash.table_size());
        }
    }

    #[test]
    fn stamp_wraparound_resets() {
        let mut hash = SpatialHash::new(1.0, 2).unwrap();
        hash.build(&[Vec3::ZERO, Vec3::X]).unwrap();
        hash.stamp = u32::MAX;
        assert_eq!(hash.query(Vec3::ZERO, 1.0).len(), 2);
        assert_eq!(hash.stamp, 1);
    }
}
