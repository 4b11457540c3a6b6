//! Trajectory recorder — a visual proxy host that keeps every position.
//!
//! Each proxy becomes one track; every `set_position` appends a sample.
//! The recording serializes to JSON for offline plotting.

use std::path::Path;

use serde::{Deserialize, Serialize};
use squall_math::Vec3;
use squall_solver::VisualProxyHost;
use squall_types::{SquallError, SquallResult};

/// Recorded particle paths, one track per proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecorder {
    /// `tracks[i][k]` is the k-th recorded position of proxy `i`.
    pub tracks: Vec<Vec<[f32; 3]>>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proxies created.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Most recent position of every proxy.
    pub fn latest(&self) -> Vec<Vec3> {
        self.tracks
            .iter()
            .filter_map(|t| t.last().map(|&p| Vec3::from_array(p)))
            .collect()
    }

    pub fn to_json(&self) -> SquallResult<String> {
        serde_json::to_string(self).map_err(|e| {
            SquallError::Serialization(format!("JSON serialization failed: {e}"))
        })
    }

    pub fn from_json(json: &str) -> SquallResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            SquallError::Serialization(format!("JSON deserialization failed: {e}"))
        })
    }

    /// Writes the recording as JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> SquallResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl VisualProxyHost for TrajectoryRecorder {
    type Handle = usize;

    fn create_proxy(&mut self, position: Vec3) -> usize {
        self.tracks.push(vec![position.to_array()]);
        self.tracks.len() - 1
    }

    fn set_position(&mut self, handle: &usize, position: Vec3) {
        if let Some(track) = self.tracks.get_mut(*handle) {
            track.push(position.to_array());
        }
    }
}
