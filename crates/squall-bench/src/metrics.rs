//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Particles simulated.
    pub particle_count: usize,
    /// Collision triangles after welding.
    pub triangle_count: usize,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Particle–particle contacts over the whole run.
    pub pair_contacts: u64,
    /// Particle–triangle contacts over the whole run.
    pub triangle_contacts: u64,
    /// Wall hits over the whole run.
    pub boundary_hits: u64,
    /// Contacts skipped for lack of a separation direction.
    pub skipped_contacts: u64,
    /// Particles kept back after a non-finite integration.
    pub integration_skips: u64,
    /// Deepest corrected penetration.
    pub max_penetration: f32,
    /// Kinetic energy after the last step.
    pub final_kinetic_energy: f64,
    /// Largest distance any particle ended from where it started.
    pub max_displacement: f32,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,particle_count,triangle_count,timesteps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,pair_contacts,triangle_contacts,boundary_hits,skipped_contacts,integration_skips,max_penetration,final_ke,max_displacement".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{},{},{},{},{},{:.6},{:.6e},{:.6}",
            self.scenario,
            self.particle_count,
            self.triangle_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.pair_contacts,
            self.triangle_contacts,
            self.boundary_hits,
            self.skipped_contacts,
            self.integration_skips,
            self.max_penetration,
            self.final_kinetic_energy,
            self.max_displacement,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
