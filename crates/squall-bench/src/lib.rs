//! # squall-bench
//!
//! Benchmark suite for the Squall particle simulator.
//!
//! Provides 3 procedural scenarios, a runner that reports per-step
//! telemetry, metric collection with CSV export, and a trajectory
//! recorder for offline inspection.

pub mod metrics;
pub mod recorder;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use recorder::TrajectoryRecorder;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
