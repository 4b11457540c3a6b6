//! Simulation event types.
//!
//! Lightweight value types emitted once or a few times per step.

use serde::{Deserialize, Serialize};

/// A simulation event tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub timestep: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Step completed.
    StepEnd {
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
    },

    /// Contact statistics for the step.
    Contacts {
        boundary_hits: u32,
        pair_contacts: u32,
        triangle_contacts: u32,
        /// Contacts with no usable separation direction.
        skipped: u32,
        /// Largest corrected penetration (meters).
        max_penetration: f32,
    },

    /// Energy snapshot after the step.
    Energy {
        /// Kinetic energy (½ m v²).
        kinetic: f64,
    },

    /// Fewer particles were spawned than requested.
    SpawnIncomplete { requested: usize, placed: usize },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(timestep: u64, kind: EventKind) -> Self {
        Self { timestep, kind }
    }

    /// Short machine-readable name of the payload variant.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Contacts { .. } => "contacts",
            EventKind::Energy { .. } => "energy",
            EventKind::SpawnIncomplete { .. } => "spawn_incomplete",
            EventKind::Custom { .. } => "custom",
        }
    }
}
