//! Pluggable event sinks.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    pub events: Vec<SimulationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Collects events into a vector shared with the code that created the sink.
///
/// The bus owns the boxed sink; keep a [`SharedVecSink::share`] clone to
/// read what it received.
#[derive(Clone, Default)]
pub struct SharedVecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl SharedVecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle on the same event vector.
    pub fn share(&self) -> Self {
        self.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SimulationEvent>> {
        // A panicking sink cannot leave the Vec half-written
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns every event received so far.
    pub fn take(&self) -> Vec<SimulationEvent> {
        std::mem::take(&mut *self.lock())
    }
}

impl EventSink for SharedVecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &str {
        "shared_vec_sink"
    }
}

/// Logs events through `tracing`.
///
/// Per-step events go out at the configured level; spawn shortfalls are
/// always logged as warnings.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let EventKind::SpawnIncomplete { requested, placed } = event.kind {
            tracing::warn!(requested, placed, "spawn incomplete");
            return;
        }

        let kind = event.kind_name();
        let level = self.level;
        if level == tracing::Level::ERROR {
            tracing::error!(timestep = event.timestep, kind, event = ?event.kind, "simulation_event");
        } else if level == tracing::Level::WARN {
            tracing::warn!(timestep = event.timestep, kind, event = ?event.kind, "simulation_event");
        } else if level == tracing::Level::INFO {
            tracing::info!(timestep = event.timestep, kind, event = ?event.kind, "simulation_event");
        } else if level == tracing::Level::DEBUG {
            tracing::debug!(timestep = event.timestep, kind, event = ?event.kind, "simulation_event");
        } else {
            tracing::trace!(timestep = event.timestep, kind, event = ?event.kind, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
