//! # squall-telemetry
//!
//! Event bus for simulation telemetry. Drivers emit structured events
//! (step timing, contact counts, energy, spawn shortfalls) that pluggable
//! sinks consume: the `tracing` log, an in-memory vector, or a shared
//! vector inspectable from outside the bus.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, SharedVecSink, TracingSink, VecSink};
