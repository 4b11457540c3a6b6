//! Event bus with pluggable sinks.
//!
//! Events go through a `std::sync::mpsc` channel and are dispatched to
//! sinks on [`EventBus::flush`], so emitting never runs sink code.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Event bus for simulation telemetry.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events at `emit`.
    enabled: bool,
}

impl EventBus {
    /// Creates an enabled bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. No-op while disabled.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus
        let _ = self.sender.send(event);
    }

    /// Dispatches every queued event to every sink, in emission order.
    /// Returns the number of events dispatched.
    pub fn flush(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            count += 1;
        }
        count
    }

    /// Flushes pending events, then lets each sink finish.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Names of the registered sinks, in registration order.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
