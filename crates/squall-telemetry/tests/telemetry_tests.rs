//! Integration tests for squall-telemetry.

use squall_telemetry::bus::EventBus;
use squall_telemetry::events::{EventKind, SimulationEvent};
use squall_telemetry::sinks::{EventSink, SharedVecSink, TracingSink, VecSink};

fn begin(step: u64) -> SimulationEvent {
    SimulationEvent::new(step, EventKind::StepBegin { sim_time: step as f64 / 60.0 })
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush_reaches_sinks() {
    let mut bus = EventBus::new();
    let shared = SharedVecSink::new();
    bus.add_sink(Box::new(shared.share()));

    bus.emit(begin(0));
    bus.emit(SimulationEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));
    assert!(shared.is_empty(), "events are only dispatched on flush");

    assert_eq!(bus.flush(), 2);
    let events = shared.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind_name(), "step_begin");
    assert_eq!(events[1].kind_name(), "step_end");
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let shared = SharedVecSink::new();
    bus.add_sink(Box::new(shared.share()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(begin(0));
    assert_eq!(bus.flush(), 0);
    assert!(shared.is_empty());

    bus.set_enabled(true);
    bus.emit(begin(1));
    assert_eq!(bus.flush(), 1);
    assert_eq!(shared.len(), 1);
}

#[test]
fn every_sink_sees_every_event() {
    let mut bus = EventBus::new();
    let a = SharedVecSink::new();
    let b = SharedVecSink::new();
    bus.add_sink(Box::new(a.share()));
    bus.add_sink(Box::new(b.share()));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);
    assert_eq!(
        bus.sink_names(),
        vec!["shared_vec_sink", "shared_vec_sink", "tracing_sink"]
    );

    for step in 0..5 {
        bus.emit(begin(step));
    }
    bus.finalize();
    assert_eq!(a.events(), b.events());
    assert_eq!(a.len(), 5);
}

#[test]
fn shared_sink_take_drains() {
    let mut sink = SharedVecSink::new();
    let reader = sink.share();
    sink.handle(&begin(3));
    assert_eq!(reader.take().len(), 1);
    assert!(reader.is_empty());
}

// ─── Sink Tests ───────────────────────────────────────────────

#[test]
fn vec_sink_collects() {
    let mut sink = VecSink::new();
    sink.handle(&begin(0));
    sink.handle(&SimulationEvent::new(0, EventKind::Energy { kinetic: 1.5 }));
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.name(), "vec_sink");
}

#[test]
fn tracing_sink_handles_all_kinds() {
    let kinds = vec![
        EventKind::StepBegin { sim_time: 0.0 },
        EventKind::StepEnd { wall_time: 0.002 },
        EventKind::Contacts {
            boundary_hits: 1,
            pair_contacts: 4,
            triangle_contacts: 2,
            skipped: 0,
            max_penetration: 0.03,
        },
        EventKind::Energy { kinetic: 0.2 },
        EventKind::SpawnIncomplete { requested: 10, placed: 7 },
        EventKind::Custom {
            label: "note".into(),
            payload: "{}".into(),
        },
    ];
    for level in [tracing::Level::INFO, tracing::Level::TRACE] {
        let mut sink = TracingSink::new(level);
        for kind in &kinds {
            sink.handle(&SimulationEvent::new(1, kind.clone()));
        }
    }
}

// ─── Serialization Tests ──────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::Contacts {
            boundary_hits: 0,
            pair_contacts: 12,
            triangle_contacts: 3,
            skipped: 1,
            max_penetration: 0.05,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn kind_names_are_distinct() {
    let names = [
        begin(0).kind_name(),
        SimulationEvent::new(0, EventKind::StepEnd { wall_time: 0.0 }).kind_name(),
        SimulationEvent::new(0, EventKind::Energy { kinetic: 0.0 }).kind_name(),
        SimulationEvent::new(0, EventKind::SpawnIncomplete { requested: 1, placed: 0 }).kind_name(),
    ];
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
