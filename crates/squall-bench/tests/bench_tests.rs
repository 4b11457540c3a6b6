//! Integration tests for squall-bench.

use squall_bench::metrics::BenchmarkMetrics;
use squall_bench::recorder::TrajectoryRecorder;
use squall_bench::runner::BenchmarkRunner;
use squall_bench::scenarios::{Scenario, ScenarioKind};
use squall_math::Vec3;
use squall_solver::{ProxyMirror, VisualProxyHost};
use squall_telemetry::{EventBus, EventKind, SharedVecSink};

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn wind_tunnel_setup() {
    let s = Scenario::wind_tunnel();
    assert_eq!(s.kind, ScenarioKind::WindTunnel);
    assert!(s.obstacle.is_some());
    s.config.validate().unwrap();

    // Welding folds the duplicated poles and seam of the sphere
    let raw = s.obstacle.as_ref().unwrap().triangle_count();
    let welded = s.world_triangles().unwrap();
    assert!(welded.len() < raw);
    assert!(welded.iter().all(|t| t.centroid().x > 4.0));
}

#[test]
fn head_on_setup() {
    let s = Scenario::head_on();
    let particles = s.particles.as_ref().unwrap();
    assert_eq!(particles.len(), 2);
    assert_eq!(particles.radius, 0.6);
    assert!(s.obstacle.is_none());
}

#[test]
fn settle_floor_is_lowered() {
    let s = Scenario::settle();
    let triangles = s.world_triangles().unwrap();
    assert_eq!(triangles.len(), 72); // 6×6 quads × 2
    assert!(triangles.iter().all(|t| (t.v0.y + 2.0).abs() < 1e-6));
}

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 3);
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()).unwrap(), kind);
        assert_eq!(Scenario::from_kind(kind).kind, kind);
    }
    assert!(ScenarioKind::from_name("hurricane").is_err());
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_head_on() {
    let scenario = Scenario::head_on();
    let mut bus = EventBus::new();
    let metrics = BenchmarkRunner::run(&scenario, &mut bus).unwrap();

    assert_eq!(metrics.scenario, "head_on");
    assert_eq!(metrics.timesteps, 30);
    assert_eq!(metrics.particle_count, 2);
    assert!(metrics.pair_contacts >= 1);
    assert_eq!(metrics.triangle_contacts, 0);
    // Both particles keep 0.8 m/s after the bounce
    let expected_ke = 0.5 * scenario.config.particle_mass as f64 * 2.0 * 0.64;
    assert!((metrics.final_kinetic_energy - expected_ke).abs() < 1e-6);
}

#[test]
fn runner_emits_events_per_step() {
    let mut scenario = Scenario::settle();
    scenario.timesteps = 5;
    let mut bus = EventBus::new();
    let sink = SharedVecSink::new();
    bus.add_sink(Box::new(sink.share()));

    BenchmarkRunner::run(&scenario, &mut bus).unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 5 * 4);
    assert!(matches!(events[0].kind, EventKind::StepBegin { .. }));
    assert!(matches!(events[3].kind, EventKind::StepEnd { .. }));
    assert_eq!(events[19].timestep, 4);
}

#[test]
fn settle_run_touches_floor() {
    let mut scenario = Scenario::settle();
    scenario.timesteps = 180;
    let metrics = BenchmarkRunner::run(&scenario, &mut EventBus::new()).unwrap();
    assert!(metrics.triangle_contacts > 0);
    assert_eq!(metrics.integration_skips, 0);
    assert!(metrics.final_kinetic_energy.is_finite());
}

#[test]
fn spawn_shortfall_is_reported() {
    let mut scenario = Scenario::settle();
    scenario.config.spawn_extent = 0.1;
    scenario.config.max_spawn_attempts = 20;
    scenario.timesteps = 1;

    let mut bus = EventBus::new();
    let sink = SharedVecSink::new();
    bus.add_sink(Box::new(sink.share()));
    let metrics = BenchmarkRunner::run(&scenario, &mut bus).unwrap();

    assert_eq!(metrics.particle_count, 1);
    assert!(matches!(
        sink.events()[0].kind,
        EventKind::SpawnIncomplete { requested: 150, placed: 1 }
    ));
}

#[test]
fn mirrored_run_records_trajectories() {
    let scenario = Scenario::head_on();
    let mut mirror = ProxyMirror::new(TrajectoryRecorder::new());
    BenchmarkRunner::run_mirrored(&scenario, &mut EventBus::new(), &mut mirror).unwrap();

    let recorder = mirror.into_host();
    assert_eq!(recorder.track_count(), 2);
    assert!(recorder.tracks.iter().all(|t| t.len() == 31));
    assert_eq!(recorder.tracks[0][0], [-1.0, 0.0, 0.0]);
    let latest = recorder.latest();
    assert!(latest[0].x < latest[1].x);
}

// ─── Recorder Tests ───────────────────────────────────────────

#[test]
fn recorder_json_roundtrip() {
    let mut recorder = TrajectoryRecorder::new();
    let h = recorder.create_proxy(Vec3::ZERO);
    recorder.set_position(&h, Vec3::ONE);
    recorder.set_position(&99, Vec3::ONE); // unknown handle ignored

    let json = recorder.to_json().unwrap();
    let recovered = TrajectoryRecorder::from_json(&json).unwrap();
    assert_eq!(recovered, recorder);
    assert_eq!(recovered.tracks[0], vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
    assert!(TrajectoryRecorder::from_json("{not json").is_err());
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_format() {
    let metrics = BenchmarkRunner::run(&Scenario::head_on(), &mut EventBus::new()).unwrap();
    let csv = BenchmarkMetrics::to_csv(&[metrics.clone(), metrics]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    let columns = lines[0].split(',').count();
    assert_eq!(columns, 16);
    assert!(lines[1].starts_with("head_on,2,0,30,"));
    assert_eq!(lines[1].split(',').count(), columns);
}

#[test]
fn metrics_serialization() {
    let metrics = BenchmarkRunner::run(&Scenario::head_on(), &mut EventBus::new()).unwrap();
    let json = serde_json::to_string(&metrics).unwrap();
    let recovered: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.scenario, "head_on");
    assert_eq!(recovered.pair_contacts, metrics.pair_contacts);
}
