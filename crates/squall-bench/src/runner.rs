//! Benchmark runner — executes scenarios and collects metrics.
//!
//! Every step emits `StepBegin`, `Contacts`, `Energy` and `StepEnd` on the
//! supplied bus, which is flushed once per step.

use std::time::Instant;

use squall_math::Vec3;
use squall_solver::{ProxyMirror, VisualProxyHost};
use squall_telemetry::{EventBus, EventKind, SimulationEvent};
use squall_types::SquallResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Proxy host that discards everything.
struct NullHost;

impl VisualProxyHost for NullHost {
    type Handle = ();

    fn create_proxy(&mut self, _position: Vec3) -> Self::Handle {}

    fn set_position(&mut self, _handle: &(), _position: Vec3) {}
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    pub fn run(scenario: &Scenario, bus: &mut EventBus) -> SquallResult<BenchmarkMetrics> {
        let mut mirror = ProxyMirror::new(NullHost);
        Self::run_mirrored(scenario, bus, &mut mirror)
    }

    /// Run a single scenario, syncing `mirror` after construction and
    /// after every step.
    pub fn run_mirrored<H: VisualProxyHost>(
        scenario: &Scenario,
        bus: &mut EventBus,
        mirror: &mut ProxyMirror<H>,
    ) -> SquallResult<BenchmarkMetrics> {
        let mut sim = scenario.build()?;

        if let Some(outcome) = sim.spawn_outcome() {
            if !outcome.is_complete() {
                bus.emit(SimulationEvent::new(
                    0,
                    EventKind::SpawnIncomplete {
                        requested: outcome.requested,
                        placed: outcome.placed,
                    },
                ));
            }
        }

        let initial: Vec<Vec3> = sim.particles().positions.clone();
        mirror.attach(sim.particles());

        let mut metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            particle_count: sim.particles().len(),
            triangle_count: sim.triangles().len(),
            timesteps: scenario.timesteps,
            total_wall_time: 0.0,
            avg_step_time: 0.0,
            min_step_time: 0.0,
            max_step_time: 0.0,
            pair_contacts: 0,
            triangle_contacts: 0,
            boundary_hits: 0,
            skipped_contacts: 0,
            integration_skips: 0,
            max_penetration: 0.0,
            final_kinetic_energy: 0.0,
            max_displacement: 0.0,
        };
        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);

        let total_start = Instant::now();

        for _ in 0..scenario.timesteps {
            let timestep = sim.step_count();
            bus.emit(SimulationEvent::new(
                timestep,
                EventKind::StepBegin {
                    sim_time: sim.sim_time(),
                },
            ));

            let report = sim.step(scenario.dt)?;
            mirror.sync(sim.particles());

            let skipped = report.pairs.skipped_count + report.triangles.skipped_count;
            let max_penetration = report
                .pairs
                .max_penetration
                .max(report.triangles.max_penetration);
            let kinetic = sim.kinetic_energy();

            bus.emit(SimulationEvent::new(
                timestep,
                EventKind::Contacts {
                    boundary_hits: report.boundary_hits,
                    pair_contacts: report.pairs.resolved_count,
                    triangle_contacts: report.triangles.resolved_count,
                    skipped,
                    max_penetration,
                },
            ));
            bus.emit(SimulationEvent::new(timestep, EventKind::Energy { kinetic }));
            bus.emit(SimulationEvent::new(
                timestep,
                EventKind::StepEnd {
                    wall_time: report.wall_time,
                },
            ));
            bus.flush();

            step_times.push(report.wall_time);
            metrics.pair_contacts += report.pairs.resolved_count as u64;
            metrics.triangle_contacts += report.triangles.resolved_count as u64;
            metrics.boundary_hits += report.boundary_hits as u64;
            metrics.skipped_contacts += skipped as u64;
            metrics.integration_skips += report.integration_skips as u64;
            metrics.max_penetration = metrics.max_penetration.max(max_penetration);
        }

        metrics.total_wall_time = total_start.elapsed().as_secs_f64();
        bus.flush();

        if !step_times.is_empty() {
            metrics.avg_step_time = step_times.iter().sum::<f64>() / step_times.len() as f64;
            metrics.min_step_time = step_times.iter().copied().fold(f64::MAX, f64::min);
            metrics.max_step_time = step_times.iter().copied().fold(0.0, f64::max);
        }
        metrics.final_kinetic_energy = sim.kinetic_energy();
        metrics.max_displacement = sim
            .particles()
            .positions
            .iter()
            .zip(&initial)
            .map(|(p, p0)| p.distance(*p0))
            .fold(0.0f32, f32::max);

        tracing::info!(
            scenario = %metrics.scenario,
            steps = metrics.timesteps,
            avg_step_ms = metrics.avg_step_time * 1000.0,
            pair_contacts = metrics.pair_contacts,
            "benchmark finished"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(bus: &mut EventBus) -> SquallResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind), bus))
            .collect()
    }
}
