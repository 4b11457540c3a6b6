//! CLI command implementations.

use squall_bench::metrics::BenchmarkMetrics;
use squall_bench::recorder::TrajectoryRecorder;
use squall_bench::runner::BenchmarkRunner;
use squall_bench::scenarios::{Scenario, ScenarioKind};
use squall_math::Mat4;
use squall_mesh::{prepare, Triangle, TriangleMesh};
use squall_solver::{ProxyMirror, Simulation, SimulationConfig};
use squall_telemetry::{EventBus, EventKind, SimulationEvent, TracingSink};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn load_mesh(path: &str) -> Result<TriangleMesh, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let mesh: TriangleMesh =
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse mesh {path}: {e}"))?;
    mesh.validate()?;
    Ok(mesh)
}

fn load_triangles(
    path: &str,
    weld_threshold: f32,
) -> Result<Vec<Triangle>, Box<dyn std::error::Error>> {
    let mesh = load_mesh(path)?;
    let prepared = prepare(&mesh, weld_threshold)?;
    println!(
        "Mesh:       {} ({} tris, {} vertices merged, {} tris dropped)",
        path,
        prepared.mesh.triangle_count(),
        prepared.merged_vertices,
        prepared.dropped_triangles
    );
    Ok(prepared.world_triangles(&Mat4::IDENTITY))
}

/// Run a simulation from a config file.
pub fn simulate(
    config_path: Option<&str>,
    mesh_path: Option<&str>,
    steps: u32,
    trajectory_path: Option<&str>,
) -> CliResult {
    println!("Squall Simulation");
    println!("─────────────────");

    let config = match config_path {
        Some(path) => {
            println!("Config:     {path}");
            SimulationConfig::load(path)?
        }
        None => {
            println!("Config:     built-in defaults");
            SimulationConfig::default()
        }
    };

    let triangles = match mesh_path {
        Some(path) => load_triangles(path, config.weld_threshold)?,
        None => Vec::new(),
    };

    let mut sim = Simulation::new(config, triangles)?;
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::default()));

    if let Some(outcome) = sim.spawn_outcome() {
        println!("Particles:  {} of {} placed", outcome.placed, outcome.requested);
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
    println!("Steps:      {steps} × {:.4}s", sim.config().dt);
    println!();

    let mut mirror = ProxyMirror::new(TrajectoryRecorder::new());
    let recording = trajectory_path.is_some();
    if recording {
        mirror.attach(sim.particles());
    }

    let mut pair_contacts = 0u64;
    let mut triangle_contacts = 0u64;
    let mut boundary_hits = 0u64;
    let mut integration_skips = 0u64;
    let mut wall_time = 0.0f64;

    for _ in 0..steps {
        let report = sim.tick()?;
        let timestep = report.step;
        bus.emit(SimulationEvent::new(
            timestep,
            EventKind::Contacts {
                boundary_hits: report.boundary_hits,
                pair_contacts: report.pairs.resolved_count,
                triangle_contacts: report.triangles.resolved_count,
                skipped: report.pairs.skipped_count + report.triangles.skipped_count,
                max_penetration: report
                    .pairs
                    .max_penetration
                    .max(report.triangles.max_penetration),
            },
        ));
        bus.emit(SimulationEvent::new(
            timestep,
            EventKind::StepEnd {
                wall_time: report.wall_time,
            },
        ));
        bus.flush();

        if recording {
            mirror.sync(sim.particles());
        }
        pair_contacts += report.pairs.resolved_count as u64;
        triangle_contacts += report.triangles.resolved_count as u64;
        boundary_hits += report.boundary_hits as u64;
        integration_skips += report.integration_skips as u64;
        wall_time += report.wall_time;
    }
    bus.finalize();

    println!("Sim time:          {:.3}s", sim.sim_time());
    println!("Wall time:         {:.3}s", wall_time);
    println!("Pair contacts:     {pair_contacts}");
    println!("Triangle contacts: {triangle_contacts}");
    println!("Boundary hits:     {boundary_hits}");
    if integration_skips > 0 {
        println!("Unstable updates:  {integration_skips} (kept previous state)");
    }
    println!("Final KE:          {:.6e}", sim.kinetic_energy());

    if let Some(path) = trajectory_path {
        mirror.into_host().write_json(path)?;
        println!("Trajectories written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CliResult {
    println!("Squall Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![ScenarioKind::from_name(scenario_name)?]
    };

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::TRACE)));
    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);

        println!(
            "Running: {} ({} particles, {} steps)",
            kind.name(),
            scenario.config.particle_count,
            scenario.timesteps,
        );

        let metrics = BenchmarkRunner::run(&scenario, &mut bus)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!(
            "  Contacts:      {} pair, {} triangle",
            metrics.pair_contacts, metrics.triangle_contacts
        );
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        let csv = BenchmarkMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Validate a mesh or config.
pub fn validate(path: &str) -> CliResult {
    println!("Squall Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = SimulationConfig::load(path)?;
        println!("  Particles:     {}", config.particle_count);
        println!("  Radius:        {}", config.particle_radius);
        println!("  Cell spacing:  {}", config.cell_spacing());
        println!("✅ Config is valid.");
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let mesh = load_mesh(path)?;
        println!("  Vertices:  {}", mesh.vertex_count());
        println!("  Triangles: {}", mesh.triangle_count());

        let prepared = prepare(&mesh, squall_types::constants::DEFAULT_WELD_THRESHOLD)?;
        let degenerate = prepared
            .world_triangles(&Mat4::IDENTITY)
            .iter()
            .filter(|t| t.is_degenerate())
            .count();
        println!("  Welded:    {} vertices merged", prepared.merged_vertices);
        println!("  Dropped:   {} collapsed triangles", prepared.dropped_triangles);
        if degenerate > 0 {
            println!("⚠️  {degenerate} zero-area triangles will be skipped at load.");
        }
        println!("✅ Mesh is valid.");
    } else {
        return Err(format!("Unsupported file type: {path} (expected .toml or .json)").into());
    }

    Ok(())
}
