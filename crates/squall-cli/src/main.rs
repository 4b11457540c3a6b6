//! Squall CLI — simulation, benchmarking, and input validation.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "squall")]
#[command(version, about = "Squall — aerodynamic particle simulation with spatial-hash collisions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file.
    Simulate {
        /// Path to simulation config (TOML). Built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Obstacle mesh (JSON `TriangleMesh`).
        #[arg(short, long)]
        mesh: Option<String>,

        /// Number of steps to run.
        #[arg(short, long, default_value_t = 600)]
        steps: u32,

        /// Write recorded particle trajectories to this JSON file.
        #[arg(short, long)]
        trajectory: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (wind_tunnel, head_on, settle, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a config (.toml) or obstacle mesh (.json).
    Validate {
        /// Path to mesh or config file.
        path: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            mesh,
            steps,
            trajectory,
        } => commands::simulate(
            config.as_deref(),
            mesh.as_deref(),
            steps,
            trajectory.as_deref(),
        ),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
