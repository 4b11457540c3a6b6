//! # squall-solver
//!
//! Particle state, aerodynamic integration and the per-step simulation
//! pipeline.
//!
//! ## Key Types
//!
//! - [`SimulationConfig`] — every tunable, loadable from TOML
//! - [`ParticleStore`] — SoA buffers for positions and velocities
//! - [`AeroModel`] — drag, lift and gravity integration
//! - [`Simulation`] — runs the five-phase step and reports [`StepReport`]s
//! - [`VisualProxyHost`] / [`ProxyMirror`] — mirror particles into a host's visuals

pub mod config;
pub mod forces;
pub mod proxy;
pub mod spawn;
pub mod state;
pub mod stepper;

pub use config::SimulationConfig;
pub use forces::AeroModel;
pub use proxy::{ProxyMirror, VisualProxyHost};
pub use spawn::{spawn_particles, SpawnOutcome};
pub use state::{Particle, ParticleStore};
pub use stepper::{Simulation, StepReport};
