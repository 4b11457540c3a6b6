//! Initial particle placement by rejection sampling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use squall_math::Vec3;
use squall_types::SquallResult;

use crate::config::SimulationConfig;
use crate::state::ParticleStore;

/// How many particles were asked for and how many found a free spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnOutcome {
    pub requested: usize,
    pub placed: usize,
    /// Candidate positions drawn in total.
    pub attempts: u64,
}

impl SpawnOutcome {
    pub fn is_complete(&self) -> bool {
        self.placed == self.requested
    }
}

/// Places up to `config.particle_count` particles at rest.
///
/// Candidates are drawn uniformly from the cube of half-extent
/// `spawn_extent` and rejected if they lie closer than one diameter to a
/// particle already placed. When one particle exhausts
/// `max_spawn_attempts`, placement stops and the outcome reports the
/// shortfall.
pub fn spawn_particles<R: Rng>(
    config: &SimulationConfig,
    rng: &mut R,
) -> SquallResult<(ParticleStore, SpawnOutcome)> {
    let mut store = ParticleStore::from_config(config)?;
    let extent = config.spawn_extent;
    let min_distance = 2.0 * config.particle_radius;
    let mut attempts = 0u64;

    'particles: for _ in 0..config.particle_count {
        for _ in 0..config.max_spawn_attempts {
            attempts += 1;
            let candidate = Vec3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            );
            let free = store
                .positions
                .iter()
                .all(|&p| p.distance(candidate) >= min_distance);
            if free {
                store.push(candidate, Vec3::ZERO);
                continue 'particles;
            }
        }

        tracing::error!(
            placed = store.len(),
            requested = config.particle_count,
            attempts = config.max_spawn_attempts,
            "could not find a free spawn position, stopping placement"
        );
        break;
    }

    let outcome = SpawnOutcome {
        requested: config.particle_count,
        placed: store.len(),
        attempts,
    };
    Ok((store, outcome))
}
