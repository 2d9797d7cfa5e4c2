//! Asteroid spawning
//!
//! Fresh asteroids appear far ahead and drift toward the camera. The periodic
//! spawner speeds up with distance travelled, floored at the tuned minimum.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::rng::{EntityId, random_in, random_range};
use super::state::{Asteroid, AsteroidSize, GameState};
use crate::tuning::Tuning;

/// Size draw for periodic spawns, biased toward large/medium
pub const SPAWN_SIZE_TABLE: [AsteroidSize; 5] = [
    AsteroidSize::Large,
    AsteroidSize::Large,
    AsteroidSize::Medium,
    AsteroidSize::Medium,
    AsteroidSize::Large,
];

/// Build an asteroid at a random far-ahead position with a spawn velocity
pub fn random_asteroid<R: Rng + ?Sized>(
    id: EntityId,
    size: AsteroidSize,
    tuning: &Tuning,
    rng: &mut R,
) -> Asteroid {
    let position = Vec3::new(
        random_range(rng, -tuning.spread_x, tuning.spread_x),
        random_range(rng, -tuning.spread_y, tuning.spread_y),
        random_in(rng, tuning.spawn_z),
    );
    let velocity = Vec3::new(
        random_in(rng, tuning.vel_x),
        random_in(rng, tuning.vel_y),
        random_in(rng, tuning.vel_z),
    );
    Asteroid {
        id,
        size,
        position,
        velocity,
    }
}

/// Weighted size for a periodic spawn
pub fn pick_spawn_size<R: Rng + ?Sized>(rng: &mut R) -> AsteroidSize {
    SPAWN_SIZE_TABLE
        .choose(rng)
        .copied()
        .unwrap_or(AsteroidSize::Large)
}

/// Accumulate spawn time and add one asteroid when the interval elapses.
/// Returns the new asteroid's id, if one spawned.
pub fn update_spawner<R: Rng + ?Sized>(
    state: &mut GameState,
    dt: f32,
    rng: &mut R,
) -> Option<EntityId> {
    state.timers.spawn += dt;
    let interval = state.tuning.spawn_interval(state.distance);
    if state.timers.spawn <= interval {
        return None;
    }

    state.timers.spawn = 0.0;
    let id = state.next_entity_id();
    let size = pick_spawn_size(rng);
    let asteroid = random_asteroid(id, size, &state.tuning, rng);
    log::debug!(
        "Spawned {} ({:?}) at z={:.1}, interval {:.3}s",
        id,
        size,
        asteroid.position.z,
        interval
    );
    state.add_asteroid(asteroid);
    Some(id)
}
