//! Collision detection and combat resolution
//!
//! Each sweep first gathers affected ids from an unmodified view of the
//! entities, then applies removals/splits. An asteroid hit by several bullets
//! in one tick therefore splits exactly once, and a bullet touching several
//! asteroids is consumed once.

use std::collections::BTreeSet;

use glam::Vec3;
use rand::Rng;

use super::rng::EntityId;
use super::state::{Asteroid, Bullet, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Outcome of the ship-vs-asteroid sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipImpact {
    /// No contact, or still invulnerable
    None,
    /// A shield absorbed the hit and the asteroid was destroyed
    Shielded(EntityId),
    /// No shields left: the run is over
    Destroyed(EntityId),
}

/// Ids affected by one bullet sweep
#[derive(Debug, Default)]
pub struct BulletHits {
    pub bullets: BTreeSet<EntityId>,
    pub asteroids: BTreeSet<EntityId>,
}

#[inline]
fn bullet_hits(bullet: &Bullet, asteroid: &Asteroid, tuning: &Tuning) -> bool {
    let reach = tuning.hit_radius(asteroid.size) + tuning.bullet_hit_padding;
    bullet.position.distance(asteroid.position) < reach
}

#[inline]
fn ship_hits(ship: Vec3, asteroid: &Asteroid, tuning: &Tuning) -> bool {
    let reach = tuning.hit_radius(asteroid.size) + tuning.ship_collision_radius;
    ship.distance(asteroid.position) < reach
}

/// Pass one: every (bullet, asteroid) overlap, without mutating anything
pub fn find_bullet_hits(
    bullets: &[Bullet],
    asteroids: &[Asteroid],
    tuning: &Tuning,
) -> BulletHits {
    let mut hits = BulletHits::default();
    for bullet in bullets {
        for asteroid in asteroids {
            if bullet_hits(bullet, asteroid, tuning) {
                hits.bullets.insert(bullet.id);
                hits.asteroids.insert(asteroid.id);
            }
        }
    }
    hits
}

/// Remove hit bullets and split hit asteroids. Returns the number of splits.
pub fn resolve_bullet_hits<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> usize {
    let hits = find_bullet_hits(&state.bullets, &state.asteroids, &state.tuning);

    for id in &hits.bullets {
        state.remove_bullet(*id);
    }
    let mut splits = 0;
    for id in &hits.asteroids {
        if state.split_asteroid(*id, rng) {
            splits += 1;
        }
    }
    splits
}

/// Tick the post-hit invulnerability timer, floored at zero
pub fn update_cooldown(state: &mut GameState, dt: f32) {
    state.timers.collision_cooldown = (state.timers.collision_cooldown - dt).max(0.0);
}

/// First-match ship sweep, skipped while invulnerable. At most one impact per tick.
pub fn resolve_ship_hits(state: &mut GameState) -> ShipImpact {
    if state.timers.collision_cooldown > 0.0 {
        return ShipImpact::None;
    }

    let ship = state.ship_position;
    let Some(id) = state
        .asteroids
        .iter()
        .find(|a| ship_hits(ship, a, &state.tuning))
        .map(|a| a.id)
    else {
        return ShipImpact::None;
    };

    if state.barriers > 0 {
        state.decrement_barrier();
        state.remove_asteroid(id);
        state.timers.collision_cooldown = state.tuning.collision_cooldown;
        log::debug!("Ship hit by {}, {} barriers left", id, state.barriers);
        state.push_event(GameEvent::ShipHit {
            barriers_left: state.barriers,
        });
        state.push_event(GameEvent::AsteroidDestroyed { id });
        ShipImpact::Shielded(id)
    } else {
        log::info!("Ship destroyed by {} at {:.1} AU", id, state.distance);
        state.set_phase(GamePhase::GameOver);
        ShipImpact::Destroyed(id)
    }
}

/// Drop asteroids that drifted past the camera and bullets that left the field.
/// No scoring.
pub fn remove_out_of_bounds(state: &mut GameState) {
    let oob_z = state.tuning.oob_z;
    let min_z = state.tuning.bullet_min_z;
    if state.asteroids.iter().any(|a| a.position.z > oob_z) {
        state.asteroids = state
            .asteroids
            .iter()
            .filter(|a| a.position.z <= oob_z)
            .cloned()
            .collect();
    }
    if state.bullets.iter().any(|b| b.position.z < min_z) {
        state.bullets = state
            .bullets
            .iter()
            .filter(|b| b.position.z >= min_z)
            .cloned()
            .collect();
    }
}
