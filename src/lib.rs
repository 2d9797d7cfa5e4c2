//! Planetfall - fly a ship through an asteroid field to a distant planet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state store, motion, collisions, spawning, phases)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser/native host adapters
//! - `error`: Errors returned by the session API

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{Command, GameError};
pub use sim::{Game, GamePhase, GameState, TickInput};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
///
/// These are the compile-time defaults. [`Tuning::default`] copies every
/// gameplay value from here; override at runtime via [`Tuning::from_json`].
pub mod consts {
    /// Largest frame delta the session accepts before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Longest single simulation step; frames are split into substeps of at most this
    pub const MAX_SUBSTEP_DT: f32 = 1.0 / 120.0;

    /// Game progression
    pub const MAX_DISTANCE: f32 = 500.0; // AU to reach the planet
    pub const DISTANCE_SPEED: f32 = 10.0; // AU per second
    pub const LANDING_PHASE_RATIO: f32 = 0.92;
    pub const PLANET_VISIBLE_RATIO: f32 = 0.55;
    pub const LANDING_DURATION: f32 = 4.0; // seconds
    /// Distance still ticks up during landing, purely for the HUD
    pub const LANDING_DISTANCE_SPEED: f32 = 3.0;

    /// Ship
    pub const SHIP_MOVE_SPEED: f32 = 20.0;
    pub const SHIP_BOUNDS_X: f32 = 14.0;
    pub const SHIP_BOUNDS_Y: f32 = 8.0;
    pub const SHIP_FIRE_RATE: f32 = 0.15; // seconds between shots
    /// Landing approach: lateral/depth easing rates (1/s) and final depth
    pub const LANDING_EASE_LATERAL: f32 = 2.0;
    pub const LANDING_EASE_DEPTH: f32 = 1.5;
    pub const LANDING_DEPTH: f32 = -50.0;
    pub const LANDING_MIN_SCALE: f32 = 0.05;

    /// Barriers / shields
    pub const MAX_BARRIERS: u8 = 3;
    pub const BARRIER_REGEN_INTERVAL_MS: f64 = 10_000.0;
    pub const SHIP_COLLISION_RADIUS: f32 = 1.5;
    pub const COLLISION_COOLDOWN: f32 = 1.0; // seconds of invulnerability after a hit

    /// Bullets
    pub const BULLET_SPEED: f32 = 100.0;
    pub const BULLET_MIN_Z: f32 = -100.0;
    pub const BULLET_SPAWN_OFFSET: f32 = 1.5; // spawned this far ahead of the ship
    pub const BULLET_HIT_PADDING: f32 = 0.2;

    /// Asteroid dimensions: (render radius, hit radius) for Small, Medium, Large
    pub const ASTEROID_SMALL_RADII: (f32, f32) = (0.7, 0.9);
    pub const ASTEROID_MEDIUM_RADII: (f32, f32) = (1.3, 1.6);
    pub const ASTEROID_LARGE_RADII: (f32, f32) = (2.0, 2.4);

    /// Asteroid spawning
    pub const ASTEROID_SPAWN_Z: [f32; 2] = [-100.0, -70.0];
    pub const ASTEROID_SPREAD_X: f32 = 30.0;
    pub const ASTEROID_SPREAD_Y: f32 = 20.0;
    pub const ASTEROID_INITIAL_COUNT: usize = 15;
    pub const ASTEROID_OOB_Z: f32 = 15.0; // removed once z > this (behind camera)

    /// Asteroid velocity ranges (forward is +Z, toward the camera)
    pub const ASTEROID_VEL_X: [f32; 2] = [-1.0, 1.0];
    pub const ASTEROID_VEL_Y: [f32; 2] = [-1.0, 1.0];
    pub const ASTEROID_VEL_Z: [f32; 2] = [12.0, 20.0];

    /// Split children fly apart faster and wider than fresh spawns
    pub const SPLIT_VEL_X: [f32; 2] = [-2.0, 2.0];
    pub const SPLIT_VEL_Y: [f32; 2] = [-1.0, 1.0];
    pub const SPLIT_VEL_Z: [f32; 2] = [5.0, 12.0];
    pub const SPLIT_OFFSET: f32 = 1.5;
    pub const SPLIT_JITTER: f32 = 0.5;

    /// Spawn interval shrinks with distance: max(MIN, BASE - distance * DECAY)
    pub const SPAWN_INTERVAL_BASE: f32 = 0.5;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.1;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.003;

    /// Scoring - smaller rocks are worth more
    pub const SCORE_SMALL: u64 = 100;
    pub const SCORE_MEDIUM: u64 = 50;
    pub const SCORE_LARGE: u64 = 25;
}

/// Exponential ease of `current` toward `target` at `rate` per second
#[inline]
pub fn ease_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * rate * dt
}

/// Clamp a position to the ship's lateral flight rectangle (X/Y), leaving Z alone
#[inline]
pub fn clamp_lateral(pos: Vec3, bounds_x: f32, bounds_y: f32) -> Vec3 {
    Vec3::new(
        pos.x.clamp(-bounds_x, bounds_x),
        pos.y.clamp(-bounds_y, bounds_y),
        pos.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_lateral_keeps_depth() {
        let p = clamp_lateral(Vec3::new(20.0, -9.0, -3.0), 14.0, 8.0);
        assert_eq!(p, Vec3::new(14.0, -8.0, -3.0));
    }

    #[test]
    fn test_ease_toward_moves_fraction() {
        let v = ease_toward(10.0, 0.0, 2.0, 0.25);
        assert!((v - 5.0).abs() < 1e-6);
    }
}
