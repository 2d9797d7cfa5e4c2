//! Game balance and tuning
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. Defaults
//! mirror [`crate::consts`]; a host may override any subset from JSON:
//!
//! ```
//! let tuning = planetfall::Tuning::from_json(r#"{ "max_distance": 100.0 }"#).unwrap();
//! assert_eq!(tuning.max_distance, 100.0);
//! assert_eq!(tuning.max_barriers, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::AsteroidSize;

/// Per-size asteroid dimensions and reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeTuning {
    /// Rendered radius
    pub radius: f32,
    /// Collision radius (slightly larger than the mesh)
    pub hit_radius: f32,
    /// Points for destroying one asteroid of this size
    pub score: u64,
}

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Progression ===
    pub max_distance: f32,
    pub distance_speed: f32,
    pub landing_phase_ratio: f32,
    pub planet_visible_ratio: f32,
    pub landing_duration: f32,
    pub landing_distance_speed: f32,

    // === Ship ===
    pub ship_move_speed: f32,
    pub ship_bounds_x: f32,
    pub ship_bounds_y: f32,
    pub ship_fire_rate: f32,
    pub ship_collision_radius: f32,

    // === Shields ===
    pub max_barriers: u8,
    pub barrier_regen_interval_ms: f64,
    pub collision_cooldown: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_min_z: f32,
    pub bullet_spawn_offset: f32,
    pub bullet_hit_padding: f32,

    // === Asteroids ===
    pub small: SizeTuning,
    pub medium: SizeTuning,
    pub large: SizeTuning,
    pub spawn_z: [f32; 2],
    pub spread_x: f32,
    pub spread_y: f32,
    pub initial_count: usize,
    pub oob_z: f32,
    pub vel_x: [f32; 2],
    pub vel_y: [f32; 2],
    pub vel_z: [f32; 2],
    pub split_vel_x: [f32; 2],
    pub split_vel_y: [f32; 2],
    pub split_vel_z: [f32; 2],
    pub split_offset: f32,
    pub split_jitter: f32,

    // === Spawn rate ===
    pub spawn_interval_base: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_distance: MAX_DISTANCE,
            distance_speed: DISTANCE_SPEED,
            landing_phase_ratio: LANDING_PHASE_RATIO,
            planet_visible_ratio: PLANET_VISIBLE_RATIO,
            landing_duration: LANDING_DURATION,
            landing_distance_speed: LANDING_DISTANCE_SPEED,

            ship_move_speed: SHIP_MOVE_SPEED,
            ship_bounds_x: SHIP_BOUNDS_X,
            ship_bounds_y: SHIP_BOUNDS_Y,
            ship_fire_rate: SHIP_FIRE_RATE,
            ship_collision_radius: SHIP_COLLISION_RADIUS,

            max_barriers: MAX_BARRIERS,
            barrier_regen_interval_ms: BARRIER_REGEN_INTERVAL_MS,
            collision_cooldown: COLLISION_COOLDOWN,

            bullet_speed: BULLET_SPEED,
            bullet_min_z: BULLET_MIN_Z,
            bullet_spawn_offset: BULLET_SPAWN_OFFSET,
            bullet_hit_padding: BULLET_HIT_PADDING,

            small: SizeTuning {
                radius: ASTEROID_SMALL_RADII.0,
                hit_radius: ASTEROID_SMALL_RADII.1,
                score: SCORE_SMALL,
            },
            medium: SizeTuning {
                radius: ASTEROID_MEDIUM_RADII.0,
                hit_radius: ASTEROID_MEDIUM_RADII.1,
                score: SCORE_MEDIUM,
            },
            large: SizeTuning {
                radius: ASTEROID_LARGE_RADII.0,
                hit_radius: ASTEROID_LARGE_RADII.1,
                score: SCORE_LARGE,
            },
            spawn_z: ASTEROID_SPAWN_Z,
            spread_x: ASTEROID_SPREAD_X,
            spread_y: ASTEROID_SPREAD_Y,
            initial_count: ASTEROID_INITIAL_COUNT,
            oob_z: ASTEROID_OOB_Z,
            vel_x: ASTEROID_VEL_X,
            vel_y: ASTEROID_VEL_Y,
            vel_z: ASTEROID_VEL_Z,
            split_vel_x: SPLIT_VEL_X,
            split_vel_y: SPLIT_VEL_Y,
            split_vel_z: SPLIT_VEL_Z,
            split_offset: SPLIT_OFFSET,
            split_jitter: SPLIT_JITTER,

            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning override ({} bytes)", json.len());
        Ok(tuning)
    }

    /// Lookup table for a given asteroid size
    pub fn size(&self, size: AsteroidSize) -> &SizeTuning {
        match size {
            AsteroidSize::Small => &self.small,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Large => &self.large,
        }
    }

    /// Collision radius for a given asteroid size
    pub fn hit_radius(&self, size: AsteroidSize) -> f32 {
        self.size(size).hit_radius
    }

    /// Points awarded for destroying an asteroid of `size`
    pub fn score_for(&self, size: AsteroidSize) -> u64 {
        self.size(size).score
    }

    /// Seconds between periodic spawns at the given travel distance
    pub fn spawn_interval(&self, distance: f32) -> f32 {
        (self.spawn_interval_base - distance * self.spawn_interval_decay)
            .max(self.spawn_interval_min)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("max_distance", self.max_distance),
            ("distance_speed", self.distance_speed),
            ("landing_duration", self.landing_duration),
            ("ship_move_speed", self.ship_move_speed),
            ("ship_fire_rate", self.ship_fire_rate),
            ("bullet_speed", self.bullet_speed),
            ("spawn_interval_min", self.spawn_interval_min),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if !(self.landing_phase_ratio > 0.0 && self.landing_phase_ratio <= 1.0) {
            return Err(invalid(
                "landing_phase_ratio",
                format!("must be in (0, 1], got {}", self.landing_phase_ratio),
            ));
        }
        if self.max_barriers == 0 {
            return Err(invalid("max_barriers", "must be at least 1".to_string()));
        }
        if !(self.barrier_regen_interval_ms > 0.0) {
            return Err(invalid(
                "barrier_regen_interval_ms",
                format!("must be positive, got {}", self.barrier_regen_interval_ms),
            ));
        }

        let ranges = [
            ("spawn_z", self.spawn_z),
            ("vel_x", self.vel_x),
            ("vel_y", self.vel_y),
            ("vel_z", self.vel_z),
            ("split_vel_x", self.split_vel_x),
            ("split_vel_y", self.split_vel_y),
            ("split_vel_z", self.split_vel_z),
        ];
        for (field, [lo, hi]) in ranges {
            if lo > hi {
                return Err(invalid(field, format!("range is inverted: [{lo}, {hi}]")));
            }
        }

        // Asteroids must always approach the camera
        if self.vel_z[0] <= 0.0 || self.split_vel_z[0] <= 0.0 {
            return Err(invalid("vel_z", "forward speed must be positive".to_string()));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> GameError {
    GameError::InvalidTuning { field, reason }
}
