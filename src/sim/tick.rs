//! Simulation tick and phase controller
//!
//! One call to [`tick`] advances the run by `dt` seconds:
//! motion, travel distance, landing trigger, collisions, cleanup and spawning,
//! in that order. Terminal phases are frozen.

use rand::Rng;

use super::collision::{
    ShipImpact, remove_out_of_bounds, resolve_bullet_hits, resolve_ship_hits, update_cooldown,
};
use super::motion::{
    ease_ship_landing, integrate_asteroids, integrate_bullets, steer_ship, update_gun,
};
use super::spawn::update_spawner;
use super::state::{GamePhase, GameState};

/// Landing completes when the timer is within this many seconds of the duration
const LANDING_EPSILON: f32 = 1e-4;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Horizontal intent from held keys (-1 left, +1 right)
    pub move_x: i8,
    /// Vertical intent from held keys (-1 down, +1 up)
    pub move_y: i8,
    /// Fire held
    pub fire: bool,
}

impl TickInput {
    /// Movement intent normalized to exactly -1, 0 or +1 per axis
    pub fn axes(&self) -> (f32, f32) {
        (self.move_x.signum() as f32, self.move_y.signum() as f32)
    }
}

/// Advance the game state by `dt` seconds. Non-positive or non-finite `dt` is a no-op.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut R) {
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {}
        // Ship keeps drifting into the planet; nothing else moves
        GamePhase::Won => ease_ship_landing(state, dt),
        GamePhase::Landing => tick_landing(state, dt),
        GamePhase::Playing => tick_playing(state, input, dt, rng),
    }
}

fn tick_playing<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut R) {
    steer_ship(state, input, dt);
    update_gun(state, input.fire, dt);
    integrate_asteroids(&mut state.asteroids, dt);
    let bullet_speed = state.tuning.bullet_speed;
    integrate_bullets(&mut state.bullets, bullet_speed, dt);

    state.increment_distance(dt * state.tuning.distance_speed);
    if state.distance >= state.landing_distance() {
        begin_landing(state);
        return;
    }

    update_cooldown(state, dt);
    resolve_bullet_hits(state, rng);
    if let ShipImpact::Destroyed(_) = resolve_ship_hits(state) {
        return;
    }

    remove_out_of_bounds(state);
    update_spawner(state, dt, rng);
}

/// Enter the landing sequence: clear the field once and restart the landing clock
fn begin_landing(state: &mut GameState) {
    log::info!(
        "Landing sequence at {:.1} AU, score {}",
        state.distance,
        state.score
    );
    state.set_phase(GamePhase::Landing);
    state.timers.landing = 0.0;
    state.timers.landing_started = false;
    clear_field_once(state);
}

fn clear_field_once(state: &mut GameState) {
    if !state.timers.landing_started {
        state.timers.landing_started = true;
        state.clear_asteroids();
    }
}

fn tick_landing(state: &mut GameState, dt: f32) {
    // Covers a host forcing the phase without going through begin_landing
    clear_field_once(state);

    state.timers.landing += dt;
    let duration = state.tuning.landing_duration;
    let done = state.timers.landing >= duration - LANDING_EPSILON;
    let progress = if done {
        1.0
    } else {
        state.timers.landing / duration
    };
    state.set_landing_progress(progress);
    state.increment_distance(dt * state.tuning.landing_distance_speed);
    ease_ship_landing(state, dt);

    if done {
        log::info!("Landed! Final score {}", state.score);
        state.set_phase(GamePhase::Won);
    }
}
