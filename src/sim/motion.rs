//! Entity motion
//!
//! Pure linear integration: no drag, no gravity. Asteroids keep the velocity
//! they were born with; bullets fly at a fixed speed along their direction.

use glam::Vec3;

use super::rng::EntityId;
use super::state::{Asteroid, Bullet, GameEvent, GameState};
use super::tick::TickInput;
use crate::{clamp_lateral, ease_toward};

pub fn integrate_asteroids(asteroids: &mut [Asteroid], dt: f32) {
    for asteroid in asteroids {
        asteroid.position += asteroid.velocity * dt;
    }
}

pub fn integrate_bullets(bullets: &mut [Bullet], speed: f32, dt: f32) {
    for bullet in bullets {
        bullet.position += bullet.direction * speed * dt;
    }
}

/// Move the ship from held-key intent and clamp it to the flight rectangle.
/// Depth stays fixed during normal play.
pub fn steer_ship(state: &mut GameState, input: &TickInput, dt: f32) {
    let (move_x, move_y) = input.axes();
    let speed = state.tuning.ship_move_speed;
    let moved = state.ship_position + Vec3::new(move_x, move_y, 0.0) * speed * dt;
    let pos = clamp_lateral(moved, state.tuning.ship_bounds_x, state.tuning.ship_bounds_y);
    state.ship.scale = 1.0;
    state.set_ship_position(pos);
}

/// Landing approach: drift to the centre line, dive toward the planet and shrink
pub fn ease_ship_landing(state: &mut GameState, dt: f32) {
    use crate::consts::{
        LANDING_DEPTH, LANDING_EASE_DEPTH, LANDING_EASE_LATERAL, LANDING_MIN_SCALE,
    };

    let progress = state.landing_progress;
    let pos = state.ship_position;
    let eased = Vec3::new(
        ease_toward(pos.x, 0.0, LANDING_EASE_LATERAL, dt),
        ease_toward(pos.y, 0.0, LANDING_EASE_LATERAL, dt),
        ease_toward(pos.z, LANDING_DEPTH * progress, LANDING_EASE_DEPTH, dt),
    );
    state.ship.scale = (1.0 - progress * 0.9).max(LANDING_MIN_SCALE);
    state.set_ship_position(eased);
}

/// Fire a bullet if the trigger is held and the re-fire cooldown has elapsed
pub fn update_gun(state: &mut GameState, fire: bool, dt: f32) -> Option<EntityId> {
    state.timers.fire_cooldown = (state.timers.fire_cooldown - dt).max(0.0);
    if !fire || state.timers.fire_cooldown > 0.0 {
        return None;
    }

    let id = state.next_entity_id();
    let muzzle = state.ship_position - Vec3::Z * state.tuning.bullet_spawn_offset;
    state.add_bullet(Bullet {
        id,
        position: muzzle,
        direction: Vec3::NEG_Z,
    });
    state.timers.fire_cooldown = state.tuning.ship_fire_rate;
    state.push_event(GameEvent::BulletFired { id });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AsteroidSize;

    #[test]
    fn test_asteroid_linear_motion() {
        let mut state = GameState::default();
        let id = state.next_entity_id();
        let mut asteroids = vec![Asteroid {
            id,
            size: AsteroidSize::Large,
            position: Vec3::new(1.0, 2.0, -80.0),
            velocity: Vec3::new(-1.0, 0.5, 15.0),
        }];
        integrate_asteroids(&mut asteroids, 0.5);
        assert_eq!(asteroids[0].position, Vec3::new(0.5, 2.25, -72.5));
        assert_eq!(asteroids[0].velocity, Vec3::new(-1.0, 0.5, 15.0));
    }

    #[test]
    fn test_bullet_motion() {
        let mut state = GameState::default();
        let id = state.next_entity_id();
        let mut bullets = vec![Bullet {
            id,
            position: Vec3::new(0.0, 0.0, -1.5),
            direction: Vec3::NEG_Z,
        }];
        integrate_bullets(&mut bullets, 100.0, 0.1);
        assert!((bullets[0].position.z + 11.5).abs() < 1e-5);
    }

    #[test]
    fn test_ship_clamped_to_bounds() {
        let mut state = GameState::default();
        let input = TickInput {
            move_x: 1,
            move_y: -1,
            fire: false,
        };
        for _ in 0..120 {
            steer_ship(&mut state, &input, 1.0 / 60.0);
        }
        assert_eq!(state.ship_position, Vec3::new(14.0, -8.0, 0.0));
    }

    #[test]
    fn test_ship_intent_is_unit() {
        let mut state = GameState::default();
        let input = TickInput {
            move_x: 100,
            move_y: 0,
            fire: false,
        };
        steer_ship(&mut state, &input, 0.1);
        assert!((state.ship_position.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_gun_rate_limited() {
        let mut state = GameState::default();
        let dt = 1.0 / 60.0;
        let mut fired = 0;
        // One second of held trigger at 0.15s fire rate
        for _ in 0..60 {
            if update_gun(&mut state, true, dt).is_some() {
                fired += 1;
            }
        }
        assert!((6..=7).contains(&fired), "fired {fired}");
        assert_eq!(state.bullets.len(), fired);
        assert_eq!(state.bullets[0].position, Vec3::new(0.0, 0.0, -1.5));
        assert_eq!(state.bullets[0].direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_landing_ease_shrinks_and_centres() {
        let mut state = GameState::default();
        state.set_ship_position(Vec3::new(10.0, -6.0, 0.0));
        state.set_landing_progress(0.5);
        for _ in 0..60 {
            ease_ship_landing(&mut state, 1.0 / 60.0);
        }
        assert!(state.ship_position.x.abs() < 10.0 * 0.5);
        assert!(state.ship_position.z < 0.0);
        assert!((state.ship.scale - 0.55).abs() < 1e-5);
    }
}
