//! Game session driver
//!
//! [`Game`] owns the state store, the seeded RNG, the player's held input and
//! the shield-regeneration clock. Hosts call [`Game::advance`] once per rendered
//! frame and read [`Game::state`] to draw.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEP_DT};
use crate::error::{Command, GameError};
use crate::tuning::Tuning;

/// Wall-clock shield regeneration, independent of frame delta
#[derive(Debug, Clone)]
pub struct BarrierRegen {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl BarrierRegen {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Number of whole periods elapsed since the last fire. The first poll
    /// only starts the clock.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return 0;
        };
        if now_ms < last {
            // Clock went backwards; restart the period
            self.last_ms = Some(now_ms);
            return 0;
        }
        let fires = ((now_ms - last) / self.interval_ms).floor() as u32;
        self.last_ms = Some(last + fires as f64 * self.interval_ms);
        fires
    }
}

/// One play session
pub struct Game {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    input: TickInput,
    regen: BarrierRegen,
}

impl Game {
    /// New session with default tuning, waiting at the start prompt
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, GameError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let regen = BarrierRegen::new(tuning.barrier_regen_interval_ms);
        let mut state = GameState::new(tuning);
        state.spawn_initial_asteroids(&mut rng);
        log::info!("New session with seed {}", seed);
        Self {
            state,
            rng,
            seed,
            input: TickInput::default(),
            regen,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct store access for hosts and tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> TickInput {
        self.input
    }

    /// Replace the held movement/fire intent used by subsequent frames
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Player accepted the opening prompt
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state.phase != GamePhase::Start {
            return Err(self.reject(Command::Start));
        }
        self.state.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Fresh run after winning, losing, or abandoning the landing
    pub fn restart(&mut self) -> Result<(), GameError> {
        match self.state.phase {
            GamePhase::Won | GamePhase::GameOver | GamePhase::Landing => {
                self.state.reset_game();
                self.state.spawn_initial_asteroids(&mut self.rng);
                self.input = TickInput::default();
                log::info!("Restarted run");
                Ok(())
            }
            _ => Err(self.reject(Command::Restart)),
        }
    }

    fn reject(&self, command: Command) -> GameError {
        log::warn!("Rejected {} in {:?} phase", command, self.state.phase);
        GameError::InvalidTransition {
            from: self.state.phase,
            command,
        }
    }

    /// Advance by one rendered frame. Oversized deltas are clamped and the
    /// frame is split into short substeps so fast bullets cannot skip past an
    /// asteroid. Returns the number of substeps run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !(frame_dt.is_finite() && frame_dt > 0.0) {
            return 0;
        }
        let dt = if frame_dt > MAX_FRAME_DT {
            log::warn!("Frame delta {:.3}s clamped to {:.3}s", frame_dt, MAX_FRAME_DT);
            MAX_FRAME_DT
        } else {
            frame_dt
        };

        let substeps = (dt / MAX_SUBSTEP_DT).ceil().max(1.0) as u32;
        let step = dt / substeps as f32;
        for _ in 0..substeps {
            tick(&mut self.state, &self.input, step, &mut self.rng);
        }
        substeps
    }

    /// Feed the wall clock to the shield regenerator. Returns charges restored.
    pub fn poll_barrier_regen(&mut self, now_ms: f64) -> u32 {
        let fires = self.regen.poll(now_ms);
        let mut restored = 0;
        for _ in 0..fires {
            if self.state.phase != GamePhase::Playing
                || self.state.barriers >= self.state.tuning.max_barriers
            {
                continue;
            }
            self.state.regenerate_barrier();
            self.state.push_event(GameEvent::BarrierRegenerated {
                barriers: self.state.barriers,
            });
            restored += 1;
        }
        restored
    }

    /// Events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Whole-state snapshot for hosts that cross a serialization boundary
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidSize};
    use glam::Vec3;

    fn quiet_game(seed: u64) -> Game {
        let tuning = Tuning {
            spawn_interval_base: 1.0e9,
            spawn_interval_min: 1.0e9,
            ..Tuning::default()
        };
        Game::with_tuning(seed, tuning).unwrap()
    }

    #[test]
    fn test_new_session_waits_at_start() {
        let mut game = Game::new(1);
        assert_eq!(game.state().phase, GamePhase::Start);
        assert_eq!(game.state().asteroids.len(), 15);

        let before = game.state().asteroids.clone();
        game.advance(0.05);
        assert_eq!(game.state().asteroids, before);
    }

    #[test]
    fn test_start_only_from_start() {
        let mut game = Game::new(2);
        assert!(game.start().is_ok());
        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(
            game.start(),
            Err(GameError::InvalidTransition {
                from: GamePhase::Playing,
                command: Command::Start
            })
        );
    }

    #[test]
    fn test_restart_rejected_while_playing() {
        let mut game = Game::new(3);
        assert!(game.restart().is_err());
        game.start().unwrap();
        assert!(game.restart().is_err());
    }

    #[test]
    fn test_restart_after_gameover() {
        let mut game = Game::new(4);
        game.start().unwrap();
        {
            let state = game.state_mut();
            state.add_score(775);
            state.increment_distance(123.0);
            state.barriers = 0;
            state.set_phase(GamePhase::GameOver);
        }

        game.restart().unwrap();
        let state = game.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.barriers, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), crate::consts::ASTEROID_INITIAL_COUNT);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    }

    #[test]
    fn test_restart_mid_landing() {
        let mut game = quiet_game(11);
        game.start().unwrap();
        game.state_mut().set_phase(GamePhase::Landing);
        game.advance(0.05);
        assert_eq!(game.state().phase, GamePhase::Landing);
        assert!(game.state().timers.landing_started);
        assert!(game.state().landing_progress > 0.0);

        game.restart().unwrap();
        let state = game.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.timers.landing_started);
        assert_eq!(state.timers.landing, 0.0);
        assert_eq!(state.landing_progress, 0.0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.asteroids.len(), crate::consts::ASTEROID_INITIAL_COUNT);
    }

    #[test]
    fn test_restart_after_win() {
        let mut game = quiet_game(12);
        game.start().unwrap();
        game.state_mut().set_phase(GamePhase::Landing);
        for _ in 0..50 {
            game.advance(0.1);
        }
        assert_eq!(game.state().phase, GamePhase::Won);
        assert!(game.state().timers.landing_started);
        assert!(game.state().ship.scale < 1.0);

        game.restart().unwrap();
        let state = game.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.timers.landing_started);
        assert_eq!(state.landing_progress, 0.0);
        assert_eq!(state.ship.scale, 1.0);
        assert_eq!(state.ship_position, Vec3::ZERO);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_game_clears_field() {
        let mut game = Game::new(5);
        game.state_mut().set_phase(GamePhase::Won);
        game.state_mut().reset_game();
        assert!(game.state().asteroids.is_empty());
        assert!(game.state().bullets.is_empty());
    }

    #[test]
    fn test_advance_clamps_stalled_frame() {
        let mut game = quiet_game(6);
        game.start().unwrap();
        game.state_mut().clear_asteroids();

        let substeps = game.advance(5.0);
        assert!((12..=13).contains(&substeps));
        // Clamped to 0.1s at 10 AU/s
        assert!((game.state().distance - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_advance_ignores_bad_delta() {
        let mut game = quiet_game(7);
        game.start().unwrap();
        assert_eq!(game.advance(0.0), 0);
        assert_eq!(game.advance(-1.0), 0);
        assert_eq!(game.advance(f32::NAN), 0);
        assert_eq!(game.state().distance, 0.0);
    }

    #[test]
    fn test_fast_bullets_do_not_tunnel() {
        let mut game = quiet_game(8);
        game.start().unwrap();
        let state = game.state_mut();
        state.clear_asteroids();
        let id = state.next_entity_id();
        state.add_asteroid(Asteroid {
            id,
            size: AsteroidSize::Small,
            position: Vec3::new(0.0, 0.0, -20.0),
            velocity: Vec3::ZERO,
        });

        game.set_input(TickInput {
            fire: true,
            ..Default::default()
        });
        // 10 units of bullet travel per frame, far more than the 2.2 hit window
        for _ in 0..3 {
            game.advance(0.1);
        }
        assert_eq!(game.state().score, 100);
        assert!(game.state().asteroids.is_empty());
    }

    #[test]
    fn test_regen_clock_periods() {
        let mut regen = BarrierRegen::new(10_000.0);
        assert_eq!(regen.poll(1_000.0), 0);
        assert_eq!(regen.poll(10_999.0), 0);
        assert_eq!(regen.poll(11_000.0), 1);
        assert_eq!(regen.poll(41_500.0), 3);
        assert_eq!(regen.poll(500.0), 0);
    }

    #[test]
    fn test_barrier_regen_only_while_playing() {
        let mut game = Game::new(9);
        game.state_mut().barriers = 1;
        game.poll_barrier_regen(0.0);
        assert_eq!(game.poll_barrier_regen(10_000.0), 0);
        assert_eq!(game.state().barriers, 1);

        game.start().unwrap();
        assert_eq!(game.poll_barrier_regen(20_000.0), 1);
        assert_eq!(game.state().barriers, 2);

        // Capped at max
        assert_eq!(game.poll_barrier_regen(60_000.0), 1);
        assert_eq!(game.state().barriers, 3);
        assert!(game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::BarrierRegenerated { barriers: 3 })));
    }

    #[test]
    fn test_snapshot_round_trips_scalars() {
        let mut game = Game::new(10);
        game.start().unwrap();
        game.advance(1.0 / 60.0);
        let json = game.snapshot_json().unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase, GamePhase::Playing);
        assert_eq!(restored.asteroids.len(), game.state().asteroids.len());
        assert_eq!(restored.distance, game.state().distance);
    }
}
