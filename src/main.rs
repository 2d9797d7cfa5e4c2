//! Planetfall entry point
//!
//! Native builds fly a headless autopilot through one complete run and print a
//! JSON summary; handy for balance checks. The browser build is driven from JS
//! through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use planetfall::sim::{Game, GameEvent, GamePhase, GameState, TickInput};
    use planetfall::{GameError, Tuning};
    use serde::Serialize;

    /// 60 Hz frame pacing
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 600;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        phase: GamePhase,
        score: u64,
        distance: f32,
        barriers: u8,
        frames: u32,
        shots: u32,
        splits: u32,
        ship_hits: u32,
    }

    /// Steer under the nearest rock ahead and keep the trigger held; sidestep
    /// anything about to reach the ship.
    fn autopilot(state: &GameState) -> TickInput {
        let ship = state.ship_position;
        let axis = |delta: f32| -> i8 {
            if delta > 0.3 {
                1
            } else if delta < -0.3 {
                -1
            } else {
                0
            }
        };

        let threat = state
            .asteroids
            .iter()
            .filter(|a| a.position.z > ship.z - 12.0 && a.position.z < ship.z + 2.0)
            .find(|a| (a.position.truncate() - ship.truncate()).length() < 4.5);
        if let Some(rock) = threat {
            return TickInput {
                move_x: if rock.position.x > ship.x { -1 } else { 1 },
                move_y: if rock.position.y > ship.y { -1 } else { 1 },
                fire: true,
            };
        }

        let target = state
            .asteroids
            .iter()
            .filter(|a| a.position.z < ship.z - 12.0)
            .max_by(|a, b| a.position.z.total_cmp(&b.position.z));
        match target {
            Some(rock) => TickInput {
                move_x: axis(rock.position.x - ship.x),
                move_y: axis(rock.position.y - ship.y),
                fire: true,
            },
            None => TickInput {
                fire: true,
                ..Default::default()
            },
        }
    }

    fn load_tuning() -> Result<Tuning, GameError> {
        match std::env::var("PLANETFALL_TUNING") {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| GameError::TuningParse(format!("{path}: {e}")))?;
                Tuning::from_json(&json)
            }
            Err(_) => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), GameError> {
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(planetfall::platform::clock_seed);

        let mut game = Game::with_tuning(seed, load_tuning()?)?;
        game.start()?;

        let mut summary = RunSummary {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            distance: 0.0,
            barriers: 0,
            frames: 0,
            shots: 0,
            splits: 0,
            ship_hits: 0,
        };
        let mut clock_ms = 0.0;

        while !game.state().is_over() && summary.frames < MAX_FRAMES {
            let input = autopilot(game.state());
            game.set_input(input);
            game.advance(FRAME_DT);
            clock_ms += f64::from(FRAME_DT) * 1000.0;
            game.poll_barrier_regen(clock_ms);
            summary.frames += 1;

            for event in game.drain_events() {
                match event {
                    GameEvent::BulletFired { .. } => summary.shots += 1,
                    GameEvent::AsteroidSplit { .. } => summary.splits += 1,
                    GameEvent::ShipHit { .. } => summary.ship_hits += 1,
                    _ => {}
                }
            }
        }

        let state = game.state();
        summary.phase = state.phase;
        summary.score = state.score;
        summary.distance = state.distance;
        summary.barriers = state.barriers;
        log::info!(
            "Run finished: {:?} after {} frames, score {}",
            summary.phase,
            summary.frames,
            summary.score
        );

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {e}"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Planetfall (native headless) starting...");

    if let Err(e) = headless::run() {
        eprintln!("planetfall: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
