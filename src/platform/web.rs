//! JS-facing game handle
//!
//! The page owns the render loop: each animation frame it pushes held input,
//! calls `frame(dt)`, then reads the snapshot to draw meshes and the HUD.

use wasm_bindgen::prelude::*;

use super::now_ms;
use crate::sim::{Game, GamePhase, TickInput};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Planetfall core loaded");
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// New session; a zero seed picks one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        let seed = if seed > 0.0 { seed as u64 } else { super::clock_seed() };
        WebGame {
            game: Game::new(seed),
        }
    }

    /// New session with a JSON tuning override
    pub fn with_tuning(seed: f64, tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(js_err)?;
        let game = Game::with_tuning(seed as u64, tuning).map_err(js_err)?;
        Ok(WebGame { game })
    }

    pub fn set_input(&mut self, move_x: i8, move_y: i8, fire: bool) {
        self.game.set_input(TickInput {
            move_x,
            move_y,
            fire,
        });
    }

    /// Advance one animation frame (`dt` in seconds) and run shield regen
    pub fn frame(&mut self, dt: f32) -> u32 {
        let substeps = self.game.advance(dt);
        self.game.poll_barrier_regen(now_ms());
        substeps
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.game.start().map_err(js_err)
    }

    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.game.restart().map_err(js_err)
    }

    /// Full state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.game.snapshot_json().map_err(js_err)
    }

    /// Events since the last call, as a JSON array
    pub fn events(&mut self) -> Result<String, JsValue> {
        let events = self.game.drain_events();
        serde_json::to_string(&events).map_err(js_err)
    }

    pub fn phase(&self) -> String {
        match self.game.state().phase {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Landing => "landing",
            GamePhase::Won => "won",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.game.state().score as f64
    }

    pub fn barriers(&self) -> u8 {
        self.game.state().barriers
    }

    pub fn distance(&self) -> f32 {
        self.game.state().distance
    }

    pub fn progress(&self) -> f32 {
        self.game.state().progress()
    }

    pub fn landing_progress(&self) -> f32 {
        self.game.state().landing_progress
    }

    pub fn planet_visible(&self) -> bool {
        self.game.state().planet_visible()
    }
}
