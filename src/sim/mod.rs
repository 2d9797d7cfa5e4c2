//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Stable iteration order (insertion order, hit sets ordered by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod game;
pub mod motion;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ShipImpact, find_bullet_hits, resolve_bullet_hits, resolve_ship_hits};
pub use game::{BarrierRegen, Game};
pub use rng::{EntityId, random_range};
pub use spawn::{SPAWN_SIZE_TABLE, random_asteroid};
pub use state::{Asteroid, AsteroidSize, Bullet, GameEvent, GamePhase, GameState, Ship, Timers};
pub use tick::{TickInput, tick};
