//! Game state store and core simulation types
//!
//! [`GameState`] is the single source of truth a renderer reads between ticks.
//! Mutation only happens through `&mut GameState`, so a reader holding `&GameState`
//! always sees a fully applied tick.

use std::collections::VecDeque;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rng::{EntityId, IdAllocator, random_range};
use super::spawn::random_asteroid;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to accept the opening prompt
    Start,
    /// Flying through the asteroid field
    Playing,
    /// Scripted approach to the planet; no asteroids, no collisions
    Landing,
    /// Reached the planet
    Won,
    /// Ship destroyed with no shields left
    GameOver,
}

impl GamePhase {
    /// Terminal phases accept no further simulation
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver)
    }
}

/// Asteroid size tier. Discriminants are the tier numbers (3 = largest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidSize {
    /// Next tier down, or `None` for the smallest
    pub fn smaller(self) -> Option<Self> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    pub fn tier(self) -> u8 {
        self as u8
    }
}

/// An asteroid entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub size: AsteroidSize,
    pub position: Vec3,
    /// Fixed at spawn/split time
    pub velocity: Vec3,
}

/// A bullet entity, travelling at the tuned bullet speed along `direction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub position: Vec3,
    /// Unit vector
    pub direction: Vec3,
}

/// Presentation-only ship state; the position lives in `GameState::ship_position`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Visual scale; shrinks toward the planet during landing
    pub scale: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Undrained events beyond this are dropped oldest-first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Per-run timers owned by the tick loop (seconds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    /// Ship invulnerability after a shielded hit
    pub collision_cooldown: f32,
    /// Time since the last periodic spawn
    pub spawn: f32,
    /// Time spent in the landing phase
    pub landing: f32,
    /// One-shot guard so landing clears the field exactly once
    pub landing_started: bool,
    /// Time until the ship may fire again
    pub fire_cooldown: f32,
}

/// Things that happened during a tick, for audio/particle hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { id: EntityId },
    AsteroidSplit {
        id: EntityId,
        size: AsteroidSize,
        children: usize,
        points: u64,
    },
    /// Asteroid rammed by the ship and absorbed by a shield
    AsteroidDestroyed { id: EntityId },
    ShipHit { barriers_left: u8 },
    BarrierRegenerated { barriers: u8 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Shield charges, `0..=max_barriers`
    pub barriers: u8,
    pub score: u64,
    /// Travel progress (AU), never decreases within a run
    pub distance: f32,
    pub max_distance: f32,
    pub phase: GamePhase,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Steering, landing ease, the gun and the collision resolver all read this
    pub ship_position: Vec3,
    pub ship: Ship,
    /// Landing completion, `0..=1`
    pub landing_progress: f32,
    pub timers: Timers,
    /// Events raised since the host last drained them
    #[serde(skip)]
    events: VecDeque<GameEvent>,
    #[serde(skip)]
    pub tuning: Tuning,
    ids: IdAllocator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Fresh store in the `Start` phase
    pub fn new(tuning: Tuning) -> Self {
        Self {
            barriers: tuning.max_barriers,
            score: 0,
            distance: 0.0,
            max_distance: tuning.max_distance,
            phase: GamePhase::Start,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            ship_position: Vec3::ZERO,
            ship: Ship::default(),
            landing_progress: 0.0,
            timers: Timers::default(),
            events: VecDeque::new(),
            tuning,
            ids: IdAllocator::default(),
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    // --- scalar fields ---

    pub fn decrement_barrier(&mut self) {
        self.barriers = self.barriers.saturating_sub(1);
    }

    pub fn regenerate_barrier(&mut self) {
        self.barriers = self.barriers.saturating_add(1).min(self.tuning.max_barriers);
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Negative or non-finite deltas are ignored so distance stays monotonic
    pub fn increment_distance(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.distance += delta;
        }
    }

    /// Unconditional overwrite; callers enforce legal transitions
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase != self.phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.push_event(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
        }
        self.phase = phase;
    }

    /// Restore defaults for a new run. Goes straight to `Playing`; asteroids
    /// are re-seeded separately via [`GameState::spawn_initial_asteroids`].
    pub fn reset_game(&mut self) {
        self.barriers = self.tuning.max_barriers;
        self.score = 0;
        self.distance = 0.0;
        self.max_distance = self.tuning.max_distance;
        self.asteroids = Vec::new();
        self.bullets = Vec::new();
        self.ship = Ship::default();
        self.ship_position = Vec3::ZERO;
        self.landing_progress = 0.0;
        self.timers = Timers::default();
        self.events.clear();
        self.set_phase(GamePhase::Playing);
    }

    pub fn set_ship_position(&mut self, pos: Vec3) {
        self.ship_position = pos;
    }

    pub fn set_landing_progress(&mut self, progress: f32) {
        self.landing_progress = progress.clamp(0.0, 1.0);
    }

    // --- collections ---

    pub fn add_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    /// Remove by id; a missing id is a no-op
    pub fn remove_asteroid(&mut self, id: EntityId) -> Option<Asteroid> {
        let idx = self.asteroids.iter().position(|a| a.id == id)?;
        Some(self.asteroids.remove(idx))
    }

    /// Empties asteroids and bullets alike
    pub fn clear_asteroids(&mut self) {
        self.asteroids = Vec::new();
        self.bullets = Vec::new();
    }

    pub fn add_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn remove_bullet(&mut self, id: EntityId) -> Option<Bullet> {
        let idx = self.bullets.iter().position(|b| b.id == id)?;
        Some(self.bullets.remove(idx))
    }

    /// Replace the field with `initial_count` fresh large asteroids
    pub fn spawn_initial_asteroids<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = self.tuning.initial_count;
        let mut asteroids = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.next_entity_id();
            asteroids.push(random_asteroid(id, AsteroidSize::Large, &self.tuning, rng));
        }
        self.asteroids = asteroids;
        log::debug!("Seeded {} initial asteroids", count);
    }

    /// Destroy an asteroid, leaving two smaller children unless it was the
    /// smallest tier. Score is awarded either way. Returns `false` if the id
    /// is already gone.
    pub fn split_asteroid<R: Rng + ?Sized>(&mut self, id: EntityId, rng: &mut R) -> bool {
        let Some(parent) = self.remove_asteroid(id) else {
            return false;
        };

        let mut children = 0;
        if let Some(size) = parent.size.smaller() {
            let jitter = self.tuning.split_jitter;
            for side in [1.0, -1.0] {
                let child = Asteroid {
                    id: self.next_entity_id(),
                    size,
                    position: Vec3::new(
                        parent.position.x + side * self.tuning.split_offset,
                        parent.position.y + random_range(rng, -jitter, jitter),
                        parent.position.z,
                    ),
                    velocity: split_velocity(&self.tuning, rng),
                };
                self.asteroids.push(child);
                children += 1;
            }
        }

        let points = self.tuning.score_for(parent.size);
        self.add_score(points);
        log::debug!(
            "Split {} ({:?}) into {} children, +{} points",
            id,
            parent.size,
            children,
            points
        );
        self.push_event(GameEvent::AsteroidSplit {
            id,
            size: parent.size,
            children,
            points,
        });
        true
    }

    // --- read-outs ---

    /// Travel progress for the HUD, `0..=1`
    pub fn progress(&self) -> f32 {
        (self.distance / self.max_distance).min(1.0)
    }

    /// Distance at which the landing sequence begins
    pub fn landing_distance(&self) -> f32 {
        self.max_distance * self.tuning.landing_phase_ratio
    }

    /// Destination planet appears on screen past this point
    pub fn planet_visible(&self) -> bool {
        self.progress() > self.tuning.planet_visible_ratio
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Queue an event for the host
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events raised since the last drain, oldest first
    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

fn split_velocity<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Vec3 {
    use super::rng::random_in;
    Vec3::new(
        random_in(rng, tuning.split_vel_x),
        random_in(rng, tuning.split_vel_y),
        random_in(rng, tuning.split_vel_z),
    )
}
