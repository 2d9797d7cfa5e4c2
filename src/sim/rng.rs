//! Random ranges and entity ids
//!
//! All randomness flows through an injected `Rng` so a seeded `Pcg32` replays
//! identically.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Uniform float in `[min, max)`. A degenerate range returns `min`.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Uniform float drawn from a `[min, max]` tuning pair
#[inline]
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, range: [f32; 2]) -> f32 {
    random_range(rng, range[0], range[1])
}

/// Opaque identifier for asteroids and bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj_{}", self.0)
    }
}

/// Monotonic id source. Never rewinds, so ids stay unique across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
