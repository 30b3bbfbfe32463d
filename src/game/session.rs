// src/game/session.rs
use rand::SeedableRng;
use rand::rngs::StdRng;

// Mutable per-level state shared by the interaction rules.
#[derive(Debug, Clone)]
pub struct LevelSession {
    pub rng: StdRng,
    // Items spawned by digging so far this level.
    pub items_dug: u32,
}

impl LevelSession {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            items_dug: 0,
        }
    }
}
