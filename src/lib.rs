//! Simulation core of a tile-digging arcade game: an entity store, the
//! per-tick systems (animation, digging, collision, pickup) and the screen
//! that drives them.

pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod game;
pub mod levels;

pub use config::RulesConfig;
pub use error::{GameError, Result};
pub use game::states::Game;
