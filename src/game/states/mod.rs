pub mod hud;
pub mod outcome;
pub mod playing;

pub use playing::Game;
