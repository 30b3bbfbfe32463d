pub mod loader;

pub use loader::{LevelData, LevelLoader, LevelSource};
