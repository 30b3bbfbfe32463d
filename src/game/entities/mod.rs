pub mod item;
pub mod player;
