pub mod components;
pub mod store;

pub use components::{Collision, Destroy, Item, PlayerStats, Position, Solid, Spawned};
pub use store::{ComponentSet, EntityStore};
