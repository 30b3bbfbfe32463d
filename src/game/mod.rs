pub mod animation;
pub mod dig;
pub mod entities;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod session;
pub mod states;
