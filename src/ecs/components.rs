// src/ecs/components.rs
use nalgebra as na;

pub use crate::game::animation::Sprite;

// Insertion sequence number, attached to every entity by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Spawned(pub u64);

// Position, velocity and box of an entity. The box is centered on `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub position: na::Vector2<f64>,
    pub velocity: na::Vector2<f64>,
    // Collision push accumulated during the current tick.
    pub correction: na::Vector2<f64>,
    pub size: na::Vector2<f64>,
    // Fraction of velocity lost per tick, in [0, 1].
    pub friction: f64,
    // Fraction of the accumulated correction fed back into velocity.
    pub bounce: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            position: na::Vector2::zeros(),
            velocity: na::Vector2::zeros(),
            correction: na::Vector2::zeros(),
            size: na::Vector2::zeros(),
            friction: 0.0,
            bounce: 1.0,
        }
    }
}

impl Position {
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: na::Vector2::new(x, y),
            size: na::Vector2::new(width.max(0.0), height.max(0.0)),
            ..Self::default()
        }
    }

    pub fn with_motion(mut self, friction: f64, bounce: f64) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self.bounce = bounce;
        self
    }

    pub fn half_extents(&self) -> na::Vector2<f64> {
        self.size * 0.5
    }

    // Strict box overlap: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Position) -> bool {
        let reach = self.half_extents() + other.half_extents();
        let gap = self.position - other.position;
        gap.x.abs() < reach.x && gap.y.abs() < reach.y
    }

    // Signed overlap depth on each axis; positive on both axes means the boxes overlap.
    pub fn penetration(&self, other: &Position) -> na::Vector2<f64> {
        let reach = self.half_extents() + other.half_extents();
        let gap = self.position - other.position;
        na::Vector2::new(reach.x - gap.x.abs(), reach.y - gap.y.abs())
    }
}

// Marker: displaced by solids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collision;

// Marker: displaces colliding entities, never displaced itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solid;

// Marker: removed at the end of the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Destroy;

// A pickup waiting on the ground.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub effect: String,
    pub param: i32,
    // Ticks left before the item can be collected; collectible once negative.
    pub cooldown: i32,
}

// Player stats component
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerStats {
    pub gold: i32,
    // Ticks left in the current dig action, 0 when idle.
    pub dig_time: u32,
    // Set once the current dig action has carved its tile.
    pub carved: bool,
}

impl PlayerStats {
    pub fn is_digging(&self) -> bool {
        self.dig_time > 0
    }
}
