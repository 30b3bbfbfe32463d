// src/game/physics.rs
// Collision response against solids and velocity integration.
//
// Runs in two phases. First every colliding body sums the pushes from all
// solids it overlaps into its `correction`, measured against positions as
// they stood at the start of the pass. Then every body integrates once.
// No body's response depends on the order bodies or solids are visited.

use legion::Entity;
use nalgebra as na;

use crate::ecs::{Collision, EntityStore, Position, Solid};

// Push that moves `body` out of `solid` along the axis of least
// penetration. Zero when the boxes do not overlap. Equal depths push
// horizontally; coincident centers push towards positive x or y.
pub fn push_out(body: &Position, solid: &Position) -> na::Vector2<f64> {
    let depth = body.penetration(solid);
    if depth.x <= 0.0 || depth.y <= 0.0 {
        return na::Vector2::zeros();
    }
    if depth.x <= depth.y {
        let dir = if body.position.x < solid.position.x { -1.0 } else { 1.0 };
        na::Vector2::new(dir * depth.x, 0.0)
    } else {
        let dir = if body.position.y < solid.position.y { -1.0 } else { 1.0 };
        na::Vector2::new(0.0, dir * depth.y)
    }
}

// Move by the current velocity, apply friction, then feed the tick's
// collision correction back as velocity.
pub fn integrate(body: &mut Position) {
    body.position += body.velocity;
    body.velocity *= 1.0 - body.friction;
    body.velocity += body.correction * body.bounce;
    body.correction = na::Vector2::zeros();
}

// Resolve collisions for every colliding body, then integrate every body.
pub fn step(store: &mut EntityStore) {
    let solids: Vec<(Entity, Position)> = store
        .query::<(Position, Solid)>()
        .into_iter()
        .filter_map(|e| store.get::<Position>(e).map(|p| (e, *p)))
        .collect();

    let bodies = store.query::<(Position,)>();

    let pushes: Vec<(Entity, na::Vector2<f64>)> = bodies
        .iter()
        .copied()
        .filter(|&e| store.has::<Collision>(e))
        .filter_map(|e| {
            let body = store.get::<Position>(e)?;
            let total = solids
                .iter()
                .filter(|(solid, _)| *solid != e)
                .fold(na::Vector2::zeros(), |acc, (_, solid)| {
                    acc + push_out(body, solid)
                });
            Some((e, total))
        })
        .collect();

    for (entity, push) in pushes {
        if let Some(body) = store.get_mut::<Position>(entity) {
            body.correction += push;
        }
    }

    for entity in bodies {
        if let Some(body) = store.get_mut::<Position>(entity) {
            integrate(body);
        }
    }
}
