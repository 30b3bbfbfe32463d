// src/game/entities/item.rs
use legion::Entity;
use rand::Rng;

use crate::config::RulesConfig;
use crate::ecs::{Collision, EntityStore, Item, Position};
use crate::game::animation::{Clip, Mode, Sprite};
use crate::game::level::ItemDescriptor;

pub const CLIP_ITEM: &str = "item";
pub const EFFECT_GOLD: &str = "gold";

const COIN_SHEET: &str = "coin";

fn coin_sprite() -> Sprite {
    let regions: Vec<(u32, u32)> = (0..8).map(|c| (0, c)).chain((1..7).map(|c| (1, c))).collect();
    let sequence: Vec<(usize, u32)> = (0..regions.len()).map(|i| (i, 6)).collect();
    Sprite::new(CLIP_ITEM).with_clip(
        CLIP_ITEM,
        Clip::new(COIN_SHEET, Mode::Loop)
            .regions(&regions)
            .sequence(&sequence)
            .scaled(0.5),
    )
}

// Box edge length for an item. Gold grows with its value.
pub fn item_size(descriptor: &ItemDescriptor, rules: &RulesConfig) -> f64 {
    if descriptor.name == EFFECT_GOLD {
        rules.item_size * f64::from(descriptor.param + 5) / 10.0
    } else {
        rules.item_size
    }
}

// Spawn a dug-up item at (x, y), tossed in a random direction.
pub fn spawn_item<R: Rng>(
    store: &mut EntityStore,
    descriptor: &ItemDescriptor,
    (x, y): (f64, f64),
    rules: &RulesConfig,
    rng: &mut R,
) -> Entity {
    let size = item_size(descriptor, rules).max(0.0);
    let mut pos = Position::at(x, y, size, size).with_motion(rules.item_friction, rules.item_bounce);
    if rules.item_scatter > 0.0 {
        pos.velocity.x = rules.item_scatter * rng.gen_range(-1.0..=1.0);
        pos.velocity.y = rules.item_scatter * rng.gen_range(-1.0..=1.0);
    }

    let item = store.create();
    store.insert(item, pos);
    store.insert(item, coin_sprite());
    store.insert(
        item,
        Item {
            effect: descriptor.name.clone(),
            param: descriptor.param,
            cooldown: rules.item_cooldown,
        },
    );
    store.insert(item, Collision);
    item
}
