// src/game/pickup.rs
use legion::Entity;

use crate::ecs::{Destroy, EntityStore, Item, PlayerStats, Position};
use crate::game::entities::item::EFFECT_GOLD;

// An item collected this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub item: Entity,
    pub effect: String,
    pub param: i32,
}

// Apply an item's effect to `collector`. Returns false for effects this
// build does not know.
pub fn apply_effect(store: &mut EntityStore, collector: Entity, item: &Item) -> bool {
    match item.effect.as_str() {
        EFFECT_GOLD => {
            if let Some(stats) = store.get_mut::<PlayerStats>(collector) {
                stats.gold += item.param;
            }
            true
        }
        other => {
            tracing::warn!(effect = other, "item has no known effect");
            false
        }
    }
}

// Tick item cooldowns and let `collector` pick up every eligible item it
// overlaps. Collected items are marked `Destroy`.
//
// An item is eligible once its cooldown, read before this tick's
// decrement, is negative.
pub fn collect_items(store: &mut EntityStore, collector: Entity) -> Vec<Pickup> {
    let collector_box = store.get::<Position>(collector).copied();
    let mut picked = Vec::new();

    for entity in store.query::<(Position, Item)>() {
        if entity == collector || store.has::<Destroy>(entity) {
            continue;
        }
        let Some(item) = store.get_mut::<Item>(entity) else {
            continue;
        };
        let eligible = item.cooldown < 0;
        item.cooldown = item.cooldown.saturating_sub(1);
        if !eligible {
            continue;
        }

        let Some(collector_box) = collector_box else {
            continue;
        };
        let touching = store
            .get::<Position>(entity)
            .is_some_and(|pos| pos.overlaps(&collector_box));
        if !touching {
            continue;
        }

        let Some(item) = store.get::<Item>(entity).cloned() else {
            continue;
        };
        apply_effect(store, collector, &item);
        store.insert(entity, Destroy);
        tracing::debug!(effect = %item.effect, param = item.param, "picked up item");
        picked.push(Pickup {
            item: entity,
            effect: item.effect,
            param: item.param,
        });
    }
    picked
}
