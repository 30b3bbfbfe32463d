// src/game/dig.rs
// The dig action: a timed state on the player that carves out the tile
// under it and digs up whatever was buried there.

use legion::Entity;

use crate::config::RulesConfig;
use crate::ecs::{EntityStore, PlayerStats, Position};
use crate::engine::presentation::{CUE_DIG, Presenter};
use crate::game::animation::Sprite;
use crate::game::entities::item::spawn_item;
use crate::game::entities::player::{CLIP_DIG, CLIP_STAB};
use crate::game::level::Level;
use crate::game::session::LevelSession;

// A tile carved by a dig action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carve {
    pub row: usize,
    pub col: usize,
    pub item: Option<Entity>,
}

// Begin digging if `digger` is idle and stands over a tile that is not
// already empty. Returns true if a dig started.
pub fn start_dig(store: &mut EntityStore, digger: Entity, level: &Level, rules: &RulesConfig) -> bool {
    let Some(pos) = store.get::<Position>(digger).copied() else {
        return false;
    };
    match store.get::<PlayerStats>(digger) {
        Some(stats) if !stats.is_digging() => {}
        _ => return false,
    }
    let Some((row, col)) = level.cell_under(&pos, rules.tile_size) else {
        return false;
    };
    if level.tile_at(row, col) == Some(rules.empty_tile) {
        return false;
    }

    if let Some(stats) = store.get_mut::<PlayerStats>(digger) {
        stats.dig_time = rules.dig_duration;
        stats.carved = false;
    }
    if let Some(sprite) = store.get_mut::<Sprite>(digger) {
        sprite.restart(CLIP_DIG);
    }
    tracing::debug!(row, col, "dig started");
    true
}

// Advance a running dig by one tick. Once the remaining time drops below
// the carve threshold the tile is emptied and its item spawned; this
// happens at most once per dig.
pub fn progress_dig(
    store: &mut EntityStore,
    digger: Entity,
    level: &mut Level,
    rules: &RulesConfig,
    session: &mut LevelSession,
    presenter: &mut dyn Presenter,
) -> Option<Carve> {
    let stats = store.get_mut::<PlayerStats>(digger)?;
    if !stats.is_digging() {
        return None;
    }
    stats.dig_time -= 1;
    if stats.carved || stats.dig_time >= rules.carve_threshold {
        return None;
    }
    stats.carved = true;

    let pos = *store.get::<Position>(digger)?;
    let (row, col) = level.cell_under(&pos, rules.tile_size)?;
    if level.tile_at(row, col) == Some(rules.empty_tile) {
        return None;
    }

    level.set_tile(row, col, rules.empty_tile);
    presenter.play_cue(CUE_DIG);
    if let Some(sprite) = store.get_mut::<Sprite>(digger) {
        sprite.restart(CLIP_STAB);
    }

    let item = level.take_item(row, col).map(|descriptor| {
        let center = Level::cell_center(row, col, rules.tile_size);
        let entity = spawn_item(store, &descriptor, center, rules, &mut session.rng);
        session.items_dug += 1;
        tracing::debug!(row, col, effect = %descriptor.name, param = descriptor.param, "dug up item");
        entity
    });

    Some(Carve { row, col, item })
}
