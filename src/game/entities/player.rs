// src/game/entities/player.rs
use legion::Entity;

use crate::config::RulesConfig;
use crate::ecs::{Collision, EntityStore, PlayerStats, Position};
use crate::game::animation::{Clip, Mode, Sprite};
use crate::game::level::Level;

pub const CLIP_IDLE: &str = "idle";
pub const CLIP_WALK: &str = "walk";
pub const CLIP_DIG: &str = "dig";
pub const CLIP_STAB: &str = "stab";

const PLAYER_SHEET: &str = "player";

// The player's clip set. Idle is the default clip.
pub fn player_sprite() -> Sprite {
    Sprite::new(CLIP_IDLE)
        .with_clip(
            CLIP_WALK,
            Clip::new(PLAYER_SHEET, Mode::Bounce)
                .regions(&[(2, 0), (2, 1), (2, 2)])
                .sequence(&[(0, 6), (1, 6), (2, 6)]),
        )
        .with_clip(
            CLIP_DIG,
            Clip::new(PLAYER_SHEET, Mode::Normal)
                .regions(&[(1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5)])
                .sequence(&[(0, 7), (1, 7), (2, 7), (3, 7), (4, 7), (5, 14)]),
        )
        .with_clip(
            CLIP_STAB,
            Clip::new(PLAYER_SHEET, Mode::Normal)
                .regions(&[(3, 0), (1, 5)])
                .sequence(&[(0, 7), (1, 14)]),
        )
        .with_clip(
            CLIP_IDLE,
            Clip::new(PLAYER_SHEET, Mode::Loop)
                .regions(&[(0, 0)])
                .sequence(&[(0, 1)]),
        )
}

// Where the player starts: the middle of the level.
pub fn spawn_point(level: &Level, rules: &RulesConfig) -> (f64, f64) {
    let half = rules.tile_size / 2.0;
    (
        level.width() as f64 * half - half,
        level.height() as f64 * half - half,
    )
}

// Create the player at the level's spawn point.
pub fn spawn_player(store: &mut EntityStore, level: &Level, rules: &RulesConfig) -> Entity {
    let (x, y) = spawn_point(level, rules);
    let player = store.create();
    store.insert(
        player,
        Position::at(x, y, rules.player_size, rules.player_size)
            .with_motion(rules.player_friction, rules.player_bounce),
    );
    store.insert(player, player_sprite());
    store.insert(player, Collision);
    store.insert(player, PlayerStats::default());
    player
}
