// src/game/states/playing.rs
// The running level. Each tick reads input, runs the simulation systems in a
// fixed order and reports how the level ends.

use legion::Entity;
use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

use crate::config::RulesConfig;
use crate::ecs::{Destroy, EntityStore, Item, PlayerStats, Position, Solid};
use crate::engine::input::{InputState, Key};
use crate::engine::presentation::{CUE_COUNT, DrawRequest, Presenter};
use crate::engine::state::{Screen, Transition};
use crate::error::Result;
use crate::game::animation::{Sprite, advance_animations};
use crate::game::dig::{progress_dig, start_dig};
use crate::game::entities::item::EFFECT_GOLD;
use crate::game::entities::player::{CLIP_IDLE, CLIP_WALK, spawn_player};
use crate::game::level::Level;
use crate::game::physics;
use crate::game::pickup::collect_items;
use crate::game::session::LevelSession;
use crate::game::states::hud::{Hud, HudSnapshot};
use crate::game::states::outcome::{GameOver, Success};
use crate::levels::LevelSource;

const TILE_SHEET: &str = "tiles";

pub struct Game {
    store: EntityStore,
    level: Level,
    player: Entity,
    rules: Rc<RulesConfig>,
    levels: Rc<dyn LevelSource>,
    session: LevelSession,
    time_remaining: u32,
    previous_score: i32,
    hud: Rc<Cell<HudSnapshot>>,
    hud_pushed: bool,
}

impl Game {
    pub fn new(
        level: Level,
        rules: Rc<RulesConfig>,
        levels: Rc<dyn LevelSource>,
        previous_score: i32,
        seed: u64,
    ) -> Self {
        let mut store = EntityStore::new();
        for rect in &level.solids {
            let wall = store.create();
            store.insert(wall, Position::at(rect.x, rect.y, rect.width, rect.height));
            store.insert(wall, Solid);
        }
        let player = spawn_player(&mut store, &level, &rules);

        let game = Self {
            store,
            level,
            player,
            time_remaining: rules.level_ticks(),
            rules,
            levels,
            session: LevelSession::new(seed),
            previous_score,
            hud: Rc::new(Cell::new(HudSnapshot::default())),
            hud_pushed: false,
        };
        game.publish_hud(0);
        game
    }

    // Load `reference` from `levels` and start it.
    pub fn load(
        reference: &str,
        rules: Rc<RulesConfig>,
        levels: Rc<dyn LevelSource>,
        previous_score: i32,
        seed: u64,
    ) -> Result<Self> {
        let level = levels.load(reference)?;
        Ok(Self::new(level, rules, levels, previous_score, seed))
    }

    pub fn with_time_remaining(mut self, ticks: u32) -> Self {
        self.time_remaining = ticks;
        self
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_stats(&self) -> PlayerStats {
        self.store
            .get::<PlayerStats>(self.player)
            .copied()
            .unwrap_or_default()
    }

    pub fn player_stats_mut(&mut self) -> Option<&mut PlayerStats> {
        self.store.get_mut::<PlayerStats>(self.player)
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn previous_score(&self) -> i32 {
        self.previous_score
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        self.hud.get()
    }

    fn publish_hud(&self, pulses: u32) {
        let stats = self.player_stats();
        self.hud.set(HudSnapshot {
            gold: stats.gold,
            gold_threshold: self.rules.gold_threshold,
            previous_score: self.previous_score,
            seconds_left: self.time_remaining / self.rules.ticks_per_second,
            pulses,
        });
    }

    // The level timer ran out: move on, win or lose.
    fn finish(&mut self) -> Transition {
        let gold = self.player_stats().gold;
        let score = gold + self.previous_score;
        if gold < self.rules.gold_threshold {
            tracing::info!(gold, threshold = self.rules.gold_threshold, "Game over");
            return Transition::Replace(Box::new(GameOver));
        }

        let Some(next) = self.level.next_level.clone() else {
            tracing::info!(score, "Game success");
            return Transition::Replace(Box::new(Success::new(score)));
        };

        tracing::info!(next = %next, score, "Loading next level");
        let seed = self.session.rng.r#gen::<u64>();
        match Game::load(&next, self.rules.clone(), self.levels.clone(), score, seed) {
            Ok(game) => Transition::Replace(Box::new(game)),
            Err(e) => {
                tracing::error!(next = %next, error = %e, "failed to load next level");
                Transition::Pop
            }
        }
    }

    // Countdown cue on whole seconds within the warning window.
    fn countdown_due(&self) -> bool {
        let tps = self.rules.ticks_per_second;
        self.time_remaining % tps == 0 && self.time_remaining / tps <= self.rules.warning_seconds
    }

    // Steer the player from held direction keys and pick idle or walk.
    fn walk(&mut self, input: &InputState) {
        let speed = self.rules.player_speed;
        let mut push = (0.0, 0.0);
        if input.is_held(Key::Up) {
            push.1 += speed;
        }
        if input.is_held(Key::Down) {
            push.1 -= speed;
        }
        if input.is_held(Key::Left) {
            push.0 -= speed;
        }
        if input.is_held(Key::Right) {
            push.0 += speed;
        }
        let walking = [Key::Up, Key::Down, Key::Left, Key::Right]
            .into_iter()
            .any(|k| input.is_held(k));

        if let Some(pos) = self.store.get_mut::<Position>(self.player) {
            pos.velocity.x += push.0;
            pos.velocity.y += push.1;
        }
        if let Some(sprite) = self.store.get_mut::<Sprite>(self.player) {
            sprite.play(if walking { CLIP_WALK } else { CLIP_IDLE });
        }
    }

    fn interact(&mut self, input: &InputState, presenter: &mut dyn Presenter) {
        if self.player_stats().is_digging() {
            progress_dig(
                &mut self.store,
                self.player,
                &mut self.level,
                &self.rules,
                &mut self.session,
                presenter,
            );
            return;
        }
        self.walk(input);
        if input.was_pressed(Key::Action) {
            start_dig(&mut self.store, self.player, &self.level, &self.rules);
        }
    }
}

impl Screen for Game {
    fn tick(&mut self, input: &InputState, presenter: &mut dyn Presenter) -> Transition {
        if input.was_pressed(Key::Cancel) {
            tracing::info!(level = %self.level.name, "level abandoned");
            return Transition::Pop;
        }

        if self.time_remaining == 0 {
            return Transition::Pop;
        }
        self.time_remaining -= 1;
        if self.time_remaining == 0 {
            return self.finish();
        }

        let mut pulses = self.hud.get().pulses;
        if self.countdown_due() {
            presenter.play_cue(CUE_COUNT);
            pulses += 1;
        }

        advance_animations(&mut self.store);
        self.interact(input, presenter);
        physics::step(&mut self.store);
        collect_items(&mut self.store, self.player);
        self.store.purge::<Destroy>();

        self.publish_hud(pulses);

        if !self.hud_pushed {
            self.hud_pushed = true;
            return Transition::Push(Box::new(Hud::new(self.hud.clone())));
        }
        Transition::None
    }

    fn draw(&self, presenter: &mut dyn Presenter) {
        let ts = self.rules.tile_size;
        if let Some(pos) = self.store.get::<Position>(self.player) {
            presenter.draw(DrawRequest::Camera {
                x: pos.position.x.trunc(),
                y: pos.position.y.trunc() + 6.0,
            });
        }

        for row in 0..self.level.height() {
            for col in 0..self.level.width() {
                let Some(tile) = self.level.tile_at(row, col) else {
                    continue;
                };
                presenter.draw(DrawRequest::Sprite {
                    sheet: TILE_SHEET.to_string(),
                    region: (u32::from(tile / 16), u32::from(tile % 16)),
                    x: (col as f64 * ts) as i64,
                    y: (row as f64 * ts) as i64,
                    scale: 1.0,
                });
            }
        }

        for entity in self.store.query::<(Sprite, Position)>() {
            let (Some(sprite), Some(pos)) = (
                self.store.get::<Sprite>(entity),
                self.store.get::<Position>(entity),
            ) else {
                continue;
            };
            let Some(clip) = sprite.shown() else {
                continue;
            };
            let Some(region) = clip.region() else {
                continue;
            };
            let mut scale = clip.scale;
            if let Some(item) = self.store.get::<Item>(entity) {
                if item.effect == EFFECT_GOLD && self.rules.item_size > 0.0 {
                    scale *= pos.size.x / self.rules.item_size;
                }
            }
            presenter.draw(DrawRequest::Sprite {
                sheet: clip.sheet().to_string(),
                region,
                x: pos.position.x as i64,
                y: pos.position.y as i64,
                scale,
            });
        }
    }

    fn is_opaque(&self) -> bool {
        true
    }

    fn is_tunnel(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "game"
    }
}
