// src/game/states/hud.rs
use std::cell::Cell;
use std::rc::Rc;

use crate::engine::input::InputState;
use crate::engine::presentation::{DrawRequest, Presenter};
use crate::engine::state::{Screen, Transition};

// Ticks the counter stays highlighted after a countdown pulse.
const PULSE_TICKS: u32 = 20;

// What the HUD shows, published by the level every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudSnapshot {
    pub gold: i32,
    pub gold_threshold: i32,
    pub previous_score: i32,
    pub seconds_left: u32,
    // Countdown pulses fired so far.
    pub pulses: u32,
}

// Overlay drawn above a running level. Lets ticks through to the level.
pub struct Hud {
    shared: Rc<Cell<HudSnapshot>>,
    seen_pulses: u32,
    highlight: u32,
}

impl Hud {
    pub fn new(shared: Rc<Cell<HudSnapshot>>) -> Self {
        let seen_pulses = shared.get().pulses;
        Self {
            shared,
            seen_pulses,
            highlight: 0,
        }
    }

    // A pulse published since the last tick counts too; the HUD ticks
    // before the level below it.
    pub fn is_highlighted(&self) -> bool {
        self.highlight > 0 || self.shared.get().pulses != self.seen_pulses
    }
}

impl Screen for Hud {
    fn tick(&mut self, _input: &InputState, _presenter: &mut dyn Presenter) -> Transition {
        let snapshot = self.shared.get();
        if snapshot.pulses != self.seen_pulses {
            self.seen_pulses = snapshot.pulses;
            self.highlight = PULSE_TICKS;
        } else {
            self.highlight = self.highlight.saturating_sub(1);
        }
        Transition::None
    }

    fn draw(&self, presenter: &mut dyn Presenter) {
        let snapshot = self.shared.get();
        presenter.draw(DrawRequest::Text {
            text: format!("Gold {} / {}", snapshot.gold, snapshot.gold_threshold),
            x: 8.0,
            y: 8.0,
            emphasis: snapshot.gold >= snapshot.gold_threshold,
        });
        presenter.draw(DrawRequest::Text {
            text: format!("Time {}", snapshot.seconds_left),
            x: 8.0,
            y: 24.0,
            emphasis: self.is_highlighted(),
        });
        if snapshot.previous_score > 0 {
            presenter.draw(DrawRequest::Text {
                text: format!("Score {}", snapshot.previous_score),
                x: 8.0,
                y: 40.0,
                emphasis: false,
            });
        }
    }

    fn is_opaque(&self) -> bool {
        false
    }

    fn is_tunnel(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "hud"
    }
}
