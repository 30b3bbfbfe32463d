// src/game/states/outcome.rs
// Terminal screens shown when a run ends.

use crate::engine::input::{InputState, Key};
use crate::engine::presentation::{DrawRequest, Presenter};
use crate::engine::state::{Screen, Transition};

fn dismissed(input: &InputState) -> bool {
    input.was_pressed(Key::Action) || input.was_pressed(Key::Cancel)
}

// Every level cleared.
pub struct Success {
    score: i32,
}

impl Success {
    pub fn new(score: i32) -> Self {
        Self { score }
    }

    pub fn score(&self) -> i32 {
        self.score
    }
}

impl Screen for Success {
    fn tick(&mut self, input: &InputState, _presenter: &mut dyn Presenter) -> Transition {
        if dismissed(input) {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn draw(&self, presenter: &mut dyn Presenter) {
        presenter.draw(DrawRequest::Text {
            text: format!("You win! Score: {}", self.score),
            x: 0.0,
            y: 0.0,
            emphasis: true,
        });
    }

    fn is_opaque(&self) -> bool {
        true
    }

    fn is_tunnel(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "success"
    }
}

// Time ran out without enough gold.
#[derive(Default)]
pub struct GameOver;

impl Screen for GameOver {
    fn tick(&mut self, input: &InputState, _presenter: &mut dyn Presenter) -> Transition {
        if dismissed(input) {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    fn draw(&self, presenter: &mut dyn Presenter) {
        presenter.draw(DrawRequest::Text {
            text: "Game over".into(),
            x: 0.0,
            y: 0.0,
            emphasis: true,
        });
    }

    fn is_opaque(&self) -> bool {
        true
    }

    fn is_tunnel(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "game-over"
    }
}
