// src/engine/state.rs
use std::fmt;

use super::input::InputState;
use super::presentation::Presenter;

// Screen trait defines what every screen on the stack must implement
pub trait Screen {
    // Advance one tick and report how the stack should change.
    fn tick(&mut self, input: &InputState, presenter: &mut dyn Presenter) -> Transition;

    fn draw(&self, presenter: &mut dyn Presenter);

    // An opaque screen hides everything below it.
    fn is_opaque(&self) -> bool;

    // A tunnel screen lets the screen below it tick as well.
    fn is_tunnel(&self) -> bool;

    fn name(&self) -> &str;
}

// Stack change requested by a screen. A screen's `Pop` or `Replace` also
// removes every screen above it.
pub enum Transition {
    None,
    Push(Box<dyn Screen>),
    Pop,
    Replace(Box<dyn Screen>),
}

impl Transition {
    pub fn is_none(&self) -> bool {
        matches!(self, Transition::None)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => f.write_str("None"),
            Transition::Push(s) => write!(f, "Push({})", s.name()),
            Transition::Pop => f.write_str("Pop"),
            Transition::Replace(s) => write!(f, "Replace({})", s.name()),
        }
    }
}

// ScreenStack owns the screens and applies their transitions
#[derive(Default)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
}

impl ScreenStack {
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
        }
    }

    pub fn push(&mut self, screen: Box<dyn Screen>) {
        tracing::debug!(screen = screen.name(), "push");
        self.screens.push(screen);
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn top(&self) -> Option<&dyn Screen> {
        self.screens.last().map(|s| s.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.screens.iter().map(|s| s.name()).collect()
    }

    // Tick the top screen, and the ones below it for as long as each ticked
    // screen is a tunnel. Returns false once the stack is empty.
    pub fn tick(&mut self, input: &InputState, presenter: &mut dyn Presenter) -> bool {
        let mut results = Vec::new();
        for index in (0..self.screens.len()).rev() {
            let transition = self.screens[index].tick(input, presenter);
            results.push((index, transition));
            if !self.screens[index].is_tunnel() {
                break;
            }
        }

        // Lower screens first: their pops discard whatever the screens above requested.
        results.reverse();
        for (index, transition) in results {
            if index >= self.screens.len() {
                continue;
            }
            match transition {
                Transition::None => {}
                Transition::Push(screen) => self.push(screen),
                Transition::Pop => {
                    tracing::debug!(screen = self.screens[index].name(), "pop");
                    self.screens.truncate(index);
                }
                Transition::Replace(screen) => {
                    tracing::debug!(
                        from = self.screens[index].name(),
                        to = screen.name(),
                        "replace"
                    );
                    self.screens.truncate(index);
                    self.screens.push(screen);
                }
            }
        }
        !self.screens.is_empty()
    }

    // Draw from the topmost opaque screen upwards.
    pub fn draw(&self, presenter: &mut dyn Presenter) {
        let start = self
            .screens
            .iter()
            .rposition(|s| s.is_opaque())
            .unwrap_or(0);
        for screen in &self.screens[start..] {
            screen.draw(presenter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::presentation::{DrawRequest, RecordingPresenter};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Script = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        opaque: bool,
        tunnel: bool,
        log: Script,
        next: Option<Transition>,
    }

    impl Probe {
        fn boxed(name: &'static str, opaque: bool, tunnel: bool, log: &Script) -> Box<Self> {
            Box::new(Self {
                name,
                opaque,
                tunnel,
                log: log.clone(),
                next: None,
            })
        }

        fn then(mut self: Box<Self>, t: Transition) -> Box<Self> {
            self.next = Some(t);
            self
        }
    }

    impl Screen for Probe {
        fn tick(&mut self, _: &InputState, _: &mut dyn Presenter) -> Transition {
            self.log.borrow_mut().push(format!("tick {}", self.name));
            self.next.take().unwrap_or(Transition::None)
        }

        fn draw(&self, presenter: &mut dyn Presenter) {
            presenter.draw(DrawRequest::Text {
                text: self.name.into(),
                x: 0.0,
                y: 0.0,
                emphasis: false,
            });
        }

        fn is_opaque(&self) -> bool {
            self.opaque
        }

        fn is_tunnel(&self) -> bool {
            self.tunnel
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn drawn(stack: &ScreenStack) -> Vec<String> {
        let mut p = RecordingPresenter::new();
        stack.draw(&mut p);
        p.draws
            .into_iter()
            .filter_map(|d| match d {
                DrawRequest::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn tunnel_screens_pass_ticks_down() {
        let log = Script::default();
        let mut stack = ScreenStack::new(Probe::boxed("game", true, false, &log));
        stack.push(Probe::boxed("hud", false, true, &log));
        stack.push(Probe::boxed("menu", true, false, &log));
        let mut p = RecordingPresenter::new();

        stack.tick(&InputState::new(), &mut p);
        assert_eq!(*log.borrow(), vec!["tick menu"]);

        log.borrow_mut().clear();
        stack.screens.pop();
        stack.tick(&InputState::new(), &mut p);
        assert_eq!(*log.borrow(), vec!["tick hud", "tick game"]);
    }

    #[test]
    fn pop_from_lower_screen_removes_overlays() {
        let log = Script::default();
        let mut stack = ScreenStack::new(Probe::boxed("game", true, false, &log).then(Transition::Pop));
        stack.push(Probe::boxed("hud", false, true, &log));
        let alive = stack.tick(&InputState::new(), &mut RecordingPresenter::new());
        assert!(!alive);
        assert!(stack.is_empty());
    }

    #[test]
    fn replace_swaps_the_screen_and_drops_overlays() {
        let log = Script::default();
        let next = Probe::boxed("next", true, false, &log);
        let mut stack = ScreenStack::new(Probe::boxed("menu", true, false, &log));
        stack.push(Probe::boxed("game", true, false, &log).then(Transition::Replace(next)));
        stack.push(Probe::boxed("hud", false, true, &log).then(Transition::Pop));
        stack.tick(&InputState::new(), &mut RecordingPresenter::new());
        assert_eq!(stack.names(), vec!["menu", "next"]);
    }

    #[test]
    fn push_lands_on_top() {
        let log = Script::default();
        let hud = Probe::boxed("hud", false, true, &log);
        let mut stack = ScreenStack::new(Probe::boxed("game", true, false, &log).then(Transition::Push(hud)));
        stack.tick(&InputState::new(), &mut RecordingPresenter::new());
        assert_eq!(stack.names(), vec!["game", "hud"]);
        assert_eq!(stack.top().map(|s| s.name()), Some("hud"));
    }

    #[test]
    fn draw_starts_at_topmost_opaque() {
        let log = Script::default();
        let mut stack = ScreenStack::new(Probe::boxed("menu", true, false, &log));
        stack.push(Probe::boxed("game", true, false, &log));
        stack.push(Probe::boxed("hud", false, true, &log));
        assert_eq!(drawn(&stack), vec!["game", "hud"]);
    }
}
