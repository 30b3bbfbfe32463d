// src/engine/input.rs
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Action,
    Cancel,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Action,
        Key::Cancel,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn from_keycode(code: VirtualKeyCode) -> Option<Self> {
        match code {
            VirtualKeyCode::Up | VirtualKeyCode::W => Some(Key::Up),
            VirtualKeyCode::Down | VirtualKeyCode::S => Some(Key::Down),
            VirtualKeyCode::Left | VirtualKeyCode::A => Some(Key::Left),
            VirtualKeyCode::Right | VirtualKeyCode::D => Some(Key::Right),
            VirtualKeyCode::Space => Some(Key::Action),
            VirtualKeyCode::Escape => Some(Key::Cancel),
            _ => None,
        }
    }
}

// Key state for one tick: which keys are held, and which went down since
// the previous tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 6],
    pressed: [bool; 6],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    // Input with `keys` held down since an earlier tick.
    pub fn holding(keys: &[Key]) -> Self {
        let mut state = Self::new();
        for &key in keys {
            state.held[key.index()] = true;
        }
        state
    }

    // Input with `keys` pressed this tick.
    pub fn pressing(keys: &[Key]) -> Self {
        let mut state = Self::new();
        for &key in keys {
            state.press(key);
        }
        state
    }

    pub fn press(&mut self, key: Key) {
        if !self.held[key.index()] {
            self.pressed[key.index()] = true;
        }
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    // Forget edge presses once a tick has consumed them.
    pub fn end_tick(&mut self) {
        self.pressed = [false; 6];
    }

    // Feed a window event; returns true if it was a key we track
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(code),
                        ..
                    },
                ..
            } => {
                let Some(key) = Key::from_keycode(*code) else {
                    return false;
                };
                match state {
                    ElementState::Pressed => self.press(key),
                    ElementState::Released => self.release(key),
                }
                true
            }
            WindowEvent::Focused(false) => {
                for key in Key::ALL {
                    self.release(key);
                }
                false
            }
            _ => false,
        }
    }
}
