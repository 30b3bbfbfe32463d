// src/game/animation.rs
// Tick-driven sprite animation: clips, playback modes and the per-frame
// animation system.

use crate::ecs::EntityStore;

// What a clip does when it runs past its last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    // Stop on the last step and hold it.
    Normal,
    // Restart from the first step.
    Loop,
    // Play backwards to the first step, then forwards again. The end steps
    // are shown once per pass.
    Bounce,
}

// One entry of a clip's sequence: which region to show and for how many ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub frame: usize,
    pub hold: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    sheet: String,
    regions: Vec<(u32, u32)>,
    sequence: Vec<Step>,
    mode: Mode,
    pub scale: f64,
    step: usize,
    elapsed: u32,
    forward: bool,
}

impl Clip {
    pub fn new(sheet: impl Into<String>, mode: Mode) -> Self {
        Self {
            sheet: sheet.into(),
            regions: Vec::new(),
            sequence: Vec::new(),
            mode,
            scale: 1.0,
            step: 0,
            elapsed: 0,
            forward: true,
        }
    }

    // Sprite regions on the sheet as (row, column).
    pub fn regions(mut self, regions: &[(u32, u32)]) -> Self {
        self.regions = regions.to_vec();
        self
    }

    // Playback order as (region index, hold ticks).
    pub fn sequence(mut self, steps: &[(usize, u32)]) -> Self {
        self.sequence = steps
            .iter()
            .map(|&(frame, hold)| Step { frame, hold })
            .collect();
        self.reset();
        self
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    // Region index shown at the current step.
    pub fn frame(&self) -> Option<usize> {
        self.sequence.get(self.step).map(|s| s.frame)
    }

    // Sheet region shown at the current step.
    pub fn region(&self) -> Option<(u32, u32)> {
        self.frame().and_then(|f| self.regions.get(f).copied())
    }

    // True once a `Normal` clip sits on its last step.
    pub fn is_finished(&self) -> bool {
        self.mode == Mode::Normal && !self.sequence.is_empty() && self.step + 1 == self.sequence.len()
    }

    pub fn reset(&mut self) {
        self.step = 0;
        self.elapsed = 0;
        self.forward = true;
    }

    // Advance playback by one tick.
    pub fn tick(&mut self) {
        let Some(hold) = self.sequence.get(self.step).map(|s| s.hold) else {
            return;
        };
        self.elapsed += 1;
        if self.elapsed < hold {
            return;
        }
        self.elapsed = 0;
        self.step = self.next_step();
    }

    fn next_step(&mut self) -> usize {
        let last = self.sequence.len() - 1;
        match self.mode {
            Mode::Normal => (self.step + 1).min(last),
            Mode::Loop => {
                if self.step >= last {
                    0
                } else {
                    self.step + 1
                }
            }
            Mode::Bounce => {
                if last == 0 {
                    return 0;
                }
                if self.forward {
                    if self.step < last {
                        self.step + 1
                    } else {
                        self.forward = false;
                        self.step - 1
                    }
                } else if self.step > 0 {
                    self.step - 1
                } else {
                    self.forward = true;
                    1
                }
            }
        }
    }
}

// Named clips of one entity and which of them is playing.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    clips: Vec<(String, Clip)>,
    default_clip: String,
    current: Option<usize>,
}

impl Sprite {
    // `default_clip` is selected the first time the sprite ticks without
    // an explicit selection.
    pub fn new(default_clip: impl Into<String>) -> Self {
        Self {
            clips: Vec::new(),
            default_clip: default_clip.into(),
            current: None,
        }
    }

    pub fn with_clip(mut self, name: impl Into<String>, clip: Clip) -> Self {
        self.add_clip(name, clip);
        self
    }

    // Register a clip, replacing one of the same name.
    pub fn add_clip(&mut self, name: impl Into<String>, clip: Clip) {
        let name = name.into();
        match self.index_of(&name) {
            Some(i) => self.clips[i].1 = clip,
            None => self.clips.push((name, clip)),
        }
    }

    pub fn clip(&self, name: &str) -> Option<&Clip> {
        self.index_of(name).map(|i| &self.clips[i].1)
    }

    pub fn current(&self) -> Option<&Clip> {
        self.current.map(|i| &self.clips[i].1)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.map(|i| self.clips[i].0.as_str())
    }

    // Switch to `name`, restarting it from the first step. Selecting the
    // clip that is already playing leaves it running.
    pub fn play(&mut self, name: &str) -> bool {
        let Some(i) = self.index_of(name) else {
            return false;
        };
        if self.current != Some(i) {
            self.current = Some(i);
            self.clips[i].1.reset();
        }
        true
    }

    // Switch to `name` and restart it even if it is already playing.
    pub fn restart(&mut self, name: &str) -> bool {
        let Some(i) = self.index_of(name) else {
            return false;
        };
        self.current = Some(i);
        self.clips[i].1.reset();
        true
    }

    // Select the default clip if nothing is playing. Falls back to the first
    // registered clip when the default name is unknown.
    pub fn ensure_selected(&mut self) -> Option<&Clip> {
        if self.current.is_none() && !self.clips.is_empty() {
            let index = self.index_of(&self.default_clip).unwrap_or(0);
            self.current = Some(index);
            self.clips[index].1.reset();
        }
        self.current()
    }

    // The clip a renderer should show: the playing clip, or the one
    // `ensure_selected` would pick.
    pub fn shown(&self) -> Option<&Clip> {
        self.current().or_else(|| {
            self.index_of(&self.default_clip)
                .or((!self.clips.is_empty()).then_some(0))
                .map(|i| &self.clips[i].1)
        })
    }

    pub fn tick(&mut self) {
        self.ensure_selected();
        if let Some(i) = self.current {
            self.clips[i].1.tick();
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|(n, _)| n == name)
    }
}

// Advance the active clip of every sprite by one tick.
pub fn advance_animations(store: &mut EntityStore) {
    for entity in store.query::<(Sprite,)>() {
        if let Some(sprite) = store.get_mut::<Sprite>(entity) {
            sprite.tick();
        }
    }
}
