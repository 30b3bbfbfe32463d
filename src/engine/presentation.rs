// src/engine/presentation.rs
// Outbound side of the simulation: draw requests and sound cues. The
// renderer and audio device behind a `Presenter` live outside this crate.

// Sound cue played when a tile is carved.
pub const CUE_DIG: &str = "dig";
// Sound cue played each second of the final countdown.
pub const CUE_COUNT: &str = "count";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawRequest {
    // Center the view on a world position.
    Camera { x: f64, y: f64 },
    // One region of a spritesheet, positioned in world space.
    Sprite {
        sheet: String,
        region: (u32, u32),
        x: i64,
        y: i64,
        scale: f64,
    },
    // Overlay text in screen space.
    Text { text: String, x: f32, y: f32, emphasis: bool },
}

pub trait Presenter {
    fn draw(&mut self, request: DrawRequest);

    // Fire-and-forget sound.
    fn play_cue(&mut self, cue: &str);
}

// Keeps everything it is asked to present.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub draws: Vec<DrawRequest>,
    pub cues: Vec<String>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cue_count(&self, cue: &str) -> usize {
        self.cues.iter().filter(|c| *c == cue).count()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
        self.cues.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn draw(&mut self, request: DrawRequest) {
        self.draws.push(request);
    }

    fn play_cue(&mut self, cue: &str) {
        self.cues.push(cue.to_string());
    }
}

// Presenter for running without a renderer: cues go to the log, draws are
// only counted.
#[derive(Debug, Default)]
pub struct TracingPresenter {
    draws: u64,
}

impl TracingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

impl Presenter for TracingPresenter {
    fn draw(&mut self, request: DrawRequest) {
        self.draws += 1;
        if let DrawRequest::Text { text, .. } = &request {
            tracing::trace!(%text, "overlay");
        }
    }

    fn play_cue(&mut self, cue: &str) {
        tracing::debug!(cue, "sound cue");
    }
}
