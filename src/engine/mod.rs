pub mod clock;
pub mod input;
pub mod presentation;
pub mod state;

pub use input::{InputState, Key};
pub use presentation::{DrawRequest, Presenter, RecordingPresenter};
pub use state::{Screen, ScreenStack, Transition};
