pub mod sample;
pub mod input_event;
pub mod fit;

pub use sample::Sample;
pub use input_event::{InputEvent, MouseButton};
pub use fit::{FitResult, Verdict, RenderPayload};
