pub mod calibrator;
pub mod handlers;
pub mod state;

pub use calibrator::{Calibrator, RunOutcome};
