//! Application shell: setup, resize handling and the frame loop

mod context;
mod error;
mod frame_loop;

#[cfg(test)]
mod scenario_tests;

pub use context::{AppContext, AppFeatures, Viewport};
pub use error::{AppError, FrameError};
pub use frame_loop::{FrameLoop, LoopStats};
