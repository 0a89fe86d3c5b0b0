//! Application and per-frame errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::hands::HandRigError;
use crate::props::PropError;
use crate::render::RenderError;

/// Errors from a single [`FrameLoop::tick`](super::FrameLoop::tick)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Timestamp went backwards
    #[error("Frame timestamp {current}ms is earlier than previous {previous}ms")]
    NonMonotonicTimestamp {
        /// Last accepted timestamp
        previous: f64,
        /// Rejected timestamp
        current: f64,
    },

    /// Hand rig precondition violated or scene operation failed
    #[error("Hand rig error: {0}")]
    HandRig(#[from] HandRigError),

    /// Prop update failed
    #[error("Prop error: {0}")]
    Prop(#[from] PropError),

    /// Rendering failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Renderer setup failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Hand rig setup failed
    #[error("Hand rig error: {0}")]
    HandRig(#[from] HandRigError),

    /// A frame failed
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Viewport with a zero dimension
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Viewport width
        width: u32,
        /// Viewport height
        height: u32,
    },
}
