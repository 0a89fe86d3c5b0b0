//! # VR Hands
//!
//! Scene glue for a hand-tracked VR demo: a static environment, per-hand
//! rigs with swappable models and glove colors, and props that follow a
//! joint while a hand holds a shape.
//!
//! ## Features
//!
//! - **Scene graph**: arena nodes with single-parent reparenting
//! - **Hand rig**: controllers, joint anchors, model cycling, glove colors
//! - **Gestures**: edge-triggered bindings on top of polled hand shapes
//! - **Props**: Idle/Active state machine with hide or sticky release
//! - **Backends**: rendering and hand tracking behind traits, with headless
//!   and scripted implementations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vr_hands::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let script = HandScript::load_from_file("demos/laser.ron")?;
//!     let mut ctx = AppContext::on_ready(
//!         AppConfig::default(),
//!         AppFeatures::HANDS | AppFeatures::PROPS,
//!         HeadlessRenderer::new(),
//!         Box::new(ScriptedHandTracker::new(script)),
//!         Viewport::new(1280, 720),
//!     )?;
//!
//!     let mut frames = FrameLoop::new();
//!     for i in 0..600 {
//!         frames.tick(&mut ctx, f64::from(i) * 16.0, None)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod app;
pub mod config;
pub mod core;
pub mod foundation;
pub mod gesture;
pub mod hands;
pub mod props;
pub mod render;
pub mod scene;
pub mod xr;

pub use app::{AppContext, AppError, AppFeatures, FrameError, FrameLoop, Viewport};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        app::{AppContext, AppError, AppFeatures, FrameError, FrameLoop, LoopStats, Viewport},
        config::{Config, ConfigError},
        core::{AppConfig, HandsConfig, PropConfig, SceneConfig},
        foundation::math::{Transform, Vec3},
        gesture::{GestureAction, GestureBinding, HandSelector, ShapeTransition},
        hands::{HandModelProfile, HandRig, HandRigError},
        props::{PropController, PropState, ReleasePolicy},
        render::{HeadlessRenderer, PerspectiveCamera, RenderBackend, RendererSettings},
        scene::{NodeId, SceneBuilder, SceneGraph},
        xr::{HandScript, HandState, HandTracker, Handedness, ScriptStep, ScriptedHandTracker, XrFrame},
    };
}
