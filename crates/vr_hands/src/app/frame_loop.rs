//! Per-frame callback
//!
//! One tick: advance the clock, poll the tracker, sync the hand rig, turn
//! shape polls into transitions, fire bindings, update props and render
//! exactly once.

use crate::foundation::time::FrameClock;
use crate::gesture::{GestureAction, ShapeTransition};
use crate::hands::HandRig;
use crate::props::PropController;
use crate::render::RenderBackend;
use crate::scene::SceneGraph;
use crate::xr::{HandState, XrFrame};

use super::context::AppContext;
use super::error::FrameError;

/// Counters kept across ticks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopStats {
    /// Frames rendered
    pub frames: u64,
    /// Time since the previous frame
    pub last_delta_ms: f64,
    /// Shape transitions observed
    pub transitions: u64,
    /// Binding actions performed
    pub actions: u64,
}

/// Drives an [`AppContext`] one frame at a time
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: FrameClock,
    stats: LoopStats,
}

impl FrameLoop {
    /// Create a loop that has not ticked yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters so far
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Frame timing
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one frame at `timestamp_ms`
    ///
    /// `frame` is present while an immersive session is running.
    pub fn tick<R: RenderBackend>(
        &mut self,
        ctx: &mut AppContext<R>,
        timestamp_ms: f64,
        frame: Option<&XrFrame>,
    ) -> Result<(), FrameError> {
        let delta = self
            .clock
            .advance(timestamp_ms)
            .ok_or_else(|| FrameError::NonMonotonicTimestamp {
                previous: self.clock.last_timestamp_ms().unwrap_or_default(),
                current: timestamp_ms,
            })?;

        match (frame.is_some(), ctx.vr_button.in_session()) {
            (true, false) => ctx.vr_button.session_started(),
            (false, true) => ctx.vr_button.session_ended(),
            _ => {}
        }

        ctx.tracker.update(timestamp_ms, frame);
        let hands = ctx.tracker.hands();

        if let Some(rig) = ctx.hands.as_mut() {
            rig.sync(&mut ctx.scene, &hands)?;

            for transition in ctx.gestures.observe(&hands) {
                self.stats.transitions += 1;
                log::debug!("Hand slot {}: {}", transition.slot, transition.message());
                rig.set_status(&mut ctx.scene, transition.slot, &transition.message())?;

                if let Some(action) = ctx.bindings.resolve(&transition) {
                    self.stats.actions += 1;
                    dispatch(action, &transition, &mut ctx.scene, rig, ctx.props.as_mut(), &hands)?;
                }
            }

            if let Some(props) = ctx.props.as_mut() {
                props.update(&mut ctx.scene, rig, &hands)?;
            }
        }

        ctx.renderer.render(&ctx.scene, &ctx.camera)?;

        self.stats.frames += 1;
        self.stats.last_delta_ms = delta;
        Ok(())
    }
}

fn dispatch(
    action: &GestureAction,
    transition: &ShapeTransition,
    scene: &mut SceneGraph,
    rig: &mut HandRig,
    props: Option<&mut PropController>,
    hands: &[&dyn HandState],
) -> Result<(), FrameError> {
    let slot = transition.slot;
    match action {
        GestureAction::CycleModel => {
            rig.cycle_model(scene, slot)?;
        }
        GestureAction::ToggleColor => {
            let current = hands.iter().find(|h| h.slot() == slot).copied();
            rig.toggle_color(scene, slot, current)?;
        }
        GestureAction::ShowProp(name) | GestureAction::HideProp(name) => {
            let Some(props) = props else {
                log::warn!("Ignoring {:?}: props are not enabled", action);
                return Ok(());
            };
            if matches!(action, GestureAction::ShowProp(_)) {
                props.show(scene, name)?;
            } else {
                props.hide(scene, name)?;
            }
        }
    }
    Ok(())
}
