//! Shared runner for the headless demo binaries
//!
//! Each binary picks a feature set and a built-in hand script; both the
//! configuration and the script can be overridden from the command line:
//!
//! ```text
//! laser_demo [CONFIG.toml|CONFIG.ron] [SCRIPT.ron]
//! ```

use std::path::PathBuf;

use thiserror::Error;
use vr_hands::foundation::logging;
use vr_hands::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;
const TAIL_MS: f64 = 1000.0;

/// Demo failures
#[derive(Error, Debug)]
pub enum DemoError {
    /// Config or script could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// App setup or a frame failed
    #[error("App error: {0}")]
    App(#[from] AppError),

    /// Frame failed
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

/// Command line overrides
#[derive(Debug, Default)]
pub struct DemoArgs {
    /// Application config file
    pub config: Option<PathBuf>,
    /// Hand script file
    pub script: Option<PathBuf>,
}

impl DemoArgs {
    /// Read `[CONFIG] [SCRIPT]` from the process arguments
    pub fn from_env() -> Self {
        let mut args = std::env::args_os().skip(1).map(PathBuf::from);
        Self {
            config: args.next(),
            script: args.next(),
        }
    }
}

/// Run a demo headlessly until its script is over
pub fn run(
    name: &str,
    features: AppFeatures,
    default_script: impl FnOnce() -> HandScript,
    args: DemoArgs,
) -> Result<(), DemoError> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    logging::init(&config.engine.log_level);
    log::info!("Starting {}", name);

    let script = match args.script.as_deref() {
        Some(path) => HandScript::load_from_file(path)?,
        None => default_script(),
    };
    let duration_ms = script.duration_ms() + TAIL_MS;

    let mut ctx = AppContext::on_ready(
        config,
        features,
        HeadlessRenderer::new(),
        Box::new(ScriptedHandTracker::new(script)),
        Viewport {
            width: 1280,
            height: 720,
            pixel_ratio: 2.0,
        },
    )?;
    let mut frames = FrameLoop::new();

    let mut resized = false;
    let mut frame_index = 0u32;
    loop {
        let timestamp_ms = f64::from(frame_index) * FRAME_MS;
        if timestamp_ms > duration_ms {
            break;
        }
        if !resized && timestamp_ms >= duration_ms / 2.0 {
            ctx.on_resize(1920, 1080)?;
            resized = true;
        }
        frames.tick(&mut ctx, timestamp_ms, None)?;
        frame_index += 1;
    }

    report(&ctx, &frames);
    Ok(())
}

fn report(ctx: &AppContext<HeadlessRenderer>, frames: &FrameLoop) {
    let stats = frames.stats();
    log::info!(
        "{} frames ({:.1} fps simulated), {} shape transitions, {} actions",
        stats.frames,
        frames.clock().average_fps(),
        stats.transitions,
        stats.actions
    );
    log::info!(
        "Renderer drew {} nodes on the last of {} frames at {:?}",
        ctx.renderer.last_frame().drawn_nodes,
        ctx.renderer.frames_rendered(),
        ctx.renderer.size()
    );

    if let Some(rig) = &ctx.hands {
        for slot in 0..rig.slot_count() {
            log::info!(
                "Hand {}: model {:?}, default color {:?}, last '{}'",
                slot,
                rig.model_index(slot),
                rig.is_default_color(slot),
                rig.status(slot).unwrap_or_default()
            );
        }
    }
    if let Some(props) = &ctx.props {
        for name in props.names() {
            log::info!("Prop '{}': {:?}", name, props.state(name));
        }
    }
}

/// Two hands: fists cycle the right hand's model, peace signs toggle the left glove
pub fn hands_script() -> HandScript {
    let right = |at, shape: &[&str]| ScriptStep::hand(at, 0, Handedness::Right, shape.iter().copied(), [0.15, 1.3, -0.4]);
    let left = |at, shape: &[&str]| ScriptStep::hand(at, 1, Handedness::Left, shape.iter().copied(), [-0.15, 1.3, -0.4]);

    HandScript::default()
        .step(right(0.0, &["flat"]))
        .step(right(500.0, &["fist"]))
        .step(right(1000.0, &["flat"]))
        .step(right(1500.0, &["fist"]))
        .step(right(2000.0, &["flat"]))
        .step(left(200.0, &["flat"]))
        .step(left(800.0, &["peace", "two"]))
        .step(left(1200.0, &["peace", "v"]))
        .step(left(1800.0, &["flat"]))
        .step(ScriptStep::lost(2500.0, 1))
}

/// Right index finger held in "fire point" long enough to fire the laser
pub fn laser_script() -> HandScript {
    let right = |at, shape: &[&str], wrist| ScriptStep::hand(at, 0, Handedness::Right, shape.iter().copied(), wrist);

    HandScript::default()
        .step(right(0.0, &["flat"], [0.2, 1.3, -0.3]))
        .step(right(200.0, &["fire point", "point"], [0.2, 1.3, -0.3]))
        .step(right(4000.0, &["fire point", "point"], [0.25, 1.4, -0.35]))
        .step(right(5000.0, &["flat"], [0.25, 1.4, -0.35]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_scripts_run() {
        for (features, script) in [
            (AppFeatures::empty(), HandScript::default()),
            (AppFeatures::HANDS, hands_script()),
            (AppFeatures::HANDS | AppFeatures::PROPS, laser_script()),
        ] {
            run("test", features, || script, DemoArgs::default()).unwrap();
        }
    }
}
