//! Whole-app scenarios driven by scripted hands

use approx::assert_relative_eq;

use super::*;
use crate::core::{AppConfig, PropConfig};
use crate::foundation::math::Vec3;
use crate::hands::HandRigError;
use crate::props::PropState;
use crate::render::HeadlessRenderer;
use crate::xr::scripted::rest_pose_offset;
use crate::xr::{HandJoint, HandScript, Handedness, ScriptStep, ScriptedHandTracker, XrFrame};

const WRIST: [f32; 3] = [0.0, 1.2, -0.4];

fn app(features: AppFeatures, config: AppConfig, script: HandScript) -> AppContext<HeadlessRenderer> {
    AppContext::on_ready(
        config,
        features,
        HeadlessRenderer::new(),
        Box::new(ScriptedHandTracker::new(script)),
        Viewport::new(1280, 720),
    )
    .unwrap()
}

fn right(at_ms: f64, shape: &[&str]) -> ScriptStep {
    ScriptStep::hand(at_ms, 0, Handedness::Right, shape.iter().copied(), WRIST)
}

#[test]
fn test_point_gesture_drives_laser() {
    let script = HandScript::default()
        .step(right(0.0, &["point"]))
        .step(right(100.0, &["fire point", "point"]))
        .step(right(5000.0, &["flat"]));
    let config = AppConfig::default().with_props(vec![PropConfig::laser()]);
    let mut ctx = app(AppFeatures::HANDS | AppFeatures::PROPS, config, script);
    let mut frames = FrameLoop::new();

    let tip = Vec3::from(WRIST) + rest_pose_offset(HandJoint::IndexFingerTip, Some(Handedness::Right));
    let laser = ctx.props.as_ref().unwrap().node("laser").unwrap();
    let anchor = ctx.hands.as_ref().unwrap().joint_anchor(0, HandJoint::IndexFingerTip);

    let mut ticks = 0;
    let mut t = 0.0;
    while t <= 6000.0 {
        frames.tick(&mut ctx, t, None).unwrap();
        ticks += 1;

        let state = ctx.props.as_ref().unwrap().state("laser").unwrap();
        if t < 3100.0 {
            assert_eq!(state, PropState::Idle, "at {t}ms");
            assert!(!ctx.scene.get(laser).unwrap().visible);
        } else if t < 5000.0 {
            assert_eq!(state, PropState::Active { slot: 0 }, "at {t}ms");
            assert_eq!(ctx.scene.parent(laser).unwrap(), anchor);
            assert!(ctx.scene.is_effectively_visible(laser));
            assert_relative_eq!(ctx.scene.world_position(laser).unwrap(), tip, epsilon = 1e-5);
        } else {
            assert_eq!(state, PropState::Idle, "at {t}ms");
            assert_eq!(ctx.scene.parent(laser).unwrap(), Some(ctx.scene.root()));
            assert!(!ctx.scene.get(laser).unwrap().visible);
        }
        t += 100.0;
    }

    assert_eq!(ctx.renderer.frames_rendered(), ticks);
    assert_eq!(frames.stats().frames, ticks);
}

#[test]
fn test_held_fist_cycles_once() {
    let script = HandScript::default()
        .step(right(0.0, &["flat"]))
        .step(right(50.0, &["fist"]))
        .step(right(500.0, &["flat"]))
        .step(right(600.0, &["fist"]));
    let mut ctx = app(AppFeatures::HANDS, AppConfig::default(), script);
    let mut frames = FrameLoop::new();

    for t in (0..=550).step_by(10) {
        frames.tick(&mut ctx, f64::from(t), None).unwrap();
    }
    assert_eq!(ctx.hands.as_ref().unwrap().model_index(0), Some(1));

    frames.tick(&mut ctx, 600.0, None).unwrap();
    assert_eq!(ctx.hands.as_ref().unwrap().model_index(0), Some(2));
    assert_eq!(ctx.hands.as_ref().unwrap().status(0), Some("shape was [flat] is [fist]"));
}

#[test]
fn test_peace_toggles_on_entry_only() {
    let script = HandScript::default()
        .step(right(0.0, &["flat"]))
        .step(right(100.0, &["peace", "two"]))
        .step(right(200.0, &["peace", "v"]))
        .step(right(300.0, &["flat"]))
        .step(right(400.0, &["peace", "v"]));
    let mut ctx = app(AppFeatures::HANDS, AppConfig::default(), script);
    let mut frames = FrameLoop::new();
    let is_default = |ctx: &AppContext<HeadlessRenderer>| ctx.hands.as_ref().unwrap().is_default_color(0);

    frames.tick(&mut ctx, 0.0, None).unwrap();
    assert_eq!(is_default(&ctx), Some(true));

    for t in [100.0, 150.0, 200.0, 250.0, 300.0] {
        frames.tick(&mut ctx, t, None).unwrap();
        assert_eq!(is_default(&ctx), Some(false), "at {t}ms");
    }

    frames.tick(&mut ctx, 400.0, None).unwrap();
    assert_eq!(is_default(&ctx), Some(true));
}

#[test]
fn test_unresolved_handedness_surfaces_from_tick() {
    let script = HandScript::default().step(ScriptStep {
        handedness: None,
        ..right(0.0, &["peace"])
    });
    let mut ctx = app(AppFeatures::HANDS, AppConfig::default(), script);

    let err = FrameLoop::new().tick(&mut ctx, 0.0, None).unwrap_err();
    assert_eq!(err, FrameError::HandRig(HandRigError::UnresolvedHandedness { slot: 0 }));
}

#[test]
fn test_timestamps_must_not_go_backwards() {
    let mut ctx = app(AppFeatures::empty(), AppConfig::default(), HandScript::default());
    let mut frames = FrameLoop::new();
    frames.tick(&mut ctx, 100.0, None).unwrap();
    frames.tick(&mut ctx, 100.0, None).unwrap();

    let err = frames.tick(&mut ctx, 50.0, None).unwrap_err();
    assert_eq!(err, FrameError::NonMonotonicTimestamp { previous: 100.0, current: 50.0 });
    assert_eq!(ctx.renderer.frames_rendered(), 2);
}

#[test]
fn test_scene_only_ignores_hands_and_tracks_session() {
    let script = HandScript::default().step(right(0.0, &["fist"]));
    let mut ctx = app(AppFeatures::empty(), AppConfig::default(), script);
    let mut frames = FrameLoop::new();
    let xr = XrFrame { predicted_display_time_ms: 16.0 };

    frames.tick(&mut ctx, 0.0, Some(&xr)).unwrap();
    assert!(ctx.vr_button.in_session());
    assert_eq!(frames.stats().transitions, 0);

    frames.tick(&mut ctx, 16.0, None).unwrap();
    assert!(!ctx.vr_button.in_session());
    assert_eq!(ctx.renderer.frames_rendered(), 2);
    assert!(ctx.scene.find_by_name("hand 0").is_none());
}

#[test]
fn test_show_prop_binding() {
    let mut config = AppConfig::default().with_props(vec![PropConfig::laser()]);
    config.hands.bindings.push(crate::gesture::GestureBinding::new(
        crate::gesture::HandSelector::Right,
        "thumbs up",
        crate::gesture::GestureAction::ShowProp("laser".to_string()),
    ));
    let script = HandScript::default()
        .step(right(0.0, &["flat"]))
        .step(right(100.0, &["thumbs up"]));
    let mut ctx = app(AppFeatures::HANDS | AppFeatures::PROPS, config, script);
    let mut frames = FrameLoop::new();

    let laser = ctx.props.as_ref().unwrap().node("laser").unwrap();
    frames.tick(&mut ctx, 0.0, None).unwrap();
    assert!(!ctx.scene.get(laser).unwrap().visible);
    frames.tick(&mut ctx, 100.0, None).unwrap();
    assert!(ctx.scene.get(laser).unwrap().visible);
    assert_eq!(frames.stats().actions, 1);
}

#[test]
fn test_peace_while_holding_laser_keeps_laser_color() {
    let script = HandScript::default()
        .step(right(0.0, &["fire point", "point"]))
        .step(right(4000.0, &["peace"]));
    let config = AppConfig::default().with_props(vec![PropConfig::laser()]);
    let mut ctx = app(AppFeatures::HANDS | AppFeatures::PROPS, config, script);
    let mut frames = FrameLoop::new();
    let laser = ctx.props.as_ref().unwrap().node("laser").unwrap();
    let laser_color = |ctx: &AppContext<HeadlessRenderer>| {
        ctx.scene.get(laser).unwrap().kind.material().unwrap().color.to_hex()
    };

    let mut t = 0.0;
    while t <= 4500.0 {
        frames.tick(&mut ctx, t, None).unwrap();
        t += 100.0;
    }

    assert_eq!(ctx.hands.as_ref().unwrap().is_default_color(0), Some(false));
    assert_eq!(ctx.props.as_ref().unwrap().state("laser"), Some(PropState::Idle));
    assert_eq!(laser_color(&ctx), 0xFF2200);
}

#[test]
fn test_hide_prop_binding_hides_held_laser() {
    let mut config = AppConfig::default().with_props(vec![PropConfig::laser()]);
    config.hands.bindings.push(crate::gesture::GestureBinding::new(
        crate::gesture::HandSelector::Left,
        "thumbs up",
        crate::gesture::GestureAction::HideProp("laser".to_string()),
    ));
    let left = |at_ms, shape: &[&str]| {
        ScriptStep::hand(at_ms, 1, Handedness::Left, shape.iter().copied(), [-0.2, 1.2, -0.4])
    };
    let script = HandScript::default()
        .step(right(0.0, &["fire point", "point"]))
        .step(left(0.0, &["flat"]))
        .step(left(3500.0, &["thumbs up"]));
    let mut ctx = app(AppFeatures::HANDS | AppFeatures::PROPS, config, script);
    let mut frames = FrameLoop::new();
    let laser = ctx.props.as_ref().unwrap().node("laser").unwrap();

    let mut t = 0.0;
    while t <= 3400.0 {
        frames.tick(&mut ctx, t, None).unwrap();
        t += 100.0;
    }
    assert!(ctx.scene.get(laser).unwrap().visible);

    for t in [3500.0, 3600.0, 3700.0] {
        frames.tick(&mut ctx, t, None).unwrap();
        assert_eq!(ctx.props.as_ref().unwrap().state("laser"), Some(PropState::Active { slot: 0 }));
        assert!(!ctx.scene.get(laser).unwrap().visible, "at {t}ms");
    }
}
