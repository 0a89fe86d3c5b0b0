//! Composition root
//!
//! [`AppContext`] owns everything the demo needs and is handed by `&mut` to
//! the frame loop and the resize handler. There is no global state.

use bitflags::bitflags;

use crate::core::AppConfig;
use crate::gesture::{BindingTable, ShapeEdgeDetector};
use crate::hands::HandRig;
use crate::props::PropController;
use crate::render::{OrbitControls, PerspectiveCamera, RenderBackend};
use crate::scene::{SceneBuilder, SceneGraph, SceneryNodes};
use crate::xr::{HandTracker, VrButton};

use super::error::AppError;

bitflags! {
    /// Optional feature sets on top of the static scene
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AppFeatures: u8 {
        /// Controllers, hands, models and gesture bindings
        const HANDS = 0b01;
        /// Gesture-driven props (needs hands)
        const PROPS = 0b10;
    }
}

/// Drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Device pixel ratio
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Viewport with a pixel ratio of 1
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Everything the running demo owns
pub struct AppContext<R: RenderBackend> {
    /// Configuration the app was started with
    pub config: AppConfig,
    /// Enabled features
    pub features: AppFeatures,
    /// Scene graph
    pub scene: SceneGraph,
    /// Static environment nodes
    pub scenery: SceneryNodes,
    /// Viewer camera
    pub camera: PerspectiveCamera,
    /// Orbit controls driving the camera
    pub controls: OrbitControls,
    /// Rendering backend
    pub renderer: R,
    /// Hand-tracking source
    pub tracker: Box<dyn HandTracker>,
    /// VR entry button
    pub vr_button: VrButton,
    /// Hand rig, when hands are enabled
    pub hands: Option<HandRig>,
    /// Props, when props are enabled
    pub props: Option<PropController>,
    /// Shape edge detector
    pub gestures: ShapeEdgeDetector,
    /// Gesture bindings
    pub bindings: BindingTable,
}

impl<R: RenderBackend> AppContext<R> {
    /// Build the app once the host is ready
    pub fn on_ready(
        config: AppConfig,
        mut features: AppFeatures,
        mut renderer: R,
        tracker: Box<dyn HandTracker>,
        viewport: Viewport,
    ) -> Result<Self, AppError> {
        config.validate()?;
        if viewport.width == 0 || viewport.height == 0 {
            return Err(AppError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if features.contains(AppFeatures::PROPS) && !features.contains(AppFeatures::HANDS) {
            log::warn!("Props need hands; enabling hands");
            features |= AppFeatures::HANDS;
        }

        log::info!("Starting {} with features {:?}", config.engine.app_name, features);

        let cam = &config.camera;
        let mut camera = PerspectiveCamera::new(cam.position(), cam.fov_degrees, viewport.aspect(), cam.near, cam.far);

        renderer.configure(&config.renderer)?;
        renderer.set_pixel_ratio(viewport.pixel_ratio);
        renderer.set_size(viewport.width, viewport.height)?;
        let vr_button = VrButton::new(config.renderer.xr_enabled);

        let mut controls = OrbitControls::new(cam.target(), config.controls.clone());
        controls.update(&mut camera);

        let mut scene = SceneGraph::new();
        let scenery = SceneBuilder::build(&mut scene, &config.scenery);

        let hands = if features.contains(AppFeatures::HANDS) {
            Some(HandRig::setup(&mut scene, &config.hands)?)
        } else {
            None
        };
        let props = features
            .contains(AppFeatures::PROPS)
            .then(|| PropController::setup(&mut scene, &config.props));

        let bindings = BindingTable::new(config.hands.bindings.clone());

        log::info!("Scene ready with {} nodes", scene.len());
        Ok(Self {
            config,
            features,
            scene,
            scenery,
            camera,
            controls,
            renderer,
            tracker,
            vr_button,
            hands,
            props,
            gestures: ShapeEdgeDetector::new(),
            bindings,
        })
    }

    /// Follow a viewport size change
    ///
    /// A zero dimension (minimized window) is ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<(), AppError> {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return Ok(());
        }

        self.camera.set_aspect_ratio(width as f32 / height as f32);
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height)?;
        self.controls.update(&mut self.camera);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::render::HeadlessRenderer;
    use crate::xr::ScriptedHandTracker;
    use approx::assert_relative_eq;

    fn ready(features: AppFeatures) -> AppContext<HeadlessRenderer> {
        AppContext::on_ready(
            AppConfig::default(),
            features,
            HeadlessRenderer::new(),
            Box::new(ScriptedHandTracker::empty()),
            Viewport::new(800, 600),
        )
        .unwrap()
    }

    #[test]
    fn test_on_ready_sets_up_camera_and_renderer() {
        let ctx = ready(AppFeatures::empty());
        assert_relative_eq!(ctx.camera.aspect, 800.0 / 600.0);
        assert_relative_eq!(ctx.camera.near, 0.01);
        assert_relative_eq!(ctx.camera.far, 1000.0);
        assert_relative_eq!(ctx.camera.position, crate::foundation::math::Vec3::new(0.0, 1.65, 6.0), epsilon = 1e-4);
        assert_relative_eq!(ctx.controls.target, crate::foundation::math::Vec3::new(0.0, 1.65, 0.0));
        assert_eq!(ctx.renderer.size(), (800, 600));
        assert!(ctx.renderer.settings().is_some());
        assert!(ctx.hands.is_none());
        assert!(ctx.props.is_none());
    }

    #[test]
    fn test_resize_sets_exact_aspect_and_size() {
        let mut ctx = ready(AppFeatures::HANDS);
        ctx.on_resize(1920, 1080).unwrap();
        assert_eq!(ctx.camera.aspect, 1920.0 / 1080.0);
        assert_eq!(ctx.renderer.size(), (1920, 1080));

        let expected = 1.0 / (ctx.camera.aspect * (ctx.camera.fov * 0.5).tan());
        assert_relative_eq!(ctx.camera.projection_matrix()[(0, 0)], expected, epsilon = 1e-5);

        ctx.on_resize(0, 1080).unwrap();
        assert_eq!(ctx.renderer.size(), (1920, 1080));
    }

    #[test]
    fn test_props_imply_hands() {
        let ctx = ready(AppFeatures::PROPS);
        assert!(ctx.features.contains(AppFeatures::HANDS));
        assert!(ctx.hands.is_some());
        assert!(ctx.props.is_some());
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let result = AppContext::on_ready(
            AppConfig::default(),
            AppFeatures::empty(),
            HeadlessRenderer::new(),
            Box::new(ScriptedHandTracker::empty()),
            Viewport::new(0, 600),
        );
        assert!(matches!(result, Err(AppError::InvalidViewport { width: 0, height: 600 })));
    }

    #[test]
    fn test_inverted_polar_bounds_rejected_at_startup() {
        let mut config = AppConfig::default();
        config.controls.min_polar_angle = 2.0;
        config.controls.max_polar_angle = 1.0;
        let result = AppContext::on_ready(
            config,
            AppFeatures::empty(),
            HeadlessRenderer::new(),
            Box::new(ScriptedHandTracker::empty()),
            Viewport::new(800, 600),
        );
        assert!(matches!(result, Err(AppError::Config(ConfigError::Invalid(_)))));
    }
}
