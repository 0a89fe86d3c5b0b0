//! Static environment: skybox, ground platform and lights

use crate::core::SceneConfig;
use crate::foundation::math::{constants, Transform, Vec3};
use crate::render::{Light, Material, ShadowCamera, ShadowSettings};

use super::node::{Geometry, Node, NodeKind, ShadowFlags};
use super::scene_graph::SceneGraph;
use super::NodeId;

/// Nodes created by [`SceneBuilder::build`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneryNodes {
    /// Ground disc
    pub platform: NodeId,
    /// Shadow-casting directional light
    pub sun: NodeId,
    /// Ambient light
    pub ambient: NodeId,
}

/// Populates a scene with the static environment
pub struct SceneBuilder;

impl SceneBuilder {
    /// Add background, platform and lights under the scene root
    pub fn build(scene: &mut SceneGraph, config: &SceneConfig) -> SceneryNodes {
        scene.set_background(config.background.to_background());

        let platform = &config.platform;
        let material = Material::standard(platform.color)
            .with_roughness(platform.roughness)
            .with_metalness(platform.metalness)
            .with_env_map_intensity(platform.env_map_intensity)
            .with_opacity(platform.opacity);
        let platform = scene.add_to_root(
            Node::mesh(
                "platform",
                Geometry::Circle {
                    radius: platform.radius,
                    segments: platform.segments,
                },
                material,
            )
            .with_transform(Transform::from_rotation_x(-constants::HALF_PI))
            .with_shadows(ShadowFlags::RECEIVE),
        );

        let sun = &config.sun;
        let light = Light::directional(sun.color).with_shadow(ShadowSettings {
            camera: ShadowCamera::symmetric(sun.shadow_extent),
            map_size: (sun.shadow_map_size, sun.shadow_map_size),
        });
        let sun = scene.add_to_root(
            Node::new("sun", NodeKind::Light(light))
                .with_transform(Transform::from_position(Vec3::from(sun.position)))
                .with_shadows(ShadowFlags::CAST),
        );

        let ambient = scene.add_to_root(Node::new(
            "ambient",
            NodeKind::Light(Light::ambient(config.ambient_color)),
        ));

        log::info!("Scenery built: platform, sun and ambient light");
        SceneryNodes { platform, sun, ambient }
    }
}
