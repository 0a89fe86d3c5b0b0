//! Application-wide configuration

pub mod config;

pub use config::{
    AppConfig, BackgroundConfig, CameraConfig, EngineSettings, HandsConfig, PlatformConfig, PropConfig,
    SceneConfig, SunConfig,
};
