//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Frame timing driven by the display scheduler
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
