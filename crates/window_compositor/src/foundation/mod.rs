//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Integer and float vector types for geometry
//! - Logging setup

pub mod math;
pub mod logging;
