//! Window data model
//!
//! Caller-facing window configuration, colors and item payloads.

pub mod color;
pub mod config;
pub mod item;

pub use color::Color;
pub use config::{WindowConfig, WindowFlags};
pub use item::{WindowAction, WindowItem};
