//! Render backend implementations
//!
//! - `software`: CPU rasteriser over `image::RgbaImage`
//! - `recording`: logs every call as a [`DrawCommand`] for inspection

pub mod software;
pub mod recording;

pub use software::SoftwareBackend;
pub use recording::{DrawCommand, RecordedSurface, RecordingBackend};
