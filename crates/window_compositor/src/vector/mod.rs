//! Vector paths and stroke tessellation
//!
//! Paths are built with move-to/line-to/close and tessellated into indexed
//! triangle lists that any [`RenderBackend`](crate::RenderBackend) can draw.

pub mod vertex;
pub mod path;
pub mod stroke;

pub use vertex::Vertex;
pub use path::{Path, SubPath};
pub use stroke::{LineCap, LineJoin, StrokeOptions, MAX_STROKE_VERTICES};
