//! Render Backend Trait
//!
//! Defines the interface between the compositor and a 2D graphics backend.
//! Keeps window bookkeeping independent of how pixels are produced.

use thiserror::Error;

use crate::foundation::math::{V2i, Vec2};
use crate::vector::Vertex;
use crate::window::Color;

/// Errors raised by render backends
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Requested surface has a non-positive extent
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },

    /// Backend-specific allocation failure
    #[error("surface allocation failed: {0}")]
    Allocation(String),
}

/// How overlapping triangles decide coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Every covered pixel is filled regardless of winding
    #[default]
    FillAll,
    /// Filled where the winding number is non-zero
    NonZero,
    /// Filled where the winding number is odd
    EvenOdd,
}

/// Options for [`RenderBackend::draw_triangles`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawTrianglesOptions {
    /// Smooth triangle edges
    pub anti_alias: bool,
    /// Coverage rule for overlapping triangles
    pub fill_rule: FillRule,
}

/// Backend-agnostic 2D drawing interface
///
/// Drawing calls cannot fail: surfaces handed to them were produced by
/// [`RenderBackend::create_surface`] and are valid for their whole lifetime.
pub trait RenderBackend {
    /// Offscreen or onscreen image the backend draws into
    type Surface;

    /// Allocate a surface of `size` pixels
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidSurfaceSize`] for non-positive extents
    /// and [`BackendError::Allocation`] when the backend cannot hold `size`.
    fn create_surface(&mut self, size: V2i) -> Result<Self::Surface, BackendError>;

    /// Size of a surface in pixels
    fn surface_size(&self, surface: &Self::Surface) -> V2i;

    /// Replace every pixel of `surface` with `color`
    fn fill(&mut self, surface: &mut Self::Surface, color: Color);

    /// Composite `source` over `target` translated by `offset`
    fn blit(&mut self, target: &mut Self::Surface, source: &Self::Surface, offset: V2i);

    /// Fill an axis-aligned rectangle
    fn fill_rect(
        &mut self,
        target: &mut Self::Surface,
        position: Vec2,
        size: Vec2,
        color: Color,
        anti_alias: bool,
    );

    /// Draw an indexed triangle list
    ///
    /// The source is a solid white texel, so each pixel takes the
    /// interpolated vertex color.
    fn draw_triangles(
        &mut self,
        target: &mut Self::Surface,
        vertices: &[Vertex],
        indices: &[u16],
        options: &DrawTrianglesOptions,
    );
}
