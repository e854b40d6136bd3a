//! Vertex type for tessellated geometry

// Pod/Zeroable derives expand to unsafe impls
#![allow(unsafe_code)]

use bytemuck::{Pod, Zeroable};
use crate::foundation::math::{Vec2, Vec4};

/// Vertex for triangle-list drawing
///
/// Positions are in target-surface pixels. Colors are normalized RGBA and
/// multiply the backend's solid white source.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Destination position in pixels
    pub position: [f32; 2],
    /// Source texture coordinates
    pub uv: [f32; 2],
    /// Normalized RGBA color
    pub color: [f32; 4],
}

impl Vertex {
    /// White vertex at a position
    pub fn at(point: Vec2) -> Self {
        Self {
            position: [point.x, point.y],
            uv: [0.0, 0.0],
            color: [1.0; 4],
        }
    }

    /// Position as a vector
    pub fn point(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }

    /// Replace the vertex color
    pub fn set_color(&mut self, color: Vec4) {
        self.color = [color.x, color.y, color.z, color.w];
    }
}
