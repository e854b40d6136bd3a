//! Recording backend
//!
//! Draws nothing; every call is appended to a command log so hosts and tests
//! can assert on exactly what the compositor issued.

use crate::backend::{BackendError, DrawTrianglesOptions, RenderBackend};
use crate::foundation::math::{is_positive_size, V2i, Vec2};
use crate::vector::Vertex;
use crate::window::Color;

/// Surface handle produced by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSurface {
    /// Identifier; targets made with [`RecordedSurface::target`] use 0
    pub id: u64,
    /// Size in pixels
    pub size: V2i,
    /// Last fill color, if any
    pub fill: Option<Color>,
}

impl RecordedSurface {
    /// A frame target not allocated through the backend
    pub const fn target(size: V2i) -> Self {
        Self { id: 0, size, fill: None }
    }
}

/// A single backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Surface allocation
    CreateSurface {
        /// New surface id
        surface: u64,
        /// Requested size
        size: V2i,
    },
    /// Whole-surface fill
    Fill {
        /// Filled surface
        surface: u64,
        /// Fill color
        color: Color,
    },
    /// Surface-to-surface blit
    Blit {
        /// Destination surface
        target: u64,
        /// Source surface
        source: u64,
        /// Translation
        offset: V2i,
    },
    /// Filled rectangle
    FillRect {
        /// Destination surface
        target: u64,
        /// Top-left
        position: Vec2,
        /// Extent
        size: Vec2,
        /// Fill color
        color: Color,
        /// Edge smoothing
        anti_alias: bool,
    },
    /// Indexed triangle list
    DrawTriangles {
        /// Destination surface
        target: u64,
        /// Vertex buffer
        vertices: Vec<Vertex>,
        /// Index buffer
        indices: Vec<u16>,
        /// Draw options
        options: DrawTrianglesOptions,
    },
}

/// Backend that records calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    commands: Vec<DrawCommand>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the command log
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forget recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderBackend for RecordingBackend {
    type Surface = RecordedSurface;

    fn create_surface(&mut self, size: V2i) -> Result<RecordedSurface, BackendError> {
        if !is_positive_size(size) {
            return Err(BackendError::InvalidSurfaceSize {
                width: size.x,
                height: size.y,
            });
        }
        self.next_id += 1;
        self.commands.push(DrawCommand::CreateSurface { surface: self.next_id, size });
        Ok(RecordedSurface { id: self.next_id, size, fill: None })
    }

    fn surface_size(&self, surface: &RecordedSurface) -> V2i {
        surface.size
    }

    fn fill(&mut self, surface: &mut RecordedSurface, color: Color) {
        surface.fill = Some(color);
        self.commands.push(DrawCommand::Fill { surface: surface.id, color });
    }

    fn blit(&mut self, target: &mut RecordedSurface, source: &RecordedSurface, offset: V2i) {
        self.commands.push(DrawCommand::Blit {
            target: target.id,
            source: source.id,
            offset,
        });
    }

    fn fill_rect(
        &mut self,
        target: &mut RecordedSurface,
        position: Vec2,
        size: Vec2,
        color: Color,
        anti_alias: bool,
    ) {
        self.commands.push(DrawCommand::FillRect {
            target: target.id,
            position,
            size,
            color,
            anti_alias,
        });
    }

    fn draw_triangles(
        &mut self,
        target: &mut RecordedSurface,
        vertices: &[Vertex],
        indices: &[u16],
        options: &DrawTrianglesOptions,
    ) {
        self.commands.push(DrawCommand::DrawTriangles {
            target: target.id,
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            options: *options,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_allocation_and_fill() {
        let mut backend = RecordingBackend::new();
        let mut surface = backend.create_surface(V2i::new(8, 8)).unwrap();
        backend.fill(&mut surface, Color::BLACK);

        assert_eq!(surface.fill, Some(Color::BLACK));
        assert_eq!(
            backend.take_commands(),
            vec![
                DrawCommand::CreateSurface { surface: 1, size: V2i::new(8, 8) },
                DrawCommand::Fill { surface: 1, color: Color::BLACK },
            ]
        );
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn test_failed_allocation_is_not_recorded() {
        let mut backend = RecordingBackend::new();
        assert!(backend.create_surface(V2i::new(-1, 4)).is_err());
        assert!(backend.commands().is_empty());
    }
}
