//! Path construction

use super::stroke::{self, StrokeOptions};
use super::Vertex;
use crate::foundation::math::Vec2;

/// A run of connected points started by a move-to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPath {
    points: Vec<Vec2>,
    closed: bool,
}

impl SubPath {
    fn starting_at(point: Vec2) -> Self {
        Self {
            points: vec![point],
            closed: false,
        }
    }

    /// Points in drawing order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether the last point connects back to the first
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Line segments of this subpath, including the closing segment
    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        let mut segments: Vec<(Vec2, Vec2)> = self
            .points
            .windows(2)
            .filter(|pair| pair[0] != pair[1])
            .map(|pair| (pair[0], pair[1]))
            .collect();

        if self.closed {
            if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
                if first != last {
                    segments.push((last, first));
                }
            }
        }
        segments
    }
}

/// A collection of subpaths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath at `(x, y)`
    pub fn move_to(&mut self, x: f32, y: f32) {
        let point = Vec2::new(x, y);
        match self.subpaths.last_mut() {
            // A lone move-to is replaced rather than left as an empty subpath
            Some(current) if current.points.len() == 1 && !current.closed => {
                current.points[0] = point;
            }
            _ => self.subpaths.push(SubPath::starting_at(point)),
        }
    }

    /// Extend the current subpath with a straight line to `(x, y)`
    ///
    /// Without a current point this behaves like [`Path::move_to`]. After a
    /// [`Path::close`] a new subpath starts at the closed subpath's origin.
    pub fn line_to(&mut self, x: f32, y: f32) {
        let point = Vec2::new(x, y);
        match self.subpaths.last_mut() {
            None => self.subpaths.push(SubPath::starting_at(point)),
            Some(current) if current.closed => {
                let origin = current.points[0];
                self.subpaths.push(SubPath {
                    points: vec![origin, point],
                    closed: false,
                });
            }
            Some(current) => current.points.push(point),
        }
    }

    /// Close the current subpath back to its first point
    pub fn close(&mut self) {
        if let Some(current) = self.subpaths.last_mut() {
            current.closed = true;
        }
    }

    /// All subpaths
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// Whether the path has no segments to draw
    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    /// Total number of line segments across subpaths
    pub fn segment_count(&self) -> usize {
        self.subpaths.iter().map(|s| s.segments().len()).sum()
    }

    /// Every line segment in drawing order
    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        self.subpaths.iter().flat_map(SubPath::segments).collect()
    }

    /// Tessellate the stroke of this path, appending to the buffers
    ///
    /// Indices are `u16`: a quad, triangle or fan that would grow `vertices`
    /// past [`MAX_STROKE_VERTICES`] is dropped.
    ///
    /// [`MAX_STROKE_VERTICES`]: super::MAX_STROKE_VERTICES
    pub fn append_vertices_and_indices_for_stroke(
        &self,
        vertices: &mut Vec<Vertex>,
        indices: &mut Vec<u16>,
        options: &StrokeOptions,
    ) {
        for subpath in &self.subpaths {
            stroke::tessellate_subpath(subpath, vertices, indices, options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_disjoint_strokes() {
        let mut path = Path::new();
        path.move_to(10.0, 0.0);
        path.line_to(0.0, 10.0);
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 10.0);

        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.segment_count(), 2);
    }

    #[test]
    fn test_close_adds_segment() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        assert_eq!(path.segment_count(), 2);

        path.close();
        assert_eq!(path.segment_count(), 3);
        assert!(path.subpaths()[0].is_closed());
    }

    #[test]
    fn test_line_after_close_starts_at_origin() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.line_to(5.0, 1.0);
        path.close();
        path.line_to(1.0, 8.0);

        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.subpaths()[1].points()[0], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_repeated_move_to_and_degenerate_segments() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.move_to(3.0, 3.0);
        path.line_to(3.0, 3.0);
        assert_eq!(path.subpaths().len(), 1);
        assert!(path.is_empty());
    }
}
