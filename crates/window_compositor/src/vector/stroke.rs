//! Stroke tessellation
//!
//! Each segment becomes a quad of the stroke's width. Joins and caps add
//! triangle fans (round), a single triangle (bevel) or a miter wedge.

use super::path::SubPath;
use super::Vertex;
use crate::foundation::math::utils::{cross, segment_normal};
use crate::foundation::math::Vec2;

/// Maximum angle covered by one triangle of a round fan
const ROUND_STEP: f32 = std::f32::consts::PI / 8.0;

/// Shape drawn where two segments meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Extend the outer edges until they meet
    #[default]
    Miter,
    /// Connect the outer corners with a straight edge
    Bevel,
    /// Connect the outer corners with an arc
    Round,
}

/// Shape drawn at the open ends of a subpath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// End flush with the endpoint
    #[default]
    Butt,
    /// Extend by half the width
    Square,
    /// Half-disc centered on the endpoint
    Round,
}

/// Stroke parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOptions {
    /// Full stroke width in pixels
    pub width: f32,
    /// Join style
    pub line_join: LineJoin,
    /// Cap style
    pub line_cap: LineCap,
    /// Miter length, in half-widths, beyond which a miter becomes a bevel
    pub miter_limit: f32,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            line_join: LineJoin::Miter,
            line_cap: LineCap::Butt,
            miter_limit: 10.0,
        }
    }
}

impl StrokeOptions {
    /// Round joins and caps of the given width
    pub fn rounded(width: f32) -> Self {
        Self {
            width,
            line_join: LineJoin::Round,
            line_cap: LineCap::Round,
            ..Self::default()
        }
    }
}

/// Vertices addressable by a `u16` index buffer
pub const MAX_STROKE_VERTICES: usize = u16::MAX as usize + 1;

/// Index of the next vertex pushed, or `None` when `count` more vertices
/// would not be addressable
fn next_index(vertices: &[Vertex], count: usize) -> Option<u16> {
    if vertices.len() + count > MAX_STROKE_VERTICES {
        return None;
    }
    u16::try_from(vertices.len()).ok()
}

fn push_quad(vertices: &mut Vec<Vertex>, indices: &mut Vec<u16>, corners: [Vec2; 4]) {
    let Some(base) = next_index(vertices, 4) else {
        return;
    };
    vertices.extend(corners.iter().map(|&c| Vertex::at(c)));
    indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
}

fn push_triangle(vertices: &mut Vec<Vertex>, indices: &mut Vec<u16>, a: Vec2, b: Vec2, c: Vec2) {
    let Some(base) = next_index(vertices, 3) else {
        return;
    };
    vertices.extend([Vertex::at(a), Vertex::at(b), Vertex::at(c)]);
    indices.extend_from_slice(&[base, base + 1, base + 2]);
}

/// Fan of triangles around `center` sweeping `sweep` radians from `start`
fn push_arc_fan(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u16>,
    center: Vec2,
    radius: f32,
    start: f32,
    sweep: f32,
) {
    let steps = (sweep.abs() / ROUND_STEP).ceil().max(1.0) as usize;
    let Some(base) = next_index(vertices, steps + 2) else {
        return;
    };
    vertices.push(Vertex::at(center));
    for i in 0..=steps {
        let angle = start + sweep * (i as f32 / steps as f32);
        vertices.push(Vertex::at(center + Vec2::new(angle.cos(), angle.sin()) * radius));
    }
    for i in 0..steps as u16 {
        indices.extend_from_slice(&[base, base + 1 + i, base + 2 + i]);
    }
}

fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

fn push_join(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u16>,
    point: Vec2,
    incoming: (Vec2, Vec2),
    outgoing: (Vec2, Vec2),
    half_width: f32,
    options: &StrokeOptions,
) {
    let (Some(n0), Some(n1)) = (
        segment_normal(incoming.0, incoming.1),
        segment_normal(outgoing.0, outgoing.1),
    ) else {
        return;
    };
    let d0 = incoming.1 - incoming.0;
    let d1 = outgoing.1 - outgoing.0;
    let turn = cross(d0, d1);

    // Outer side is opposite to the turn direction
    let side = if turn > 0.0 { -1.0 } else { 1.0 };
    let v0 = n0 * side;
    let v1 = n1 * side;
    if (v0 - v1).norm() <= f32::EPSILON {
        return;
    }
    let outer0 = point + v0 * half_width;
    let outer1 = point + v1 * half_width;

    match options.line_join {
        LineJoin::Round => {
            let sweep = cross(v0, v1).atan2(v0.dot(&v1));
            push_arc_fan(vertices, indices, point, half_width, angle_of(v0), sweep);
        }
        LineJoin::Bevel => push_triangle(vertices, indices, point, outer0, outer1),
        LineJoin::Miter => {
            let bisector = v0 + v1;
            let cos_half = bisector.norm() / 2.0;
            if cos_half <= f32::EPSILON || 1.0 / cos_half > options.miter_limit {
                push_triangle(vertices, indices, point, outer0, outer1);
            } else {
                let tip = point + bisector.normalize() * (half_width / cos_half);
                push_triangle(vertices, indices, point, outer0, tip);
                push_triangle(vertices, indices, point, tip, outer1);
            }
        }
    }
}

fn push_cap(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u16>,
    point: Vec2,
    normal: Vec2,
    outward: Vec2,
    half_width: f32,
    cap: LineCap,
) {
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let ext = outward * half_width;
            let side = normal * half_width;
            push_quad(
                vertices,
                indices,
                [point + side, point - side, point + side + ext, point - side + ext],
            );
        }
        LineCap::Round => {
            // Half turn from +normal through `outward` to -normal
            let sweep = if cross(normal, outward) >= 0.0 {
                std::f32::consts::PI
            } else {
                -std::f32::consts::PI
            };
            push_arc_fan(vertices, indices, point, half_width, angle_of(normal), sweep);
        }
    }
}

/// Tessellate one subpath's stroke into the buffers
pub(crate) fn tessellate_subpath(
    subpath: &SubPath,
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u16>,
    options: &StrokeOptions,
) {
    let segments = subpath.segments();
    if segments.is_empty() || options.width <= 0.0 {
        return;
    }
    let half_width = options.width / 2.0;

    for &(a, b) in &segments {
        let Some(n) = segment_normal(a, b) else {
            continue;
        };
        let offset = n * half_width;
        push_quad(vertices, indices, [a + offset, a - offset, b + offset, b - offset]);
    }

    for pair in segments.windows(2) {
        push_join(vertices, indices, pair[0].1, pair[0], pair[1], half_width, options);
    }

    if subpath.is_closed() {
        if let (Some(&last), Some(&first)) = (segments.last(), segments.first()) {
            if segments.len() > 1 {
                push_join(vertices, indices, last.1, last, first, half_width, options);
            }
        }
        return;
    }

    let (first_a, first_b) = segments[0];
    let (last_a, last_b) = segments[segments.len() - 1];
    if let (Some(n_start), Some(n_end)) =
        (segment_normal(first_a, first_b), segment_normal(last_a, last_b))
    {
        let start_dir = (first_a - first_b).normalize();
        let end_dir = (last_b - last_a).normalize();
        push_cap(vertices, indices, first_a, n_start, start_dir, half_width, options.line_cap);
        push_cap(vertices, indices, last_b, n_end, end_dir, half_width, options.line_cap);
    }
}
