//! Per-window compositing and title-bar chrome
//!
//! A window is drawn as its cached surface, then (when enabled) a title-bar
//! strip and a stroked close glyph directly on the target. Chrome is never
//! cached.

use crate::backend::{DrawTrianglesOptions, FillRule, RenderBackend};
use crate::config::CompositorSettings;
use crate::foundation::math::{to_vec2, V2i, Vec2};
use crate::manager::record::WindowRecord;
use crate::vector::{Path, StrokeOptions, Vertex};
use crate::window::Color;

/// The two diagonal strokes of the close glyph for a window at `position`
/// with outer `size`
///
/// The glyph is inset a quarter title-bar height from the top-right corner
/// and spans half a title-bar height on each axis.
pub fn close_glyph_segments(
    position: V2i,
    size: V2i,
    settings: &CompositorSettings,
) -> [(Vec2, Vec2); 2] {
    let quarter = settings.quarter_title_bar() as f32;
    let half = settings.half_title_bar() as f32;
    // Float math: windows may sit anywhere in the i32 plane
    let corner = to_vec2(position) + Vec2::new(size.x as f32, 0.0);
    let anchor = Vec2::new(corner.x - quarter, corner.y + quarter);

    [
        (anchor, Vec2::new(anchor.x - half, anchor.y + half)),
        (Vec2::new(anchor.x - half, anchor.y), Vec2::new(anchor.x, anchor.y + half)),
    ]
}

/// Close glyph as a path of two open subpaths
pub fn close_glyph_path(position: V2i, size: V2i, settings: &CompositorSettings) -> Path {
    let mut path = Path::new();
    for (from, to) in close_glyph_segments(position, size, settings) {
        path.move_to(from.x, from.y);
        path.line_to(to.x, to.y);
    }
    path
}

/// Tessellated close glyph, every vertex colored `color`
pub fn tessellate_close_glyph(
    position: V2i,
    size: V2i,
    color: Color,
    settings: &CompositorSettings,
) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let options = StrokeOptions::rounded(settings.close_glyph_stroke_width);
    close_glyph_path(position, size, settings)
        .append_vertices_and_indices_for_stroke(&mut vertices, &mut indices, &options);

    let color = color.to_normalized();
    for v in &mut vertices {
        v.set_color(color);
    }
    (vertices, indices)
}

/// Draw one window onto `target`
pub(crate) fn composite_window<B: RenderBackend>(
    backend: &mut B,
    target: &mut B::Surface,
    record: &WindowRecord<B::Surface>,
    settings: &CompositorSettings,
) {
    backend.blit(target, &record.surface, record.position);

    let config = &record.config;
    if !config.has_title_bar() {
        return;
    }

    backend.fill_rect(
        target,
        to_vec2(record.position),
        Vec2::new(record.size.x as f32, settings.title_bar_height as f32),
        config.title_bg_color,
        false,
    );

    if config.closable() {
        let (vertices, indices) =
            tessellate_close_glyph(record.position, record.size, config.title_button_color, settings);
        let options = DrawTrianglesOptions {
            anti_alias: settings.anti_alias_glyph,
            fill_rule: FillRule::FillAll,
        };
        backend.draw_triangles(target, &vertices, &indices, &options);
    }
}
