//! CPU software backend over `image::RgbaImage`
//!
//! Straight-alpha source-over blending. Triangle lists are rasterised per
//! draw call into a sample grid so the fill rule is applied across the
//! whole list; anti-aliasing uses a 4x4 supersample grid.

use image::{Rgba, RgbaImage};

use crate::backend::{BackendError, DrawTrianglesOptions, FillRule, RenderBackend};
use crate::foundation::math::{utils::cross, is_positive_size, V2i, Vec2};
use crate::vector::Vertex;
use crate::window::Color;

/// Largest surface edge the software backend will allocate
pub const MAX_SURFACE_EXTENT: i32 = 16_384;

/// Supersample grid edge used when anti-aliasing
const AA_GRID: usize = 4;

/// CPU rasteriser
#[derive(Debug, Default, Clone)]
pub struct SoftwareBackend {
    surfaces_created: usize,
}

impl SoftwareBackend {
    /// Create a software backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Transparent target surface for compositing frames into
    pub fn new_target(width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    /// Number of surfaces allocated so far
    pub const fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }
}

fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn normalized(pixel: Rgba<u8>) -> [f32; 4] {
    pixel.0.map(|c| f32::from(c) / 255.0)
}

/// Source-over blend of a straight-alpha color scaled by `coverage`
fn blend(dst: &mut Rgba<u8>, src: [f32; 4], coverage: f32) {
    let sa = src[3] * coverage;
    if sa <= 0.0 {
        return;
    }
    let d = normalized(*dst);
    let da = d[3];
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    for i in 0..3 {
        dst.0[i] = to_channel((src[i] * sa + d[i] * da * (1.0 - sa)) / out_a);
    }
    dst.0[3] = to_channel(out_a);
}

/// Overlap of the unit interval `[p, p + 1]` with `[lo, hi]`
fn overlap(p: f32, lo: f32, hi: f32) -> f32 {
    (hi.min(p + 1.0) - lo.max(p)).clamp(0.0, 1.0)
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    cross(b - a, p - a)
}

#[derive(Debug, Clone, Copy, Default)]
struct Sample {
    winding: i32,
    hits: u32,
    color: [f32; 4],
}

impl Sample {
    fn passes(&self, rule: FillRule) -> bool {
        match rule {
            FillRule::FillAll => self.hits > 0,
            FillRule::NonZero => self.winding != 0,
            FillRule::EvenOdd => self.winding % 2 != 0,
        }
    }
}

impl RenderBackend for SoftwareBackend {
    type Surface = RgbaImage;

    fn create_surface(&mut self, size: V2i) -> Result<RgbaImage, BackendError> {
        if !is_positive_size(size) {
            return Err(BackendError::InvalidSurfaceSize {
                width: size.x,
                height: size.y,
            });
        }
        if size.x > MAX_SURFACE_EXTENT || size.y > MAX_SURFACE_EXTENT {
            return Err(BackendError::Allocation(format!(
                "{}x{} exceeds the {}px edge limit",
                size.x, size.y, MAX_SURFACE_EXTENT
            )));
        }
        self.surfaces_created += 1;
        Ok(RgbaImage::new(size.x as u32, size.y as u32))
    }

    fn surface_size(&self, surface: &RgbaImage) -> V2i {
        V2i::new(surface.width() as i32, surface.height() as i32)
    }

    fn fill(&mut self, surface: &mut RgbaImage, color: Color) {
        let pixel = Rgba(color.to_array());
        for p in surface.pixels_mut() {
            *p = pixel;
        }
    }

    fn blit(&mut self, target: &mut RgbaImage, source: &RgbaImage, offset: V2i) {
        let (tw, th) = (i64::from(target.width()), i64::from(target.height()));
        for (sx, sy, pixel) in source.enumerate_pixels() {
            let tx = i64::from(offset.x) + i64::from(sx);
            let ty = i64::from(offset.y) + i64::from(sy);
            if tx < 0 || ty < 0 || tx >= tw || ty >= th {
                continue;
            }
            blend(target.get_pixel_mut(tx as u32, ty as u32), normalized(*pixel), 1.0);
        }
    }

    fn fill_rect(
        &mut self,
        target: &mut RgbaImage,
        position: Vec2,
        size: Vec2,
        color: Color,
        anti_alias: bool,
    ) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let (x0, y0) = (position.x, position.y);
        let (x1, y1) = (position.x + size.x, position.y + size.y);
        let src = normalized(Rgba(color.to_array()));

        let px_start = x0.floor().max(0.0) as u32;
        let py_start = y0.floor().max(0.0) as u32;
        let px_end = (x1.ceil().max(0.0) as u32).min(target.width());
        let py_end = (y1.ceil().max(0.0) as u32).min(target.height());

        for py in py_start..py_end {
            for px in px_start..px_end {
                let (fx, fy) = (px as f32, py as f32);
                let coverage = if anti_alias {
                    overlap(fx, x0, x1) * overlap(fy, y0, y1)
                } else {
                    let (cx, cy) = (fx + 0.5, fy + 0.5);
                    if cx >= x0 && cx < x1 && cy >= y0 && cy < y1 { 1.0 } else { 0.0 }
                };
                blend(target.get_pixel_mut(px, py), src, coverage);
            }
        }
    }

    fn draw_triangles(
        &mut self,
        target: &mut RgbaImage,
        vertices: &[Vertex],
        indices: &[u16],
        options: &DrawTrianglesOptions,
    ) {
        let triangles: Vec<[Vertex; 3]> = indices
            .chunks_exact(3)
            .filter_map(|tri| {
                Some([
                    *vertices.get(usize::from(tri[0]))?,
                    *vertices.get(usize::from(tri[1]))?,
                    *vertices.get(usize::from(tri[2]))?,
                ])
            })
            .collect();
        if triangles.is_empty() || target.width() == 0 || target.height() == 0 {
            return;
        }

        let (mut min, mut max) = (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN));
        for v in triangles.iter().flatten() {
            min = min.inf(&v.point());
            max = max.sup(&v.point());
        }
        let bx0 = min.x.floor().max(0.0) as usize;
        let by0 = min.y.floor().max(0.0) as usize;
        let bx1 = (max.x.ceil().max(0.0) as usize).min(target.width() as usize);
        let by1 = (max.y.ceil().max(0.0) as usize).min(target.height() as usize);
        if bx0 >= bx1 || by0 >= by1 {
            return;
        }

        let grid = if options.anti_alias { AA_GRID } else { 1 };
        let spp = grid * grid;
        let bw = bx1 - bx0;
        let mut samples = vec![Sample::default(); bw * (by1 - by0) * spp];

        for [v0, v1, v2] in &triangles {
            let (p0, p1, p2) = (v0.point(), v1.point(), v2.point());
            let area = edge(p0, p1, p2);
            if area.abs() <= f32::EPSILON {
                continue;
            }
            let orientation = if area > 0.0 { 1 } else { -1 };

            let tmin = p0.inf(&p1).inf(&p2);
            let tmax = p0.sup(&p1).sup(&p2);
            let tx0 = (tmin.x.floor().max(0.0) as usize).max(bx0);
            let ty0 = (tmin.y.floor().max(0.0) as usize).max(by0);
            let tx1 = (tmax.x.ceil().max(0.0) as usize).min(bx1);
            let ty1 = (tmax.y.ceil().max(0.0) as usize).min(by1);

            for py in ty0..ty1 {
                for px in tx0..tx1 {
                    for s in 0..spp {
                        let p = Vec2::new(
                            px as f32 + ((s % grid) as f32 + 0.5) / grid as f32,
                            py as f32 + ((s / grid) as f32 + 0.5) / grid as f32,
                        );
                        let w0 = edge(p1, p2, p) / area;
                        let w1 = edge(p2, p0, p) / area;
                        let w2 = 1.0 - w0 - w1;
                        if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                            continue;
                        }
                        let sample = &mut samples[((py - by0) * bw + (px - bx0)) * spp + s];
                        sample.winding += orientation;
                        sample.hits += 1;
                        for c in 0..4 {
                            sample.color[c] = w0 * v0.color[c] + w1 * v1.color[c] + w2 * v2.color[c];
                        }
                    }
                }
            }
        }

        for py in by0..by1 {
            for px in bx0..bx1 {
                let base = ((py - by0) * bw + (px - bx0)) * spp;
                let mut sum = [0.0f32; 4];
                let mut passing = 0usize;
                for sample in &samples[base..base + spp] {
                    if sample.passes(options.fill_rule) {
                        passing += 1;
                        for c in 0..4 {
                            sum[c] += sample.color[c];
                        }
                    }
                }
                if passing == 0 {
                    continue;
                }
                let color = sum.map(|c| c / passing as f32);
                let coverage = passing as f32 / spp as f32;
                blend(target.get_pixel_mut(px as u32, py as u32), color, coverage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_surface_rejects_non_positive() {
        let mut backend = SoftwareBackend::new();
        assert_eq!(
            backend.create_surface(V2i::new(0, 10)),
            Err(BackendError::InvalidSurfaceSize { width: 0, height: 10 })
        );
        assert!(backend.create_surface(V2i::new(10, -5)).is_err());
        assert_eq!(backend.surfaces_created(), 0);

        let surface = backend.create_surface(V2i::new(3, 2)).unwrap();
        assert_eq!(backend.surface_size(&surface), V2i::new(3, 2));
    }

    #[test]
    fn test_create_surface_rejects_oversized() {
        let mut backend = SoftwareBackend::new();
        for size in [V2i::new(MAX_SURFACE_EXTENT + 1, 1), V2i::new(1, i32::MAX)] {
            assert!(matches!(backend.create_surface(size), Err(BackendError::Allocation(_))));
        }
        assert_eq!(backend.surfaces_created(), 0);

        let edge = backend.create_surface(V2i::new(MAX_SURFACE_EXTENT, 1)).unwrap();
        assert_eq!(backend.surface_size(&edge), V2i::new(MAX_SURFACE_EXTENT, 1));
    }

    #[test]
    fn test_blit_clips_and_translates() {
        let mut backend = SoftwareBackend::new();
        let mut source = backend.create_surface(V2i::new(4, 4)).unwrap();
        backend.fill(&mut source, Color::rgb(255, 0, 0));

        let mut target = SoftwareBackend::new_target(6, 6);
        backend.blit(&mut target, &source, V2i::new(4, -2));

        assert_eq!(target.get_pixel(4, 0).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(5, 1).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(5, 2).0, [0, 0, 0, 0]);
        assert_eq!(target.get_pixel(3, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_blit_blends_translucent_source() {
        let mut backend = SoftwareBackend::new();
        let mut source = backend.create_surface(V2i::new(1, 1)).unwrap();
        backend.fill(&mut source, Color::rgba(255, 255, 255, 0));

        let mut target = SoftwareBackend::new_target(1, 1);
        backend.fill(&mut target, Color::rgb(10, 20, 30));
        backend.blit(&mut target, &source, V2i::zeros());
        assert_eq!(target.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_fill_rect_pixel_centers() {
        let mut backend = SoftwareBackend::new();
        let mut target = SoftwareBackend::new_target(10, 10);
        backend.fill_rect(
            &mut target,
            Vec2::new(2.0, 3.0),
            Vec2::new(4.0, 2.0),
            Color::rgb(0, 255, 0),
            false,
        );

        assert_eq!(target.get_pixel(2, 3).0, [0, 255, 0, 255]);
        assert_eq!(target.get_pixel(5, 4).0, [0, 255, 0, 255]);
        assert_eq!(target.get_pixel(6, 4).0, [0, 0, 0, 0]);
        assert_eq!(target.get_pixel(2, 5).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_anti_aliased_edge() {
        let mut backend = SoftwareBackend::new();
        let mut target = SoftwareBackend::new_target(4, 1);
        backend.fill_rect(&mut target, Vec2::new(0.0, 0.0), Vec2::new(1.5, 1.0), Color::WHITE, true);

        assert_eq!(target.get_pixel(0, 0).0[3], 255);
        assert_eq!(target.get_pixel(1, 0).0[3], 128);
        assert_eq!(target.get_pixel(2, 0).0[3], 0);
    }

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vertex> {
        vec![
            Vertex::at(Vec2::new(x0, y0)),
            Vertex::at(Vec2::new(x1, y0)),
            Vertex::at(Vec2::new(x0, y1)),
            Vertex::at(Vec2::new(x1, y1)),
        ]
    }

    #[test]
    fn test_triangles_take_vertex_color() {
        let mut backend = SoftwareBackend::new();
        let mut target = SoftwareBackend::new_target(8, 8);
        let mut vertices = square(0.0, 0.0, 8.0, 8.0);
        for v in &mut vertices {
            v.set_color(Color::rgb(0, 0, 255).to_normalized());
        }
        backend.draw_triangles(&mut target, &vertices, &[0, 1, 2, 1, 3, 2], &DrawTrianglesOptions::default());

        assert_eq!(target.get_pixel(1, 1).0, [0, 0, 255, 255]);
        assert_eq!(target.get_pixel(6, 6).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_even_odd_cancels_overlap() {
        let mut backend = SoftwareBackend::new();
        let mut vertices = square(0.0, 0.0, 4.0, 4.0);
        vertices.extend(square(0.0, 0.0, 4.0, 4.0));
        // Both squares wind the same way; the second is the first, repeated
        let indices = [0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6];

        let mut even_odd = SoftwareBackend::new_target(4, 4);
        let options = DrawTrianglesOptions { anti_alias: false, fill_rule: FillRule::EvenOdd };
        backend.draw_triangles(&mut even_odd, &vertices, &indices, &options);
        assert_eq!(even_odd.get_pixel(1, 1).0[3], 0);

        let mut fill_all = SoftwareBackend::new_target(4, 4);
        backend.draw_triangles(&mut fill_all, &vertices, &indices, &DrawTrianglesOptions::default());
        assert_eq!(fill_all.get_pixel(1, 1).0[3], 255);
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let mut backend = SoftwareBackend::new();
        let mut target = SoftwareBackend::new_target(4, 4);
        let vertices = square(0.0, 0.0, 4.0, 4.0);
        backend.draw_triangles(&mut target, &vertices, &[0, 1, 9], &DrawTrianglesOptions::default());
        assert!(target.pixels().all(|p| p.0[3] == 0));
    }
}
