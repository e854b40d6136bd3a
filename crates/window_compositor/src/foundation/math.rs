//! Math utilities and types
//!
//! Window geometry is integral (pixels); tessellated geometry is `f32`.

pub use nalgebra::{Vector2, Vector4};

/// Integer 2D vector, used both as a point and as a size
pub type V2i = Vector2<i32>;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type (normalized RGBA colors)
pub type Vec4 = Vector4<f32>;

/// Convert an integer point to floating point
pub fn to_vec2(v: V2i) -> Vec2 {
    Vec2::new(v.x as f32, v.y as f32)
}

/// Whether a size has strictly positive extent on both axes
pub fn is_positive_size(size: V2i) -> bool {
    size.x > 0 && size.y > 0
}

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Unit normal of the segment `a -> b`, rotated 90 degrees counter-clockwise.
    /// Returns `None` for degenerate segments.
    pub fn segment_normal(a: Vec2, b: Vec2) -> Option<Vec2> {
        let d = b - a;
        let len = d.norm();
        if len <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(-d.y / len, d.x / len))
    }

    /// 2D cross product (z component of the 3D cross)
    pub fn cross(a: Vec2, b: Vec2) -> f32 {
        a.x * b.y - a.y * b.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_positive_size() {
        assert!(is_positive_size(V2i::new(1, 1)));
        assert!(!is_positive_size(V2i::new(0, 10)));
        assert!(!is_positive_size(V2i::new(10, -1)));
    }

    #[test]
    fn test_segment_normal() {
        let n = utils::segment_normal(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)).unwrap();
        assert_relative_eq!(n.x, 0.0);
        assert_relative_eq!(n.y, 1.0);

        assert!(utils::segment_normal(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn test_integer_vectors_add() {
        let pos = V2i::new(10, 20) + V2i::new(0, 24);
        assert_eq!(pos, V2i::new(10, 44));
        assert_eq!(to_vec2(pos), Vec2::new(10.0, 44.0));
    }
}
