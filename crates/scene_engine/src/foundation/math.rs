//! Math utilities and types
//!
//! Provides the value-type glue shared across the engine. These are plain
//! value semantics with no invariants beyond arithmetic.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Relative epsilon comparison for two floats
///
/// Scales the tolerance by the larger magnitude so values far from zero
/// compare sensibly.
pub fn relatively_equal(a: f32, b: f32) -> bool {
    let diff = (a - b).abs();
    diff <= f32::EPSILON * a.abs().max(b.abs())
}

/// RGBA color with `f32` channels
///
/// Channels are not clamped; HDR values are representable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Opaque white
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Opaque red
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Opaque green
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };

    /// Opaque blue
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    /// Create an opaque color from RGB channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA channels
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relatively_equal() {
        assert!(relatively_equal(1.0, 1.0));
        assert!(relatively_equal(1e6, 1e6 * (1.0 + f32::EPSILON * 0.5)));
        assert!(!relatively_equal(1.0, 1.001));
    }

    #[test]
    fn test_color_defaults_to_opaque_black() {
        let c = Color::default();
        assert_relative_eq!(c.r, 0.0);
        assert_relative_eq!(c.a, 1.0);
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn test_color_rgb_is_opaque() {
        let c = Color::rgb(0.2, 0.4, 0.6);
        assert_relative_eq!(c.a, 1.0);
        assert_ne!(c, Color::rgba(0.2, 0.4, 0.6, 0.5));
    }
}
