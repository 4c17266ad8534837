//! Visual attributes shared by every generated population.
//!
//! Colors are carried as linear `Vec3` RGB in the 0.0-1.0 range and are
//! authored as 24-bit hex values, the same way the palettes in the generator
//! are written down.
//!
//! # Usage
//!
//! ```ignore
//! use galactic::visuals::{hex_to_rgb, lerp_rgb, BlendMode};
//!
//! let inside = hex_to_rgb(0xffaa33);
//! let outside = hex_to_rgb(0x1b3984);
//! let mid = lerp_rgb(inside, outside, 0.5);
//! assert_eq!(BlendMode::default(), BlendMode::Additive);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How a population is composited onto the frame by the renderer.
///
/// The distinction changes visual layering, not just color: glows and
/// nebulae accumulate light, while dust lanes occlude what is behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Standard alpha ("normal") blending.
    ///
    /// Sprites darken or cover whatever lies behind them. Used for dust.
    Alpha,

    /// Additive blending (default).
    ///
    /// Colors are added together, so overlapping sprites become brighter.
    #[default]
    Additive,
}

impl BlendMode {
    /// Whether overlapping sprites accumulate brightness.
    #[inline]
    pub fn is_additive(&self) -> bool {
        matches!(self, BlendMode::Additive)
    }
}

/// Convert a `0xRRGGBB` value into an RGB vector with channels in 0.0-1.0.
#[inline]
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let [_, r, g, b] = hex.to_be_bytes();
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Split a `0xRRGGBB` value into its byte channels.
#[inline]
pub fn hex_to_bytes(hex: u32) -> [u8; 3] {
    let [_, r, g, b] = hex.to_be_bytes();
    [r, g, b]
}

/// Linear interpolation between two colors.
///
/// `t` is not clamped; weights slightly past 1.0 extrapolate.
#[inline]
pub fn lerp_rgb(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    // Convex form keeps both endpoints exact.
    from * (1.0 - t) + to * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_channels() {
        let c = hex_to_rgb(0xff8000);
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes(0x1b3984), [0x1b, 0x39, 0x84]);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = hex_to_rgb(0xffaa33);
        let b = hex_to_rgb(0x1b3984);
        assert_eq!(lerp_rgb(a, b, 0.0), a);
        assert_eq!(lerp_rgb(a, b, 1.0), b);
    }

    #[test]
    fn test_blend_mode_default_is_additive() {
        assert!(BlendMode::default().is_additive());
        assert!(!BlendMode::Alpha.is_additive());
    }
}
