//! Radial gradient textures for glow, nebula and dust sprites.
//!
//! Every sprite population in the galaxy is drawn with a small circular
//! gradient image tinted to the sprite's color. There are only a few dozen
//! distinct `(color, softness, darkness)` combinations across thousands of
//! sprites, so images are generated once and shared through a
//! [`TextureCache`].
//!
//! # Quick Start
//!
//! ```ignore
//! use galactic::textures::TextureCache;
//!
//! let mut cache = TextureCache::new();
//! let a = cache.get_or_create(0xddeeff, 0.61, false);
//! let b = cache.get_or_create(0xddeeff, 0.64, false);
//! assert!(std::sync::Arc::ptr_eq(&a, &b)); // both quantize to 0.6
//! ```
//!
//! # Gradient Profiles
//!
//! | Profile | Stops (offset: alpha) |
//! |---------|-----------------------|
//! | Soft | 0: 0.4s, 0.2: 0.25s, 0.5: 0.1s, 0.8: 0.03s, 1: 0 |
//! | Dark | 0: 0.6, 0.3: 0.35, 0.6: 0.1, 1: 0 |
//!
//! `s` is the quantized softness.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::visuals::hex_to_bytes;

/// Edge length of cached sprite gradients, in pixels.
pub const SPRITE_TEXTURE_SIZE: u32 = 128;

/// Edge length of the sun glow gradient, in pixels.
pub const GLOW_TEXTURE_SIZE: u32 = 64;

/// Cache key for a gradient texture.
///
/// Softness is stored in tenths so two requests that round to the same
/// one-decimal value share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureKey {
    /// Tint as `0xRRGGBB`.
    pub color: u32,
    /// `round(softness * 10)`.
    pub softness_tenths: i32,
    /// Dust profile instead of the soft nebula profile.
    pub is_dark: bool,
}

impl TextureKey {
    /// Build a key, quantizing `softness` to one decimal place.
    pub fn new(color: u32, softness: f32, is_dark: bool) -> Self {
        Self {
            color,
            softness_tenths: (softness * 10.0).round() as i32,
            is_dark,
        }
    }

    /// Quantized softness, `round(softness * 10) / 10`.
    #[inline]
    pub fn softness(&self) -> f32 {
        self.softness_tenths as f32 / 10.0
    }

    /// Gradient profile this key renders with.
    pub fn profile(&self) -> GradientProfile {
        if self.is_dark {
            GradientProfile::Dark
        } else {
            GradientProfile::Soft {
                softness: self.softness(),
            }
        }
    }

    /// Stable file stem, e.g. `ddeeff-s06-soft`.
    pub fn file_stem(&self) -> String {
        let kind = if self.is_dark { "dark" } else { "soft" };
        format!("{:06x}-s{:02}-{}", self.color, self.softness_tenths, kind)
    }
}

/// A color stop along a radial gradient.
///
/// `rgb` is in 0-255, `alpha` in 0.0-1.0, `offset` in 0.0-1.0 of the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub rgb: [f32; 3],
    pub alpha: f32,
}

impl ColorStop {
    fn tinted(offset: f32, rgb: [u8; 3], alpha: f32) -> Self {
        Self {
            offset,
            rgb: rgb.map(f32::from),
            alpha,
        }
    }
}

/// Alpha falloff shape of a sprite gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientProfile {
    /// Nebula profile. Stop alphas scale with softness.
    Soft {
        /// Quantized softness.
        softness: f32,
    },
    /// Dust profile. Fixed, denser alpha stops.
    Dark,
}

impl GradientProfile {
    /// `(offset, alpha)` pairs of this profile.
    pub fn alpha_stops(&self) -> Vec<(f32, f32)> {
        match *self {
            GradientProfile::Soft { softness: s } => vec![
                (0.0, 0.4 * s),
                (0.2, 0.25 * s),
                (0.5, 0.1 * s),
                (0.8, 0.03 * s),
                (1.0, 0.0),
            ],
            GradientProfile::Dark => vec![(0.0, 0.6), (0.3, 0.35), (0.6, 0.1), (1.0, 0.0)],
        }
    }

    /// Color stops for a given tint.
    pub fn color_stops(&self, color: u32) -> Vec<ColorStop> {
        let rgb = hex_to_bytes(color);
        self.alpha_stops()
            .into_iter()
            .map(|(offset, alpha)| ColorStop::tinted(offset, rgb, alpha))
            .collect()
    }
}

/// A generated gradient image.
#[derive(Debug, Clone)]
pub struct GradientTexture {
    /// Key this texture was generated for, `None` for one-off textures.
    pub key: Option<TextureKey>,
    /// RGBA8 pixels.
    pub image: RgbaImage,
}

impl GradientTexture {
    /// Render the gradient for a cache key.
    pub fn from_key(key: TextureKey) -> Self {
        let stops = key.profile().color_stops(key.color);
        Self {
            key: Some(key),
            image: render_radial_gradient(SPRITE_TEXTURE_SIZE, &stops),
        }
    }

    /// Warm glow drawn around the sun body.
    pub fn sun_glow() -> Self {
        let stops = [
            ColorStop { offset: 0.0, rgb: [255.0, 200.0, 50.0], alpha: 1.0 },
            ColorStop { offset: 0.2, rgb: [255.0, 150.0, 0.0], alpha: 0.6 },
            ColorStop { offset: 0.5, rgb: [255.0, 100.0, 0.0], alpha: 0.2 },
            ColorStop { offset: 1.0, rgb: [255.0, 50.0, 0.0], alpha: 0.0 },
        ];
        Self {
            key: None,
            image: render_radial_gradient(GLOW_TEXTURE_SIZE, &stops),
        }
    }

    /// Texture width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Texture height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes (width * height * 4), ready for upload.
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Write the texture as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Shared handle to a cached texture.
pub type TextureHandle = Arc<GradientTexture>;

/// Memoizes gradient textures by quantized key.
///
/// Entries are never evicted; the key space is small (palette colors times
/// a handful of softness buckets). Inserting requires `&mut self`, so
/// concurrent inserts are serialized by whoever owns the cache. Handles are
/// `Arc`s and may be read from other threads.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<TextureKey, TextureHandle>,
    hits: u64,
}

impl TextureCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the texture for `(color, softness, is_dark)`, generating it on a miss.
    pub fn get_or_create(&mut self, color: u32, softness: f32, is_dark: bool) -> TextureHandle {
        self.get_or_create_key(TextureKey::new(color, softness, is_dark))
    }

    /// Fetch the texture for an already-quantized key.
    pub fn get_or_create_key(&mut self, key: TextureKey) -> TextureHandle {
        if let Some(handle) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(handle);
        }
        log::trace!("generating gradient texture {}", key.file_stem());
        let handle = Arc::new(GradientTexture::from_key(key));
        self.entries.insert(key, Arc::clone(&handle));
        handle
    }

    /// Look up a texture without generating it.
    pub fn get(&self, key: &TextureKey) -> Option<&TextureHandle> {
        self.entries.get(key)
    }

    /// Number of distinct textures generated.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of requests served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Iterate over all cached textures, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&TextureKey, &TextureHandle)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(key, _)| **key);
        entries.into_iter()
    }

    /// Write every cached texture into `dir` as `<file_stem>.png`.
    ///
    /// Returns the number of files written.
    pub fn save_pngs<P: AsRef<Path>>(&self, dir: P) -> Result<usize, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let mut written = 0;
        for (key, texture) in self.iter() {
            texture.save_png(dir.join(format!("{}.png", key.file_stem())))?;
            written += 1;
        }
        Ok(written)
    }
}

/// Rasterize a centred radial gradient into a square image.
///
/// Pixels are sampled at their centres; anything at or beyond the radius
/// takes the last stop. Channels are interpolated linearly between stops.
pub fn render_radial_gradient(size: u32, stops: &[ColorStop]) -> RgbaImage {
    let center = size as f32 / 2.0;
    let radius = center.max(f32::EPSILON);

    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let t = (dx * dx + dy * dy).sqrt() / radius;
        let (rgb, alpha) = sample_stops(stops, t);
        Rgba([
            to_byte(rgb[0] / 255.0),
            to_byte(rgb[1] / 255.0),
            to_byte(rgb[2] / 255.0),
            to_byte(alpha),
        ])
    })
}

/// Interpolate color and alpha at offset `t` along sorted stops.
fn sample_stops(stops: &[ColorStop], t: f32) -> ([f32; 3], f32) {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return ([0.0; 3], 0.0),
    };
    if t <= first.offset {
        return (first.rgb, first.alpha);
    }
    if t >= last.offset {
        return (last.rgb, last.alpha);
    }

    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let f = (t - a.offset) / span;
            let rgb = [
                a.rgb[0] + (b.rgb[0] - a.rgb[0]) * f,
                a.rgb[1] + (b.rgb[1] - a.rgb[1]) * f,
                a.rgb[2] + (b.rgb[2] - a.rgb[2]) * f,
            ];
            return (rgb, a.alpha + (b.alpha - a.alpha) * f);
        }
    }
    (last.rgb, last.alpha)
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_quantizes_softness() {
        assert_eq!(TextureKey::new(0xffffff, 0.61, false), TextureKey::new(0xffffff, 0.64, false));
        assert_ne!(TextureKey::new(0xffffff, 0.64, false), TextureKey::new(0xffffff, 0.66, false));
        assert_eq!(TextureKey::new(0xffffff, 1.2, false).softness_tenths, 12);
    }

    #[test]
    fn test_cache_idempotent() {
        let mut cache = TextureCache::new();
        let a = cache.get_or_create(0xeedd99, 0.6, false);
        let b = cache.get_or_create(0xeedd99, 0.6, false);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_cache_shares_softness_bucket() {
        let mut cache = TextureCache::new();
        let a = cache.get_or_create(0xddeeff, 0.61, false);
        let b = cache.get_or_create(0xddeeff, 0.64, false);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_dark_flag_separates_entries() {
        let mut cache = TextureCache::new();
        let soft = cache.get_or_create(0x332211, 1.0, false);
        let dark = cache.get_or_create(0x332211, 1.0, true);
        assert!(!Arc::ptr_eq(&soft, &dark));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_gradient_dimensions_and_tint() {
        let tex = GradientTexture::from_key(TextureKey::new(0x336699, 1.0, false));
        assert_eq!(tex.width(), SPRITE_TEXTURE_SIZE);
        assert_eq!(tex.height(), SPRITE_TEXTURE_SIZE);
        assert_eq!(tex.as_rgba().len(), (128 * 128 * 4) as usize);

        let center = tex.image.get_pixel(64, 64);
        assert_eq!(&center.0[..3], &[0x33, 0x66, 0x99]);
    }

    #[test]
    fn test_soft_profile_scales_with_softness() {
        let strong = GradientTexture::from_key(TextureKey::new(0xffffff, 1.0, false));
        let weak = GradientTexture::from_key(TextureKey::new(0xffffff, 0.4, false));
        let a = strong.image.get_pixel(64, 64).0[3];
        let b = weak.image.get_pixel(64, 64).0[3];
        // ~0.4 and ~0.16 near the centre
        assert!(a > b);
        assert!((a as i32 - 102).abs() <= 2);
        assert!((b as i32 - 41).abs() <= 2);
    }

    #[test]
    fn test_dark_profile_ignores_softness() {
        let a = GradientTexture::from_key(TextureKey::new(0x1a0d05, 1.0, true));
        let b = GradientTexture::from_key(TextureKey::new(0x1a0d05, 0.3, true));
        assert_eq!(a.image, b.image);
        assert!((a.image.get_pixel(64, 64).0[3] as i32 - 153).abs() <= 2);
    }

    #[test]
    fn test_corners_are_transparent() {
        let tex = GradientTexture::from_key(TextureKey::new(0xffffff, 1.0, false));
        assert_eq!(tex.image.get_pixel(0, 0).0[3], 0);
        assert_eq!(tex.image.get_pixel(127, 127).0[3], 0);
    }

    #[test]
    fn test_sun_glow_core_is_opaque() {
        let glow = GradientTexture::sun_glow();
        assert_eq!(glow.width(), GLOW_TEXTURE_SIZE);
        let px = glow.image.get_pixel(32, 32).0;
        assert!(px[3] > 240);
        assert_eq!(px[0], 255);
    }

    #[test]
    fn test_sample_stops_interpolates() {
        let stops = GradientProfile::Dark.color_stops(0x000000);
        let (_, alpha) = sample_stops(&stops, 0.15);
        assert!((alpha - 0.475).abs() < 1e-5);
        let (_, alpha) = sample_stops(&stops, 2.0);
        assert_eq!(alpha, 0.0);
    }
}
