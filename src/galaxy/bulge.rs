//! Central bulge: a bright compact core inside a dimmer, wider warm halo.

use glam::Vec3;
use rand::Rng;

use super::GeneratedElement;
use crate::sampling::Sampler;
use crate::textures::TextureCache;
use crate::visuals::BlendMode;

/// Sprites in the bright inner core.
pub const CORE_COUNT: usize = 40;

/// Sprites in the diffuse outer halo.
pub const HALO_COUNT: usize = 30;

const CORE_COLORS: [u32; 5] = [0xfff4d6, 0xffe8b0, 0xffd080, 0xffcc66, 0xeebb55];
const HALO_COLOR: u32 = 0xeedd99;

/// Shape of one bulge population.
struct BulgeLayer {
    count: usize,
    softness: f32,
    /// Base opacity and random extra.
    opacity: (f32, f32),
    /// Inner radius and random extra.
    radius: (f32, f32),
    /// Total height of the vertical jitter.
    thickness: f32,
    /// Base size, random extra and height/width ratio.
    size: (f32, f32, f32),
}

const CORE: BulgeLayer = BulgeLayer {
    count: CORE_COUNT,
    softness: 1.2,
    opacity: (0.3, 0.3),
    radius: (0.0, 50.0),
    thickness: 12.0,
    size: (50.0, 100.0, 0.6),
};

const HALO: BulgeLayer = BulgeLayer {
    count: HALO_COUNT,
    softness: 0.6,
    opacity: (0.1, 0.15),
    radius: (30.0, 80.0),
    thickness: 8.0,
    size: (100.0, 150.0, 0.5),
};

/// Generate the core sprites followed by the halo sprites.
pub fn generate_bulge<R: Rng + ?Sized>(rng: &mut R, cache: &mut TextureCache) -> Vec<GeneratedElement> {
    let mut s = Sampler::new(rng);
    let mut glows = Vec::with_capacity(CORE_COUNT + HALO_COUNT);

    for _ in 0..CORE.count {
        let color = s.pick(&CORE_COLORS);
        glows.push(place(&mut s, cache, &CORE, color));
    }
    for _ in 0..HALO.count {
        glows.push(place(&mut s, cache, &HALO, HALO_COLOR));
    }

    log::debug!("bulge: {} core + {} halo sprites", CORE.count, HALO.count);
    glows
}

fn place<R: Rng + ?Sized>(
    s: &mut Sampler<'_, R>,
    cache: &mut TextureCache,
    layer: &BulgeLayer,
    color: u32,
) -> GeneratedElement {
    let opacity = layer.opacity.0 + s.random() * layer.opacity.1;

    let angle = s.random_angle();
    let radius = layer.radius.0 + s.random() * layer.radius.1;
    let position = Vec3::new(angle.cos() * radius, s.centered(layer.thickness), angle.sin() * radius);

    let width = layer.size.0 + s.random() * layer.size.1;

    GeneratedElement::sprite(
        cache,
        position,
        color,
        layer.softness,
        false,
        opacity,
        (width, width * layer.size.2),
        BlendMode::Additive,
    )
}
