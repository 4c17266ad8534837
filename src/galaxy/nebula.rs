//! Nebula clouds clustered along the arms, plus a faint haze between them.
//!
//! Cloud look depends on distance from the centre. With `t = radius / R`:
//!
//! | Band | Palette | Softness | Opacity |
//! |------|---------|----------|---------|
//! | t < 0.25 | warm whites | 1.0 | 0.08-0.16 |
//! | t < 0.3 | cool whites | 1.0 | 0.08-0.16 |
//! | t < 0.6 | cool whites | 0.6-1.0 | 0.04-0.10 |
//! | else | blues | 0.6-1.0 | 0.04-0.10 |
//!
//! Smooth, bright clouds near the centre and coarser, dimmer ones toward
//! the rim. Clouds are many and faint so they build up where they overlap.

use glam::Vec3;
use rand::Rng;

use super::{radial_fraction, spin_angle, GeneratedElement};
use crate::config::GalaxyConfig;
use crate::sampling::Sampler;
use crate::textures::TextureCache;
use crate::visuals::BlendMode;

/// Clouds placed along the arms.
pub const NEBULA_COUNT: usize = 2500;

/// Haze sprites filling the space between arms.
pub const HAZE_COUNT: usize = 300;

/// Clouds never sit closer to the centre than this.
const INNER_RADIUS: f32 = 30.0;

/// Exponent on the radial draw; below 1 it front-loads the centre.
const RADIAL_EXPONENT: f32 = 0.8;

/// Below this `t` clouds use the smooth, bright tier.
const SMOOTH_TIER: f32 = 0.3;

const INNER_COLORS: [u32; 4] = [0xffeedd, 0xffddbb, 0xeedd99, 0xddccaa];
const MID_COLORS: [u32; 5] = [0xddeeff, 0xccddff, 0xbbccee, 0xaabbdd, 0xffffff];
const OUTER_COLORS: [u32; 4] = [0x99bbdd, 0x7799cc, 0x6688bb, 0x5577aa];

const HAZE_COLOR: u32 = 0x99aacc;
const HAZE_SOFTNESS: f32 = 0.4;

/// Radial color band of a cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NebulaBand {
    Inner,
    Mid,
    Outer,
}

impl NebulaBand {
    /// Band for a normalized radius `t = radius / galaxy radius`.
    pub fn from_t(t: f32) -> Self {
        if t < 0.25 {
            NebulaBand::Inner
        } else if t < 0.6 {
            NebulaBand::Mid
        } else {
            NebulaBand::Outer
        }
    }

    pub fn palette(&self) -> &'static [u32] {
        match self {
            NebulaBand::Inner => &INNER_COLORS,
            NebulaBand::Mid => &MID_COLORS,
            NebulaBand::Outer => &OUTER_COLORS,
        }
    }
}

/// Generate arm clouds followed by ambient haze.
pub fn generate_nebula_clouds<R: Rng + ?Sized>(
    config: &GalaxyConfig,
    rng: &mut R,
    cache: &mut TextureCache,
) -> Vec<GeneratedElement> {
    let mut s = Sampler::new(rng);
    let mut clouds = Vec::with_capacity(NEBULA_COUNT + HAZE_COUNT);

    for _ in 0..NEBULA_COUNT {
        clouds.push(arm_cloud(&mut s, cache, config));
    }
    for _ in 0..HAZE_COUNT {
        clouds.push(haze(&mut s, cache, config));
    }

    clouds
}

fn arm_cloud<R: Rng + ?Sized>(
    s: &mut Sampler<'_, R>,
    cache: &mut TextureCache,
    config: &GalaxyConfig,
) -> GeneratedElement {
    let arms = config.arms.max(1);
    let galaxy_radius = config.radius;

    let radius = INNER_RADIUS + s.powered(RADIAL_EXPONENT) * (galaxy_radius - INNER_RADIUS);
    let arm = s.random_index(arms as usize);
    let angle = spin_angle(radius, config.spin) + arm as f32 / arms as f32 * std::f32::consts::TAU;

    let spread = radius * 0.15 + 10.0;
    let offset = s.polar_offset(spread);
    let y = s.centered(spread * 0.5 + 10.0);

    let position = Vec3::new(
        angle.cos() * radius + offset.x,
        y,
        angle.sin() * radius + offset.y,
    );

    let t = radial_fraction(radius, galaxy_radius);
    let color = s.pick(NebulaBand::from_t(t).palette());
    let smooth = t < SMOOTH_TIER;
    let softness = if smooth { 1.0 } else { 0.6 + s.random() * 0.4 };
    let opacity = if smooth {
        0.08 + s.random() * 0.08
    } else {
        0.04 + s.random() * 0.06
    };

    let width = 60.0 + s.random() * 80.0 + t * 50.0;

    GeneratedElement::sprite(
        cache,
        position,
        color,
        softness,
        false,
        opacity,
        (width, width * 0.4),
        BlendMode::Additive,
    )
}

fn haze<R: Rng + ?Sized>(
    s: &mut Sampler<'_, R>,
    cache: &mut TextureCache,
    config: &GalaxyConfig,
) -> GeneratedElement {
    let angle = s.random_angle();
    let radius = 60.0 + s.random() * (config.radius * 0.8);
    let position = Vec3::new(angle.cos() * radius, s.centered(15.0), angle.sin() * radius);

    let opacity = 0.02 + s.random() * 0.03;
    let width = 100.0 + s.random() * 150.0;

    GeneratedElement::sprite(
        cache,
        position,
        HAZE_COLOR,
        HAZE_SOFTNESS,
        false,
        opacity,
        (width, width * 0.3),
        BlendMode::Additive,
    )
}
