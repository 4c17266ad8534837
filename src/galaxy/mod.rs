//! Procedural spiral galaxy structure.
//!
//! Generation runs once and produces four populations, each drawn by the
//! renderer with its own primitive and blend mode:
//!
//! | Population | Count | Primitive | Blend |
//! |------------|-------|-----------|-------|
//! | Core glows | 40 + 30 | tinted gradient sprites | additive |
//! | Particles | `particle_count` | points | additive |
//! | Nebula clouds | 2500 + 300 haze | tinted gradient sprites | additive |
//! | Dust lanes | 300 | dark gradient sprites | alpha |
//!
//! Stars are assigned to arms by index so every arm gets the same share;
//! clouds and dust draw their arm at random so they clump organically.
//!
//! # Example
//!
//! ```ignore
//! use galactic::prelude::*;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let mut galaxy = Galaxy::new(GalaxyConfig::default(), &mut rng);
//! galaxy.update(1.0 / 60.0);
//! println!("{} nebula sprites", galaxy.structure().nebula_clouds.len());
//! ```

mod bulge;
mod dust;
mod nebula;
mod particles;

pub use bulge::{generate_bulge, CORE_COUNT, HALO_COUNT};
pub use dust::{generate_dust_lanes, DUST_COUNT};
pub use nebula::{generate_nebula_clouds, NebulaBand, HAZE_COUNT, NEBULA_COUNT};
pub use particles::{branch_angle, generate_particles, ParticleField, PARTICLE_SIZE};

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GalaxyConfig;
use crate::textures::{TextureCache, TextureKey};
use crate::visuals::{hex_to_rgb, BlendMode};

/// Converts radius × spin into radians of arm winding.
pub const SPIN_SCALE: f32 = 0.0005;

/// Angular speed of the whole galaxy about +Y, radians per second.
pub const ROTATION_SPEED: f32 = 0.05;

/// Winding angle of a spiral arm at `radius`.
#[inline]
pub fn spin_angle(radius: f32, spin: f32) -> f32 {
    radius * spin * SPIN_SCALE
}

/// `radius` as a fraction of the galaxy radius. A zero or negative galaxy
/// radius is floored so the result stays finite.
#[inline]
pub(crate) fn radial_fraction(radius: f32, galaxy_radius: f32) -> f32 {
    radius / galaxy_radius.max(f32::EPSILON)
}

/// On-screen size of a generated element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ElementSize {
    /// Point size, for particles.
    Uniform(f32),
    /// Sprite width and height, for flattened glows and clouds.
    Scaled { width: f32, height: f32 },
}

/// A single sprite or point handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedElement {
    pub position: Vec3,
    /// Linear RGB, 0.0-1.0.
    pub color: Vec3,
    pub size: ElementSize,
    /// Opacity, 0.0-1.0.
    pub opacity: f32,
    /// Gradient texture in the galaxy's [`TextureCache`], if textured.
    pub texture: Option<TextureKey>,
    pub blend: BlendMode,
}

impl GeneratedElement {
    /// A flattened gradient sprite tinted with `color`.
    ///
    /// Registers the sprite's texture with `cache` so the renderer can
    /// resolve `texture` later.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn sprite(
        cache: &mut TextureCache,
        position: Vec3,
        color: u32,
        softness: f32,
        is_dark: bool,
        opacity: f32,
        (width, height): (f32, f32),
        blend: BlendMode,
    ) -> Self {
        let key = TextureKey::new(color, softness, is_dark);
        cache.get_or_create_key(key);
        Self {
            position,
            color: hex_to_rgb(color),
            size: ElementSize::Scaled { width, height },
            opacity,
            texture: Some(key),
            blend,
        }
    }
}

/// All generated populations of one galaxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalaxyStructure {
    pub core_glows: Vec<GeneratedElement>,
    pub particles: ParticleField,
    /// Arm clouds followed by the ambient haze between arms.
    pub nebula_clouds: Vec<GeneratedElement>,
    pub dust_lanes: Vec<GeneratedElement>,
}

impl GalaxyStructure {
    /// Total number of sprites and points.
    pub fn element_count(&self) -> usize {
        self.core_glows.len() + self.particles.len() + self.nebula_clouds.len() + self.dust_lanes.len()
    }
}

/// Generate every population of a galaxy.
///
/// Consumes random draws in a fixed order (bulge, particles, nebula, dust),
/// so a seeded source reproduces the same structure. Only `cache` is
/// mutated besides the random source.
pub fn generate<R: Rng + ?Sized>(
    config: &GalaxyConfig,
    rng: &mut R,
    cache: &mut TextureCache,
) -> GalaxyStructure {
    if let Err(e) = config.validate() {
        log::warn!("generating from an invalid galaxy config: {}", e);
    }

    let core_glows = generate_bulge(rng, cache);
    let particles = generate_particles(config, rng);
    let nebula_clouds = generate_nebula_clouds(config, rng, cache);
    let dust_lanes = generate_dust_lanes(config, rng, cache);

    log::debug!(
        "generated galaxy: {} glows, {} particles, {} clouds, {} dust sprites, {} textures",
        core_glows.len(),
        particles.len(),
        nebula_clouds.len(),
        dust_lanes.len(),
        cache.len()
    );

    GalaxyStructure {
        core_glows,
        particles,
        nebula_clouds,
        dust_lanes,
    }
}

/// A generated galaxy together with its texture cache and spin.
#[derive(Debug)]
pub struct Galaxy {
    config: GalaxyConfig,
    structure: GalaxyStructure,
    textures: TextureCache,
    rotation_angle: f32,
}

impl Galaxy {
    /// Generate a galaxy with a fresh texture cache.
    pub fn new<R: Rng + ?Sized>(config: GalaxyConfig, rng: &mut R) -> Self {
        Self::with_cache(config, rng, TextureCache::new())
    }

    /// Generate a galaxy, reusing textures already in `textures`.
    pub fn with_cache<R: Rng + ?Sized>(config: GalaxyConfig, rng: &mut R, mut textures: TextureCache) -> Self {
        let structure = generate(&config, rng, &mut textures);
        Self {
            config,
            structure,
            textures,
            rotation_angle: 0.0,
        }
    }

    /// Advance the galaxy's spin by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        self.rotation_angle = (self.rotation_angle + delta * ROTATION_SPEED).rem_euclid(std::f32::consts::TAU);
    }

    /// Spin about +Y, radians, wrapped to `[0, TAU)`.
    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    /// Spin as a rotation for the galaxy's container transform.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation_angle)
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn structure(&self) -> &GalaxyStructure {
        &self.structure
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }
}
