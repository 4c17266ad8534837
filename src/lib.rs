//! # Galactic - procedural spiral galaxy with an orbiting solar system
//!
//! Produces the data for an astronomical scene: a spiral galaxy generated once
//! from a handful of parameters, and a solar system whose Sun follows an
//! epicyclic orbit through it. Rendering is left to the caller; everything
//! here is positions, colors, sizes, opacities, blend modes and gradient
//! images.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galactic::prelude::*;
//!
//! fn main() {
//!     let config = SceneConfig {
//!         seed: Some(42),
//!         ..Default::default()
//!     };
//!     let mut scene = Scene::new(config);
//!
//!     for _ in 0..600 {
//!         scene.update(1.0 / 60.0);
//!     }
//!
//!     let buffers = GalaxyBuffers::from_structure(scene.galaxy().structure());
//!     println!("{} sprite batches", buffers.sprite_batch_count());
//!     println!("sun at {:?}", scene.solar_system().sun().position());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Galaxy structure
//!
//! [`galaxy::generate`] turns a [`GalaxyConfig`] and a random source into four
//! populations: core glows, star particles, nebula clouds and dust lanes.
//! Sprites reference gradient textures through a [`TextureCache`] so that
//! equal `(color, softness, dark)` triples share one image.
//!
//! ### Solar system
//!
//! The Sun's position is a closed-form function of simulated time, derived
//! from the Oort constants, the local mass density and the solar peculiar
//! velocity. Planets circle the Sun on planes that turn with it. Each body
//! keeps a fixed-length trail.
//!
//! ### Randomness
//!
//! Every generator takes `&mut R where R: Rng + ?Sized`. Pass a seeded
//! `SmallRng` for reproducible scenes.
//!
//! ## Module Overview
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | [`GalaxyConfig`], [`SolarSystemConfig`], [`SceneConfig`] |
//! | [`galaxy`] | Structure generator and [`Galaxy`] |
//! | [`orbit`] | [`SunOrbitConstants`], [`Sun`], [`Planet`], [`TrailBuffer`] |
//! | [`textures`] | [`TextureCache`] of radial gradients |
//! | [`export`] | GPU instance layouts and [`SceneSnapshot`] |
//! | [`time`] | [`SimulationClock`] |

pub mod config;
pub mod error;
pub mod export;
pub mod galaxy;
pub mod orbit;
pub mod sampling;
mod scene;
pub mod textures;
pub mod time;
pub mod visuals;

pub use bytemuck;
pub use config::{GalaxyConfig, PlanetSpec, SceneConfig, SolarSystemConfig, SunOrbitParams};
pub use error::{ConfigError, ExportError};
pub use export::{GalaxyBuffers, PointInstance, RenderBatch, SceneSnapshot, SpriteInstance, TrailVertex};
pub use galaxy::{ElementSize, Galaxy, GalaxyStructure, GeneratedElement, ParticleField};
pub use glam::{DVec3, Quat, Vec2, Vec3};
pub use orbit::{Planet, SolarSystem, Sun, SunOrbitConstants, TrailBuffer};
pub use scene::Scene;
pub use textures::{GradientTexture, TextureCache, TextureHandle, TextureKey};
pub use time::SimulationClock;
pub use visuals::BlendMode;

/// Convenient imports for building a scene.
///
/// ```ignore
/// use galactic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{GalaxyConfig, PlanetSpec, SceneConfig, SolarSystemConfig, SunOrbitParams};
    pub use crate::error::{ConfigError, ExportError};
    pub use crate::export::{GalaxyBuffers, RenderBatch, SceneSnapshot};
    pub use crate::galaxy::{ElementSize, Galaxy, GalaxyStructure, GeneratedElement};
    pub use crate::orbit::{Planet, SolarSystem, Sun, TrailBuffer};
    pub use crate::scene::Scene;
    pub use crate::textures::{TextureCache, TextureKey};
    pub use crate::time::SimulationClock;
    pub use crate::visuals::BlendMode;
    pub use crate::{DVec3, Quat, Vec2, Vec3};
}
