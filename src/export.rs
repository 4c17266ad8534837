//! Renderer-facing buffers and scene snapshots.
//!
//! Generated populations are packed into `#[repr(C)]` instance structs that
//! can be uploaded as-is with [`bytemuck::cast_slice`]. Sprites are grouped
//! into [`RenderBatch`]es that share a texture and blend mode, so a renderer
//! issues one instanced draw per batch.
//!
//! [`SceneSnapshot`] is the JSON form of the whole scene, for renderers that
//! run out of process.
//!
//! # Example
//!
//! ```ignore
//! use galactic::export::{GalaxyBuffers, SceneSnapshot};
//!
//! let buffers = GalaxyBuffers::from_structure(galaxy.structure());
//! for batch in &buffers.nebula {
//!     queue.write_buffer(&instance_buffer, 0, batch.as_bytes());
//! }
//!
//! SceneSnapshot::capture(&galaxy, &system, false).save("frame.json")?;
//! ```

use std::collections::HashMap;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::galaxy::{ElementSize, Galaxy, GalaxyStructure, GeneratedElement, ParticleField};
use crate::orbit::{SolarSystem, TrailBuffer};
use crate::textures::TextureKey;
use crate::visuals::BlendMode;

/// Radius of the Sun's body in scene units.
pub const SUN_RADIUS: f32 = 1.5;

/// Color of the Sun's body and trail.
pub const SUN_COLOR: u32 = 0xffaa00;

/// Tint applied to the Sun's glow sprite.
pub const SUN_GLOW_COLOR: u32 = 0xffcc44;

/// Width and height of the Sun's glow sprite.
pub const SUN_GLOW_SIZE: f32 = 12.0;

pub const SUN_TRAIL_OPACITY: f32 = 0.3;
pub const PLANET_TRAIL_OPACITY: f32 = 0.4;

// ========== GPU instance layouts ==========

/// One textured sprite. 48 bytes, 16-byte aligned rows.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub opacity: f32,
    /// Linear RGB tint.
    pub color: [f32; 3],
    pub _pad0: f32,
    /// Width and height in scene units.
    pub size: [f32; 2],
    pub _pad1: [f32; 2],
}

impl SpriteInstance {
    pub fn from_element(element: &GeneratedElement) -> Self {
        let size = match element.size {
            ElementSize::Uniform(s) => [s, s],
            ElementSize::Scaled { width, height } => [width, height],
        };
        Self {
            position: element.position.to_array(),
            opacity: element.opacity,
            color: element.color.to_array(),
            _pad0: 0.0,
            size,
            _pad1: [0.0; 2],
        }
    }
}

/// One untextured point. 32 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

/// One vertex of a trail line strip. `fade` runs from 1 at the head to 0 at the tail.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 3],
    pub fade: f32,
}

// ========== Batching ==========

/// Sprites sharing one texture and blend mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatch {
    pub blend: BlendMode,
    pub texture: Option<TextureKey>,
    pub instances: Vec<SpriteInstance>,
}

impl RenderBatch {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instance data as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Group sprites by `(blend, texture)`.
///
/// Batches appear in the order their first sprite does, and sprites keep
/// their relative order inside a batch.
pub fn batch_sprites<'a, I>(elements: I) -> Vec<RenderBatch>
where
    I: IntoIterator<Item = &'a GeneratedElement>,
{
    let mut batches: Vec<RenderBatch> = Vec::new();
    let mut index: HashMap<(BlendMode, Option<TextureKey>), usize> = HashMap::new();

    for element in elements {
        let slot = *index.entry((element.blend, element.texture)).or_insert_with(|| {
            batches.push(RenderBatch {
                blend: element.blend,
                texture: element.texture,
                instances: Vec::new(),
            });
            batches.len() - 1
        });
        batches[slot].instances.push(SpriteInstance::from_element(element));
    }

    batches
}

/// Pack the star field as point instances.
pub fn point_instances(field: &ParticleField) -> Vec<PointInstance> {
    field
        .positions
        .iter()
        .zip(&field.colors)
        .map(|(position, color)| PointInstance {
            position: position.to_array(),
            size: field.size,
            color: color.to_array(),
            opacity: 1.0,
        })
        .collect()
}

/// A trail as a full-length line strip, newest vertex first.
pub fn trail_vertices(trail: &TrailBuffer) -> Vec<TrailVertex> {
    let capacity = trail.capacity().max(1) as f32;
    trail
        .padded()
        .into_iter()
        .enumerate()
        .map(|(i, p)| TrailVertex {
            position: p.to_array(),
            fade: 1.0 - i as f32 / capacity,
        })
        .collect()
}

/// Every galaxy population packed for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyBuffers {
    pub core_glows: Vec<RenderBatch>,
    pub points: Vec<PointInstance>,
    pub nebula: Vec<RenderBatch>,
    pub dust: Vec<RenderBatch>,
}

impl GalaxyBuffers {
    pub fn from_structure(structure: &GalaxyStructure) -> Self {
        Self {
            core_glows: batch_sprites(&structure.core_glows),
            points: point_instances(&structure.particles),
            nebula: batch_sprites(&structure.nebula_clouds),
            dust: batch_sprites(&structure.dust_lanes),
        }
    }

    /// Number of draw calls needed for the sprites.
    pub fn sprite_batch_count(&self) -> usize {
        self.core_glows.len() + self.nebula.len() + self.dust.len()
    }

    /// Point instances as raw bytes.
    pub fn points_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

// ========== Snapshots ==========

/// A moving body at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub name: String,
    pub position: Vec3,
    pub color: u32,
    pub size: f32,
    pub trail_opacity: f32,
    /// Newest first, padded to the trail capacity.
    pub trail: Vec<Vec3>,
}

/// The whole scene at one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub frame: u64,
    pub elapsed_seconds: f64,
    pub simulated_myr: f64,
    /// Galaxy spin about +Y, radians.
    pub galaxy_rotation: f32,
    pub sun: BodySnapshot,
    /// Tint and edge length of the additive glow sprite around the Sun.
    pub sun_glow: (u32, f32),
    pub planets: Vec<BodySnapshot>,
    /// File stems of the cached textures, in key order.
    pub textures: Vec<String>,
    /// Generated populations. Omitted when only motion is wanted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<GalaxyStructure>,
}

impl SceneSnapshot {
    /// Capture the current frame. `with_structure` includes every generated element.
    pub fn capture(galaxy: &Galaxy, system: &SolarSystem, with_structure: bool) -> Self {
        let sun = system.sun();
        let clock = system.clock();
        Self {
            frame: clock.frame(),
            elapsed_seconds: clock.elapsed(),
            simulated_myr: clock.simulated_myr(),
            galaxy_rotation: galaxy.rotation_angle(),
            sun: BodySnapshot {
                name: "Sun".to_string(),
                position: sun.position().as_vec3(),
                color: SUN_COLOR,
                size: SUN_RADIUS,
                trail_opacity: SUN_TRAIL_OPACITY,
                trail: sun.trail().padded(),
            },
            sun_glow: (SUN_GLOW_COLOR, SUN_GLOW_SIZE),
            planets: system
                .planets()
                .iter()
                .map(|p| BodySnapshot {
                    name: p.name.clone(),
                    position: p.position().as_vec3(),
                    color: p.color,
                    size: p.size,
                    trail_opacity: PLANET_TRAIL_OPACITY,
                    trail: p.trail().padded(),
                })
                .collect(),
            textures: galaxy.textures().iter().map(|(key, _)| key.file_stem()).collect(),
            structure: with_structure.then(|| galaxy.structure().clone()),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
