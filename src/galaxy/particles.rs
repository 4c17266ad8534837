//! Background star field laid out along the spiral arms.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{radial_fraction, spin_angle, ElementSize, GeneratedElement};
use crate::config::GalaxyConfig;
use crate::sampling::Sampler;
use crate::visuals::{hex_to_rgb, lerp_rgb, BlendMode};

/// Point size of every star particle.
pub const PARTICLE_SIZE: f32 = 1.5;

/// Minimum distance of a star from the centre, before jitter.
const INNER_RADIUS: f32 = 20.0;

/// Scale of vertical jitter, independent of radius.
const VERTICAL_SCALE: f32 = 30.0;

/// Star particles as parallel arrays, the way they are uploaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    /// Distance from the centre before jitter, one per particle.
    pub radii: Vec<f32>,
    pub size: f32,
}

impl ParticleField {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// View each star as a standalone element.
    pub fn elements(&self) -> impl Iterator<Item = GeneratedElement> + '_ {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(move |(&position, &color)| GeneratedElement {
                position,
                color,
                size: ElementSize::Uniform(self.size),
                opacity: 1.0,
                texture: None,
                blend: BlendMode::Additive,
            })
    }
}

/// Angular offset of the arm that particle `index` belongs to.
///
/// Arms are assigned round-robin, so `branch_angle(i) == branch_angle(i + arms)`.
/// An arm count of 0 is treated as 1.
#[inline]
pub fn branch_angle(index: u32, arms: u32) -> f32 {
    let arms = arms.max(1);
    (index % arms) as f32 / arms as f32 * TAU
}

/// Generate the star field.
///
/// Draw order per star: radius, then `(power, sign)` for X, Y and Z jitter.
pub fn generate_particles<R: Rng + ?Sized>(config: &GalaxyConfig, rng: &mut R) -> ParticleField {
    let mut s = Sampler::new(rng);
    let count = config.particle_count as usize;
    let inside = hex_to_rgb(config.color_inside);
    let outside = hex_to_rgb(config.color_outside);

    let mut field = ParticleField {
        positions: Vec::with_capacity(count),
        colors: Vec::with_capacity(count),
        radii: Vec::with_capacity(count),
        size: PARTICLE_SIZE,
    };

    for i in 0..config.particle_count {
        let radius = s.random() * config.radius + INNER_RADIUS;
        let angle = spin_angle(radius, config.spin) + branch_angle(i, config.arms);

        let mut jitter = |scale: f32| {
            s.powered(config.randomness_power) * s.random_sign() * config.randomness * scale
        };
        let offset = Vec3::new(jitter(radius), jitter(VERTICAL_SCALE), jitter(radius));

        field.positions.push(Vec3::new(
            angle.cos() * radius + offset.x,
            offset.y,
            angle.sin() * radius + offset.z,
        ));
        field.colors.push(lerp_rgb(inside, outside, radial_fraction(radius, config.radius)));
        field.radii.push(radius);
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_branch_angle_partitions_by_index() {
        for arms in 1..8 {
            for i in 0..50 {
                assert_eq!(branch_angle(i, arms), branch_angle(i + arms, arms));
            }
        }
        assert_eq!(branch_angle(0, 5), 0.0);
        assert!((branch_angle(1, 4) - TAU / 4.0).abs() < 1e-6);
        assert_eq!(branch_angle(3, 0), 0.0);
    }

    #[test]
    fn test_radius_bounds() {
        let config = GalaxyConfig::new().with_particle_count(2000);
        let field = generate_particles(&config, &mut SmallRng::seed_from_u64(31));
        for &r in &field.radii {
            assert!((20.0..=520.0).contains(&r));
        }
    }

    #[test]
    fn test_even_arm_occupancy() {
        let config = GalaxyConfig::new().with_arms(4).with_particle_count(400);
        let field = generate_particles(&config, &mut SmallRng::seed_from_u64(32));
        assert_eq!(field.len(), 400);
        let mut per_arm = [0usize; 4];
        for i in 0..field.len() as u32 {
            let arm = (branch_angle(i, 4) / (TAU / 4.0)).round() as usize;
            per_arm[arm] += 1;
        }
        assert_eq!(per_arm, [100; 4]);
    }

    #[test]
    fn test_color_is_convex_combination() {
        let config = GalaxyConfig::new().with_particle_count(300);
        let field = generate_particles(&config, &mut SmallRng::seed_from_u64(33));
        let inside = hex_to_rgb(config.color_inside);
        let outside = hex_to_rgb(config.color_outside);
        for (color, &r) in field.colors.iter().zip(&field.radii) {
            let w = r / config.radius;
            let expected = inside * (1.0 - w) + outside * w;
            assert!((*color - expected).abs().max_element() < 1e-5);
        }
    }

    #[test]
    fn test_zero_randomness_lies_on_spiral() {
        let config = GalaxyConfig::new()
            .with_arms(3)
            .with_randomness(0.0, 3.0)
            .with_particle_count(30);
        let field = generate_particles(&config, &mut SmallRng::seed_from_u64(34));
        for (i, (p, &r)) in field.positions.iter().zip(&field.radii).enumerate() {
            let angle = spin_angle(r, config.spin) + branch_angle(i as u32, 3);
            assert_eq!(p.y, 0.0);
            assert_eq!(p.x, angle.cos() * r);
            assert_eq!(p.z, angle.sin() * r);
        }
    }

    #[test]
    fn test_elements_view() {
        let config = GalaxyConfig::new().with_particle_count(5);
        let field = generate_particles(&config, &mut SmallRng::seed_from_u64(35));
        let elements: Vec<_> = field.elements().collect();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[0].size, ElementSize::Uniform(PARTICLE_SIZE));
        assert!(elements[0].texture.is_none());
    }
}
