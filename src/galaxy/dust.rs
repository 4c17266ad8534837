//! Dark dust lanes trailing the spiral arms.
//!
//! Dust sits slightly behind each arm's spiral angle and is composited with
//! normal alpha blending so it dims the glow behind it instead of adding to it.

use glam::Vec3;
use rand::Rng;

use super::{spin_angle, GeneratedElement};
use crate::config::GalaxyConfig;
use crate::sampling::Sampler;
use crate::textures::TextureCache;
use crate::visuals::BlendMode;

/// Number of dust sprites.
pub const DUST_COUNT: usize = 300;

const DUST_COLORS: [u32; 4] = [0x332211, 0x442211, 0x2a1508, 0x1a0d05];

/// Lag behind the arm, in radians: `-(0.2 + U * 0.2)`.
const ARM_LAG: (f32, f32) = (0.2, 0.2);

/// Generate dust lane sprites.
pub fn generate_dust_lanes<R: Rng + ?Sized>(
    config: &GalaxyConfig,
    rng: &mut R,
    cache: &mut TextureCache,
) -> Vec<GeneratedElement> {
    let mut s = Sampler::new(rng);
    let arms = config.arms.max(1);

    (0..DUST_COUNT)
        .map(|_| {
            let radius = 50.0 + s.random() * (config.radius * 0.7);
            let arm = s.random_index(arms as usize);
            let branch = arm as f32 / arms as f32 * std::f32::consts::TAU;
            let lag = -ARM_LAG.0 - s.random() * ARM_LAG.1;

            let angle = spin_angle(radius, config.spin) + branch + lag;
            let x = angle.cos() * radius + s.centered(20.0);
            let y = s.centered(5.0);
            let z = angle.sin() * radius + s.centered(20.0);

            let color = s.pick(&DUST_COLORS);
            let opacity = 0.2 + s.random() * 0.3;
            let width = 30.0 + s.random() * 50.0;

            GeneratedElement::sprite(
                cache,
                Vec3::new(x, y, z),
                color,
                1.0,
                true,
                opacity,
                (width, width * 0.3),
                BlendMode::Alpha,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::ElementSize;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_dust_is_dark_and_alpha_blended() {
        let mut cache = TextureCache::new();
        let dust = generate_dust_lanes(&GalaxyConfig::default(), &mut SmallRng::seed_from_u64(51), &mut cache);
        assert_eq!(dust.len(), DUST_COUNT);
        for d in &dust {
            assert_eq!(d.blend, BlendMode::Alpha);
            assert!(d.texture.unwrap().is_dark);
            assert!((0.2..=0.5).contains(&d.opacity));
            assert!(d.position.y.abs() <= 2.5);
        }
        assert!(cache.len() <= DUST_COLORS.len());
    }

    #[test]
    fn test_dust_trails_the_arm() {
        // Without spin the arm angles are multiples of TAU / arms; every lane
        // must sit 0.2-0.4 rad behind one of them, give or take positional jitter.
        let config = GalaxyConfig::new().with_spin(0.0).with_arms(2);
        let mut cache = TextureCache::new();
        let dust = generate_dust_lanes(&config, &mut SmallRng::seed_from_u64(52), &mut cache);
        for d in &dust {
            let r = (d.position.x.powi(2) + d.position.z.powi(2)).sqrt();
            let slack = 2.0 * (10.0 * 2f32.sqrt()) / r + 0.05;
            let angle = d.position.z.atan2(d.position.x).rem_euclid(TAU);
            let behind = (0..2).any(|arm| {
                let arm_angle = arm as f32 * TAU / 2.0;
                let lag = (arm_angle - angle + PI).rem_euclid(TAU) - PI;
                lag >= 0.2 - slack && lag <= 0.4 + slack
            });
            assert!(behind, "dust at angle {} is not behind an arm", angle);
        }
    }

    #[test]
    fn test_dust_sprites_are_flat() {
        let mut cache = TextureCache::new();
        let dust = generate_dust_lanes(&GalaxyConfig::default(), &mut SmallRng::seed_from_u64(53), &mut cache);
        for d in &dust {
            if let ElementSize::Scaled { width, height } = d.size {
                assert!((30.0..=80.0).contains(&width));
                assert!((height - width * 0.3).abs() < 1e-4);
            }
        }
    }
}
