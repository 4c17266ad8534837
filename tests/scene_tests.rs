//! Integration tests across generation, orbits and export.
//!
//! These exercise the public API the way a renderer would: build a scene from
//! a config, step it, and read back buffers and snapshots.

use galactic::config::{GalaxyConfig, SceneConfig, SolarSystemConfig, SunOrbitParams};
use galactic::export::{GalaxyBuffers, SceneSnapshot};
use galactic::galaxy::{generate, generate_particles, spin_angle};
use galactic::orbit::{SolarSystem, SunOrbitConstants, TrailBuffer, MIN_RADIUS_KPC};
use galactic::textures::TextureCache;
use galactic::{BlendMode, Scene, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Galaxy structure
// ============================================================================

#[test]
fn test_single_particle_without_randomness_lies_on_the_spiral() {
    let config = GalaxyConfig::new()
        .with_particle_count(1)
        .with_randomness(0.0, 3.0);

    let field = generate_particles(&config, &mut SmallRng::seed_from_u64(2024));

    // The first draw is the radius.
    let u: f32 = SmallRng::seed_from_u64(2024).gen();
    let radius = u * config.radius + 20.0;
    let angle = spin_angle(radius, config.spin);

    assert_eq!(field.len(), 1);
    let p = field.positions[0];
    assert_eq!(p.x, angle.cos() * radius);
    assert_eq!(p.y.abs(), 0.0);
    assert_eq!(p.z, angle.sin() * radius);
}

#[test]
fn test_stars_fall_within_jittered_disk() {
    let config = GalaxyConfig::new().with_particle_count(3000);
    let field = generate_particles(&config, &mut SmallRng::seed_from_u64(1));
    let bound = (config.radius + 20.0) * (1.0 + config.randomness * 2f32.sqrt());
    for p in &field.positions {
        let planar = (p.x * p.x + p.z * p.z).sqrt();
        assert!(planar <= bound + 1e-3, "star at {} outside {}", planar, bound);
        assert!(p.y.abs() <= config.randomness * 30.0 + 1e-4);
    }
}

#[test]
fn test_star_color_moves_from_inside_to_outside() {
    let config = GalaxyConfig::new().with_particle_count(2000);
    let field = generate_particles(&config, &mut SmallRng::seed_from_u64(7));
    // Red channel drops from 0xff toward 0x1b with radius.
    let mut pairs: Vec<(f32, f32)> = field.radii.iter().copied().zip(field.colors.iter().map(|c| c.x)).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert!(pairs.windows(2).all(|w| w[1].1 <= w[0].1 + 1e-6));
}

#[test]
fn test_close_softness_shares_a_texture() {
    let mut cache = TextureCache::new();
    let a = cache.get_or_create(0xffaa33, 0.61, false);
    let b = cache.get_or_create(0xffaa33, 0.64, false);
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    cache.get_or_create(0xffaa33, 0.66, false);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_blend_modes_in_exported_buffers() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut cache = TextureCache::new();
    let structure = generate(&GalaxyConfig::new().with_particle_count(100), &mut rng, &mut cache);
    let buffers = GalaxyBuffers::from_structure(&structure);

    assert!(buffers.dust.iter().all(|b| b.blend == BlendMode::Alpha));
    assert!(buffers
        .core_glows
        .iter()
        .chain(&buffers.nebula)
        .all(|b| b.blend == BlendMode::Additive));
    for batch in buffers.core_glows.iter().chain(&buffers.nebula).chain(&buffers.dust) {
        let key = batch.texture.expect("sprite batches are textured");
        assert!(cache.get(&key).is_some());
    }
}

// ============================================================================
// Orbits
// ============================================================================

#[test]
fn test_default_orbit_frequencies_are_real() {
    let c = SunOrbitConstants::derive(&SunOrbitParams::default());
    assert!(c.kappa > 0.0 && c.nu > 0.0);
    assert!(!c.is_clamped());
}

#[test]
fn test_sun_radius_never_below_floor() {
    let params = SunOrbitParams {
        r0_kpc: 0.05,
        peculiar_u_kms: 300.0,
        ..Default::default()
    };
    let c = SunOrbitConstants::derive(&params);
    for i in 0..500 {
        assert!(c.radius_kpc(i as f64 * 1.3) >= MIN_RADIUS_KPC);
    }
}

#[test]
fn test_planets_keep_their_orbit_radius_over_many_frames() {
    let mut system = SolarSystem::new(SolarSystemConfig::default(), &mut SmallRng::seed_from_u64(8));
    for _ in 0..2000 {
        system.update(1.0 / 30.0);
        let sun = system.sun().position();
        for planet in system.planets() {
            let d = planet.position().distance(sun);
            assert!((d - planet.distance).abs() < 1e-9, "{} drifted to {}", planet.name, d);
        }
    }
}

#[test]
fn test_trail_evicts_oldest_and_pads() {
    let mut trail = TrailBuffer::new(300);
    for i in 0..301 {
        trail.push(Vec3::splat(i as f32));
    }
    assert_eq!(trail.len(), 300);
    assert_eq!(trail.newest(), Some(Vec3::splat(300.0)));
    assert_eq!(trail.oldest(), Some(Vec3::splat(1.0)));

    let mut short = TrailBuffer::new(300);
    for i in 1..=10 {
        short.push(Vec3::splat(i as f32));
    }
    let padded = short.padded();
    assert_eq!(padded.len(), 300);
    assert_eq!(padded[0], Vec3::splat(10.0));
    assert!(padded[9..].iter().all(|&p| p == Vec3::splat(1.0)));
}

#[test]
fn test_padding_uses_oldest_sample() {
    let mut trail = TrailBuffer::new(6);
    trail.push(Vec3::new(1.0, 2.0, 3.0));
    trail.push(Vec3::new(4.0, 5.0, 6.0));
    let padded = trail.padded();
    assert!(padded[1..].iter().all(|&p| p == Vec3::new(1.0, 2.0, 3.0)));
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_scene_from_json_config() {
    let json = r#"{
        "galaxy": { "arms": 3, "particle_count": 500 },
        "solar_system": { "trail_length": 20 },
        "seed": 11
    }"#;
    let config = SceneConfig::from_json(json).unwrap();
    let mut scene = Scene::new(config);
    for _ in 0..30 {
        scene.update(1.0 / 60.0);
    }

    let snapshot = scene.snapshot(false);
    assert_eq!(snapshot.frame, 30);
    assert_eq!(snapshot.sun.trail.len(), 20);
    assert_eq!(scene.galaxy().config().arms, 3);
    assert_eq!(scene.galaxy().structure().particles.len(), 500);
}

#[test]
fn test_snapshot_reload() {
    let config = SceneConfig {
        galaxy: GalaxyConfig::new().with_particle_count(50),
        seed: Some(12),
        ..Default::default()
    };
    let mut scene = Scene::new(config);
    scene.update(0.25);

    let json = scene.snapshot(true).to_json().unwrap();
    let back = SceneSnapshot::from_json(&json).unwrap();
    assert_eq!(back.planets.len(), 8);
    assert_eq!(back.structure.map(|s| s.particles.len()), Some(50));
}
