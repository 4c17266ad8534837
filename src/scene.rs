//! Galaxy and solar system stepped together.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::SceneConfig;
use crate::export::SceneSnapshot;
use crate::galaxy::Galaxy;
use crate::orbit::SolarSystem;

/// A complete scene: generated galaxy plus moving solar system.
///
/// Both halves draw from one random source, galaxy first, so a seeded
/// config reproduces the same structure and planet phases.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    galaxy: Galaxy,
    solar_system: SolarSystem,
}

impl Scene {
    /// Build a scene, seeding from `config.seed` or from entropy.
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Build a scene from an explicit random source.
    pub fn with_rng<R: rand::Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let galaxy = Galaxy::new(config.galaxy.clone(), rng);
        let solar_system = SolarSystem::new(config.solar_system.clone(), rng);
        log::info!(
            "scene ready: {} galaxy elements, {} textures, {} planets",
            galaxy.structure().element_count(),
            galaxy.textures().len(),
            solar_system.planets().len()
        );
        Self {
            config,
            galaxy,
            solar_system,
        }
    }

    /// Advance one frame by `delta` seconds.
    ///
    /// The galaxy spins with the raw delta; the solar system goes through
    /// its clock, so pausing it leaves the galaxy turning.
    pub fn update(&mut self, delta: f64) {
        self.galaxy.update(delta as f32);
        self.solar_system.update(delta);
    }

    /// Capture the current frame.
    pub fn snapshot(&self, with_structure: bool) -> SceneSnapshot {
        SceneSnapshot::capture(&self.galaxy, &self.solar_system, with_structure)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn solar_system(&self) -> &SolarSystem {
        &self.solar_system
    }

    pub fn solar_system_mut(&mut self) -> &mut SolarSystem {
        &mut self.solar_system
    }
}
