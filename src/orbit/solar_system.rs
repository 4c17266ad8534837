//! The Sun and its planets, driven by a simulation clock.

use rand::Rng;

use super::planets::{update_planets, Planet};
use super::sun::{Sun, SunOrbitConstants};
use crate::config::SolarSystemConfig;
use crate::textures::GradientTexture;
use crate::time::SimulationClock;

/// Solar system state advanced once per frame.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    config: SolarSystemConfig,
    clock: SimulationClock,
    sun: Sun,
    planets: Vec<Planet>,
    glow: GradientTexture,
}

impl SolarSystem {
    /// Build the system at t = 0. Planet phases are drawn from `rng` in list order.
    pub fn new<R: Rng + ?Sized>(config: SolarSystemConfig, rng: &mut R) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("building a solar system from an invalid config: {}", e);
        }

        let constants = SunOrbitConstants::derive(&config.sun_orbit);
        if constants.is_clamped() {
            log::warn!(
                "sun orbit frequencies clamped (kappa radicand {:e}, nu radicand {:e})",
                constants.kappa_radicand,
                constants.nu_radicand
            );
        }

        let sun = Sun::new(constants, config.scene_units_per_kpc, config.trail_length);
        let planets = config
            .planets
            .iter()
            .map(|spec| {
                let phase = rng.gen::<f64>() * std::f64::consts::TAU;
                Planet::from_spec(spec, phase, config.trail_length)
            })
            .collect::<Vec<_>>();

        log::debug!(
            "solar system: {} planets, kappa {:.5}/Myr, nu {:.5}/Myr",
            planets.len(),
            constants.kappa,
            constants.nu
        );

        Self {
            clock: SimulationClock::new(config.myr_per_second),
            sun,
            planets,
            glow: GradientTexture::sun_glow(),
            config,
        }
    }

    /// Advance by `delta` seconds.
    ///
    /// Order: clock, Sun position, Sun trail, planet positions, planet trails.
    /// The Sun follows simulated megayears; planets follow clock seconds.
    pub fn update(&mut self, delta: f64) {
        self.clock.advance(delta);
        self.step();
    }

    /// Advance by the wall-clock time since the previous call.
    pub fn tick(&mut self) {
        self.clock.tick();
        self.step();
    }

    fn step(&mut self) {
        let t_myr = self.clock.simulated_myr();
        let sun = self.sun.update(t_myr);
        update_planets(&mut self.planets, sun, self.clock.elapsed());

        log::trace!(
            "frame {}: t = {:.3} Myr, sun at ({:.2}, {:.2}, {:.2})",
            self.clock.frame(),
            t_myr,
            sun.x,
            sun.y,
            sun.z
        );
    }

    pub fn config(&self) -> &SolarSystemConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Mutable clock, for pause and rate controls.
    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Glow texture for the Sun's body.
    pub fn glow(&self) -> &GradientTexture {
        &self.glow
    }
}
