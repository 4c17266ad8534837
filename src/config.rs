//! Scene configuration.
//!
//! Plain records of named numeric fields. Every struct has defaults matching
//! the reference scene and is `#[serde(default)]`, so a JSON file only needs
//! the fields it wants to change:
//!
//! ```json
//! { "galaxy": { "arms": 3, "particle_count": 20000 }, "seed": 42 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of the procedural spiral galaxy.
///
/// `arms >= 1` and `radius > 0` are preconditions of generation. They are
/// checked by [`GalaxyConfig::validate`], but the generator itself only
/// guarantees finite, non-panicking output when they are violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Disk radius in scene units.
    pub radius: f32,
    /// Number of spiral arms.
    pub arms: u32,
    /// How tightly the arms wind.
    pub spin: f32,
    /// Jitter magnitude, as a fraction of radius.
    pub randomness: f32,
    /// Exponent applied to jitter draws. Higher keeps arms tighter.
    pub randomness_power: f32,
    /// Number of background star particles.
    pub particle_count: u32,
    /// Star color at the centre, `0xRRGGBB`.
    pub color_inside: u32,
    /// Star color at the rim, `0xRRGGBB`.
    pub color_outside: u32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            radius: 500.0,
            arms: 5,
            spin: 25.0,
            randomness: 0.3,
            randomness_power: 3.0,
            particle_count: 8000,
            color_inside: 0xffaa33,
            color_outside: 0x1b3984,
        }
    }
}

impl GalaxyConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the disk radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of spiral arms.
    pub fn with_arms(mut self, arms: u32) -> Self {
        self.arms = arms;
        self
    }

    /// Set the spin factor.
    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    /// Set jitter magnitude and exponent.
    pub fn with_randomness(mut self, randomness: f32, power: f32) -> Self {
        self.randomness = randomness;
        self.randomness_power = power;
        self
    }

    /// Set the number of background star particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the inside and outside star colors.
    pub fn with_colors(mut self, inside: u32, outside: u32) -> Self {
        self.color_inside = inside;
        self.color_outside = outside;
        self
    }

    /// Check the generation preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arms == 0 {
            return Err(invalid("arms", "must be at least 1"));
        }
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(invalid("radius", "must be a positive, finite number"));
        }
        if !self.spin.is_finite() {
            return Err(invalid("spin", "must be finite"));
        }
        if !(self.randomness >= 0.0) {
            return Err(invalid("randomness", "must be non-negative"));
        }
        if !(self.randomness_power > 0.0) {
            return Err(invalid("randomness_power", "must be positive"));
        }
        if self.color_inside > 0xffffff || self.color_outside > 0xffffff {
            return Err(invalid("color", "must be a 24-bit 0xRRGGBB value"));
        }
        Ok(())
    }
}

/// Raw astrophysical parameters of the Sun's galactic orbit.
///
/// Units follow the literature: kpc, km/s/kpc, M☉/pc³, km/s, pc, degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunOrbitParams {
    /// Galactocentric radius of the reference circular orbit (kpc).
    pub r0_kpc: f64,
    /// Oort constant A (km/s/kpc).
    pub oort_a_kms_kpc: f64,
    /// Oort constant B (km/s/kpc).
    pub oort_b_kms_kpc: f64,
    /// Local stellar mass density (M☉/pc³).
    pub local_mass_density_msun_pc3: f64,
    /// Peculiar velocity toward the galactic centre (km/s).
    pub peculiar_u_kms: f64,
    /// Peculiar velocity in the direction of rotation (km/s).
    pub peculiar_v_kms: f64,
    /// Peculiar velocity toward the north galactic pole (km/s).
    pub peculiar_w_kms: f64,
    /// Height above the mid-plane (pc).
    pub z_sun_pc: f64,
    /// Starting azimuth (degrees).
    pub initial_azimuth_deg: f64,
}

impl Default for SunOrbitParams {
    fn default() -> Self {
        Self {
            r0_kpc: 8.178,
            oort_a_kms_kpc: 16.0,
            oort_b_kms_kpc: -12.0,
            local_mass_density_msun_pc3: 0.119,
            peculiar_u_kms: 11.1,
            peculiar_v_kms: 12.24,
            peculiar_w_kms: 7.25,
            z_sun_pc: 20.8,
            initial_azimuth_deg: 0.0,
        }
    }
}

/// Static description of a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    pub name: String,
    /// Orbit radius in scene units.
    pub distance: f64,
    /// Body radius in scene units, for the renderer.
    pub size: f32,
    /// Angular speed in radians per second of clock time.
    pub speed: f64,
    /// Color as `0xRRGGBB`.
    pub color: u32,
}

impl PlanetSpec {
    pub fn new(name: impl Into<String>, distance: f64, size: f32, speed: f64, color: u32) -> Self {
        Self {
            name: name.into(),
            distance,
            size,
            speed,
            color,
        }
    }

    /// The eight planets of the solar system, at scene scale.
    pub fn solar_system() -> Vec<PlanetSpec> {
        vec![
            PlanetSpec::new("Mercury", 4.0, 0.2, 4.0, 0xaaaaaa),
            PlanetSpec::new("Venus", 6.0, 0.35, 3.0, 0xe3bb76),
            PlanetSpec::new("Earth", 8.0, 0.4, 2.5, 0x22aaff),
            PlanetSpec::new("Mars", 11.0, 0.3, 2.0, 0xff4422),
            PlanetSpec::new("Jupiter", 18.0, 1.2, 1.0, 0xd8ca9d),
            PlanetSpec::new("Saturn", 24.0, 1.0, 0.8, 0xc6a86f),
            PlanetSpec::new("Uranus", 30.0, 0.6, 0.6, 0x99ddff),
            PlanetSpec::new("Neptune", 36.0, 0.55, 0.5, 0x4466ff),
        ]
    }
}

/// Parameters of the orbiting solar system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarSystemConfig {
    /// Samples kept in each trail buffer.
    pub trail_length: usize,
    /// Scene units per kiloparsec. 60 puts the Sun inside a 500-unit disk.
    pub scene_units_per_kpc: f64,
    /// Simulated megayears per second of clock time.
    pub myr_per_second: f64,
    pub sun_orbit: SunOrbitParams,
    pub planets: Vec<PlanetSpec>,
}

impl Default for SolarSystemConfig {
    fn default() -> Self {
        Self {
            trail_length: 300,
            scene_units_per_kpc: 60.0,
            myr_per_second: 2.0,
            sun_orbit: SunOrbitParams::default(),
            planets: PlanetSpec::solar_system(),
        }
    }
}

impl SolarSystemConfig {
    /// Check the simulator parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trail_length == 0 {
            return Err(invalid("trail_length", "must be at least 1"));
        }
        if !(self.scene_units_per_kpc > 0.0) {
            return Err(invalid("scene_units_per_kpc", "must be positive"));
        }
        if !(self.myr_per_second >= 0.0) {
            return Err(invalid("myr_per_second", "must be non-negative"));
        }
        if !(self.sun_orbit.r0_kpc > 0.0) {
            return Err(invalid("sun_orbit.r0_kpc", "must be positive"));
        }
        if self.planets.iter().any(|p| !(p.distance >= 0.0)) {
            return Err(invalid("planets.distance", "must be non-negative"));
        }
        Ok(())
    }
}

/// Complete scene description: galaxy, solar system and random seed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub galaxy: GalaxyConfig,
    pub solar_system: SolarSystemConfig,
    /// Seed for reproducible generation. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SceneConfig {
    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the scene to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Validate both halves of the scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.galaxy.validate()?;
        self.solar_system.validate()
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidField { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_arms_rejected() {
        let err = GalaxyConfig::new().with_arms(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { field: "arms", .. }));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        assert!(GalaxyConfig::new().with_radius(0.0).validate().is_err());
        assert!(GalaxyConfig::new().with_radius(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let scene = SceneConfig::from_json(r#"{ "galaxy": { "arms": 3 }, "seed": 7 }"#).unwrap();
        assert_eq!(scene.galaxy.arms, 3);
        assert_eq!(scene.galaxy.radius, 500.0);
        assert_eq!(scene.seed, Some(7));
        assert_eq!(scene.solar_system.planets.len(), 8);
    }

    #[test]
    fn test_json_survives_reload() {
        let scene = SceneConfig {
            galaxy: GalaxyConfig::new().with_spin(12.5).with_particle_count(10),
            ..Default::default()
        };
        let json = scene.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_default_planets() {
        let planets = PlanetSpec::solar_system();
        assert_eq!(planets[2].name, "Earth");
        assert_eq!(planets[2].distance, 8.0);
        assert!(planets.windows(2).all(|w| w[0].distance < w[1].distance));
    }
}
