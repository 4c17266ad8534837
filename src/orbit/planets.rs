//! Planets on circular orbits around the moving Sun.
//!
//! Phase advances uniformly with clock time; there is no gravitational
//! coupling to the Sun's galactic motion. The orbital plane, however, is
//! rebuilt every frame from the Sun's radial direction in the galactic
//! plane, so each orbit is continuously turned to follow the galaxy's
//! rotation as seen from the Sun.

use glam::DVec3;

use super::trail::TrailBuffer;
use crate::config::PlanetSpec;

/// Below this squared length the radial direction is undefined.
const MIN_RADIAL_LENGTH_SQ: f64 = 1e-9;

/// Unit vector from the galactic centre toward the Sun, projected onto the plane.
///
/// Falls back to +X when the Sun sits on the galactic axis.
pub fn radial_direction(sun: DVec3) -> DVec3 {
    let radial = DVec3::new(sun.x, 0.0, sun.z);
    if radial.length_squared() < MIN_RADIAL_LENGTH_SQ {
        DVec3::X
    } else {
        radial.normalize()
    }
}

/// Offset of a planet from the Sun for a given plane and phase.
///
/// The cosine term lies along `radial`, the sine term along +Y. Since
/// `radial` is a unit vector in the XZ plane, the offset length is always
/// `distance`.
pub fn orbit_offset(radial: DVec3, phase: f64, distance: f64) -> DVec3 {
    let (sin, cos) = phase.sin_cos();
    DVec3::new(radial.x * cos * distance, sin * distance, radial.z * cos * distance)
}

/// A planet and its trail.
#[derive(Debug, Clone)]
pub struct Planet {
    pub name: String,
    /// Orbit radius in scene units.
    pub distance: f64,
    /// Radians per second of clock time.
    pub speed: f64,
    /// Phase at t = 0.
    pub initial_phase: f64,
    pub color: u32,
    pub size: f32,
    position: DVec3,
    trail: TrailBuffer,
}

impl Planet {
    pub fn from_spec(spec: &PlanetSpec, initial_phase: f64, trail_length: usize) -> Self {
        Self {
            name: spec.name.clone(),
            distance: spec.distance,
            speed: spec.speed,
            initial_phase,
            color: spec.color,
            size: spec.size,
            position: DVec3::ZERO,
            trail: TrailBuffer::new(trail_length),
        }
    }

    /// Orbital phase after `elapsed` seconds.
    #[inline]
    pub fn phase(&self, elapsed: f64) -> f64 {
        self.initial_phase + elapsed * self.speed
    }

    /// Place the planet around `sun` and record the position in the trail.
    pub fn update(&mut self, sun: DVec3, radial: DVec3, elapsed: f64) -> DVec3 {
        self.position = sun + orbit_offset(radial, self.phase(elapsed), self.distance);
        self.trail.push(self.position.as_vec3());
        self.position
    }

    /// Current scene position.
    #[inline]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    #[inline]
    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }
}

/// Move every planet around the Sun for the current frame.
pub fn update_planets(planets: &mut [Planet], sun: DVec3, elapsed: f64) {
    let radial = radial_direction(sun);
    for planet in planets.iter_mut() {
        planet.update(sun, radial, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> Planet {
        Planet::from_spec(&PlanetSpec::new("Earth", 8.0, 0.4, 2.5, 0x22aaff), 0.3, 10)
    }

    #[test]
    fn test_radial_direction_is_planar_unit() {
        let r = radial_direction(DVec3::new(3.0, 50.0, 4.0));
        assert!((r - DVec3::new(0.6, 0.0, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_radial_direction_at_centre_defaults_to_x() {
        assert_eq!(radial_direction(DVec3::ZERO), DVec3::X);
        assert_eq!(radial_direction(DVec3::new(0.0, 12.0, 0.0)), DVec3::X);
    }

    #[test]
    fn test_orbit_offset_length_is_distance() {
        let radial = radial_direction(DVec3::new(-2.0, 0.0, 7.0));
        for i in 0..64 {
            let phase = i as f64 * 0.37;
            let len = orbit_offset(radial, phase, 11.0).length();
            assert!((len - 11.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_planet_keeps_distance_from_sun() {
        let mut planet = earth();
        for i in 0..100 {
            let t = i as f64 * 0.1;
            let sun = DVec3::new(490.0 * (t * 0.01).cos(), 1.2, 490.0 * (t * 0.01).sin());
            planet.update(sun, radial_direction(sun), t);
            assert!((planet.position().distance(sun) - 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_phase_is_linear_in_time() {
        let planet = earth();
        assert_eq!(planet.phase(0.0), 0.3);
        assert!((planet.phase(2.0) - 5.3).abs() < 1e-12);
    }

    #[test]
    fn test_update_planets_fills_trails() {
        let mut planets = vec![earth(), earth()];
        for i in 0..15 {
            update_planets(&mut planets, DVec3::new(100.0, 0.0, 0.0), i as f64);
        }
        for p in &planets {
            assert_eq!(p.trail().len(), 10);
            assert_eq!(p.trail().newest(), Some(p.position().as_vec3()));
        }
    }

    #[test]
    fn test_orbit_plane_contains_radial_and_up() {
        let sun = DVec3::new(0.0, 0.0, 50.0);
        let radial = radial_direction(sun);
        let offset = orbit_offset(radial, 0.0, 5.0);
        assert!((offset - DVec3::new(0.0, 0.0, 5.0)).length() < 1e-12);
        let offset = orbit_offset(radial, std::f64::consts::FRAC_PI_2, 5.0);
        assert!((offset - DVec3::new(0.0, 5.0, 0.0)).length() < 1e-12);
    }
}
