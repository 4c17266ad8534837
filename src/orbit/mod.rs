//! Epicyclic orbit of the Sun and the planets that ride along with it.
//!
//! The Sun's position is a closed-form function of simulated time (Myr);
//! planets circle the Sun on planes re-aligned every frame to the Sun's
//! radial direction. Every body keeps a fixed-length [`TrailBuffer`].
//!
//! # Example
//!
//! ```ignore
//! use galactic::orbit::SolarSystem;
//! use galactic::config::SolarSystemConfig;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut system = SolarSystem::new(SolarSystemConfig::default(), &mut rng);
//! for _ in 0..60 {
//!     system.update(1.0 / 60.0);
//! }
//! let trail = system.sun().trail().padded();
//! ```

mod planets;
mod solar_system;
mod sun;
mod trail;

pub use planets::{orbit_offset, radial_direction, update_planets, Planet};
pub use solar_system::SolarSystem;
pub use sun::{Sun, SunOrbitConstants, EPS, G_KPC_KMS2_PER_MSUN, KMS_TO_KPC_PER_MYR, MIN_RADIUS_KPC};
pub use trail::{TrailBuffer, DEFAULT_TRAIL_LENGTH};
