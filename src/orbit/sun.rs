//! The Sun's galactic orbit in the epicyclic approximation.
//!
//! Motion is linearized around a circular reference orbit of radius R0: a
//! steady circular drift at angular frequency ω0 plus small radial and
//! tangential oscillations at the epicyclic frequency κ and a vertical
//! oscillation at ν. Given peculiar velocities `(u0, v0, w0)` relative to the
//! co-rotating frame:
//!
//! ```text
//! x(t) = (u0/κ) sin κt + (v0/2B)(1 - cos κt)
//! y(t) = 2A (v0/2B) t - (ω0/(Bκ)) v0 sin κt + (2ω0/κ²) u0 (1 - cos κt)
//! z(t) = (w0/ν) sin νt + z0 cos νt
//! R = max(0.1, R0 + x),  φ = φ0 - ω0 t - y/R0
//! ```
//!
//! The position is evaluated directly from `t`, so there is no integration
//! drift and any instant can be sampled without replaying history.
//!
//! Units: kpc, Myr, kpc/Myr.

use glam::DVec3;

use super::trail::TrailBuffer;
use crate::config::SunOrbitParams;

/// km/s expressed in kpc/Myr.
pub const KMS_TO_KPC_PER_MYR: f64 = 0.001022712165045695;

/// Gravitational constant in kpc (km/s)² / M☉.
pub const G_KPC_KMS2_PER_MSUN: f64 = 4.30091e-6;

/// Floor for square-root radicands and minimum |B|.
pub const EPS: f64 = 1e-9;

/// Smallest galactocentric radius the orbit may reach, in kpc.
pub const MIN_RADIUS_KPC: f64 = 0.1;

/// Frequencies and initial conditions derived from [`SunOrbitParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunOrbitConstants {
    /// Reference orbit radius (kpc).
    pub r0: f64,
    /// Oort A (1/Myr).
    pub a: f64,
    /// Oort B (1/Myr), kept away from zero.
    pub b: f64,
    /// Circular angular frequency A - B (1/Myr).
    pub omega0: f64,
    /// Epicyclic frequency (1/Myr).
    pub kappa: f64,
    /// Vertical oscillation frequency (1/Myr).
    pub nu: f64,
    /// Radial peculiar velocity, positive outward (kpc/Myr).
    pub u0: f64,
    /// Tangential peculiar velocity (kpc/Myr).
    pub v0: f64,
    /// Vertical peculiar velocity (kpc/Myr).
    pub w0: f64,
    /// Initial height above the plane (kpc).
    pub z0: f64,
    /// Initial azimuth (radians).
    pub initial_azimuth: f64,
    /// `-4 B ω0` before flooring.
    pub kappa_radicand: f64,
    /// `4 π G ρ` in (km/s/kpc)² before flooring.
    pub nu_radicand: f64,
}

impl SunOrbitConstants {
    /// Derive orbit constants from raw astrophysical parameters.
    pub fn derive(params: &SunOrbitParams) -> Self {
        let a = params.oort_a_kms_kpc * KMS_TO_KPC_PER_MYR;
        let raw_b = params.oort_b_kms_kpc * KMS_TO_KPC_PER_MYR;
        let b = if raw_b.abs() < EPS { -EPS } else { raw_b };
        let omega0 = (params.oort_a_kms_kpc - params.oort_b_kms_kpc) * KMS_TO_KPC_PER_MYR;

        let kappa_radicand = -4.0 * b * omega0;
        let kappa = kappa_radicand.max(EPS).sqrt();

        // M☉/pc³ -> M☉/kpc³
        let rho = params.local_mass_density_msun_pc3 * 1e9;
        let nu_radicand = 4.0 * std::f64::consts::PI * G_KPC_KMS2_PER_MSUN * rho;
        let nu = nu_radicand.max(EPS).sqrt() * KMS_TO_KPC_PER_MYR;

        Self {
            r0: params.r0_kpc,
            a,
            b,
            omega0,
            kappa,
            nu,
            // U is measured toward the galactic centre; x points outward.
            u0: -params.peculiar_u_kms * KMS_TO_KPC_PER_MYR,
            v0: params.peculiar_v_kms * KMS_TO_KPC_PER_MYR,
            w0: params.peculiar_w_kms * KMS_TO_KPC_PER_MYR,
            z0: params.z_sun_pc * 1e-3,
            initial_azimuth: params.initial_azimuth_deg.to_radians(),
            kappa_radicand,
            nu_radicand,
        }
    }

    /// Whether either frequency hit the `EPS` floor.
    pub fn is_clamped(&self) -> bool {
        self.kappa_radicand < EPS || self.nu_radicand < EPS
    }

    /// Radial, tangential and vertical offsets from the reference orbit (kpc).
    pub fn local_offsets(&self, t_myr: f64) -> DVec3 {
        let t = t_myr;
        let kappa_t = self.kappa * t;
        let (sin_k, cos_k) = kappa_t.sin_cos();
        let guide = self.v0 / (2.0 * self.b);

        let x = (self.u0 / self.kappa) * sin_k + guide * (1.0 - cos_k);
        let y = 2.0 * self.a * guide * t - (self.omega0 / (self.b * self.kappa)) * self.v0 * sin_k
            + (2.0 * self.omega0 / (self.kappa * self.kappa)) * self.u0 * (1.0 - cos_k);

        let (sin_n, cos_n) = (self.nu * t).sin_cos();
        let z = (self.w0 / self.nu) * sin_n + self.z0 * cos_n;

        DVec3::new(x, y, z)
    }

    /// Galactocentric radius at `t_myr`, never below [`MIN_RADIUS_KPC`].
    pub fn radius_kpc(&self, t_myr: f64) -> f64 {
        (self.r0 + self.local_offsets(t_myr).x).max(MIN_RADIUS_KPC)
    }

    /// Position at `t_myr` in galactic coordinates (kpc), Y up.
    ///
    /// Pure in `t_myr`.
    pub fn position_kpc(&self, t_myr: f64) -> DVec3 {
        let local = self.local_offsets(t_myr);
        let r = (self.r0 + local.x).max(MIN_RADIUS_KPC);
        let phi = self.initial_azimuth - self.omega0 * t_myr - local.y / self.r0;
        DVec3::new(r * phi.cos(), local.z, r * phi.sin())
    }
}

impl Default for SunOrbitConstants {
    fn default() -> Self {
        Self::derive(&SunOrbitParams::default())
    }
}

/// The Sun as a moving body with a trail.
#[derive(Debug, Clone)]
pub struct Sun {
    constants: SunOrbitConstants,
    /// Scene units per kpc.
    scale: f64,
    position: DVec3,
    trail: TrailBuffer,
}

impl Sun {
    pub fn new(constants: SunOrbitConstants, scene_units_per_kpc: f64, trail_length: usize) -> Self {
        Self {
            constants,
            scale: scene_units_per_kpc,
            position: constants.position_kpc(0.0) * scene_units_per_kpc,
            trail: TrailBuffer::new(trail_length),
        }
    }

    /// Scene position at `t_myr` without touching any state.
    pub fn position_at(&self, t_myr: f64) -> DVec3 {
        self.constants.position_kpc(t_myr) * self.scale
    }

    /// Move to `t_myr` and record the position in the trail.
    pub fn update(&mut self, t_myr: f64) -> DVec3 {
        self.position = self.position_at(t_myr);
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

    #[inline]
    pub fn constants(&self) -> &SunOrbitConstants {
        &self.constants
    }
}
