//! Random sampling helpers for structure generation.
//!
//! Wraps an injected random source with the handful of draws the galaxy
//! generator needs, so each population reads as a list of distributions
//! rather than a pile of `rng.gen()` calls.
//!
//! ```ignore
//! use galactic::sampling::Sampler;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut s = Sampler::new(&mut rng);
//! let angle = s.random_angle();
//! let jitter = s.powered(3.0) * s.random_sign();
//! ```
//!
//! Every helper consumes draws in a fixed order, which keeps seeded runs
//! reproducible.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Sampling context over a borrowed random source.
pub struct Sampler<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Sampler<'a, R> {
    /// Borrow a random source for sampling.
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    // ========== Random primitives ==========

    /// Uniform f32 in [0, 1).
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform integer in [0, n). Returns 0 when `n` is 0.
    #[inline]
    pub fn random_index(&mut self, n: usize) -> usize {
        ((self.random() * n as f32) as usize).min(n.saturating_sub(1))
    }

    /// +1.0 or -1.0 with equal probability.
    #[inline]
    pub fn random_sign(&mut self) -> f32 {
        if self.random() < 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// `U^exponent`. Exponents above 1 pile mass near zero.
    #[inline]
    pub fn powered(&mut self, exponent: f32) -> f32 {
        self.random().powf(exponent)
    }

    /// `(U - 0.5) * span`, a symmetric jitter of total width `span`.
    #[inline]
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.random() - 0.5) * span
    }

    // ========== Composite draws ==========

    /// Uniform angle in [0, 2π).
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.random() * TAU
    }

    /// Pick one entry from a non-empty palette.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.random_index(items.len())]
    }

    /// Offset in the XZ plane with `distance = U^2 * spread`.
    ///
    /// Squaring the radial draw concentrates offsets near the origin.
    pub fn polar_offset(&mut self, spread: f32) -> Vec2 {
        let angle = self.random_angle();
        let distance = self.powered(2.0) * spread;
        Vec2::new(angle.cos() * distance, angle.sin() * distance)
    }
}
