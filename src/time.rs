//! Simulation clock for the per-frame orbit update.
//!
//! Accumulates clock time from frame deltas and converts it to simulated
//! time in megayears. Values are `f64` because the orbit's trig arguments
//! (`κt`, `νt`) grow without bound over long sessions.
//!
//! # Example
//!
//! ```ignore
//! use galactic::time::SimulationClock;
//!
//! let mut clock = SimulationClock::new(2.0); // 2 Myr per second
//!
//! // In your frame loop:
//! clock.advance(1.0 / 60.0);
//!
//! println!("Elapsed: {:.2}s", clock.elapsed());
//! println!("Simulated: {:.3} Myr", clock.simulated_myr());
//! ```

use std::time::Instant;

/// Clock driving the solar system.
///
/// `elapsed` is clock seconds (after pause and time scale are applied);
/// `simulated_myr` is `elapsed * myr_per_second`.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Accumulated clock time in seconds.
    elapsed: f64,
    /// Delta applied by the last advance.
    delta: f64,
    /// Total advances since start.
    frame_count: u64,
    /// Simulated megayears per clock second.
    myr_per_second: f64,
    /// Multiplier on incoming deltas (1.0 = normal speed).
    time_scale: f64,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f64>,
    /// Whether time is paused.
    paused: bool,
    /// Wall-clock instant of the last `tick`.
    last_tick: Option<Instant>,
}

impl SimulationClock {
    /// Create a clock at t = 0 with the given simulation rate.
    pub fn new(myr_per_second: f64) -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
            myr_per_second,
            time_scale: 1.0,
            fixed_delta: None,
            paused: false,
            last_tick: None,
        }
    }

    /// Advance by a frame delta in seconds. Returns the delta actually applied.
    ///
    /// Negative and non-finite deltas are treated as zero so time stays
    /// monotonic.
    pub fn advance(&mut self, delta_secs: f64) -> f64 {
        if self.paused {
            self.delta = 0.0;
            return 0.0;
        }

        let raw = self.fixed_delta.unwrap_or(delta_secs);
        let raw = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
        self.delta = raw * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.delta
    }

    /// Advance by the wall-clock time since the previous `tick`.
    ///
    /// The first tick only starts the measurement and advances by zero.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.advance(delta)
    }

    /// Total clock time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta applied by the last advance, in seconds.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Total advances since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Simulated time in megayears.
    #[inline]
    pub fn simulated_myr(&self) -> f64 {
        self.elapsed * self.myr_per_second
    }

    /// Simulated megayears per clock second.
    #[inline]
    pub fn myr_per_second(&self) -> f64 {
        self.myr_per_second
    }

    /// Change the simulation rate. Negative rates clamp to 0.
    pub fn set_myr_per_second(&mut self, rate: f64) {
        self.myr_per_second = rate.max(0.0);
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Pause time progression.
    ///
    /// While paused, `advance` applies 0 and `elapsed()` stops increasing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_tick = None;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set a fixed delta for deterministic stepping.
    ///
    /// Pass `None` to use the deltas given to `advance`.
    pub fn set_fixed_delta(&mut self, delta: Option<f64>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset to t = 0, keeping rate, scale and fixed delta.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
        self.frame_count = 0;
        self.paused = false;
        self.last_tick = None;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
