//! Fixed-capacity position history for drawing fading paths.
//!
//! Samples are stored most-recent-first. The renderer always receives a
//! full `capacity`-length array: slots past the recorded history repeat the
//! oldest sample, so the tail of the line collapses onto a point instead of
//! jumping to garbage or the origin.

use std::collections::VecDeque;

use glam::Vec3;

/// Default number of samples per trail.
pub const DEFAULT_TRAIL_LENGTH: usize = 300;

/// Most-recent-first ring buffer of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailBuffer {
    samples: VecDeque<Vec3>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a position at the front, evicting the oldest beyond capacity.
    pub fn push(&mut self, position: Vec3) {
        self.samples.push_front(position);
        self.samples.truncate(self.capacity);
    }

    /// Number of recorded samples, never more than `capacity`.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample.
    pub fn newest(&self) -> Option<Vec3> {
        self.samples.front().copied()
    }

    /// Oldest retained sample.
    pub fn oldest(&self) -> Option<Vec3> {
        self.samples.back().copied()
    }

    /// Recorded samples, newest first.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.samples.iter().copied()
    }

    /// Fill `out` newest-first, padding past the history with the oldest sample.
    ///
    /// Writes at most `out.len()` samples. With no history, `out` is zeroed.
    pub fn write_padded(&self, out: &mut [Vec3]) {
        let pad = self.oldest().unwrap_or(Vec3::ZERO);
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.samples.get(i).copied().unwrap_or(pad);
        }
    }

    /// A `capacity`-length array, newest first, padded with the oldest sample.
    pub fn padded(&self) -> Vec<Vec3> {
        let mut out = vec![Vec3::ZERO; self.capacity];
        self.write_padded(&mut out);
        out
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LENGTH)
    }
}
