// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation for flings.

use kurbo::{Point, Vec2};

/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples this recent, relative to the newest, are used.
const HORIZON_MS: u64 = 100;

/// A pause this long between two samples means the pointer had stopped.
const ASSUME_STOPPED_MS: u64 = 40;

/// Weight decay per sample, newest first.
const DECAY: f64 = 0.95;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    position: Point,
}

/// Estimates pointer velocity from recent positions.
///
/// Velocity is the slope of a weighted least-squares line through the samples
/// of the last 100 ms, with more recent samples weighted more heavily. Samples
/// before a pause of 40 ms or more are ignored, so lifting the pointer after
/// holding it still yields no velocity.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records the pointer position at `time_ms`.
    pub fn add(&mut self, time_ms: u64, position: Point) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Forgets every sample.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Current velocity in pixels per second; zero with fewer than two usable samples.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples[self.index] else {
            return Vec2::ZERO;
        };

        let mut sum_weight = 0.0;
        let mut sum_t = 0.0;
        let mut sum_tt = 0.0;
        let mut sum_p = Vec2::ZERO;
        let mut sum_tp = Vec2::ZERO;

        let mut weight = 1.0;
        let mut previous_time = newest.time_ms;
        let mut slot = self.index;
        let mut count = 0;
        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[slot] else {
                break;
            };
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || previous_time.saturating_sub(sample.time_ms) > ASSUME_STOPPED_MS
            {
                break;
            }

            let t = -(age as f64);
            let p = sample.position.to_vec2();
            sum_weight += weight;
            sum_t += weight * t;
            sum_tt += weight * t * t;
            sum_p += weight * p;
            sum_tp += weight * t * p;

            weight *= DECAY;
            previous_time = sample.time_ms;
            count += 1;
            slot = slot.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }

        if count < 2 {
            return Vec2::ZERO;
        }
        let denom = sum_weight * sum_tt - sum_t * sum_t;
        if denom.abs() < f64::EPSILON {
            return Vec2::ZERO;
        }
        // Slope in pixels per millisecond.
        let slope = (sum_weight * sum_tp - sum_t * sum_p) / denom;
        slope * 1000.0
    }
}
