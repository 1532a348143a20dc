// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thresholds that separate taps, long presses, scrolls and flings.

use kurbo::{Point, Vec2};

/// Gesture recognition thresholds.
///
/// The defaults match common touch platform values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureThresholds {
    /// Distance the pointer may travel from the down position before the
    /// gesture becomes a scroll.
    pub touch_slop: f64,
    /// Time a press must be held within the slop to become a long press.
    pub long_press_timeout_ms: u64,
    /// Velocity, in pixels per second on either axis, a release needs to fling.
    pub min_fling_velocity: f64,
    /// Velocity, in pixels per second, each axis of a fling is clamped to.
    pub max_fling_velocity: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            long_press_timeout_ms: 400,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
        }
    }
}

impl GestureThresholds {
    /// Returns `true` if moving from `down` to `current` leaves the slop circle.
    #[must_use]
    pub fn exceeds_slop(&self, down: Point, current: Point) -> bool {
        (current - down).hypot2() > self.touch_slop * self.touch_slop
    }

    /// Clamps each axis of `velocity` to the maximum fling velocity.
    #[must_use]
    pub fn clamp_fling(&self, velocity: Vec2) -> Vec2 {
        let max = self.max_fling_velocity.abs();
        Vec2::new(velocity.x.clamp(-max, max), velocity.y.clamp(-max, max))
    }

    /// Returns `true` if a release at `velocity` is fast enough to fling.
    #[must_use]
    pub fn is_fling(&self, velocity: Vec2) -> bool {
        velocity.x.abs() > self.min_fling_velocity || velocity.y.abs() > self.min_fling_velocity
    }

    /// Returns `true` once a press that started at `down_ms` has been held long
    /// enough at `now_ms` to count as a long press.
    #[must_use]
    pub fn long_press_due(&self, down_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(down_ms) >= self.long_press_timeout_ms
    }
}
