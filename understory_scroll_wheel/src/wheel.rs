// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll wheel gesture state machine.
//!
//! A [`ScrollWheel`] is fed raw pointer events and queues [`WheelEvent`]s for
//! the host to drain. Presses that start inside the [`TouchRegion`] are tracked
//! as rotation: every move beyond the touch slop becomes a
//! [`WheelEvent::Scroll`], and a fast release becomes a single
//! [`WheelEvent::Fling`]. When clicks are handled, presses anywhere on the
//! wheel also produce [`WheelEvent::Click`] and [`WheelEvent::LongClick`],
//! carrying the pointer position for the host to hit test.
//!
//! ## Usage
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_scroll_wheel::{ScrollWheel, WheelConfig, WheelEvent};
//!
//! let mut wheel = ScrollWheel::new(WheelConfig::default());
//! wheel.set_size(Size::new(200.0, 200.0));
//!
//! // Press on the ring at the bottom and drag to the left.
//! assert!(wheel.on_pointer_down(Point::new(100.0, 180.0), 0));
//! wheel.on_pointer_move(Point::new(90.0, 180.0), 16);
//! wheel.on_pointer_up(Point::new(90.0, 180.0), 400);
//!
//! let events: Vec<_> = wheel.drain_events().collect();
//! assert_eq!(events, [WheelEvent::Scroll(-10.0), WheelEvent::Released]);
//! ```
//!
//! ## Recognition rules
//!
//! 1. **Consumption**: a down is consumed if it lands in the annulus, or anywhere
//!    when clicks are handled. Unconsumed gestures produce no events.
//! 2. **Scroll**: only for presses that started in the annulus, once the pointer
//!    leaves the touch slop; deltas are previous minus current position mapped
//!    through [`rotational_delta`](crate::rotational_delta).
//! 3. **Fling**: on release after scrolling, when the velocity exceeds the
//!    minimum on either axis; the value is the negated rotational velocity.
//! 4. **Click / long click**: only while the pointer stays within the slop. A
//!    long press ends tap and scroll recognition for the rest of the gesture.
//! 5. **Released**: queued first on every release of a consumed gesture.

use alloc::collections::VecDeque;

use kurbo::{Point, Size};

use crate::{GestureThresholds, HighlightRing, TouchRegion, VelocityTracker, rotational_delta};

/// Events produced by a [`ScrollWheel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelEvent {
    /// Rotation since the previous scroll event. Positive is anticlockwise.
    Scroll(f64),
    /// Rotational velocity at release, in pixels per second. Positive is clockwise.
    Fling(f64),
    /// A tap, at the release position.
    Click(Point),
    /// A long press, at the down position.
    LongClick(Point),
    /// The pointer was lifted.
    Released,
}

/// Tracking state of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelPhase {
    /// No consumed gesture in progress.
    #[default]
    Idle,
    /// A press outside the annulus, tracked only for clicks.
    Pressed,
    /// A press inside the annulus, tracked for rotation and clicks.
    Tracking,
}

/// Configuration of a [`ScrollWheel`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelConfig {
    /// A disabled wheel consumes nothing and emits nothing.
    pub enabled: bool,
    /// Consume presses anywhere on the wheel to report clicks and long clicks.
    ///
    /// Enable this when the wheel lies over the list it scrolls.
    pub handle_clicks: bool,
    /// Draw the touch area as a cue for the user.
    pub highlight_touch_area: bool,
    /// Width of the ring, in pixels.
    pub touch_area_thickness: f64,
    /// Gesture recognition thresholds.
    pub gesture: GestureThresholds,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            handle_clicks: true,
            highlight_touch_area: true,
            touch_area_thickness: 40.0,
            gesture: GestureThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    down_position: Point,
    down_time: u64,
    last_position: Point,
    scrolling: bool,
    long_pressed: bool,
}

/// Circular scroll wheel recognizer.
#[derive(Debug, Clone)]
pub struct ScrollWheel {
    config: WheelConfig,
    size: Size,
    region: TouchRegion,
    phase: WheelPhase,
    press: Option<Press>,
    velocity: VelocityTracker,
    events: VecDeque<WheelEvent>,
}

impl ScrollWheel {
    /// Creates a wheel with an empty size. Call [`ScrollWheel::set_size`] once
    /// the wheel is laid out.
    #[must_use]
    pub fn new(config: WheelConfig) -> Self {
        Self {
            config,
            size: Size::ZERO,
            region: TouchRegion::from_size(Size::ZERO, config.touch_area_thickness),
            phase: WheelPhase::Idle,
            press: None,
            velocity: VelocityTracker::new(),
            events: VecDeque::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Enables or disables the wheel. Disabling cancels the current gesture.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.on_pointer_cancel();
        }
    }

    /// Enables or disables click handling for subsequent gestures.
    pub fn set_handle_clicks(&mut self, handle_clicks: bool) {
        self.config.handle_clicks = handle_clicks;
    }

    /// Shows or hides the touch area highlight.
    pub fn set_highlight_touch_area(&mut self, highlight: bool) {
        self.config.highlight_touch_area = highlight;
    }

    /// Sets the ring width and recomputes the touch region.
    pub fn set_touch_area_thickness(&mut self, thickness: f64) {
        self.config.touch_area_thickness = thickness;
        self.region = TouchRegion::from_size(self.size, thickness);
    }

    /// Sets the laid-out size of the wheel and recomputes the touch region.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.region = TouchRegion::from_size(size, self.config.touch_area_thickness);
    }

    /// Replaces the touch region directly, for wheels that are not centered in
    /// their bounds.
    pub fn set_region(&mut self, region: TouchRegion) {
        self.region = region;
    }

    /// Returns the touch region.
    #[must_use]
    pub const fn region(&self) -> &TouchRegion {
        &self.region
    }

    /// Returns the tracking state of the current gesture.
    #[must_use]
    pub const fn phase(&self) -> WheelPhase {
        self.phase
    }

    /// The ring to draw, if highlighting is enabled.
    #[must_use]
    pub fn highlight(&self) -> Option<HighlightRing> {
        self.config
            .highlight_touch_area
            .then(|| self.region.highlight())
    }

    /// Handles a pointer down. Returns `true` if the gesture is consumed.
    pub fn on_pointer_down(&mut self, position: Point, time_ms: u64) -> bool {
        self.press = None;
        self.velocity.reset();
        if !self.config.enabled {
            self.set_phase(WheelPhase::Idle);
            return false;
        }

        let in_annulus = self.region.contains(position);
        if !in_annulus && !self.config.handle_clicks {
            self.set_phase(WheelPhase::Idle);
            return false;
        }

        self.press = Some(Press {
            down_position: position,
            down_time: time_ms,
            last_position: position,
            scrolling: false,
            long_pressed: false,
        });
        self.velocity.add(time_ms, position);
        self.set_phase(if in_annulus {
            WheelPhase::Tracking
        } else {
            WheelPhase::Pressed
        });
        true
    }

    /// Handles a pointer move. Returns `true` if the gesture is consumed.
    pub fn on_pointer_move(&mut self, position: Point, time_ms: u64) -> bool {
        self.poll(time_ms);
        let thresholds = self.config.gesture;
        let tracking = self.phase == WheelPhase::Tracking;
        let center = self.region.center();
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        self.velocity.add(time_ms, position);
        if press.long_pressed {
            return true;
        }

        if !press.scrolling {
            if !thresholds.exceeds_slop(press.down_position, position) {
                return true;
            }
            press.scrolling = true;
            #[cfg(feature = "tracing")]
            tracing::trace!(?position, "wheel left touch slop");
        }

        let distance = press.last_position - position;
        if distance.x.abs() >= 1.0 || distance.y.abs() >= 1.0 {
            press.last_position = position;
            if tracking {
                self.events
                    .push_back(WheelEvent::Scroll(rotational_delta(center, position, distance)));
            }
        }
        true
    }

    /// Handles a pointer up. Returns `true` if the gesture was consumed.
    pub fn on_pointer_up(&mut self, position: Point, time_ms: u64) -> bool {
        self.poll(time_ms);
        let Some(press) = self.press.take() else {
            return false;
        };
        self.velocity.add(time_ms, position);
        self.events.push_back(WheelEvent::Released);

        if press.long_pressed {
            // Nothing else after a long press.
        } else if !press.scrolling {
            if self.config.handle_clicks {
                self.events.push_back(WheelEvent::Click(position));
            }
        } else if self.phase == WheelPhase::Tracking {
            let thresholds = self.config.gesture;
            let velocity = thresholds.clamp_fling(self.velocity.velocity());
            if thresholds.is_fling(velocity) {
                let fling = -rotational_delta(self.region.center(), position, velocity);
                self.events.push_back(WheelEvent::Fling(fling));
            }
        }

        self.velocity.reset();
        self.set_phase(WheelPhase::Idle);
        true
    }

    /// Abandons the current gesture without emitting events.
    pub fn on_pointer_cancel(&mut self) {
        self.press = None;
        self.velocity.reset();
        self.set_phase(WheelPhase::Idle);
    }

    /// Fires a pending long press once its timeout has elapsed at `time_ms`.
    ///
    /// Hosts call this from a timer while a press is held; pointer events poll
    /// implicitly. Returns `true` if a long press fired.
    pub fn poll(&mut self, time_ms: u64) -> bool {
        let thresholds = self.config.gesture;
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        if press.scrolling
            || press.long_pressed
            || !thresholds.long_press_due(press.down_time, time_ms)
        {
            return false;
        }
        press.long_pressed = true;
        if self.config.handle_clicks {
            self.events
                .push_back(WheelEvent::LongClick(press.down_position));
        }
        true
    }

    /// Removes and returns the queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = WheelEvent> + '_ {
        self.events.drain(..)
    }

    fn set_phase(&mut self, phase: WheelPhase) {
        if self.phase != phase {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = ?self.phase, to = ?phase, "wheel phase");
            self.phase = phase;
        }
    }
}
