// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_wheel --heading-base-level=0

//! Understory Scroll Wheel: circular touch input for scrolling lists.
//!
//! A scroll wheel is a ring drawn over (or next to) a list. Dragging along the
//! ring scrolls the list, flicking it flings, and taps and long presses can be
//! forwarded to the items underneath.
//!
//! The core concepts are:
//!
//! - [`TouchRegion`]: the annulus between an inner and an outer radius where
//!   rotation gestures start, and the [`HighlightRing`] that shows it.
//! - [`rotational_delta`]: maps a linear motion at some position on the wheel to
//!   a signed rotation using the quadrant around the center.
//! - [`VelocityTracker`] and [`GestureThresholds`]: release velocity and the
//!   limits that tell taps, long presses, scrolls and flings apart.
//! - [`ScrollWheel`]: the state machine that consumes pointer events and
//!   queues [`WheelEvent`]s.
//!
//! This crate does not draw anything and does not know what it scrolls. Hosts
//! feed pointer events with millisecond timestamps, drain the events, and map
//! them onto their list, for example [`WheelEvent::Scroll`] to a scroll by
//! that many pixels and [`WheelEvent::Click`] to a hit test.
//!
//! See the [`wheel`] module for the recognition rules and an example.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod delta;
mod gesture;
mod region;
mod velocity;
pub mod wheel;

pub use delta::rotational_delta;
pub use gesture::GestureThresholds;
pub use region::{HighlightRing, TouchRegion};
pub use velocity::VelocityTracker;
pub use wheel::{ScrollWheel, WheelConfig, WheelEvent, WheelPhase};
