// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The annulus in which wheel gestures start.

use kurbo::{Circle, Point, Size};

/// Ring-shaped touch area between an inner and an outer radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchRegion {
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
}

impl TouchRegion {
    /// Creates a region from explicit radii.
    ///
    /// Negative radii are treated as zero, and an inner radius larger than the
    /// outer one is reduced to it.
    #[must_use]
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        let outer_radius = outer_radius.max(0.0);
        Self {
            center,
            inner_radius: inner_radius.max(0.0).min(outer_radius),
            outer_radius,
        }
    }

    /// Region of a wheel laid out at `size`: centered, touching the shorter
    /// edge, `thickness` wide.
    #[must_use]
    pub fn from_size(size: Size, thickness: f64) -> Self {
        let outer_radius = size.width.min(size.height) / 2.0;
        Self::new(
            Point::new(size.width / 2.0, size.height / 2.0),
            outer_radius - thickness,
            outer_radius,
        )
    }

    /// Center of the wheel.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Inner radius.
    #[must_use]
    pub const fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Outer radius.
    #[must_use]
    pub const fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Width of the ring.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Returns `true` if `point` lies strictly between the two circles.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let distance_squared = (point - self.center).hypot2();
        distance_squared > self.inner_radius * self.inner_radius
            && distance_squared < self.outer_radius * self.outer_radius
    }

    /// The ring to draw as a cue for where the wheel can be used.
    #[must_use]
    pub fn highlight(&self) -> HighlightRing {
        HighlightRing {
            circle: Circle::new(self.center, (self.inner_radius + self.outer_radius) / 2.0),
            stroke_width: self.thickness(),
        }
    }
}

/// A stroked circle covering a [`TouchRegion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRing {
    /// Circle through the middle of the ring.
    pub circle: Circle,
    /// Stroke width that covers the ring.
    pub stroke_width: f64,
}
