// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smooth-scroll requests handed to the host's animator, and the math an
//! animator needs to settle on the target.

/// Animation speed of a smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedProfile {
    /// Explicit scroll requests from the host.
    Fast,
    /// Stabilization after the user lets go.
    Slow,
}

impl SpeedProfile {
    /// Time to travel one inch, in milliseconds.
    #[must_use]
    pub const fn millis_per_inch(self) -> f32 {
        match self {
            Self::Fast => 25.0,
            Self::Slow => 200.0,
        }
    }

    /// Time to travel one pixel at the given screen density, in milliseconds.
    #[must_use]
    pub fn millis_per_pixel(self, density_dpi: f32) -> f32 {
        self.millis_per_inch() / density_dpi
    }
}

/// Where a target item should end up when an animation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAlign {
    /// Align the start (top edge) of the item with the viewport.
    Start,
    /// Center the item within the viewport.
    Center,
    /// Align the end (bottom edge) of the item with the viewport.
    End,
    /// Move just enough to make the item fully visible.
    Nearest,
}

impl ScrollAlign {
    /// Alignment used when travelling in `direction` without centering:
    /// travelling down lands the target at the bottom edge, travelling up at the
    /// top edge.
    #[must_use]
    pub const fn for_direction(direction: i32) -> Self {
        if direction > 0 {
            Self::End
        } else if direction < 0 {
            Self::Start
        } else {
            Self::Nearest
        }
    }

    /// Distance to move an item spanning `view_start..view_end` so it is aligned
    /// within `box_start..box_end`. Positive values move the item down.
    #[must_use]
    pub const fn dt_to_fit(self, view_start: i32, view_end: i32, box_start: i32, box_end: i32) -> i32 {
        match self {
            Self::Start => box_start - view_start,
            Self::End => box_end - view_end,
            Self::Center => (box_start + box_end) / 2 - (view_start + view_end) / 2,
            Self::Nearest => {
                let dt_start = box_start - view_start;
                if dt_start > 0 {
                    return dt_start;
                }
                let dt_end = box_end - view_end;
                if dt_end < 0 {
                    return dt_end;
                }
                0
            }
        }
    }
}

/// A smooth scroll toward one item, to be run by a
/// [`SmoothScroller`](crate::SmoothScroller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmoothScrollRequest {
    /// Item to scroll to.
    pub target_index: usize,
    /// Animation speed.
    pub speed: SpeedProfile,
    /// Settle with the target at the vertical center.
    pub center: bool,
}

impl SmoothScrollRequest {
    /// Request used when stabilizing: slow, centered.
    #[must_use]
    pub const fn stabilize(target_index: usize) -> Self {
        Self {
            target_index,
            speed: SpeedProfile::Slow,
            center: true,
        }
    }

    /// Request used for explicit scrolls from the host: fast, centered only if asked.
    #[must_use]
    pub const fn jump(target_index: usize, center: bool) -> Self {
        Self {
            target_index,
            speed: SpeedProfile::Fast,
            center,
        }
    }

    /// Alignment to settle with, given the direction of travel
    /// (see [`ArcLayout::scroll_vector_for`](crate::ArcLayout::scroll_vector_for)).
    #[must_use]
    pub const fn align(&self, direction: i32) -> ScrollAlign {
        if self.center {
            ScrollAlign::Center
        } else {
            ScrollAlign::for_direction(direction)
        }
    }
}
