// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll anchor: the whole scroll state of an arc layout.

/// Where filling starts: the index of the first laid-out item and the offset of its top edge.
///
/// Replaying a fill from the same anchor, item count and viewport always yields
/// the same window, which makes this pair the persisted state of a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    /// Index of the first item laid out.
    pub fill_start: usize,
    /// Top edge of that item, in pixels from the viewport top. Zero or negative
    /// whenever the layout has no gap at the top.
    pub first_child_top: i32,
}

impl ScrollAnchor {
    /// Anchor at the very top of the list.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates an anchor.
    #[must_use]
    pub const fn new(fill_start: usize, first_child_top: i32) -> Self {
        Self {
            fill_start,
            first_child_top,
        }
    }

    /// Returns `true` if this anchor starts before `other` in content order.
    ///
    /// At the same index, the anchor whose item sits lower (larger offset) starts
    /// earlier, since more of the content above it is visible.
    #[must_use]
    pub const fn starts_before(&self, other: &Self) -> bool {
        self.fill_start < other.fill_start
            || (self.fill_start == other.fill_start
                && self.first_child_top > other.first_child_top)
    }
}
