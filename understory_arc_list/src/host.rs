// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces to the host: item views and the smooth-scroll animator.

use crate::SmoothScrollRequest;

/// A width and height in whole pixels.
///
/// Used for the viewport, for measurement constraints, and for measured item content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelSize {
    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Extra space a decoration adds above and below an item's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    /// Space above the content.
    pub top: i32,
    /// Space below the content.
    pub bottom: i32,
}

impl Insets {
    /// No decoration.
    pub const ZERO: Self = Self { top: 0, bottom: 0 };
}

/// Decorated size of one item, plus the decoration that is part of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ItemMetrics {
    /// Decorated width.
    pub width: i32,
    /// Decorated height: content height plus both insets.
    pub height: i32,
    /// The decoration included in `height`.
    pub insets: Insets,
}

impl ItemMetrics {
    /// Combines a measured content size with its decoration.
    #[must_use]
    pub const fn decorate(content: PixelSize, insets: Insets) -> Self {
        Self {
            width: content.width,
            height: content.height + insets.top + insets.bottom,
            insets,
        }
    }

    /// Height of the content alone.
    #[must_use]
    pub const fn content_height(&self) -> i32 {
        self.height - self.insets.top - self.insets.bottom
    }
}

/// Source of item views for a layout.
///
/// The layout never owns item content. It asks the provider for a handle when an
/// index enters the visible window, measures it, and hands it back through
/// [`ItemProvider::release_view`] once the index leaves the window. Handles still
/// in the window are reused across layout passes without another call to
/// [`ItemProvider::view_for_index`].
pub trait ItemProvider {
    /// Host-side handle for one item view.
    type Handle;

    /// Number of items, indexed `0..item_count()`.
    fn item_count(&self) -> usize;

    /// Creates or reuses a view for `index`.
    fn view_for_index(&mut self, index: usize) -> Self::Handle;

    /// Returns a view that is no longer part of the layout.
    fn release_view(&mut self, handle: Self::Handle);

    /// Measures the content of a view under the given constraints.
    fn measure(&mut self, handle: &Self::Handle, constraints: PixelSize) -> PixelSize;

    /// Decoration around the item at `index`. Undecorated by default.
    fn insets(&self, index: usize) -> Insets {
        let _ = index;
        Insets::ZERO
    }

    /// Decorated metrics of an item that is not currently laid out.
    ///
    /// The default obtains a view, measures it and releases it again. Hosts with a
    /// cheaper source of sizes may override this.
    fn measure_index(&mut self, index: usize, constraints: PixelSize) -> ItemMetrics {
        let handle = self.view_for_index(index);
        let content = self.measure(&handle, constraints);
        self.release_view(handle);
        ItemMetrics::decorate(content, self.insets(index))
    }
}

/// The host's smooth-scroll animator.
///
/// The layout only decides when to animate and toward which item. The host runs
/// the animation frame by frame, usually by calling
/// [`ArcLayout::scroll_by`](crate::ArcLayout::scroll_by).
pub trait SmoothScroller {
    /// Returns `true` while an animation is running.
    fn is_animating(&self) -> bool;

    /// Starts an animation. Replaces any animation already running.
    fn start_smooth_scroll(&mut self, request: SmoothScrollRequest);
}
