// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_arc_list --heading-base-level=0

//! Understory Arc List: incremental list layout along a circle or ellipse.
//!
//! Items are stacked vertically like an ordinary list, but each item's left
//! edge follows the right half of an ellipse, and items optionally shrink as
//! they move away from the vertical center. The crate is renderer-agnostic and
//! works in whole pixels.
//!
//! The core concepts are:
//!
//! - [`ScrollAnchor`]: the whole scroll state, a pair of the first laid-out
//!   index and the offset of its top edge. Filling from the same anchor always
//!   yields the same layout, so the anchor is also the persisted state.
//! - [`fill`]: lays out a [`VisibleWindow`] from an anchor, placing items with
//!   [`Ellipse::x_from_y`] and scaling them with [`scale_for`].
//! - [`clamp_scroll`], [`anchor_after_offset`] and [`reconcile_jump`]: keep the
//!   anchor free of gaps at both ends of the list while scrolling and jumping.
//! - [`stabilize_target`]: chooses the item to snap to the center once
//!   interaction settles.
//! - [`ArcLayout`]: a small controller that owns the anchor, the viewport and
//!   the most recent window, and ties the pieces above together.
//!
//! This crate deliberately does **not** own item views or run animations. Host
//! frameworks are responsible for:
//!
//! - Creating, measuring and recycling views through an [`ItemProvider`].
//! - Positioning views at each [`PlacedItem`]'s `left`/`top` and drawing them
//!   with [`PlacedItem::transform`].
//! - Running smooth scrolls requested through a [`SmoothScroller`], usually by
//!   feeding frame deltas back into [`ArcLayout::scroll_by`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_arc_list::{
//!     ArcLayout, ArcLayoutConfig, Ellipse, ItemProvider, PixelSize, ScrollAnchor,
//! };
//!
//! // Twenty rows, 50 pixels tall each. Handles are just indices here.
//! struct Rows;
//!
//! impl ItemProvider for Rows {
//!     type Handle = usize;
//!     fn item_count(&self) -> usize { 20 }
//!     fn view_for_index(&mut self, index: usize) -> usize { index }
//!     fn release_view(&mut self, _handle: usize) {}
//!     fn measure(&mut self, _handle: &usize, _constraints: PixelSize) -> PixelSize {
//!         PixelSize::new(120, 50)
//!     }
//! }
//!
//! let ellipse = Ellipse::circle(150.0, 0.0).unwrap();
//! let mut layout = ArcLayout::new(ArcLayoutConfig::new(ellipse));
//! layout.set_viewport(PixelSize::new(300, 300));
//!
//! let mut rows = Rows;
//! layout.layout(&mut rows);
//! assert_eq!(layout.anchor(), ScrollAnchor::ZERO);
//!
//! // Scrolling past the top is clamped away.
//! assert_eq!(layout.scroll_by(-100, &mut rows), 0);
//!
//! // Jumping centers the target item.
//! layout.jump_to(10, &mut rows).unwrap();
//! let target = layout.window().item(10).unwrap();
//! assert_eq!(target.mid_y(), 150);
//! // It is also the rightmost item.
//! assert!(layout.window().iter().all(|item| item.left <= target.left));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod arc_layout;
mod config;
mod ellipse;
mod error;
mod fill;
mod host;
mod reconcile;
mod smooth_scroll;
mod stabilize;
mod window;

#[cfg(test)]
mod test_host;

pub use anchor::ScrollAnchor;
pub use arc_layout::{ArcLayout, ScrollState};
pub use config::{ArcLayoutConfig, LayoutFlags};
pub use ellipse::{Ellipse, ShapeAttrs};
pub use error::{ScrollError, ShapeError};
pub use fill::{fill, scale_for};
pub use host::{Insets, ItemMetrics, ItemProvider, PixelSize, SmoothScroller};
pub use reconcile::{anchor_after_offset, clamp_scroll, reconcile_jump, repair_anchor};
pub use smooth_scroll::{ScrollAlign, SmoothScrollRequest, SpeedProfile};
pub use stabilize::{
    could_bring_down_to_center, could_bring_up_to_center, nearest_to_center, stabilize_target,
};
pub use window::{PlacedItem, VisibleWindow};
