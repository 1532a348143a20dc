// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visible window: items laid out by the most recent fill.

use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

use crate::ItemMetrics;

/// One laid-out item.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem<H> {
    /// Item index.
    pub index: usize,
    /// Host handle for the item's view.
    pub handle: H,
    /// Left edge, from the ellipse projection.
    pub left: i32,
    /// Top edge of the decorated item.
    pub top: i32,
    /// Decorated size and decoration.
    pub metrics: ItemMetrics,
    /// Uniform scale applied around [`PlacedItem::pivot`].
    pub scale: f32,
}

impl<H> PlacedItem<H> {
    /// Bottom edge of the decorated item.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top + self.metrics.height
    }

    /// Top edge of the content.
    #[must_use]
    pub const fn content_top(&self) -> i32 {
        self.top + self.metrics.insets.top
    }

    /// Bottom edge of the content.
    #[must_use]
    pub const fn content_bottom(&self) -> i32 {
        self.bottom() - self.metrics.insets.bottom
    }

    /// Vertical midpoint of the decorated item, rounded toward zero.
    #[must_use]
    pub const fn mid_y(&self) -> i32 {
        (self.top + self.bottom()) / 2
    }

    /// Decorated bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.left + self.metrics.width),
            f64::from(self.bottom()),
        )
    }

    /// Content bounds, before scaling.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.content_top()),
            f64::from(self.left + self.metrics.width),
            f64::from(self.content_bottom()),
        )
    }

    /// Scale pivot: the left edge at the content's vertical center.
    #[must_use]
    pub fn pivot(&self) -> Point {
        let content = self.content_bounds();
        Point::new(content.x0, content.center().y)
    }

    /// Transform hosts apply to the item's content when drawing.
    #[must_use]
    pub fn transform(&self) -> Affine {
        let pivot = self.pivot().to_vec2();
        Affine::translate(pivot) * Affine::scale(f64::from(self.scale)) * Affine::translate(-pivot)
    }
}

/// Items laid out by one fill pass, in index order.
///
/// The window is derived state. It is rebuilt on every pass and only carries
/// handles forward so they can be reused or released.
#[derive(Debug, Clone)]
pub struct VisibleWindow<H> {
    items: SmallVec<[PlacedItem<H>; 16]>,
}

impl<H> Default for VisibleWindow<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> VisibleWindow<H> {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, item: PlacedItem<H>) {
        debug_assert!(
            self.items.last().is_none_or(|last| last.index + 1 == item.index),
            "window items must be contiguous"
        );
        self.items.push(item);
    }

    /// Number of laid-out items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First laid-out item.
    #[must_use]
    pub fn first(&self) -> Option<&PlacedItem<H>> {
        self.items.first()
    }

    /// Last laid-out item.
    #[must_use]
    pub fn last(&self) -> Option<&PlacedItem<H>> {
        self.items.last()
    }

    /// Item at position `slot` within the window (not the item index).
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&PlacedItem<H>> {
        self.items.get(slot)
    }

    /// Laid-out item with the given item index.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&PlacedItem<H>> {
        let first = self.first()?.index;
        self.items.get(index.checked_sub(first)?)
    }

    /// Iterates laid-out items from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedItem<H>> {
        self.items.iter()
    }

    /// Moves every item down by `dy` pixels (up for negative `dy`).
    pub fn offset_vertical(&mut self, dy: i32) {
        for item in &mut self.items {
            item.top += dy;
        }
    }

    /// Index of the topmost item whose content contains `point`.
    ///
    /// Hosts use this to resolve tap coordinates, for example from a scroll
    /// wheel laid over the list. Scaling is not taken into account.
    #[must_use]
    pub fn index_at(&self, point: Point) -> Option<usize> {
        self.items
            .iter()
            .rev()
            .find(|item| item.content_bounds().contains(point))
            .map(|item| item.index)
    }

    /// Removes every item, yielding them from top to bottom.
    pub fn drain(&mut self) -> impl Iterator<Item = PlacedItem<H>> + '_ {
        self.items.drain(..)
    }
}
