// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picks the item to snap to the vertical center once interaction settles.

use crate::{ItemProvider, PixelSize, SmoothScrollRequest, VisibleWindow};

/// Slot of the laid-out item closest to the vertical center, with the signed
/// distance of its midpoint from the center (negative above, positive below).
///
/// Items are scanned from the top; the scan ends at the first item that is not
/// closer than the one before it.
#[must_use]
pub fn nearest_to_center<H>(window: &VisibleWindow<H>, viewport_height: i32) -> Option<(usize, i32)> {
    let center = viewport_height / 2;
    let mut nearest = None;
    let mut min_distance = i32::MAX;
    for (slot, item) in window.iter().enumerate() {
        let distance = item.mid_y() - center;
        if distance.unsigned_abs() < min_distance.unsigned_abs() {
            min_distance = distance;
            nearest = Some(slot);
        } else {
            break;
        }
    }
    nearest.map(|slot| (slot, min_distance))
}

/// Returns `true` if item `index` can be moved down to the center without
/// opening a gap above item 0.
pub fn could_bring_down_to_center<P: ItemProvider>(
    provider: &mut P,
    index: usize,
    viewport: PixelSize,
) -> bool {
    let mut top_gap = viewport.height / 2;
    for above in 0..index {
        top_gap -= provider.measure_index(above, viewport).height;
        if top_gap <= 0 {
            return true;
        }
    }
    top_gap -= provider.measure_index(index, viewport).height / 2;
    top_gap <= 0
}

/// Returns `true` if item `index` can be moved up to the center without
/// opening a gap below the last item.
pub fn could_bring_up_to_center<P: ItemProvider>(
    provider: &mut P,
    index: usize,
    viewport: PixelSize,
) -> bool {
    let mut bottom_gap = viewport.height / 2;
    for below in (index + 1..provider.item_count()).rev() {
        bottom_gap -= provider.measure_index(below, viewport).height;
        if bottom_gap <= 0 {
            return true;
        }
    }
    bottom_gap -= provider.measure_index(index, viewport).height / 2;
    bottom_gap <= 0
}

/// Chooses the item to settle on, if any.
///
/// The item nearest the center is preferred. When it cannot reach the center
/// because the list ends first, its neighbour in the direction the content has
/// to travel is tried instead. Returns `None` when the nearest item is already
/// centered or no candidate can be centered.
pub fn stabilize_target<P: ItemProvider>(
    provider: &mut P,
    window: &VisibleWindow<P::Handle>,
    viewport: PixelSize,
) -> Option<SmoothScrollRequest> {
    let (slot, offset) = nearest_to_center(window, viewport.height)?;
    let nearest = window.get(slot)?.index;

    let target = if offset < 0 {
        if could_bring_down_to_center(provider, nearest, viewport) {
            Some(nearest)
        } else {
            window
                .get(slot + 1)
                .map(|next| next.index)
                .filter(|&next| could_bring_up_to_center(provider, next, viewport))
        }
    } else if offset > 0 {
        if could_bring_up_to_center(provider, nearest, viewport) {
            Some(nearest)
        } else {
            slot.checked_sub(1)
                .and_then(|previous| window.get(previous))
                .map(|previous| previous.index)
                .filter(|&previous| could_bring_down_to_center(provider, previous, viewport))
        }
    } else {
        None
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(nearest, offset, ?target, "stabilize");
    target.map(SmoothScrollRequest::stabilize)
}
