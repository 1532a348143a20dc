// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps the scroll anchor free of gaps: clamps scroll deltas at the ends of
//! the list, recomputes the anchor after items move, and repairs the anchor
//! after a jump to an arbitrary index.

use crate::{ItemProvider, PixelSize, ScrollAnchor, VisibleWindow};

/// Clamps a scroll delta so the list never scrolls past its first or last item.
///
/// Positive `dy` scrolls content up (toward later items). When the first item is
/// laid out and scrolling up would pull its top below the viewport top, the
/// result lands that top exactly at `0`; the same holds for the last item's bottom
/// and the viewport bottom. Ends that are not laid out yet are measured through
/// `provider` so a delta that would reach past them is stopped as well. When the
/// whole list fits in the viewport, the content is pinned to the top.
///
/// This is a hard stop: the result never overshoots a boundary and never bounces.
pub fn clamp_scroll<P: ItemProvider>(
    provider: &mut P,
    dy: i32,
    window: &VisibleWindow<P::Handle>,
    viewport: PixelSize,
) -> i32 {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return 0;
    };
    let item_count = provider.item_count();
    let height = viewport.height;
    let reaches_end = last.index + 1 == item_count;

    if first.index == 0 && reaches_end && last.bottom().saturating_sub(first.top) <= height {
        return first.top;
    }
    if dy < 0 && first.index == 0 && first.top.saturating_sub(dy) > 0 {
        return first.top;
    }
    if dy > 0 && reaches_end && last.bottom().saturating_sub(dy) < height {
        return last.bottom() - height;
    }

    if dy < 0 && first.index > 0 {
        // Measure upward until enough content is known to cover the delta.
        let mut top = first.top;
        for index in (0..first.index).rev() {
            top -= provider.measure_index(index, viewport).height;
            if top.saturating_sub(dy) <= 0 {
                return dy;
            }
        }
        return top;
    }
    if dy > 0 && !reaches_end {
        let mut bottom = last.bottom();
        for index in last.index + 1..item_count {
            bottom += provider.measure_index(index, viewport).height;
            if bottom.saturating_sub(dy) >= height {
                return dy;
            }
        }
        return bottom - height;
    }
    dy
}

/// Recomputes the anchor after the window was shifted by a scroll.
///
/// The first item whose bottom is still below the viewport top becomes the new
/// anchor. If its top has moved below the viewport top, preceding items are
/// measured and stacked above it until the gap is closed; running out of items
/// resets the anchor to the top of the list. If no laid-out item crosses the
/// viewport top, `previous` is kept.
pub fn anchor_after_offset<P: ItemProvider>(
    provider: &mut P,
    window: &VisibleWindow<P::Handle>,
    previous: ScrollAnchor,
    viewport: PixelSize,
) -> ScrollAnchor {
    let mut anchor = window
        .iter()
        .find(|item| item.bottom() > 0)
        .map_or(previous, |item| ScrollAnchor::new(item.index, item.top));

    while anchor.first_child_top > 0 {
        if anchor.fill_start == 0 {
            return ScrollAnchor::ZERO;
        }
        anchor.fill_start -= 1;
        anchor.first_child_top -= provider.measure_index(anchor.fill_start, viewport).height;
    }
    anchor
}

/// Repairs an anchor set directly by a jump, so filling from it leaves no gap.
///
/// With `center`, the target item is first brought to the vertical center by
/// stacking the items before it above. Then the tail of the list is measured
/// from the last item upward to find the anchor that puts the last item's
/// bottom on the viewport bottom. Of the two, the one that starts earlier wins:
/// the centered candidate has no gap at the top and the bottom-aligned one has
/// no gap at the bottom, and starting earlier satisfies both. A list shorter
/// than the viewport is anchored at the top.
pub fn reconcile_jump<P: ItemProvider>(
    provider: &mut P,
    jump: ScrollAnchor,
    viewport: PixelSize,
    center: bool,
) -> ScrollAnchor {
    let height = viewport.height;
    let mut anchor = jump;

    if center {
        let target = provider.measure_index(jump.fill_start, viewport).height;
        let mut top_gap = height / 2 - target / 2;
        if top_gap <= 0 {
            anchor = ScrollAnchor::new(jump.fill_start, top_gap);
        } else {
            for index in (0..jump.fill_start).rev() {
                top_gap -= provider.measure_index(index, viewport).height;
                if top_gap <= 0 {
                    anchor = ScrollAnchor::new(index, top_gap);
                    break;
                }
            }
            if top_gap > 0 {
                anchor = ScrollAnchor::ZERO;
            }
        }
    }

    anchor = keep_bottom_filled(provider, anchor, viewport);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target_index = jump.fill_start,
        center,
        fill_start = anchor.fill_start,
        first_child_top = anchor.first_child_top,
        "reconciled jump"
    );
    anchor
}

/// Brings an anchor that does not describe a gap-free window back into range.
///
/// This covers anchors that went stale outside of scrolling, for example after
/// the list shrank or when persisted state no longer matches the items. The
/// anchor skips forward past items that end above the viewport top, then backs
/// up over items needed to close a gap above it, and finally starts no later
/// than the anchor that puts the last item on the viewport bottom.
pub fn repair_anchor<P: ItemProvider>(
    provider: &mut P,
    anchor: ScrollAnchor,
    viewport: PixelSize,
) -> ScrollAnchor {
    let item_count = provider.item_count();
    if item_count == 0 {
        return ScrollAnchor::ZERO;
    }
    let mut anchor = ScrollAnchor::new(
        anchor.fill_start.min(item_count - 1),
        anchor.first_child_top,
    );

    while anchor.fill_start + 1 < item_count {
        let height = provider.measure_index(anchor.fill_start, viewport).height;
        let bottom = anchor.first_child_top.saturating_add(height);
        if bottom > 0 {
            break;
        }
        anchor = ScrollAnchor::new(anchor.fill_start + 1, bottom);
    }
    while anchor.first_child_top > 0 {
        if anchor.fill_start == 0 {
            return ScrollAnchor::ZERO;
        }
        anchor.fill_start -= 1;
        anchor.first_child_top = anchor
            .first_child_top
            .saturating_sub(provider.measure_index(anchor.fill_start, viewport).height);
    }
    keep_bottom_filled(provider, anchor, viewport)
}

/// Returns `anchor`, or the bottom-aligned anchor if that one starts earlier.
/// Lists shorter than the viewport are anchored at the top.
fn keep_bottom_filled<P: ItemProvider>(
    provider: &mut P,
    anchor: ScrollAnchor,
    viewport: PixelSize,
) -> ScrollAnchor {
    let mut bottom_gap = viewport.height;
    for index in (0..provider.item_count()).rev() {
        bottom_gap -= provider.measure_index(index, viewport).height;
        if bottom_gap <= 0 {
            let bottom_aligned = ScrollAnchor::new(index, bottom_gap);
            return if bottom_aligned.starts_before(&anchor) {
                bottom_aligned
            } else {
                anchor
            };
        }
    }
    ScrollAnchor::ZERO
}
