// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fill pass: lays out the visible window from a scroll anchor.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use hashbrown::HashMap;

use crate::{
    ArcLayoutConfig, ItemMetrics, ItemProvider, LayoutFlags, PixelSize, PlacedItem, ScrollAnchor,
    VisibleWindow,
};

/// Lays out items starting at `anchor` until the viewport is covered or the
/// items run out.
///
/// Each item is measured, placed at the running vertical cursor with its left
/// edge on the ellipse, and given a scale from its distance to the vertical
/// center. Handles in `previous` are reused for indices that stay in the window;
/// the rest are released to the provider.
pub fn fill<P: ItemProvider>(
    provider: &mut P,
    config: &ArcLayoutConfig,
    anchor: ScrollAnchor,
    viewport: PixelSize,
    mut previous: VisibleWindow<P::Handle>,
) -> VisibleWindow<P::Handle> {
    let item_count = provider.item_count();
    let mut scrap: HashMap<usize, P::Handle> = previous
        .drain()
        .map(|item| (item.index, item.handle))
        .collect();

    let mut window = VisibleWindow::new();
    if item_count > 0 {
        let mut cursor = anchor.first_child_top;
        for index in anchor.fill_start..item_count {
            let handle = scrap
                .remove(&index)
                .unwrap_or_else(|| provider.view_for_index(index));
            let content = provider.measure(&handle, viewport);
            let metrics = ItemMetrics::decorate(content, provider.insets(index));

            let left = left_offset(config, index, item_count, &metrics, cursor, viewport.height);
            let top = cursor;
            let content_mid = (top + metrics.insets.top + top + metrics.height
                - metrics.insets.bottom)
                / 2;
            let scale = scale_for(
                content_mid,
                viewport.height,
                metrics.content_height(),
                config.effective_scaling_factor(),
            );

            window.push(PlacedItem {
                index,
                handle,
                left,
                top,
                metrics,
                scale,
            });

            cursor += metrics.height;
            if cursor > viewport.height {
                break;
            }
        }
    }

    for (_, handle) in scrap.drain() {
        provider.release_view(handle);
    }
    window
}

/// Left edge of an item whose top sits at `top`.
///
/// The ellipse is evaluated at the item's vertical midpoint. With
/// [`LayoutFlags::IGNORE_HEADER_FOOTER_MARGINS`], the first item's top
/// decoration and the last item's bottom decoration are left out of that
/// midpoint.
pub(crate) fn left_offset(
    config: &ArcLayoutConfig,
    index: usize,
    item_count: usize,
    metrics: &ItemMetrics,
    top: i32,
    viewport_height: i32,
) -> i32 {
    let height = metrics.height;
    let mid = if config
        .flags
        .contains(LayoutFlags::IGNORE_HEADER_FOOTER_MARGINS)
    {
        if index == 0 {
            let inset = metrics.insets.top;
            top + inset + (height - inset) / 2
        } else if index + 1 == item_count {
            top + (height - metrics.insets.bottom) / 2
        } else {
            top + height / 2
        }
    } else {
        top + height / 2
    };
    config.ellipse.x_from_y(mid, viewport_height)
}

/// Scale of an item whose content midpoint is at `mid_y`.
///
/// `1 - scaling_factor * |H/2 - mid_y| / (H - content_height)`: full size at the
/// vertical center, shrinking toward the edges. Items at least as tall as the
/// viewport are not scaled.
#[must_use]
pub fn scale_for(mid_y: i32, viewport_height: i32, content_height: i32, scaling_factor: f32) -> f32 {
    let room = viewport_height - content_height;
    if scaling_factor == 0.0 || room <= 0 {
        return 1.0;
    }
    let distance = (viewport_height as f32 / 2.0 - mid_y as f32).abs();
    1.0 - scaling_factor * (distance / room as f32)
}
