// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small controller that owns the scroll anchor and the visible window.

use core::mem;

use kurbo::Point;

use crate::{
    ArcLayoutConfig, ItemProvider, LayoutFlags, PixelSize, ScrollAlign, ScrollAnchor, ScrollError,
    SmoothScrollRequest, SmoothScroller, VisibleWindow, anchor_after_offset, clamp_scroll, fill,
    reconcile_jump, repair_anchor, stabilize_target,
};

/// Scroll state reported by the host's scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// Nothing is moving.
    Idle,
    /// The user is dragging the content.
    Dragging,
    /// An animation or fling is moving the content.
    Settling,
}

/// Controller for a list laid out along an arc.
///
/// This type:
/// - stores the [`ScrollAnchor`], the viewport size and the [`ArcLayoutConfig`],
/// - keeps the [`VisibleWindow`] of the most recent layout pass, including the
///   host handles so they can be reused on the next pass,
/// - clamps and applies scroll deltas, jumps and stabilization.
///
/// It does *not* own item views or run animations. Every operation that touches
/// items takes the host's [`ItemProvider`], and animations are delegated to a
/// [`SmoothScroller`].
#[derive(Debug)]
pub struct ArcLayout<H> {
    config: ArcLayoutConfig,
    anchor: ScrollAnchor,
    viewport: PixelSize,
    jump_pending: bool,
    window: VisibleWindow<H>,
}

impl<H> ArcLayout<H> {
    /// Creates a layout scrolled to the top, with an empty viewport.
    #[must_use]
    pub fn new(config: ArcLayoutConfig) -> Self {
        Self {
            config,
            anchor: ScrollAnchor::ZERO,
            viewport: PixelSize::ZERO,
            jump_pending: false,
            window: VisibleWindow::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ArcLayoutConfig {
        &self.config
    }

    /// Sets the scaling factor. Takes effect on the next layout pass.
    pub fn set_scaling_factor(&mut self, scaling_factor: f32) {
        self.config.scaling_factor = scaling_factor;
    }

    /// Returns the layout flags.
    #[must_use]
    pub const fn flags(&self) -> LayoutFlags {
        self.config.flags
    }

    /// Sets the layout flags. Takes effect on the next layout pass.
    pub fn set_flags(&mut self, flags: LayoutFlags) {
        self.config.flags = flags;
    }

    /// Returns the viewport size.
    #[must_use]
    pub const fn viewport(&self) -> PixelSize {
        self.viewport
    }

    /// Sets the viewport size. Takes effect on the next layout pass.
    pub fn set_viewport(&mut self, viewport: PixelSize) {
        self.viewport = viewport;
    }

    /// Returns the current scroll anchor.
    #[must_use]
    pub const fn anchor(&self) -> ScrollAnchor {
        self.anchor
    }

    /// Returns the items laid out by the most recent pass.
    #[must_use]
    pub const fn window(&self) -> &VisibleWindow<H> {
        &self.window
    }

    /// Lays out the visible window from the current anchor.
    ///
    /// A pending jump is reconciled first. If items were removed so that the
    /// anchor points past the end of the list, the layout jumps to the last item.
    /// A window that still shows a gap, because the list shrank or a restored
    /// anchor no longer fits the items, is repaired and filled again.
    pub fn layout<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        let item_count = provider.item_count();
        if item_count > 0 && self.anchor.fill_start >= item_count {
            self.anchor = ScrollAnchor::new(item_count - 1, 0);
            self.jump_pending = true;
        }
        if self.jump_pending && item_count > 0 {
            let center = self
                .config
                .flags
                .contains(LayoutFlags::CENTER_ON_PROGRAMMATIC_SCROLL);
            self.anchor = reconcile_jump(provider, self.anchor, self.viewport, center);
        }
        self.jump_pending = false;
        self.refill(provider);

        if self.has_gap(item_count) {
            let repaired = repair_anchor(provider, self.anchor, self.viewport);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = ?self.anchor,
                to = ?repaired,
                "repaired anchor"
            );
            self.anchor = repaired;
            self.refill(provider);
        }
    }

    /// Hook for the end of a host layout pass. Stabilizes when
    /// [`LayoutFlags::AUTO_STABILIZE`] is set.
    ///
    /// Returns `true` if an animation was started.
    pub fn on_layout_completed<P, S>(&self, provider: &mut P, scroller: &mut S) -> bool
    where
        P: ItemProvider<Handle = H>,
        S: SmoothScroller,
    {
        self.config.flags.contains(LayoutFlags::AUTO_STABILIZE) && self.stabilize(provider, scroller)
    }

    /// Hook for scroll state changes. Stabilizes when scrolling becomes
    /// [`ScrollState::Idle`] and [`LayoutFlags::AUTO_STABILIZE`] is set.
    ///
    /// Returns `true` if an animation was started.
    pub fn on_scroll_state_changed<P, S>(
        &self,
        state: ScrollState,
        provider: &mut P,
        scroller: &mut S,
    ) -> bool
    where
        P: ItemProvider<Handle = H>,
        S: SmoothScroller,
    {
        state == ScrollState::Idle && self.on_layout_completed(provider, scroller)
    }

    /// Scrolls the content by `delta` pixels; positive values reveal later items.
    ///
    /// The delta is clamped at both ends of the list and applied in steps no
    /// larger than the viewport, each followed by a fill pass. Returns the
    /// distance actually scrolled.
    pub fn scroll_by<P>(&mut self, delta: i32, provider: &mut P) -> i32
    where
        P: ItemProvider<Handle = H>,
    {
        let step_limit = self.viewport.height;
        if delta == 0 || step_limit <= 0 || self.window.is_empty() {
            return 0;
        }

        let mut remaining = delta;
        let mut applied = 0;
        while remaining != 0 {
            let step = remaining.clamp(-step_limit, step_limit);
            let clamped = clamp_scroll(provider, step, &self.window, self.viewport);
            self.window.offset_vertical(-clamped);
            self.anchor = anchor_after_offset(provider, &self.window, self.anchor, self.viewport);
            self.refill(provider);

            applied += clamped;
            remaining -= step;
            if clamped != step {
                break;
            }
        }
        applied
    }

    /// Jumps to `index` without animation and lays out immediately.
    ///
    /// With [`LayoutFlags::CENTER_ON_PROGRAMMATIC_SCROLL`] the item is centered
    /// where the list allows it; otherwise it is placed at the top. Near the end
    /// of the list the last item is kept at the bottom edge instead.
    pub fn jump_to<P>(&mut self, index: usize, provider: &mut P) -> Result<(), ScrollError>
    where
        P: ItemProvider<Handle = H>,
    {
        check_index(index, provider.item_count())?;
        self.anchor = ScrollAnchor::new(index, 0);
        self.jump_pending = true;
        self.layout(provider);
        Ok(())
    }

    /// Starts a fast animated scroll toward `index`.
    ///
    /// Centering follows [`LayoutFlags::CENTER_ON_PROGRAMMATIC_SCROLL`]. Any
    /// animation already running is replaced.
    pub fn smooth_scroll_to<P, S>(
        &self,
        index: usize,
        provider: &P,
        scroller: &mut S,
    ) -> Result<(), ScrollError>
    where
        P: ItemProvider<Handle = H>,
        S: SmoothScroller,
    {
        check_index(index, provider.item_count())?;
        let center = self
            .config
            .flags
            .contains(LayoutFlags::CENTER_ON_PROGRAMMATIC_SCROLL);
        scroller.start_smooth_scroll(SmoothScrollRequest::jump(index, center));
        Ok(())
    }

    /// Starts a slow animation that brings the item nearest the center to the
    /// center, if the list allows it.
    ///
    /// Does nothing while nothing is laid out or an animation is running.
    /// Returns `true` if an animation was started.
    pub fn stabilize<P, S>(&self, provider: &mut P, scroller: &mut S) -> bool
    where
        P: ItemProvider<Handle = H>,
        S: SmoothScroller,
    {
        if self.window.is_empty() || scroller.is_animating() {
            return false;
        }
        match stabilize_target(provider, &self.window, self.viewport) {
            Some(request) => {
                scroller.start_smooth_scroll(request);
                true
            }
            None => false,
        }
    }

    /// Signed distance in items from the anchor item to `target`.
    ///
    /// Animators use its sign as the direction of travel.
    #[must_use]
    pub fn scroll_vector_for(&self, target: usize) -> i32 {
        let start = self.anchor.fill_start;
        let distance = i32::try_from(target.abs_diff(start)).unwrap_or(i32::MAX);
        if target < start { -distance } else { distance }
    }

    /// Edge alignment for a non-centered smooth scroll toward `target`.
    #[must_use]
    pub fn snap_preference_for(&self, target: usize) -> ScrollAlign {
        ScrollAlign::for_direction(self.scroll_vector_for(target))
    }

    /// Index of the first laid-out item, in items.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.window.first().map_or(0, |item| item.index)
    }

    /// Number of laid-out items.
    #[must_use]
    pub fn scroll_extent(&self) -> usize {
        self.window.len()
    }

    /// Number of items in the list.
    #[must_use]
    pub fn scroll_range<P>(&self, provider: &P) -> usize
    where
        P: ItemProvider<Handle = H>,
    {
        provider.item_count()
    }

    /// Releases every handle and scrolls back to the top.
    ///
    /// Call when the provider's items were replaced wholesale.
    pub fn on_items_replaced<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        for item in self.window.drain() {
            provider.release_view(item.handle);
        }
        self.anchor = ScrollAnchor::ZERO;
        self.jump_pending = false;
    }

    /// State to persist across re-creation.
    #[must_use]
    pub const fn save_state(&self) -> ScrollAnchor {
        self.anchor
    }

    /// Restores persisted state. Takes effect on the next layout pass, which
    /// also repairs anchors that no longer fit the items.
    pub fn restore_state(&mut self, anchor: ScrollAnchor) {
        self.anchor = anchor;
        self.jump_pending = false;
    }

    /// Index of the laid-out item whose content contains `point`.
    #[must_use]
    pub fn index_at(&self, point: Point) -> Option<usize> {
        self.window.index_at(point)
    }

    /// Whether the window leaves blank space that more content could fill.
    fn has_gap(&self, item_count: usize) -> bool {
        let (Some(first), Some(last)) = (self.window.first(), self.window.last()) else {
            return false;
        };
        let height = self.viewport.height;
        if height <= 0 {
            return false;
        }
        let pinned_to_top = first.index == 0 && first.top == 0;
        first.top > 0
            || last.bottom() <= 0
            || (!pinned_to_top && last.index + 1 == item_count && last.bottom() < height)
    }

    fn refill<P>(&mut self, provider: &mut P)
    where
        P: ItemProvider<Handle = H>,
    {
        let previous = mem::take(&mut self.window);
        self.window = fill(provider, &self.config, self.anchor, self.viewport, previous);
    }
}

fn check_index(index: usize, len: usize) -> Result<(), ScrollError> {
    if index < len {
        Ok(())
    } else {
        #[cfg(feature = "tracing")]
        tracing::warn!(index, len, "scroll target out of range");
        Err(ScrollError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Point;
    use proptest::prelude::*;

    use super::{ArcLayout, ScrollState};
    use crate::test_host::{RecordingScroller, TestHandle, TestItems};
    use crate::{
        ArcLayoutConfig, Ellipse, LayoutFlags, PixelSize, ScrollAlign, ScrollAnchor, ScrollError,
        SmoothScrollRequest,
    };

    const VIEWPORT: PixelSize = PixelSize::new(200, 300);

    fn layout() -> ArcLayout<TestHandle> {
        let mut layout = ArcLayout::new(ArcLayoutConfig::new(Ellipse::circle(150.0, 0.0).unwrap()));
        layout.set_viewport(VIEWPORT);
        layout
    }

    fn placements(layout: &ArcLayout<TestHandle>) -> Vec<(usize, i32, i32)> {
        layout
            .window()
            .iter()
            .map(|item| (item.index, item.top, item.left))
            .collect()
    }

    #[test]
    fn jump_to_last_item_keeps_bottom_filled() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        layout.jump_to(9, &mut items).unwrap();

        let anchor = layout.anchor();
        assert!(anchor.fill_start <= 9);
        assert_eq!(anchor, ScrollAnchor::new(4, 0));
        let last = layout.window().last().unwrap();
        assert_eq!((last.index, last.bottom()), (9, 300));
    }

    #[test]
    fn scrolling_past_the_top_is_a_no_op() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        assert_eq!(layout.scroll_by(-1000, &mut items), 0);
        assert_eq!(layout.anchor(), ScrollAnchor::ZERO);
    }

    #[test]
    fn scrolling_moves_the_anchor() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);

        assert_eq!(layout.scroll_by(120, &mut items), 120);
        assert_eq!(layout.anchor(), ScrollAnchor::new(2, -20));
        assert_eq!(layout.window().first().map(|i| i.top), Some(-20));

        // Only 80px remain below the viewport.
        assert_eq!(layout.scroll_by(1000, &mut items), 80);
        assert_eq!(layout.anchor(), ScrollAnchor::new(4, 0));

        assert_eq!(layout.scroll_by(-75, &mut items), -75);
        assert_eq!(layout.anchor(), ScrollAnchor::new(2, -25));
        assert_eq!(layout.scroll_by(-1000, &mut items), -125);
        assert_eq!(layout.anchor(), ScrollAnchor::ZERO);
    }

    #[test]
    fn large_deltas_are_applied_in_steps() {
        let mut items = TestItems::uniform(100, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        assert_eq!(layout.scroll_by(1234, &mut items), 1234);
        assert_eq!(layout.anchor(), ScrollAnchor::new(24, -34));
        assert_eq!(items.live(), layout.scroll_extent());
    }

    #[test]
    fn out_of_range_targets_are_rejected() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        layout.scroll_by(60, &mut items);
        let before = layout.anchor();

        assert_eq!(
            layout.jump_to(10, &mut items),
            Err(ScrollError::IndexOutOfRange { index: 10, len: 10 })
        );
        let mut scroller = RecordingScroller::default();
        assert!(layout.smooth_scroll_to(12, &items, &mut scroller).is_err());
        assert_eq!(layout.anchor(), before);
        assert!(scroller.requests.is_empty());
    }

    #[test]
    fn smooth_scroll_is_fast_and_follows_centering() {
        let items = TestItems::uniform(10, 50);
        let mut layout = layout();
        let mut scroller = RecordingScroller::default();
        layout.smooth_scroll_to(5, &items, &mut scroller).unwrap();

        layout.set_flags(LayoutFlags::AUTO_STABILIZE);
        scroller.animating = true;
        layout.smooth_scroll_to(6, &items, &mut scroller).unwrap();
        assert_eq!(
            scroller.requests,
            [
                SmoothScrollRequest::jump(5, true),
                SmoothScrollRequest::jump(6, false)
            ]
        );
    }

    #[test]
    fn stabilizes_after_layout_and_when_idle() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        let mut scroller = RecordingScroller::default();

        assert!(layout.on_layout_completed(&mut items, &mut scroller));
        assert_eq!(scroller.requests, [SmoothScrollRequest::stabilize(3)]);

        assert!(!layout.on_scroll_state_changed(ScrollState::Dragging, &mut items, &mut scroller));
        scroller.animating = true;
        assert!(!layout.on_scroll_state_changed(ScrollState::Idle, &mut items, &mut scroller));
        scroller.animating = false;
        assert!(layout.on_scroll_state_changed(ScrollState::Idle, &mut items, &mut scroller));
        assert_eq!(scroller.requests.len(), 2);

        layout.set_flags(LayoutFlags::empty());
        assert!(!layout.on_layout_completed(&mut items, &mut scroller));
        // Explicit requests ignore the flag.
        assert!(layout.stabilize(&mut items, &mut scroller));
    }

    #[test]
    fn centered_layout_is_stable() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        layout.scroll_by(25, &mut items);
        let mut scroller = RecordingScroller::default();
        assert!(!layout.stabilize(&mut items, &mut scroller));
        assert!(scroller.requests.is_empty());
    }

    #[test]
    fn empty_layout_does_not_stabilize() {
        let mut items = TestItems::uniform(0, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        let mut scroller = RecordingScroller::default();
        assert!(!layout.stabilize(&mut items, &mut scroller));
        assert_eq!(layout.scroll_by(100, &mut items), 0);
    }

    #[test]
    fn scroll_direction_and_metrics() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        layout.scroll_by(110, &mut items);

        assert_eq!(layout.scroll_vector_for(7), 5);
        assert_eq!(layout.scroll_vector_for(0), -2);
        assert_eq!(layout.snap_preference_for(7), ScrollAlign::End);
        assert_eq!(layout.snap_preference_for(0), ScrollAlign::Start);
        assert_eq!(layout.snap_preference_for(2), ScrollAlign::Nearest);

        // Items 2..=8 are laid out: tops -10 through 290.
        assert_eq!(layout.scroll_offset(), 2);
        assert_eq!(layout.scroll_extent(), 7);
        assert_eq!(layout.scroll_range(&items), 10);
    }

    #[test]
    fn removed_items_pull_the_anchor_back() {
        let mut items = TestItems::uniform(20, 50);
        let mut layout = layout();
        layout.restore_state(ScrollAnchor::new(15, -10));
        layout.layout(&mut items);
        items.set_count(8);
        layout.layout(&mut items);
        // Treated as a jump to item 7: bottom aligned.
        assert_eq!(layout.anchor(), ScrollAnchor::new(2, 0));
        assert_eq!(layout.window().last().map(|i| i.bottom()), Some(300));
    }

    #[test]
    fn shrinking_the_list_keeps_the_bottom_filled() {
        let mut items = TestItems::uniform(20, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        layout.jump_to(12, &mut items).unwrap();
        assert_eq!(layout.anchor(), ScrollAnchor::new(9, -25));

        items.set_count(12);
        layout.layout(&mut items);
        assert_eq!(layout.anchor(), ScrollAnchor::new(6, 0));
        let last = layout.window().last().unwrap();
        assert_eq!((last.index, last.bottom()), (11, 300));
        assert_eq!(items.live(), layout.window().len());
    }

    #[test]
    fn malformed_restored_anchors_are_repaired() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.restore_state(ScrollAnchor::new(0, -10_000));
        layout.layout(&mut items);
        assert_eq!(layout.anchor(), ScrollAnchor::new(4, 0));
        let last = layout.window().last().unwrap();
        assert_eq!((last.index, last.bottom()), (9, 300));

        layout.restore_state(ScrollAnchor::new(3, 10_000));
        layout.layout(&mut items);
        assert_eq!(layout.anchor(), ScrollAnchor::ZERO);
        assert_eq!(layout.window().first().map(|i| i.top), Some(0));
        assert_eq!(items.live(), layout.window().len());
    }

    #[test]
    fn replacing_items_releases_handles_and_resets() {
        let mut items = TestItems::uniform(20, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        layout.scroll_by(400, &mut items);
        assert!(items.live() > 0);

        layout.on_items_replaced(&mut items);
        assert_eq!(items.live(), 0);
        assert_eq!(layout.anchor(), ScrollAnchor::ZERO);
        assert!(layout.window().is_empty());
    }

    #[test]
    fn hit_testing_resolves_item_indices() {
        let mut items = TestItems::uniform(10, 50);
        let mut layout = layout();
        layout.layout(&mut items);
        let item = layout.window().item(3).unwrap();
        let inside = Point::new(f64::from(item.left) + 1.0, f64::from(item.top) + 10.0);
        assert_eq!(layout.index_at(inside), Some(3));
        assert_eq!(layout.index_at(Point::new(-500.0, 10.0)), None);
    }

    fn assert_no_gap(
        layout: &ArcLayout<TestHandle>,
        heights: &[i32],
    ) -> Result<(), TestCaseError> {
        let height = VIEWPORT.height;
        let total: i32 = heights.iter().sum();
        let first = layout.window().first().unwrap();
        let last = layout.window().last().unwrap();
        if total <= height {
            prop_assert_eq!((first.index, first.top), (0, 0));
            prop_assert_eq!(last.index, heights.len() - 1);
        } else {
            prop_assert!(first.top <= 0, "gap above item {}", first.index);
            prop_assert!(first.bottom() > 0, "first item {} not visible", first.index);
            prop_assert!(last.bottom() >= height, "gap below item {}", last.index);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn scrolling_and_jumping_never_leave_gaps(
            heights in prop::collection::vec(1..400_i32, 1..40),
            ops in prop::collection::vec((any::<bool>(), -2000..2000_i32, any::<prop::sample::Index>()), 1..30),
            center in any::<bool>(),
        ) {
            let mut items = TestItems::with_heights(&heights);
            let mut layout = layout();
            let mut flags = LayoutFlags::default();
            flags.set(LayoutFlags::CENTER_ON_PROGRAMMATIC_SCROLL, center);
            layout.set_flags(flags);
            layout.layout(&mut items);
            assert_no_gap(&layout, &heights)?;

            for (jump, delta, target) in ops {
                if jump {
                    layout.jump_to(target.index(heights.len()), &mut items).unwrap();
                } else {
                    layout.scroll_by(delta, &mut items);
                }
                assert_no_gap(&layout, &heights)?;
                prop_assert_eq!(items.live(), layout.scroll_extent());
            }
        }

        #[test]
        fn clamping_at_a_boundary_closes_it_exactly(
            heights in prop::collection::vec(1..200_i32, 1..30),
            overshoot in 1..5000_i32,
        ) {
            let mut items = TestItems::with_heights(&heights);
            let mut layout = layout();
            layout.layout(&mut items);

            // Already at the top: scrolling up never moves.
            prop_assert_eq!(layout.scroll_by(-overshoot, &mut items), 0);
            prop_assert_eq!(layout.anchor(), ScrollAnchor::ZERO);

            // Run to the bottom, then keep pushing: the second push is a no-op.
            layout.jump_to(heights.len() - 1, &mut items).unwrap();
            let at_bottom = placements(&layout);
            prop_assert_eq!(layout.scroll_by(overshoot, &mut items), 0);
            prop_assert_eq!(placements(&layout), at_bottom);
        }

        #[test]
        fn saved_state_restores_the_same_window(
            heights in prop::collection::vec(1..200_i32, 1..40),
            delta in 0..4000_i32,
            scaling_factor in 0.0_f32..1.0,
        ) {
            let mut items = TestItems::with_heights(&heights);
            let mut layout = layout();
            layout.set_scaling_factor(scaling_factor);
            layout.layout(&mut items);
            layout.scroll_by(delta, &mut items);
            let saved = layout.save_state();
            let before: Vec<_> = layout.window().iter().map(|i| (i.index, i.top, i.left, i.scale)).collect();

            let mut restored = ArcLayout::new(*layout.config());
            restored.set_viewport(VIEWPORT);
            restored.restore_state(saved);
            restored.layout(&mut items);
            let after: Vec<_> = restored.window().iter().map(|i| (i.index, i.top, i.left, i.scale)).collect();
            prop_assert_eq!(before, after);
        }
    }
}
