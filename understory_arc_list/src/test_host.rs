// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by the unit tests.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::{Insets, ItemProvider, PixelSize, SmoothScrollRequest, SmoothScroller};

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TestHandle {
    pub(crate) index: usize,
    pub(crate) serial: usize,
}

/// Items with fixed content heights that count every handle they hand out.
#[derive(Debug, Clone)]
pub(crate) struct TestItems {
    heights: Vec<i32>,
    insets: BTreeMap<usize, Insets>,
    created: usize,
    released: usize,
}

impl TestItems {
    pub(crate) fn uniform(count: usize, height: i32) -> Self {
        Self::with_heights(&vec![height; count])
    }

    pub(crate) fn with_heights(heights: &[i32]) -> Self {
        Self {
            heights: heights.to_vec(),
            insets: BTreeMap::new(),
            created: 0,
            released: 0,
        }
    }

    pub(crate) fn with_insets(mut self, index: usize, insets: Insets) -> Self {
        self.insets.insert(index, insets);
        self
    }

    pub(crate) fn set_count(&mut self, count: usize) {
        let height = self.heights.last().copied().unwrap_or(50);
        self.heights.resize(count, height);
    }

    pub(crate) fn created(&self) -> usize {
        self.created
    }

    pub(crate) fn released(&self) -> usize {
        self.released
    }

    pub(crate) fn live(&self) -> usize {
        self.created - self.released
    }
}

impl ItemProvider for TestItems {
    type Handle = TestHandle;

    fn item_count(&self) -> usize {
        self.heights.len()
    }

    fn view_for_index(&mut self, index: usize) -> TestHandle {
        let serial = self.created;
        self.created += 1;
        TestHandle { index, serial }
    }

    fn release_view(&mut self, _handle: TestHandle) {
        self.released += 1;
    }

    fn measure(&mut self, handle: &TestHandle, constraints: PixelSize) -> PixelSize {
        PixelSize::new(constraints.width / 2, self.heights[handle.index])
    }

    fn insets(&self, index: usize) -> Insets {
        self.insets.get(&index).copied().unwrap_or(Insets::ZERO)
    }
}

/// Animator that records requests instead of running them.
#[derive(Debug, Default)]
pub(crate) struct RecordingScroller {
    pub(crate) animating: bool,
    pub(crate) requests: Vec<SmoothScrollRequest>,
}

impl SmoothScroller for RecordingScroller {
    fn is_animating(&self) -> bool {
        self.animating
    }

    fn start_smooth_scroll(&mut self, request: SmoothScrollRequest) {
        self.requests.push(request);
    }
}
