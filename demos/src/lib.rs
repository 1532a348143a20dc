// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side pieces shared by the demos.
//!
//! A real UI toolkit owns views, frames and timers. The demos stand in for it
//! with an in-memory [`Agenda`] of rows, a frame-stepped [`Animator`], and a
//! [`Host`] that routes [`WheelEvent`]s into an [`ArcLayout`].

use understory_arc_list::{
    ArcLayout, ArcLayoutConfig, Ellipse, ItemProvider, LayoutFlags, PixelSize, ScrollState,
    SmoothScrollRequest, SmoothScroller,
};
use understory_scroll_wheel::{ScrollWheel, WheelConfig, WheelEvent};

/// Frame interval of the simulated display, in milliseconds.
pub const FRAME_MS: f32 = 16.0;

/// Fraction of fling velocity kept from one frame to the next.
const FLING_FRICTION: f64 = 0.9;

/// Flings slower than this, in pixels per second, stop.
const FLING_STOP_VELOCITY: f64 = 50.0;

/// One row view handed out by an [`Agenda`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Item index the view was created for.
    pub index: usize,
    /// Text shown in the row.
    pub label: String,
}

/// Rows of equal height, like a simple agenda.
#[derive(Debug, Clone)]
pub struct Agenda {
    labels: Vec<String>,
    row_height: i32,
    live_views: usize,
}

impl Agenda {
    /// Creates `count` rows labelled `Event 1`, `Event 2`, and so on.
    #[must_use]
    pub fn new(count: usize, row_height: i32) -> Self {
        Self {
            labels: (1..=count).map(|n| format!("Event {n}")).collect(),
            row_height,
            live_views: 0,
        }
    }

    /// Appends a row.
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Label of the row at `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Views handed out and not yet released.
    #[must_use]
    pub const fn live_views(&self) -> usize {
        self.live_views
    }
}

impl ItemProvider for Agenda {
    type Handle = Row;

    fn item_count(&self) -> usize {
        self.labels.len()
    }

    fn view_for_index(&mut self, index: usize) -> Row {
        self.live_views += 1;
        Row {
            index,
            label: self.labels.get(index).cloned().unwrap_or_default(),
        }
    }

    fn release_view(&mut self, _row: Row) {
        self.live_views = self.live_views.saturating_sub(1);
    }

    fn measure(&mut self, _row: &Row, constraints: PixelSize) -> PixelSize {
        PixelSize::new(constraints.width * 2 / 3, self.row_height)
    }
}

/// Frame-stepped animator for smooth scrolls and flings.
#[derive(Debug, Clone)]
pub struct Animator {
    density_dpi: f32,
    scroll: Option<SmoothScrollRequest>,
    fling_velocity: f64,
}

impl Animator {
    /// Creates an idle animator for a screen of the given density.
    #[must_use]
    pub fn new(density_dpi: f32) -> Self {
        Self {
            density_dpi,
            scroll: None,
            fling_velocity: 0.0,
        }
    }

    /// Starts a fling at `velocity` pixels per second, replacing any animation.
    pub fn fling(&mut self, velocity: f64) {
        self.scroll = None;
        self.fling_velocity = velocity;
    }

    /// Stops any animation.
    pub fn stop(&mut self) {
        self.scroll = None;
        self.fling_velocity = 0.0;
    }

    /// Advances the running animation by one frame.
    ///
    /// Returns `true` if the layout moved.
    pub fn step<P: ItemProvider>(
        &mut self,
        layout: &mut ArcLayout<P::Handle>,
        provider: &mut P,
    ) -> bool {
        if let Some(request) = self.scroll {
            let moved = self.step_scroll(request, layout, provider);
            if !moved {
                self.scroll = None;
            }
            return moved;
        }
        if self.fling_velocity.abs() < FLING_STOP_VELOCITY {
            self.fling_velocity = 0.0;
            return false;
        }

        let delta = truncate(self.fling_velocity * f64::from(FRAME_MS) / 1000.0);
        let applied = layout.scroll_by(delta, provider);
        self.fling_velocity = if applied == delta {
            self.fling_velocity * FLING_FRICTION
        } else {
            // Hit an end of the list.
            0.0
        };
        applied != 0
    }

    fn step_scroll<P: ItemProvider>(
        &self,
        request: SmoothScrollRequest,
        layout: &mut ArcLayout<P::Handle>,
        provider: &mut P,
    ) -> bool {
        if layout.window().is_empty() {
            return false;
        }
        let max_step = truncate(f64::from(
            FRAME_MS / request.speed.millis_per_pixel(self.density_dpi),
        ))
        .max(1);
        let direction = layout.scroll_vector_for(request.target_index);
        let remaining = match layout.window().item(request.target_index) {
            Some(item) => -request.align(direction).dt_to_fit(
                item.top,
                item.bottom(),
                0,
                layout.viewport().height,
            ),
            // Not laid out yet: keep travelling toward it.
            None => direction.signum() * max_step,
        };
        if remaining == 0 {
            return false;
        }
        layout.scroll_by(remaining.clamp(-max_step, max_step), provider) != 0
    }
}

impl SmoothScroller for Animator {
    fn is_animating(&self) -> bool {
        self.scroll.is_some() || self.fling_velocity != 0.0
    }

    fn start_smooth_scroll(&mut self, request: SmoothScrollRequest) {
        tracing::debug!(
            target_index = request.target_index,
            speed = ?request.speed,
            center = request.center,
            "smooth scroll"
        );
        self.fling_velocity = 0.0;
        self.scroll = Some(request);
    }
}

/// A click on the wheel that landed on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Tap on the item at this index.
    Click(usize),
    /// Long press on the item at this index.
    LongClick(usize),
}

/// An arc list with a scroll wheel laid over it.
#[derive(Debug)]
pub struct Host {
    /// The list layout.
    pub layout: ArcLayout<Row>,
    /// The list items.
    pub items: Agenda,
    /// The wheel, sharing the list's coordinate space.
    pub wheel: ScrollWheel,
    /// Runs smooth scrolls and flings.
    pub animator: Animator,
}

impl Host {
    /// Creates a square list of `size` pixels with `agenda` laid out along a
    /// circle touching its left edge, and a wheel covering the whole list.
    pub fn new(size: i32, agenda: Agenda) -> Result<Self, understory_arc_list::ShapeError> {
        let radius = size as f32 / 2.0;
        let config = ArcLayoutConfig::new(Ellipse::circle(radius, 0.0)?)
            .with_scaling_factor(0.5)
            .with_flags(LayoutFlags::all());
        let mut layout = ArcLayout::new(config);
        layout.set_viewport(PixelSize::new(size, size));

        let mut wheel = ScrollWheel::new(WheelConfig::default());
        wheel.set_size(kurbo::Size::new(f64::from(size), f64::from(size)));

        let mut host = Self {
            layout,
            items: agenda,
            wheel,
            animator: Animator::new(160.0),
        };
        host.layout.layout(&mut host.items);
        Ok(host)
    }

    /// Applies the wheel's queued events to the list.
    ///
    /// Scrolls are applied immediately and flings start the animator. Clicks
    /// are resolved to item indices and returned.
    pub fn pump_wheel(&mut self) -> Vec<Activation> {
        let mut activations = Vec::new();
        let events: Vec<WheelEvent> = self.wheel.drain_events().collect();
        for event in events {
            match event {
                WheelEvent::Scroll(delta) => {
                    self.animator.stop();
                    self.layout.scroll_by(truncate(delta), &mut self.items);
                }
                WheelEvent::Fling(velocity) => self.animator.fling(velocity),
                WheelEvent::Click(point) => {
                    activations.extend(self.layout.index_at(point).map(Activation::Click));
                }
                WheelEvent::LongClick(point) => {
                    activations.extend(self.layout.index_at(point).map(Activation::LongClick));
                }
                WheelEvent::Released => {}
            }
        }
        activations
    }

    /// Runs animations frame by frame until the list comes to rest, including
    /// the stabilization that follows. Returns the number of frames run.
    pub fn settle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames {
            if self.animator.step(&mut self.layout, &mut self.items) {
                frames += 1;
                continue;
            }
            self.animator.stop();
            if !self.layout.on_scroll_state_changed(
                ScrollState::Idle,
                &mut self.items,
                &mut self.animator,
            ) {
                break;
            }
        }
        frames
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Scroll amounts are applied in whole pixels, truncated toward zero"
)]
fn truncate(value: f64) -> i32 {
    value as i32
}
