// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An arc list driven by a scroll wheel laid over it.
//!
//! This example shows how to combine:
//! - `understory_arc_list` for laying rows out along a circle,
//! - `understory_scroll_wheel` for turning drags along a ring into scrolls,
//! - a frame-stepped animator for flings and stabilization.
//!
//! Set `RUST_LOG=debug` to see the layout and gesture decisions.
//!
//! Run:
//! - `cargo run -p understory_demos --example arc_list_wheel`

use kurbo::{Point, Vec2};
use tracing_subscriber::EnvFilter;
use understory_demos::{Agenda, Host};

const SIZE: i32 = 320;

fn print_window(title: &str, host: &Host) {
    println!("== {title} (anchor {:?})", host.layout.anchor());
    for item in host.layout.window().iter() {
        println!(
            "  #{:<2} {:<10} left {:>4} top {:>4} scale {:.2}",
            item.index, item.handle.label, item.left, item.top, item.scale
        );
    }
}

/// A point on the ring, `angle` radians clockwise from the positive x axis.
fn on_ring(angle: f64) -> Point {
    let center = Point::new(f64::from(SIZE) / 2.0, f64::from(SIZE) / 2.0);
    center + Vec2::from_angle(angle) * 140.0
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut host = Host::new(SIZE, Agenda::new(40, 48)).expect("a circle with a positive radius");
    print_window("initial", &host);

    // Drag slowly along the ring from the bottom toward the left.
    let mut angle = std::f64::consts::FRAC_PI_2;
    let mut time = 0;
    host.wheel.on_pointer_down(on_ring(angle), time);
    for _ in 0..12 {
        angle += 0.05;
        time += 16;
        host.wheel.on_pointer_move(on_ring(angle), time);
        host.pump_wheel();
    }
    // Hold still before lifting so the release does not fling.
    time += 80;
    host.wheel.on_pointer_up(on_ring(angle), time);
    host.pump_wheel();
    let frames = host.settle(600);
    print_window(&format!("after drag, settled in {frames} frames"), &host);

    // Flick the other way and let the fling run out.
    angle = std::f64::consts::PI;
    time += 1000;
    host.wheel.on_pointer_down(on_ring(angle), time);
    for _ in 0..6 {
        angle -= 0.12;
        time += 8;
        host.wheel.on_pointer_move(on_ring(angle), time);
        host.pump_wheel();
    }
    host.wheel.on_pointer_up(on_ring(angle), time + 4);
    host.pump_wheel();
    let frames = host.settle(600);
    print_window(&format!("after fling, settled in {frames} frames"), &host);

    // Jump far down the list with an animation.
    host.layout
        .smooth_scroll_to(30, &host.items, &mut host.animator)
        .expect("index 30 exists");
    let frames = host.settle(600);
    print_window(&format!("after smooth scroll, {frames} frames"), &host);

    // Tap and long-press the centered row, inside the ring.
    let center = Point::new(f64::from(SIZE) * 0.75, f64::from(SIZE) / 2.0);
    time += 1000;
    host.wheel.on_pointer_down(center, time);
    host.wheel.on_pointer_up(center, time + 60);
    for activation in host.pump_wheel() {
        println!("tap: {activation:?}");
    }
    time += 1000;
    host.wheel.on_pointer_down(center, time);
    host.wheel.poll(time + 500);
    host.wheel.on_pointer_up(center, time + 600);
    for activation in host.pump_wheel() {
        println!("long press: {activation:?}");
    }

    // Append a row and jump straight to it.
    host.items.push("Wrap-up");
    host.layout
        .jump_to(40, &mut host.items)
        .expect("the appended row exists");
    print_window("after appending a row", &host);
}
