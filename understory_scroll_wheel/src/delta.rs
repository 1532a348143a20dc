// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns linear pointer motion on the wheel into rotation.

use kurbo::{Point, Vec2};

/// Signed rotational amount of a motion `delta` observed at `position`.
///
/// The sign combination depends on the quadrant of `position` around `center`,
/// so motion tangent to the wheel yields a consistent sign for each direction of
/// rotation without any trigonometry. For scroll distances (previous minus
/// current position) the result is positive for anticlockwise rotation.
///
/// ```
/// use kurbo::{Point, Vec2};
/// use understory_scroll_wheel::rotational_delta;
///
/// let center = Point::new(100.0, 100.0);
/// // Upper-right quadrant: dx + dy.
/// assert_eq!(rotational_delta(center, Point::new(150.0, 50.0), Vec2::new(3.0, 4.0)), 7.0);
/// ```
#[must_use]
pub fn rotational_delta(center: Point, position: Point, delta: Vec2) -> f64 {
    let (x, y) = (position.x, position.y);
    let (cx, cy) = (center.x, center.y);
    if x <= cx && y < cy {
        delta.x - delta.y
    } else if x > cx && y <= cy {
        delta.x + delta.y
    } else if x >= cx && y > cy {
        -delta.x + delta.y
    } else if x < cx && y >= cy {
        -delta.x - delta.y
    } else {
        // Only the exact center (or NaN) falls through.
        0.0
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::rotational_delta;

    const CENTER: Point = Point::new(100.0, 100.0);

    #[test]
    fn quadrant_sign_combinations() {
        let d = Vec2::new(3.0, 5.0);
        // Upper-left.
        assert_eq!(rotational_delta(CENTER, Point::new(50.0, 50.0), d), -2.0);
        // Upper-right.
        assert_eq!(rotational_delta(CENTER, Point::new(150.0, 50.0), d), 8.0);
        // Lower-right.
        assert_eq!(rotational_delta(CENTER, Point::new(150.0, 150.0), d), 2.0);
        // Lower-left.
        assert_eq!(rotational_delta(CENTER, Point::new(50.0, 150.0), d), -8.0);
        assert_eq!(rotational_delta(CENTER, CENTER, d), 0.0);
    }

    #[test]
    fn axes_belong_to_one_quadrant_each() {
        let d = Vec2::new(1.0, 2.0);
        // Straight up: upper-left.
        assert_eq!(rotational_delta(CENTER, Point::new(100.0, 40.0), d), -1.0);
        // Straight right: upper-right.
        assert_eq!(rotational_delta(CENTER, Point::new(160.0, 100.0), d), 3.0);
        // Straight down: lower-right.
        assert_eq!(rotational_delta(CENTER, Point::new(100.0, 160.0), d), 1.0);
        // Straight left: lower-left.
        assert_eq!(rotational_delta(CENTER, Point::new(40.0, 100.0), d), -3.0);
    }

    #[test]
    fn tangential_motion_has_one_sign_per_direction() {
        // Anticlockwise on screen (y down): the scroll distance at each compass
        // point, previous minus current position.
        let top = rotational_delta(CENTER, Point::new(100.0, 40.0), Vec2::new(1.0, 0.0));
        let left = rotational_delta(CENTER, Point::new(40.0, 100.0), Vec2::new(0.0, -1.0));
        let bottom = rotational_delta(CENTER, Point::new(100.0, 160.0), Vec2::new(-1.0, 0.0));
        let right = rotational_delta(CENTER, Point::new(160.0, 100.0), Vec2::new(0.0, 1.0));
        for delta in [top, left, bottom, right] {
            assert_eq!(delta, 1.0);
        }
    }
}
