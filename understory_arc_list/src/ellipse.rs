// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ellipse items are arranged along, and the projector that maps a
//! vertical position onto its boundary.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::ShapeError;

/// Raw shape attributes, as a host would read them from markup or settings.
///
/// Convert with [`Ellipse::try_from`]. The circle pair wins when both the
/// circle and the ellipse attributes are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeAttrs {
    /// Radius of a circle. Used together with `x_center`.
    pub radius: Option<f32>,
    /// Horizontal radius of an ellipse.
    pub x_radius: Option<f32>,
    /// Vertical radius of an ellipse.
    pub y_radius: Option<f32>,
    /// Horizontal position of the shape's center, relative to the viewport's left edge.
    pub x_center: Option<f32>,
}

/// An axis-aligned ellipse whose vertical center is pinned to the middle of the viewport.
///
/// A circle is the special case `x_radius == y_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ShapeAttrs", into = "ShapeAttrs")
)]
pub struct Ellipse {
    x_radius: f32,
    y_radius: f32,
    x_center: f32,
}

impl Ellipse {
    /// Creates an ellipse with the given radii and horizontal center.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidRadius`] for a negative or non-finite radius and
    /// [`ShapeError::InvalidCenter`] for a non-finite center.
    pub fn new(x_radius: f32, y_radius: f32, x_center: f32) -> Result<Self, ShapeError> {
        for radius in [x_radius, y_radius] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ShapeError::InvalidRadius(radius));
            }
        }
        if !x_center.is_finite() {
            return Err(ShapeError::InvalidCenter(x_center));
        }
        Ok(Self {
            x_radius,
            y_radius,
            x_center,
        })
    }

    /// Creates a circle with the given radius and horizontal center.
    ///
    /// # Errors
    ///
    /// Same as [`Ellipse::new`].
    pub fn circle(radius: f32, x_center: f32) -> Result<Self, ShapeError> {
        Self::new(radius, radius, x_center)
    }

    /// Horizontal radius.
    #[must_use]
    pub const fn x_radius(&self) -> f32 {
        self.x_radius
    }

    /// Vertical radius.
    #[must_use]
    pub const fn y_radius(&self) -> f32 {
        self.y_radius
    }

    /// Horizontal center.
    #[must_use]
    pub const fn x_center(&self) -> f32 {
        self.x_center
    }

    /// Returns `true` if both radii are equal.
    #[must_use]
    pub fn is_circle(&self) -> bool {
        self.x_radius == self.y_radius
    }

    /// Maps a vertical position `y` (pixels from the viewport top) to the
    /// horizontal position of the ellipse boundary at that height.
    ///
    /// Positions beyond the vertical extent of the ellipse are extrapolated
    /// (`x = x_center - sqrt(-amount)`) rather than clamped, so items far from
    /// the center keep moving continuously and monotonically to the left.
    ///
    /// A zero vertical radius or a non-positive viewport height has no
    /// meaningful projection; the center is returned unprojected.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pixel positions are truncated toward zero, matching integer layout"
    )]
    pub fn x_from_y(&self, y: i32, viewport_height: i32) -> i32 {
        if viewport_height <= 0 || self.y_radius == 0.0 {
            return self.x_center as i32;
        }
        let y_center = viewport_height as f32 / 2.0;
        let dy = y as f32 - y_center;
        let amount = f64::from(1.0 - dy * dy / (self.y_radius * self.y_radius))
            * f64::from(self.x_radius * self.x_radius);
        let x_center = f64::from(self.x_center);
        if amount >= 0.0 {
            (amount.sqrt() + x_center) as i32
        } else {
            (-(-amount).sqrt() + x_center) as i32
        }
    }
}

impl TryFrom<ShapeAttrs> for Ellipse {
    type Error = ShapeError;

    fn try_from(attrs: ShapeAttrs) -> Result<Self, Self::Error> {
        match attrs {
            ShapeAttrs {
                radius: Some(radius),
                x_center: Some(x_center),
                ..
            } => Self::circle(radius, x_center),
            ShapeAttrs {
                x_radius: Some(x_radius),
                y_radius: Some(y_radius),
                x_center: Some(x_center),
                ..
            } => Self::new(x_radius, y_radius, x_center),
            _ => Err(ShapeError::Incomplete),
        }
    }
}

impl From<Ellipse> for ShapeAttrs {
    fn from(ellipse: Ellipse) -> Self {
        Self {
            radius: None,
            x_radius: Some(ellipse.x_radius),
            y_radius: Some(ellipse.y_radius),
            x_center: Some(ellipse.x_center),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{Ellipse, ShapeAttrs};
    use crate::ShapeError;

    #[test]
    fn circle_projects_onto_boundary() {
        let circle = Ellipse::circle(100.0, 20.0).unwrap();
        // Vertical center of a 400px viewport is 200.
        assert_eq!(circle.x_from_y(200, 400), 120);
        // Top and bottom of the circle touch the center line.
        assert_eq!(circle.x_from_y(100, 400), 20);
        assert_eq!(circle.x_from_y(300, 400), 20);
        // 80px off center: sqrt(100^2 - 80^2) = 60.
        assert_eq!(circle.x_from_y(120, 400), 80);
    }

    #[test]
    fn positions_outside_the_ellipse_are_extrapolated() {
        let circle = Ellipse::circle(100.0, 20.0).unwrap();
        // dy = -200: amount = (1 - 4) * 100^2 = -30000, sqrt = 173.2.
        assert_eq!(circle.x_from_y(0, 400), -153);
        // Further out keeps moving left.
        assert!(circle.x_from_y(-100, 400) < circle.x_from_y(0, 400));
    }

    proptest! {
        #[test]
        fn projection_is_symmetric_about_center(
            x_radius in 1.0_f32..1000.0,
            y_radius in 1.0_f32..1000.0,
            x_center in -500.0_f32..500.0,
            half_height in 1..2000_i32,
            d in 0..5000_i32,
        ) {
            let ellipse = Ellipse::new(x_radius, y_radius, x_center).unwrap();
            let height = half_height * 2;
            prop_assert_eq!(
                ellipse.x_from_y(half_height - d, height),
                ellipse.x_from_y(half_height + d, height)
            );
        }
    }

    #[test]
    fn degenerate_geometry_returns_center() {
        let flat = Ellipse::new(50.0, 0.0, 12.5).unwrap();
        assert_eq!(flat.x_from_y(10, 300), 12);
        let circle = Ellipse::circle(50.0, 30.0).unwrap();
        assert_eq!(circle.x_from_y(10, 0), 30);
        assert_eq!(circle.x_from_y(10, -5), 30);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        assert_eq!(
            Ellipse::new(-1.0, 10.0, 0.0),
            Err(ShapeError::InvalidRadius(-1.0))
        );
        assert!(matches!(
            Ellipse::circle(f32::NAN, 0.0),
            Err(ShapeError::InvalidRadius(_))
        ));
        assert!(matches!(
            Ellipse::circle(10.0, f32::INFINITY),
            Err(ShapeError::InvalidCenter(_))
        ));
    }

    #[test]
    fn attrs_resolve_circle_before_ellipse() {
        let attrs = ShapeAttrs {
            radius: Some(50.0),
            x_radius: Some(10.0),
            y_radius: Some(20.0),
            x_center: Some(5.0),
        };
        let shape = Ellipse::try_from(attrs).unwrap();
        assert!(shape.is_circle());
        assert_eq!(shape.x_radius(), 50.0);

        let attrs = ShapeAttrs {
            radius: None,
            ..attrs
        };
        let shape = Ellipse::try_from(attrs).unwrap();
        assert_eq!((shape.x_radius(), shape.y_radius()), (10.0, 20.0));
    }

    #[test]
    fn incomplete_attrs_fail() {
        let only_radius = ShapeAttrs {
            radius: Some(50.0),
            ..ShapeAttrs::default()
        };
        assert_eq!(Ellipse::try_from(only_radius), Err(ShapeError::Incomplete));

        let missing_center = ShapeAttrs {
            x_radius: Some(10.0),
            y_radius: Some(20.0),
            ..ShapeAttrs::default()
        };
        assert_eq!(
            Ellipse::try_from(missing_center),
            Err(ShapeError::Incomplete)
        );
        assert_eq!(
            Ellipse::try_from(ShapeAttrs::default()),
            Err(ShapeError::Incomplete)
        );
    }
}
