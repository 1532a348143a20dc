// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for shape construction and scroll requests.

/// Failure to build an [`Ellipse`](crate::Ellipse).
///
/// A layout cannot exist without a shape, so these are reported at
/// construction time and never during layout.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// Neither the circle pair (`radius`, `x_center`) nor the ellipse triple
    /// (`x_radius`, `y_radius`, `x_center`) was supplied.
    #[error(
        "incomplete shape attributes: supply `radius` and `x_center` for a circle, \
         or `x_radius`, `y_radius` and `x_center` for an ellipse"
    )]
    Incomplete,
    /// A radius was negative, NaN, or infinite.
    #[error("radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),
    /// The horizontal center was NaN or infinite.
    #[error("x center must be finite, got {0}")]
    InvalidCenter(f32),
}

/// A scroll request the layout refused.
///
/// Rejected requests leave the layout state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    /// The requested index is outside `0..len`.
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The item count at the time of the request.
        len: usize,
    },
}
