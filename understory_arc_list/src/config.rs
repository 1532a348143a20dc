// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration.

use crate::Ellipse;

bitflags::bitflags! {
    /// Optional behaviors of an [`ArcLayout`](crate::ArcLayout).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayoutFlags: u8 {
        /// Project the first item without its top decoration and the last item
        /// without its bottom decoration, so their content (not the decoration)
        /// follows the ellipse.
        const IGNORE_HEADER_FOOTER_MARGINS = 0b0000_0001;
        /// Programmatic jumps and smooth scrolls bring the target item to the
        /// vertical center instead of the top.
        const CENTER_ON_PROGRAMMATIC_SCROLL = 0b0000_0010;
        /// Stabilize automatically after layout completes and whenever scrolling
        /// becomes idle.
        const AUTO_STABILIZE = 0b0000_0100;
    }
}

impl Default for LayoutFlags {
    fn default() -> Self {
        Self::CENTER_ON_PROGRAMMATIC_SCROLL | Self::AUTO_STABILIZE
    }
}

/// Configuration of an [`ArcLayout`](crate::ArcLayout).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcLayoutConfig {
    /// The shape items are arranged along.
    pub ellipse: Ellipse,
    /// How much items shrink as they move away from the vertical center.
    ///
    /// `0.0` disables scaling. Negative values are treated as `0.0`.
    pub scaling_factor: f32,
    /// Optional behaviors.
    pub flags: LayoutFlags,
}

impl ArcLayoutConfig {
    /// Creates a configuration with no scaling and the default flags.
    #[must_use]
    pub fn new(ellipse: Ellipse) -> Self {
        Self {
            ellipse,
            scaling_factor: 0.0,
            flags: LayoutFlags::default(),
        }
    }

    /// Sets the scaling factor.
    #[must_use]
    pub fn with_scaling_factor(mut self, scaling_factor: f32) -> Self {
        self.scaling_factor = scaling_factor;
        self
    }

    /// Sets the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: LayoutFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The scaling factor actually applied: negative and NaN values become `0.0`.
    #[must_use]
    pub fn effective_scaling_factor(&self) -> f32 {
        if self.scaling_factor > 0.0 {
            self.scaling_factor
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ArcLayoutConfig, LayoutFlags};
    use crate::Ellipse;

    #[test]
    fn defaults_center_and_stabilize() {
        let config = ArcLayoutConfig::new(Ellipse::circle(100.0, 0.0).unwrap());
        assert!(config.flags.contains(LayoutFlags::CENTER_ON_PROGRAMMATIC_SCROLL));
        assert!(config.flags.contains(LayoutFlags::AUTO_STABILIZE));
        assert!(!config.flags.contains(LayoutFlags::IGNORE_HEADER_FOOTER_MARGINS));
        assert_eq!(config.scaling_factor, 0.0);
    }

    #[test]
    fn negative_scaling_is_ignored() {
        let config =
            ArcLayoutConfig::new(Ellipse::circle(100.0, 0.0).unwrap()).with_scaling_factor(-2.0);
        assert_eq!(config.effective_scaling_factor(), 0.0);
        let config = config.with_scaling_factor(f32::NAN);
        assert_eq!(config.effective_scaling_factor(), 0.0);
        let config = config.with_scaling_factor(0.5);
        assert_eq!(config.effective_scaling_factor(), 0.5);
    }
}
