// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// The two named presentation states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevealPhase {
    /// Displaced and hidden, before the element has been revealed.
    #[default]
    Initial,
    /// In place and visible.
    Animate,
}

/// Visual properties at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Translation from the element's laid-out position.
    pub offset: Vec2,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Frame {
    /// Undisplaced, opaque, unscaled.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        opacity: 1.0,
        scale: 1.0,
    };

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            offset: self.offset.lerp(other.offset, t),
            opacity: self.opacity + (other.opacity - self.opacity) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Target presentation of an element plus the timing of the transition into it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentationState {
    /// Which named state this is.
    pub phase: RevealPhase,
    /// Translation from the element's laid-out position.
    pub offset: Vec2,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Seconds to wait before transitioning into this state.
    pub delay: f64,
    /// Seconds the transition takes once started.
    pub duration: f64,
}

impl PresentationState {
    /// Returns the visual properties of this state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            offset: self.offset,
            opacity: self.opacity,
            scale: self.scale,
        }
    }

    /// Returns `true` for the `animate` state.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.phase == RevealPhase::Animate
    }
}
