// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::classifier::ViewportState;

/// A value that differs between compact and regular viewports.
///
/// Typical uses are layout offsets that only apply on wide screens (a block
/// shifted up by 40% of its height on desktop, left in flow on mobile) or
/// labels that shorten on narrow screens.
///
/// ```rust
/// use unveil_viewport::{Responsive, ViewportState};
///
/// let shift = Responsive::new(0.0, -0.4);
/// assert_eq!(*shift.select(ViewportState::COMPACT), 0.0);
/// assert_eq!(*shift.select(ViewportState::REGULAR), -0.4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Responsive<T> {
    /// Value used when the viewport is compact.
    pub compact: T,
    /// Value used when the viewport is regular.
    pub regular: T,
}

impl<T> Responsive<T> {
    /// Creates a responsive pair.
    #[must_use]
    pub const fn new(compact: T, regular: T) -> Self {
        Self { compact, regular }
    }

    /// Returns the value for the given viewport state.
    #[must_use]
    pub fn select(&self, viewport: ViewportState) -> &T {
        if viewport.is_compact {
            &self.compact
        } else {
            &self.regular
        }
    }

    /// Maps both values.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Responsive<U> {
        Responsive {
            compact: f(self.compact),
            regular: f(self.regular),
        }
    }
}

impl<T: Clone> Responsive<T> {
    /// Uses the same value for both classes.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            compact: value.clone(),
            regular: value,
        }
    }
}

impl<T> Responsive<Option<T>> {
    /// A value that only applies to regular viewports.
    #[must_use]
    pub const fn regular_only(value: T) -> Self {
        Self {
            compact: None,
            regular: Some(value),
        }
    }

    /// A value that only applies to compact viewports.
    #[must_use]
    pub const fn compact_only(value: T) -> Self {
        Self {
            compact: Some(value),
            regular: None,
        }
    }
}
