// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Default breakpoint between compact and regular viewports, in logical pixels.
pub const DEFAULT_BREAKPOINT: f64 = 768.0;

/// The two responsive layout modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportClass {
    /// Narrower than the breakpoint (mobile layouts).
    Compact,
    /// At least as wide as the breakpoint (desktop layouts).
    #[default]
    Regular,
}

/// Published viewport classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// `true` when the viewport is narrower than the breakpoint.
    pub is_compact: bool,
}

impl ViewportState {
    /// A compact viewport.
    pub const COMPACT: Self = Self { is_compact: true };

    /// A regular viewport.
    pub const REGULAR: Self = Self { is_compact: false };

    /// Classifies `width` against `breakpoint`.
    ///
    /// Non-finite widths never compare below the breakpoint and therefore
    /// classify as regular.
    #[must_use]
    pub fn classify(width: f64, breakpoint: f64) -> Self {
        Self {
            is_compact: width < breakpoint,
        }
    }

    /// Returns the classification as a [`ViewportClass`].
    #[must_use]
    pub fn class(self) -> ViewportClass {
        if self.is_compact {
            ViewportClass::Compact
        } else {
            ViewportClass::Regular
        }
    }
}

impl From<ViewportClass> for ViewportState {
    fn from(class: ViewportClass) -> Self {
        Self {
            is_compact: class == ViewportClass::Compact,
        }
    }
}

/// Live viewport classifier.
///
/// The classifier is created with the width known at mount time so the very
/// first layout already uses the right class. Each resize notification
/// recomputes the class; [`on_resize`](Self::on_resize) returns the new state
/// only when it differs from the previously published one, so consumers can
/// skip redundant relayouts.
#[derive(Clone, Debug)]
pub struct ViewportClassifier {
    breakpoint: f64,
    width: Option<f64>,
    state: ViewportState,
    supported: bool,
}

impl ViewportClassifier {
    /// Creates a classifier and classifies `initial_width` synchronously.
    #[must_use]
    pub fn new(breakpoint: f64, initial_width: f64) -> Self {
        Self {
            breakpoint,
            width: Some(initial_width),
            state: ViewportState::classify(initial_width, breakpoint),
            supported: true,
        }
    }

    /// Creates a classifier for hosts that cannot report viewport width.
    ///
    /// The classifier reports [`ViewportState::REGULAR`] and ignores every
    /// resize notification.
    #[must_use]
    pub fn unsupported(breakpoint: f64) -> Self {
        Self {
            breakpoint,
            width: None,
            state: ViewportState::REGULAR,
            supported: false,
        }
    }

    /// Returns `false` when the classifier was built with [`Self::unsupported`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Returns the configured breakpoint.
    #[must_use]
    pub fn breakpoint(&self) -> f64 {
        self.breakpoint
    }

    /// Returns the last observed width, if any.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Returns the currently published classification.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Records a new viewport width.
    ///
    /// Returns the new state when the classification changed, `None` otherwise.
    pub fn on_resize(&mut self, width: f64) -> Option<ViewportState> {
        if !self.supported {
            return None;
        }
        self.width = Some(width);
        self.publish(ViewportState::classify(width, self.breakpoint))
    }

    /// Changes the breakpoint and reclassifies the last observed width.
    ///
    /// Returns the new state when the classification changed.
    pub fn set_breakpoint(&mut self, breakpoint: f64) -> Option<ViewportState> {
        self.breakpoint = breakpoint;
        match self.width {
            Some(width) if self.supported => {
                self.publish(ViewportState::classify(width, breakpoint))
            }
            _ => None,
        }
    }

    fn publish(&mut self, next: ViewportState) -> Option<ViewportState> {
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}
