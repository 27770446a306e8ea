// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Default fraction of the reference height the offset must pass.
pub const DEFAULT_THRESHOLD_FRACTION: f64 = 0.7;

/// A `[start, end]` span of scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRange {
    /// Offset at which progress starts leaving `0.0`.
    pub start: f64,
    /// Offset at which progress reaches `1.0`.
    pub end: f64,
}

impl ScrollRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns `clamp((offset - start) / (end - start), 0, 1)`.
    ///
    /// An empty or inverted range behaves as a step at `end`. A NaN offset
    /// yields `0.0`.
    #[must_use]
    pub fn progress(&self, offset: f64) -> f64 {
        let span = self.end - self.start;
        if span.is_nan() || span <= 0.0 {
            return if offset >= self.end { 1.0 } else { 0.0 };
        }
        let t = (offset - self.start) / span;
        if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Returns `progress(offset) * magnitude`.
    #[must_use]
    pub fn translate(&self, offset: f64, magnitude: f64) -> f64 {
        self.progress(offset) * magnitude
    }
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self::new(0.0, 1500.0)
    }
}

/// Configuration for a [`ScrollTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollConfig {
    /// Fraction of the reference height the offset must strictly exceed.
    pub threshold_fraction: f64,
    /// Range used for [`ScrollState::progress`].
    pub range: ScrollRange,
}

impl ScrollConfig {
    /// Sets the threshold fraction.
    #[must_use]
    pub fn with_threshold_fraction(mut self, fraction: f64) -> Self {
        self.threshold_fraction = fraction;
        self
    }

    /// Sets the progress range.
    #[must_use]
    pub fn with_range(mut self, range: ScrollRange) -> Self {
        self.range = range;
        self
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            range: ScrollRange::default(),
        }
    }
}

/// Signals derived from the latest scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Latest vertical scroll offset.
    pub offset_y: f64,
    /// `offset_y > threshold_fraction * reference_height`.
    pub is_past_threshold: bool,
    /// Clamped position of `offset_y` in the configured range, in `[0, 1]`.
    pub progress: f64,
}

/// Result of feeding one scroll event into a [`ScrollTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollUpdate {
    /// State after the event.
    pub state: ScrollState,
    /// `true` when `is_past_threshold` flipped.
    pub threshold_changed: bool,
    /// `true` when `progress` changed.
    pub progress_changed: bool,
}

/// Tracks scroll offset and the signals derived from it.
///
/// The reference element's height is supplied with every event and never
/// cached, so layout changes between events are picked up immediately. When
/// the reference element is not available yet (`None`), the threshold flag
/// keeps its previous value and only the offset and progress are updated.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    config: ScrollConfig,
    state: ScrollState,
}

impl ScrollTracker {
    /// Creates a tracker at offset zero.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: ScrollState::default(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Returns the latest state.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Feeds a scroll event.
    pub fn on_scroll(&mut self, offset_y: f64, reference_height: Option<f64>) -> ScrollUpdate {
        let previous = self.state;
        let is_past_threshold = match reference_height {
            Some(height) => offset_y > self.config.threshold_fraction * height,
            None => previous.is_past_threshold,
        };
        self.state = ScrollState {
            offset_y,
            is_past_threshold,
            progress: self.config.range.progress(offset_y),
        };
        ScrollUpdate {
            state: self.state,
            threshold_changed: previous.is_past_threshold != is_past_threshold,
            progress_changed: previous.progress != self.state.progress,
        }
    }
}
