// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;

use hashbrown::HashMap;

use crate::handle::{MediaError, MediaHandle};

/// Positions closer than this to the start offset are not re-seeked, in seconds.
pub const SEEK_TOLERANCE: f64 = 1e-3;

/// Target post-load state of a media element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizeOptions {
    /// Playback rate. `None` leaves the rate as loaded.
    pub rate: Option<f64>,
    /// Start offset, in seconds.
    pub start_offset: f64,
}

impl NormalizeOptions {
    /// Creates options setting both rate and offset.
    #[must_use]
    pub const fn new(rate: f64, start_offset: f64) -> Self {
        Self {
            rate: Some(rate),
            start_offset,
        }
    }

    /// Creates options that only seek to `start_offset`.
    #[must_use]
    pub const fn seek_only(start_offset: f64) -> Self {
        Self {
            rate: None,
            start_offset,
        }
    }
}

impl Default for NormalizeOptions {
    /// Normal speed, starting one second in.
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Result of a normalization attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizeOutcome {
    /// Rate and offset were applied.
    Applied,
    /// This load was already normalized; nothing was seeked. The playback
    /// rate, if configured, was restored.
    AlreadyNormalized,
    /// This load was already normalized, but restoring the playback rate
    /// failed. The previous rate is left in place.
    RateRestoreFailed(MediaError),
    /// The handle could not be normalized; nothing else was attempted.
    Skipped(MediaError),
}

/// Applies `options` to `handle`.
///
/// The playback rate is only written when one is configured and it differs,
/// and the seek is skipped
/// when the handle is already within [`SEEK_TOLERANCE`] of the start offset.
pub fn normalize_on_ready(
    handle: &mut impl MediaHandle,
    options: NormalizeOptions,
) -> NormalizeOutcome {
    if !handle.is_attached() {
        return NormalizeOutcome::Skipped(MediaError::Detached);
    }
    if let Err(err) = ensure_rate(handle, options.rate) {
        return NormalizeOutcome::Skipped(err);
    }
    if (handle.current_time() - options.start_offset).abs() > SEEK_TOLERANCE {
        if let Err(err) = handle.seek(options.start_offset) {
            return NormalizeOutcome::Skipped(err);
        }
    }
    NormalizeOutcome::Applied
}

fn ensure_rate(handle: &mut impl MediaHandle, rate: Option<f64>) -> Result<(), MediaError> {
    match rate {
        Some(rate) if handle.playback_rate() != rate => handle.set_playback_rate(rate),
        _ => Ok(()),
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct LoadState {
    generation: u64,
    normalized: Option<u64>,
}

/// Normalizes each media load at most once.
///
/// Every key's loads are counted: [`on_load_start`](Self::on_load_start) begins
/// a new load (for example after the source changed), and the first successful
/// [`on_ready`](Self::on_ready) of a load normalizes it. Later ready
/// notifications for the same load only restore the playback rate, so a
/// duplicate event never jumps a playing video back to the start offset.
#[derive(Clone, Debug)]
pub struct MediaNormalizer<K> {
    options: NormalizeOptions,
    loads: HashMap<K, LoadState>,
}

impl<K> MediaNormalizer<K>
where
    K: Eq + Hash,
{
    /// Creates a normalizer applying `options` to every load.
    #[must_use]
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            loads: HashMap::new(),
        }
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Replaces the options used for loads that are not normalized yet.
    pub fn set_options(&mut self, options: NormalizeOptions) {
        self.options = options;
    }

    /// Begins a new load for `key`.
    pub fn on_load_start(&mut self, key: K) {
        let state = self.loads.entry(key).or_default();
        state.generation = state.generation.wrapping_add(1);
    }

    /// Handles a "data ready" notification for `key`.
    pub fn on_ready(&mut self, key: K, handle: &mut impl MediaHandle) -> NormalizeOutcome {
        let state = self.loads.entry(key).or_default();
        if state.normalized == Some(state.generation) {
            if !handle.is_attached() {
                return NormalizeOutcome::AlreadyNormalized;
            }
            return match ensure_rate(handle, self.options.rate) {
                Ok(()) => NormalizeOutcome::AlreadyNormalized,
                Err(err) => NormalizeOutcome::RateRestoreFailed(err),
            };
        }
        let outcome = normalize_on_ready(handle, self.options);
        if outcome == NormalizeOutcome::Applied {
            state.normalized = Some(state.generation);
        }
        outcome
    }

    /// Returns `true` when the current load of `key` has been normalized.
    #[must_use]
    pub fn is_normalized(&self, key: &K) -> bool {
        self.loads
            .get(key)
            .is_some_and(|state| state.normalized == Some(state.generation))
    }

    /// Forgets `key`, for example when its element unmounts.
    pub fn forget(&mut self, key: &K) -> bool {
        self.loads.remove(key).is_some()
    }

    /// Number of tracked media elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Returns `true` when no media element is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}
