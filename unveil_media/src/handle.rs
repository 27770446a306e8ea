// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Why a media operation could not be performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaError {
    /// The media element is no longer part of the document.
    Detached,
    /// The element refused to seek (for example, the offset is not seekable yet).
    SeekRejected,
    /// The element refused the playback rate.
    RateRejected,
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => f.write_str("media element is detached"),
            Self::SeekRejected => f.write_str("media element rejected the seek"),
            Self::RateRejected => f.write_str("media element rejected the playback rate"),
        }
    }
}

impl core::error::Error for MediaError {}

/// A host media element.
pub trait MediaHandle {
    /// Returns `false` once the element has been removed from its document.
    fn is_attached(&self) -> bool;

    /// Current playback rate (1.0 is normal speed).
    fn playback_rate(&self) -> f64;

    /// Sets the playback rate.
    fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError>;

    /// Current playback position, in seconds.
    fn current_time(&self) -> f64;

    /// Seeks to `seconds`.
    fn seek(&mut self, seconds: f64) -> Result<(), MediaError>;
}

impl<H: MediaHandle + ?Sized> MediaHandle for &mut H {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn playback_rate(&self) -> f64 {
        (**self).playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError> {
        (**self).set_playback_rate(rate)
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        (**self).seek(seconds)
    }
}
