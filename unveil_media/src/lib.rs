// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unveil_media --heading-base-level=0

//! Unveil Media: post-load normalization for autoplaying media.
//!
//! Looped background videos often begin on a black or blank first frame. Once
//! a video reports that frame data is available, this crate puts it into a
//! consistent state: a configured playback rate and a configured start offset.
//!
//! - [`MediaHandle`]: the host's media element (playback rate, current time,
//!   attachment state).
//! - [`normalize_on_ready`]: one normalization pass against a handle.
//! - [`MediaNormalizer`]: remembers which loads have already been normalized,
//!   so duplicate ready notifications for the same load never seek twice.
//!
//! A detached handle or a rejected seek is reported as
//! [`NormalizeOutcome::Skipped`], never as a panic; the next load simply tries
//! again.
//!
//! ## Minimal example
//!
//! ```rust
//! use unveil_media::{MediaError, MediaHandle, MediaNormalizer, NormalizeOptions, NormalizeOutcome};
//!
//! #[derive(Default)]
//! struct Video { rate: f64, time: f64, seeks: u32 }
//!
//! impl MediaHandle for Video {
//!     fn is_attached(&self) -> bool { true }
//!     fn playback_rate(&self) -> f64 { self.rate }
//!     fn set_playback_rate(&mut self, rate: f64) -> Result<(), MediaError> {
//!         self.rate = rate;
//!         Ok(())
//!     }
//!     fn current_time(&self) -> f64 { self.time }
//!     fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
//!         self.time = seconds;
//!         self.seeks += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut normalizer = MediaNormalizer::new(NormalizeOptions::default());
//! let mut video = Video::default();
//!
//! assert_eq!(normalizer.on_ready("hero", &mut video), NormalizeOutcome::Applied);
//! assert_eq!(normalizer.on_ready("hero", &mut video), NormalizeOutcome::AlreadyNormalized);
//! assert_eq!((video.rate, video.time, video.seeks), (1.0, 1.0, 1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod handle;
mod normalize;

pub use handle::{MediaError, MediaHandle};
pub use normalize::{
    MediaNormalizer, NormalizeOptions, NormalizeOutcome, SEEK_TOLERANCE, normalize_on_ready,
};
