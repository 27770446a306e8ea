// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unveil_viewport --heading-base-level=0

//! Unveil Viewport: breakpoint-based viewport classification.
//!
//! This crate answers one question for responsive layouts: should the current
//! viewport be treated as **compact** (phone-sized) or **regular**
//! (desktop-sized)? The answer is a pure function of the viewport width and a
//! configured breakpoint:
//!
//! ```text
//! is_compact = width < breakpoint
//! ```
//!
//! - [`ViewportClassifier`]: holds the breakpoint and the last observed width,
//!   classifies synchronously on construction, and publishes a new
//!   [`ViewportState`] from [`ViewportClassifier::on_resize`] only when the
//!   classification actually changed.
//! - [`ViewportState`] / [`ViewportClass`]: the published classification.
//! - [`Responsive`]: a pair of values, one per class, for layout decisions
//!   that differ between compact and regular viewports (offsets, widths,
//!   alignment).
//!
//! The crate does not listen to any window system. Hosts forward resize
//! notifications (for example from `winit` or a browser `resize` event) into
//! [`ViewportClassifier::on_resize`] and drop the classifier when the owning
//! scope ends.
//!
//! ## Minimal example
//!
//! ```rust
//! use unveil_viewport::{ViewportClassifier, DEFAULT_BREAKPOINT};
//!
//! // Classified immediately from the width known at mount time.
//! let mut viewport = ViewportClassifier::new(DEFAULT_BREAKPOINT, 1200.0);
//! assert!(!viewport.state().is_compact);
//!
//! // Shrinking below the breakpoint publishes a change.
//! let changed = viewport.on_resize(500.0);
//! assert_eq!(changed.map(|s| s.is_compact), Some(true));
//!
//! // Further resizes within the same class publish nothing.
//! assert_eq!(viewport.on_resize(420.0), None);
//! ```
//!
//! ## Unsupported environments
//!
//! When the host cannot deliver resize notifications at all, construct the
//! classifier with [`ViewportClassifier::unsupported`]. It reports a regular
//! viewport forever, which keeps content laid out for the larger class rather
//! than guessing.
//!
//! This crate is `no_std`.

#![no_std]

mod classifier;
mod responsive;

pub use classifier::{DEFAULT_BREAKPOINT, ViewportClass, ViewportClassifier, ViewportState};
pub use responsive::Responsive;
