// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::engine::AnimatorId;

bitflags::bitflags! {
    /// Observation primitives the host can provide.
    ///
    /// A missing capability never fails engine construction: the engine
    /// degrades instead. Without [`RESIZE`](Self::RESIZE) the viewport is
    /// always regular; without [`INTERSECTION`](Self::INTERSECTION) every
    /// element is revealed when it is observed; without [`MEDIA`](Self::MEDIA)
    /// media events are ignored.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// Viewport width is reported on resize.
        const RESIZE       = 0b0000_0001;
        /// Element visibility fractions are reported.
        const INTERSECTION = 0b0000_0010;
        /// Media elements report load and ready events.
        const MEDIA        = 0b0000_0100;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Why a registration was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetupError {
    /// Strict construction was requested but these capabilities are missing.
    Unsupported(Capabilities),
    /// The animator id was not issued by this engine.
    UnknownAnimator(AnimatorId),
    /// The element is already observed or presented by another registration.
    AlreadyObserved,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(missing) => {
                write!(f, "host lacks required capabilities: {missing:?}")
            }
            Self::UnknownAnimator(id) => write!(f, "unknown animator {}", id.index()),
            Self::AlreadyObserved => f.write_str("element is already observed"),
        }
    }
}

impl core::error::Error for SetupError {}
