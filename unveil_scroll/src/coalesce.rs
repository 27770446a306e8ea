// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A scroll event waiting to be processed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingScroll {
    /// Vertical scroll offset.
    pub offset_y: f64,
    /// Reference element height measured with the event, if available.
    pub reference_height: Option<f64>,
}

/// Collapses the scroll events of one frame into the latest one.
///
/// Scroll-derived state only depends on the latest offset, so keeping the last
/// event produces the same settled state as processing all of them. A height
/// measured earlier in the frame is kept when the latest event could not
/// measure one.
#[derive(Clone, Debug, Default)]
pub struct ScrollCoalescer {
    pending: Option<PendingScroll>,
    coalesced: usize,
}

impl ScrollCoalescer {
    /// Creates an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scroll event.
    pub fn push(&mut self, offset_y: f64, reference_height: Option<f64>) {
        let reference_height = match (&self.pending, reference_height) {
            (_, Some(height)) => Some(height),
            (Some(previous), None) => previous.reference_height,
            (None, None) => None,
        };
        if self.pending.is_some() {
            self.coalesced += 1;
        }
        self.pending = Some(PendingScroll {
            offset_y,
            reference_height,
        });
    }

    /// Returns `true` if an event is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of events superseded since the last [`take`](Self::take).
    #[must_use]
    pub fn coalesced(&self) -> usize {
        self.coalesced
    }

    /// Takes the settled event for this frame.
    pub fn take(&mut self) -> Option<PendingScroll> {
        self.coalesced = 0;
        self.pending.take()
    }
}
