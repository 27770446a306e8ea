// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for reveal transitions.
//!
//! [`RevealEngine::flush_with_trace`](crate::RevealEngine::flush_with_trace)
//! reports every presentation that switched phase, together with the reason.
//! [`RevealRecorder`] keeps the first reason per element, which is usually
//! what one wants when asking "why is this element visible already?".

use core::hash::Hash;

use hashbrown::HashMap;

/// Why an element switched to its `animate` state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealCause<K> {
    /// The observed element `source` crossed its threshold.
    ///
    /// For grouped members, `source` is the container.
    Intersected {
        /// The observed element.
        source: K,
        /// Visible fraction reported for `source`.
        fraction: f64,
    },
    /// The element was revealed at registration: either the host cannot
    /// measure intersections, or a one-shot source had already been revealed.
    Registered,
}

/// A callback sink for reveal transitions.
pub trait RevealTrace<K> {
    /// Called when `target` switches to its `animate` state.
    fn revealed(&mut self, target: &K, cause: RevealCause<K>);

    /// Called when a repeating `target` returns to its `initial` state.
    fn hidden(&mut self, target: &K);
}

impl<K> RevealTrace<K> for () {
    fn revealed(&mut self, _target: &K, _cause: RevealCause<K>) {}

    fn hidden(&mut self, _target: &K) {}
}

/// Records the first reveal cause per target.
#[derive(Clone, Debug)]
pub struct RevealRecorder<K> {
    causes: HashMap<K, RevealCause<K>>,
    hidden: usize,
}

impl<K> Default for RevealRecorder<K> {
    fn default() -> Self {
        Self {
            causes: HashMap::new(),
            hidden: 0,
        }
    }
}

impl<K> RevealRecorder<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first recorded cause for `target`.
    #[must_use]
    pub fn cause(&self, target: &K) -> Option<&RevealCause<K>> {
        self.causes.get(target)
    }

    /// Number of targets with a recorded cause.
    #[must_use]
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    /// Number of hide transitions seen.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }

    /// Clears all recorded causes.
    pub fn clear(&mut self) {
        self.causes.clear();
        self.hidden = 0;
    }
}

impl<K> RevealTrace<K> for RevealRecorder<K>
where
    K: Clone + Eq + Hash,
{
    fn revealed(&mut self, target: &K, cause: RevealCause<K>) {
        self.causes.entry(target.clone()).or_insert(cause);
    }

    fn hidden(&mut self, _target: &K) {
        self.hidden += 1;
    }
}
