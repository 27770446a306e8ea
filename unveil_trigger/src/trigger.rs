// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element reveal state driven by intersection reports.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::ratio::{DEFAULT_THRESHOLD, crosses_threshold, visible_fraction};

/// How an element is observed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerOptions {
    /// Visible fraction in `[0, 1]` at which the element counts as entered.
    pub threshold: f64,
    /// Stop observing after the first reveal.
    pub once: bool,
    /// Reveal as soon as the element is observed, without waiting for an
    /// intersection report.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_mount: bool,
}

impl TriggerOptions {
    /// One-shot observation with the given threshold.
    #[must_use]
    pub const fn once(threshold: f64) -> Self {
        Self {
            threshold,
            once: true,
            on_mount: false,
        }
    }

    /// Repeating observation with the given threshold.
    #[must_use]
    pub const fn repeating(threshold: f64) -> Self {
        Self {
            threshold,
            once: false,
            on_mount: false,
        }
    }

    /// Revealed on observation, never hidden again.
    #[must_use]
    pub const fn on_mount() -> Self {
        Self {
            threshold: 0.0,
            once: true,
            on_mount: true,
        }
    }

    /// Sets the threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the `once` flag.
    #[must_use]
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self::once(DEFAULT_THRESHOLD)
    }
}

/// Whether an element is currently revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealState {
    /// `true` once the element has entered the viewport (and, in repeating
    /// mode, while it stays there).
    pub has_entered_viewport: bool,
}

impl RevealState {
    /// Not (yet) revealed.
    pub const HIDDEN: Self = Self {
        has_entered_viewport: false,
    };

    /// Revealed.
    pub const REVEALED: Self = Self {
        has_entered_viewport: true,
    };
}

/// Transition reported by [`VisibilityTrigger::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent<K> {
    /// The element entered the viewport.
    Revealed(K),
    /// A repeating element left the viewport.
    Hidden(K),
}

impl<K> TriggerEvent<K> {
    /// Returns the element key.
    pub fn key(&self) -> &K {
        match self {
            Self::Revealed(key) | Self::Hidden(key) => key,
        }
    }

    /// Returns the state the element moved to.
    #[must_use]
    pub fn state(&self) -> RevealState {
        match self {
            Self::Revealed(_) => RevealState::REVEALED,
            Self::Hidden(_) => RevealState::HIDDEN,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    options: TriggerOptions,
    state: RevealState,
    observing: bool,
}

/// Tracks the [`RevealState`] of a set of observed elements.
///
/// An element's state exists from [`observe`](Self::observe) until
/// [`unobserve`](Self::unobserve). A one-shot element that has been revealed
/// keeps its state but is no longer observed: further updates are ignored.
#[derive(Clone, Debug)]
pub struct VisibilityTrigger<K> {
    entries: HashMap<K, Entry>,
    supported: bool,
}

impl<K> Default for VisibilityTrigger<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            supported: true,
        }
    }
}

impl<K> VisibilityTrigger<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty trigger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a trigger for hosts without intersection measurement.
    ///
    /// Every element is revealed as soon as it is observed.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            entries: HashMap::new(),
            supported: false,
        }
    }

    /// Returns `false` when built with [`Self::unsupported`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Starts observing `key` and returns its current state.
    ///
    /// Observing an already known key replaces its options but keeps its state,
    /// so a one-shot element that was revealed stays revealed. Options with
    /// [`on_mount`](TriggerOptions::on_mount) set reveal the element right away.
    pub fn observe(&mut self, key: K, options: TriggerOptions) -> RevealState {
        let supported = self.supported;
        let entry = self.entries.entry(key).or_insert(Entry {
            options,
            state: if supported {
                RevealState::HIDDEN
            } else {
                RevealState::REVEALED
            },
            observing: supported,
        });
        entry.options = options;
        if options.on_mount {
            entry.state = RevealState::REVEALED;
        }
        entry.observing =
            supported && !(options.once && entry.state == RevealState::REVEALED);
        entry.state
    }

    /// Stops observing `key` and forgets its state.
    ///
    /// Returns the state it had, or `None` if it was not observed.
    pub fn unobserve(&mut self, key: &K) -> Option<RevealState> {
        self.entries.remove(key).map(|entry| entry.state)
    }

    /// Reports the visible fraction of `key`.
    ///
    /// Returns an event when the element's state changed. Unknown keys and
    /// one-shot elements that were already revealed are ignored.
    pub fn update(&mut self, key: &K, fraction: f64) -> Option<TriggerEvent<K>> {
        let entry = self.entries.get_mut(key)?;
        if !entry.observing {
            return None;
        }
        let entered = crosses_threshold(fraction, entry.options.threshold);
        if entered == entry.state.has_entered_viewport {
            return None;
        }
        entry.state.has_entered_viewport = entered;
        if entered {
            if entry.options.once {
                entry.observing = false;
            }
            Some(TriggerEvent::Revealed(key.clone()))
        } else {
            Some(TriggerEvent::Hidden(key.clone()))
        }
    }

    /// Reports the bounds of `key` and of the viewport.
    ///
    /// Equivalent to [`update`](Self::update) with [`visible_fraction`].
    pub fn update_bounds(
        &mut self,
        key: &K,
        element: Rect,
        viewport: Rect,
    ) -> Option<TriggerEvent<K>> {
        self.update(key, visible_fraction(element, viewport))
    }

    /// Returns the state of `key`, if observed.
    #[must_use]
    pub fn state(&self, key: &K) -> Option<RevealState> {
        self.entries.get(key).map(|entry| entry.state)
    }

    /// Returns `true` if `key` is known and revealed.
    #[must_use]
    pub fn is_revealed(&self, key: &K) -> bool {
        self.state(key) == Some(RevealState::REVEALED)
    }

    /// Returns the options of `key`, if observed.
    #[must_use]
    pub fn options(&self, key: &K) -> Option<TriggerOptions> {
        self.entries.get(key).map(|entry| entry.options)
    }

    /// Returns `true` while intersection reports for `key` are still consumed.
    #[must_use]
    pub fn is_observing(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.observing)
    }

    /// Number of elements whose intersection reports are still consumed.
    #[must_use]
    pub fn observing_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.observing).count()
    }

    /// Number of known elements, observed or settled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no element is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over known keys and their states.
    pub fn iter(&self) -> impl Iterator<Item = (&K, RevealState)> + '_ {
        self.entries.iter().map(|(key, entry)| (key, entry.state))
    }
}
