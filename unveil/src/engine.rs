// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use hashbrown::{HashMap, HashSet};
use kurbo::{Rect, Vec2};
use log::{debug, trace, warn};
use smallvec::SmallVec;
use unveil_media::{MediaError, MediaHandle, MediaNormalizer, NormalizeOptions, NormalizeOutcome};
use unveil_motion::{PresentationState, RevealAnimator, RevealConfig, StaggerIndex};
use unveil_scroll::{
    ScrollBinding, ScrollBindings, ScrollCoalescer, ScrollConfig, ScrollRange, ScrollState,
    ScrollTracker, TransformSink,
};
use unveil_trigger::{RevealState, TriggerEvent, VisibilityTrigger, visible_fraction};
use unveil_viewport::{ViewportClassifier, ViewportState};

use crate::capabilities::{Capabilities, SetupError};
use crate::trace::{RevealCause, RevealTrace};

/// Identifies an animator registered with [`RevealEngine::register_animator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimatorId(usize);

impl AnimatorId {
    /// Registration order of the animator.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What an [`ObserverHandle`] observes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// Viewport width.
    Viewport,
    /// Scroll offset and header threshold.
    Scroll,
    /// Scroll-bound transforms.
    Binding,
    /// An element (or a container and its members) for reveal.
    Reveal,
    /// A media element.
    Media,
}

/// A registration that can be disposed with [`RevealEngine::dispose`].
///
/// Handles are never reused, so disposing a stale handle is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverHandle {
    id: u64,
    kind: ObserverKind,
}

impl ObserverHandle {
    /// What this handle observes.
    #[must_use]
    pub const fn kind(self) -> ObserverKind {
        self.kind
    }
}

/// Number of live registrations and tracked entries, for leak checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LiveObservers {
    /// Live handles of every kind.
    pub handles: usize,
    /// Installed viewport classifiers (0 or 1).
    pub viewport: usize,
    /// Installed scroll trackers (0 or 1).
    pub scroll: usize,
    /// Bound scroll targets.
    pub bindings: usize,
    /// Elements known to the visibility trigger.
    pub observed: usize,
    /// Elements receiving presentation updates.
    pub presented: usize,
    /// Media elements with load state.
    pub media: usize,
}

impl LiveObservers {
    /// Sum of every count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.handles
            + self.viewport
            + self.scroll
            + self.bindings
            + self.observed
            + self.presented
            + self.media
    }
}

/// Engine-wide settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// What the host can observe.
    pub capabilities: Capabilities,
    /// Post-load media state.
    pub media: NormalizeOptions,
}

impl EngineConfig {
    /// Sets the host capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the media normalization options.
    #[must_use]
    pub fn with_media(mut self, media: NormalizeOptions) -> Self {
        self.media = media;
        self
    }
}

/// A notification from the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent<K> {
    /// The viewport was resized.
    Resize {
        /// New viewport width, in logical pixels.
        width: f64,
    },
    /// The page scrolled.
    Scroll {
        /// Vertical scroll offset.
        offset_y: f64,
        /// Height of the header reference element, measured now.
        reference_height: Option<f64>,
    },
    /// The visible fraction of an observed element changed.
    Intersection {
        /// The element.
        key: K,
        /// Visible fraction in `[0, 1]`.
        fraction: f64,
    },
    /// The bounds of an observed element, for hosts that report geometry.
    Bounds {
        /// The element.
        key: K,
        /// Element bounds.
        element: Rect,
        /// Viewport bounds, in the same space.
        viewport: Rect,
    },
    /// A media element started loading a source.
    MediaLoadStart(K),
    /// A media element has frame data available.
    MediaReady(K),
    /// An element left the document.
    Unmount(K),
}

/// A presentation to apply to a target.
#[derive(Clone, Debug, PartialEq)]
pub struct PresentationUpdate<K> {
    /// The presented element.
    pub target: K,
    /// Its new state.
    pub state: PresentationState,
}

/// Result of a media-ready notification.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaUpdate<K> {
    /// The media element.
    pub key: K,
    /// What was done.
    pub outcome: NormalizeOutcome,
}

/// Everything that changed during one [`RevealEngine::flush`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput<K> {
    /// New viewport classification, if it changed.
    pub viewport: Option<ViewportState>,
    /// Settled scroll state, if the page scrolled and scrolling is observed.
    pub scroll: Option<ScrollState>,
    /// New header flag, if it flipped.
    pub header_scrolled: Option<bool>,
    /// Scroll events superseded by a later one in this frame.
    pub coalesced_scrolls: usize,
    /// Transforms written to the host.
    pub transform_writes: usize,
    /// Presentations that changed, in the order their inputs changed.
    pub presentations: Vec<PresentationUpdate<K>>,
    /// Media normalization results.
    pub media: SmallVec<[MediaUpdate<K>; 2]>,
}

impl<K> Default for FrameOutput<K> {
    fn default() -> Self {
        Self {
            viewport: None,
            scroll: None,
            header_scrolled: None,
            coalesced_scrolls: 0,
            transform_writes: 0,
            presentations: Vec::new(),
            media: SmallVec::new(),
        }
    }
}

impl<K> FrameOutput<K> {
    /// Returns `true` when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewport.is_none()
            && self.scroll.is_none()
            && self.header_scrolled.is_none()
            && self.transform_writes == 0
            && self.presentations.is_empty()
            && self.media.is_empty()
    }

    /// The update for `target`, if its presentation changed.
    #[must_use]
    pub fn presentation(&self, target: &K) -> Option<&PresentationState>
    where
        K: PartialEq,
    {
        self.presentations
            .iter()
            .find(|update| update.target == *target)
            .map(|update| &update.state)
    }
}

/// The host document, as seen by the engine.
///
/// Transforms from scroll bindings are written through [`TransformSink`];
/// media elements are looked up by key when they report being ready.
pub trait RevealHost<K>: TransformSink<K> {
    /// The host's media element type.
    type Media: MediaHandle;

    /// Returns the media element for `key`, if it still exists.
    fn media(&mut self, key: &K) -> Option<&mut Self::Media>;
}

/// Media type for hosts without media elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoMedia {}

impl MediaHandle for NoMedia {
    fn is_attached(&self) -> bool {
        match *self {}
    }

    fn playback_rate(&self) -> f64 {
        match *self {}
    }

    fn set_playback_rate(&mut self, _rate: f64) -> Result<(), MediaError> {
        match *self {}
    }

    fn current_time(&self) -> f64 {
        match *self {}
    }

    fn seek(&mut self, _seconds: f64) -> Result<(), MediaError> {
        match *self {}
    }
}

impl<K, S> RevealHost<K> for HashMap<K, Vec2, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    type Media = NoMedia;

    fn media(&mut self, _key: &K) -> Option<&mut NoMedia> {
        None
    }
}

#[derive(Clone, Debug)]
enum Registration<K> {
    Viewport,
    Scroll,
    Bindings(SmallVec<[K; 2]>),
    Reveal(K),
    Media(K),
}

impl<K> Registration<K> {
    fn kind(&self) -> ObserverKind {
        match self {
            Self::Viewport => ObserverKind::Viewport,
            Self::Scroll => ObserverKind::Scroll,
            Self::Bindings(_) => ObserverKind::Binding,
            Self::Reveal(_) => ObserverKind::Reveal,
            Self::Media(_) => ObserverKind::Media,
        }
    }
}

#[derive(Clone, Debug)]
struct Source<K> {
    id: u64,
    targets: SmallVec<[K; 4]>,
}

#[derive(Clone, Debug)]
struct Target<K> {
    source: K,
    animator: AnimatorId,
    index: StaggerIndex,
    emitted: Option<PresentationState>,
}

/// Targets whose inputs changed, in first-change order.
#[derive(Clone, Debug)]
struct DirtyTargets<K> {
    order: Vec<K>,
    set: HashSet<K>,
}

impl<K> Default for DirtyTargets<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            set: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> DirtyTargets<K> {
    fn mark(&mut self, key: K) {
        if self.set.insert(key.clone()) {
            self.order.push(key);
        }
    }

    fn take(&mut self) -> Vec<K> {
        self.set.clear();
        core::mem::take(&mut self.order)
    }
}

/// Runs the reveal mechanisms of one page.
///
/// The engine owns one viewport classifier, one scroll tracker, the scroll
/// bindings, a visibility trigger, the reveal animators and the media
/// normalizer. Hosts register what they want observed, [`push`](Self::push)
/// events as they arrive and call [`flush`](Self::flush) once per frame.
///
/// A flush processes its events in a fixed order:
///
/// 1. every resize, so the viewport class is settled first;
/// 2. the latest scroll event (earlier ones are coalesced), then the scroll
///    bindings at the settled offset;
/// 3. intersection, bounds and unmount events in arrival order;
/// 4. media load and ready events;
/// 5. presentations of every target whose inputs changed.
#[derive(Debug)]
pub struct RevealEngine<K> {
    config: EngineConfig,
    next_id: u64,
    registrations: HashMap<u64, Registration<K>>,
    viewport_id: Option<u64>,
    classifier: Option<ViewportClassifier>,
    viewport: ViewportState,
    scroll_id: Option<u64>,
    tracker: Option<ScrollTracker>,
    offset_y: f64,
    coalescer: ScrollCoalescer,
    bindings: ScrollBindings<K>,
    binding_owner: HashMap<K, u64>,
    trigger: VisibilityTrigger<K>,
    animators: Vec<RevealAnimator>,
    sources: HashMap<K, Source<K>>,
    targets: HashMap<K, Target<K>>,
    dirty: DirtyTargets<K>,
    media: MediaNormalizer<K>,
    media_owner: HashMap<K, u64>,
    queue: Vec<HostEvent<K>>,
}

impl<K> RevealEngine<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an engine, degrading for every missing capability.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let capabilities = config.capabilities;
        if !capabilities.contains(Capabilities::RESIZE) {
            warn!("unveil: resize observation unavailable; viewport stays regular");
        }
        if !capabilities.contains(Capabilities::INTERSECTION) {
            warn!("unveil: intersection observation unavailable; elements reveal on registration");
        }
        if !capabilities.contains(Capabilities::MEDIA) {
            warn!("unveil: media events unavailable; media is left as loaded");
        }
        let trigger = if capabilities.contains(Capabilities::INTERSECTION) {
            VisibilityTrigger::new()
        } else {
            VisibilityTrigger::unsupported()
        };
        Self {
            config,
            next_id: 0,
            registrations: HashMap::new(),
            viewport_id: None,
            classifier: None,
            viewport: ViewportState::REGULAR,
            scroll_id: None,
            tracker: None,
            offset_y: 0.0,
            coalescer: ScrollCoalescer::new(),
            bindings: ScrollBindings::new(),
            binding_owner: HashMap::new(),
            trigger,
            animators: Vec::new(),
            sources: HashMap::new(),
            targets: HashMap::new(),
            dirty: DirtyTargets::default(),
            media: MediaNormalizer::new(config.media),
            media_owner: HashMap::new(),
            queue: Vec::new(),
        }
    }

    /// Creates an engine, refusing hosts that lack any capability.
    pub fn try_new(config: EngineConfig) -> Result<Self, SetupError> {
        let missing = Capabilities::all().difference(config.capabilities);
        if !missing.is_empty() {
            return Err(SetupError::Unsupported(missing));
        }
        Ok(Self::new(config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the media normalization options.
    ///
    /// Loads that were already normalized are not revisited.
    pub fn set_media_options(&mut self, media: NormalizeOptions) {
        self.config.media = media;
        self.media.set_options(media);
    }

    /// Current viewport classification.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Latest scroll state, if scrolling is observed.
    #[must_use]
    pub fn scroll_state(&self) -> Option<ScrollState> {
        self.tracker.as_ref().map(ScrollTracker::state)
    }

    /// Returns `true` once the page scrolled past the header threshold.
    #[must_use]
    pub fn header_scrolled(&self) -> bool {
        self.scroll_state()
            .is_some_and(|state| state.is_past_threshold)
    }

    /// Counts of live registrations.
    #[must_use]
    pub fn live_observers(&self) -> LiveObservers {
        LiveObservers {
            handles: self.registrations.len(),
            viewport: usize::from(self.classifier.is_some()),
            scroll: usize::from(self.tracker.is_some()),
            bindings: self.bindings.len(),
            observed: self.trigger.len(),
            presented: self.targets.len(),
            media: self.media.len(),
        }
    }

    fn issue(&mut self, registration: Registration<K>) -> ObserverHandle {
        let id = self.next_id;
        self.next_id += 1;
        let kind = registration.kind();
        self.registrations.insert(id, registration);
        debug!("unveil: registered {kind:?} observer #{id}");
        ObserverHandle { id, kind }
    }

    fn set_viewport(&mut self, state: ViewportState) {
        if state == self.viewport {
            return;
        }
        self.viewport = state;
        for key in self.targets.keys() {
            self.dirty.mark(key.clone());
        }
    }

    /// Starts classifying the viewport, reading `initial_width` synchronously.
    ///
    /// Replaces a previous viewport observer; its handle becomes stale.
    pub fn observe_viewport(&mut self, breakpoint: f64, initial_width: f64) -> ObserverHandle {
        if let Some(previous) = self.viewport_id.take() {
            self.registrations.remove(&previous);
        }
        let classifier = if self.config.capabilities.contains(Capabilities::RESIZE) {
            ViewportClassifier::new(breakpoint, initial_width)
        } else {
            ViewportClassifier::unsupported(breakpoint)
        };
        self.set_viewport(classifier.state());
        self.classifier = Some(classifier);
        let handle = self.issue(Registration::Viewport);
        self.viewport_id = Some(handle.id);
        handle
    }

    /// Starts tracking scroll state.
    ///
    /// Replaces a previous scroll observer; its handle becomes stale.
    pub fn observe_scroll(&mut self, config: ScrollConfig) -> ObserverHandle {
        if let Some(previous) = self.scroll_id.take() {
            self.registrations.remove(&previous);
        }
        let mut tracker = ScrollTracker::new(config);
        tracker.on_scroll(self.offset_y, None);
        self.tracker = Some(tracker);
        let handle = self.issue(Registration::Scroll);
        self.scroll_id = Some(handle.id);
        handle
    }

    /// Binds the translation of `target` to the scroll offset.
    pub fn bind_scroll(
        &mut self,
        target: K,
        binding: ScrollBinding,
    ) -> Result<ObserverHandle, SetupError> {
        if self.binding_owner.contains_key(&target) {
            return Err(SetupError::AlreadyObserved);
        }
        self.bindings.bind(target.clone(), binding);
        let handle = self.issue(Registration::Bindings(SmallVec::from_elem(target.clone(), 1)));
        self.binding_owner.insert(target, handle.id);
        Ok(handle)
    }

    /// Binds two curtain panels sliding apart over `range`.
    pub fn bind_curtains(
        &mut self,
        left: K,
        right: K,
        range: ScrollRange,
        max_translate: f64,
    ) -> Result<ObserverHandle, SetupError> {
        if left == right
            || self.binding_owner.contains_key(&left)
            || self.binding_owner.contains_key(&right)
        {
            return Err(SetupError::AlreadyObserved);
        }
        self.bindings
            .bind_curtains(left.clone(), right.clone(), range, max_translate);
        let mut targets = SmallVec::new();
        targets.push(left.clone());
        targets.push(right.clone());
        let handle = self.issue(Registration::Bindings(targets));
        self.binding_owner.insert(left, handle.id);
        self.binding_owner.insert(right, handle.id);
        Ok(handle)
    }

    /// Registers a reveal configuration shared by any number of elements.
    pub fn register_animator(&mut self, config: RevealConfig) -> AnimatorId {
        self.animators.push(RevealAnimator::new(config));
        AnimatorId(self.animators.len() - 1)
    }

    /// Returns a registered animator.
    #[must_use]
    pub fn animator(&self, id: AnimatorId) -> Option<&RevealAnimator> {
        self.animators.get(id.0)
    }

    /// Observes `key` and presents it with `animator`.
    pub fn observe_element(
        &mut self,
        key: K,
        animator: AnimatorId,
        index: StaggerIndex,
    ) -> Result<ObserverHandle, SetupError> {
        let mut targets = SmallVec::new();
        targets.push((key.clone(), index));
        self.observe_targets(key, animator, targets)
    }

    /// Observes `container` and presents each of `members`, staggered by
    /// position.
    ///
    /// This is how a headline is revealed word by word: the headline is
    /// observed once, every word gets its own presentation.
    pub fn observe_group(
        &mut self,
        container: K,
        animator: AnimatorId,
        members: impl IntoIterator<Item = K>,
    ) -> Result<ObserverHandle, SetupError> {
        let targets = members
            .into_iter()
            .zip(0_u32..)
            .map(|(member, index)| (member, StaggerIndex(index)))
            .collect();
        self.observe_targets(container, animator, targets)
    }

    fn observe_targets(
        &mut self,
        source: K,
        animator: AnimatorId,
        targets: SmallVec<[(K, StaggerIndex); 4]>,
    ) -> Result<ObserverHandle, SetupError> {
        let options = self
            .animators
            .get(animator.0)
            .ok_or(SetupError::UnknownAnimator(animator))?
            .config()
            .trigger;
        let taken = self.sources.contains_key(&source)
            || targets.iter().enumerate().any(|(i, (target, _))| {
                self.targets.contains_key(target)
                    || targets[..i].iter().any(|(other, _)| other == target)
            });
        if taken {
            return Err(SetupError::AlreadyObserved);
        }

        self.trigger.observe(source.clone(), options);
        let handle = self.issue(Registration::Reveal(source.clone()));
        let mut members = SmallVec::with_capacity(targets.len());
        for (target, index) in targets {
            self.targets.insert(
                target.clone(),
                Target {
                    source: source.clone(),
                    animator,
                    index,
                    emitted: None,
                },
            );
            self.dirty.mark(target.clone());
            members.push(target);
        }
        self.sources.insert(
            source,
            Source {
                id: handle.id,
                targets: members,
            },
        );
        Ok(handle)
    }

    /// Tracks load state for the media element `key`.
    pub fn observe_media(&mut self, key: K) -> Result<ObserverHandle, SetupError> {
        if self.media_owner.contains_key(&key) {
            return Err(SetupError::AlreadyObserved);
        }
        let handle = self.issue(Registration::Media(key.clone()));
        self.media_owner.insert(key, handle.id);
        Ok(handle)
    }

    /// The presentation of `target` for the current inputs.
    ///
    /// Available right after registration, before any flush.
    #[must_use]
    pub fn presentation(&self, target: &K) -> Option<PresentationState> {
        let target = self.targets.get(target)?;
        let animator = self.animators.get(target.animator.0)?;
        let base = self
            .trigger
            .state(&target.source)
            .unwrap_or(RevealState::HIDDEN);
        Some(animator.apply(base, self.viewport, target.index))
    }

    /// Returns `true` once the element observed as `source` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, source: &K) -> bool {
        self.trigger.is_revealed(source)
    }

    /// Removes a registration.
    ///
    /// Returns `false` when the handle was already disposed or replaced.
    pub fn dispose(&mut self, handle: ObserverHandle) -> bool {
        self.dispose_id(handle.id)
    }

    fn dispose_id(&mut self, id: u64) -> bool {
        let Some(registration) = self.registrations.remove(&id) else {
            return false;
        };
        debug!("unveil: disposed {:?} observer #{id}", registration.kind());
        match registration {
            Registration::Viewport => {
                self.viewport_id = None;
                self.classifier = None;
            }
            Registration::Scroll => {
                self.scroll_id = None;
                self.tracker = None;
            }
            Registration::Bindings(targets) => {
                for target in &targets {
                    self.bindings.unbind(target);
                    self.binding_owner.remove(target);
                }
            }
            Registration::Reveal(source) => {
                self.trigger.unobserve(&source);
                if let Some(source) = self.sources.remove(&source) {
                    for target in &source.targets {
                        self.targets.remove(target);
                    }
                }
            }
            Registration::Media(key) => {
                self.media.forget(&key);
                self.media_owner.remove(&key);
            }
        }
        true
    }

    fn unmount(&mut self, key: &K) {
        if let Some(id) = self.sources.get(key).map(|source| source.id) {
            self.dispose_id(id);
        }
        // A group container may itself be a member of another group.
        if let Some(target) = self.targets.remove(key) {
            if let Some(source) = self.sources.get_mut(&target.source) {
                source.targets.retain(|member| *member != *key);
            }
        }
        if let Some(id) = self.media_owner.get(key).copied() {
            self.dispose_id(id);
        }
        if let Some(id) = self.binding_owner.remove(key) {
            self.bindings.unbind(key);
            if let Some(Registration::Bindings(targets)) = self.registrations.get_mut(&id) {
                targets.retain(|target| *target != *key);
                if targets.is_empty() {
                    self.registrations.remove(&id);
                }
            }
        }
    }

    /// Queues a host event for the next [`flush`](Self::flush).
    pub fn push(&mut self, event: HostEvent<K>) {
        match event {
            HostEvent::Scroll {
                offset_y,
                reference_height,
            } => self.coalescer.push(offset_y, reference_height),
            event => self.queue.push(event),
        }
    }

    /// Returns `true` when events are waiting for a flush.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty() || self.coalescer.is_pending()
    }

    /// Processes queued events and returns what changed.
    pub fn flush(&mut self, host: &mut impl RevealHost<K>) -> FrameOutput<K> {
        self.flush_with_trace(host, &mut ())
    }

    /// Like [`flush`](Self::flush), reporting reveal transitions to `trace`.
    pub fn flush_with_trace(
        &mut self,
        host: &mut impl RevealHost<K>,
        trace: &mut impl RevealTrace<K>,
    ) -> FrameOutput<K> {
        let mut output = FrameOutput::default();
        let events = core::mem::take(&mut self.queue);

        let viewport_before = self.viewport;
        for event in &events {
            if let HostEvent::Resize { width } = event {
                let update = self
                    .classifier
                    .as_mut()
                    .and_then(|classifier| classifier.on_resize(*width));
                if let Some(state) = update {
                    self.set_viewport(state);
                }
            }
        }
        if self.viewport != viewport_before {
            output.viewport = Some(self.viewport);
        }

        output.coalesced_scrolls = self.coalescer.coalesced();
        if let Some(pending) = self.coalescer.take() {
            self.offset_y = pending.offset_y;
            if let Some(tracker) = &mut self.tracker {
                let update = tracker.on_scroll(pending.offset_y, pending.reference_height);
                output.scroll = Some(update.state);
                if update.threshold_changed {
                    output.header_scrolled = Some(update.state.is_past_threshold);
                }
            }
        }
        output.transform_writes = self.bindings.apply(self.offset_y, host);

        let mut revealed_by: HashMap<K, f64> = HashMap::new();
        let mut media_events: SmallVec<[HostEvent<K>; 4]> = SmallVec::new();
        for event in events {
            match event {
                HostEvent::Resize { .. } | HostEvent::Scroll { .. } => {}
                HostEvent::Intersection { key, fraction } => {
                    self.intersect(key, fraction, &mut revealed_by);
                }
                HostEvent::Bounds {
                    key,
                    element,
                    viewport,
                } => {
                    self.intersect(key, visible_fraction(element, viewport), &mut revealed_by);
                }
                HostEvent::Unmount(key) => self.unmount(&key),
                event @ (HostEvent::MediaLoadStart(_) | HostEvent::MediaReady(_)) => {
                    media_events.push(event);
                }
            }
        }

        if self.config.capabilities.contains(Capabilities::MEDIA) {
            for event in media_events {
                match event {
                    HostEvent::MediaLoadStart(key) if self.media_owner.contains_key(&key) => {
                        self.media.on_load_start(key);
                    }
                    HostEvent::MediaReady(key) if self.media_owner.contains_key(&key) => {
                        let Some(handle) = host.media(&key) else {
                            trace!("unveil: media element missing on ready; skipped");
                            continue;
                        };
                        let outcome = self.media.on_ready(key.clone(), handle);
                        match outcome {
                            NormalizeOutcome::Skipped(err) => {
                                debug!("unveil: media normalization skipped: {err}");
                            }
                            NormalizeOutcome::RateRestoreFailed(err) => {
                                debug!("unveil: media rate not restored: {err}");
                            }
                            NormalizeOutcome::Applied | NormalizeOutcome::AlreadyNormalized => {}
                        }
                        output.media.push(MediaUpdate { key, outcome });
                    }
                    _ => {}
                }
            }
        }

        for key in self.dirty.take() {
            let Some(state) = self.presentation(&key) else {
                continue;
            };
            let Some(target) = self.targets.get_mut(&key) else {
                continue;
            };
            if target.emitted == Some(state) {
                continue;
            }
            let was_revealed = target.emitted.is_some_and(|emitted| emitted.is_revealed());
            target.emitted = Some(state);
            if state.is_revealed() && !was_revealed {
                let cause = match revealed_by.get(&target.source) {
                    Some(&fraction) => RevealCause::Intersected {
                        source: target.source.clone(),
                        fraction,
                    },
                    None => RevealCause::Registered,
                };
                trace!("unveil: target revealed after {}s", state.delay);
                trace.revealed(&key, cause);
            } else if was_revealed && !state.is_revealed() {
                trace!("unveil: target hidden");
                trace.hidden(&key);
            }
            output
                .presentations
                .push(PresentationUpdate { target: key, state });
        }

        if !output.is_empty() {
            debug!(
                "unveil: frame flushed ({} presentations, {} transform writes, {} media)",
                output.presentations.len(),
                output.transform_writes,
                output.media.len()
            );
        }
        output
    }

    fn intersect(&mut self, key: K, fraction: f64, revealed_by: &mut HashMap<K, f64>) {
        let Some(event) = self.trigger.update(&key, fraction) else {
            return;
        };
        if let TriggerEvent::Revealed(_) = event {
            revealed_by.insert(key.clone(), fraction);
        }
        if let Some(source) = self.sources.get(&key) {
            for target in &source.targets {
                self.dirty.mark(target.clone());
            }
        }
    }
}
