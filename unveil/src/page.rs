// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio pages and the reveal mechanisms each one uses.

use core::fmt;

use kurbo::Vec2;
use unveil_media::NormalizeOptions;
use unveil_motion::{RevealConfig, StaggerDelay};
use unveil_scroll::{DEFAULT_THRESHOLD_FRACTION, ScrollConfig, ScrollRange};
use unveil_trigger::TriggerOptions;
use unveil_viewport::DEFAULT_BREAKPOINT;

use crate::engine::{AnimatorId, ObserverHandle, RevealEngine};

/// Seconds added per step of a section's fixed delay.
pub const SECTION_DELAY_STEP: f64 = 0.2;

/// Duration of the hero banner reveal, in seconds.
pub const HERO_DURATION: f64 = 0.8;

/// Initial horizontal offset of gallery items, as a fraction of their width.
pub const GALLERY_OFFSET_FRACTION: f64 = 0.4;

/// A page of the portfolio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Page {
    /// Landing page.
    #[default]
    Home,
    /// "Bleed Festival" case study.
    BleedFestival,
    /// "Dior Zine" case study.
    DiorZine,
    /// "Seewees" case study.
    Seewees,
    /// "Solis" case study.
    Solis,
}

impl Page {
    /// Every page, home first.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::BleedFestival,
        Self::DiorZine,
        Self::Seewees,
        Self::Solis,
    ];

    /// Route of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::BleedFestival => "/bleedfestival",
            Self::DiorZine => "/diorzine",
            Self::Seewees => "/seewees",
            Self::Solis => "/solis",
        }
    }

    /// Looks a page up by route. A single trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(rest) => rest,
        };
        Self::ALL.into_iter().find(|page| page.path() == trimmed)
    }

    /// Returns `true` for the case-study pages.
    #[must_use]
    pub const fn is_case_study(self) -> bool {
        !matches!(self, Self::Home)
    }

    /// The mechanisms this page uses.
    #[must_use]
    pub fn profile(self) -> PageProfile {
        PageProfile::for_page(self)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Two panels sliding apart with scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curtains {
    /// Scroll range over which the panels open.
    pub range: ScrollRange,
    /// Distance each panel travels, in pixels.
    pub max_translate: f64,
}

impl Default for Curtains {
    fn default() -> Self {
        Self {
            range: ScrollRange::new(0.0, 1500.0),
            max_translate: 500.0,
        }
    }
}

/// Items sliding in from alternating sides.
///
/// The initial offset is relative to the item's own width: even items start
/// [`offset_fraction`](Self::offset_fraction) of their width to the left, odd
/// items the same distance to the right.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gallery {
    /// Preset shared by every item, without offset.
    pub base: RevealConfig,
    /// Initial offset as a fraction of the item width.
    pub offset_fraction: f64,
}

impl Gallery {
    /// Preset for the `index`-th item, `item_width` pixels wide.
    #[must_use]
    pub fn item(&self, index: u32, item_width: f64) -> RevealConfig {
        let side = if index % 2 == 0 { -1.0 } else { 1.0 };
        self.base
            .with_initial_offset(Vec2::new(side * self.offset_fraction * item_width, 0.0))
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            base: RevealConfig::slide_in_x(0.0),
            offset_fraction: GALLERY_OFFSET_FRACTION,
        }
    }
}

/// Reveal presets for the content blocks of a page.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageReveals {
    /// Hero banner, revealed as soon as it is observed.
    pub hero: RevealConfig,
    /// Headline revealed word by word.
    pub words: RevealConfig,
    /// Content sections fading in from below.
    pub sections: RevealConfig,
    /// Gallery items sliding in horizontally.
    pub gallery: Option<Gallery>,
}

impl Default for PageReveals {
    fn default() -> Self {
        Self {
            hero: RevealConfig::fade_slide_up()
                .with_trigger(TriggerOptions::on_mount())
                .with_duration(HERO_DURATION),
            words: RevealConfig::words_pull_up(),
            sections: RevealConfig::fade_slide_up(),
            gallery: None,
        }
    }
}

/// Which reveal mechanisms a page uses, with their parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageProfile {
    /// The page.
    pub page: Page,
    /// Compact/regular breakpoint, in logical pixels.
    pub breakpoint: f64,
    /// Fraction of the main section's height past which the header turns
    /// opaque, if the page has a scroll-aware header.
    pub header_threshold: Option<f64>,
    /// Curtain panels, if the page has them.
    pub curtains: Option<Curtains>,
    /// Content reveals.
    pub reveals: PageReveals,
    /// Media normalization, if the page autoplays video.
    pub media: Option<NormalizeOptions>,
}

impl PageProfile {
    /// The profile of `page`.
    #[must_use]
    pub fn for_page(page: Page) -> Self {
        let base = Self {
            page,
            breakpoint: DEFAULT_BREAKPOINT,
            header_threshold: None,
            curtains: None,
            reveals: PageReveals::default(),
            media: None,
        };
        match page {
            Page::Home => Self {
                curtains: Some(Curtains::default()),
                media: Some(NormalizeOptions::seek_only(1.0)),
                ..base
            },
            Page::BleedFestival => Self {
                header_threshold: Some(DEFAULT_THRESHOLD_FRACTION),
                reveals: PageReveals {
                    gallery: Some(Gallery::default()),
                    ..base.reveals
                },
                media: Some(NormalizeOptions::default()),
                ..base
            },
            Page::DiorZine | Page::Seewees | Page::Solis => Self {
                header_threshold: Some(DEFAULT_THRESHOLD_FRACTION),
                media: Some(NormalizeOptions::default()),
                ..base
            },
        }
    }

    /// Section reveal with the fixed delay of `step`.
    #[must_use]
    pub fn section(&self, step: u8) -> RevealConfig {
        self.reveals.sections.with_stagger(section_delay(step))
    }

    /// Scroll configuration for this page, if it observes scrolling at all.
    #[must_use]
    pub fn scroll_config(&self) -> Option<ScrollConfig> {
        if self.header_threshold.is_none() && self.curtains.is_none() {
            return None;
        }
        let mut config = ScrollConfig::default();
        if let Some(fraction) = self.header_threshold {
            config = config.with_threshold_fraction(fraction);
        }
        if let Some(curtains) = self.curtains {
            config = config.with_range(curtains.range);
        }
        Some(config)
    }

    /// Registers this page's observers and animators with `engine`, and
    /// applies the page's media options.
    ///
    /// Curtain targets and observed elements are supplied by the host
    /// afterwards, using [`Curtains`] and the returned animator ids. Gallery
    /// items span the page, so their offsets are sized for `initial_width`;
    /// hosts with narrower items register [`Gallery::item`] presets instead.
    pub fn install<K>(&self, engine: &mut RevealEngine<K>, initial_width: f64) -> PageSetup
    where
        K: Clone + Eq + core::hash::Hash,
    {
        if let Some(media) = self.media {
            engine.set_media_options(media);
        }
        PageSetup {
            viewport: engine.observe_viewport(self.breakpoint, initial_width),
            scroll: self
                .scroll_config()
                .map(|config| engine.observe_scroll(config)),
            hero: engine.register_animator(self.reveals.hero),
            words: engine.register_animator(self.reveals.words),
            sections: engine.register_animator(self.reveals.sections),
            gallery: self.reveals.gallery.map(|gallery| GalleryAnimators {
                from_left: engine.register_animator(gallery.item(0, initial_width)),
                from_right: engine.register_animator(gallery.item(1, initial_width)),
            }),
        }
    }
}

impl Default for PageProfile {
    fn default() -> Self {
        Self::for_page(Page::Home)
    }
}

/// Handles created by [`PageProfile::install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageSetup {
    /// Viewport observer.
    pub viewport: ObserverHandle,
    /// Scroll observer, if the page observes scrolling.
    pub scroll: Option<ObserverHandle>,
    /// Hero banner animator.
    pub hero: AnimatorId,
    /// Word pull-up animator.
    pub words: AnimatorId,
    /// Section animator without delay.
    pub sections: AnimatorId,
    /// Gallery animators, if the page has a gallery.
    pub gallery: Option<GalleryAnimators>,
}

/// The two gallery animators, one per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GalleryAnimators {
    /// Items entering from the left.
    pub from_left: AnimatorId,
    /// Items entering from the right.
    pub from_right: AnimatorId,
}

impl GalleryAnimators {
    /// Animator of the `index`-th item.
    #[must_use]
    pub fn for_item(&self, index: u32) -> AnimatorId {
        if index % 2 == 0 {
            self.from_left
        } else {
            self.from_right
        }
    }
}

/// Fixed delay of the `step`-th delay class.
#[must_use]
pub fn section_delay(step: u8) -> StaggerDelay {
    StaggerDelay::fixed(f64::from(step) * SECTION_DELAY_STEP)
}
