// Copyright 2025 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::animator::StaggerIndex;

/// Non-breaking space, used for empty words so spacing survives layout.
pub const NBSP: &str = "\u{a0}";

/// One word of a word-by-word reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Word<'a> {
    /// Position of the word, used as its stagger index.
    pub index: StaggerIndex,
    /// Word text, or [`NBSP`] for an empty word.
    pub text: &'a str,
}

/// Splits `text` on single spaces for a word-by-word reveal.
///
/// Consecutive spaces produce empty words, which are replaced by [`NBSP`] so
/// the gap they stand for is preserved.
///
/// ```rust
/// use unveil_motion::{NBSP, StaggerIndex, split_words};
///
/// let words: Vec<_> = split_words("graphic  design").collect();
/// assert_eq!(words.len(), 3);
/// assert_eq!(words[1].text, NBSP);
/// assert_eq!(words[2].index, StaggerIndex(2));
/// ```
pub fn split_words(text: &str) -> impl Iterator<Item = Word<'_>> + '_ {
    text.split(' ').zip(0_u32..).map(|(word, index)| Word {
        index: StaggerIndex(index),
        text: if word.is_empty() { NBSP } else { word },
    })
}
