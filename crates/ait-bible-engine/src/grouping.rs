//! Paragraph grouping of a chapter's verses.

use crate::models::{Verse, VerseProjection};

/// Anything carrying a per-verse paragraph-start flag.
pub trait StartsParagraph {
    fn starts_paragraph(&self) -> bool;
}

impl StartsParagraph for VerseProjection {
    fn starts_paragraph(&self) -> bool {
        self.paragraph_start
    }
}

impl StartsParagraph for Verse {
    fn starts_paragraph(&self) -> bool {
        self.projection.paragraph_start
    }
}

/// Splits `verses` into contiguous, non-empty paragraphs.
///
/// A new paragraph opens at every verse flagged as a paragraph start, except
/// when it would leave the current paragraph empty (the first verse).
pub fn group_paragraphs<T: StartsParagraph>(verses: &[T]) -> Vec<&[T]> {
    let mut groups = vec![];
    let mut start = 0;
    for (i, verse) in verses.iter().enumerate() {
        if verse.starts_paragraph() && i > start {
            groups.push(&verses[start..i]);
            start = i;
        }
    }
    if start < verses.len() {
        groups.push(&verses[start..]);
    }
    groups
}
