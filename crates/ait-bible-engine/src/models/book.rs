use serde::Serialize;

use crate::grouping::group_paragraphs;

use super::verse::Verse;

/// A chapter: verses in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub number: u32,
    pub verses: Vec<Verse>,
}

impl Chapter {
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.number() == number)
    }

    /// Verses regrouped into prose paragraphs.
    pub fn paragraphs(&self) -> Vec<&[Verse]> {
        group_paragraphs(&self.verses)
    }
}

/// A parsed book, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    pub fn verse(&self, chapter: u32, verse: u32) -> Option<&Verse> {
        self.chapter(chapter)?.verse(verse)
    }

    /// Iterates `(chapter number, verse)` over the whole book.
    pub fn verses(&self) -> impl Iterator<Item = (u32, &Verse)> {
        self.chapters
            .iter()
            .flat_map(|c| c.verses.iter().map(move |v| (c.number, v)))
    }
}
