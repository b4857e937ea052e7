//! Legacy per-book JSON interchange.
//!
//! Lossy by design of the format: segments, speakers and source tokens are
//! dropped, and a chapter's notes collapse into one text blob.

use serde::{Deserialize, Serialize};

use crate::models::{Book, Chapter, VerseNote};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookExport {
    pub book: String,
    pub chapters: Vec<ChapterExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterExport {
    pub chapter: u32,
    pub verses: Vec<VerseExport>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseExport {
    pub verse: u32,
    pub text: String,
    pub paragraph_start: bool,
}

pub fn export_book(book: &Book) -> BookExport {
    BookExport {
        book: book.name.clone(),
        chapters: book.chapters.iter().map(export_chapter).collect(),
    }
}

fn export_chapter(chapter: &Chapter) -> ChapterExport {
    ChapterExport {
        chapter: chapter.number,
        verses: chapter
            .verses
            .iter()
            .map(|v| VerseExport {
                verse: v.number(),
                text: v.text().to_string(),
                paragraph_start: v.projection.paragraph_start,
            })
            .collect(),
        notes: notes_blob(chapter.verses.iter().flat_map(|v| &v.notes)),
    }
}

/// `label: explanation` per note, one per line, in verse order. Unlabelled
/// notes contribute their explanation alone.
pub fn notes_blob<'a>(notes: impl IntoIterator<Item = &'a VerseNote>) -> String {
    notes
        .into_iter()
        .map(|note| match note.term.as_str() {
            "" => note.explanation.clone(),
            term => format!("{term}: {}", note.explanation),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
