//! Linear text search across loaded books.

use serde::Serialize;

use crate::models::Book;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Case-insensitive substring search over verse plain text, in book order.
/// A blank query finds nothing.
pub fn search<'a>(books: impl IntoIterator<Item = &'a Book>, query: &str) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return vec![];
    }
    let needle = needle.as_str();
    books
        .into_iter()
        .flat_map(|book| {
            book.verses()
                .filter(move |(_, v)| v.text().to_lowercase().contains(needle))
                .map(move |(chapter, v)| SearchHit {
                    book: book.id.clone(),
                    chapter,
                    verse: v.number(),
                    text: v.text().to_string(),
                })
        })
        .collect()
}
