//! `<note term="…">` elements: translator notes on a verse.

use quick_xml::events::BytesStart;

use super::{ParseError, XmlReader, attr, collect_text, strip::strip_markup};
use crate::models::VerseNote;

/// Reads one note. A missing `term` becomes an empty label.
pub(crate) fn parse_note(reader: &mut XmlReader<'_>, start: &BytesStart<'_>) -> Result<VerseNote, ParseError> {
    let explanation = strip_markup(&collect_text(reader, "note")?);
    Ok(VerseNote {
        term: term_of(start),
        explanation: explanation.trim().to_string(),
    })
}

/// A self-closing `<note/>`.
pub(crate) fn empty_note(start: &BytesStart<'_>) -> VerseNote {
    VerseNote {
        term: term_of(start),
        explanation: String::new(),
    }
}

fn term_of(start: &BytesStart<'_>) -> String {
    attr(start, b"term").map(|t| t.trim().to_string()).unwrap_or_default()
}
