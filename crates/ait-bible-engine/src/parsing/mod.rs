//! # Book Parsing
//!
//! Streaming recursive descent over the book XML with `quick-xml`.
//!
//! ```text
//! <ait version="1.0">
//!   <book id="matthew" name="Matthew">
//!     <chapter num="1">
//!       <verse num="1">
//!         <text><p/>… <q who="Jesus">…</q></text>
//!         <greek><w lemma="λόγος">λόγου</w>…</greek>
//!         <note term="…">…</note>
//!       </verse>
//! ```
//!
//! ## Modules
//!
//! - **`markup`**: `MarkupNode` tree for the `<text>` container
//! - **`source_tokens`**: `<greek>` word extraction
//! - **`notes`**: `<note>` extraction
//! - **`strip`**: emphasis / speaker-tag stripping for extracted prose
//! - **`emphasis`**: emphasis rendering for display prose
//!
//! ## Failure model
//!
//! Only XML that is not well-formed is an error. A missing root or book is
//! `Ok(None)`; missing attributes and containers degrade to empty values;
//! chapters and verses without a usable `num` are skipped.

pub mod emphasis;
pub mod markup;
pub mod notes;
pub mod source_tokens;
pub mod strip;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::models::{Book, Chapter, SourceToken, Verse, VerseNote};
use crate::projection::project_verse;

pub use markup::{MarkupNode, parse_markup};

pub(crate) type XmlReader<'a> = Reader<&'a [u8]>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Document ended inside <{0}>")]
    UnexpectedEof(String),
}

/// Parses a whole book document.
///
/// Returns `Ok(None)` when the document has no `<ait>` root or no `<book>`.
pub fn parse_book(xml: &str) -> Result<Option<Book>, ParseError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"ait" => return find_book(&mut reader),
            Event::Start(_) | Event::Empty(_) | Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn find_book(reader: &mut XmlReader<'_>) -> Result<Option<Book>, ParseError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"book" => {
                return parse_book_element(reader, &e).map(Some);
            }
            Event::Empty(e) if e.name().as_ref() == b"book" => {
                return Ok(Some(book_header(&e, vec![])));
            }
            Event::Start(e) => skip(reader, &e)?,
            Event::End(_) => return Ok(None),
            Event::Eof => return Err(ParseError::UnexpectedEof("ait".into())),
            _ => {}
        }
    }
}

fn book_header(start: &BytesStart<'_>, chapters: Vec<Chapter>) -> Book {
    let id = attr(start, b"id").unwrap_or_default();
    let name = attr(start, b"name").unwrap_or_else(|| id.clone());
    Book { id, name, chapters }
}

fn parse_book_element(reader: &mut XmlReader<'_>, start: &BytesStart<'_>) -> Result<Book, ParseError> {
    let mut chapters = vec![];
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"chapter" => match number_attr(&e) {
                Some(number) => chapters.push(parse_chapter(reader, number)?),
                None => {
                    log::warn!("Skipping chapter without a valid num attribute");
                    skip(reader, &e)?;
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"chapter" => {
                if let Some(number) = number_attr(&e) {
                    chapters.push(Chapter {
                        number,
                        verses: vec![],
                    });
                }
            }
            Event::Start(e) => skip(reader, &e)?,
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("book".into())),
            _ => {}
        }
    }
    Ok(book_header(start, chapters))
}

fn parse_chapter(reader: &mut XmlReader<'_>, number: u32) -> Result<Chapter, ParseError> {
    let mut verses = vec![];
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"verse" => match number_attr(&e) {
                Some(n) => verses.push(parse_verse(reader, n)?),
                None => {
                    log::warn!("Skipping verse without a valid num attribute in chapter {number}");
                    skip(reader, &e)?;
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"verse" => {
                if let Some(n) = number_attr(&e) {
                    verses.push(assemble_verse(n, &[], vec![], vec![]));
                }
            }
            Event::Start(e) => skip(reader, &e)?,
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("chapter".into())),
            _ => {}
        }
    }
    Ok(Chapter { number, verses })
}

fn parse_verse(reader: &mut XmlReader<'_>, number: u32) -> Result<Verse, ParseError> {
    let mut nodes = vec![];
    let mut tokens = vec![];
    let mut verse_notes = vec![];
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"text" => nodes.extend(markup::parse_children(reader, 0)?),
                b"greek" => tokens.extend(source_tokens::parse_source_tokens(reader)?),
                b"note" => verse_notes.push(notes::parse_note(reader, &e)?),
                _ => skip(reader, &e)?,
            },
            Event::Empty(e) if e.name().as_ref() == b"note" => {
                verse_notes.push(notes::empty_note(&e))
            }
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("verse".into())),
            _ => {}
        }
    }
    Ok(assemble_verse(number, &nodes, tokens, verse_notes))
}

fn assemble_verse(
    number: u32,
    markup: &[MarkupNode],
    source_tokens: Vec<SourceToken>,
    notes: Vec<VerseNote>,
) -> Verse {
    Verse {
        projection: project_verse(number, markup),
        source_tokens,
        notes,
    }
}

/// Reads an attribute value, unescaped. Malformed attributes read as absent.
pub(crate) fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// A positive `num` attribute.
fn number_attr(e: &BytesStart<'_>) -> Option<u32> {
    attr(e, b"num")?.trim().parse().ok().filter(|n| *n > 0)
}

pub(crate) fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Skips an element and everything inside it.
pub(crate) fn skip(reader: &mut XmlReader<'_>, e: &BytesStart<'_>) -> Result<(), ParseError> {
    reader.read_to_end(e.name())?;
    Ok(())
}

/// Reads the concatenated character data up to the end of the current element,
/// flattening any nested elements.
pub(crate) fn collect_text(reader: &mut XmlReader<'_>, element: &str) -> Result<String, ParseError> {
    let mut out = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Text(t) => out.push_str(&t.unescape()?),
            Event::CData(c) => out.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(out),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(ParseError::UnexpectedEof(element.to_string())),
            _ => {}
        }
    }
}

/// Opens a reader positioned just inside the first element of `xml`.
#[cfg(test)]
pub(crate) fn open_fragment(xml: &str) -> XmlReader<'_> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => return reader,
            Ok(Event::Eof) | Err(_) => panic!("fragment has no opening element: {xml}"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests;
