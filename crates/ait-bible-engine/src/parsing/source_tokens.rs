//! `<greek>` container: original-language words in reading order.

use quick_xml::events::Event;

use super::{ParseError, XmlReader, attr, collect_text, skip};
use crate::models::SourceToken;

/// Reads `<w lemma="…">surface</w>` elements up to the end of the container.
///
/// Order is preserved and repeated words stay distinct. A word without a
/// lemma gets an empty one.
pub(crate) fn parse_source_tokens(reader: &mut XmlReader<'_>) -> Result<Vec<SourceToken>, ParseError> {
    let mut tokens = vec![];
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w" => {
                let lemma = attr(&e, b"lemma").unwrap_or_default();
                let surface = collect_text(reader, "w")?;
                tokens.push(SourceToken::new(surface.trim(), lemma.trim()));
            }
            Event::Empty(e) if e.name().as_ref() == b"w" => {
                let lemma = attr(&e, b"lemma").unwrap_or_default();
                tokens.push(SourceToken::new("", lemma.trim()));
            }
            Event::Start(e) => skip(reader, &e)?,
            Event::End(_) => return Ok(tokens),
            Event::Eof => return Err(ParseError::UnexpectedEof("greek".into())),
            _ => {}
        }
    }
}
