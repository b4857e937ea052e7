//! The `<text>` container as a tree of [`MarkupNode`]s.
//!
//! - `<p/>` as a direct child marks a paragraph break.
//! - `<q who="…">` is a speaker quotation; its children use the same grammar,
//!   so quotations nest.
//! - Character data is stripped of inline decoration before it is stored.
//! - Any other element is opaque: its text is flattened into plain text.

use quick_xml::events::{BytesStart, Event};

use super::{ParseError, XmlReader, attr, collect_text, element_name, strip::strip_markup};

/// Speaker used when a quotation carries no `who` attribute.
pub const UNKNOWN_SPEAKER: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    PlainText {
        content: String,
    },
    /// Zero-width marker: a prose paragraph starts here.
    ParagraphBreak,
    SpeakerQuote {
        speaker: String,
        children: Vec<MarkupNode>,
    },
}

impl MarkupNode {
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::PlainText {
            content: content.into(),
        }
    }

    pub fn quote(speaker: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        MarkupNode::SpeakerQuote {
            speaker: speaker.into(),
            children,
        }
    }
}

/// Parses the body of a `<text>` container.
///
/// An empty body is an empty forest.
pub fn parse_markup(body: &str) -> Result<Vec<MarkupNode>, ParseError> {
    let wrapped = format!("<text>{body}</text>");
    let mut reader = quick_xml::Reader::from_str(&wrapped);
    loop {
        match reader.read_event()? {
            Event::Start(_) => return parse_children(&mut reader, 0),
            Event::Eof => return Ok(vec![]),
            _ => {}
        }
    }
}

/// Parses siblings up to the end of the enclosing element.
///
/// `depth` counts enclosing quotations; paragraph markers only count at depth 0.
pub(crate) fn parse_children(
    reader: &mut XmlReader<'_>,
    depth: usize,
) -> Result<Vec<MarkupNode>, ParseError> {
    let mut nodes = vec![];
    loop {
        match reader.read_event()? {
            Event::Text(t) => push_text(&mut nodes, &t.unescape()?),
            Event::CData(c) => push_text(&mut nodes, &String::from_utf8_lossy(&c)),
            Event::Empty(e) => match e.name().as_ref() {
                b"p" if depth == 0 => nodes.push(MarkupNode::ParagraphBreak),
                b"q" => nodes.push(MarkupNode::quote(speaker_of(&e), vec![])),
                _ => {}
            },
            Event::Start(e) => match e.name().as_ref() {
                b"q" => {
                    let speaker = speaker_of(&e);
                    let children = parse_children(reader, depth + 1)?;
                    nodes.push(MarkupNode::quote(speaker, children));
                }
                b"p" if depth == 0 => {
                    nodes.push(MarkupNode::ParagraphBreak);
                    push_text(&mut nodes, &collect_text(reader, "p")?);
                }
                _ => push_text(&mut nodes, &collect_text(reader, &element_name(&e))?),
            },
            Event::End(_) => return Ok(nodes),
            Event::Eof => return Err(ParseError::UnexpectedEof("text".into())),
            _ => {}
        }
    }
}

fn push_text(nodes: &mut Vec<MarkupNode>, raw: &str) {
    let content = strip_markup(raw);
    if !content.is_empty() {
        nodes.push(MarkupNode::text(content));
    }
}

fn speaker_of(e: &BytesStart<'_>) -> String {
    match attr(e, b"who").map(|s| s.trim().to_string()) {
        Some(who) if !who.is_empty() => who,
        _ => {
            log::debug!("Quotation without a speaker, using {UNKNOWN_SPEAKER:?}");
            UNKNOWN_SPEAKER.to_string()
        }
    }
}
