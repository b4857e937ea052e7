//! Scanning loops around [`Glossary::match_at`].

use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;

use crate::models::{GlossaryTerm, Verse};

use super::Glossary;
use super::matcher::{is_word_char, leading_word};

/// A glossary term found in a string, as a byte range into that string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSpan<'g> {
    pub range: Range<usize>,
    pub term: &'g GlossaryTerm,
}

/// Finds non-overlapping glossary terms in `text`, left to right.
///
/// Probes at the start of every word. A match consumes its whole phrase;
/// otherwise the scan moves past one word.
pub fn annotate<'g>(
    glossary: &'g Glossary,
    text: &str,
    lemmas: Option<&BTreeSet<String>>,
) -> Vec<TermSpan<'g>> {
    let mut spans = vec![];
    if glossary.is_empty() {
        return spans;
    }
    let mut offset = 0;
    while let Some(c) = text[offset..].chars().next() {
        if !is_word_char(c) {
            offset += c.len_utf8();
            continue;
        }
        if let Some(m) = glossary.match_at(text, offset, lemmas) {
            let end = offset + m.matched_text.len();
            spans.push(TermSpan {
                range: offset..end,
                term: m.term,
            });
            offset = end;
            continue;
        }
        offset += leading_word(&text[offset..]).map_or(c.len_utf8(), str::len);
    }
    spans
}

/// One display run of a verse: text with its speaker and, if it is a glossary
/// term, the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineRun<'a> {
    pub text: &'a str,
    pub speaker: Option<&'a str>,
    #[serde(serialize_with = "serialize_term_id")]
    pub term: Option<&'a GlossaryTerm>,
}

fn serialize_term_id<S: serde::Serializer>(
    term: &Option<&GlossaryTerm>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match term {
        Some(t) => serializer.serialize_some(&t.id),
        None => serializer.serialize_none(),
    }
}

/// Layers glossary terms over a verse's speaker segments.
///
/// Terms are matched within each segment, filtered by the verse's lemmas, so
/// no term crosses a speaker change. The runs' text concatenates to the
/// verse's plain text.
pub fn render_verse<'a>(verse: &'a Verse, glossary: &'a Glossary) -> Vec<InlineRun<'a>> {
    let lemmas = verse.lemma_set();
    let mut runs = vec![];
    for segment in verse.segments() {
        let content = segment.content();
        let speaker = segment.speaker_name();
        let mut cursor = 0;
        for span in annotate(glossary, content, Some(&lemmas)) {
            if span.range.start > cursor {
                runs.push(InlineRun {
                    text: &content[cursor..span.range.start],
                    speaker,
                    term: None,
                });
            }
            runs.push(InlineRun {
                text: &content[span.range.clone()],
                speaker,
                term: Some(span.term),
            });
            cursor = span.range.end;
        }
        if cursor < content.len() {
            runs.push(InlineRun {
                text: &content[cursor..],
                speaker,
                term: None,
            });
        }
    }
    runs
}
