use std::collections::BTreeSet;

use serde::Serialize;

/// A maximal run of verse text sharing one attribution.
///
/// Serializes as `{"kind": "text", "content": ..}` or
/// `{"kind": "speaker", "speaker": .., "content": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    /// Narration outside any quotation.
    Text { content: String },
    /// Words attributed to the innermost enclosing quotation's speaker.
    Speaker { speaker: String, content: String },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn speaker(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Segment::Speaker {
            speaker: speaker.into(),
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content } | Segment::Speaker { content, .. } => content,
        }
    }

    /// The speaker this run is attributed to, `None` for narration.
    pub fn speaker_name(&self) -> Option<&str> {
        match self {
            Segment::Text { .. } => None,
            Segment::Speaker { speaker, .. } => Some(speaker),
        }
    }

    pub fn is_speaker(&self) -> bool {
        matches!(self, Segment::Speaker { .. })
    }

    pub(crate) fn content_mut(&mut self) -> &mut String {
        match self {
            Segment::Text { content } | Segment::Speaker { content, .. } => content,
        }
    }
}

/// The flattened, render-ready view of one verse.
///
/// Concatenating `segments[*].content` in order yields `plain_text` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseProjection {
    pub number: u32,
    pub plain_text: String,
    pub segments: Vec<Segment>,
    pub paragraph_start: bool,
    pub has_speaker: bool,
}

/// An original-language word as it appears in the verse, with its dictionary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceToken {
    pub surface_form: String,
    pub lemma: String,
}

impl SourceToken {
    pub fn new(surface_form: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            surface_form: surface_form.into(),
            lemma: lemma.into(),
        }
    }
}

/// A translator note attached to a verse. `term` is empty when the note has no label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseNote {
    pub term: String,
    pub explanation: String,
}

/// A fully loaded verse: its projection plus the source-language and note facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    #[serde(flatten)]
    pub projection: VerseProjection,
    pub source_tokens: Vec<SourceToken>,
    pub notes: Vec<VerseNote>,
}

impl Verse {
    pub fn number(&self) -> u32 {
        self.projection.number
    }

    pub fn text(&self) -> &str {
        &self.projection.plain_text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.projection.segments
    }

    /// Lowercased, non-empty lemmas of this verse's source tokens.
    ///
    /// This is the filter the glossary matcher uses to disambiguate renderings.
    pub fn lemma_set(&self) -> BTreeSet<String> {
        self.source_tokens
            .iter()
            .map(|t| t.lemma.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect()
    }
}
