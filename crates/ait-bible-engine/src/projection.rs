//! Verse projection: from a [`MarkupNode`] forest to a flat [`VerseProjection`].
//!
//! A depth-first, left-to-right walk keeps a stack of open quotations. Text is
//! attributed to the innermost open speaker (narration when the stack is
//! empty), adjacent runs with the same attribution are coalesced, and only then
//! is whitespace trimmed from the outer edges of the first and last runs. The
//! segments therefore always concatenate to `plain_text`.

use crate::models::{Segment, VerseProjection};
use crate::parsing::MarkupNode;

pub fn project_verse(number: u32, nodes: &[MarkupNode]) -> VerseProjection {
    let mut projector = Projector::default();
    projector.walk(nodes);
    projector.finish(number)
}

#[derive(Default)]
struct Projector<'a> {
    speakers: Vec<&'a str>,
    segments: Vec<Segment>,
    paragraph_start: bool,
}

impl<'a> Projector<'a> {
    fn walk(&mut self, nodes: &'a [MarkupNode]) {
        for node in nodes {
            match node {
                MarkupNode::PlainText { content } => self.emit(content),
                MarkupNode::ParagraphBreak => self.paragraph_start = true,
                MarkupNode::SpeakerQuote { speaker, children } => {
                    self.speakers.push(speaker);
                    self.walk(children);
                    self.speakers.pop();
                }
            }
        }
    }

    fn emit(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        let speaker = self.speakers.last().copied();
        if let Some(last) = self.segments.last_mut()
            && last.speaker_name() == speaker
        {
            last.content_mut().push_str(content);
            return;
        }
        self.segments.push(match speaker {
            None => Segment::text(content),
            Some(speaker) => Segment::speaker(speaker, content),
        });
    }

    fn finish(mut self, number: u32) -> VerseProjection {
        trim_outer_edges(&mut self.segments);
        let plain_text: String = self.segments.iter().map(Segment::content).collect();
        let has_speaker = self.segments.iter().any(Segment::is_speaker);
        VerseProjection {
            number,
            plain_text,
            segments: self.segments,
            paragraph_start: self.paragraph_start,
            has_speaker,
        }
    }
}

/// Trims leading whitespace of the first run and trailing whitespace of the
/// last, dropping runs that become empty.
fn trim_outer_edges(segments: &mut Vec<Segment>) {
    while let Some(first) = segments.first_mut() {
        let content = first.content_mut();
        let cut = content.len() - content.trim_start().len();
        if cut == content.len() {
            segments.remove(0);
            continue;
        }
        content.drain(..cut);
        break;
    }
    while let Some(last) = segments.last_mut() {
        let content = last.content_mut();
        let keep = content.trim_end().len();
        if keep == 0 {
            segments.pop();
            continue;
        }
        content.truncate(keep);
        break;
    }
}
