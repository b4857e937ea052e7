pub mod export;
pub mod glossary;
pub mod grouping;
pub mod io;
pub mod models;
pub mod parsing;
pub mod projection;
pub mod search;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use export::{BookExport, ChapterExport, VerseExport, export_book};
pub use glossary::{Glossary, InlineRun, TermMatch, TermSpan, annotate, lemma_only_occurrences, render_verse};
pub use grouping::{StartsParagraph, group_paragraphs};
pub use io::*;
pub use models::*;
pub use parsing::{ParseError, parse_book};
pub use projection::project_verse;
pub use search::{SearchHit, search};
