pub mod book;
pub mod glossary;
pub mod verse;

pub use book::{Book, Chapter};
pub use glossary::{Category, GlossaryData, GlossaryTerm, Occurrence};
pub use verse::{Segment, SourceToken, Verse, VerseNote, VerseProjection};
