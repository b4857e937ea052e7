//! # Emphasis Rendering
//!
//! Cursor-based splitting of note and glossary prose into emphasis runs.
//!
//! Unlike [`strip_markup`](crate::parsing::strip::strip_markup), which discards
//! delimiters to produce plain text, rendering keeps the bold/italic
//! distinction for presentation. It is not part of the verse plain-text
//! contract.
//!
//! - **`types`**: `Emphasis` enum (Plain, Bold, Italic) and delimiters
//! - **`cursor`**: `Cursor` for byte-wise scanning
//! - **`parser`**: `render_emphasis()` entry point

pub mod cursor;
pub mod parser;
pub mod types;

pub use parser::{plain_text, render_emphasis};
pub use types::Emphasis;
