use serde::Serialize;

/// One run of display prose with its emphasis.
///
/// Serializes externally tagged: `{"bold": ".."}`, `{"italic": ".."}`, `{"plain": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Plain(String),
    Bold(String),
    Italic(String),
}

impl Emphasis {
    pub fn text(&self) -> &str {
        match self {
            Emphasis::Plain(s) | Emphasis::Bold(s) | Emphasis::Italic(s) => s,
        }
    }
}

/// Emphasis delimiters, longest first.
pub struct Delimiter;

impl Delimiter {
    pub const BOLD: &'static [u8] = b"**";
    pub const ITALIC: &'static [u8] = b"*";
    pub const MARK: u8 = b'*';
}
