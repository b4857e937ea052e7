//! Markup stripping for prose extracted from structured containers.
//!
//! Removes `**bold**` and `*italic*` delimiters (keeping their content) and
//! scrubs leftover bracketed speaker tags such as `[JESUS]` or
//! `[SPEAKER:Peter]…[/SPEAKER]`. Bold is removed before italic so the
//! single-asterisk pass never sees half of a double-asterisk pair.

use std::sync::OnceLock;

use regex::Regex;

fn bold_regex() -> &'static Regex {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    BOLD_REGEX.get_or_init(|| {
        Regex::new(r"\*\*([^*\s](?:[^*]*[^*\s])?)\*\*").expect("Invalid bold regex")
    })
}

fn italic_regex() -> &'static Regex {
    static ITALIC_REGEX: OnceLock<Regex> = OnceLock::new();
    ITALIC_REGEX.get_or_init(|| {
        Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("Invalid italic regex")
    })
}

fn speaker_tag_regex() -> &'static Regex {
    static SPEAKER_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    SPEAKER_TAG_REGEX.get_or_init(|| {
        Regex::new(r"\[/?(?:JESUS|GOD|ANGEL|SCRIPTURE|CROWD|SPEAKER)(?::[^\]]*)?\]")
            .expect("Invalid speaker tag regex")
    })
}

/// Strips emphasis delimiters and speaker-tag remnants from `text`.
///
/// Passes repeat until the text is stable, so stripping is idempotent.
/// Unterminated delimiters are left in place.
pub fn strip_markup(text: &str) -> String {
    let mut current = strip_pass(text);
    loop {
        let next = strip_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_pass(text: &str) -> String {
    let scrubbed = speaker_tag_regex().replace_all(text, "");
    let unbolded = bold_regex().replace_all(&scrubbed, "${1}");
    italic_regex().replace_all(&unbolded, "${1}").into_owned()
}
