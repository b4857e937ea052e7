use super::{
    cursor::Cursor,
    types::{Delimiter, Emphasis},
};

/// Splits display prose into plain, bold and italic runs.
///
/// Bold (`**`) is tried before italic (`*`) at every position. A run needs
/// non-empty content that neither starts nor ends with whitespace and holds
/// no `*`; anything else stays literal text, including unterminated
/// delimiters. Adjacent literal text is merged into one `Plain` run.
pub fn render_emphasis(s: &str) -> Vec<Emphasis> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Emphasis>, cur: &Cursor<'_>, start: usize, end: usize) {
        if end > start {
            out.push(Emphasis::Plain(cur.slice(start, end).to_string()));
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        if let Some(inner) = try_parse_run(&mut cur, Delimiter::BOLD) {
            flush_text(&mut out, &cur, text_start, start);
            out.push(Emphasis::Bold(inner.to_string()));
            text_start = cur.pos();
            continue;
        }
        if let Some(inner) = try_parse_run(&mut cur, Delimiter::ITALIC) {
            flush_text(&mut out, &cur, text_start, start);
            out.push(Emphasis::Italic(inner.to_string()));
            text_start = cur.pos();
            continue;
        }
        cur.bump_char();
    }

    flush_text(&mut out, &cur, text_start, cur.pos());
    out
}

/// Joins runs back into plain prose, dropping emphasis.
pub fn plain_text(runs: &[Emphasis]) -> String {
    runs.iter().map(Emphasis::text).collect()
}

/// Attempts to parse a `delim`-wrapped run at the cursor.
///
/// On failure the cursor is restored and `None` returned.
fn try_parse_run<'a>(cur: &mut Cursor<'a>, delim: &[u8]) -> Option<&'a str> {
    if !cur.starts_with(delim) {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(delim.len());
    let inner_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(Delimiter::MARK) {
        cur.bump_char();
    }
    let inner_end = cur.pos();

    let inner = cur.slice(inner_start, inner_end);
    let well_formed = !inner.is_empty()
        && !inner.starts_with(char::is_whitespace)
        && !inner.ends_with(char::is_whitespace);

    if !well_formed || !cur.starts_with(delim) {
        *cur = saved;
        return None;
    }
    cur.bump_n(delim.len());
    Some(inner)
}
