//! Character-level helpers for the term probe.

/// Word characters: alphanumerics plus apostrophes and hyphens.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '\'' | '\u{2019}' | '-')
}

/// The longest leading run of word characters, or `None` if `s` does not
/// start with one.
pub fn leading_word(s: &str) -> Option<&str> {
    let end = s
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(s.len(), |(i, _)| i);
    (end > 0).then(|| &s[..end])
}

/// Case-insensitive prefix match. Returns the number of bytes of `haystack`
/// consumed by `needle`.
pub fn match_prefix_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if h != n && !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}

/// True when `s` begins at a word boundary: end of text, whitespace or punctuation.
pub fn at_boundary(s: &str) -> bool {
    s.chars().next().is_none_or(|c| !is_word_char(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Messiah came", Some("Messiah"))]
    #[case("son-of-man, he", Some("son-of-man"))]
    #[case("don't go", Some("don't"))]
    #[case("Ἰησοῦς λέγει", Some("Ἰησοῦς"))]
    #[case(" leading space", None)]
    #[case(", then", None)]
    #[case("", None)]
    fn leading_words(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(leading_word(input), expected);
    }

    #[rstest]
    #[case("Gentle in strength.", "gentle in strength", Some(18))]
    #[case("GENTLE", "gentle", Some(6))]
    #[case("Ζωή αἰώνιος", "ζωή", Some("Ζωή".len()))]
    #[case("gent", "gentle", None)]
    #[case("genteel", "gentle", None)]
    fn prefix_matching(#[case] hay: &str, #[case] needle: &str, #[case] expected: Option<usize>) {
        assert_eq!(match_prefix_ignore_case(hay, needle), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case(" and", true)]
    #[case(", and", true)]
    #[case("s and", false)]
    #[case("-like", false)]
    fn boundaries(#[case] rest: &str, #[case] expected: bool) {
        assert_eq!(at_boundary(rest), expected);
    }
}
