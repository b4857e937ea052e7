//! Whole-document tests for the book reader.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::models::{Segment, SourceToken, VerseNote};
use crate::parsing::parse_book;
use crate::tests::SAMPLE_BOOK;

fn wrap_chapter(verses: &str) -> String {
    format!(r#"<ait version="1.0"><book id="john" name="John"><chapter num="1">{verses}</chapter></book></ait>"#)
}

#[test]
fn sample_book_structure() {
    let book = parse_book(SAMPLE_BOOK).unwrap().unwrap();
    invariants::check(&book);

    assert_eq!(book.id, "matthew");
    assert_eq!(book.name, "Matthew");
    let shape: Vec<(u32, Vec<u32>)> = book
        .chapters
        .iter()
        .map(|c| (c.number, c.verses.iter().map(|v| v.number()).collect()))
        .collect();
    assert_eq!(
        shape,
        vec![(1, vec![1, 16, 17, 18]), (5, vec![5, 6]), (16, vec![15, 16])]
    );
}

#[test]
fn verse_facets_are_all_read() {
    let book = parse_book(SAMPLE_BOOK).unwrap().unwrap();
    let verse = book.verse(1, 1).unwrap();

    assert_eq!(
        verse.text(),
        "The book of the genealogy of Jesus the Messiah, the son of David."
    );
    assert!(verse.projection.paragraph_start);
    assert_eq!(
        verse.source_tokens,
        vec![
            SourceToken::new("Βίβλος", "βίβλος"),
            SourceToken::new("Χριστοῦ", "Χριστός"),
        ]
    );
    assert_eq!(
        verse.notes,
        vec![VerseNote {
            term: "Messiah".into(),
            explanation: "Greek Christos, the anointed one.".into(),
        }]
    );
}

#[test]
fn empty_verse_is_kept() {
    let book = parse_book(SAMPLE_BOOK).unwrap().unwrap();
    let verse = book.verse(5, 6).unwrap();
    assert_eq!(verse.text(), "");
    assert!(verse.segments().is_empty());
    assert!(!verse.projection.has_speaker);
    assert!(verse.source_tokens.is_empty());
    assert!(verse.notes.is_empty());
}

#[test]
fn open_empty_verse_is_kept() {
    let book = parse_book(&wrap_chapter(r#"<verse num="1"></verse><verse num="2"><text/></verse>"#))
        .unwrap()
        .unwrap();
    let texts: Vec<_> = book.chapters[0].verses.iter().map(|v| v.text()).collect();
    assert_eq!(texts, vec!["", ""]);
}

#[test]
fn speakers_survive_the_whole_pipeline() {
    let book = parse_book(SAMPLE_BOOK).unwrap().unwrap();
    let verse = book.verse(16, 15).unwrap();
    assert_eq!(
        verse.segments(),
        &[
            Segment::text("He said to them, "),
            Segment::speaker("Jesus", "But who do you say that I am?"),
        ]
    );
    assert!(verse.projection.has_speaker);
}

#[test]
fn paragraphs_follow_flags() {
    let book = parse_book(SAMPLE_BOOK).unwrap().unwrap();
    let paragraphs: Vec<Vec<u32>> = book
        .chapter(1)
        .unwrap()
        .paragraphs()
        .iter()
        .map(|p| p.iter().map(|v| v.number()).collect())
        .collect();
    assert_eq!(paragraphs, vec![vec![1, 16, 17], vec![18]]);
}

#[rstest]
#[case::no_root("<book id=\"x\"><chapter num=\"1\"/></book>")]
#[case::wrong_root("<bible><book id=\"x\"/></bible>")]
#[case::no_book(r#"<ait version="1.0"><meta/></ait>"#)]
#[case::empty_root(r#"<ait version="1.0"/>"#)]
#[case::empty_document("")]
fn absent_book_is_none(#[case] xml: &str) {
    assert_eq!(parse_book(xml).unwrap(), None);
}

#[rstest]
#[case::unclosed_book(r#"<ait><book id="x"><chapter num="1"><verse num="1"><text>a</text></verse>"#)]
#[case::mismatched(r#"<ait><book id="x"><chapter num="1"></verse></chapter></book></ait>"#)]
#[case::unclosed_quote(r#"<ait><book id="x"><chapter num="1"><verse num="1"><text><q who="A">a</text></verse></chapter></book></ait>"#)]
fn malformed_document_is_error(#[case] xml: &str) {
    assert!(parse_book(xml).is_err());
}

#[rstest]
#[case::missing(r#"<verse><text>a</text></verse>"#)]
#[case::zero(r#"<verse num="0"><text>a</text></verse>"#)]
#[case::negative(r#"<verse num="-2"><text>a</text></verse>"#)]
#[case::word(r#"<verse num="one"><text>a</text></verse>"#)]
fn unusable_verse_numbers_are_skipped(#[case] bad: &str) {
    let xml = wrap_chapter(&format!(r#"{bad}<verse num="2"><text>kept</text></verse>"#));
    let book = parse_book(&xml).unwrap().unwrap();
    let verses: Vec<_> = book.chapters[0].verses.iter().map(|v| (v.number(), v.text())).collect();
    assert_eq!(verses, vec![(2, "kept")]);
}

#[test]
fn missing_book_name_falls_back_to_id() {
    let book = parse_book(r#"<ait><book id="jude"></book></ait>"#).unwrap().unwrap();
    assert_eq!(book.name, "jude");
    assert!(book.chapters.is_empty());
}

#[test]
fn unknown_containers_are_ignored() {
    let xml = wrap_chapter(
        r#"<heading>Prologue</heading><verse num="1"><xref>Gen 1:1</xref><text>In the beginning</text></verse>"#,
    );
    let book = parse_book(&xml).unwrap().unwrap();
    assert_eq!(book.chapters[0].verses.len(), 1);
    assert_eq!(book.chapters[0].verses[0].text(), "In the beginning");
}

#[test]
fn entities_are_unescaped() {
    let xml = wrap_chapter(
        r#"<verse num="1"><text>&quot;Rabbi&quot; &amp; &#8220;Teacher&#8221;</text><note term="A&amp;B">x &lt; y</note></verse>"#,
    );
    let book = parse_book(&xml).unwrap().unwrap();
    let verse = &book.chapters[0].verses[0];
    assert_eq!(verse.text(), "\"Rabbi\" & \u{201c}Teacher\u{201d}");
    assert_eq!(verse.notes[0].term, "A&B");
    assert_eq!(verse.notes[0].explanation, "x < y");
}

#[test]
fn markup_inside_text_is_stripped() {
    let xml = wrap_chapter(r#"<verse num="1"><text>the **Word** was *with* [GOD]God[/GOD]</text></verse>"#);
    let book = parse_book(&xml).unwrap().unwrap();
    assert_eq!(book.chapters[0].verses[0].text(), "the Word was with God");
}
