// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use ait_bible_engine::{Glossary, GlossaryData, GlossaryTerm};

#[allow(dead_code)]
pub fn generate_book_xml(chapters: usize, verses_per_chapter: usize) -> String {
    let mut xml = String::from(r#"<ait version="1.0"><book id="bench" name="Bench">"#);
    for chapter in 1..=chapters {
        xml.push_str(&format!(r#"<chapter num="{chapter}">"#));
        for verse in 1..=verses_per_chapter {
            let paragraph = if verse % 4 == 1 { "<p/>" } else { "" };
            xml.push_str(&format!(
                r#"<verse num="{verse}"><text>{paragraph}Then he said, <q who="Jesus">The **kingdom** is near; the Messiah comes, <q who="scripture">gentle in strength</q>.</q> And they marveled.</text><greek><w lemma="βασιλεία">βασιλεία</w><w lemma="Χριστός">Χριστός</w><w lemma="πραΰς">πραΰς</w></greek><note term="Messiah">The *anointed* one.</note></verse>"#
            ));
        }
        xml.push_str("</chapter>");
    }
    xml.push_str("</book></ait>");
    xml
}

#[allow(dead_code)]
pub fn generate_glossary(filler_terms: usize) -> Glossary {
    let term = |id: String, rendering: &str, lemma: &str| GlossaryTerm {
        id,
        source_form: lemma.to_string(),
        lemma: lemma.to_string(),
        rendering: rendering.to_string(),
        traditional_rendering: String::new(),
        category: "theological".to_string(),
        brief_gloss: String::new(),
        extended_context: String::new(),
        appears_in: vec![],
        lemma_appears_in: vec![],
    };
    let mut terms = vec![
        term("messiah".into(), "Messiah / Anointed One", "Χριστός"),
        term("gentle".into(), "gentle in strength", "πραΰς"),
        term("kingdom".into(), "kingdom of God / reign", "βασιλεία"),
    ];
    for i in 0..filler_terms {
        terms.push(term(format!("filler-{i}"), &format!("filler{i} phrase"), "λόγος"));
    }
    Glossary::new(GlossaryData {
        terms,
        categories: Default::default(),
    })
}
