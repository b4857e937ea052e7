//! Shared fixtures for unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use tempfile::TempDir;

use crate::glossary::Glossary;
use crate::models::{GlossaryData, GlossaryTerm, Occurrence};

/// A small Matthew with three chapters, one unusable chapter and one unusable verse.
pub const SAMPLE_BOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ait version="1.0">
  <book id="matthew" name="Matthew">
    <chapter num="1">
      <verse num="1">
        <text><p/>The book of the genealogy of Jesus the Messiah, the son of David.</text>
        <greek><w lemma="βίβλος">Βίβλος</w> <w lemma="Χριστός">Χριστοῦ</w></greek>
        <note term="Messiah">Greek *Christos*, the **anointed** one.</note>
      </verse>
      <verse num="16">
        <text>Jacob fathered Joseph the husband of Mary, of whom was born Jesus, who is called Messiah.</text>
        <greek><w lemma="Χριστός">Χριστός</w></greek>
      </verse>
      <verse num="17">
        <text>So all the generations from the deportation to the Anointed King were fourteen.</text>
        <greek><w lemma="Χριστός">Χριστοῦ</w></greek>
      </verse>
      <verse num="18">
        <text><p/>Now the birth of Jesus took place in this way.</text>
        <note>Some manuscripts read &quot;the Messiah Jesus&quot;.</note>
      </verse>
    </chapter>
    <chapter num="x">
      <verse num="1"><text>lost</text></verse>
    </chapter>
    <chapter num="5">
      <verse num="5">
        <text><p/><q who="Jesus">Blessed are the gentle in strength, for they will inherit the earth.</q></text>
        <greek><w lemma="μακάριος">Μακάριοι</w> <w lemma="πραΰς">πραεῖς</w></greek>
        <note term="gentle in strength">Not weakness but *strength under control*.</note>
      </verse>
      <verse num="0"><text>skipped</text></verse>
      <verse num="6"/>
    </chapter>
    <chapter num="16">
      <verse num="15">
        <text><p/>He said to them, <q who="Jesus">But who do you say that I am?</q></text>
      </verse>
      <verse num="16">
        <text>Simon Peter answered, <q who="Peter">You are the Messiah, the Son of the living God.</q></text>
        <greek><w lemma="Χριστός">Χριστός</w> <w lemma="θεός">θεοῦ</w></greek>
      </verse>
    </chapter>
  </book>
</ait>
"#;

pub fn term(id: &str, rendering: &str, lemma: &str) -> GlossaryTerm {
    GlossaryTerm {
        id: id.into(),
        source_form: lemma.into(),
        lemma: lemma.into(),
        rendering: rendering.into(),
        traditional_rendering: String::new(),
        category: String::new(),
        brief_gloss: String::new(),
        extended_context: String::new(),
        appears_in: vec![],
        lemma_appears_in: vec![],
    }
}

/// Two terms: a loanword with alternatives and a multi-word semantic shift.
pub fn sample_glossary() -> Glossary {
    let mut messiah = term("messiah-christos", "Messiah / Anointed One", "Χριστός");
    messiah.category = "loanword".into();
    messiah.traditional_rendering = "Christ".into();
    messiah.brief_gloss = "The *anointed* one".into();
    messiah.appears_in = vec![Occurrence {
        book: "matthew".into(),
        chapter: 1,
        verses: BTreeSet::from([16]),
    }];

    let mut gentle = term("gentle-praus", "gentle in strength", "πραΰς");
    gentle.category = "semantic-shift".into();
    gentle.traditional_rendering = "meek".into();

    Glossary::new(GlossaryData {
        terms: vec![messiah, gentle],
        categories: BTreeMap::new(),
    })
}

/// Creates an empty data directory.
pub fn create_test_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Writes a file into a test data directory.
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("Failed to write test file");
}
