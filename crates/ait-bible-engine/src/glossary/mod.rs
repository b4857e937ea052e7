//! # Glossary
//!
//! Loaded glossary data plus the term probe used to annotate verse text.
//!
//! The probe ([`Glossary::match_at`]) is stateless: it looks at one offset and
//! either identifies a term whose rendering starts there or reports no match.
//! Scanning a whole string is the caller's job, see [`annotate`].
//!
//! Candidates come from an index keyed by the lowercased first word of every
//! rendering alternative. A candidate is then confirmed by the verse's lemma
//! set (when one is supplied) and by a full-phrase match followed by a word
//! boundary.

pub mod annotate;
pub mod matcher;
pub mod occurrences;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{Category, GlossaryData, GlossaryTerm};

pub use annotate::{InlineRun, TermSpan, annotate, render_verse};
pub use occurrences::lemma_only_occurrences;

use matcher::{at_boundary, leading_word, match_prefix_ignore_case};

/// Categories every glossary knows about, used when the file omits them.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 5] = [
    (
        "loanword",
        "Loanwords",
        "Greek terms retained in English because no single word captures the full meaning",
    ),
    (
        "theological",
        "Theological Terms",
        "Words where traditional translations carry theological baggage that may obscure the original sense",
    ),
    (
        "semantic-shift",
        "Semantic Shifts",
        "English words that have changed meaning since early translations, now obscuring the Greek",
    ),
    (
        "idiom",
        "Idioms & Expressions",
        "Phrases or expressions whose cultural context illuminates their meaning",
    ),
    (
        "textual-variant",
        "Textual Variants",
        "Places where manuscript evidence suggests a different reading than traditional translations",
    ),
];

/// A confirmed term at a probe offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch<'g, 't> {
    pub term: &'g GlossaryTerm,
    /// The exact text consumed, in the casing of the probed string.
    pub matched_text: &'t str,
}

#[derive(Debug, Clone, Default)]
pub struct Glossary {
    terms: Vec<GlossaryTerm>,
    categories: BTreeMap<String, Category>,
    lemma_fragments: Vec<Vec<String>>,
    by_first_word: HashMap<String, Vec<usize>>,
}

impl Glossary {
    pub fn new(data: GlossaryData) -> Self {
        let GlossaryData {
            terms,
            mut categories,
        } = data;
        for (id, name, description) in DEFAULT_CATEGORIES {
            categories.entry(id.to_string()).or_insert_with(|| Category {
                name: name.to_string(),
                description: description.to_string(),
            });
        }

        let mut by_first_word: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, term) in terms.iter().enumerate() {
            for rendering in term.renderings() {
                let Some(word) = leading_word(rendering) else {
                    continue;
                };
                let slot = by_first_word.entry(word.to_lowercase()).or_default();
                if slot.last() != Some(&index) {
                    slot.push(index);
                }
            }
        }
        let lemma_fragments = terms.iter().map(GlossaryTerm::lemma_fragments).collect();

        Self {
            terms,
            categories,
            lemma_fragments,
            by_first_word,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn terms(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, id: &str) -> Option<&GlossaryTerm> {
        self.terms.iter().find(|t| t.id == id)
    }

    pub fn categories(&self) -> &BTreeMap<String, Category> {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn terms_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a GlossaryTerm> {
        self.terms.iter().filter(move |t| t.category == category)
    }

    /// Probes `text` at byte `offset` for a glossary term.
    ///
    /// With a non-empty `lemmas` set, a candidate only matches when one of its
    /// lemma fragments overlaps (substring in either direction) one of the
    /// verse's lemmas. `None` or an empty set skips that check.
    pub fn match_at<'g, 't>(
        &'g self,
        text: &'t str,
        offset: usize,
        lemmas: Option<&BTreeSet<String>>,
    ) -> Option<TermMatch<'g, 't>> {
        let rest = text.get(offset..)?;
        let first = leading_word(rest)?.to_lowercase();
        let candidates = self.by_first_word.get(&first)?;
        let lemmas = lemmas.filter(|set| !set.is_empty());

        candidates.iter().find_map(|&index| {
            let term = &self.terms[index];
            if let Some(lemmas) = lemmas
                && !lemmas_overlap(&self.lemma_fragments[index], lemmas)
            {
                return None;
            }
            term.renderings().find_map(|rendering| {
                let len = match_prefix_ignore_case(rest, rendering)?;
                at_boundary(&rest[len..]).then(|| TermMatch {
                    term,
                    matched_text: &rest[..len],
                })
            })
        })
    }
}

fn lemmas_overlap(fragments: &[String], lemmas: &BTreeSet<String>) -> bool {
    fragments.iter().any(|fragment| {
        lemmas
            .iter()
            .any(|lemma| fragment.contains(lemma.as_str()) || lemma.contains(fragment.as_str()))
    })
}
