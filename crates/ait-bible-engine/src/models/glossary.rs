use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Verses of one chapter in which a term occurs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Occurrence {
    pub book: String,
    pub chapter: u32,
    pub verses: BTreeSet<u32>,
}

/// A glossary entry, in the field layout of `glossary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: String,
    /// Original-language headword.
    #[serde(rename = "greek", default)]
    pub source_form: String,
    /// One or more dictionary forms, possibly compound (`ζωή, αἰώνιος`).
    #[serde(default)]
    pub lemma: String,
    /// Alternatives separated by [`GlossaryTerm::RENDERING_DELIMITER`].
    #[serde(rename = "aitRendering")]
    pub rendering: String,
    #[serde(rename = "traditional", default)]
    pub traditional_rendering: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "brief", default)]
    pub brief_gloss: String,
    #[serde(rename = "context", default)]
    pub extended_context: String,
    /// Verses where one of the renderings appears.
    #[serde(rename = "appearsIn", default)]
    pub appears_in: Vec<Occurrence>,
    /// Verses where the lemma appears under a different English rendering.
    #[serde(rename = "greekAppearsIn", default)]
    pub lemma_appears_in: Vec<Occurrence>,
}

impl GlossaryTerm {
    pub const RENDERING_DELIMITER: char = '/';

    /// The alternative renderings, trimmed, in declared order.
    pub fn renderings(&self) -> impl Iterator<Item = &str> {
        self.rendering
            .split(Self::RENDERING_DELIMITER)
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Lowercased parts of the lemma, split on commas, slashes and whitespace.
    pub fn lemma_fragments(&self) -> Vec<String> {
        self.lemma
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The on-disk shape of the glossary file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryData {
    pub terms: Vec<GlossaryTerm>,
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
}
