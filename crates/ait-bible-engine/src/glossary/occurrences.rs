use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Book, GlossaryTerm, Occurrence};

/// Verses where a term's lemma occurs under a different English rendering.
///
/// A verse qualifies when its source tokens carry one of the term's lemma
/// fragments, none of the term's renderings appears in its text, and it is not
/// already listed in `appears_in`. Results are grouped per chapter and sorted.
pub fn lemma_only_occurrences<'a>(
    term: &GlossaryTerm,
    books: impl IntoIterator<Item = &'a Book>,
) -> Vec<Occurrence> {
    let fragments = term.lemma_fragments();
    if fragments.is_empty() {
        return vec![];
    }
    let renderings: Vec<String> = term.renderings().map(str::to_lowercase).collect();
    let already_listed: BTreeSet<(&str, u32, u32)> = term
        .appears_in
        .iter()
        .flat_map(|o| o.verses.iter().map(move |&v| (o.book.as_str(), o.chapter, v)))
        .collect();

    let mut grouped: BTreeMap<(String, u32), BTreeSet<u32>> = BTreeMap::new();
    for book in books {
        for (chapter, verse) in book.verses() {
            if already_listed.contains(&(book.id.as_str(), chapter, verse.number())) {
                continue;
            }
            let lemmas = verse.lemma_set();
            if !fragments.iter().any(|f| lemmas.contains(f)) {
                continue;
            }
            let text = verse.text().to_lowercase();
            if renderings.iter().any(|r| text.contains(r.as_str())) {
                continue;
            }
            grouped
                .entry((book.id.clone(), chapter))
                .or_default()
                .insert(verse.number());
        }
    }

    grouped
        .into_iter()
        .map(|((book, chapter), verses)| Occurrence {
            book,
            chapter,
            verses,
        })
        .collect()
}
