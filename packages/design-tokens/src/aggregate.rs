//! Aggregation/dedup engine.
//!
//! One explicit type, instantiated fresh per run, instead of the ad hoc
//! frequency maps each extractor would otherwise carry. Two phases:
//! accumulate everything first, filter at the end — a value's total usage
//! across pages is only known once all pages are visited, so filtering
//! as-you-go would produce threshold errors.

use indexmap::{map::Entry, IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::error::ConvertResult;
use crate::types::token::{Token, TokenType};
use crate::types::value::CanonicalValue;

/// Page-local frequency map. Built while one page is being read and merged
/// into the run-level [`Aggregator`] afterwards; per-page extraction never
/// mutates cross-page state directly.
#[derive(Debug, Clone)]
pub struct PageTally<S> {
    entries: IndexMap<String, TallySlot<S>>,
}

#[derive(Debug, Clone)]
struct TallySlot<S> {
    sample: S,
    count: usize,
}

impl<S> PageTally<S> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Record one observation. The first sample seen for a key is kept as
    /// the representative; later observations only bump the count.
    pub fn record(&mut self, key: impl Into<String>, sample: S) {
        self.entries
            .entry(key.into())
            .and_modify(|slot| slot.count += 1)
            .or_insert_with(|| TallySlot { sample, count: 1 });
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total observations across all keys.
    pub fn total(&self) -> usize {
        self.entries.values().map(|slot| slot.count).sum()
    }
}

impl<S> Default for PageTally<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// One aggregate entry: representative sample, usage count, source pages.
#[derive(Debug, Clone)]
pub struct AggregateEntry<S> {
    pub sample: S,
    pub usage_count: usize,
    pub source_urls: IndexSet<String>,
}

/// Metadata an extractor attaches to a surviving entry when it becomes a
/// token. The canonical value and usage figures come from the engine.
#[derive(Debug, Clone)]
pub struct TokenSeed {
    pub token_type: TokenType,
    pub name: String,
    pub category: String,
    pub description: String,
    pub source: String,
}

/// Outcome of finalizing an aggregator.
#[derive(Debug, Clone)]
pub struct FinishedTokens {
    /// Sorted by descending usage count; ties keep insertion order
    pub tokens: Vec<Token>,

    /// Entries that met the threshold but failed conversion
    pub skipped_samples: usize,

    /// Entries dropped for not meeting the occurrence threshold
    pub below_threshold: usize,
}

/// Run-level aggregate map for one category (or sub-category).
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    entries: IndexMap<String, AggregateEntry<S>>,
}

impl<S> Aggregator<S> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Merge one page's tally: absent keys insert a fresh entry, present
    /// keys increment the count and union the page URL in.
    pub fn merge(&mut self, url: &str, tally: PageTally<S>) {
        for (key, slot) in tally.entries {
            match self.entries.entry(key) {
                Entry::Occupied(mut occupied) => {
                    let entry = occupied.get_mut();
                    entry.usage_count += slot.count;
                    entry.source_urls.insert(url.to_string());
                }
                Entry::Vacant(vacant) => {
                    let mut source_urls = IndexSet::new();
                    source_urls.insert(url.to_string());
                    vacant.insert(AggregateEntry {
                        sample: slot.sample,
                        usage_count: slot.count,
                        source_urls,
                    });
                }
            }
        }
    }

    /// Number of distinct entries accumulated so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Usage count for a key, if present. Mostly useful in tests.
    pub fn usage_of(&self, key: &str) -> Option<usize> {
        self.entries.get(key).map(|entry| entry.usage_count)
    }

    /// Finalize: threshold filter, convert, name, sort, de-duplicate names.
    ///
    /// `convert` maps the representative sample to its typed value;
    /// failures skip the entry (logged, counted). `build` supplies the
    /// token metadata for a successfully converted entry.
    pub fn finish<V, C, B>(
        self,
        minimum_occurrences: usize,
        mut convert: C,
        mut build: B,
    ) -> FinishedTokens
    where
        V: Into<CanonicalValue>,
        C: FnMut(&S) -> ConvertResult<V>,
        B: FnMut(&S, &V) -> TokenSeed,
    {
        let mut tokens = Vec::new();
        let mut skipped_samples = 0;
        let mut below_threshold = 0;

        for (key, entry) in self.entries {
            if entry.usage_count < minimum_occurrences {
                below_threshold += 1;
                continue;
            }

            let value = match convert(&entry.sample) {
                Ok(value) => value,
                Err(error) => {
                    warn!(key = %key, error = %error, "skipping unconvertible value");
                    skipped_samples += 1;
                    continue;
                }
            };

            let seed = build(&entry.sample, &value);
            tokens.push(Token {
                token_type: seed.token_type,
                name: seed.name,
                value: value.into(),
                category: seed.category,
                description: seed.description,
                usage_count: entry.usage_count,
                source: seed.source,
                source_urls: entry.source_urls.into_iter().collect(),
            });
        }

        // Vec::sort_by is stable: ties keep insertion (source) order.
        tokens.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        dedupe_names(&mut tokens);

        FinishedTokens {
            tokens,
            skipped_samples,
            below_threshold,
        }
    }
}

impl<S> Default for Aggregator<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffix repeated names so every emitted token name is unique within its
/// report, without disturbing the first occurrence.
fn dedupe_names(tokens: &mut [Token]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();

    for token in tokens.iter_mut() {
        let base = token.name.clone();
        let count = counts.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 && !taken.contains(&base) {
            taken.insert(base);
            continue;
        }

        let mut suffix = *count;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !taken.contains(&candidate) {
                taken.insert(candidate.clone());
                token.name = candidate;
                break;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::types::value::DimensionValue;
    use proptest::prelude::*;

    fn tally(samples: &[(&str, &str)]) -> PageTally<String> {
        let mut tally = PageTally::new();
        for (key, sample) in samples {
            tally.record(*key, sample.to_string());
        }
        tally
    }

    fn dimension_seed(_sample: &String, value: &DimensionValue) -> TokenSeed {
        TokenSeed {
            token_type: TokenType::Dimension,
            name: format!("spacing-{}", value.value),
            category: "spacing".into(),
            description: String::new(),
            source: "margin".into(),
        }
    }

    #[test]
    fn test_merge_counts_and_unions_urls() {
        let mut aggregator: Aggregator<String> = Aggregator::new();
        aggregator.merge("https://a/", tally(&[("16px", "16px"), ("16px", "16px")]));
        aggregator.merge("https://b/", tally(&[("16px", "16px"), ("8px", "8px")]));

        assert_eq!(aggregator.usage_of("16px"), Some(3));
        assert_eq!(aggregator.usage_of("8px"), Some(1));
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn test_threshold_filters_after_accumulation() {
        let mut aggregator: Aggregator<String> = Aggregator::new();
        aggregator.merge("https://a/", tally(&[("16px", "16px")]));
        aggregator.merge("https://b/", tally(&[("16px", "16px"), ("8px", "8px")]));

        let finished = aggregator.finish(
            2,
            |raw| crate::convert::parse_dimension(raw),
            dimension_seed,
        );

        assert_eq!(finished.tokens.len(), 1);
        assert_eq!(finished.tokens[0].usage_count, 2);
        assert_eq!(finished.below_threshold, 1);
        assert_eq!(
            finished.tokens[0].source_urls,
            vec!["https://a/".to_string(), "https://b/".to_string()]
        );
    }

    #[test]
    fn test_conversion_failure_skips_entry() {
        let mut aggregator: Aggregator<String> = Aggregator::new();
        aggregator.merge("https://a/", tally(&[("auto", "auto"), ("4px", "4px")]));

        let finished = aggregator.finish(
            1,
            |raw| crate::convert::parse_dimension(raw),
            dimension_seed,
        );

        assert_eq!(finished.tokens.len(), 1);
        assert_eq!(finished.skipped_samples, 1);
    }

    #[test]
    fn test_sorted_by_usage_descending() {
        let mut aggregator: Aggregator<String> = Aggregator::new();
        let mut page = PageTally::new();
        for _ in 0..3 {
            page.record("8px", "8px".to_string());
        }
        page.record("16px", "16px".to_string());
        aggregator.merge("https://a/", page);

        let finished = aggregator.finish(
            1,
            |raw| crate::convert::parse_dimension(raw),
            dimension_seed,
        );

        assert_eq!(finished.tokens[0].usage_count, 3);
        assert_eq!(finished.tokens[1].usage_count, 1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut aggregator: Aggregator<String> = Aggregator::new();
        aggregator.merge("https://a/", tally(&[("16px", "16px"), ("8px", "8px")]));

        let finished = aggregator.finish(
            1,
            |raw| crate::convert::parse_dimension(raw),
            dimension_seed,
        );

        assert_eq!(finished.tokens[0].name, "spacing-16");
        assert_eq!(finished.tokens[1].name, "spacing-8");
    }

    #[test]
    fn test_colliding_names_get_suffixes() {
        let mut aggregator: Aggregator<String> = Aggregator::new();
        aggregator.merge(
            "https://a/",
            tally(&[("16px", "16px"), ("1rem", "1rem"), ("1em", "1em")]),
        );

        let finished = aggregator.finish(
            1,
            |raw| crate::convert::parse_dimension(raw),
            |_, _value: &DimensionValue| TokenSeed {
                token_type: TokenType::Dimension,
                name: "spacing-4".into(),
                category: "spacing".into(),
                description: String::new(),
                source: "margin".into(),
            },
        );

        let names: Vec<_> = finished.tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["spacing-4", "spacing-4-2", "spacing-4-3"]);
    }

    proptest! {
        /// Final usage count for a key equals the number of samples fed in
        /// under that key, and source_urls is the union of contributing
        /// pages.
        #[test]
        fn prop_usage_is_sum_and_urls_are_union(
            observations in proptest::collection::vec((0usize..4, 0usize..3), 0..60)
        ) {
            let keys = ["4px", "8px", "16px", "32px"];
            let urls = ["https://a/", "https://b/", "https://c/"];

            let mut aggregator: Aggregator<String> = Aggregator::new();
            let mut expected_counts = HashMap::new();
            let mut expected_urls: HashMap<&str, HashSet<&str>> = HashMap::new();

            for url_index in 0..urls.len() {
                let mut page = PageTally::new();
                for (key_index, observation_url) in &observations {
                    if *observation_url == url_index {
                        let key = keys[*key_index];
                        page.record(key, key.to_string());
                        *expected_counts.entry(key).or_insert(0usize) += 1;
                        expected_urls.entry(key).or_default().insert(urls[url_index]);
                    }
                }
                if !page.is_empty() {
                    aggregator.merge(urls[url_index], page);
                }
            }

            for key in keys {
                prop_assert_eq!(aggregator.usage_of(key), expected_counts.get(key).copied());
            }

            let finished = aggregator.finish(
                1,
                |raw| crate::convert::parse_dimension(raw),
                dimension_seed,
            );

            for token in &finished.tokens {
                let key = format!("{}px", match &token.value {
                    CanonicalValue::Dimension(dimension) => dimension.value,
                    _ => unreachable!(),
                });
                let expected: HashSet<&str> = expected_urls.remove(key.as_str()).unwrap_or_default();
                let actual: HashSet<&str> =
                    token.source_urls.iter().map(String::as_str).collect();
                prop_assert_eq!(actual, expected);
            }
        }

        /// Entries appear in the output iff they meet the threshold, and
        /// the output is sorted by descending usage.
        #[test]
        fn prop_threshold_and_sort(
            counts in proptest::collection::vec(1usize..6, 1..5),
            threshold in 1usize..4,
        ) {
            let keys = ["1px", "2px", "4px", "8px", "16px"];
            let mut page = PageTally::new();
            for (index, count) in counts.iter().enumerate() {
                for _ in 0..*count {
                    page.record(keys[index], keys[index].to_string());
                }
            }

            let mut aggregator: Aggregator<String> = Aggregator::new();
            aggregator.merge("https://a/", page);

            let finished = aggregator.finish(
                threshold,
                |raw| crate::convert::parse_dimension(raw),
                dimension_seed,
            );

            let expected_emitted = counts.iter().filter(|c| **c >= threshold).count();
            prop_assert_eq!(finished.tokens.len(), expected_emitted);
            prop_assert_eq!(
                finished.below_threshold,
                counts.len() - expected_emitted
            );

            for pair in finished.tokens.windows(2) {
                prop_assert!(pair[0].usage_count >= pair[1].usage_count);
            }
        }
    }
}
