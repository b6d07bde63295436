//! Keyword Overlap Matcher
//!
//! Placeholder relevance heuristic: a candidate is relevant when it shares
//! at least three non-stopword tokens with the new jab.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::ports::RelevanceMatcher;

/// Minimum shared non-stopword tokens for a citation (inclusive)
pub const DEFAULT_MIN_OVERLAP: usize = 3;

/// Common English function words ignored when measuring overlap
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "shall",
    "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
    "during", "before", "after", "and", "but", "or", "not", "no", "it", "its", "this", "that",
    "i", "you", "we", "they", "he", "she", "my", "your",
];

/// Lowercased, whitespace-delimited token set
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Token-overlap relevance scorer
#[derive(Debug, Clone)]
pub struct KeywordOverlapMatcher {
    min_overlap: usize,
    stopwords: HashSet<&'static str>,
}

impl KeywordOverlapMatcher {
    pub fn new() -> Self {
        Self {
            min_overlap: DEFAULT_MIN_OVERLAP,
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }

    /// Override the overlap threshold
    pub fn with_min_overlap(mut self, min_overlap: usize) -> Self {
        self.min_overlap = min_overlap;
        self
    }

    /// Shared tokens between two texts with stopwords removed
    pub fn meaningful_overlap(&self, a: &str, b: &str) -> BTreeSet<String> {
        let a = tokenize(a);
        let b = tokenize(b);
        a.intersection(&b)
            .filter(|token| !self.stopwords.contains(token.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for KeywordOverlapMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceMatcher for KeywordOverlapMatcher {
    fn find_relevant(
        &self,
        content: &str,
        candidates: &BTreeMap<String, String>,
        exclude: Option<&str>,
    ) -> BTreeSet<String> {
        let content_tokens = tokenize(content);

        candidates
            .iter()
            .filter(|(id, _)| exclude != Some(id.as_str()))
            .filter(|(_, text)| {
                let overlap = tokenize(text)
                    .intersection(&content_tokens)
                    .filter(|token| !self.stopwords.contains(token.as_str()))
                    .count();
                overlap >= self.min_overlap
            })
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn test_three_shared_tokens_is_relevant() {
        let matcher = KeywordOverlapMatcher::new();
        let seen = candidates(&[("x", "the quick brown fox jumps over the lazy dog")]);

        let result = matcher.find_relevant("a quick brown fox runs fast", &seen, None);
        assert_eq!(result.into_iter().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_two_shared_tokens_is_not_relevant() {
        let matcher = KeywordOverlapMatcher::new();
        let seen = candidates(&[("x", "the quick brown dog")]);

        // "the" is shared too but is a stopword
        let result = matcher.find_relevant("the quick brown cat", &seen, None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_stopwords_do_not_count() {
        let matcher = KeywordOverlapMatcher::new();
        let seen = candidates(&[("x", "it is what we should have done and you know")]);

        let result = matcher.find_relevant("it is what we should have done", &seen, None);
        // shared non-stopwords: "what", "done"
        assert!(result.is_empty());
        assert_eq!(
            matcher.meaningful_overlap("it is what we should have done", "it is what we done"),
            ["done", "what"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<String>>()
        );
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = KeywordOverlapMatcher::new();
        let seen = candidates(&[("x", "Apple Banana Cherry")]);

        let result = matcher.find_relevant("apple BANANA cherry pie", &seen, None);
        assert!(result.contains("x"));
    }

    #[test]
    fn test_excluded_identifier_never_cited() {
        let matcher = KeywordOverlapMatcher::new();
        let seen = candidates(&[
            ("me", "rust borrow checker lifetimes"),
            ("other", "rust borrow checker lifetimes"),
        ]);

        let result = matcher.find_relevant("rust borrow checker lifetimes", &seen, Some("me"));
        assert!(!result.contains("me"));
        assert!(result.contains("other"));
    }

    #[test]
    fn test_multiple_candidates_and_empty_store() {
        let matcher = KeywordOverlapMatcher::new();
        assert!(matcher
            .find_relevant("anything at all here", &BTreeMap::new(), None)
            .is_empty());

        let seen = candidates(&[
            ("a", "solar panels battery storage grid"),
            ("b", "battery storage grid inverter"),
            ("c", "cooking pasta tonight"),
        ]);
        let result = matcher.find_relevant("grid battery storage costs", &seen, None);
        assert_eq!(result.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_punctuation_is_part_of_token() {
        let matcher = KeywordOverlapMatcher::new();
        let seen = candidates(&[("x", "quick brown fox.")]);

        // "fox." and "fox" are different tokens
        let result = matcher.find_relevant("quick brown fox", &seen, None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let matcher = KeywordOverlapMatcher::new().with_min_overlap(1);
        let seen = candidates(&[("x", "telescope")]);
        assert!(matcher.find_relevant("new telescope", &seen, None).contains("x"));
    }

    #[test]
    fn test_stopword_list_size() {
        assert_eq!(STOPWORDS.len(), 56);
    }
}
