//! Matcher - query/target comparison producing scores and highlight ranges

use std::ops::Range;

use serde::{Serialize, Serializer};

use super::align::{align, MatchingStrategy};
use super::ranges::{map_ranges, slice_chars};
use super::score;
use crate::tokenize::{tokenize, Token};

/// Result of comparing one query with one target string.
///
/// Ranges are `[start, end)` char offsets into the original strings, merged
/// into maximal spans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatchResult {
    pub score: f64,
    pub query: String,
    pub target: String,
    #[serde(serialize_with = "serialize_spans")]
    pub query_ranges: Vec<Range<usize>>,
    #[serde(serialize_with = "serialize_spans")]
    pub target_ranges: Vec<Range<usize>>,
    pub reversed_count: usize,
}

impl FuzzyMatchResult {
    fn unmatched(query: &str, target: &str) -> Self {
        Self {
            score: 0.0,
            query: query.to_string(),
            target: target.to_string(),
            query_ranges: Vec::new(),
            target_ranges: Vec::new(),
            reversed_count: 0,
        }
    }

    /// Highlighted pieces of the query, in order
    pub fn query_fragments(&self) -> Vec<&str> {
        self.query_ranges
            .iter()
            .map(|r| slice_chars(&self.query, r.clone()))
            .collect()
    }

    /// Highlighted pieces of the target, in order
    pub fn target_fragments(&self) -> Vec<&str> {
        self.target_ranges
            .iter()
            .map(|r| slice_chars(&self.target, r.clone()))
            .collect()
    }
}

fn serialize_spans<S: Serializer>(ranges: &[Range<usize>], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(ranges.iter().map(|r| [r.start, r.end]))
}

/// A tokenized query, reusable across many targets
#[derive(Debug, Clone)]
pub struct Matcher {
    query: String,
    tokens: Vec<Token>,
}

impl Matcher {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            tokens: tokenize(query),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Winning alignment against an already tokenized target
    pub fn strategy(&self, target_tokens: &[Token]) -> MatchingStrategy {
        align(&self.tokens, target_tokens)
    }

    /// Score `target` and locate the matched text on both sides
    pub fn match_target(&self, target: &str) -> FuzzyMatchResult {
        let target_tokens = tokenize(target);
        if target_tokens.is_empty() {
            return FuzzyMatchResult::unmatched(&self.query, target);
        }

        let strategy = self.strategy(&target_tokens);
        let ranges = map_ranges(&strategy, &self.query, &self.tokens, target, &target_tokens);
        let score = strategy.score * score::missed_penalty(ranges.missed_query_tokens);

        FuzzyMatchResult {
            score,
            query: self.query.clone(),
            target: target.to_string(),
            query_ranges: ranges.query,
            target_ranges: ranges.target,
            reversed_count: strategy.reversed_count,
        }
    }
}

/// Compare a single query/target pair
pub fn fuzzy_match(query: &str, target: &str) -> FuzzyMatchResult {
    Matcher::new(query).match_target(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_match() {
        let result = fuzzy_match("Tell Your World", "Tell Your World");
        assert_eq!(result.score, 1.0);
        assert_eq!(result.query_ranges, vec![0..15]);
        assert_eq!(result.target_ranges, vec![0..15]);
    }

    #[test]
    fn test_empty_target() {
        let result = fuzzy_match("anything", "");
        assert_eq!(result.score, 0.0);
        assert!(result.query_ranges.is_empty());
        assert!(result.target_ranges.is_empty());
    }

    #[test]
    fn test_whitespace_only_target() {
        let result = fuzzy_match("a", "   ");
        assert_eq!(result.score, 0.0);
        assert!(result.target_ranges.is_empty());
    }

    #[test]
    fn test_empty_query() {
        let result = fuzzy_match("", "しゃけ");
        assert_eq!(result.score, 0.0);
        assert!(result.query_ranges.is_empty());
    }

    #[test]
    fn test_romaji_against_kana() {
        let result = fuzzy_match("shake", "しゃけ");
        assert!((result.score - 0.9).abs() < 1e-9);
        assert_eq!(result.query_ranges, vec![0..5]);
        assert_eq!(result.target_ranges, vec![0..3]);
        assert_eq!(result.target_fragments(), vec!["しゃけ"]);
    }

    #[test]
    fn test_ranges_respect_untrimmed_input() {
        let result = fuzzy_match("  hi", "say hi ");
        assert_eq!(result.query_ranges, vec![2..4]);
        assert_eq!(result.query_fragments(), vec!["hi"]);
        assert_eq!(result.target_fragments(), vec!["hi"]);
    }

    #[test]
    fn test_missed_tokens_penalize() {
        let result = fuzzy_match("abzc", "abc");
        assert!((result.score - 0.9).abs() < 1e-9);
        assert_eq!(result.query_ranges, vec![0..2, 3..4]);
    }

    #[test]
    fn test_serialized_shape() {
        let result = fuzzy_match("ab", "ab");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["query_ranges"], serde_json::json!([[0, 2]]));
        assert_eq!(json["score"], serde_json::json!(1.0));
    }
}
