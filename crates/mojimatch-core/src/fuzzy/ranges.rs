//! Range mapping: token-index matches back to char offsets
//!
//! Offsets count chars of the original, untrimmed string, so a caller can
//! highlight exactly the text the user sees.

use std::ops::Range;

use super::align::MatchingStrategy;
use crate::tokenize::{leading_whitespace, Token};

/// Sort by start and merge adjacent or overlapping ranges into maximal spans
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.end >= range.start => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Prefix sums of token char lengths, seeded with the whitespace trimmed off
/// the front of the source string
#[derive(Debug, Clone)]
pub struct OffsetMap {
    prefix: Vec<usize>,
}

impl OffsetMap {
    pub fn new(text: &str, tokens: &[Token]) -> Self {
        let mut prefix = Vec::with_capacity(tokens.len() + 1);
        let mut offset = leading_whitespace(text);
        prefix.push(offset);
        for token in tokens {
            offset += token.char_len();
            prefix.push(offset);
        }
        Self { prefix }
    }

    /// Char range covered by the token range `tokens`
    pub fn char_range(&self, tokens: Range<usize>) -> Range<usize> {
        self.prefix[tokens.start]..self.prefix[tokens.end]
    }
}

/// Highlight spans on both sides plus the query tokens nothing covered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedRanges {
    pub query: Vec<Range<usize>>,
    pub target: Vec<Range<usize>>,
    pub missed_query_tokens: usize,
}

/// Translate the winning strategy into merged char ranges over the original strings
pub fn map_ranges(
    strategy: &MatchingStrategy,
    query: &str,
    query_tokens: &[Token],
    target: &str,
    target_tokens: &[Token],
) -> MatchedRanges {
    let query_spans = strategy.merged_query_ranges();
    let target_spans = strategy.merged_target_ranges();

    let covered: usize = query_spans.iter().map(|r| r.len()).sum();
    let missed_query_tokens = query_tokens.len().saturating_sub(covered);

    let query_offsets = OffsetMap::new(query, query_tokens);
    let target_offsets = OffsetMap::new(target, target_tokens);

    MatchedRanges {
        query: query_spans
            .into_iter()
            .map(|r| query_offsets.char_range(r))
            .collect(),
        target: target_spans
            .into_iter()
            .map(|r| target_offsets.char_range(r))
            .collect(),
        missed_query_tokens,
    }
}

/// Slice `text` by a char range. Out-of-range bounds are clamped.
pub fn slice_chars(text: &str, range: Range<usize>) -> &str {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map_or(text.len(), |(idx, _)| idx)
    };
    let start = byte_at(range.start);
    let end = byte_at(range.end).max(start);
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_adjacent_and_overlapping() {
        assert_eq!(merge_ranges(vec![3..4, 0..2, 2..3, 6..8, 7..9]), vec![0..4, 6..9]);
    }

    #[test]
    fn test_merge_keeps_gaps() {
        assert_eq!(merge_ranges(vec![0..1, 2..3]), vec![0..1, 2..3]);
        assert!(merge_ranges(Vec::new()).is_empty());
    }

    #[test]
    fn test_offsets_include_trimmed_whitespace() {
        let text = "  しゃけ ";
        let tokens = tokenize(text);
        let offsets = OffsetMap::new(text, &tokens);
        assert_eq!(offsets.char_range(0..1), 2..4);
        assert_eq!(offsets.char_range(1..2), 4..5);
        assert_eq!(slice_chars(text, 2..4), "しゃ");
    }

    #[test]
    fn test_whitespace_run_offsets() {
        let text = "a   b";
        let tokens = tokenize(text);
        let offsets = OffsetMap::new(text, &tokens);
        assert_eq!(offsets.char_range(2..3), 4..5);
    }

    #[test]
    fn test_slice_chars_clamps() {
        assert_eq!(slice_chars("abc", 1..10), "bc");
        assert_eq!(slice_chars("abc", 5..9), "");
        assert_eq!(slice_chars("光の", 1..2), "の");
    }
}
