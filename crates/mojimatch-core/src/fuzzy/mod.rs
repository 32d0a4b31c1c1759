//! Fuzzy Matching Engine
//!
//! Aligns a tokenized query against a tokenized target:
//!
//! - **Compatibility**: each query token (or run of tokens) against each
//!   target token, on a fixed scale of 1.0 / 0.9 / 0.8
//! - **Alignment**: dynamic programming over in-order matches, one
//!   out-of-order match per path, and skips on both sides
//! - **Ranges**: matched tokens mapped back to char offsets for highlighting
//! - **Score**: `Σ weight / |target| × 0.9 ^ missed query tokens`
//!
//! # Example
//!
//! ```rust
//! use mojimatch_core::fuzzy::fuzzy_match;
//!
//! let result = fuzzy_match("shake", "しゃけ");
//! assert!((result.score - 0.9).abs() < 1e-9);
//! assert_eq!(result.target_ranges, vec![0..3]);
//! ```

mod align;
mod engine;
mod ranges;
mod score;
mod weight;

pub use align::{align, Match, MatchingStrategy};
pub use engine::{fuzzy_match, FuzzyMatchResult, Matcher};
pub use ranges::{map_ranges, merge_ranges, slice_chars, MatchedRanges, OffsetMap};
pub use score::{base_score, missed_penalty, reversal_penalty, MISSED_TOKEN_PENALTY};
pub use weight::{compatibility, group_weight, token_weight, Compatibility, TokenGroup};
