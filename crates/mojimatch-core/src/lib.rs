//! mojimatch core engine
//!
//! Fuzzy matching for titles that mix kana, romaji, Han and Latin text. The
//! engine tolerates dropped characters, reordered words and partial
//! kana/romaji spelling, and reports both a relevance score and the char
//! ranges that matched on each side.
//!
//! Everything here is pure computation: no I/O, no shared mutable state.
//! All types are `Send + Sync`, so callers may score catalog entries from
//! many threads at once.
//!
//! # Features
//!
//! - `parallel` - Fan catalog scoring out over rayon for large catalogs
//!
//! # Example
//!
//! ```rust
//! use mojimatch_core::{fuzzy_match, search_all};
//!
//! let result = fuzzy_match("shake", "しゃけ");
//! assert!((result.score - 0.9).abs() < 1e-9);
//!
//! let titles = vec!["メルト".to_string(), "しゃけ".to_string()];
//! let ranked = search_all("shake", &titles, 10, 0);
//! assert_eq!(ranked[0].item, "しゃけ");
//! ```

pub mod fuzzy;
pub mod search;
pub mod tokenize;

// Re-export main types at crate root
pub use fuzzy::{fuzzy_match, FuzzyMatchResult, Match, Matcher, MatchingStrategy};
pub use search::{search_all, search_with, RankedMatch, SearchConfig, SearchTarget};
pub use tokenize::{tokenize, Token};
