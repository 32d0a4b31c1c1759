//! Token type produced by the tokenizer

use std::fmt;

use serde::Serialize;

/// Equivalent spelling shared by every whitespace run
pub const SPACE: &str = " ";

/// One unit of a tokenized string: its literal text plus any spellings known
/// to sound the same (a kana syllable's romaji, a single space for a
/// whitespace run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    original: String,
    equivalents: Vec<&'static str>,
}

impl Token {
    pub fn new(original: impl Into<String>, equivalents: Vec<&'static str>) -> Self {
        Self {
            original: original.into(),
            equivalents,
        }
    }

    /// A token with no alternate spelling (Han, Latin, digits, punctuation)
    pub fn plain(original: impl Into<String>) -> Self {
        Self::new(original, Vec::new())
    }

    /// A collapsed whitespace run
    pub fn whitespace(run: impl Into<String>) -> Self {
        Self::new(run, vec![SPACE])
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn equivalents(&self) -> &[&'static str] {
        &self.equivalents
    }

    /// Length of the source text in chars, used for offset mapping
    pub fn char_len(&self) -> usize {
        self.original.chars().count()
    }

    /// Char length of all equivalents joined, as they appear in a group spelling
    pub fn spelled_len(&self) -> usize {
        self.equivalents.iter().map(|e| e.chars().count()).sum()
    }

    pub fn is_whitespace(&self) -> bool {
        self.original.chars().all(char::is_whitespace)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.equivalents.is_empty() {
            write!(f, "{:?}", self.original)
        } else {
            write!(f, "{:?}{:?}", self.original, self.equivalents)
        }
    }
}
