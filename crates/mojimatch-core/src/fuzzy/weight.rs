//! Token compatibility scoring
//!
//! Tiers are checked in order of specificity, first match wins:
//! 1. Exact original text (weight: 1.0)
//! 2. One side's original is an equivalent spelling of the other (weight: 0.9)
//! 3. Both sides share an equivalent spelling (weight: 0.8)

use crate::tokenize::Token;

/// How a query token (or group) relates to a target token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Exact,
    Equivalent,
    Shared,
}

impl Compatibility {
    pub fn weight(self) -> f64 {
        match self {
            Compatibility::Exact => 1.0,
            Compatibility::Equivalent => 0.9,
            Compatibility::Shared => 0.8,
        }
    }
}

/// Try exact match on original text
#[inline]
fn exact(query: &str, target: &Token) -> Option<Compatibility> {
    (query == target.original()).then_some(Compatibility::Exact)
}

/// Try original text against the other side's equivalents
#[inline]
fn equivalent(original: &str, spellings: &[&str], target: &Token) -> Option<Compatibility> {
    let hit = target.equivalents().iter().any(|e| *e == original)
        || spellings.iter().any(|s| *s == target.original());
    hit.then_some(Compatibility::Equivalent)
}

/// Try equivalents against equivalents
#[inline]
fn shared(spellings: &[&str], target: &Token) -> Option<Compatibility> {
    spellings
        .iter()
        .any(|s| target.equivalents().iter().any(|e| e == s))
        .then_some(Compatibility::Shared)
}

fn classify(original: &str, spellings: &[&str], target: &Token) -> Option<Compatibility> {
    exact(original, target)
        .or_else(|| equivalent(original, spellings, target))
        .or_else(|| shared(spellings, target))
}

/// Compatibility of one query token with one target token
pub fn compatibility(query: &Token, target: &Token) -> Option<Compatibility> {
    classify(query.original(), query.equivalents(), target)
}

/// Weight in `{0, 0.8, 0.9, 1.0}` of one query token against one target token
pub fn token_weight(query: &Token, target: &Token) -> f64 {
    compatibility(query, target).map_or(0.0, Compatibility::weight)
}

/// A run of consecutive query tokens fused into one synthetic token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroup {
    original: String,
    spelling: Option<String>,
}

impl TokenGroup {
    /// Concatenate the originals of `run`, and separately the equivalents of
    /// every position in order. Positions without equivalents add nothing to
    /// the spelling; a run with no equivalents at all has none.
    pub fn new(run: &[Token]) -> Self {
        let original: String = run.iter().map(Token::original).collect();
        let joined: String = run
            .iter()
            .flat_map(|t| t.equivalents().iter().copied())
            .collect();
        let spelling = (!joined.is_empty()).then_some(joined);
        Self { original, spelling }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn compatibility(&self, target: &Token) -> Option<Compatibility> {
        match &self.spelling {
            Some(spelling) => classify(&self.original, &[spelling.as_str()], target),
            None => classify(&self.original, &[], target),
        }
    }

    pub fn weight(&self, target: &Token) -> f64 {
        self.compatibility(target).map_or(0.0, Compatibility::weight)
    }
}

/// Weight of the query tokens `run` fused into one group against `target`
pub fn group_weight(run: &[Token], target: &Token) -> f64 {
    if run.is_empty() {
        return 0.0;
    }
    TokenGroup::new(run).weight(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    fn kana(original: &str, romaji: &'static str) -> Token {
        Token::new(original, vec![romaji])
    }

    #[test]
    fn test_exact() {
        assert_eq!(token_weight(&Token::plain("a"), &Token::plain("a")), 1.0);
        assert_eq!(token_weight(&kana("か", "ka"), &kana("か", "ka")), 1.0);
    }

    #[test]
    fn test_original_against_equivalent() {
        assert_eq!(token_weight(&Token::plain("a"), &kana("あ", "a")), 0.9);
        assert_eq!(token_weight(&kana("あ", "a"), &Token::plain("a")), 0.9);
    }

    #[test]
    fn test_shared_equivalent() {
        assert_eq!(token_weight(&kana("カ", "ka"), &kana("か", "ka")), 0.8);
    }

    #[test]
    fn test_whitespace_runs_match_single_space() {
        let run = Token::whitespace("   ");
        let space = Token::whitespace(" ");
        assert_eq!(token_weight(&run, &space), 0.9);
        assert_eq!(token_weight(&run, &Token::whitespace("\t\t")), 0.8);
    }

    #[test]
    fn test_incompatible() {
        assert_eq!(token_weight(&Token::plain("a"), &Token::plain("b")), 0.0);
        assert_eq!(compatibility(&kana("か", "ka"), &kana("き", "ki")), None);
    }

    #[test]
    fn test_group_romaji_against_kana() {
        let query = tokenize("sha");
        assert_eq!(group_weight(&query, &kana("しゃ", "sha")), 0.9);
        assert_eq!(group_weight(&query[..2], &kana("しゃ", "sha")), 0.0);
    }

    #[test]
    fn test_group_kana_against_romaji_word() {
        // Per-position spellings joined: "ka" + "ze" against a target whose original is "kaze"
        let query = tokenize("かぜ");
        assert_eq!(group_weight(&query, &Token::plain("kaze")), 0.9);
    }

    #[test]
    fn test_group_kana_against_kana_digraph() {
        // Separately typed し + ゃ fuse back into the digraph's text
        let query = vec![kana("し", "shi"), kana("ゃ", "xya")];
        assert_eq!(group_weight(&query, &kana("しゃ", "sha")), 1.0);
    }

    #[test]
    fn test_group_joined_equivalents() {
        let query = vec![kana("か", "ka"), kana("ぜ", "ze")];
        assert_eq!(group_weight(&query, &Token::new("風", vec!["kaze"])), 0.8);
    }

    #[test]
    fn test_group_untranslatable_positions_add_nothing() {
        // "x" has no equivalent, so the joined spelling is just "ka"
        let query = vec![kana("か", "ka"), Token::plain("x")];
        assert_eq!(group_weight(&query, &Token::plain("ka")), 0.9);
        assert_eq!(group_weight(&query, &Token::plain("kax")), 0.0);
    }

    #[test]
    fn test_group_mixed_latin_and_kana() {
        // Joined spelling is "e", not "ke"
        let query = tokenize("kえ");
        assert_eq!(group_weight(&query, &kana("け", "ke")), 0.0);
    }

    #[test]
    fn test_group_spelling_equal_to_original() {
        let query = vec![Token::whitespace(" "), Token::whitespace(" ")];
        assert_eq!(group_weight(&query, &Token::plain("  ")), 1.0);
        assert_eq!(group_weight(&query, &Token::whitespace("\t")), 0.0);
    }

    #[test]
    fn test_group_without_equivalents() {
        let query = tokenize("ab");
        assert_eq!(group_weight(&query, &Token::plain("ab")), 1.0);
        assert_eq!(group_weight(&query, &Token::new("あb", vec!["ab"])), 0.9);
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(group_weight(&[], &Token::plain("a")), 0.0);
    }

    #[test]
    fn test_weights() {
        assert_eq!(Compatibility::Exact.weight(), 1.0);
        assert_eq!(Compatibility::Equivalent.weight(), 0.9);
        assert_eq!(Compatibility::Shared.weight(), 0.8);
    }
}
