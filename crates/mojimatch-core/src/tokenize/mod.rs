//! Script-aware tokenizer
//!
//! Turns a raw string into an ordered sequence of [`Token`]s. Input is
//! lowercased and trimmed first; whitespace runs collapse into one token, kana
//! digraphs are tried before single kana, and everything else becomes a
//! one-character token.
//!
//! # Example
//!
//! ```rust
//! use mojimatch_core::tokenize::tokenize;
//!
//! let tokens = tokenize("しゃけ");
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].original(), "しゃ");
//! assert_eq!(tokens[0].equivalents(), &["sha"]);
//! ```

mod kana;
mod token;

pub use kana::{romanize, romanize_pair};
pub use token::{Token, SPACE};

/// Lowercase a char without changing the char count of the string
#[inline]
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Streaming tokenizer over the lowercased, trimmed input
pub struct Tokenizer {
    chars: Vec<char>,
    position: usize,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.trim().chars().map(fold_case).collect(),
            position: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self, n: usize) {
        self.position += n;
    }

    fn read_whitespace(&mut self) -> Token {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.advance(1);
        }
        Token::whitespace(self.chars[start..self.position].iter().collect::<String>())
    }

    fn read_char(&mut self, c: char) -> Token {
        // Digraphs first so consonant + glide pairs resolve to one syllable
        if let Some(next) = self.chars.get(self.position + 1).copied() {
            if let Some(romaji) = romanize_pair(c, next) {
                self.advance(2);
                return Token::new(String::from_iter([c, next]), vec![romaji]);
            }
        }

        self.advance(1);
        match romanize(c) {
            Some(romaji) => Token::new(c, vec![romaji]),
            None => Token::plain(c),
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek_char()?;
        if c.is_whitespace() {
            Some(self.read_whitespace())
        } else {
            Some(self.read_char(c))
        }
    }
}

/// Tokenize a string. Total over all inputs: empty or whitespace-only
/// strings produce an empty sequence.
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}

/// Number of leading whitespace chars dropped by trimming
pub fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}
