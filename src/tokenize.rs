//! Apostrophe-aware tokenizer.
//!
//! Transcription timing tables keep contractions such as `don't` as one
//! entry and emit punctuation as separate entries. This tokenizer follows
//! the same convention so token counts line up with the table.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        [^\W\d_](?:[^\W\d_]|['\-_])+[^\W\d_]   # words with inner apostrophes or dashes
        | [+\-]?\d+[,/.:\-]\d+[+\-]?           # numbers with separators
        | [\w_]+                               # plain words and numbers
        | \.(?:\s*\.)+                         # ellipsis
        | \S                                   # any other single character
        ",
    )
    .unwrap_or_else(|err| panic!("invalid token pattern: {err}"))
});

/// A token with its byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Splits text into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Splits text into tokens, keeping byte offsets.
pub fn tokenize_with_offsets(text: &str) -> Vec<Token<'_>> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// True for tokens that end a sentence.
pub fn is_sentence_terminal(token: &str) -> bool {
    matches!(token, "." | "!" | "?") || token.starts_with("..")
}

/// True when the token contains at least one alphabetic character.
pub fn is_wordlike(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
}
