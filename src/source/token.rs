//! Tokens and a tokenizer for source lines.

use logos::{Lexer, Logos};

use std::fmt;

/// Enumeration of all tokens of a source line.
///
/// The meaning of a word depends on its position on the line, so the tokenizer only separates
/// words from whitespace and leaves the rest to the [parser](super::parser).
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Errorneous token that could not be interpreted as a word.
    #[error]
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Error,

    /// A run of non-whitespace characters.
    #[regex(r"[^ \t\r\n\f]+", Lexer::slice)]
    Word(&'a str),
}

impl<'t> fmt::Display for Token<'t> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Error => write!(f, "<error>"),
            Token::Word(word) => write!(f, "{}", word),
        }
    }
}

/// Splits a line into its words, dropping the whitespace between them.
pub fn tokenize(line: &str) -> Vec<&str> {
    Token::lexer(line)
        .filter_map(|token| match token {
            Token::Word(word) => Some(word),
            Token::Error => None,
        })
        .collect()
}
