//! Lexical analysis module for the Monkey language.
//!
//! This module turns Monkey source text into a flat sequence of tokens. It
//! recognizes single- and two-character operators, delimiters, keywords,
//! identifiers made of letters and underscores, and decimal integer literals.
//! Anything else becomes an `ILLEGAL` token and scanning carries on.

mod cursor;
mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{keywords, lookup_ident, Position, Token, TokenKind};

/// Scan `input` to completion, including the trailing `EOF` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    let mut tokens: Vec<Token> = scanner.by_ref().collect();
    tokens.push(scanner.next_token());
    tokens
}
