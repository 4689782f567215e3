//! Monkey Language Scanner Library
//!
//! This library provides the lexical scanner for the Monkey language and the
//! interactive driver that prints the tokens of each input line.

pub mod error;
pub mod lexer;
pub mod repl;

// Re-export commonly used types
pub use error::{check_source, DiagnosticReport, LexError, MonkeyError, MonkeyResult};
pub use lexer::{tokenize, Position, Scanner, Token, TokenKind};
pub use repl::{Repl, ReplConfig, SessionStats};
