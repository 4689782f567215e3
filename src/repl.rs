//! Interactive token printer
//!
//! Reads one line at a time, scans it with a fresh [`Scanner`] and prints one
//! token per output line. The session ends when the line source runs dry.

use colored::Colorize;
use std::io::{BufRead, Write};

use crate::error::MonkeyResult;
use crate::lexer::{Scanner, Token};

pub const PROMPT: &str = ">> ";

/// REPL settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,
    /// Append ` @ line:column` to each token
    pub show_positions: bool,
    pub color: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            show_positions: true,
            color: false,
        }
    }
}

/// Counters for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub lines: usize,
    pub tokens: usize,
    pub illegal: usize,
}

pub struct Repl {
    config: ReplConfig,
}

impl Repl {
    pub fn new(config: ReplConfig) -> Self {
        Self { config }
    }

    /// Drive the session until `input` reports no more lines.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD and scanned
    /// as illegal characters; they never end the session.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> MonkeyResult<SessionStats> {
        let mut stats = SessionStats::default();
        let mut buf = Vec::new();

        loop {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                log::debug!("input closed after {} lines", stats.lines);
                return Ok(stats);
            }
            stats.lines += 1;

            let line = String::from_utf8_lossy(&buf);
            let text = line.trim_end_matches(['\n', '\r']);
            for token in Scanner::new(text) {
                stats.tokens += 1;
                if token.is_illegal() {
                    stats.illegal += 1;
                }
                writeln!(output, "{}", self.render(&token))?;
            }
        }
    }

    /// Format a single token for display.
    pub fn render(&self, token: &Token) -> String {
        let described = if self.config.color {
            let plain = token.describe();
            if token.is_illegal() {
                plain.red().bold().to_string()
            } else if token.kind.is_keyword() {
                plain.blue().to_string()
            } else {
                plain
            }
        } else {
            token.describe()
        };

        if self.config.show_positions {
            format!("{} @ {}", described, token.position)
        } else {
            described
        }
    }
}

/// Name of the user running the session, from the environment.
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "there".to_string())
}

pub fn greeting(user: &str) -> String {
    format!("Hello {}, welcome to the Monkey REPL.", user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Position, TokenKind};

    #[test]
    fn test_render_plain() {
        let repl = Repl::new(ReplConfig::default());
        let position = Position { line: 1, column: 5, offset: 4 };
        let token = Token::new(TokenKind::Ident, "five", position, 4);
        assert_eq!(repl.render(&token), "IDENT(five) @ 1:5");
        assert_eq!(repl.render(&token), token.to_string());
    }

    #[test]
    fn test_render_without_positions() {
        let repl = Repl::new(ReplConfig {
            show_positions: false,
            ..ReplConfig::default()
        });
        let token = Token::fixed(TokenKind::Let, Position::new(), 3);
        assert_eq!(repl.render(&token), "LET");
    }

    #[test]
    fn test_render_colored() {
        colored::control::set_override(true);
        let repl = Repl::new(ReplConfig {
            show_positions: false,
            color: true,
            ..ReplConfig::default()
        });
        let pos = Position::new();

        let illegal = repl.render(&Token::new(TokenKind::Illegal, "?", pos, 1));
        let keyword = repl.render(&Token::fixed(TokenKind::Let, pos, 3));
        let ident = repl.render(&Token::new(TokenKind::Ident, "x", pos, 1));
        colored::control::unset_override();

        assert!(illegal.starts_with("\x1b["));
        assert!(illegal.contains("ILLEGAL(?)"));
        assert_eq!(keyword, "\x1b[34mLET\x1b[0m");
        assert_eq!(ident, "IDENT(x)");
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting("ada"), "Hello ada, welcome to the Monkey REPL.");
    }
}
