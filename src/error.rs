//! Error types and diagnostic reporting
//!
//! The scanner never fails: illegal characters come back as ordinary
//! `ILLEGAL` tokens. Callers that want to stop on them convert those tokens
//! into [`LexError`]s and render them through a [`DiagnosticReport`].

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{self, termcolor::WriteColor};
use thiserror::Error;

use crate::lexer::{Position, Scanner, Token, TokenKind};

/// Top-level library error
#[derive(Error, Debug)]
pub enum MonkeyError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lexer error details
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("illegal character {ch:?} at {position}")]
    IllegalCharacter { ch: char, position: Position },
}

impl LexError {
    /// Convert an `ILLEGAL` token; `None` for any other kind.
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind != TokenKind::Illegal {
            return None;
        }
        let ch = token.literal.chars().next()?;
        Some(LexError::IllegalCharacter {
            ch,
            position: token.position,
        })
    }

    pub fn position(&self) -> Position {
        match self {
            LexError::IllegalCharacter { position, .. } => *position,
        }
    }

    /// Convert to a codespan-reporting diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic<()> {
        match self {
            LexError::IllegalCharacter { ch, position } => {
                let start = position.offset;
                Diagnostic::error()
                    .with_message(format!("illegal character {:?}", ch))
                    .with_labels(vec![Label::primary((), start..start + ch.len_utf8())
                        .with_message("not part of any token")])
            }
        }
    }
}

/// Result type alias
pub type MonkeyResult<T> = Result<T, MonkeyError>;

/// Lexical errors collected for a single named source
#[derive(Debug)]
pub struct DiagnosticReport {
    file: SimpleFile<String, String>,
    errors: Vec<LexError>,
}

impl DiagnosticReport {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file: SimpleFile::new(name.into(), source.into()),
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: LexError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Render every collected error to `writer`.
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
    ) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();
        for error in &self.errors {
            term::emit(writer, &config, &self.file, &error.to_diagnostic())?;
        }
        Ok(())
    }
}

/// Scan `source` and record every illegal character it contains.
pub fn check_source(name: &str, source: &str) -> DiagnosticReport {
    let mut report = DiagnosticReport::new(name, source);
    for error in Scanner::new(source).filter_map(|t| LexError::from_token(&t)) {
        report.add_error(error);
    }
    report
}
