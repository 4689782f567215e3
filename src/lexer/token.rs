//! Token definitions

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Token kinds of the Monkey language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,

    // Operators
    Assign,
    Plus,
    Minus,
    Asterisk,
    Bang,
    Slash,
    Lt,
    Gt,
    NotEq,
    Eq,

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Let,
    If,
    Else,
    Return,
    True,
    False,
}

impl TokenKind {
    /// The canonical upper-case name of the kind, e.g. `NOT_EQ`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Bang => "BANG",
            TokenKind::Slash => "SLASH",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::NotEq => "NOT_EQ",
            TokenKind::Eq => "EQ",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
        }
    }

    /// Fixed source spelling of symbol and keyword kinds.
    ///
    /// Kinds whose text varies (`IDENT`, `INT`, `ILLEGAL`) and `EOF` have none.
    pub fn symbol(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Illegal | TokenKind::Eof | TokenKind::Ident | TokenKind::Int => {
                return None
            }
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Bang => "!",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::NotEq => "!=",
            TokenKind::Eq => "==",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Function => "fn",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Function
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

static KEYWORDS: OnceLock<IndexMap<&'static str, TokenKind>> = OnceLock::new();

fn keyword_table() -> &'static IndexMap<&'static str, TokenKind> {
    KEYWORDS.get_or_init(|| {
        IndexMap::from([
            ("fn", TokenKind::Function),
            ("let", TokenKind::Let),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("return", TokenKind::Return),
        ])
    })
}

/// Classify a letter run: a reserved word's kind, or `IDENT`.
pub fn lookup_ident(ident: &str) -> TokenKind {
    keyword_table()
        .get(ident)
        .copied()
        .unwrap_or(TokenKind::Ident)
}

/// Reserved words in declaration order.
pub fn keywords() -> impl Iterator<Item = (&'static str, TokenKind)> {
    keyword_table().iter().map(|(word, kind)| (*word, *kind))
}

/// Location of a character in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    pub fn new() -> Self {
        Position {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A classified unit of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text for `IDENT`, `INT` and `ILLEGAL`; empty otherwise
    pub literal: String,
    /// Position of the token's first character
    pub position: Position,
    /// Number of characters consumed
    pub length: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        position: Position,
        length: usize,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
            length,
        }
    }

    /// A token whose text is implied by its kind.
    pub fn fixed(kind: TokenKind, position: Position, length: usize) -> Self {
        Self::new(kind, String::new(), position, length)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_illegal(&self) -> bool {
        self.kind == TokenKind::Illegal
    }

    /// The source text this token was scanned from.
    pub fn text(&self) -> &str {
        self.kind.symbol().unwrap_or(&self.literal)
    }

    /// `KIND` or `KIND(literal)`, without position.
    pub fn describe(&self) -> String {
        if self.literal.is_empty() {
            self.kind.to_string()
        } else {
            format!("{}({})", self.kind, self.literal)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.describe(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keywords() {
        assert_eq!(lookup_ident("fn"), TokenKind::Function);
        assert_eq!(lookup_ident("let"), TokenKind::Let);
        assert_eq!(lookup_ident("return"), TokenKind::Return);
        assert_eq!(lookup_ident("Let"), TokenKind::Ident);
        assert_eq!(lookup_ident("lets"), TokenKind::Ident);
    }

    #[test]
    fn test_keyword_table_order() {
        let words: Vec<_> = keywords().map(|(word, _)| word).collect();
        assert_eq!(words, ["fn", "let", "true", "false", "if", "else", "return"]);
        assert!(keywords().all(|(word, kind)| kind.is_keyword() && kind.symbol() == Some(word)));
    }

    #[test]
    fn test_position_advance() {
        let mut pos = Position::new();
        pos.advance('a');
        assert_eq!(pos, Position { line: 1, column: 2, offset: 1 });
        pos.advance('\n');
        assert_eq!(pos, Position { line: 2, column: 1, offset: 2 });
        pos.advance('é');
        assert_eq!(pos, Position { line: 2, column: 2, offset: 4 });
    }

    #[test]
    fn test_display() {
        let pos = Position { line: 3, column: 7, offset: 20 };
        assert_eq!(Token::fixed(TokenKind::NotEq, pos, 2).to_string(), "NOT_EQ @ 3:7");
        assert_eq!(Token::new(TokenKind::Ident, "five", pos, 4).to_string(), "IDENT(five) @ 3:7");
    }

    #[test]
    fn test_text() {
        let pos = Position::new();
        assert_eq!(Token::fixed(TokenKind::Eq, pos, 2).text(), "==");
        assert_eq!(Token::fixed(TokenKind::Function, pos, 2).text(), "fn");
        assert_eq!(Token::new(TokenKind::Int, "42", pos, 2).text(), "42");
        assert_eq!(Token::fixed(TokenKind::Eof, pos, 0).text(), "");
    }
}
