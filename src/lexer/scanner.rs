//! Scanner implementation

use std::iter::FusedIterator;

use super::cursor::Cursor;
use super::token::{lookup_ident, Position, Token, TokenKind};

/// Monkey language scanner
///
/// Every call to [`Scanner::next_token`] consumes at least one character
/// unless the input is exhausted, after which it yields `EOF` forever.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.cursor.position();

        let Some(ch) = self.cursor.bump() else {
            return Token::fixed(TokenKind::Eof, start, 0);
        };

        let token = match ch {
            '+' => Token::fixed(TokenKind::Plus, start, 1),
            '-' => Token::fixed(TokenKind::Minus, start, 1),
            '*' => Token::fixed(TokenKind::Asterisk, start, 1),
            '/' => Token::fixed(TokenKind::Slash, start, 1),
            '<' => Token::fixed(TokenKind::Lt, start, 1),
            '>' => Token::fixed(TokenKind::Gt, start, 1),
            '(' => Token::fixed(TokenKind::LParen, start, 1),
            ')' => Token::fixed(TokenKind::RParen, start, 1),
            '{' => Token::fixed(TokenKind::LBrace, start, 1),
            '}' => Token::fixed(TokenKind::RBrace, start, 1),
            ',' => Token::fixed(TokenKind::Comma, start, 1),
            ';' => Token::fixed(TokenKind::Semicolon, start, 1),
            '!' => {
                if self.cursor.eat('=') {
                    Token::fixed(TokenKind::NotEq, start, 2)
                } else {
                    Token::fixed(TokenKind::Bang, start, 1)
                }
            }
            '=' => {
                if self.cursor.eat('=') {
                    Token::fixed(TokenKind::Eq, start, 2)
                } else {
                    Token::fixed(TokenKind::Assign, start, 1)
                }
            }
            c if is_letter(c) => self.read_identifier(c, start),
            c if is_digit(c) => self.read_number(c, start),
            c => {
                log::debug!("illegal character {:?} at {}", c, start);
                Token::new(TokenKind::Illegal, c, start, 1)
            }
        };

        log::trace!("scanned {}", token);
        token
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(is_whitespace);
    }

    /// Maximal munch over letters; `first` has already been consumed.
    fn read_identifier(&mut self, first: char, start: Position) -> Token {
        let mut ident = String::from(first);
        ident.push_str(self.cursor.eat_while(is_letter));
        let length = ident.len();

        match lookup_ident(&ident) {
            TokenKind::Ident => Token::new(TokenKind::Ident, ident, start, length),
            keyword => Token::fixed(keyword, start, length),
        }
    }

    /// Maximal munch over decimal digits; `first` has already been consumed.
    fn read_number(&mut self, first: char, start: Position) -> Token {
        let mut digits = String::from(first);
        digits.push_str(self.cursor.eat_while(is_digit));
        let length = digits.len();
        Token::new(TokenKind::Int, digits, start, length)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Yields every token before `EOF`.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

// ASCII only; identifiers never contain digits.
fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Scanner::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != = !"),
            vec![TokenKind::Eq, TokenKind::NotEq, TokenKind::Assign, TokenKind::Bang]
        );
        assert_eq!(kinds("==="), vec![TokenKind::Eq, TokenKind::Assign]);
        assert_eq!(kinds("!=="), vec![TokenKind::NotEq, TokenKind::Assign]);
        assert_eq!(kinds("!!="), vec![TokenKind::Bang, TokenKind::NotEq]);
    }

    #[test]
    fn test_identifier_stops_at_digit() {
        let tokens: Vec<_> = Scanner::new("abc123").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].literal, "abc");
        assert_eq!(tokens[1].kind, TokenKind::Int);
        assert_eq!(tokens[1].literal, "123");
        assert_eq!(tokens[1].position.column, 4);
    }

    #[test]
    fn test_keyword_has_empty_literal() {
        let token = Scanner::new("return").next_token();
        assert_eq!(token.kind, TokenKind::Return);
        assert!(token.literal.is_empty());
        assert_eq!(token.length, 6);
    }

    #[test]
    fn test_illegal_advances() {
        let mut scanner = Scanner::new("@#");
        let first = scanner.next_token();
        assert_eq!(first.kind, TokenKind::Illegal);
        assert_eq!(first.literal, "@");
        assert_eq!(first.length, 1);
        let second = scanner.next_token();
        assert_eq!(second.literal, "#");
        assert_eq!(second.position.column, 2);
        assert!(scanner.next_token().is_eof());
    }

    #[test]
    fn test_eof_forever() {
        let mut scanner = Scanner::new("  ");
        for _ in 0..5 {
            let token = scanner.next_token();
            assert!(token.is_eof());
            assert_eq!(token.length, 0);
            assert_eq!(token.position, Position { line: 1, column: 3, offset: 2 });
        }
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_positions_across_lines() {
        let tokens: Vec<_> = Scanner::new("let x\r\n  = 5;").collect();
        let positions: Vec<_> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();
        assert_eq!(positions, vec![(1, 1), (1, 5), (2, 3), (2, 5), (2, 6)]);
    }
}
