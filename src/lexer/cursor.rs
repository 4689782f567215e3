//! Character cursor with one character of lookahead

use super::token::Position;

/// Remaining input plus the position of its first character.
///
/// Advancing is the only mutation; line and column are updated from every
/// consumed character.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    rest: &'a str,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            position: Position::new(),
        }
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Consume and return the next character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.rest = &self.rest[ch.len_utf8()..];
        self.position.advance(ch);
        Some(ch)
    }

    /// Consume the next character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume characters while `predicate` holds, returning the consumed slice.
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, ch)| !predicate(ch))
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (taken, rest) = self.rest.split_at(end);
        for ch in taken.chars() {
            self.position.advance(ch);
        }
        self.rest = rest;
        taken
    }
}
