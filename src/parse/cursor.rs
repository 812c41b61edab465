use std::iter::FusedIterator;

use crate::position::{Position, Span};
use crate::source::SourceFile;

/// Returned by [`Cursor::current`] and [`Cursor::lookahead`] past the end of input.
pub const EOF_CHAR: char = '\0';

/// A read-only view over a source text that tracks the current position and a marked start.
///
/// A token is captured by calling [`mark`](Cursor::mark), consuming its characters,
/// and then taking the [`slice`](Cursor::slice).
#[derive(Debug, Clone)]
pub struct Cursor<'buf> {
    buf: &'buf str,
    pos: Position,
    start: Position,
}

impl<'buf> Cursor<'buf> {
    pub fn new(src_file: &SourceFile<'buf>) -> Self {
        Self::from_text(src_file.text())
    }

    pub fn from_text(buf: &'buf str) -> Self {
        Self {
            buf,
            pos: Position::default(),
            start: Position::default(),
        }
    }

    /// Returns the position of the immediately following character.
    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Returns the position recorded by the last call to [`mark`](Cursor::mark).
    pub fn start_pos(&self) -> Position {
        self.start
    }

    pub fn remaining(&self) -> &'buf str {
        &self.buf[self.pos.byte..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos.byte >= self.buf.len()
    }

    pub fn current(&self) -> char {
        self.lookahead(0)
    }

    /// Returns the `n`-th character after the current one, or [`EOF_CHAR`] if there is none.
    pub fn lookahead(&self, n: usize) -> char {
        self.remaining().chars().nth(n).unwrap_or(EOF_CHAR)
    }

    pub fn starts_with(&self, value: &str) -> bool {
        self.remaining().starts_with(value)
    }

    /// Moves past the current character. Does nothing at the end of input.
    pub fn advance(&mut self) {
        debug_assert!(!self.is_at_end(), "advancing a cursor past the end of input");
        self.next();
    }

    pub fn mark(&mut self) {
        self.start = self.pos;
    }

    /// Returns the text between the mark and the current position.
    pub fn slice(&self) -> &'buf str {
        &self.buf[self.start.byte..self.pos.byte]
    }

    /// Returns the span between the mark and the current position.
    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.pos,
        }
    }

    pub fn consume_expecting(&mut self, expected: &str) -> Option<&'buf str> {
        self.starts_with(expected)
            .then(|| self.consume_bytes(expected.len()))
    }

    pub fn consume_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'buf str {
        let start = self.pos.byte;

        while !self.is_at_end() && predicate(self.current()) {
            self.next();
        }

        &self.buf[start..self.pos.byte]
    }

    fn consume_bytes(&mut self, n: usize) -> &'buf str {
        let start = self.pos.byte;

        while self.pos.byte < start + n && self.next().is_some() {}

        &self.buf[start..self.pos.byte]
    }
}

impl<'buf> Iterator for Cursor<'buf> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.remaining().chars();
        let c = chars.next()?;
        self.pos.byte += c.len_utf8();

        match c {
            // the line ends at the '\n' of a "\r\n" pair
            '\r' if chars.next() == Some('\n') => {}

            '\n' | '\r' => {
                self.pos.line += 1;
                self.pos.col = 1;
            }

            _ => self.pos.col += 1,
        }

        Some(c)
    }
}

impl<'buf> FusedIterator for Cursor<'buf> {}
