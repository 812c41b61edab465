use crate::parse::lexer::Lexer;
use crate::position::Position;
use crate::syntax::{SyntaxKind, Token};

/// A position in a [`Lookahead`] buffer that can be returned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Memoizes lexer output so that upcoming tokens can be inspected without consuming them.
///
/// Consumed tokens stay in the buffer; only the position moves. Past the end-of-input token the
/// buffer stops growing and hands out a single trivia-free end-of-input token instead, so that
/// trivia before the end is never seen twice.
#[derive(Debug, Clone)]
pub struct Lookahead<'buf> {
    lexer: Lexer<'buf>,
    tokens: Vec<Token<'buf>>,
    pos: usize,
    lexed_eof: bool,
    past_end: Token<'buf>,
}

impl<'buf> Lookahead<'buf> {
    pub fn new(lexer: Lexer<'buf>) -> Self {
        Self {
            lexer,
            tokens: vec![],
            pos: 0,
            lexed_eof: false,
            past_end: Token::missing(SyntaxKind::EofToken, Position::default()),
        }
    }

    /// Returns the `n`-th token after the current one, lexing more input as needed.
    pub fn peek(&mut self, n: usize) -> &Token<'buf> {
        let idx = self.pos + n;

        while idx >= self.tokens.len() && !self.lexed_eof {
            let token = self.lexer.next_token();

            if token.kind == SyntaxKind::EofToken {
                self.lexed_eof = true;
                self.past_end = Token::missing(SyntaxKind::EofToken, token.span.end);
            }

            self.tokens.push(token);
        }

        self.tokens.get(idx).unwrap_or(&self.past_end)
    }

    pub fn current(&mut self) -> &Token<'buf> {
        self.peek(0)
    }

    /// Returns the current token and moves past it.
    pub fn consume(&mut self) -> Token<'buf> {
        let token = self.current().clone();

        if self.pos < self.tokens.len() {
            self.pos += 1;
        }

        token
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.tokens.len());
        self.pos = checkpoint.0;
    }

    /// The number of tokens lexed so far.
    pub fn buffered(&self) -> usize {
        self.tokens.len()
    }

    pub fn into_lexer(self) -> Lexer<'buf> {
        self.lexer
    }
}
