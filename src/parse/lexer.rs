use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::parse::cursor::Cursor;
use crate::parse::error::{SyntaxError, SyntaxErrorKind};
use crate::parse::trivia::scan_trivia;
use crate::position::{Position, Span};
use crate::syntax::{SyntaxKind, Token, Trivia};

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continuation(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Turns source text into tokens, each carrying the trivia around it.
///
/// All trivia between two tokens is attached as trailing trivia of the first one, so only the
/// first token of the input (or the end-of-input token of an input with no tokens) ever has
/// leading trivia.
#[derive(Debug, Clone)]
pub struct Lexer<'buf> {
    cursor: Cursor<'buf>,
    errors: Vec<SyntaxError>,
    eof: bool,
}

impl<'buf> Lexer<'buf> {
    pub fn new(cursor: Cursor<'buf>) -> Self {
        Self {
            cursor,
            errors: vec![],
            eof: false,
        }
    }

    pub fn pos(&self) -> Position {
        self.cursor.pos()
    }

    /// The lexical errors encountered so far.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted, every call returns an end-of-input token with empty text.
    pub fn next_token(&mut self) -> Token<'buf> {
        let leading = self.scan_trivia_run();

        if self.cursor.is_at_end() {
            self.eof = true;
            let span = Span::empty_at(self.cursor.pos());

            return Token::new(SyntaxKind::EofToken, "", span, leading, vec![]);
        }

        self.cursor.mark();
        let kind = self.scan_token();
        let text = self.cursor.slice();
        let span = self.cursor.span();
        let trailing = self.scan_trivia_run();

        trace!(?kind, text, "scanned a token");

        Token::new(kind, text, span, leading, trailing)
    }

    fn scan_trivia_run(&mut self) -> Vec<Trivia<'buf>> {
        let mut trivia = vec![];

        while let Some(item) = scan_trivia(&mut self.cursor, &mut self.errors) {
            trivia.push(item);
        }

        trivia
    }

    fn scan_token(&mut self) -> SyntaxKind {
        match self.cursor.current() {
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => self.scan_ident_or_keyword(),

            c => match SyntaxKind::parse_punctuation_prefix(self.cursor.remaining()) {
                Some((text, kind)) => {
                    self.cursor.consume_expecting(text);

                    kind
                }

                None => {
                    self.cursor.advance();
                    debug!(char = ?c, pos = %self.cursor.start_pos(), "unrecognized character");
                    self.errors.push(SyntaxError::new(
                        SyntaxErrorKind::BadToken(c),
                        self.cursor.span(),
                    ));

                    SyntaxKind::BadToken
                }
            },
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        self.cursor.consume_while(|c| c.is_ascii_digit());

        // a trailing dot only belongs to the number if a digit follows it
        if self.cursor.current() == '.' && self.cursor.lookahead(1).is_ascii_digit() {
            self.cursor.advance();
            self.cursor.consume_while(|c| c.is_ascii_digit());
        }

        SyntaxKind::NumberLiteralToken
    }

    fn scan_ident_or_keyword(&mut self) -> SyntaxKind {
        let ident = self.cursor.consume_while(is_ident_continuation);

        SyntaxKind::from_keyword(ident).unwrap_or(SyntaxKind::IdentifierToken)
    }
}

/// Yields every token up to and including the end-of-input token.
impl<'buf> Iterator for Lexer<'buf> {
    type Item = Token<'buf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof {
            return None;
        }

        Some(self.next_token())
    }
}

impl<'buf> FusedIterator for Lexer<'buf> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<Token<'_>> {
        Lexer::new(Cursor::from_text(text)).collect()
    }

    fn kinds_and_texts(text: &str) -> Vec<(SyntaxKind, &str)> {
        lex(text)
            .into_iter()
            .map(|token| (token.kind, token.text))
            .collect()
    }

    fn reconstruct(tokens: &[Token<'_>]) -> String {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn test_keyword_reclassification() {
        assert_eq!(
            kinds_and_texts("public"),
            [(SyntaxKind::PublicKeyword, "public"), (SyntaxKind::EofToken, "")]
        );
        assert_eq!(
            kinds_and_texts("publicx"),
            [
                (SyntaxKind::IdentifierToken, "publicx"),
                (SyntaxKind::EofToken, "")
            ]
        );
        assert_eq!(
            kinds_and_texts("_private9"),
            [
                (SyntaxKind::IdentifierToken, "_private9"),
                (SyntaxKind::EofToken, "")
            ]
        );
    }

    #[test]
    fn test_decimal_vs_integer() {
        assert_eq!(
            kinds_and_texts("2.0"),
            [
            (SyntaxKind::NumberLiteralToken, "2.0"),
                (SyntaxKind::EofToken, "")
            ]
        );
        assert_eq!(
            kinds_and_texts("2."),
            [
                (SyntaxKind::NumberLiteralToken, "2"),
                (SyntaxKind::DotToken, "."),
                (SyntaxKind::EofToken, "")
            ]
        );
        assert_eq!(
            kinds_and_texts("2.x"),
            [
                (SyntaxKind::NumberLiteralToken, "2"),
                (SyntaxKind::DotToken, "."),
                (SyntaxKind::IdentifierToken, "x"),
                (SyntaxKind::EofToken, "")
            ]
        );
    }

    #[test]
    fn test_mixed_input() {
        let tokens = lex("1+2.0class   1.2   interface");
        let summary: Vec<_> = tokens
            .iter()
            .map(|token| {
                (
                    token.kind,
                    token.text,
                    token.leading.clone(),
                    token.trailing.clone(),
                )
            })
            .collect();
        let spaces = || vec![Trivia::new(SyntaxKind::WhitespaceTrivia, "   ")];
        let expected: Vec<(SyntaxKind, &str, Vec<Trivia<'_>>, Vec<Trivia<'_>>)> = vec![
            (SyntaxKind::NumberLiteralToken, "1", vec![], vec![]),
            (SyntaxKind::PlusToken, "+", vec![], vec![]),
            (SyntaxKind::NumberLiteralToken, "2.0", vec![], vec![]),
            (SyntaxKind::ClassKeyword, "class", vec![], spaces()),
            (SyntaxKind::NumberLiteralToken, "1.2", vec![], spaces()),
            (SyntaxKind::InterfaceKeyword, "interface", vec![], vec![]),
            (SyntaxKind::EofToken, "", vec![], vec![]),
        ];

        assert_eq!(summary, expected);
    }

    #[test]
    fn test_bad_token() {
        let mut lexer = Lexer::new(Cursor::from_text("a # b"));
        let tokens: Vec<_> = (&mut lexer).collect();

        assert_eq!(tokens[1].kind, SyntaxKind::BadToken);
        assert_eq!(tokens[1].text, "#");
        assert_eq!(tokens[2].kind, SyntaxKind::IdentifierToken);
        assert_eq!(
            lexer.errors(),
            [SyntaxError::new(
                SyntaxErrorKind::BadToken('#'),
                tokens[1].span.clone()
            )]
        );
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new(Cursor::from_text("x  "));

        assert_eq!(lexer.next_token().kind, SyntaxKind::IdentifierToken);

        for _ in 0..3 {
            let eof = lexer.next_token();

            assert_eq!(eof.kind, SyntaxKind::EofToken);
            assert_eq!(eof.text, "");
            assert!(eof.leading.is_empty());
            assert!(eof.trailing.is_empty());
        }
    }

    #[test]
    fn test_trivia_only_input() {
        let tokens = lex(" // just a comment\n");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::EofToken);
        assert_eq!(tokens[0].leading.len(), 3);
        assert_eq!(reconstruct(&tokens), " // just a comment\n");
    }

    #[test]
    fn test_trailing_trivia_policy() {
        let tokens = lex("  a /* c */\n  b");

        assert_eq!(tokens[0].leading.len(), 1);
        assert_eq!(tokens[0].trailing.len(), 4);
        assert!(tokens[1].leading.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let text = "public class Foo\r\n{\n\t// hi\n  void M() { } /* done */ }§ 1.5.";

        assert_eq!(reconstruct(&lex(text)), text);
    }

    #[test]
    fn test_token_spans() {
        let tokens = lex("ab\n cd");

        assert_eq!(tokens[1].span.start.byte, 4);
        assert_eq!(tokens[1].span.start.line, 2);
        assert_eq!(tokens[1].span.start.col, 2);
        assert_eq!(tokens[1].span.end.byte, 6);
    }
}
