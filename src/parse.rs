mod cursor;
mod error;
mod lexer;
mod lookahead;
mod parser;
mod trivia;

pub use cursor::{Cursor, EOF_CHAR};
pub use error::{SyntaxError, SyntaxErrorKind};
pub use lexer::Lexer;
pub use lookahead::{Checkpoint, Lookahead};
pub use parser::{Parse, Parser};
pub use trivia::scan_trivia;

/// Parses a whole text as a compilation unit.
pub fn parse_text(text: &str) -> Parse<'_> {
    Parser::new(Lexer::new(Cursor::from_text(text))).parse_compilation_unit()
}
