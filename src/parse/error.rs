use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::position::{HasSpan, Span};
use crate::syntax::SyntaxKind;

/// A problem the lexer or the parser recovered from.
///
/// These never abort a parse; the tree carries the matching bad, missing or skipped tokens.
#[derive(Serialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SyntaxErrorKind {
    BadToken(char),
    UnterminatedComment,
    MissingToken { expected: SyntaxKind },
    UnexpectedToken { found: SyntaxKind },
    RecursionLimit,
}

impl SyntaxErrorKind {
    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::BadToken(_) | Self::UnterminatedComment)
    }
}

impl Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadToken(c) => {
                write!(f, "encountered an unrecognized character '")?;

                if c.is_control() {
                    write!(f, "{}", c.escape_unicode())?;
                } else {
                    write!(f, "{}", c)?;
                }

                write!(f, "'")
            }

            Self::UnterminatedComment => write!(f, "the block comment is not terminated"),
            Self::MissingToken { expected } => write!(f, "expected {}", expected),

            Self::UnexpectedToken { found } => {
                write!(f, "skipped unexpected input starting with {}", found)
            }

            Self::RecursionLimit => write!(f, "declarations are nested too deeply"),
        }
    }
}

#[derive(Serialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Error for SyntaxError {}

impl HasSpan for SyntaxError {
    fn span(&self) -> Cow<'_, Span> {
        Cow::Borrowed(&self.span)
    }
}
