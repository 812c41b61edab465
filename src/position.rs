use std::borrow::Cow;
use std::fmt::{self, Display};

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Position {
    pub byte: usize,
    pub line: usize,
    pub col: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            byte: 0,
            line: 1,
            col: 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A half-open span: `start` is the first byte covered, `end` is one past the last.
#[derive(Serialize, Debug, Clone, Hash, Eq, PartialEq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// A zero-width span located at `pos`.
    pub fn empty_at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn len(&self) -> usize {
        self.end.byte - self.start.byte
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn convex_hull(&self, other: &Span) -> Span {
        let start = if self.start.byte <= other.start.byte {
            self.start
        } else {
            other.start
        };

        let end = if self.end.byte >= other.end.byte {
            self.end
        } else {
            other.end
        };

        Span { start, end }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

pub trait HasSpan {
    fn span(&self) -> Cow<'_, Span>;
}
