//! An indented, one-element-per-line rendering of a tree for humans and snapshot tests.
//!
//! ```text
//! ClassDeclaration len=7
//!   List len=0
//!   ClassKeyword "class" trailing=[WhitespaceTrivia " "]
//!   IdentifierToken "" missing
//!   OpenBraceToken "{"
//!   List len=0
//!   CloseBraceToken "}"
//! ```

use std::fmt::{self, Display};

use itertools::Itertools;

use crate::syntax::{Node, NodeOrToken, Token, Trivia};

pub struct TreeDump<'a, 'buf>(pub &'a Node<'buf>);

fn write_trivia(f: &mut fmt::Formatter<'_>, label: &str, trivia: &[Trivia<'_>]) -> fmt::Result {
    if trivia.is_empty() {
        return Ok(());
    }

    write!(
        f,
        " {}=[{}]",
        label,
        trivia
            .iter()
            .format_with(", ", |trivia, emit| emit(&format_args!(
                "{:?} {:?}",
                trivia.kind, trivia.text
            )))
    )
}

fn write_token(f: &mut fmt::Formatter<'_>, level: usize, token: &Token<'_>) -> fmt::Result {
    write!(f, "{:width$}{:?} {:?}", "", token.kind, token.text, width = 2 * level)?;

    if token.is_missing() {
        write!(f, " missing")?;
    }

    write_trivia(f, "leading", &token.leading)?;
    write_trivia(f, "trailing", &token.trailing)?;

    writeln!(f)
}

fn write_node(f: &mut fmt::Formatter<'_>, level: usize, node: &Node<'_>) -> fmt::Result {
    writeln!(
        f,
        "{:width$}{:?} len={}",
        "",
        node.kind(),
        node.len(),
        width = 2 * level
    )?;

    for child in node.children() {
        match child {
            NodeOrToken::Node(node) => write_node(f, level + 1, node)?,
            NodeOrToken::Token(token) => write_token(f, level + 1, token)?,
        }
    }

    Ok(())
}

impl Display for TreeDump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, 0, self.0)
    }
}
