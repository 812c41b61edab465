use std::borrow::Cow;
use std::fmt::{self, Display};
use std::iter::FusedIterator;
use std::slice;

use serde::Serialize;

use crate::position::{HasSpan, Position, Span};
use crate::syntax::SyntaxKind;

/// A run of text with no syntactic significance, owned by the token it is attached to.
#[derive(Serialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Trivia<'buf> {
    pub kind: SyntaxKind,
    pub text: &'buf str,
}

impl<'buf> Trivia<'buf> {
    pub fn new(kind: SyntaxKind, text: &'buf str) -> Self {
        debug_assert!(kind.is_trivia(), "{:?} is not a trivia kind", kind);

        Self { kind, text }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia
        )
    }
}

impl Display for Trivia<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

#[derive(Serialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct Token<'buf> {
    pub kind: SyntaxKind,
    pub text: &'buf str,

    /// The span of `text` alone.
    pub span: Span,

    pub leading: Vec<Trivia<'buf>>,
    pub trailing: Vec<Trivia<'buf>>,
}

impl<'buf> Token<'buf> {
    pub fn new(
        kind: SyntaxKind,
        text: &'buf str,
        span: Span,
        leading: Vec<Trivia<'buf>>,
        trailing: Vec<Trivia<'buf>>,
    ) -> Self {
        Self {
            kind,
            text,
            span,
            leading,
            trailing,
        }
    }

    /// Creates a zero-width placeholder for a token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind, pos: Position) -> Self {
        Self::new(kind, "", Span::empty_at(pos), vec![], vec![])
    }

    /// The length of the token text, trivia excluded.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the parser synthesized this token in place of an absent one.
    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != SyntaxKind::EofToken
    }

    /// The length of the token text together with its leading and trailing trivia.
    pub fn full_len(&self) -> usize {
        self.leading.iter().map(Trivia::len).sum::<usize>()
            + self.len()
            + self.trailing.iter().map(Trivia::len).sum::<usize>()
    }
}

impl HasSpan for Token<'_> {
    fn span(&self) -> Cow<'_, Span> {
        Cow::Borrowed(&self.span)
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trivia in &self.leading {
            write!(f, "{}", trivia)?;
        }

        f.write_str(self.text)?;

        for trivia in &self.trailing {
            write!(f, "{}", trivia)?;
        }

        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct Node<'buf> {
    kind: SyntaxKind,
    children: Vec<NodeOrToken<'buf>>,
    len: usize,
}

impl<'buf> Node<'buf> {
    /// Only the factory assembles nodes: it owns the child layout of every kind.
    pub(super) fn new(kind: SyntaxKind, children: Vec<NodeOrToken<'buf>>) -> Self {
        debug_assert!(kind.is_node(), "{:?} is not a node kind", kind);
        let len = children.iter().map(NodeOrToken::len).sum();

        Self {
            kind,
            children,
            len,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn children(&self) -> &[NodeOrToken<'buf>] {
        &self.children
    }

    pub fn child(&self, idx: usize) -> Option<&NodeOrToken<'buf>> {
        self.children.get(idx)
    }

    /// The sum of the lengths of the children; trivia does not count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of the text this node reproduces, trivia included.
    pub fn full_len(&self) -> usize {
        self.tokens().map(Token::full_len).sum()
    }

    /// Iterates over the tokens of the subtree in source order.
    pub fn tokens(&self) -> Tokens<'_, 'buf> {
        Tokens {
            stack: vec![self.children.iter()],
        }
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens().try_for_each(|token| write!(f, "{}", token))
    }
}

pub struct Tokens<'a, 'buf> {
    stack: Vec<slice::Iter<'a, NodeOrToken<'buf>>>,
}

impl<'a, 'buf> Iterator for Tokens<'a, 'buf> {
    type Item = &'a Token<'buf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.last_mut()?.next() {
                None => {
                    self.stack.pop();
                }

                Some(NodeOrToken::Token(token)) => return Some(token),
                Some(NodeOrToken::Node(node)) => self.stack.push(node.children.iter()),
            }
        }
    }
}

impl FusedIterator for Tokens<'_, '_> {}

/// A child slot of a node: either a subtree or a terminal.
#[derive(Serialize, Debug, Clone, Hash, Eq, PartialEq)]
pub enum NodeOrToken<'buf> {
    Node(Node<'buf>),
    Token(Token<'buf>),
}

impl<'buf> NodeOrToken<'buf> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Node(node) => node.len(),
            Self::Token(token) => token.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn full_len(&self) -> usize {
        match self {
            Self::Node(node) => node.full_len(),
            Self::Token(token) => token.full_len(),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    pub fn as_node(&self) -> Option<&Node<'buf>> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token<'buf>> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }

    /// Returns the node in this slot.
    ///
    /// Panics if the slot holds a token: the caller has the tree shape wrong.
    #[track_caller]
    pub fn unwrap_node(&self) -> &Node<'buf> {
        match self {
            Self::Node(node) => node,
            Self::Token(token) => panic!("expected a node, found the token {:?}", token.kind),
        }
    }

    /// Returns the token in this slot.
    ///
    /// Panics if the slot holds a node: the caller has the tree shape wrong.
    #[track_caller]
    pub fn unwrap_token(&self) -> &Token<'buf> {
        match self {
            Self::Token(token) => token,
            Self::Node(node) => panic!("expected a token, found the node {:?}", node.kind()),
        }
    }
}

impl<'buf> From<Node<'buf>> for NodeOrToken<'buf> {
    fn from(node: Node<'buf>) -> Self {
        Self::Node(node)
    }
}

impl<'buf> From<Token<'buf>> for NodeOrToken<'buf> {
    fn from(token: Token<'buf>) -> Self {
        Self::Token(token)
    }
}

impl Display for NodeOrToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => write!(f, "{}", node),
            Self::Token(token) => write!(f, "{}", token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: SyntaxKind, text: &'static str, trailing: &'static str) -> Token<'static> {
        let trailing = if trailing.is_empty() {
            vec![]
        } else {
            vec![Trivia::new(SyntaxKind::WhitespaceTrivia, trailing)]
        };

        Token::new(kind, text, Span::default(), vec![], trailing)
    }

    fn sample() -> Node<'static> {
        let modifiers = Node::new(
            SyntaxKind::List,
            vec![token(SyntaxKind::PublicKeyword, "public", " ").into()],
        );

        Node::new(
            SyntaxKind::ClassDeclaration,
            vec![
                modifiers.into(),
                token(SyntaxKind::ClassKeyword, "class", "  ").into(),
                token(SyntaxKind::IdentifierToken, "Foo", "").into(),
                token(SyntaxKind::OpenBraceToken, "{", "").into(),
                Node::new(SyntaxKind::List, vec![]).into(),
                token(SyntaxKind::CloseBraceToken, "}", "\t").into(),
            ],
        )
    }

    #[test]
    fn test_len_excludes_trivia() {
        let node = sample();

        assert_eq!(node.len(), "publicclassFoo{}".len());
        assert_eq!(node.full_len(), "public class  Foo{}\t".len());
        assert_eq!(node.children()[0].len(), "public".len());
        assert_eq!(
            node.len(),
            node.children().iter().map(NodeOrToken::len).sum::<usize>()
        );
    }

    #[test]
    fn test_display_is_lossless() {
        assert_eq!(sample().to_string(), "public class  Foo{}\t");
    }

    #[test]
    fn test_tokens_in_source_order() {
        let node = sample();
        let kinds: Vec<_> = node.tokens().map(|token| token.kind).collect();

        assert_eq!(
            kinds,
            [
                SyntaxKind::PublicKeyword,
                SyntaxKind::ClassKeyword,
                SyntaxKind::IdentifierToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
            ]
        );
    }

    #[test]
    fn test_missing_token() {
        let missing = Token::missing(SyntaxKind::IdentifierToken, Position::default());

        assert!(missing.is_missing());
        assert_eq!(missing.len(), 0);
        assert_eq!(missing.full_len(), 0);
        assert!(!Token::missing(SyntaxKind::EofToken, Position::default()).is_missing());
    }

    #[test]
    fn test_accessors() {
        let node = sample();

        assert!(node.children()[0].as_node().is_some());
        assert!(node.children()[0].as_token().is_none());
        assert_eq!(node.children()[2].unwrap_token().text, "Foo");
        assert_eq!(node.children()[4].unwrap_node().kind(), SyntaxKind::List);
        assert!(node.child(6).is_none());
    }

    #[test]
    #[should_panic(expected = "expected a node, found the token ClassKeyword")]
    fn test_unwrap_node_on_token_panics() {
        sample().children()[1].unwrap_node();
    }

    #[test]
    #[should_panic(expected = "expected a token, found the node List")]
    fn test_unwrap_token_on_node_panics() {
        sample().children()[0].unwrap_token();
    }
}
