//! The only constructors of grammar nodes.
//!
//! Every function here fixes the order and number of the children of its node kind. Slots that
//! the parser could not fill still get a (missing) token, so the layout below always holds.

use crate::syntax::{Node, NodeOrToken, SyntaxKind, Token};

fn check_token(token: &Token<'_>, accepts: impl Fn(SyntaxKind) -> bool) {
    debug_assert!(accepts(token.kind), "unexpected {:?} in a node slot", token.kind);
}

/// A homogeneous run of zero or more children.
pub fn list<'buf, I>(items: I) -> Node<'buf>
where
    I: IntoIterator,
    I::Item: Into<NodeOrToken<'buf>>,
{
    Node::new(SyntaxKind::List, items.into_iter().map(Into::into).collect())
}

/// Tokens the parser passed over while resynchronising.
pub fn skipped_tokens<'buf>(tokens: Vec<Token<'buf>>) -> Node<'buf> {
    debug_assert!(!tokens.is_empty());

    Node::new(
        SyntaxKind::SkippedTokens,
        tokens.into_iter().map(NodeOrToken::Token).collect(),
    )
}

/// `[members: List, eof]`
pub fn compilation_unit<'buf>(members: Node<'buf>, eof: Token<'buf>) -> Node<'buf> {
    check_token(&eof, |kind| kind == SyntaxKind::EofToken);

    Node::new(SyntaxKind::CompilationUnit, vec![members.into(), eof.into()])
}

/// `[modifiers: List, class, identifier, {, members: List, }]`
pub fn class_declaration<'buf>(
    modifiers: Node<'buf>,
    class_keyword: Token<'buf>,
    identifier: Token<'buf>,
    open_brace: Token<'buf>,
    members: Node<'buf>,
    close_brace: Token<'buf>,
) -> Node<'buf> {
    check_token(&class_keyword, |kind| kind == SyntaxKind::ClassKeyword);
    check_token(&identifier, |kind| kind == SyntaxKind::IdentifierToken);
    check_token(&open_brace, |kind| kind == SyntaxKind::OpenBraceToken);
    check_token(&close_brace, |kind| kind == SyntaxKind::CloseBraceToken);

    Node::new(
        SyntaxKind::ClassDeclaration,
        vec![
            modifiers.into(),
            class_keyword.into(),
            identifier.into(),
            open_brace.into(),
            members.into(),
            close_brace.into(),
        ],
    )
}

/// `[modifiers: List, return type, identifier, (, ), {, }]`
pub fn method_declaration<'buf>(
    modifiers: Node<'buf>,
    return_type: Token<'buf>,
    identifier: Token<'buf>,
    open_paren: Token<'buf>,
    close_paren: Token<'buf>,
    open_brace: Token<'buf>,
    close_brace: Token<'buf>,
) -> Node<'buf> {
    check_token(&return_type, |kind| {
        kind.is_predefined_type() || kind == SyntaxKind::IdentifierToken
    });
    check_token(&identifier, |kind| kind == SyntaxKind::IdentifierToken);
    check_token(&open_paren, |kind| kind == SyntaxKind::OpenParenToken);
    check_token(&close_paren, |kind| kind == SyntaxKind::CloseParenToken);
    check_token(&open_brace, |kind| kind == SyntaxKind::OpenBraceToken);
    check_token(&close_brace, |kind| kind == SyntaxKind::CloseBraceToken);

    Node::new(
        SyntaxKind::MethodDeclaration,
        vec![
            modifiers.into(),
            return_type.into(),
            identifier.into(),
            open_paren.into(),
            close_paren.into(),
            open_brace.into(),
            close_brace.into(),
        ],
    )
}
