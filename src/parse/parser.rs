use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::parse::error::{SyntaxError, SyntaxErrorKind};
use crate::parse::lexer::Lexer;
use crate::parse::lookahead::Lookahead;
use crate::position::Span;
use crate::syntax::{factory, Node, SyntaxKind, Token};

/// How deeply class declarations may nest before the parser stops descending into them.
const RECURSION_LIMIT: usize = 128;

const MODIFIERS: [SyntaxKind; 8] = [
    SyntaxKind::PublicKeyword,
    SyntaxKind::PrivateKeyword,
    SyntaxKind::InternalKeyword,
    SyntaxKind::ProtectedKeyword,
    SyntaxKind::AbstractKeyword,
    SyntaxKind::StaticKeyword,
    SyntaxKind::VirtualKeyword,
    SyntaxKind::SealedKeyword,
];

const RETURN_TYPES: [SyntaxKind; 5] = [
    SyntaxKind::VoidKeyword,
    SyntaxKind::IntKeyword,
    SyntaxKind::LongKeyword,
    SyntaxKind::StringKeyword,
    SyntaxKind::IdentifierToken,
];

const TOP_LEVEL_END: [SyntaxKind; 1] = [SyntaxKind::EofToken];
const CLASS_BODY_END: [SyntaxKind; 2] = [SyntaxKind::CloseBraceToken, SyntaxKind::EofToken];

trait Matcher {
    fn matches(&self, kind: SyntaxKind) -> bool;
}

impl Matcher for SyntaxKind {
    fn matches(&self, kind: SyntaxKind) -> bool {
        *self == kind
    }
}

impl<const N: usize> Matcher for [SyntaxKind; N] {
    fn matches(&self, kind: SyntaxKind) -> bool {
        self.contains(&kind)
    }
}

impl<M: Matcher> Matcher for &M {
    fn matches(&self, kind: SyntaxKind) -> bool {
        (**self).matches(kind)
    }
}

fn is_member_start(kind: SyntaxKind) -> bool {
    MODIFIERS.matches(kind) || RETURN_TYPES.matches(kind) || kind == SyntaxKind::ClassKeyword
}

/// The outcome of a parse: the tree and every error recovered from while building it.
#[derive(Serialize, Debug, Clone)]
pub struct Parse<'buf> {
    pub root: Node<'buf>,

    /// Sorted by position.
    pub errors: Vec<SyntaxError>,
}

/// A recursive-descent parser over a [`Lookahead`] buffer.
///
/// Parsing never fails. An absent token is replaced with a zero-width placeholder of the
/// expected kind and the unexpected token is left for the next production; input that cannot
/// start any production is wrapped in a `SkippedTokens` node. Either way it is logged.
pub struct Parser<'buf> {
    tokens: Lookahead<'buf>,
    errors: Vec<SyntaxError>,
    depth: usize,
}

impl<'buf> Parser<'buf> {
    pub fn new(lexer: Lexer<'buf>) -> Self {
        Self {
            tokens: Lookahead::new(lexer),
            errors: vec![],
            depth: 0,
        }
    }

    /// Parses the whole input. The resulting tree reproduces the input exactly.
    pub fn parse_compilation_unit(mut self) -> Parse<'buf> {
        let root = self.compilation_unit();

        self.finish(root)
    }

    /// Parses a single class declaration at the start of the input.
    ///
    /// Anything after the declaration is left out of the tree.
    pub fn parse_class_declaration(mut self) -> Parse<'buf> {
        let root = self.class_declaration();

        self.finish(root)
    }

    fn finish(self, root: Node<'buf>) -> Parse<'buf> {
        let mut errors = self.tokens.into_lexer().into_errors();
        errors.extend(self.errors);
        errors.sort_by_key(|error| error.span.start.byte);

        Parse { root, errors }
    }

    fn report(&mut self, kind: SyntaxErrorKind, span: Span) {
        debug!(%span, "{}", kind);
        self.errors.push(SyntaxError::new(kind, span));
    }

    fn at(&mut self, matcher: impl Matcher) -> bool {
        matcher.matches(self.tokens.current().kind)
    }

    /// Consumes the current token if it has the `expected` kind.
    ///
    /// Otherwise leaves it in place and returns a missing token of the `expected` kind.
    #[instrument(level = "trace", skip(self), ret)]
    fn expect(&mut self, expected: SyntaxKind) -> Token<'buf> {
        self.expect_any(expected, expected)
    }

    /// Like [`expect`](Self::expect), but accepts any kind in `matcher`.
    /// A missing token gets the `placeholder` kind.
    fn expect_any(&mut self, matcher: impl Matcher, placeholder: SyntaxKind) -> Token<'buf> {
        let current = self.tokens.current();
        trace!(token = ?current.kind, text = current.text);

        if matcher.matches(current.kind) {
            return self.tokens.consume();
        }

        let pos = current.span.start;
        self.report(
            SyntaxErrorKind::MissingToken {
                expected: placeholder,
            },
            Span::empty_at(pos),
        );

        Token::missing(placeholder, pos)
    }

    /// Consumes tokens for as long as they are accepted by `matcher`.
    fn token_list(&mut self, matcher: impl Matcher) -> Node<'buf> {
        let mut items = vec![];

        while self.at(&matcher) {
            items.push(self.tokens.consume());
        }

        factory::list(items)
    }

    #[instrument(level = "trace", skip(self), ret)]
    fn modifiers(&mut self) -> Node<'buf> {
        self.token_list(MODIFIERS)
    }

    #[instrument(level = "trace", skip(self), ret)]
    fn compilation_unit(&mut self) -> Node<'buf> {
        let members = self.member_list(TOP_LEVEL_END);
        let eof = self.expect(SyntaxKind::EofToken);

        factory::compilation_unit(members, eof)
    }

    fn member_list(&mut self, end: impl Matcher + Copy) -> Node<'buf> {
        let mut members = vec![];

        while !self.at(end) {
            members.push(self.member(end));
        }

        factory::list(members)
    }

    /// Parses one member. Always consumes at least one token unless at `end`.
    #[instrument(level = "trace", skip(self, end), ret)]
    fn member(&mut self, end: impl Matcher + Copy) -> Node<'buf> {
        let mut n = 0;

        while MODIFIERS.matches(self.tokens.peek(n).kind) {
            n += 1;
        }

        match self.tokens.peek(n).kind {
            SyntaxKind::ClassKeyword if self.depth >= RECURSION_LIMIT => self.skip_declaration(),
            SyntaxKind::ClassKeyword => self.class_declaration(),
            kind if n > 0 || RETURN_TYPES.matches(kind) => self.method_declaration(),
            _ => self.skip_tokens(end),
        }
    }

    #[instrument(level = "trace", skip(self), ret)]
    fn class_declaration(&mut self) -> Node<'buf> {
        self.depth += 1;

        let modifiers = self.modifiers();
        let class_keyword = self.expect(SyntaxKind::ClassKeyword);
        let identifier = self.expect(SyntaxKind::IdentifierToken);
        let open_brace = self.expect(SyntaxKind::OpenBraceToken);
        let members = self.member_list(CLASS_BODY_END);
        let close_brace = self.expect(SyntaxKind::CloseBraceToken);

        self.depth -= 1;

        factory::class_declaration(
            modifiers,
            class_keyword,
            identifier,
            open_brace,
            members,
            close_brace,
        )
    }

    #[instrument(level = "trace", skip(self), ret)]
    fn method_declaration(&mut self) -> Node<'buf> {
        let modifiers = self.modifiers();
        let return_type = self.expect_any(RETURN_TYPES, SyntaxKind::IdentifierToken);
        let identifier = self.expect(SyntaxKind::IdentifierToken);
        let open_paren = self.expect(SyntaxKind::OpenParenToken);
        let close_paren = self.expect(SyntaxKind::CloseParenToken);
        let open_brace = self.expect(SyntaxKind::OpenBraceToken);
        let close_brace = self.expect(SyntaxKind::CloseBraceToken);

        factory::method_declaration(
            modifiers,
            return_type,
            identifier,
            open_paren,
            close_paren,
            open_brace,
            close_brace,
        )
    }

    /// Skips to the next token that starts a member or is accepted by `end`.
    fn skip_tokens(&mut self, end: impl Matcher) -> Node<'buf> {
        let mut skipped = vec![self.tokens.consume()];

        loop {
            let kind = self.tokens.current().kind;

            if end.matches(kind) || is_member_start(kind) {
                break;
            }

            skipped.push(self.tokens.consume());
        }

        self.report_skipped(&skipped, |found| SyntaxErrorKind::UnexpectedToken { found });

        factory::skipped_tokens(skipped)
    }

    /// Skips a whole declaration, braces balanced, without building a tree for it.
    fn skip_declaration(&mut self) -> Node<'buf> {
        let mut skipped = vec![];
        let mut depth = 0usize;

        loop {
            let kind = self.tokens.current().kind;

            match kind {
                SyntaxKind::EofToken => break,
                SyntaxKind::CloseBraceToken if depth == 0 => break,
                _ => {}
            }

            skipped.push(self.tokens.consume());

            match kind {
                SyntaxKind::OpenBraceToken => depth += 1,

                SyntaxKind::CloseBraceToken => {
                    depth -= 1;

                    if depth == 0 {
                        break;
                    }
                }

                _ => {}
            }
        }

        self.report_skipped(&skipped, |_| SyntaxErrorKind::RecursionLimit);

        factory::skipped_tokens(skipped)
    }

    fn report_skipped(
        &mut self,
        skipped: &[Token<'buf>],
        kind: impl FnOnce(SyntaxKind) -> SyntaxErrorKind,
    ) {
        if let (Some(first), Some(last)) = (skipped.first(), skipped.last()) {
            self.report(kind(first.kind), first.span.convex_hull(&last.span));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Cursor;
    use crate::syntax::view::{ClassDeclaration, CompilationUnit, Member, MethodDeclaration};
    use crate::syntax::NodeOrToken;

    fn parser(text: &str) -> Parser<'_> {
        Parser::new(Lexer::new(Cursor::from_text(text)))
    }

    fn assert_len_invariant(node: &Node<'_>) {
        let sum: usize = node.children().iter().map(NodeOrToken::len).sum();
        assert_eq!(node.len(), sum, "length mismatch in {:?}", node.kind());

        for child in node.children() {
            if let NodeOrToken::Node(child) = child {
                assert_len_invariant(child);
            }
        }
    }

    #[test]
    fn test_missing_identifier() {
        let parse = parser("class {}").parse_class_declaration();
        let class = ClassDeclaration::cast(&parse.root).unwrap();

        assert!(class.modifiers().children().is_empty());
        assert_eq!(class.class_keyword().text, "class");
        assert_eq!(class.identifier().kind, SyntaxKind::IdentifierToken);
        assert!(class.identifier().is_missing());
        assert_eq!(class.open_brace().text, "{");
        assert_eq!(class.close_brace().text, "}");
        assert_eq!(
            parse.errors,
            [SyntaxError::new(
                SyntaxErrorKind::MissingToken {
                    expected: SyntaxKind::IdentifierToken
                },
                Span::empty_at(class.open_brace().span.start),
            )]
        );
    }

    #[test]
    fn test_modifier_list() {
        let parse = parser("public static sealed class Foo { }").parse_class_declaration();
        let class = ClassDeclaration::cast(&parse.root).unwrap();
        let modifiers: Vec<_> = class.iter_modifiers().map(|token| token.kind).collect();

        assert_eq!(
            modifiers,
            [
                SyntaxKind::PublicKeyword,
                SyntaxKind::StaticKeyword,
                SyntaxKind::SealedKeyword
            ]
        );
        assert_eq!(class.identifier().text, "Foo");
        assert!(parse.errors.is_empty());
    }

    #[test]
    fn test_modifier_list_stops_at_first_non_modifier() {
        let mut parser = parser("public private Foo");
        let list = parser.modifiers();

        assert_eq!(list.kind(), SyntaxKind::List);
        assert_eq!(list.children().len(), 2);
        assert_eq!(parser.tokens.current().text, "Foo");

        let empty = parser.modifiers();
        assert!(empty.children().is_empty());
        assert_eq!(parser.tokens.current().text, "Foo");
    }

    #[test]
    fn test_modifier_list_at_eof() {
        let mut parser = parser("");

        assert!(parser.modifiers().children().is_empty());
        assert_eq!(parser.tokens.current().kind, SyntaxKind::EofToken);
    }

    #[test]
    fn test_class_with_methods() {
        let text = "class Foo {\n  public void Bar() {}\n  static Baz Qux() {}\n}\n";
        let parse = parser(text).parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();
        let classes: Vec<_> = unit.iter_members().collect();

        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
        assert_eq!(classes.len(), 1);

        let Member::Class(class) = classes[0] else {
            panic!("expected a class, got {:?}", classes[0]);
        };

        let methods: Vec<_> = class
            .iter_members()
            .map(|member| match member {
                Member::Method(method) => method,
                other => panic!("expected a method, got {:?}", other),
            })
            .collect();

        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].return_type().kind, SyntaxKind::VoidKeyword);
        assert_eq!(methods[0].identifier().text, "Bar");
        assert_eq!(methods[1].return_type().kind, SyntaxKind::IdentifierToken);
        assert_eq!(methods[1].return_type().text, "Baz");
        assert_eq!(parse.root.to_string(), text);
        assert_len_invariant(&parse.root);
    }

    #[test]
    fn test_method_missing_parts() {
        let parse = parser("class C { public }").parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();
        let Some(Member::Class(class)) = unit.iter_members().next() else {
            panic!("expected a class");
        };
        let Some(Member::Method(method)) = class.iter_members().next() else {
            panic!("expected a method");
        };

        assert_eq!(method.modifiers().children().len(), 1);
        assert!(method.return_type().is_missing());
        assert!(method.identifier().is_missing());
        assert_eq!(method.close_brace().text, "}");
        assert!(class.close_brace().is_missing());
        assert_eq!(parse.errors.len(), 6);
        assert!(parse
            .errors
            .iter()
            .all(|error| matches!(error.kind, SyntaxErrorKind::MissingToken { .. })));
    }

    #[test]
    fn test_skipped_tokens() {
        let text = "1 + 2 class A { ; void M() {} ] }";
        let parse = parser(text).parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();
        let members: Vec<_> = unit.iter_members().collect();

        assert_eq!(members.len(), 2);

        let Member::Skipped(skipped) = members[0] else {
            panic!("expected skipped tokens");
        };
        assert_eq!(skipped.to_string(), "1 + 2 ");

        let Member::Class(class) = members[1] else {
            panic!("expected a class");
        };
        let kinds: Vec<_> = class
            .iter_members()
            .map(|member| match member {
                Member::Class(_) => "class",
                Member::Method(_) => "method",
                Member::Skipped(_) => "skipped",
            })
            .collect();
        assert_eq!(kinds, ["skipped", "method", "skipped"]);

        let found: Vec<_> = parse
            .errors
            .iter()
            .map(|error| error.kind)
            .collect();
        assert_eq!(
            found,
            [
                SyntaxErrorKind::UnexpectedToken {
                    found: SyntaxKind::NumberLiteralToken
                },
                SyntaxErrorKind::UnexpectedToken {
                    found: SyntaxKind::SemicolonToken
                },
                SyntaxErrorKind::UnexpectedToken {
                    found: SyntaxKind::CloseBracketToken
                },
            ]
        );
        assert_eq!(parse.root.to_string(), text);
    }

    #[test]
    fn test_stray_close_brace_at_top_level() {
        let parse = parser("} class A {}").parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();

        assert_eq!(unit.members().children().len(), 2);
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.root.to_string(), "} class A {}");
    }

    #[test]
    fn test_nested_classes() {
        let parse = parser("class A { private class B { int C() {} } }").parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();
        let Some(Member::Class(outer)) = unit.iter_members().next() else {
            panic!("expected a class");
        };
        let Some(Member::Class(inner)) = outer.iter_members().next() else {
            panic!("expected a nested class");
        };
        let Some(Member::Method(method)) = inner.iter_members().next() else {
            panic!("expected a method");
        };

        assert_eq!(inner.identifier().text, "B");
        assert_eq!(method.identifier().text, "C");
        assert!(parse.errors.is_empty());
    }

    #[test]
    fn test_recursion_limit() {
        let depth = RECURSION_LIMIT + 10;
        let text = format!("{}{}", "class A {".repeat(depth), "}".repeat(depth));
        let parse = parser(&text).parse_compilation_unit();

        assert_eq!(parse.root.to_string(), text);
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].kind, SyntaxErrorKind::RecursionLimit);
        assert_len_invariant(&parse.root);
    }

    #[test]
    fn test_unclosed_class_at_eof() {
        let parse = parser("class A { void M(").parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();

        assert_eq!(unit.eof_token().kind, SyntaxKind::EofToken);
        assert_eq!(parse.root.to_string(), "class A { void M(");

        let expected: Vec<_> = parse
            .errors
            .iter()
            .filter_map(|error| match error.kind {
                SyntaxErrorKind::MissingToken { expected } => Some(expected),
                _ => None,
            })
            .collect();
        assert_eq!(
            expected,
            [
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::CloseBraceToken,
            ]
        );
    }

    #[test]
    fn test_errors_are_sorted() {
        let parse = parser("class # { void () {} }").parse_compilation_unit();
        let offsets: Vec<_> = parse
            .errors
            .iter()
            .map(|error| error.span.start.byte)
            .collect();

        assert!(parse.errors[0].kind.is_lexical());
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_method_view() {
        let parse = parser("virtual string Name() {}").parse_compilation_unit();
        let unit = CompilationUnit::cast(&parse.root).unwrap();
        let method = unit
            .members()
            .children()
            .first()
            .and_then(|child| MethodDeclaration::cast(child.unwrap_node()))
            .unwrap();

        assert_eq!(method.return_type().kind, SyntaxKind::StringKeyword);
        assert_eq!(method.open_paren().text, "(");
        assert_eq!(method.close_paren().text, ")");
        assert_eq!(method.open_brace().text, "{");
        assert!(ClassDeclaration::cast(method.syntax()).is_none());
    }
}
