//! Typed, read-only views over the node shapes built by the [factory](crate::syntax::factory).

use crate::syntax::{Node, SyntaxKind, Token};

macro_rules! node_views {
    (@slot $slot:ident : Node = $idx:literal) => {
        pub fn $slot(&self) -> &'a Node<'buf> {
            self.0.children()[$idx].unwrap_node()
        }
    };

    (@slot $slot:ident : Token = $idx:literal) => {
        pub fn $slot(&self) -> &'a Token<'buf> {
            self.0.children()[$idx].unwrap_token()
        }
    };

    ($(
        $( #[$attr:meta] )*
        $name:ident { $( $slot:ident : $ty:ident = $idx:literal ),+ $(,)? }
    )+) => {
        $(
            $( #[$attr] )*
            #[derive(Debug, Clone, Copy)]
            pub struct $name<'a, 'buf>(&'a Node<'buf>);

            impl<'a, 'buf> $name<'a, 'buf> {
                pub fn cast(node: &'a Node<'buf>) -> Option<Self> {
                    (node.kind() == SyntaxKind::$name).then_some(Self(node))
                }

                pub fn syntax(&self) -> &'a Node<'buf> {
                    self.0
                }

                $( node_views!(@slot $slot : $ty = $idx); )+
            }
        )+
    };
}

node_views! {
    CompilationUnit {
        members: Node = 0,
        eof_token: Token = 1,
    }

    ClassDeclaration {
        modifiers: Node = 0,
        class_keyword: Token = 1,
        identifier: Token = 2,
        open_brace: Token = 3,
        members: Node = 4,
        close_brace: Token = 5,
    }

    MethodDeclaration {
        modifiers: Node = 0,
        return_type: Token = 1,
        identifier: Token = 2,
        open_paren: Token = 3,
        close_paren: Token = 4,
        open_brace: Token = 5,
        close_brace: Token = 6,
    }
}

/// A member of a compilation unit or a class body.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a, 'buf> {
    Class(ClassDeclaration<'a, 'buf>),
    Method(MethodDeclaration<'a, 'buf>),
    Skipped(&'a Node<'buf>),
}

impl<'a, 'buf> Member<'a, 'buf> {
    pub fn cast(node: &'a Node<'buf>) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ClassDeclaration => Some(Self::Class(ClassDeclaration(node))),
            SyntaxKind::MethodDeclaration => Some(Self::Method(MethodDeclaration(node))),
            SyntaxKind::SkippedTokens => Some(Self::Skipped(node)),
            _ => None,
        }
    }
}

/// Iterates over the members in a member list.
pub fn members<'a, 'buf>(list: &'a Node<'buf>) -> impl Iterator<Item = Member<'a, 'buf>> + 'a {
    list.children()
        .iter()
        .filter_map(|child| child.as_node())
        .filter_map(Member::cast)
}

impl<'a, 'buf> CompilationUnit<'a, 'buf> {
    pub fn iter_members(&self) -> impl Iterator<Item = Member<'a, 'buf>> + 'a {
        members(self.members())
    }
}

impl<'a, 'buf> ClassDeclaration<'a, 'buf> {
    pub fn iter_members(&self) -> impl Iterator<Item = Member<'a, 'buf>> + 'a {
        members(self.members())
    }

    pub fn iter_modifiers(&self) -> impl Iterator<Item = &'a Token<'buf>> + 'a {
        self.modifiers().tokens()
    }
}

impl<'a, 'buf> MethodDeclaration<'a, 'buf> {
    pub fn iter_modifiers(&self) -> impl Iterator<Item = &'a Token<'buf>> + 'a {
        self.modifiers().tokens()
    }
}
