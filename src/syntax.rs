//! The lossless syntax tree: kinds, tokens with their trivia, and nodes.
//!
//! Trees are built once by the parser through [`factory`] and never mutated afterwards.
//! Printing a tree (or any token in it) with `Display` writes back the exact text it was built
//! from, trivia included.

pub mod dump;
pub mod factory;
mod kind;
mod tree;
pub mod view;

pub use kind::SyntaxKind;
pub use tree::{Node, NodeOrToken, Token, Tokens, Trivia};
