//! Lossless, immutable syntax tree for Groovy sources.
//!
//! The parser replays its events into a [`Builder`]; the finished
//! [`SyntaxTree`] is navigated through copyable, index-based handles.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Primary syntax tree API types and adapters.
pub use syntax::{
    Descendants, NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{Trivia, TriviaPiece, TriviaPieceKind};
