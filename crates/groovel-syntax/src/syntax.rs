//! Public syntax tree API built on immutable, parent-linked nodes.

use std::fmt::{self, Write as _};

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// Owned, lossless syntax tree for a single source text.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    pub(crate) nodes: Box<[Node]>,
    pub(crate) children: Box<[Child]>,
    pub(crate) tokens: Box<[Token]>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) parent: Option<u32>,
    pub(crate) kind: SyntaxKind,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    /// Inclusive token range, trivia included. `first_token == last_token + 1`
    /// marks an empty node.
    pub(crate) first_token: u32,
    pub(crate) last_token: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Node(u32),
    Token(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: SyntaxKind,
    pub(crate) end: TextSize,
    pub(crate) parent: u32,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    #[inline]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Returns the full source text for this tree.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Indented dump: one line per node and per non-trivia token, with
    /// trimmed ranges.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        dump(&mut out, self.root(), 0);
        out
    }

    fn token_start(&self, index: u32) -> TextSize {
        self.tokens[index as usize - 1].end
    }
}

fn dump(out: &mut String, node: SyntaxNode<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.trimmed_range());

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(node) => dump(out, node, depth + 1),
            NodeOrToken::Token(token) => {
                _ = writeln!(
                    out,
                    "{indent}  {:?}@{:?} {:?}",
                    token.kind(),
                    token.text_range(),
                    token.text()
                );
            }
        }
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.text().len())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

/// Either a node or a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl<'a> SyntaxNode<'a> {
    #[inline]
    fn data(self) -> &'a Node {
        &self.tree.nodes[self.index as usize]
    }

    /// Returns this node's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the text range covered by this node, trivia included.
    #[inline]
    pub fn text_range(self) -> TextRange {
        let node = self.data();
        let end = self.tree.tokens[node.last_token as usize].end;
        if node.first_token > node.last_token {
            return TextRange::empty(end);
        }
        TextRange::new(self.tree.token_start(node.first_token), end)
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    pub fn trimmed_range(self) -> TextRange {
        let node = self.data();
        let tokens = node.first_token..=node.last_token;
        let is_significant = |index: &u32| !self.tree.tokens[*index as usize].kind.is_trivia();

        let first = tokens.clone().find(is_significant);
        let last = tokens.rev().find(is_significant);
        match (first, last) {
            (Some(first), Some(last)) => TextRange::new(
                self.tree.token_start(first),
                self.tree.tokens[last as usize].end,
            ),
            _ => self.text_range(),
        }
    }

    /// Returns the text slice covered by this node.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the text slice excluding leading/trailing trivia.
    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, index: self.data().parent? })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// Iterates child nodes and non-trivia tokens in source order.
    pub fn children_with_tokens(self) -> impl Iterator<Item = SyntaxElement<'a>> + Clone {
        let node = self.data();
        let start = node.children_start as usize;
        let children = &self.tree.children[start..start + node.children_len as usize];
        let tree = self.tree;

        children.iter().map(move |child| match *child {
            Child::Node(index) => NodeOrToken::Node(SyntaxNode { tree, index }),
            Child::Token(index) => NodeOrToken::Token(SyntaxToken { tree, index }),
        })
    }

    /// Iterates child nodes, skipping tokens.
    pub fn children(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    /// Iterates direct non-trivia tokens.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + Clone {
        self.children_with_tokens().filter_map(NodeOrToken::into_token)
    }

    /// Returns the first child node of the given kind.
    pub fn child_of_kind(self, kind: SyntaxKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }

    /// Returns the first direct token of the given kind.
    pub fn token_of_kind(self, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
        self.tokens().find(|token| token.kind() == kind)
    }

    /// Preorder traversal of this node and all nodes below it.
    pub fn descendants(self) -> Descendants<'a> {
        Descendants { stack: vec![self] }
    }
}

/// Preorder iterator over nodes.
pub struct Descendants<'a> {
    stack: Vec<SyntaxNode<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let len = self.stack.len();
        self.stack.extend(node.children());
        self.stack[len..].reverse();
        Some(node)
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxToken<'_> {}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    fn data(self) -> Token {
        self.tree.tokens[self.index as usize]
    }

    /// Returns this token's kind.
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns `true` if this token is trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// Returns the token text range, trivia excluded.
    #[inline]
    pub fn text_range(self) -> TextRange {
        TextRange::new(self.tree.token_start(self.index), self.data().end)
    }

    /// Returns the token text.
    #[inline]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the parent node.
    #[inline]
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.data().parent }
    }

    /// Returns the next token, trivia included.
    #[inline]
    pub fn next_token(self) -> Option<Self> {
        let index = self.index + 1;
        ((index as usize) < self.tree.tokens.len()).then_some(Self { tree: self.tree, index })
    }

    /// Returns the previous token, trivia included.
    #[inline]
    pub fn prev_token(self) -> Option<Self> {
        (self.index > 1).then(|| Self { tree: self.tree, index: self.index - 1 })
    }
}
