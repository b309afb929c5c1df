//! Incremental builder for the immutable syntax tree.

use text_size::TextSize;

use crate::syntax::{Child, Node, Token};
use crate::{SyntaxKind, SyntaxTree, TriviaPiece};

struct PendingNode {
    parent: Option<u32>,
    kind: SyntaxKind,
    children: (u32, u32),
    first_last_token: Option<(u32, u32)>,
}

struct Opened {
    node: usize,
    children: Vec<Child>,
}

/// Builds a `SyntaxTree` from parser events.
pub struct Builder {
    text: Box<str>,
    nodes: Vec<PendingNode>,
    children: Vec<Child>,
    tokens: Vec<Token>,

    children_pool: Vec<Vec<Child>>,
    opened: Vec<Opened>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 64;
const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_CHILDREN_LEN: usize = 8;

impl Builder {
    /// Creates a new builder for `text`.
    ///
    /// The token buffer is seeded with a fake token at index 0 so that every
    /// real token can read its start offset from its predecessor.
    pub fn new(text: &str) -> Self {
        let mut tokens = Vec::with_capacity(DEFAULT_TREE_SIZE);
        tokens.push(Token { kind: SyntaxKind::TOMBSTONE, end: TextSize::new(0), parent: 0 });
        Self {
            text: text.into(),
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),
            tokens,

            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
        }
    }

    fn new_children_vec(&mut self) -> Vec<Child> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    #[track_caller]
    fn current_node(&self) -> usize {
        self.opened.last().expect("no opened nodes?").node
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        let new_node = self.nodes.len();
        let parent = self.opened.last().map(|opened| opened.node as u32);
        self.nodes.push(PendingNode { parent, kind, children: (0, 0), first_last_token: None });

        if let Some(opened) = self.opened.last_mut() {
            opened.children.push(Child::Node(new_node as u32));
        }

        let children = self.new_children_vec();
        self.opened.push(Opened { node: new_node, children });
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let Opened { node, mut children } = self.opened.pop().expect("no opened nodes?");
        let last_token = (self.tokens.len() - 1) as u32;
        let pending = &mut self.nodes[node];

        if pending.first_last_token.is_none() {
            // Empty node: an empty token range right after the last token.
            pending.first_last_token = Some((last_token + 1, last_token));
        }

        pending.children = (self.children.len() as u32, children.len() as u32);
        self.children.append(&mut children);
        self.children_pool.push(children);
    }

    /// Adds a token with its leading and trailing trivia.
    pub fn token(
        &mut self,
        leading_trivia: impl IntoIterator<Item = TriviaPiece>,
        kind: SyntaxKind,
        text_len: TextSize,
        trailing_trivia: impl IntoIterator<Item = TriviaPiece>,
    ) {
        let parent = self.current_node();
        let first_token = self.tokens.len();

        for piece in leading_trivia {
            self.push_token(piece.kind.syntax_kind(), piece.len, parent);
        }

        let token = self.push_token(kind, text_len, parent);
        if let Some(opened) = self.opened.last_mut() {
            opened.children.push(Child::Token(token));
        }

        for piece in trailing_trivia {
            self.push_token(piece.kind.syntax_kind(), piece.len, parent);
        }

        let last_token = self.tokens.len() - 1;
        self.update_first_last_tokens(first_token as u32, last_token as u32);
    }

    fn push_token(&mut self, kind: SyntaxKind, len: TextSize, parent: usize) -> u32 {
        self.text_len += len;
        assert!(
            self.text.is_char_boundary(usize::from(self.text_len)),
            "token ends outside of a char boundary"
        );
        self.tokens.push(Token { kind, end: self.text_len, parent: parent as u32 });
        (self.tokens.len() - 1) as u32
    }

    /// Updates token ranges for all open ancestor nodes.
    fn update_first_last_tokens(&mut self, first_token: u32, last_token: u32) {
        for opened in &self.opened {
            let node = &mut self.nodes[opened.node];
            match &mut node.first_last_token {
                None => node.first_last_token = Some((first_token, last_token)),
                Some((_first, last)) => *last = last_token,
            }
        }
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unbalanced `start_node`/`finish_node` calls");
        assert!(!self.nodes.is_empty(), "tree without a root node");
        debug_assert_eq!(
            usize::from(self.text_len),
            self.text.len(),
            "tokens do not cover the whole text"
        );

        let nodes = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|node| {
                let (first_token, last_token) =
                    node.first_last_token.expect("node was never finished");
                Node {
                    parent: node.parent,
                    kind: node.kind,
                    children_start: node.children.0,
                    children_len: node.children.1,
                    first_token,
                    last_token,
                }
            })
            .collect();

        SyntaxTree {
            text: std::mem::take(&mut self.text),
            nodes,
            children: std::mem::take(&mut self.children).into_boxed_slice(),
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
        }
    }
}
