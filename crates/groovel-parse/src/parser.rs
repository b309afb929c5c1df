use drop_bomb::DropBomb;
use groovel_errors::Diagnostic;
use groovel_syntax::{Builder, SyntaxKind, SyntaxSet, SyntaxTree};
use groovel_tokenizer::{Dialect, Token, tokenize};
use text_size::TextRange;

use crate::messages::Message;

/// How deep statements and expressions may nest before the rest of the
/// construct is skipped.
const MAX_DEPTH: u32 = 128;

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
    /// `(child, parent)` event indices recorded by `CompletedMarker::precede`.
    forward_links: Vec<(u32, u32)>,
    open_markers: u32,
    depth: u32,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str, dialect: Dialect) -> Self {
        Self {
            text,
            tokens: tokenize(text, dialect),
            pos: 0,
            events: Vec::new(),
            diagnostics: Vec::new(),
            forward_links: Vec::new(),
            open_markers: 0,
            depth: 0,
        }
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    pub(crate) fn current_text(&self) -> &'t str {
        &self.text[self.current_range()]
    }

    pub(crate) fn current_range(&self) -> TextRange {
        self.tokens[self.pos].kind_range
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn open_markers(&self) -> u32 {
        self.open_markers
    }

    /// Runs `f` one nesting level deeper. Returns `None` without touching the
    /// input once the nesting limit is reached.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        Some(result)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    pub(crate) fn at_set(&self, set: SyntaxSet) -> bool {
        set.contains(self.current())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    pub(crate) fn advance(&mut self) {
        if self.at_eof() {
            return;
        }

        self.events.push(Event::Token(self.pos as u32));
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, message: Message) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(message);
        false
    }

    /// Attaches the final `EOF` token to the open root node.
    pub(crate) fn eof(&mut self) {
        debug_assert!(self.at_eof());
        self.events.push(Event::Token(self.pos as u32));
    }

    pub(crate) fn start(&mut self) -> Marker {
        let position = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        self.open_markers += 1;
        Marker::new(position, self.savepoint(), self.pos as u32)
    }

    /// Reports `message` at the current token.
    pub(crate) fn error(&mut self, message: Message) {
        let range = self.current_range();
        self.error_at(message, range);
    }

    fn error_at(&mut self, message: Message, range: TextRange) {
        self.diagnostics.push(Diagnostic::new(message.kind(), message.text(), range));
    }

    fn savepoint(&self) -> Savepoint {
        Savepoint { pos: self.pos as u32, diagnostics: self.diagnostics.len() as u32 }
    }

    /// Range of the tokens consumed since `start_token`; empty at the current
    /// token when nothing was consumed.
    fn range_since(&self, start_token: u32) -> TextRange {
        let start_token = start_token as usize;
        if start_token >= self.pos {
            return TextRange::empty(self.current_range().start());
        }
        let start = self.tokens[start_token].kind_range.start();
        let end = self.tokens[self.pos - 1].kind_range.end();
        TextRange::new(start, end)
    }

    fn restore(&mut self, events_len: u32, savepoint: Savepoint) {
        self.truncate_events(events_len);
        self.pos = savepoint.pos as usize;
        self.diagnostics.truncate(savepoint.diagnostics as usize);
    }

    fn truncate_events(&mut self, events_len: u32) {
        self.events.truncate(events_len as usize);
        while let Some(&(child, parent)) = self.forward_links.last() {
            if parent < events_len {
                break;
            }
            self.forward_links.pop();
            if let Some(Event::Start { forward_parent, .. }) = self.events.get_mut(child as usize)
            {
                *forward_parent = None;
            }
        }
    }

    pub(crate) fn finish(self) -> (SyntaxTree, Vec<Diagnostic>) {
        assert_eq!(self.open_markers(), 0, "every marker must be resolved before finishing");

        let Parser { text, tokens, mut events, diagnostics, .. } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE && forward_parent.is_none() {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                forward_parents.push(kind);
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        if kind != SyntaxKind::TOMBSTONE {
                            builder.start_node(kind);
                        }
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(index) => {
                    let Token { leading, kind, kind_range, trailing } = &tokens[index as usize];
                    builder.token(
                        leading.pieces().iter().copied(),
                        *kind,
                        kind_range.len(),
                        trailing.pieces().iter().copied(),
                    );
                }
            }
        }

        (builder.finish(), diagnostics)
    }
}

#[derive(Clone, Copy)]
struct Savepoint {
    pos: u32,
    diagnostics: u32,
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(u32),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    savepoint: Savepoint,
    start_token: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(position: u32, savepoint: Savepoint, start_token: u32) -> Self {
        Self {
            position,
            savepoint,
            start_token,
            bomb: DropBomb::new("Marker must be completed, abandoned or rolled back"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();
        p.open_markers -= 1;

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position, self.start_token, kind)
    }

    /// Completes the marker as an `ERROR` node and reports `message` over
    /// everything consumed since it was opened.
    pub(crate) fn error(self, p: &mut Parser<'_>, message: Message) -> CompletedMarker {
        let range = p.range_since(self.start_token);
        p.error_at(message, range);
        self.complete(p, SyntaxKind::ERROR)
    }

    /// Keeps what was parsed inside the marker without creating a node.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();
        p.open_markers -= 1;

        if self.position as usize == p.events.len() - 1 {
            p.truncate_events(self.position);
        }
    }

    /// Discards the marker together with every token, node and diagnostic
    /// produced since it was opened.
    pub(crate) fn rollback(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();
        p.open_markers -= 1;
        p.restore(self.position, self.savepoint);
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
    start_token: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    fn new(pos: u32, start_token: u32, kind: SyntaxKind) -> Self {
        Self { pos, start_token, kind }
    }

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Opens a marker that becomes the parent of this node.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let mut new_pos = p.start();
        new_pos.start_token = self.start_token;

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }
        p.forward_links.push((self.pos, new_pos.position));

        new_pos
    }
}
