use groovel_syntax::SyntaxKind::*;
use groovel_syntax::SyntaxSet;

use crate::messages::Message;
use crate::parser::{CompletedMarker, Parser};

pub(crate) mod control;
pub(crate) mod declarations;
pub(crate) mod exprs;
pub(crate) mod statements;
pub(crate) mod template;
pub(crate) mod toplevel;
pub(crate) mod type_defs;
pub(crate) mod types;

const SEPARATORS: SyntaxSet = SyntaxSet::new([SEMICOLON, NEWLINE]);

/// Tokens a statement may legitimately be followed by.
const STATEMENT_END: SyntaxSet =
    SyntaxSet::new([SEMICOLON, NEWLINE, RIGHT_BRACE, TEMPLATE_TEXT, EOF]);

/// Where `clean_after_error` stops skipping.
const RECOVERY_STOP: SyntaxSet = SyntaxSet::new([SEMICOLON, NEWLINE, RIGHT_BRACE, TEMPLATE_TEXT]);

/// Consumes a run of `;` and newlines.
pub(crate) fn separators(p: &mut Parser<'_>) -> bool {
    let mut consumed = false;
    while p.at_set(SEPARATORS) {
        p.advance();
        consumed = true;
    }
    consumed
}

pub(crate) fn eat_newlines(p: &mut Parser<'_>) {
    while p.eat(NEWLINE) {}
}

/// Separators interleaved with template fragments.
pub(crate) fn separators_and_fragments(p: &mut Parser<'_>) {
    while separators(p) || template::fragment(p) {}
}

/// Skips to the next newline, `;`, `}` or template fragment, reporting the
/// skipped run once.
pub(crate) fn clean_after_error(p: &mut Parser<'_>) {
    let m = p.start();
    let mut skipped = 0;
    while !p.at_eof() && !p.at_set(RECOVERY_STOP) {
        p.advance();
        skipped += 1;
    }

    if skipped > 0 {
        m.error(p, Message::SeparatorOrRCurlyExpected);
    } else {
        m.abandon(p);
    }
}

/// Past the nesting limit: skips the rest of the construct as one `ERROR`.
/// Returns `None` when there was nothing left to skip.
pub(crate) fn nesting_too_deep(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let m = p.start();
    let start = p.pos();
    while !p.at_eof() && !p.at_set(RECOVERY_STOP) {
        p.advance();
    }

    if p.pos() == start {
        m.abandon(p);
        p.error(Message::NestingTooDeep);
        return None;
    }
    Some(m.error(p, Message::NestingTooDeep))
}

/// Wraps the current token in an `ERROR` node.
pub(crate) fn wrap_error(p: &mut Parser<'_>, message: Message) {
    let m = p.start();
    p.advance();
    m.error(p, message);
}

/// Statements separated by `;`/newlines up to `end` or the end of input.
///
/// Every iteration consumes at least one token, so the loop terminates on any
/// input.
pub(crate) fn statement_list(p: &mut Parser<'_>, end: SyntaxSet, with_imports: bool) {
    loop {
        separators_and_fragments(p);
        if p.at_eof() || p.at_set(end) {
            return;
        }

        let start = p.pos();
        if with_imports {
            statements::statement_with_imports(p);
        } else {
            statements::statement(p, false);
        }

        if !p.at_set(STATEMENT_END) && !p.at_set(end) {
            clean_after_error(p);
        }
        if p.pos() == start {
            wrap_error(p, Message::WrongStatement);
        }
    }
}

/// A `{ ... }` block with its statements.
pub(crate) fn block(p: &mut Parser<'_>) {
    debug_assert!(p.at(LEFT_BRACE));

    let m = p.start();
    p.advance();
    statement_list(p, SyntaxSet::new([RIGHT_BRACE]), false);
    p.expect(RIGHT_BRACE, Message::RCurlyExpected);
    m.complete(p, BLOCK);
}

/// Parses a block if one follows, otherwise reports it as missing.
pub(crate) fn block_or_error(p: &mut Parser<'_>) -> bool {
    if p.at(LEFT_BRACE) {
        block(p);
        true
    } else {
        p.error(Message::LCurlyExpected);
        false
    }
}

/// A dotted name such as `java.util.List`; segments may be keywords.
pub(crate) fn qualified_name(p: &mut Parser<'_>) -> bool {
    if !p.eat(IDENT) {
        p.error(Message::IdentifierExpected);
        return false;
    }

    while p.at(DOT) && (p.nth_at(1, IDENT) || p.nth(1).is_keyword()) {
        p.advance();
        p.advance();
    }
    true
}
