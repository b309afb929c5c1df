use groovel_syntax::SyntaxKind::*;
use groovel_syntax::SyntaxSet;

use super::{declarations, qualified_name, separators_and_fragments, statement_list, statements};
use crate::messages::Message;
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn file(p: &mut Parser<'_>) {
    let m = p.start();

    separators_and_fragments(p);
    if p.at(PACKAGE_KW) || (p.at(AT) && !p.nth_at(1, INTERFACE_KW) && has_package_after_annotations(p))
    {
        package(p);
    }
    statement_list(p, SyntaxSet::EMPTY, true);

    p.eof();
    m.complete(p, FILE);
}

/// A single statement, as used by embedding contexts.
pub(crate) fn statement_fragment(p: &mut Parser<'_>) {
    let m = p.start();

    separators_and_fragments(p);
    if !p.at_eof() {
        statements::statement(p, false);
    }
    separators_and_fragments(p);
    trailing_garbage(p);

    p.eof();
    m.complete(p, FRAGMENT);
}

/// The statements of a block body without the braces.
pub(crate) fn block_body_fragment(p: &mut Parser<'_>) {
    let m = p.start();

    statement_list(p, SyntaxSet::new([RIGHT_BRACE]), false);
    trailing_garbage(p);

    p.eof();
    m.complete(p, FRAGMENT);
}

fn trailing_garbage(p: &mut Parser<'_>) {
    if p.at_eof() {
        return;
    }

    let m = p.start();
    while !p.at_eof() {
        p.advance();
    }
    m.error(p, Message::UnexpectedInput);
}

fn has_package_after_annotations(p: &mut Parser<'_>) -> bool {
    let probe = p.start();
    declarations::modifiers(p);
    let found = p.at(PACKAGE_KW);
    probe.rollback(p);
    found
}

fn package(p: &mut Parser<'_>) {
    let m = p.start();
    declarations::modifiers(p);
    p.expect(PACKAGE_KW, Message::UnexpectedInput);
    qualified_name(p);
    m.complete(p, PACKAGE_DEF);
}

/// `import [static] a.b.C[.*] [as D]`
pub(crate) fn import(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(IMPORT_KW));

    let m = p.start();
    p.advance();
    p.eat(STATIC_KW);

    if qualified_name(p) && p.at(DOT) && p.nth_at(1, STAR) {
        p.advance();
        p.advance();
    }

    if p.eat(AS_KW) {
        p.expect(IDENT, Message::IdentifierExpected);
    }

    m.complete(p, IMPORT_STMT)
}
