use groovel_syntax::SyntaxKind::*;

use crate::messages::Message;
use crate::parser::{CompletedMarker, Parser};

/// `int`, `a.b.C`, `List<String>`, `Map<K, ? extends V>[]`.
///
/// Returns `None` without consuming anything when no type starts here.
pub(crate) fn type_(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    p.nested(type_inner).flatten()
}

fn type_inner(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.current().is_primitive_type() && !p.at(IDENT) {
        return None;
    }

    let m = p.start();
    if p.current().is_primitive_type() {
        p.advance();
    } else {
        p.advance();
        while p.at(DOT) && p.nth_at(1, IDENT) {
            p.advance();
            p.advance();
        }
        if p.at(LT) {
            type_args(p);
        }
    }

    while p.at(LEFT_BRACKET) && p.nth_at(1, RIGHT_BRACKET) {
        p.advance();
        p.advance();
    }

    Some(m.complete(p, TYPE))
}

pub(crate) fn type_or_error(p: &mut Parser<'_>) {
    if type_(p).is_none() {
        p.error(Message::TypeExpected);
    }
}

/// `<A, ? extends B>`
fn type_args(p: &mut Parser<'_>) {
    debug_assert!(p.at(LT));

    let m = p.start();
    p.advance();

    loop {
        if p.at(QUESTION) {
            let wildcard = p.start();
            p.advance();
            if p.eat(EXTENDS_KW) || p.eat(SUPER_KW) {
                type_or_error(p);
            }
            wildcard.complete(p, WILDCARD_TYPE);
        } else if type_(p).is_none() {
            p.error(Message::TypeExpected);
            break;
        }

        if !p.eat(COMMA) {
            break;
        }
    }

    p.expect(GT, Message::GtExpected);
    m.complete(p, TYPE_ARG_LIST);
}

/// `<T, U extends Comparable<U>>` on a class or method.
pub(crate) fn type_params(p: &mut Parser<'_>) {
    debug_assert!(p.at(LT));

    let m = p.start();
    p.advance();

    loop {
        let param = p.start();
        p.expect(IDENT, Message::IdentifierExpected);
        if p.eat(EXTENDS_KW) {
            type_or_error(p);
            while p.eat(AMP) {
                type_or_error(p);
            }
        }
        param.complete(p, TYPE_PARAM);

        if !p.eat(COMMA) {
            break;
        }
    }

    p.expect(GT, Message::GtExpected);
    m.complete(p, TYPE_PARAM_LIST);
}
