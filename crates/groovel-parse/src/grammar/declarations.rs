use groovel_syntax::SyntaxKind::*;
use groovel_syntax::SyntaxSet;

use super::{block, eat_newlines, exprs, qualified_name, types};
use crate::messages::Message;
use crate::parser::Parser;

pub(crate) const MODIFIERS: SyntaxSet = SyntaxSet::new([
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    STATIC_KW,
    FINAL_KW,
    ABSTRACT_KW,
    DEF_KW,
    SYNCHRONIZED_KW,
    TRANSIENT_KW,
    VOLATILE_KW,
    NATIVE_KW,
    STRICTFP_KW,
]);

/// Modifier keywords and annotations, collected into a `MODIFIER_LIST`.
/// Nothing is produced when there are none.
pub(crate) fn modifiers(p: &mut Parser<'_>) -> bool {
    if !at_modifier(p) {
        return false;
    }

    let m = p.start();
    while at_modifier(p) {
        if p.at(AT) {
            annotation(p);
        } else {
            p.advance();
        }
        eat_newlines(p);
    }
    m.complete(p, MODIFIER_LIST);
    true
}

fn at_modifier(p: &Parser<'_>) -> bool {
    p.at_set(MODIFIERS) || (p.at(AT) && !p.nth_at(1, INTERFACE_KW))
}

/// `@a.b.Name` with optional arguments.
fn annotation(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    qualified_name(p);
    if p.at(LEFT_PAREN) {
        exprs::arg_list(p);
    }
    m.complete(p, ANNOTATION);
}

/// A variable or method declaration.
///
/// Returns `false`, having consumed nothing, when the tokens do not form the
/// head of a declaration. Without modifiers the type has to be primitive or
/// capitalised, which keeps `println x` a command call.
pub(crate) fn declaration(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    let has_modifiers = modifiers(p);

    if !declaration_type(p, has_modifiers) || !p.at(IDENT) {
        m.rollback(p);
        return false;
    }

    if p.nth_at(1, LEFT_PAREN) {
        p.advance();
        method_rest(p);
        m.complete(p, METHOD_DEF);
    } else {
        variables(p);
        m.complete(p, VARIABLE_DEF);
    }
    true
}

/// Parses the declared type, if any. Returns `false` when the head cannot
/// belong to a declaration.
fn declaration_type(p: &mut Parser<'_>, has_modifiers: bool) -> bool {
    if p.current().is_primitive_type() {
        return types::type_(p).is_some();
    }

    if !p.at(IDENT) {
        return false;
    }

    if !has_modifiers && !starts_with_uppercase(p.current_text()) {
        return false;
    }

    let ty = p.start();
    if types::type_(p).is_some() && p.at(IDENT) {
        ty.abandon(p);
        return true;
    }
    ty.rollback(p);

    // `def name`: the identifier is the name, not a type.
    has_modifiers
}

fn starts_with_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// `name [= init] (, name [= init])*`
pub(crate) fn variables(p: &mut Parser<'_>) {
    loop {
        let m = p.start();
        p.expect(IDENT, Message::IdentifierExpected);
        if p.eat(EQ) {
            eat_newlines(p);
            if exprs::expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
        }
        m.complete(p, VARIABLE);

        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }
}

/// Parameters, optional `throws` clause and optional body, after the name.
pub(crate) fn method_rest(p: &mut Parser<'_>) {
    param_list(p);

    if p.at(THROWS_KW) {
        let m = p.start();
        p.advance();
        types::type_or_error(p);
        while p.eat(COMMA) {
            types::type_or_error(p);
        }
        m.complete(p, THROWS_CLAUSE);
    }

    if p.at(LEFT_BRACE) || (p.at(NEWLINE) && p.nth_at(1, LEFT_BRACE)) {
        eat_newlines(p);
        block(p);
    }
}

/// `(a, String b, int c = 1)`
pub(crate) fn param_list(p: &mut Parser<'_>) {
    debug_assert!(p.at(LEFT_PAREN));

    let m = p.start();
    p.advance();
    eat_newlines(p);

    while !p.at(RIGHT_PAREN) && !p.at_eof() {
        if !param(p) {
            p.error(Message::IdentifierExpected);
            break;
        }
        eat_newlines(p);
        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }

    p.expect(RIGHT_PAREN, Message::RParenExpected);
    m.complete(p, PARAM_LIST);
}

/// `[modifiers] [Type] name [= default]`
pub(crate) fn param(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    let has_modifiers = modifiers(p);

    let untyped = p.at(IDENT) && matches!(p.nth(1), COMMA | RIGHT_PAREN | EQ | ARROW | NEWLINE);
    if !untyped && types::type_(p).is_none() && !has_modifiers {
        m.rollback(p);
        return false;
    }

    if !p.at(IDENT) {
        m.rollback(p);
        return false;
    }
    p.advance();

    if p.eat(EQ) {
        eat_newlines(p);
        if exprs::expr(p).is_none() {
            p.error(Message::ExpressionExpected);
        }
    }

    m.complete(p, PARAM);
    true
}
