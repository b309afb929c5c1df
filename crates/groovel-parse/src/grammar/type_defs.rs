use groovel_syntax::SyntaxKind::{self, *};

use super::{
    block, clean_after_error, declarations, eat_newlines, exprs, separators, types, wrap_error,
};
use crate::messages::Message;
use crate::parser::Parser;

/// `class`, `interface` or `enum` with its modifiers. Returns `false`, having
/// consumed nothing, when no type definition starts here.
pub(crate) fn type_definition(p: &mut Parser<'_>) -> bool {
    p.nested(definition).unwrap_or(false)
}

fn definition(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    declarations::modifiers(p);

    let kind = match p.current() {
        CLASS_KW => CLASS_DEF,
        INTERFACE_KW => INTERFACE_DEF,
        ENUM_KW => ENUM_DEF,
        AT if p.nth_at(1, INTERFACE_KW) => {
            p.advance();
            INTERFACE_DEF
        }
        _ => {
            m.rollback(p);
            return false;
        }
    };
    p.advance();

    let name = p.current_text();
    if !p.expect(IDENT, Message::IdentifierExpected) {
        m.complete(p, kind);
        return true;
    }

    if p.at(LT) {
        types::type_params(p);
    }
    if p.at(EXTENDS_KW) {
        type_list_clause(p, EXTENDS_CLAUSE);
    }
    if p.at(IMPLEMENTS_KW) {
        type_list_clause(p, IMPLEMENTS_CLAUSE);
    }

    eat_newlines(p);
    if p.at(LEFT_BRACE) {
        class_body(p, name, kind == ENUM_DEF);
    } else {
        p.error(Message::LCurlyExpected);
    }

    m.complete(p, kind);
    true
}

fn type_list_clause(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    p.advance();
    types::type_or_error(p);
    while p.eat(COMMA) {
        eat_newlines(p);
        types::type_or_error(p);
    }
    m.complete(p, kind);
}

/// `{ members }`; enums start with their constants.
pub(crate) fn class_body(p: &mut Parser<'_>, class_name: &str, is_enum: bool) {
    debug_assert!(p.at(LEFT_BRACE));

    let m = p.start();
    p.advance();
    separators(p);

    if is_enum {
        enum_constants(p);
    }

    loop {
        separators(p);
        if p.at(RIGHT_BRACE) || p.at_eof() {
            break;
        }

        let start = p.pos();
        if !member(p, class_name) {
            clean_after_error(p);
        }
        if p.pos() == start {
            wrap_error(p, Message::WrongStatement);
        }
    }

    p.expect(RIGHT_BRACE, Message::RCurlyExpected);
    m.complete(p, CLASS_BODY);
}

/// `A, B(1), C { ... }` up to `;` or the first member.
fn enum_constants(p: &mut Parser<'_>) {
    while p.at(IDENT)
        && matches!(p.nth(1), COMMA | SEMICOLON | NEWLINE | RIGHT_BRACE | LEFT_PAREN | LEFT_BRACE)
    {
        let m = p.start();
        p.advance();
        if p.at(LEFT_PAREN) {
            exprs::arg_list(p);
        }
        if p.at(LEFT_BRACE) {
            class_body(p, "", false);
        }
        m.complete(p, ENUM_CONSTANT);

        eat_newlines(p);
        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }
}

fn member(p: &mut Parser<'_>, class_name: &str) -> bool {
    if p.at(LEFT_BRACE) || (p.at(STATIC_KW) && p.nth_at(1, LEFT_BRACE)) {
        p.eat(STATIC_KW);
        block(p);
        return true;
    }

    if type_definition(p) {
        return true;
    }

    if constructor(p, class_name) {
        return true;
    }

    declarations::declaration(p)
}

/// `[modifiers] Name(params) { }` where `Name` is the enclosing class.
fn constructor(p: &mut Parser<'_>, class_name: &str) -> bool {
    let m = p.start();
    declarations::modifiers(p);

    if !(p.at(IDENT) && p.nth_at(1, LEFT_PAREN) && p.current_text() == class_name) {
        m.rollback(p);
        return false;
    }

    p.advance();
    declarations::method_rest(p);
    m.complete(p, CONSTRUCTOR_DEF);
    true
}
