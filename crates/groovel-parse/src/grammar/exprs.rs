use groovel_syntax::SyntaxKind::{self, *};
use groovel_syntax::SyntaxSet;

use super::{declarations, eat_newlines, nesting_too_deep, statement_list, type_defs, types};
use crate::messages::Message;
use crate::parser::{CompletedMarker, Parser};

const ASSIGN_OPS: SyntaxSet =
    SyntaxSet::new([EQ, PLUS_EQ, MINUS_EQ, STAR_EQ, SLASH_EQ, PERCENT_EQ]);

const LITERALS: SyntaxSet =
    SyntaxSet::new([INT_NUMBER, FLOAT_NUMBER, STRING, TRUE_KW, FALSE_KW, NULL_KW]);

const PREFIX_OPS: SyntaxSet = SyntaxSet::new([MINUS, PLUS, BANG, TILDE, PLUS2, MINUS2]);

const SELECTORS: SyntaxSet = SyntaxSet::new([DOT, SAFE_DOT, SPREAD_DOT]);

/// Tokens that may start an argument of a parenthesis-free command call.
const COMMAND_ARG_START: SyntaxSet = LITERALS.union(&SyntaxSet::new([
    IDENT, THIS_KW, SUPER_KW, NEW_KW, LEFT_BRACKET, BANG,
]));

/// Binding power of binary operators; higher binds tighter.
fn infix_binding_power(kind: SyntaxKind) -> Option<u8> {
    let bp = match kind {
        PIPE2 => 1,
        AMP2 => 2,
        PIPE => 3,
        CARET => 4,
        AMP => 5,
        EQ2 | NEQ | COMPARE | REGEX_FIND | REGEX_MATCH => 6,
        LT | LTEQ | GT | GTEQ | IN_KW | INSTANCEOF_KW | AS_KW => 7,
        RANGE | RANGE_EXCLUSIVE => 8,
        SHL => 9,
        PLUS | MINUS => 10,
        STAR | SLASH | PERCENT => 11,
        POW => 12,
        _ => return None,
    };
    Some(bp)
}

pub(crate) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    p.nested(assignment).unwrap_or_else(|| nesting_too_deep(p))
}

fn assignment(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = ternary(p)?;

    if !p.at_set(ASSIGN_OPS) {
        return Some(lhs);
    }

    let m = lhs.precede(p);
    p.advance();
    eat_newlines(p);
    if expr(p).is_none() {
        p.error(Message::ExpressionExpected);
    }
    Some(m.complete(p, ASSIGN_EXPR))
}

/// An expression in statement position, where a call may omit its
/// parentheses: `println "hi"`, `foo a, b: 1`.
pub(crate) fn statement_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = expr(p)?;

    if !matches!(lhs.kind(), REFERENCE_EXPR | PROPERTY_EXPR) || !p.at_set(COMMAND_ARG_START) {
        return Some(lhs);
    }

    let call = lhs.precede(p);
    let args = p.start();
    loop {
        argument(p);
        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }
    args.complete(p, COMMAND_ARGS);
    Some(call.complete(p, CALL_EXPR))
}

fn ternary(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let condition = binary(p, 0)?;

    match p.current() {
        QUESTION => {
            let m = condition.precede(p);
            p.advance();
            eat_newlines(p);
            if expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            eat_newlines(p);
            if p.expect(COLON, Message::ColonExpected) {
                eat_newlines(p);
                if expr(p).is_none() {
                    p.error(Message::ExpressionExpected);
                }
            }
            Some(m.complete(p, TERNARY_EXPR))
        }
        ELVIS => {
            let m = condition.precede(p);
            p.advance();
            eat_newlines(p);
            if expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            Some(m.complete(p, ELVIS_EXPR))
        }
        _ => Some(condition),
    }
}

fn binary(p: &mut Parser<'_>, min_bp: u8) -> Option<CompletedMarker> {
    let mut lhs = unary(p)?;

    loop {
        let op = p.current();
        let Some(bp) = infix_binding_power(op) else { break };
        if bp <= min_bp {
            break;
        }

        let m = lhs.precede(p);
        p.advance();
        eat_newlines(p);

        let kind = match op {
            INSTANCEOF_KW => {
                types::type_or_error(p);
                INSTANCEOF_EXPR
            }
            AS_KW => {
                types::type_or_error(p);
                CAST_EXPR
            }
            _ => {
                if binary(p, bp).is_none() {
                    p.error(Message::ExpressionExpected);
                }
                BINARY_EXPR
            }
        };
        lhs = m.complete(p, kind);
    }

    Some(lhs)
}

fn unary(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at_set(PREFIX_OPS) {
        return postfix(p);
    }

    let m = p.start();
    p.advance();
    let operand = p.nested(unary).unwrap_or_else(|| nesting_too_deep(p));
    if operand.is_none() {
        p.error(Message::ExpressionExpected);
    }
    Some(m.complete(p, PREFIX_EXPR))
}

fn postfix(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = path(p)?;

    while p.at(PLUS2) || p.at(MINUS2) {
        let m = lhs.precede(p);
        p.advance();
        lhs = m.complete(p, POSTFIX_EXPR);
    }

    Some(lhs)
}

/// A primary expression followed by property accesses, calls and indexing.
fn path(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = primary(p)?;

    loop {
        lhs = match p.current() {
            DOT | SAFE_DOT | SPREAD_DOT => property(p, lhs),
            NEWLINE if SELECTORS.contains(p.nth(1)) => property(p, lhs),
            LEFT_PAREN => {
                let m = lhs.precede(p);
                arg_list(p);
                trailing_closures(p);
                m.complete(p, CALL_EXPR)
            }
            LEFT_BRACE if matches!(lhs.kind(), REFERENCE_EXPR | PROPERTY_EXPR) => {
                let m = lhs.precede(p);
                trailing_closures(p);
                m.complete(p, CALL_EXPR)
            }
            LEFT_BRACKET => {
                let m = lhs.precede(p);
                p.advance();
                eat_newlines(p);
                if expr(p).is_none() {
                    p.error(Message::ExpressionExpected);
                }
                while p.eat(COMMA) {
                    eat_newlines(p);
                    expr(p);
                }
                eat_newlines(p);
                p.expect(RIGHT_BRACKET, Message::RBracketExpected);
                m.complete(p, INDEX_EXPR)
            }
            _ => break,
        };
    }

    Some(lhs)
}

/// `.name`, `?.name`, `*.name`, possibly on the next line.
fn property(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.eat(NEWLINE);
    p.advance();

    if p.at(IDENT) || p.at(STRING) || p.current().is_keyword() {
        p.advance();
    } else {
        p.error(Message::IdentifierExpected);
    }

    m.complete(p, PROPERTY_EXPR)
}

fn primary(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let kind = match p.current() {
        kind if LITERALS.contains(kind) => {
            let m = p.start();
            p.advance();
            m.complete(p, LITERAL)
        }
        IDENT | THIS_KW | SUPER_KW => {
            let m = p.start();
            p.advance();
            m.complete(p, REFERENCE_EXPR)
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            eat_newlines(p);
            if expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            eat_newlines(p);
            p.expect(RIGHT_PAREN, Message::RParenExpected);
            m.complete(p, PAREN_EXPR)
        }
        LEFT_BRACKET => list_or_map(p),
        LEFT_BRACE => closure(p),
        NEW_KW => new_expr(p),
        _ => return None,
    };
    Some(kind)
}

/// `[1, 2]`, `[a: 1]` or the empty map `[:]`.
fn list_or_map(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(LEFT_BRACKET));

    let m = p.start();
    p.advance();
    eat_newlines(p);

    if p.at(COLON) && p.nth_at(1, RIGHT_BRACKET) {
        p.advance();
        p.advance();
        return m.complete(p, MAP_EXPR);
    }

    let mut is_map = false;
    while !p.at(RIGHT_BRACKET) && !p.at_eof() {
        let Some(element) = expr(p) else {
            p.error(Message::ExpressionExpected);
            break;
        };
        if p.at(COLON) {
            let entry = element.precede(p);
            p.advance();
            eat_newlines(p);
            if expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            entry.complete(p, MAP_ENTRY);
            is_map = true;
        }

        eat_newlines(p);
        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }

    p.expect(RIGHT_BRACKET, Message::RBracketExpected);
    m.complete(p, if is_map { MAP_EXPR } else { LIST_EXPR })
}

/// `{ [params ->] statements }`
pub(crate) fn closure(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(LEFT_BRACE));

    let m = p.start();
    p.advance();
    eat_newlines(p);
    closure_params(p);

    statement_list(p, SyntaxSet::new([RIGHT_BRACE]), false);
    p.expect(RIGHT_BRACE, Message::RCurlyExpected);
    m.complete(p, CLOSURE_EXPR)
}

/// Parameters before `->`. Given back when they do not parse.
fn closure_params(p: &mut Parser<'_>) {
    if p.eat(ARROW) {
        return;
    }
    if !arrow_ahead(p) {
        return;
    }

    let m = p.start();
    loop {
        if !declarations::param(p) {
            m.rollback(p);
            return;
        }
        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }

    if p.at(ARROW) {
        m.complete(p, PARAM_LIST);
        p.advance();
    } else {
        m.rollback(p);
    }
}

/// Looks for `->` outside parentheses and brackets before the first brace
/// or `;`. Parameters cannot contain a closure, so the scan never enters a
/// nested one.
fn arrow_ahead(p: &Parser<'_>) -> bool {
    let mut depth = 0u32;
    let mut n = 0;
    loop {
        match p.nth(n) {
            ARROW if depth == 0 => return true,
            LEFT_PAREN | LEFT_BRACKET => depth += 1,
            RIGHT_PAREN | RIGHT_BRACKET if depth == 0 => return false,
            RIGHT_PAREN | RIGHT_BRACKET => depth -= 1,
            LEFT_BRACE | RIGHT_BRACE | SEMICOLON | EOF => return false,
            _ => {}
        }
        n += 1;
    }
}

/// `new T(args)`, `new T(args) { body }` or `new T[n]`.
fn new_expr(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(NEW_KW));

    let m = p.start();
    p.advance();

    let type_name = p.current_text();
    types::type_or_error(p);

    if p.at(LEFT_PAREN) {
        arg_list(p);
        if p.at(LEFT_BRACE) {
            type_defs::class_body(p, type_name, false);
        }
    } else if p.at(LEFT_BRACKET) {
        let dims = p.start();
        while p.eat(LEFT_BRACKET) {
            expr(p);
            p.expect(RIGHT_BRACKET, Message::RBracketExpected);
        }
        dims.complete(p, ARRAY_DIMS);
    } else {
        p.error(Message::LParenExpected);
    }

    m.complete(p, NEW_EXPR)
}

/// `(a, name: b)`
pub(crate) fn arg_list(p: &mut Parser<'_>) {
    debug_assert!(p.at(LEFT_PAREN));

    let m = p.start();
    p.advance();
    eat_newlines(p);

    while !p.at(RIGHT_PAREN) && !p.at_eof() {
        if !argument(p) {
            break;
        }
        eat_newlines(p);
        if !p.eat(COMMA) {
            break;
        }
        eat_newlines(p);
    }

    p.expect(RIGHT_PAREN, Message::RParenExpected);
    m.complete(p, ARG_LIST);
}

/// A positional argument or `name: value`.
fn argument(p: &mut Parser<'_>) -> bool {
    let named = (p.at(IDENT) || p.at(STRING) || p.current().is_keyword()) && p.nth_at(1, COLON);
    if !named {
        if expr(p).is_none() {
            p.error(Message::ExpressionExpected);
            return false;
        }
        return true;
    }

    let m = p.start();
    p.advance();
    p.advance();
    eat_newlines(p);
    if expr(p).is_none() {
        p.error(Message::ExpressionExpected);
    }
    m.complete(p, NAMED_ARG);
    true
}

fn trailing_closures(p: &mut Parser<'_>) {
    while p.at(LEFT_BRACE) {
        closure(p);
    }
}
