//! The statement dispatcher.
//!
//! `statement` looks at the current token and hands over to the routine for
//! that construct. Declarations are tried speculatively and rolled back when
//! they do not pan out; whatever remains is parsed as an expression.

use groovel_syntax::SyntaxKind::*;
use groovel_syntax::SyntaxSet;

use super::{
    block, control, declarations, eat_newlines, exprs, nesting_too_deep, toplevel, type_defs,
};
use crate::messages::Message;
use crate::parser::Parser;

const BRANCH_KEYWORDS: SyntaxSet =
    SyntaxSet::new([RETURN_KW, BREAK_KW, CONTINUE_KW, THROW_KW, ASSERT_KW]);

/// Parses exactly one statement. Returns `false` when nothing here starts a
/// statement; in that case nothing was consumed.
///
/// With `block_needed`, a leading `{` opens a block statement instead of a
/// closure.
pub(crate) fn statement(p: &mut Parser<'_>, block_needed: bool) -> bool {
    match p.nested(|p| dispatch(p, block_needed)) {
        Some(parsed) => parsed,
        None => nesting_too_deep(p).is_some(),
    }
}

fn dispatch(p: &mut Parser<'_>, block_needed: bool) -> bool {
    match p.current() {
        LEFT_BRACE if block_needed => return block_statement(p),
        IMPORT_KW => {
            let m = p.start();
            toplevel::import(p);
            m.error(p, Message::ImportNotAllowed);
            return true;
        }
        IF_KW => return control::if_stmt(p),
        SWITCH_KW => return control::switch_stmt(p),
        TRY_KW => return control::try_stmt(p),
        WHILE_KW => return control::while_stmt(p),
        FOR_KW => return control::for_stmt(p),
        _ => {}
    }

    if p.at(SYNCHRONIZED_KW) && p.nth_at(1, LEFT_PAREN) {
        let m = p.start();
        if control::synchronized_stmt(p) {
            m.abandon(p);
            return true;
        }
        m.rollback(p);
    }

    match p.current() {
        ELSE_KW => return dangling_else(p),
        CATCH_KW | FINALLY_KW => return dangling_handler(p),
        CASE_KW => return dangling_case_label(p, Message::CaseWithoutSwitch),
        DEFAULT_KW => return dangling_case_label(p, Message::DefaultWithoutSwitch),
        kind if BRANCH_KEYWORDS.contains(kind) => return branch_statement(p),
        IDENT if p.nth_at(1, COLON) => return labeled_statement(p),
        _ => {}
    }

    let m = p.start();
    if declarations::declaration(p) {
        m.abandon(p);
        return true;
    }
    m.rollback(p);

    if type_defs::type_definition(p) {
        return true;
    }

    expression_statement(p)
}

/// The top-level flavour, where imports are legal.
pub(crate) fn statement_with_imports(p: &mut Parser<'_>) -> bool {
    if p.at(IMPORT_KW) {
        toplevel::import(p);
        return true;
    }
    statement(p, false)
}

fn block_statement(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    block(p);
    m.complete(p, BLOCK_STMT);
    true
}

/// `else` with no `if` to attach to: reported on the keyword, then the
/// statement after it is parsed anyway.
fn dangling_else(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    p.error(Message::ElseWithoutIf);
    p.advance();
    eat_newlines(p);
    statement(p, true);
    m.complete(p, ERROR);
    true
}

/// `catch` or `finally` without its `try`: the keyword is flagged and the
/// statement after it is parsed anyway.
fn dangling_handler(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    let message =
        if p.at(CATCH_KW) { Message::CatchWithoutTry } else { Message::FinallyWithoutTry };
    p.error(message);
    p.advance();
    statement(p, false);
    m.complete(p, ERROR);
    true
}

fn dangling_case_label(p: &mut Parser<'_>, message: Message) -> bool {
    let m = p.start();
    p.error(message);
    control::case_label(p);
    eat_newlines(p);
    statement(p, false);
    m.complete(p, ERROR);
    true
}

fn branch_statement(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    let kind = match p.current() {
        RETURN_KW => {
            p.advance();
            if !at_statement_end(p) {
                exprs::expr(p);
            }
            RETURN_STMT
        }
        BREAK_KW | CONTINUE_KW => {
            let kind = if p.at(BREAK_KW) { BREAK_STMT } else { CONTINUE_STMT };
            p.advance();
            p.eat(IDENT);
            kind
        }
        THROW_KW => {
            p.advance();
            if exprs::expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            THROW_STMT
        }
        ASSERT_KW => {
            p.advance();
            if exprs::expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            if (p.eat(COLON) || p.eat(COMMA)) && exprs::expr(p).is_none() {
                p.error(Message::ExpressionExpected);
            }
            ASSERT_STMT
        }
        _ => unreachable!(),
    };
    m.complete(p, kind);
    true
}

fn labeled_statement(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    let label = p.start();
    p.advance();
    label.complete(p, LABEL);

    p.advance();
    eat_newlines(p);
    statement(p, false);

    m.complete(p, LABELED_STMT);
    true
}

fn expression_statement(p: &mut Parser<'_>) -> bool {
    let Some(expr) = exprs::statement_expr(p) else {
        return false;
    };
    expr.precede(p).complete(p, EXPR_STMT);
    true
}

fn at_statement_end(p: &Parser<'_>) -> bool {
    matches!(p.current(), SEMICOLON | NEWLINE | RIGHT_BRACE | TEMPLATE_TEXT | EOF)
}
