use groovel_syntax::SyntaxKind::{self, *};
use groovel_syntax::SyntaxSet;

use super::{
    block, block_or_error, clean_after_error, declarations, eat_newlines, exprs, separators,
    separators_and_fragments, statement_list, statements, template, types, wrap_error,
};
use crate::messages::Message;
use crate::parser::Parser;

const CASE_LIST_END: SyntaxSet = SyntaxSet::new([CASE_KW, DEFAULT_KW, RIGHT_BRACE]);

/// `if (cond) stmt [else stmt]`
///
/// Always returns `true`: a malformed `if` is still closed as an `IF_STMT`.
pub(crate) fn if_stmt(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(IF_KW));

    let m = p.start();
    p.advance();

    if !p.expect(LEFT_PAREN, Message::LParenExpected) {
        m.complete(p, IF_STMT);
        return true;
    }

    condition(p);
    if !closing_paren(p) || !body(p) {
        m.complete(p, IF_STMT);
        return true;
    }

    let rb = p.start();
    if p.at(ELSE_KW) || (separators(p) && p.at(ELSE_KW)) {
        rb.abandon(p);
        p.advance();
        body(p);
    } else {
        rb.rollback(p);
    }

    m.complete(p, IF_STMT);
    true
}

pub(crate) fn while_stmt(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(WHILE_KW));

    let m = p.start();
    p.advance();

    if p.expect(LEFT_PAREN, Message::LParenExpected) {
        condition(p);
        if closing_paren(p) {
            body(p);
        }
    }

    m.complete(p, WHILE_STMT);
    true
}

/// `for (init; cond; update) stmt`, `for (x in xs) stmt` or
/// `for (Type x : xs) stmt`.
pub(crate) fn for_stmt(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(FOR_KW));

    let m = p.start();
    p.advance();

    if !p.expect(LEFT_PAREN, Message::LParenExpected) {
        m.complete(p, FOR_STMT);
        return true;
    }

    eat_newlines(p);
    if !for_clause(p) {
        p.error(Message::ForClauseExpected);
        m.complete(p, FOR_STMT);
        return true;
    }

    eat_newlines(p);
    if closing_paren(p) {
        body(p);
    }

    m.complete(p, FOR_STMT);
    true
}

fn condition(p: &mut Parser<'_>) {
    eat_newlines(p);
    if exprs::expr(p).is_none() {
        p.error(Message::ExpressionExpected);
    }
    eat_newlines(p);
}

/// Expects `)`. Otherwise skips to the end of the line or the next `)`,
/// reporting every skipped token.
fn closing_paren(p: &mut Parser<'_>) -> bool {
    if p.eat(RIGHT_PAREN) {
        return true;
    }

    if p.at_eof() || p.at(NEWLINE) {
        p.error(Message::RParenExpected);
        return false;
    }

    while !p.at_eof() && !p.at(NEWLINE) && !p.at(RIGHT_PAREN) {
        p.error(Message::RParenExpected);
        p.advance();
    }
    p.eat(RIGHT_PAREN)
}

/// The statement controlled by `if`, `else`, `while` or `for`.
///
/// Parsed speculatively: if no statement follows, the newlines consumed
/// before it are given back and "expression expected" is reported instead.
fn body(p: &mut Parser<'_>) -> bool {
    let warn = p.start();
    eat_newlines(p);

    if statements::statement(p, true) || template::fragment(p) {
        warn.abandon(p);
        true
    } else {
        warn.rollback(p);
        p.error(Message::ExpressionExpected);
        false
    }
}

fn for_clause(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    if for_in_head(p) {
        if exprs::expr(p).is_none() {
            p.error(Message::ExpressionExpected);
        }
        m.complete(p, FOR_IN_CLAUSE);
        return true;
    }
    m.rollback(p);

    let m = p.start();
    if !p.at(SEMICOLON) {
        let init = p.start();
        if declarations::declaration(p) {
            init.abandon(p);
        } else {
            init.rollback(p);
            expression_list(p);
        }
    }

    if !p.eat(SEMICOLON) {
        m.rollback(p);
        return false;
    }

    if !p.at(SEMICOLON) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON, Message::SemicolonExpected);
    if !p.at(RIGHT_PAREN) {
        expression_list(p);
    }

    m.complete(p, FOR_CLAUSE);
    true
}

/// `[modifiers] [Type] name (in | :)`
fn for_in_head(p: &mut Parser<'_>) -> bool {
    let param = p.start();
    declarations::modifiers(p);

    let simple = p.at(IDENT) && matches!(p.nth(1), IN_KW | COLON);
    if !simple && types::type_(p).is_none() {
        param.rollback(p);
        return false;
    }

    if !p.eat(IDENT) || !matches!(p.current(), IN_KW | COLON) {
        param.rollback(p);
        return false;
    }
    param.complete(p, PARAM);

    p.advance();
    eat_newlines(p);
    true
}

fn expression_list(p: &mut Parser<'_>) {
    if exprs::expr(p).is_none() {
        return;
    }
    while p.eat(COMMA) {
        eat_newlines(p);
        if exprs::expr(p).is_none() {
            p.error(Message::ExpressionExpected);
            break;
        }
    }
}

/// `switch (e) { case a: ... default: ... }`
pub(crate) fn switch_stmt(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(SWITCH_KW));

    let m = p.start();
    p.advance();

    if !p.expect(LEFT_PAREN, Message::LParenExpected) {
        m.complete(p, SWITCH_STMT);
        return true;
    }
    condition(p);
    p.expect(RIGHT_PAREN, Message::RParenExpected);
    eat_newlines(p);

    if !p.expect(LEFT_BRACE, Message::LCurlyExpected) {
        m.complete(p, SWITCH_STMT);
        return true;
    }

    loop {
        separators_and_fragments(p);
        match p.current() {
            CASE_KW | DEFAULT_KW => case_section(p),
            RIGHT_BRACE | EOF => break,
            _ => {
                let start = p.pos();
                clean_after_error(p);
                if p.pos() == start {
                    wrap_error(p, Message::WrongStatement);
                }
            }
        }
    }

    p.expect(RIGHT_BRACE, Message::RCurlyExpected);
    m.complete(p, SWITCH_STMT);
    true
}

fn case_section(p: &mut Parser<'_>) {
    let m = p.start();
    while p.at(CASE_KW) || p.at(DEFAULT_KW) {
        case_label(p);
        separators(p);
    }
    switch_case_list(p);
    m.complete(p, CASE_SECTION);
}

/// `case expr:` or `default:`
pub(crate) fn case_label(p: &mut Parser<'_>) {
    debug_assert!(p.at(CASE_KW) || p.at(DEFAULT_KW));

    let m = p.start();
    if p.at(CASE_KW) {
        p.advance();
        if exprs::expr(p).is_none() {
            p.error(Message::ExpressionExpected);
        }
    } else {
        p.advance();
    }
    p.expect(COLON, Message::ColonExpected);
    m.complete(p, CASE_LABEL);
}

/// The statements after the labels of one case section. Stops in front of
/// the next `case`, `default` or `}` without consuming it.
pub(crate) fn switch_case_list(p: &mut Parser<'_>) {
    statement_list(p, CASE_LIST_END, false);
}

/// `try { } catch (T e) { } finally { }`
pub(crate) fn try_stmt(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(TRY_KW));

    let m = p.start();
    p.advance();
    eat_newlines(p);

    if !block_or_error(p) {
        m.complete(p, TRY_STMT);
        return true;
    }

    let mut handled = false;
    while at_after_newlines(p, CATCH_KW) {
        catch_clause(p);
        handled = true;
    }
    if at_after_newlines(p, FINALLY_KW) {
        finally_clause(p);
        handled = true;
    }

    if !handled {
        p.error(Message::CatchOrFinallyExpected);
    }

    m.complete(p, TRY_STMT);
    true
}

/// Consumes newlines only if `kind` follows them.
fn at_after_newlines(p: &mut Parser<'_>, kind: SyntaxKind) -> bool {
    let rb = p.start();
    eat_newlines(p);
    if p.at(kind) {
        rb.abandon(p);
        true
    } else {
        rb.rollback(p);
        false
    }
}

fn catch_clause(p: &mut Parser<'_>) {
    debug_assert!(p.at(CATCH_KW));

    let m = p.start();
    p.advance();

    if p.expect(LEFT_PAREN, Message::LParenExpected) {
        catch_param(p);
        p.expect(RIGHT_PAREN, Message::RParenExpected);
    }
    eat_newlines(p);
    block_or_error(p);

    m.complete(p, CATCH_CLAUSE);
}

fn finally_clause(p: &mut Parser<'_>) {
    debug_assert!(p.at(FINALLY_KW));

    let m = p.start();
    p.advance();
    eat_newlines(p);
    block_or_error(p);
    m.complete(p, FINALLY_CLAUSE);
}

/// `e`, `T e` or `A | B e`
fn catch_param(p: &mut Parser<'_>) {
    let m = p.start();
    declarations::modifiers(p);

    if !(p.at(IDENT) && p.nth_at(1, RIGHT_PAREN)) {
        types::type_or_error(p);
        while p.eat(PIPE) {
            types::type_or_error(p);
        }
    }
    p.expect(IDENT, Message::IdentifierExpected);

    m.complete(p, PARAM);
}

/// `synchronized (lock) { }`. Returns `false` without consuming anything
/// when the lock or the block is missing.
pub(crate) fn synchronized_stmt(p: &mut Parser<'_>) -> bool {
    debug_assert!(p.at(SYNCHRONIZED_KW));

    let m = p.start();
    p.advance();

    let complete = p.eat(LEFT_PAREN) && exprs::expr(p).is_some() && p.eat(RIGHT_PAREN) && {
        eat_newlines(p);
        p.at(LEFT_BRACE)
    };
    if !complete {
        m.rollback(p);
        return false;
    }

    block(p);
    m.complete(p, SYNCHRONIZED_STMT);
    true
}
