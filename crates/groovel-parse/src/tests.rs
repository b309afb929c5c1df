use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use expect_test::expect_file;
use groovel_errors::DiagnosticKind;
use groovel_syntax::SyntaxKind::{self, *};
use groovel_syntax::ast::{AstNode as _, IfStmt, ImportStmt, LabeledStmt, SwitchStmt, TryStmt};
use groovel_syntax::{SyntaxNode, SyntaxTree};

use crate::messages::Message;
use crate::parser::Parser;
use crate::{Dialect, grammar, parse_block_body, parse_file, parse_statement};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "groovy" {
                    let expected = path.with_extension("ir");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn parse() {
    let test_cases = TestCase::list();
    assert!(!test_cases.is_empty());

    for case in test_cases {
        let parse = parse_file(&case.text, Dialect::Groovy);
        let diagnostics = parse
            .errors()
            .iter()
            .map(|d| format!("  {:?} {}: {}\n", d.range(), d.kind(), d.message()))
            .collect::<String>();

        let actual = format!("{}Errors:\n{diagnostics}", parse.tree().debug_tree());
        expect_file![&case.expected].assert_eq(&actual);
    }
}

fn statements(tree: &SyntaxTree) -> Vec<SyntaxNode<'_>> {
    tree.root().children().collect()
}

fn first_of_kind(tree: &SyntaxTree, kind: SyntaxKind) -> SyntaxNode<'_> {
    tree.root()
        .descendants()
        .find(|node| node.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in\n{}", tree.debug_tree()))
}

#[test]
fn if_with_else_has_condition_and_two_branches() {
    let parse = parse_file("if (a) b() else c()", Dialect::Groovy);
    assert!(parse.errors().is_empty());

    let if_stmt = first_of_kind(parse.tree(), IF_STMT);
    let kinds = if_stmt.children().map(SyntaxNode::kind).collect::<Vec<_>>();
    assert_eq!(kinds, [REFERENCE_EXPR, EXPR_STMT, EXPR_STMT]);
}

#[test]
fn else_on_the_next_line_belongs_to_the_if() {
    let parse = parse_file("if (a) {\n  b()\n}\nelse {\n  c()\n}\n", Dialect::Groovy);
    assert!(parse.errors().is_empty());

    let stmts = statements(parse.tree());
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0].kind(), IF_STMT);

    let if_stmt = IfStmt::cast(stmts[0]).unwrap();
    assert_eq!(if_stmt.condition().map(SyntaxNode::kind), Some(REFERENCE_EXPR));
    assert_eq!(if_stmt.then_branch().map(SyntaxNode::kind), Some(BLOCK_STMT));
    assert!(if_stmt.else_token().is_some());
    assert_eq!(if_stmt.else_branch().map(SyntaxNode::kind), Some(BLOCK_STMT));
}

#[test]
fn if_without_else_gives_back_the_separators() {
    let mut p = Parser::new("if (a) b()\nc()", Dialect::Groovy);
    let root = p.start();
    assert!(grammar::statements::statement(&mut p, false));
    assert_eq!(p.open_markers(), 1);
    assert!(p.at(NEWLINE));

    while !p.at_eof() {
        p.advance();
    }
    p.eof();
    root.complete(&mut p, FILE);
    let (tree, errors) = p.finish();
    assert!(errors.is_empty());

    let if_stmt = first_of_kind(&tree, IF_STMT);
    assert_eq!(if_stmt.children().count(), 2);
    assert_eq!(if_stmt.text_trimmed(), "if (a) b()");
}

#[test]
fn dangling_else_is_reported_and_its_statement_kept() {
    let parse = parse_file("else foo()", Dialect::Groovy);

    assert_eq!(parse.errors().len(), 1);
    let error = &parse.errors()[0];
    assert_eq!(error.kind(), DiagnosticKind::DanglingConstruct);
    assert_eq!(error.message(), "'else' without 'if'");
    assert_eq!(&parse.tree().text()[error.range()], "else");

    let node = first_of_kind(parse.tree(), ERROR);
    assert!(node.child_of_kind(EXPR_STMT).is_some());
}

#[test]
fn dangling_case_and_default_keep_their_labels() {
    let parse = parse_file("case 1: foo()\ndefault: bar()", Dialect::Groovy);

    let kinds = parse.errors().iter().map(|d| d.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [DiagnosticKind::DanglingConstruct, DiagnosticKind::DanglingConstruct]);
    assert_eq!(parse.errors()[0].message(), "'case' without 'switch'");
    assert_eq!(parse.errors()[1].message(), "'default' without 'switch'");

    let stmts = statements(parse.tree());
    assert!(stmts.iter().filter(|node| node.kind() == ERROR).all(|node| {
        node.child_of_kind(CASE_LABEL).is_some() && node.child_of_kind(EXPR_STMT).is_some()
    }));
}

#[test]
fn dangling_handlers_keep_the_statement_after_them() {
    let parse = parse_file("catch foo()\nfinally bar()\n", Dialect::Groovy);

    let messages = parse.errors().iter().map(|d| d.message()).collect::<Vec<_>>();
    assert_eq!(messages, ["'catch' without 'try'", "'finally' without 'try'"]);
    assert!(parse.errors().iter().all(|d| d.kind() == DiagnosticKind::DanglingConstruct));
    assert_eq!(&parse.tree().text()[parse.errors()[0].range()], "catch");
    assert_eq!(&parse.tree().text()[parse.errors()[1].range()], "finally");

    let stmts = statements(parse.tree());
    assert_eq!(stmts.len(), 2);
    for (stmt, text) in stmts.iter().zip(["catch foo()", "finally bar()"]) {
        assert_eq!(stmt.kind(), ERROR);
        assert_eq!(stmt.text_trimmed(), text);
        assert!(stmt.child_of_kind(EXPR_STMT).is_some());
        assert!(stmt.child_of_kind(CATCH_CLAUSE).is_none());
        assert!(stmt.child_of_kind(FINALLY_CLAUSE).is_none());
    }
}

#[test]
fn truncated_while_still_produces_a_while() {
    let parse = parse_file("while (", Dialect::Groovy);

    assert_eq!(statements(parse.tree())[0].kind(), WHILE_STMT);
    assert!(!parse.errors().is_empty());
    assert!(parse.errors().iter().all(|d| d.kind() == DiagnosticKind::StructuralMismatch));
    assert_eq!(parse.errors()[0].message(), "expression expected");

    let mut p = Parser::new("while (", Dialect::Groovy);
    let root = p.start();
    assert!(grammar::statements::statement(&mut p, false));
    assert!(p.at_eof());
    assert_eq!(p.open_markers(), 1);
    p.eof();
    root.complete(&mut p, FILE);
    p.finish();
}

#[test]
fn missing_open_paren_still_closes_the_statement() {
    for (keyword, kind) in [("if", IF_STMT), ("while", WHILE_STMT), ("for", FOR_STMT)] {
        let text = format!("{keyword} x\nfoo()");

        let mut p = Parser::new(&text, Dialect::Groovy);
        let root = p.start();
        assert!(grammar::statements::statement(&mut p, false), "{keyword}");
        assert_eq!(p.pos(), 1, "{keyword}");
        assert!(p.at(IDENT), "{keyword}");
        assert_eq!(p.open_markers(), 1);
        while !p.at_eof() {
            p.advance();
        }
        p.eof();
        root.complete(&mut p, FILE);
        p.finish();

        let parse = parse_file(&text, Dialect::Groovy);
        let kinds = statements(parse.tree()).iter().map(|n| n.kind()).collect::<Vec<_>>();
        assert_eq!(kinds, [kind, ERROR, EXPR_STMT], "{keyword}");

        let error = &parse.errors()[0];
        assert_eq!(error.kind(), DiagnosticKind::StructuralMismatch);
        assert_eq!(error.message(), "'(' expected");
        assert_eq!(&text[error.range()], "x");
        assert_eq!(parse.errors()[1].kind(), DiagnosticKind::RecoverableGarbage);
    }
}

#[test]
fn for_without_a_clause_is_reported() {
    let mut p = Parser::new("for (x) foo()", Dialect::Groovy);
    let root = p.start();
    assert!(grammar::statements::statement(&mut p, false));
    assert_eq!(p.pos(), 2);
    assert!(p.at(IDENT));
    while !p.at_eof() {
        p.advance();
    }
    p.eof();
    root.complete(&mut p, FILE);
    p.finish();

    let parse = parse_file("for (x) foo()", Dialect::Groovy);
    assert_eq!(statements(parse.tree())[0].kind(), FOR_STMT);
    assert_eq!(parse.errors()[0].kind(), DiagnosticKind::StructuralMismatch);
    assert_eq!(parse.errors()[0].message(), "for clause expected");
    assert_eq!(&parse.tree().text()[parse.errors()[0].range()], "x");
}

#[test]
fn unclosed_condition_reports_every_skipped_token() {
    let parse = parse_file("while (a b c) foo()", Dialect::Groovy);

    let messages = parse.errors().iter().map(|d| d.message()).collect::<Vec<_>>();
    assert_eq!(messages, ["')' expected", "')' expected"]);

    let while_stmt = first_of_kind(parse.tree(), WHILE_STMT);
    assert!(while_stmt.child_of_kind(EXPR_STMT).is_some());
}

#[test]
fn missing_body_is_an_expression_expected() {
    let parse = parse_file("if (a)\n", Dialect::Groovy);

    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message(), "expression expected");
    assert_eq!(statements(parse.tree())[0].kind(), IF_STMT);
}

#[test]
fn switch_case_list_stops_at_the_next_label() {
    for terminator in ["case 2:", "default:", "}"] {
        let text = format!("a()\nb()\n{terminator}");
        let mut p = Parser::new(&text, Dialect::Groovy);
        let root = p.start();
        grammar::control::switch_case_list(&mut p);
        assert!(matches!(p.current(), CASE_KW | DEFAULT_KW | RIGHT_BRACE), "{terminator}");

        while !p.at_eof() {
            p.advance();
        }
        p.eof();
        root.complete(&mut p, FRAGMENT);
        let (tree, errors) = p.finish();
        assert!(errors.is_empty());
        assert_eq!(tree.root().children().filter(|n| n.kind() == EXPR_STMT).count(), 2);
    }
}

#[test]
fn switch_sections_group_their_labels() {
    let text = "switch (x) {\n  case 1:\n  case 2: a(); break\n  default: b()\n}";
    let parse = parse_file(text, Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let switch = SwitchStmt::cast(first_of_kind(parse.tree(), SWITCH_STMT)).unwrap();
    let sections = switch.sections().collect::<Vec<_>>();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].labels().count(), 2);
    let kinds = sections[0].statements().map(SyntaxNode::kind).collect::<Vec<_>>();
    assert_eq!(kinds, [EXPR_STMT, BREAK_STMT]);
    assert_eq!(sections[1].labels().count(), 1);
}

#[test]
fn try_with_multi_catch_and_finally() {
    let text = "try {\n  a()\n} catch (IOException | RuntimeException e) {\n} finally {\n}";
    let parse = parse_file(text, Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let try_stmt = TryStmt::cast(first_of_kind(parse.tree(), TRY_STMT)).unwrap();
    assert_eq!(try_stmt.catch_clauses().count(), 1);
    assert!(try_stmt.finally_clause().is_some());

    let param = first_of_kind(parse.tree(), CATCH_CLAUSE).child_of_kind(PARAM).unwrap();
    assert_eq!(param.children().filter(|n| n.kind() == TYPE).count(), 2);
}

#[test]
fn try_without_handlers_is_reported() {
    let parse = parse_file("try { a() }", Dialect::Groovy);

    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message(), "'catch' or 'finally' expected");
}

#[test]
fn labeled_loop() {
    let parse = parse_file("outer: for (x in xs) { break outer }", Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let labeled = LabeledStmt::cast(first_of_kind(parse.tree(), LABELED_STMT)).unwrap();
    assert_eq!(labeled.label(), Some("outer"));
    assert_eq!(labeled.statement().map(SyntaxNode::kind), Some(FOR_STMT));
    assert!(first_of_kind(parse.tree(), FOR_IN_CLAUSE).child_of_kind(PARAM).is_some());
}

#[test]
fn classic_for_clause() {
    let parse = parse_file("for (int i = 0; i < n; i++) println i", Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let clause = first_of_kind(parse.tree(), FOR_CLAUSE);
    assert!(clause.child_of_kind(VARIABLE_DEF).is_some());
    assert!(clause.child_of_kind(BINARY_EXPR).is_some());
    assert!(clause.child_of_kind(POSTFIX_EXPR).is_some());
}

#[test]
fn imports_only_at_the_top_level() {
    let text = "import static java.util.Collections.sort as s\nimport a.b.*\n";
    let parse = parse_file(text, Dialect::Groovy);
    assert!(parse.errors().is_empty());

    let imports = parse.tree().root().children().filter_map(ImportStmt::cast).collect::<Vec<_>>();
    assert_eq!(imports.len(), 2);
    assert!(imports[0].is_static());
    assert_eq!(imports[0].path(), "java.util.Collections.sort");
    assert_eq!(imports[0].alias(), Some("s"));
    assert!(!imports[1].is_static());
    assert_eq!(imports[1].path(), "a.b.*");

    let nested = parse_file("if (x) {\n  import a.b\n}", Dialect::Groovy);
    let messages = nested.errors().iter().map(|d| d.message()).collect::<Vec<_>>();
    assert_eq!(messages, ["import is not allowed here"]);
}

#[test]
fn declarations_and_command_calls() {
    let text = "String s = 'a'\ndef x\nprintln s\nfoo.bar 1, key: 2";
    let parse = parse_file(text, Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let kinds = statements(parse.tree()).iter().map(|n| n.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [VARIABLE_DEF, VARIABLE_DEF, EXPR_STMT, EXPR_STMT]);

    let command = statements(parse.tree())[3].child_of_kind(CALL_EXPR).unwrap();
    assert!(command.child_of_kind(PROPERTY_EXPR).is_some());
    let args = command.child_of_kind(COMMAND_ARGS).unwrap();
    assert_eq!(args.children().map(SyntaxNode::kind).collect::<Vec<_>>(), [LITERAL, NAMED_ARG]);
}

#[test]
fn closures_with_and_without_parameters() {
    let parse = parse_file("list.each { it -> println it }\nrun { go() }", Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let closures = parse
        .tree()
        .root()
        .descendants()
        .filter(|n| n.kind() == CLOSURE_EXPR)
        .collect::<Vec<_>>();
    assert_eq!(closures.len(), 2);
    assert!(closures[0].child_of_kind(PARAM_LIST).is_some());
    assert!(closures[1].child_of_kind(PARAM_LIST).is_none());
}

#[test]
fn nested_closures_parse_in_linear_time() {
    let depth = 30;
    let text = format!("{}{}", "x = f { ".repeat(depth), "} ".repeat(depth));

    let start = Instant::now();
    let parse = parse_file(&text, Dialect::Groovy);
    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());

    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    let closures = parse.tree().root().descendants().filter(|n| n.kind() == CLOSURE_EXPR);
    assert_eq!(closures.count(), depth);
}

#[test]
fn closure_parameters_with_defaults() {
    let parse = parse_file("run { int a = f(1), b = [2] -> a }", Dialect::Groovy);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());

    let params = first_of_kind(parse.tree(), PARAM_LIST);
    assert_eq!(params.children().filter(|n| n.kind() == PARAM).count(), 2);
}

#[test]
fn deep_nesting_is_cut_off_without_overflowing() {
    let inputs = [
        "(".repeat(100_000),
        "-".repeat(100_000),
        "{".repeat(100_000),
        format!("{}1", "a = ".repeat(50_000)),
        "if (a) ".repeat(50_000),
        "class A { ".repeat(50_000),
        "List<".repeat(50_000),
    ];

    for text in &inputs {
        let parse = parse_file(text, Dialect::Groovy);
        assert_eq!(parse.tree().root().text(), text.as_str());
        assert!(
            parse.errors().iter().any(|d| d.kind() == DiagnosticKind::RecoverableGarbage),
            "{}",
            &text[..20],
        );
    }

    let parse = parse_file(&"(".repeat(100_000), Dialect::Groovy);
    let too_deep = parse.errors().iter().find(|d| d.message() == "nesting too deep").unwrap();
    assert_eq!(too_deep.kind(), DiagnosticKind::RecoverableGarbage);
    assert_eq!(usize::from(too_deep.range().end()), 100_000);
}

#[test]
fn parse_statement_reports_trailing_input() {
    let parse = parse_statement("foo() bar", Dialect::Groovy);

    assert_eq!(parse.tree().root().kind(), FRAGMENT);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].kind(), DiagnosticKind::RecoverableGarbage);
    assert_eq!(&parse.tree().text()[parse.errors()[0].range()], "bar");
}

#[test]
fn parse_block_body_stops_at_the_closing_brace() {
    let parse = parse_block_body("a()\nb()\n} c()", Dialect::Groovy);

    let kinds = parse.tree().root().children().map(SyntaxNode::kind).collect::<Vec<_>>();
    assert_eq!(kinds, [EXPR_STMT, EXPR_STMT, ERROR]);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message(), "unexpected input");
}

#[test]
fn template_text_is_a_statement() {
    let text = "a()\n%> <p>hi</p> <%\nb()\n";

    let template = parse_file(text, Dialect::Template);
    assert!(template.errors().is_empty(), "{:?}", template.errors());
    let kinds = statements(template.tree()).iter().map(|n| n.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [EXPR_STMT, TEMPLATE_STMT, EXPR_STMT]);

    let groovy = parse_file(text, Dialect::Groovy);
    assert!(!groovy.errors().is_empty());
    assert!(groovy.tree().root().descendants().all(|n| n.kind() != TEMPLATE_STMT));
}

#[test]
fn rollback_leaves_no_trace() {
    let mut p = Parser::new("a b", Dialect::Groovy);
    let root = p.start();

    let speculation = p.start();
    let literal = p.start();
    p.advance();
    let literal = literal.complete(&mut p, LITERAL);
    let binary = literal.precede(&mut p);
    p.advance();
    p.error(Message::ExpressionExpected);
    binary.complete(&mut p, BINARY_EXPR);
    speculation.rollback(&mut p);

    assert_eq!(p.pos(), 0);
    assert_eq!(p.open_markers(), 1);

    let reference = p.start();
    p.advance();
    reference.complete(&mut p, REFERENCE_EXPR);
    p.advance();
    p.eof();
    root.complete(&mut p, FILE);

    let (tree, errors) = p.finish();
    assert!(errors.is_empty());
    let kinds = tree.root().descendants().map(SyntaxNode::kind).collect::<Vec<_>>();
    assert_eq!(kinds, [FILE, REFERENCE_EXPR]);
    assert_eq!(tree.root().text(), "a b");
}

#[test]
fn abandoned_marker_keeps_its_tokens() {
    let mut p = Parser::new("a", Dialect::Groovy);
    let root = p.start();
    let m = p.start();
    p.advance();
    m.abandon(&mut p);
    p.eof();
    root.complete(&mut p, FILE);

    let (tree, _) = p.finish();
    assert_eq!(tree.root().children().count(), 0);
    assert_eq!(tree.root().token_of_kind(IDENT).map(|t| t.text()), Some("a"));
}

#[test]
fn error_marker_covers_consumed_tokens() {
    let mut p = Parser::new("x y z", Dialect::Groovy);
    let root = p.start();
    p.advance();
    let m = p.start();
    p.advance();
    p.advance();
    m.error(&mut p, Message::UnexpectedInput);
    p.eof();
    root.complete(&mut p, FILE);

    let (tree, errors) = p.finish();
    assert_eq!(errors.len(), 1);
    assert_eq!(&tree.text()[errors[0].range()], "y z");
    assert_eq!(first_of_kind(&tree, ERROR).text_trimmed(), "y z");
}

const CORPUS: &str = r#"package demo

import java.util.List

@Deprecated
class Greeter<T> extends Base implements Runnable {
    private final String name = "world"

    Greeter(String name) { this.name = name }

    void run() throws IOException {
        for (int i = 0; i < 3; i++) {
            if (i % 2 == 0) println "even $i" else println 'odd'
        }
        switch (name) {
            case 'a':
            case 'b': greet(); break
            default: return
        }
        try { risky() } catch (IOException | RuntimeException e) { throw e } finally { done() }
        def list = [1, 2, 3].collect { it -> it * 2 }
        def map = [a: 1, b: list?.size() ?: 0]
        synchronized (this) { count++ }
        outer: while (true) { break outer }
        assert map.a == 1 : "broken"
        new Thread({ -> run() }).start()
    }
}

enum Color { RED, GREEN, BLUE }
else foo()
catch bar()
case 1: x()
"#;

#[test]
fn every_prefix_terminates_and_is_lossless() {
    for (end, _) in CORPUS.char_indices().chain([(CORPUS.len(), ' ')]) {
        let text = &CORPUS[..end];
        for dialect in [Dialect::Groovy, Dialect::Template] {
            let parse = parse_file(text, dialect);
            assert_eq!(parse.tree().root().text(), text);
            assert_eq!(parse.tree().root().kind(), FILE);

            let fragment = parse_block_body(text, dialect);
            assert_eq!(fragment.tree().root().text(), text);
        }
    }
}

#[test]
fn full_corpus_only_reports_the_dangling_tail() {
    let parse = parse_file(CORPUS, Dialect::Groovy);

    let dangling = parse
        .errors()
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::DanglingConstruct)
        .map(|d| d.message())
        .collect::<Vec<_>>();
    assert_eq!(dangling, ["'else' without 'if'", "'catch' without 'try'", "'case' without 'switch'"]);

    let first = &parse.errors()[0];
    assert!(usize::from(first.range().start()) >= CORPUS.find("else foo()").unwrap());
}
