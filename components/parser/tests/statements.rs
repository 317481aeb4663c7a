//! Statement grammar tests

mod common;

use common::parse_ok;
use ecma_parser::ast::{Expression, ForInLeft, ForInit, Statement};

fn function_body(program: &ecma_parser::Program) -> &[Statement] {
    match &program.body[0] {
        Statement::FunctionDeclaration { body, .. } => &body.body,
        other => panic!("expected a function declaration, got {:?}", other),
    }
}

#[test]
fn test_return_then_newline_inserts_semicolon() {
    let program = parse_ok("function f() { return\n1 }");
    let body = function_body(&program);
    assert_eq!(body.len(), 2);
    assert!(matches!(
        body[0],
        Statement::ReturnStatement { argument: None, .. }
    ));
    assert!(matches!(body[1], Statement::ExpressionStatement { .. }));
}

#[test]
fn test_increment_on_next_line_is_prefix() {
    let program = parse_ok("a\n++\nb");
    assert_eq!(program.body.len(), 2);
    match &program.body[1] {
        Statement::ExpressionStatement { expression, .. } => {
            assert!(matches!(
                expression,
                Expression::UpdateExpression { prefix: true, .. }
            ));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_semicolon_inserted_at_end_of_input_and_brace() {
    let program = parse_ok("{ x = 1 } y = 2");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn test_for_in_with_single_binding() {
    let program = parse_ok("for (var key in obj) count++;");
    match &program.body[0] {
        Statement::ForInStatement { left, right, .. } => {
            match left {
                ForInLeft::VariableDeclaration(decl) => {
                    assert_eq!(decl.declarations.len(), 1);
                    assert_eq!(decl.declarations[0].id.name, "key");
                }
                other => panic!("{:?}", other),
            }
            assert_eq!(right.identifier_name(), Some("obj"));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_for_with_declaration_init() {
    let program = parse_ok("for (var i = 0, n = a.length; i < n; i++) {}");
    match &program.body[0] {
        Statement::ForStatement { init, test, update, .. } => {
            match init {
                Some(ForInit::VariableDeclaration(decl)) => assert_eq!(decl.declarations.len(), 2),
                other => panic!("{:?}", other),
            }
            assert!(test.is_some());
            assert!(update.is_some());
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_nested_labels_and_labeled_break() {
    let program = parse_ok("a: b: while (true) { break a; }");
    match &program.body[0] {
        Statement::LabeledStatement { label, body, .. } => {
            assert_eq!(label.name, "a");
            assert!(matches!(**body, Statement::LabeledStatement { .. }));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_labeled_break_inside_loop_in_block() {
    parse_ok("done: { while (x) { if (y) break done; } z(); }");
}

#[test]
fn test_same_label_after_scope_ends() {
    parse_ok("l: ; l: ;");
}

#[test]
fn test_break_label_on_next_line_is_not_a_label() {
    let program = parse_ok("while (x) { break\nfoo; }");
    match &program.body[0] {
        Statement::WhileStatement { body, .. } => match &**body {
            Statement::BlockStatement { body, .. } => {
                assert!(matches!(
                    body[0],
                    Statement::BreakStatement { label: None, .. }
                ));
                assert_eq!(body.len(), 2);
            }
            other => panic!("{:?}", other),
        },
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_switch_with_default_in_the_middle() {
    let program = parse_ok(
        "switch (n) {\n  case 0: zero(); break;\n  default: other();\n  case 1: case 2: small(); break;\n}",
    );
    match &program.body[0] {
        Statement::SwitchStatement { cases, .. } => {
            assert_eq!(cases.len(), 4);
            assert!(cases[1].test.is_none());
            assert!(cases[2].consequent.is_empty());
            assert_eq!(cases[3].consequent.len(), 2);
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_break_inside_switch_inside_function() {
    parse_ok("function f(x) { switch (x) { case 1: break; } return x; }");
}

#[test]
fn test_directive_prologue_sets_directive() {
    let program = parse_ok("'use strict';\n\"another\";\nx;");
    let directives: Vec<Option<&str>> = program
        .body
        .iter()
        .map(|s| match s {
            Statement::ExpressionStatement { directive, .. } => directive.as_deref(),
            other => panic!("{:?}", other),
        })
        .collect();
    assert_eq!(directives, vec![Some("use strict"), Some("another"), None]);
}

#[test]
fn test_directive_keeps_raw_escapes() {
    let program = parse_ok(r"'use\x20strict'; with (a) b;");
    match &program.body[0] {
        Statement::ExpressionStatement { directive, .. } => {
            assert_eq!(directive.as_deref(), Some(r"use\x20strict"));
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_function_directive_does_not_leak() {
    parse_ok("function f() { 'use strict'; } with (a) b;");
}

#[test]
fn test_try_with_only_finally() {
    let program = parse_ok("try { risky() } finally { cleanup() }");
    assert!(matches!(
        program.body[0],
        Statement::TryStatement {
            handler: None,
            finalizer: Some(_),
            ..
        }
    ));
}

#[test]
fn test_empty_and_debugger_statements() {
    let program = parse_ok(";;debugger");
    assert!(matches!(program.body[0], Statement::EmptyStatement { .. }));
    assert!(matches!(program.body[2], Statement::DebuggerStatement { .. }));
}

#[test]
fn test_comments_are_skipped() {
    let program = parse_ok("/* leading */ a; // trailing\n/** doc\n */ b;");
    assert_eq!(program.body.len(), 2);
}
