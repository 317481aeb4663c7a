//! Shared helpers for parser integration tests

#![allow(dead_code)]

use ecma_parser::ast::{Expression, Statement};
use ecma_parser::{ParseError, Program};

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .is_test(true)
        .try_init();
}

/// Parse a script that is expected to be valid
pub fn parse_ok(source: &str) -> Program {
    match ecma_parser::parse(source) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    }
}

/// Parse a script that is expected to be rejected
pub fn parse_err(source: &str) -> ParseError {
    match ecma_parser::parse(source) {
        Ok(program) => panic!("expected {:?} to fail, got {:?}", source, program),
        Err(err) => err,
    }
}

/// The expression of a single-statement script
pub fn single_expression(source: &str) -> Expression {
    let mut program = parse_ok(source);
    assert_eq!(program.body.len(), 1, "expected one statement in {:?}", source);
    match program.body.remove(0) {
        Statement::ExpressionStatement { expression, .. } => expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}
