//! ECMAScript Parser Component
//!
//! Tokenizes and parses ECMAScript 5 scripts into an ESTree-shaped AST.
//!
//! # Overview
//!
//! - [`Lexer`] - Pull-based tokenizer with regular expression re-scanning
//! - [`Token`] - Token kinds, values and flags
//! - [`Parser`] - Recursive descent parser with precedence climbing
//! - [`Program`] - Root of the AST; every node serializes to ESTree JSON
//!
//! # Example
//!
//! ```
//! use ecma_parser::ast::Statement;
//!
//! let program = ecma_parser::parse("var answer = 6 * 7;").unwrap();
//! assert!(matches!(program.body[0], Statement::VariableDeclaration { .. }));
//!
//! let json = serde_json::to_value(&program).unwrap();
//! assert_eq!(json["type"], "Program");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
mod declaration;
pub mod error;
mod expression;
pub mod lexer;
pub mod options;
pub mod parser;
mod statement;
pub mod token;

pub use ast::Program;
pub use core_types::{ErrorKind, ParseError, ParseResult, Position, SourceSpan};
pub use lexer::{tokenize, Lexer};
pub use options::{OptionsError, ParserOptions};
pub use parser::Parser;
pub use token::{Token, TokenFlags, TokenKind, TokenValue};

/// Parse a script with default options
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(source).parse()
}

/// Parse a script with explicit options
pub fn parse_with_options(source: &str, options: &ParserOptions) -> ParseResult<Program> {
    Parser::with_options(source, options.clone()).parse()
}
