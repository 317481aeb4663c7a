//! Source locations and error types shared by the tokenizer and parser.
//!
//! # Overview
//!
//! - [`Position`] - A line/column point in source text
//! - [`SourceSpan`] - A start/end range of source text
//! - [`ParseError`] - The single fatal error a failed parse produces
//! - [`ErrorKind`] - Lexical, syntactic or contextual classification
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, ParseError, Position, SourceSpan};
//!
//! let span = SourceSpan::new(Position::new(1, 0), Position::new(1, 5));
//! assert!(span.contains(&span));
//!
//! let error = ParseError::contextual("Illegal break statement", span.start);
//! assert_eq!(error.kind, ErrorKind::Contextual);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, ParseError, ParseResult};
pub use source::{Position, SourceSpan};
