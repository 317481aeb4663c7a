//! Parse error types.
//!
//! A parse either produces a tree or fails with exactly one [`ParseError`].
//! There is no recovery and no list of diagnostics.

use thiserror::Error;

use crate::Position;

/// The broad category of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token: unterminated literal, bad escape, bad numeric literal
    Lexical,
    /// Token sequence does not match the grammar
    Syntactic,
    /// Grammatically well-formed construct used where it is not allowed,
    /// such as `break` outside a loop or a redeclared label
    Contextual,
}

/// A fatal error raised while tokenizing or parsing.
///
/// The `Display` rendering appends the position to the message.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, ParseError, Position};
///
/// let error = ParseError::new(
///     ErrorKind::Syntactic,
///     "Unexpected token )",
///     Position::new(3, 14),
/// );
///
/// assert_eq!(error.to_string(), "Unexpected token ) at (3, 14)");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at ({}, {})", .position.line, .position.column)]
pub struct ParseError {
    /// Category of the error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Position nearest the point of detection
    pub position: Position,
}

impl ParseError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    /// Creates a [`ErrorKind::Lexical`] error.
    pub fn lexical(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Lexical, message, position)
    }

    /// Creates a [`ErrorKind::Syntactic`] error.
    pub fn syntactic(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Syntactic, message, position)
    }

    /// Creates a [`ErrorKind::Contextual`] error.
    pub fn contextual(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Contextual, message, position)
    }
}

/// Result alias used by every fallible tokenizer and parser operation.
pub type ParseResult<T> = Result<T, ParseError>;
