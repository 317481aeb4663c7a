//! Unit tests for ParseError and ErrorKind

use core_types::{ErrorKind, ParseError, ParseResult, Position};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        let pos = Position::new(1, 0);

        assert_eq!(ParseError::lexical("x", pos).kind, ErrorKind::Lexical);
        assert_eq!(ParseError::syntactic("x", pos).kind, ErrorKind::Syntactic);
        assert_eq!(ParseError::contextual("x", pos).kind, ErrorKind::Contextual);
    }
}

#[cfg(test)]
mod parse_error_tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_message_and_position() {
        let error = ParseError::new(
            ErrorKind::Contextual,
            "Undefined label 'outer'",
            Position::new(4, 2),
        );

        assert_eq!(error.message, "Undefined label 'outer'");
        assert_eq!(error.position, Position::new(4, 2));
    }

    #[test]
    fn test_parse_error_display_includes_position() {
        let error = ParseError::syntactic("Unexpected token ;", Position::new(12, 30));

        assert_eq!(format!("{}", error), "Unexpected token ; at (12, 30)");
    }

    #[test]
    fn test_parse_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}

        let error = ParseError::lexical("Unterminated comment", Position::new(1, 0));
        takes_error(&error);
    }

    #[test]
    fn test_parse_result_propagates_with_question_mark() {
        fn inner() -> ParseResult<u32> {
            Err(ParseError::lexical("Invalid or unexpected token", Position::new(1, 1)))
        }

        fn outer() -> ParseResult<u32> {
            let value = inner()?;
            Ok(value + 1)
        }

        let err = outer().unwrap_err();
        assert_eq!(err.position.column, 1);
    }
}
