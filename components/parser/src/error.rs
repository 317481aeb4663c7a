//! Parser error messages and helpers

use core_types::{ParseError, Position};

use crate::token::{Token, TokenKind, TokenValue};

/// Character that cannot start any token, or a literal cut short by EOF
pub const INVALID_OR_UNEXPECTED_TOKEN: &str = "Invalid or unexpected token";
/// String literal without a closing quote on the same line
pub const UNTERMINATED_STRING: &str = "Unterminated string literal";
/// Block comment without `*/`
pub const UNTERMINATED_COMMENT: &str = "Unterminated comment";
/// Regular expression without a closing `/` on the same line
pub const UNTERMINATED_REGEXP: &str = "Unterminated regular expression";
/// Unknown or repeated regular expression flag
pub const INVALID_REGEXP_FLAGS: &str = "Invalid regular expression flags";
/// `\x` not followed by two hex digits
pub const INVALID_HEX_ESCAPE: &str = "Invalid hexadecimal escape sequence";
/// Malformed `\u` escape
pub const INVALID_UNICODE_ESCAPE: &str = "Invalid Unicode escape sequence";
/// `\u{...}` above 0x10FFFF
pub const UNDEFINED_CODE_POINT: &str = "Undefined Unicode code-point";
/// Reserved word written with escapes
pub const ESCAPED_KEYWORD: &str = "Keyword must not contain escaped characters";
/// Empty mantissa, empty exponent or empty radix digits
pub const INVALID_NUMERIC_LITERAL: &str = "Invalid numeric literal";
/// `3in`, `0x1g` and similar
pub const IDENTIFIER_AFTER_NUMBER: &str =
    "Numeric literal must not be immediately followed by an identifier";

/// Assignment to something that is not an identifier or member expression
pub const INVALID_ASSIGNMENT_TARGET: &str = "Invalid left-hand side in assignment";
/// Prefix `++`/`--` on a non-reference
pub const INVALID_PREFIX_TARGET: &str = "Invalid left-hand side expression in prefix operation";
/// Postfix `++`/`--` on a non-reference
pub const INVALID_POSTFIX_TARGET: &str = "Invalid left-hand side expression in postfix operation";
/// `set` accessor arity
pub const BAD_SETTER_ARITY: &str = "Setter must have exactly one formal parameter";
/// `get` accessor arity
pub const BAD_GETTER_ARITY: &str = "Getter must not have any formal parameters";
/// `try` block alone
pub const MISSING_CATCH_OR_FINALLY: &str = "Missing catch or finally after try";
/// Second `default` in one `switch`
pub const MULTIPLE_DEFAULTS: &str = "More than one default clause in switch statement";

/// `break` outside loop and switch
pub const ILLEGAL_BREAK: &str = "Illegal break statement";
/// `continue` outside a loop
pub const ILLEGAL_CONTINUE: &str = "Illegal continue statement: no surrounding iteration statement";
/// `throw` followed by a line break
pub const NEWLINE_AFTER_THROW: &str = "Illegal newline after throw";
/// `return` outside a function body
pub const ILLEGAL_RETURN: &str = "Illegal return statement";
/// for-in left side that is not a reference or declaration
pub const INVALID_FOR_IN_TARGET: &str = "Invalid left-hand side in for-in loop";
/// for-in declaration with several declarators
pub const FOR_IN_MULTIPLE_BINDINGS: &str =
    "Invalid left-hand side in for-in loop: Must have a single binding.";

/// `with` in strict code
pub const STRICT_WITH: &str = "Strict mode code may not include a with statement";
/// `delete x` in strict code
pub const STRICT_DELETE: &str = "Delete of an unqualified identifier in strict mode.";
/// `eval`/`arguments` bound or assigned in strict code
pub const STRICT_EVAL_ARGUMENTS: &str = "Unexpected eval or arguments in strict mode";
/// `let`, `yield` and friends as identifiers in strict code
pub const STRICT_RESERVED_WORD: &str = "Unexpected strict mode reserved word";
/// Legacy octal escapes in strict code
pub const STRICT_OCTAL_ESCAPE: &str = "Octal escape sequences are not allowed in strict mode.";

/// Build the error for a token that does not fit the grammar here.
pub fn unexpected_token(token: &Token) -> ParseError {
    let message = match (token.kind, &token.value) {
        (TokenKind::EndOfFile, _) => "Unexpected end of input".to_string(),
        (TokenKind::Identifier, Some(TokenValue::String(name))) => {
            format!("Unexpected identifier '{}'", name)
        }
        (TokenKind::NumericLiteral, _) => "Unexpected number".to_string(),
        (TokenKind::StringLiteral, _) => "Unexpected string".to_string(),
        (kind, _) => format!("Unexpected token {}", kind),
    };
    ParseError::syntactic(message, token.loc.start)
}

/// Build the error for a `break`/`continue` naming a label that is not active.
pub fn undefined_label(name: &str, position: Position) -> ParseError {
    ParseError::contextual(format!("Undefined label '{}'", name), position)
}

/// Build the error for a label that is already active.
pub fn label_redeclaration(name: &str, position: Position) -> ParseError {
    ParseError::contextual(format!("Label '{}' has already been declared", name), position)
}

/// Build the error for a pattern the regex engine rejects.
pub fn invalid_regexp(pattern: &str, reason: &str, position: Position) -> ParseError {
    ParseError::lexical(
        format!("Invalid regular expression: /{}/: {}", pattern, reason),
        position,
    )
}
