//! Token definitions for the tokenizer.
//!
//! [`TokenKind`] is ordered so that every binary operator sits in one
//! contiguous range, with tighter-binding operators at higher values.
//! Classifying a kind as a binary operator is a range check, and
//! comparing two precedence tiers is an integer comparison.

use bitflags::bitflags;
use core_types::SourceSpan;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// End of input
    EndOfFile,
    /// Identifier that is not a reserved word
    Identifier,
    /// Numeric literal
    NumericLiteral,
    /// String literal
    StringLiteral,
    /// Regular expression literal, only produced by re-lexing `/` or `/=`
    RegularExpressionLiteral,

    // Punctuators
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `.`
    Period,
    /// `...`
    Ellipsis,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `?`
    QuestionMark,
    /// `=>`
    Arrow,
    /// `!`
    Negate,
    /// `~`
    Complement,
    /// `++`
    Increment,
    /// `--`
    Decrement,

    // Assignment operators
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubtractAssign,
    /// `*=`
    MultiplyAssign,
    /// `/=`
    DivideAssign,
    /// `%=`
    ModuloAssign,
    /// `**=`
    ExponentiateAssign,
    /// `<<=`
    ShiftLeftAssign,
    /// `>>=`
    ShiftRightAssign,
    /// `>>>=`
    LogicalShiftRightAssign,
    /// `&=`
    BitwiseAndAssign,
    /// `|=`
    BitwiseOrAssign,
    /// `^=`
    BitwiseXorAssign,

    // Binary operators, loosest first. Keep contiguous.
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `&`
    BitwiseAnd,
    /// `==`
    LooseEqual,
    /// `!=`
    LooseNotEqual,
    /// `===`
    StrictEqual,
    /// `!==`
    StrictNotEqual,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessThanOrEqual,
    /// `>=`
    GreaterThanOrEqual,
    /// `instanceof`
    Instanceof,
    /// `in`
    In,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `>>>`
    LogicalShiftRight,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `**`
    Exponentiate,

    // Keywords
    /// `break`
    Break,
    /// `case`
    Case,
    /// `catch`
    Catch,
    /// `class`
    Class,
    /// `const`
    Const,
    /// `continue`
    Continue,
    /// `debugger`
    Debugger,
    /// `default`
    Default,
    /// `delete`
    Delete,
    /// `do`
    Do,
    /// `else`
    Else,
    /// `enum`
    Enum,
    /// `export`
    Export,
    /// `extends`
    Extends,
    /// `false`
    False,
    /// `finally`
    Finally,
    /// `for`
    For,
    /// `function`
    Function,
    /// `if`
    If,
    /// `import`
    Import,
    /// `new`
    New,
    /// `null`
    Null,
    /// `return`
    Return,
    /// `super`
    Super,
    /// `switch`
    Switch,
    /// `this`
    This,
    /// `throw`
    Throw,
    /// `true`
    True,
    /// `try`
    Try,
    /// `typeof`
    Typeof,
    /// `var`
    Var,
    /// `void`
    Void,
    /// `while`
    While,
    /// `with`
    With,
}

impl TokenKind {
    /// Returns true for `||` through `**`.
    pub fn is_binary_operator(self) -> bool {
        (TokenKind::LogicalOr as u8..=TokenKind::Exponentiate as u8).contains(&(self as u8))
    }

    /// Returns true for `=` and every compound assignment operator.
    pub fn is_assignment_operator(self) -> bool {
        (TokenKind::Assign as u8..=TokenKind::BitwiseXorAssign as u8).contains(&(self as u8))
    }

    /// Returns true for the prefix operators that build a `UnaryExpression`.
    pub fn is_unary_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Typeof
                | TokenKind::Void
                | TokenKind::Delete
                | TokenKind::Negate
                | TokenKind::Complement
                | TokenKind::Add
                | TokenKind::Subtract
        )
    }

    /// Returns true for `++` and `--`.
    pub fn is_update_operator(self) -> bool {
        matches!(self, TokenKind::Increment | TokenKind::Decrement)
    }

    /// Returns true for reserved words, including `in` and `instanceof`.
    pub fn is_keyword(self) -> bool {
        self >= TokenKind::Break || matches!(self, TokenKind::In | TokenKind::Instanceof)
    }

    /// Precedence tier of a binary operator; higher binds tighter.
    ///
    /// Tiers follow the declaration order of the binary range, so
    /// `a.precedence() < b.precedence()` implies `a < b`.
    pub fn precedence(self) -> Option<u8> {
        if !self.is_binary_operator() {
            return None;
        }
        let tier = match self {
            TokenKind::LogicalOr => 1,
            TokenKind::LogicalAnd => 2,
            TokenKind::BitwiseOr => 3,
            TokenKind::BitwiseXor => 4,
            TokenKind::BitwiseAnd => 5,
            TokenKind::LooseEqual
            | TokenKind::LooseNotEqual
            | TokenKind::StrictEqual
            | TokenKind::StrictNotEqual => 6,
            TokenKind::LessThan
            | TokenKind::GreaterThan
            | TokenKind::LessThanOrEqual
            | TokenKind::GreaterThanOrEqual
            | TokenKind::Instanceof
            | TokenKind::In => 7,
            TokenKind::ShiftLeft | TokenKind::ShiftRight | TokenKind::LogicalShiftRight => 8,
            TokenKind::Add | TokenKind::Subtract => 9,
            TokenKind::Multiply | TokenKind::Divide | TokenKind::Modulo => 10,
            TokenKind::Exponentiate => 11,
            _ => return None,
        };
        Some(tier)
    }

    /// Only `**` groups to the right.
    pub fn is_right_associative(self) -> bool {
        self == TokenKind::Exponentiate
    }

    /// Source text of a punctuator or keyword, or a description for
    /// value-carrying kinds.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::NumericLiteral => "number",
            TokenKind::StringLiteral => "string",
            TokenKind::RegularExpressionLiteral => "regular expression",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Period => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::QuestionMark => "?",
            TokenKind::Arrow => "=>",
            TokenKind::Negate => "!",
            TokenKind::Complement => "~",
            TokenKind::Increment => "++",
            TokenKind::Decrement => "--",
            TokenKind::Assign => "=",
            TokenKind::AddAssign => "+=",
            TokenKind::SubtractAssign => "-=",
            TokenKind::MultiplyAssign => "*=",
            TokenKind::DivideAssign => "/=",
            TokenKind::ModuloAssign => "%=",
            TokenKind::ExponentiateAssign => "**=",
            TokenKind::ShiftLeftAssign => "<<=",
            TokenKind::ShiftRightAssign => ">>=",
            TokenKind::LogicalShiftRightAssign => ">>>=",
            TokenKind::BitwiseAndAssign => "&=",
            TokenKind::BitwiseOrAssign => "|=",
            TokenKind::BitwiseXorAssign => "^=",
            TokenKind::LogicalOr => "||",
            TokenKind::LogicalAnd => "&&",
            TokenKind::BitwiseOr => "|",
            TokenKind::BitwiseXor => "^",
            TokenKind::BitwiseAnd => "&",
            TokenKind::LooseEqual => "==",
            TokenKind::LooseNotEqual => "!=",
            TokenKind::StrictEqual => "===",
            TokenKind::StrictNotEqual => "!==",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThanOrEqual => "<=",
            TokenKind::GreaterThanOrEqual => ">=",
            TokenKind::Instanceof => "instanceof",
            TokenKind::In => "in",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::LogicalShiftRight => ">>>",
            TokenKind::Add => "+",
            TokenKind::Subtract => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Modulo => "%",
            TokenKind::Exponentiate => "**",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Debugger => "debugger",
            TokenKind::Default => "default",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Enum => "enum",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::False => "false",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::New => "new",
            TokenKind::Null => "null",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::True => "true",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up a reserved word.
pub fn keyword_from_str(name: &str) -> Option<TokenKind> {
    let kind = match name {
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "false" => TokenKind::False,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "import" => TokenKind::Import,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "new" => TokenKind::New,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        _ => return None,
    };
    Some(kind)
}

/// Words that are ordinary identifiers in sloppy code but reserved in
/// strict-mode code.
pub fn is_strict_mode_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "implements"
            | "interface"
            | "let"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "static"
            | "yield"
    )
}

bitflags! {
    /// Contextual facts about a token that its kind alone does not carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        /// At least one line terminator was skipped before this token.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// The identifier or string contains a `\u` escape.
        const UNICODE_ESCAPE = 1 << 1;
        /// The escape used the braced `\u{...}` form.
        const EXTENDED_UNICODE_ESCAPE = 1 << 2;
        /// Numeric literal with an exponent part.
        const SCIENTIFIC = 1 << 3;
        /// String literal with a legacy octal escape such as `\012`.
        const OCTAL = 1 << 4;
        /// `0x` numeric literal.
        const HEX_SPECIFIER = 1 << 5;
        /// `0b` numeric literal.
        const BINARY_SPECIFIER = 1 << 6;
        /// `0o` numeric literal.
        const OCTAL_SPECIFIER = 1 << 7;
        /// String literal with a `\8` or `\9` escape.
        const CONTAINS_INVALID_ESCAPE = 1 << 8;
    }
}

/// The decoded payload of a value-carrying token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Identifier or keyword name, or cooked string literal contents
    String(String),
    /// Numeric literal value
    Number(f64),
    /// Regular expression body and flags
    Regex {
        /// Text between the slashes
        pattern: String,
        /// Flag characters after the closing slash
        flags: String,
    },
}

/// A single token with its location and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Kind of token
    pub kind: TokenKind,
    /// Decoded value, for identifiers, keywords and literals
    pub value: Option<TokenValue>,
    /// Line/column span of the token text
    pub loc: SourceSpan,
    /// Contextual flags
    pub flags: TokenFlags,
    /// Code point offset of the first character
    pub start: usize,
    /// Code point offset just past the last character
    pub end: usize,
}

impl Token {
    /// True if a line terminator separates this token from the previous one.
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Name of an identifier or keyword, or the cooked value of a string.
    pub fn name(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// True for identifiers and reserved words, which are both valid
    /// property names.
    pub fn is_identifier_name(&self) -> bool {
        self.kind == TokenKind::Identifier || self.kind.is_keyword()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_range_is_contiguous() {
        assert!(TokenKind::LogicalOr.is_binary_operator());
        assert!(TokenKind::In.is_binary_operator());
        assert!(TokenKind::Exponentiate.is_binary_operator());
        assert!(!TokenKind::BitwiseXorAssign.is_binary_operator());
        assert!(!TokenKind::Break.is_binary_operator());
        assert!(!TokenKind::Negate.is_binary_operator());
    }

    #[test]
    fn test_operator_classes_are_disjoint() {
        assert!(TokenKind::Assign.is_assignment_operator());
        assert!(TokenKind::LogicalShiftRightAssign.is_assignment_operator());
        assert!(TokenKind::BitwiseXorAssign.is_assignment_operator());
        assert!(!TokenKind::LooseEqual.is_assignment_operator());
        assert!(!TokenKind::LogicalOr.is_assignment_operator());

        assert!(TokenKind::Increment.is_update_operator());
        assert!(TokenKind::Decrement.is_update_operator());
        assert!(!TokenKind::Add.is_update_operator());

        for kind in [TokenKind::Typeof, TokenKind::Negate, TokenKind::Complement] {
            assert!(kind.is_unary_operator(), "{:?}", kind);
            assert!(!kind.is_binary_operator(), "{:?}", kind);
        }
        // `+` and `-` are both prefix and infix
        assert!(TokenKind::Subtract.is_unary_operator());
        assert!(TokenKind::Subtract.is_binary_operator());
    }

    #[test]
    fn test_every_binary_operator_has_precedence() {
        let binary = [
            TokenKind::LogicalOr,
            TokenKind::LogicalAnd,
            TokenKind::BitwiseOr,
            TokenKind::BitwiseXor,
            TokenKind::BitwiseAnd,
            TokenKind::LooseEqual,
            TokenKind::LooseNotEqual,
            TokenKind::StrictEqual,
            TokenKind::StrictNotEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::LessThanOrEqual,
            TokenKind::GreaterThanOrEqual,
            TokenKind::Instanceof,
            TokenKind::In,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::LogicalShiftRight,
            TokenKind::Add,
            TokenKind::Subtract,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::Modulo,
            TokenKind::Exponentiate,
        ];
        assert_eq!(
            binary.len(),
            (TokenKind::Exponentiate as u8 - TokenKind::LogicalOr as u8 + 1) as usize
        );
        for kind in binary {
            assert!(kind.is_binary_operator(), "{:?}", kind);
            assert!(kind.precedence().is_some(), "{:?}", kind);
        }
        assert_eq!(TokenKind::Assign.precedence(), None);
    }

    #[test]
    fn test_precedence_follows_kind_order() {
        let ordered = [
            TokenKind::LogicalOr,
            TokenKind::LogicalAnd,
            TokenKind::BitwiseOr,
            TokenKind::BitwiseXor,
            TokenKind::BitwiseAnd,
            TokenKind::StrictEqual,
            TokenKind::In,
            TokenKind::ShiftRight,
            TokenKind::Subtract,
            TokenKind::Modulo,
            TokenKind::Exponentiate,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].precedence() < pair[1].precedence());
        }
    }

    #[test]
    fn test_same_tier_operators() {
        assert_eq!(TokenKind::Add.precedence(), TokenKind::Subtract.precedence());
        assert_eq!(TokenKind::In.precedence(), TokenKind::LessThan.precedence());
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword_from_str("instanceof"), Some(TokenKind::Instanceof));
        assert_eq!(keyword_from_str("while"), Some(TokenKind::While));
        assert_eq!(keyword_from_str("get"), None);
        assert_eq!(keyword_from_str("let"), None);
        assert!(is_strict_mode_reserved_word("let"));
    }

    #[test]
    fn test_keyword_flag() {
        assert!(TokenKind::With.is_keyword());
        assert!(TokenKind::In.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::Exponentiate.is_keyword());
    }
}
