//! Tokenizer for ECMAScript source text
//!
//! The lexer is pull-based: the parser asks for one token at a time with
//! [`Lexer::next_token`]. A `/` or `/=` is always produced as an operator;
//! the parser calls [`Lexer::rescan_as_regex`] when it finds one in
//! primary-expression position.

use core_types::{ParseError, ParseResult, Position, SourceSpan};
use log::trace;

use crate::error::{
    invalid_regexp, ESCAPED_KEYWORD, IDENTIFIER_AFTER_NUMBER, INVALID_HEX_ESCAPE,
    INVALID_NUMERIC_LITERAL, INVALID_OR_UNEXPECTED_TOKEN, INVALID_REGEXP_FLAGS,
    INVALID_UNICODE_ESCAPE, UNDEFINED_CODE_POINT, UNTERMINATED_COMMENT, UNTERMINATED_REGEXP,
    UNTERMINATED_STRING,
};
use crate::token::{keyword_from_str, Token, TokenFlags, TokenKind, TokenValue};

const REGEXP_FLAGS: &str = "dgimsuy";

/// Lexer for ECMAScript source code
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    token_start: usize,
    token_line: u32,
    token_column: u32,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
            token_start: 0,
            token_line: 1,
            token_column: 0,
        }
    }

    /// Skip a `#!` line at the very start of the source.
    pub fn skip_hashbang(&mut self) {
        if self.position != 0 || self.peek() != Some('#') || self.peek_next() != Some('!') {
            return;
        }
        while let Some(c) = self.peek() {
            if is_line_terminator(c) {
                break;
            }
            self.advance();
        }
    }

    /// Number of code points in the source.
    pub fn source_len(&self) -> usize {
        self.chars.len()
    }

    /// Source text between two code point offsets.
    pub fn source_text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Scan the next token, skipping whitespace and comments first.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        let line_break = self.skip_whitespace_and_comments()?;
        self.mark_token_start();

        let mut token = self.scan_token()?;
        if line_break {
            token.flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }

        trace!(
            target: "ecma_parser::lexer",
            "{:?} at ({}, {})",
            token.kind,
            token.loc.start.line,
            token.loc.start.column
        );
        Ok(token)
    }

    /// Re-derive `token`, a `/` or `/=` that was the most recently scanned
    /// token, as a regular expression literal.
    pub fn rescan_as_regex(&mut self, token: &Token) -> ParseResult<Token> {
        debug_assert!(matches!(
            token.kind,
            TokenKind::Divide | TokenKind::DivideAssign
        ));

        // Rewind to just after the leading slash. For `/=` the `=` becomes
        // the first character of the pattern.
        self.position = token.start + 1;
        self.line = token.loc.start.line;
        self.column = token.loc.start.column + 1;
        self.token_start = token.start;
        self.token_line = token.loc.start.line;
        self.token_column = token.loc.start.column;

        let mut pattern = String::new();
        let mut in_class = false;
        loop {
            match self.peek() {
                None => return Err(self.error_at_token_start(UNTERMINATED_REGEXP)),
                Some(c) if is_line_terminator(c) => {
                    return Err(self.error_at_token_start(UNTERMINATED_REGEXP))
                }
                Some('\\') => {
                    pattern.push(self.advance());
                    match self.peek() {
                        Some(c) if !is_line_terminator(c) => pattern.push(self.advance()),
                        _ => return Err(self.error_at_token_start(UNTERMINATED_REGEXP)),
                    }
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    if c == '[' {
                        in_class = true;
                    } else if c == ']' {
                        in_class = false;
                    }
                    pattern.push(self.advance());
                }
            }
        }

        let mut flags = String::new();
        while let Some(c) = self.peek() {
            if !is_id_continue(c) {
                break;
            }
            flags.push(self.advance());
        }

        self.validate_regex(&pattern, &flags)?;
        trace!(target: "ecma_parser::lexer", "re-lexed regex /{}/{}", pattern, flags);

        let flags_mask = token.flags & TokenFlags::PRECEDING_LINE_BREAK;
        Ok(self.make_token(
            TokenKind::RegularExpressionLiteral,
            Some(TokenValue::Regex { pattern, flags }),
            flags_mask,
        ))
    }

    fn validate_regex(&self, pattern: &str, flags: &str) -> ParseResult<()> {
        let mut seen = String::new();
        for c in flags.chars() {
            if !REGEXP_FLAGS.contains(c) || seen.contains(c) {
                return Err(self.error_at_token_start(INVALID_REGEXP_FLAGS));
            }
            seen.push(c);
        }

        // The engine only understands the flags that change matching.
        let engine_flags: String = flags.chars().filter(|c| "imsu".contains(*c)).collect();
        regress::Regex::with_flags(pattern, engine_flags.as_str())
            .map(|_| ())
            .map_err(|e| invalid_regexp(pattern, &e.to_string(), self.token_start_position()))
    }

    fn scan_token(&mut self) -> ParseResult<Token> {
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(self.make_token(TokenKind::EndOfFile, None, TokenFlags::empty())),
        };

        if ch == '"' || ch == '\'' {
            return self.scan_string(ch);
        }
        if ch.is_ascii_digit() {
            return self.scan_number();
        }
        if ch == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            return self.scan_number();
        }
        if ch == '\\' || is_id_start(ch) {
            return self.scan_identifier();
        }

        self.advance();
        let kind = match ch {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::QuestionMark,
            '~' => TokenKind::Complement,
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Period
                }
            }
            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::StrictEqual
                    } else {
                        TokenKind::LooseEqual
                    }
                } else if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::StrictNotEqual
                    } else {
                        TokenKind::LooseNotEqual
                    }
                } else {
                    TokenKind::Negate
                }
            }
            '+' => {
                if self.match_char('+') {
                    TokenKind::Increment
                } else if self.match_char('=') {
                    TokenKind::AddAssign
                } else {
                    TokenKind::Add
                }
            }
            '-' => {
                if self.match_char('-') {
                    TokenKind::Decrement
                } else if self.match_char('=') {
                    TokenKind::SubtractAssign
                } else {
                    TokenKind::Subtract
                }
            }
            '*' => {
                if self.match_char('*') {
                    if self.match_char('=') {
                        TokenKind::ExponentiateAssign
                    } else {
                        TokenKind::Exponentiate
                    }
                } else if self.match_char('=') {
                    TokenKind::MultiplyAssign
                } else {
                    TokenKind::Multiply
                }
            }
            '/' => {
                if self.match_char('=') {
                    TokenKind::DivideAssign
                } else {
                    TokenKind::Divide
                }
            }
            '%' => {
                if self.match_char('=') {
                    TokenKind::ModuloAssign
                } else {
                    TokenKind::Modulo
                }
            }
            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        TokenKind::ShiftLeftAssign
                    } else {
                        TokenKind::ShiftLeft
                    }
                } else if self.match_char('=') {
                    TokenKind::LessThanOrEqual
                } else {
                    TokenKind::LessThan
                }
            }
            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            TokenKind::LogicalShiftRightAssign
                        } else {
                            TokenKind::LogicalShiftRight
                        }
                    } else if self.match_char('=') {
                        TokenKind::ShiftRightAssign
                    } else {
                        TokenKind::ShiftRight
                    }
                } else if self.match_char('=') {
                    TokenKind::GreaterThanOrEqual
                } else {
                    TokenKind::GreaterThan
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::LogicalAnd
                } else if self.match_char('=') {
                    TokenKind::BitwiseAndAssign
                } else {
                    TokenKind::BitwiseAnd
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::LogicalOr
                } else if self.match_char('=') {
                    TokenKind::BitwiseOrAssign
                } else {
                    TokenKind::BitwiseOr
                }
            }
            '^' => {
                if self.match_char('=') {
                    TokenKind::BitwiseXorAssign
                } else {
                    TokenKind::BitwiseXor
                }
            }
            _ => return Err(self.error_at_token_start(INVALID_OR_UNEXPECTED_TOKEN)),
        };

        Ok(self.make_token(kind, None, TokenFlags::empty()))
    }

    fn scan_string(&mut self, quote: char) -> ParseResult<Token> {
        self.advance();
        let mut value = String::new();
        let mut flags = TokenFlags::empty();

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error_at_token_start(UNTERMINATED_STRING))
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => self.scan_escape(&mut value, &mut flags)?,
                Some(_) => value.push(self.advance()),
            }
        }

        Ok(self.make_token(
            TokenKind::StringLiteral,
            Some(TokenValue::String(value)),
            flags,
        ))
    }

    /// Decode one escape sequence inside a string literal. The cursor is on
    /// the backslash.
    fn scan_escape(&mut self, value: &mut String, flags: &mut TokenFlags) -> ParseResult<()> {
        let escape_pos = self.current_position();
        self.advance();

        let c = match self.peek() {
            Some(c) => c,
            None => return Err(self.error_at_token_start(UNTERMINATED_STRING)),
        };
        self.advance();

        match c {
            // Line continuations contribute nothing to the value.
            '\n' | '\u{2028}' | '\u{2029}' => self.newline(),
            '\r' => {
                self.match_char('\n');
                self.newline();
            }
            'x' => {
                let high = self.peek().and_then(|c| c.to_digit(16));
                let low = self.peek_next().and_then(|c| c.to_digit(16));
                match (high, low) {
                    (Some(high), Some(low)) => {
                        self.advance();
                        self.advance();
                        push_code_point(value, high * 16 + low);
                    }
                    _ => return Err(ParseError::lexical(INVALID_HEX_ESCAPE, escape_pos)),
                }
            }
            'u' => {
                let code_point = self.scan_unicode_escape(flags, escape_pos)?;
                self.push_escaped_code_point(value, flags, code_point)?;
            }
            '0'..='7' => {
                let mut code = c as u32 - '0' as u32;
                let max_digits = if code <= 3 { 3 } else { 2 };
                let mut digits = 1;
                while digits < max_digits {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            self.advance();
                            code = code * 8 + d;
                            digits += 1;
                        }
                        None => break,
                    }
                }
                // `\0` alone is a null character, not an octal escape.
                let plain_null = c == '0' && digits == 1 && !self.peek().is_some_and(|c| c.is_ascii_digit());
                if !plain_null {
                    *flags |= TokenFlags::OCTAL;
                }
                push_code_point(value, code);
            }
            '8' | '9' => {
                *flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                value.push(c);
            }
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'b' => value.push('\u{0008}'),
            'f' => value.push('\u{000C}'),
            'v' => value.push('\u{000B}'),
            other => value.push(other),
        }
        Ok(())
    }

    /// Appends a `\u` code point, joining a high surrogate with an escaped
    /// low surrogate that directly follows it.
    fn push_escaped_code_point(
        &mut self,
        value: &mut String,
        flags: &mut TokenFlags,
        code_point: u32,
    ) -> ParseResult<()> {
        if (0xD800..0xDC00).contains(&code_point)
            && self.peek() == Some('\\')
            && self.chars.get(self.position + 1) == Some(&'u')
        {
            let saved = (self.position, self.line, self.column);
            let escape_pos = self.current_position();
            self.advance();
            self.advance();
            let low = self.scan_unicode_escape(flags, escape_pos)?;
            if (0xDC00..0xE000).contains(&low) {
                let combined = 0x10000 + ((code_point - 0xD800) << 10) + (low - 0xDC00);
                push_code_point(value, combined);
                return Ok(());
            }
            (self.position, self.line, self.column) = saved;
        }
        push_code_point(value, code_point);
        Ok(())
    }

    /// Decode the digits of a `\u` escape. The cursor is just past the `u`.
    fn scan_unicode_escape(
        &mut self,
        flags: &mut TokenFlags,
        escape_pos: Position,
    ) -> ParseResult<u32> {
        *flags |= TokenFlags::UNICODE_ESCAPE;

        if self.match_char('{') {
            *flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
            let mut code_point: u32 = 0;
            let mut digits = 0;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                self.advance();
                code_point = code_point * 16 + d;
                digits += 1;
                if code_point > 0x10FFFF {
                    return Err(ParseError::lexical(UNDEFINED_CODE_POINT, escape_pos));
                }
            }
            if digits == 0 || !self.match_char('}') {
                return Err(ParseError::lexical(INVALID_UNICODE_ESCAPE, escape_pos));
            }
            return Ok(code_point);
        }

        let mut code_point = 0;
        for _ in 0..4 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    self.advance();
                    code_point = code_point * 16 + d;
                }
                None => return Err(ParseError::lexical(INVALID_UNICODE_ESCAPE, escape_pos)),
            }
        }
        Ok(code_point)
    }

    fn scan_number(&mut self) -> ParseResult<Token> {
        if self.peek() == Some('0') {
            let radix = match self.peek_next() {
                Some('x' | 'X') => Some((16, TokenFlags::HEX_SPECIFIER)),
                Some('o' | 'O') => Some((8, TokenFlags::OCTAL_SPECIFIER)),
                Some('b' | 'B') => Some((2, TokenFlags::BINARY_SPECIFIER)),
                _ => None,
            };
            if let Some((radix, flag)) = radix {
                return self.scan_radix_number(radix, flag);
            }
        }

        let mut flags = TokenFlags::empty();
        let integer = self.scan_decimal_digits();
        let mut fraction = String::new();
        let mut exponent = String::new();

        if self.match_char('.') {
            fraction = self.scan_decimal_digits();
        }
        if integer.is_empty() && fraction.is_empty() {
            return Err(self.error_at_token_start(INVALID_NUMERIC_LITERAL));
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            flags |= TokenFlags::SCIENTIFIC;
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.advance();
                exponent.push(sign);
            }
            let digits = self.scan_decimal_digits();
            if digits.is_empty() {
                return Err(self.error_at_token_start(INVALID_NUMERIC_LITERAL));
            }
            exponent.push_str(&digits);
        }

        self.check_number_end()?;

        let normalized = format!(
            "{}.{}e{}",
            if integer.is_empty() { "0" } else { &integer },
            if fraction.is_empty() { "0" } else { &fraction },
            if exponent.is_empty() { "0" } else { &exponent },
        );
        let value: f64 = normalized
            .parse()
            .map_err(|_| self.error_at_token_start(INVALID_NUMERIC_LITERAL))?;

        Ok(self.make_token(
            TokenKind::NumericLiteral,
            Some(TokenValue::Number(value)),
            flags,
        ))
    }

    fn scan_radix_number(&mut self, radix: u32, flag: TokenFlags) -> ParseResult<Token> {
        // Prefix
        self.advance();
        self.advance();

        let mut value = 0f64;
        let mut digits = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(radix)) {
            self.advance();
            value = value * radix as f64 + d as f64;
            digits += 1;
        }
        if digits == 0 || self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.error_at_token_start(INVALID_NUMERIC_LITERAL));
        }
        self.check_number_end()?;

        Ok(self.make_token(
            TokenKind::NumericLiteral,
            Some(TokenValue::Number(value)),
            flag,
        ))
    }

    fn scan_decimal_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(self.advance());
        }
        digits
    }

    fn check_number_end(&self) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c == '\\' || is_id_start(c) => {
                Err(ParseError::lexical(IDENTIFIER_AFTER_NUMBER, self.current_position()))
            }
            _ => Ok(()),
        }
    }

    fn scan_identifier(&mut self) -> ParseResult<Token> {
        let mut name = String::new();
        let mut flags = TokenFlags::empty();

        loop {
            match self.peek() {
                Some('\\') => {
                    let escape_pos = self.current_position();
                    self.advance();
                    if !self.match_char('u') {
                        return Err(ParseError::lexical(INVALID_UNICODE_ESCAPE, escape_pos));
                    }
                    let code_point = self.scan_unicode_escape(&mut flags, escape_pos)?;
                    let valid = char::from_u32(code_point).filter(|&c| {
                        if name.is_empty() {
                            is_id_start(c)
                        } else {
                            is_id_continue(c)
                        }
                    });
                    match valid {
                        Some(c) => name.push(c),
                        None => {
                            return Err(ParseError::lexical(
                                INVALID_OR_UNEXPECTED_TOKEN,
                                escape_pos,
                            ))
                        }
                    }
                }
                Some(c) if name.is_empty() && is_id_start(c) => name.push(self.advance()),
                Some(c) if !name.is_empty() && is_id_continue(c) => name.push(self.advance()),
                _ => break,
            }
        }

        let kind = match keyword_from_str(&name) {
            Some(_) if flags.contains(TokenFlags::UNICODE_ESCAPE) => {
                return Err(self.error_at_token_start(ESCAPED_KEYWORD));
            }
            Some(keyword) => keyword,
            None => TokenKind::Identifier,
        };

        Ok(self.make_token(kind, Some(TokenValue::String(name)), flags))
    }

    /// Returns true if at least one line terminator was skipped.
    fn skip_whitespace_and_comments(&mut self) -> ParseResult<bool> {
        let mut line_break = false;

        while let Some(c) = self.peek() {
            match c {
                '\n' | '\u{2028}' | '\u{2029}' => {
                    self.advance();
                    self.newline();
                    line_break = true;
                }
                '\r' => {
                    // CRLF is a single line terminator
                    self.advance();
                    self.match_char('\n');
                    self.newline();
                    line_break = true;
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if is_line_terminator(c) {
                            break;
                        }
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    if self.skip_block_comment()? {
                        line_break = true;
                    }
                }
                c if is_whitespace(c) => {
                    self.advance();
                }
                _ => break,
            }
        }

        Ok(line_break)
    }

    /// Returns true if the comment spans a line terminator.
    fn skip_block_comment(&mut self) -> ParseResult<bool> {
        let start = self.current_position();
        let mut line_break = false;
        self.advance(); // /
        self.advance(); // *

        loop {
            match self.peek() {
                None => return Err(ParseError::lexical(UNTERMINATED_COMMENT, start)),
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(line_break);
                }
                Some('\r') => {
                    self.advance();
                    self.match_char('\n');
                    self.newline();
                    line_break = true;
                }
                Some(c) if is_line_terminator(c) => {
                    self.advance();
                    self.newline();
                    line_break = true;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn make_token(&self, kind: TokenKind, value: Option<TokenValue>, flags: TokenFlags) -> Token {
        Token {
            kind,
            value,
            loc: SourceSpan::new(self.token_start_position(), self.current_position()),
            flags,
            start: self.token_start,
            end: self.position,
        }
    }

    fn mark_token_start(&mut self) {
        self.token_start = self.position;
        self.token_line = self.line;
        self.token_column = self.column;
    }

    fn error_at_token_start(&self, message: &str) -> ParseError {
        ParseError::lexical(message, self.token_start_position())
    }

    fn token_start_position(&self) -> Position {
        Position::new(self.token_line, self.token_column)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    /// Callers must check `peek()` first.
    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        self.column += 1;
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// Collect every token of `source` up to and including the end-of-file
/// token. Without a parser to ask for regular expressions, `/` is
/// always an operator here.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | '\u{FEFF}' |
        // Space_Separator
        '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_id_continue(c: char) -> bool {
    c == '$' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

fn push_code_point(value: &mut String, code_point: u32) {
    value.push(char::from_u32(code_point).unwrap_or('\u{FFFD}'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ErrorKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> Token {
        Lexer::new(source).next_token().unwrap()
    }

    fn string_value(source: &str) -> String {
        match single(source).value {
            Some(TokenValue::String(s)) => s,
            other => panic!("expected string value, got {:?}", other),
        }
    }

    fn number_value(source: &str) -> f64 {
        match single(source).value {
            Some(TokenValue::Number(n)) => n,
            other => panic!("expected number value, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::EndOfFile]);
        assert_eq!(kinds("  // only a comment"), vec![TokenKind::EndOfFile]);
    }

    #[test]
    fn test_lexer_longest_match() {
        assert_eq!(
            kinds(">>>= >>> >>= >> >= >"),
            vec![
                TokenKind::LogicalShiftRightAssign,
                TokenKind::LogicalShiftRight,
                TokenKind::ShiftRightAssign,
                TokenKind::ShiftRight,
                TokenKind::GreaterThanOrEqual,
                TokenKind::GreaterThan,
                TokenKind::EndOfFile,
            ]
        );
        assert_eq!(
            kinds("**= ** *= !== === => ..."),
            vec![
                TokenKind::ExponentiateAssign,
                TokenKind::Exponentiate,
                TokenKind::MultiplyAssign,
                TokenKind::StrictNotEqual,
                TokenKind::StrictEqual,
                TokenKind::Arrow,
                TokenKind::Ellipsis,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_lexer_keywords_and_identifiers() {
        let tokens = tokenize("var x instanceof get").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].name(), Some("x"));
        assert_eq!(tokens[2].kind, TokenKind::Instanceof);
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_lexer_unicode_identifiers() {
        let token = single("caf\u{e9}_$1");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.name(), Some("caf\u{e9}_$1"));

        let token = single("\\u0061bc");
        assert_eq!(token.name(), Some("abc"));
        assert!(token.flags.contains(TokenFlags::UNICODE_ESCAPE));
    }

    #[test]
    fn test_lexer_escaped_keyword_is_error() {
        let err = Lexer::new("v\\u0061r").next_token().unwrap_err();
        assert_eq!(err.message, ESCAPED_KEYWORD);
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    #[test]
    fn test_lexer_line_break_flag() {
        let tokens = tokenize("a\nb /* x */ c /*\n*/ d\r\ne").unwrap();
        assert!(!tokens[0].has_preceding_line_break());
        assert!(tokens[1].has_preceding_line_break());
        assert!(!tokens[2].has_preceding_line_break());
        assert!(tokens[3].has_preceding_line_break());
        assert!(tokens[4].has_preceding_line_break());
        assert_eq!(tokens[4].loc.start, Position::new(4, 0));
    }

    #[test]
    fn test_lexer_token_locations() {
        let tokens = tokenize("foo = 12").unwrap();
        assert_eq!(tokens[0].loc.start, Position::new(1, 0));
        assert_eq!(tokens[0].loc.end, Position::new(1, 3));
        assert_eq!(tokens[2].loc.start, Position::new(1, 6));
        assert_eq!(tokens[2].loc.end, Position::new(1, 8));
    }

    #[test]
    fn test_lexer_unterminated_comment() {
        let err = tokenize("a /* never closed").unwrap_err();
        assert_eq!(err.message, UNTERMINATED_COMMENT);
        assert_eq!(err.position, Position::new(1, 2));
    }

    #[test]
    fn test_lexer_decimal_numbers() {
        assert_eq!(number_value("42"), 42.0);
        assert_eq!(number_value("3.25"), 3.25);
        assert_eq!(number_value("1."), 1.0);
        assert_eq!(number_value(".102e5"), 10200.0);
        assert_eq!(number_value("2E-2"), 0.02);
        assert!(single("1e3").flags.contains(TokenFlags::SCIENTIFIC));
    }

    #[test]
    fn test_lexer_radix_numbers() {
        assert_eq!(number_value("0o013"), 11.0);
        assert_eq!(number_value("0xFF"), 255.0);
        assert_eq!(number_value("0b101"), 5.0);
        assert!(single("0x1").flags.contains(TokenFlags::HEX_SPECIFIER));
        assert!(single("0B1").flags.contains(TokenFlags::BINARY_SPECIFIER));
    }

    #[test]
    fn test_lexer_malformed_numbers() {
        for source in ["0x", "0b2", "1e", "1e+", "0o"] {
            let err = Lexer::new(source).next_token().unwrap_err();
            assert_eq!(err.message, INVALID_NUMERIC_LITERAL, "{}", source);
        }
        let err = Lexer::new("3in").next_token().unwrap_err();
        assert_eq!(err.message, IDENTIFIER_AFTER_NUMBER);
    }

    #[test]
    fn test_lexer_string_escapes() {
        assert_eq!(string_value(r"'Tom\'s a boy'"), "Tom's a boy");
        assert_eq!(string_value(r#""a\tb\nc""#), "a\tb\nc");
        assert_eq!(string_value(r"'\x41B\u{43}'"), "ABC");
        assert_eq!(string_value(r"'\q'"), "q");
        assert_eq!(string_value("'a\\\r\nb'"), "ab");
        assert_eq!(string_value(r"'\uD83D\uDE00'"), "\u{1F600}");
        assert_eq!(string_value(r"'\uD83D!'"), "\u{FFFD}!");
    }

    #[test]
    fn test_lexer_octal_escapes() {
        let token = single(r"'\101\0'");
        assert_eq!(token.name(), Some("A\0"));
        assert!(token.flags.contains(TokenFlags::OCTAL));

        let token = single(r"'\0'");
        assert_eq!(token.name(), Some("\0"));
        assert!(!token.flags.contains(TokenFlags::OCTAL));

        // Four-to-seven takes at most one more digit.
        assert_eq!(string_value(r"'\477'"), "\u{27}7");
    }

    #[test]
    fn test_lexer_string_errors() {
        let err = Lexer::new("'abc").next_token().unwrap_err();
        assert_eq!(err.message, UNTERMINATED_STRING);
        let err = Lexer::new("'ab\ncd'").next_token().unwrap_err();
        assert_eq!(err.message, UNTERMINATED_STRING);
        let err = Lexer::new(r"'\x4'").next_token().unwrap_err();
        assert_eq!(err.message, INVALID_HEX_ESCAPE);
        let err = Lexer::new(r"'\u{110000}'").next_token().unwrap_err();
        assert_eq!(err.message, UNDEFINED_CODE_POINT);
        let err = Lexer::new(r"'\u12'").next_token().unwrap_err();
        assert_eq!(err.message, INVALID_UNICODE_ESCAPE);
    }

    #[test]
    fn test_lexer_line_continuation_advances_line() {
        let tokens = tokenize("'a\\\nb' x").unwrap();
        assert_eq!(tokens[0].loc.end.line, 2);
        assert_eq!(tokens[1].loc.start, Position::new(2, 3));
    }

    #[test]
    fn test_lexer_rescan_regex() {
        let mut lexer = Lexer::new("/a[/]b\\//gi;");
        let slash = lexer.next_token().unwrap();
        assert_eq!(slash.kind, TokenKind::Divide);

        let regex = lexer.rescan_as_regex(&slash).unwrap();
        assert_eq!(regex.kind, TokenKind::RegularExpressionLiteral);
        assert_eq!(
            regex.value,
            Some(TokenValue::Regex {
                pattern: "a[/]b\\/".to_string(),
                flags: "gi".to_string(),
            })
        );
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_lexer_rescan_divide_assign_keeps_equals() {
        let mut lexer = Lexer::new("/=x/");
        let slash = lexer.next_token().unwrap();
        assert_eq!(slash.kind, TokenKind::DivideAssign);

        let regex = lexer.rescan_as_regex(&slash).unwrap();
        assert_eq!(
            regex.value,
            Some(TokenValue::Regex {
                pattern: "=x".to_string(),
                flags: String::new(),
            })
        );
    }

    #[test]
    fn test_lexer_regex_errors() {
        let mut lexer = Lexer::new("/abc\n/");
        let slash = lexer.next_token().unwrap();
        let err = lexer.rescan_as_regex(&slash).unwrap_err();
        assert_eq!(err.message, UNTERMINATED_REGEXP);

        let mut lexer = Lexer::new("/abc/gg");
        let slash = lexer.next_token().unwrap();
        let err = lexer.rescan_as_regex(&slash).unwrap_err();
        assert_eq!(err.message, INVALID_REGEXP_FLAGS);

        let mut lexer = Lexer::new("/(/");
        let slash = lexer.next_token().unwrap();
        let err = lexer.rescan_as_regex(&slash).unwrap_err();
        assert!(err.message.starts_with("Invalid regular expression: /(/"));
    }

    #[test]
    fn test_lexer_hashbang() {
        let mut lexer = Lexer::new("#!/usr/bin/env node\nx");
        lexer.skip_hashbang();
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert!(token.has_preceding_line_break());
    }

    #[test]
    fn test_lexer_unexpected_character() {
        let err = tokenize("a @ b").unwrap_err();
        assert_eq!(err.message, INVALID_OR_UNEXPECTED_TOKEN);
        assert_eq!(err.position, Position::new(1, 2));
    }
}
