//! Recursive descent parser for ECMAScript
//!
//! [`Parser`] owns the lexer and the single token of lookahead. The
//! grammar itself lives in `impl Parser` blocks in the `expression`,
//! `statement` and `declaration` modules; every one of them reaches tokens
//! through the cursor methods defined here.

use core_types::{ParseError, ParseResult, Position, SourceSpan};
use log::debug;

use crate::ast::{Identifier, Program, SourceType};
use crate::context::{LabelSet, ParseContext};
use crate::error::{
    unexpected_token, STRICT_EVAL_ARGUMENTS, STRICT_RESERVED_WORD,
};
use crate::lexer::Lexer;
use crate::options::ParserOptions;
use crate::token::{is_strict_mode_reserved_word, Token, TokenFlags, TokenKind};

/// ECMAScript parser
pub struct Parser {
    lexer: Lexer,
    current: Token,
    /// End of the most recently consumed token
    previous_end: Position,
    context: ParseContext,
    labels: LabelSet,
    options: ParserOptions,
}

impl Parser {
    /// Create a new parser for the given source code
    pub fn new(source: &str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    /// Create a parser with explicit options
    pub fn with_options(source: &str, options: ParserOptions) -> Self {
        let mut context = ParseContext::empty();
        if options.strict {
            context |= ParseContext::STRICT_MODE;
        }
        Self {
            lexer: Lexer::new(source),
            current: Token {
                kind: TokenKind::EndOfFile,
                value: None,
                loc: SourceSpan::default(),
                flags: TokenFlags::empty(),
                start: 0,
                end: 0,
            },
            previous_end: Position::default(),
            context,
            labels: LabelSet::new(),
            options,
        }
    }

    /// Parse the source as a script
    pub fn parse(&mut self) -> ParseResult<Program> {
        debug!("parsing {} chars", self.lexer.source_len());

        if self.options.allow_hashbang {
            self.lexer.skip_hashbang();
        }
        self.current = self.lexer.next_token()?;

        let mut body = self.parse_directive_prologue()?;
        while !self.check(TokenKind::EndOfFile) {
            body.push(self.parse_statement_list_item()?);
        }

        debug!("parsed {} top-level statements", body.len());
        Ok(Program {
            body,
            source_type: SourceType::Script,
            loc: SourceSpan::new(Position::default(), self.current.loc.end),
        })
    }

    /// The lookahead token
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Active context flags
    pub fn context(&self) -> ParseContext {
        self.context
    }

    /// Labels enclosing the current statement, outermost first
    pub fn active_labels(&self) -> &[String] {
        self.labels.as_slice()
    }

    /// Consume the current token and fetch the next one
    pub(crate) fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        self.previous_end = self.current.loc.end;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Replace a current `/` or `/=` with the regular expression literal it
    /// starts. Only valid in primary-expression position.
    pub(crate) fn rescan_regex(&mut self) -> ParseResult<()> {
        self.current = self.lexer.rescan_as_regex(&self.current)?;
        Ok(())
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token if it has the given kind
    pub(crate) fn eat(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of the given kind or fail on the current token
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(unexpected_token(&self.current))
        }
    }

    /// Automatic semicolon insertion.
    ///
    /// Accepts an explicit `;`, or nothing when the current token follows a
    /// line break, is `}`, or is the end of input.
    pub(crate) fn consume_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::Semicolon)? {
            return Ok(());
        }
        if self.current.has_preceding_line_break()
            || matches!(
                self.current.kind,
                TokenKind::RightBrace | TokenKind::EndOfFile
            )
        {
            return Ok(());
        }
        Err(unexpected_token(&self.current))
    }

    /// Start position of the current token, used as a node start
    pub(crate) fn start_position(&self) -> Position {
        self.current.loc.start
    }

    /// Span from `start` to the end of the last consumed token
    pub(crate) fn finish(&self, start: Position) -> SourceSpan {
        SourceSpan::new(start, self.previous_end)
    }

    /// Exact source text of a token
    pub(crate) fn token_text(&self, token: &Token) -> String {
        self.lexer.source_text(token.start, token.end)
    }

    pub(crate) fn has_context(&self, flags: ParseContext) -> bool {
        self.context.intersects(flags)
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.context.contains(ParseContext::STRICT_MODE)
    }

    pub(crate) fn set_strict(&mut self) {
        if !self.is_strict() {
            debug!("strict mode enabled by directive");
            self.context |= ParseContext::STRICT_MODE;
        }
    }

    pub(crate) fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Run `f` with `flags` added to the context.
    pub(crate) fn with_context<T>(
        &mut self,
        flags: ParseContext,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let context = self.context | flags;
        self.scoped(context, f)
    }

    /// Run `f` with `flags` removed from the context.
    pub(crate) fn without_context<T>(
        &mut self,
        flags: ParseContext,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let context = self.context - flags;
        self.scoped(context, f)
    }

    /// Run `f` as a function body: fresh label set, and only strictness
    /// kept from the enclosing context.
    pub(crate) fn with_function_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved_labels = std::mem::take(&mut self.labels);
        let context = self.context.for_function_body();
        let result = self.scoped(context, f);
        self.labels = saved_labels;
        result
    }

    /// Run `f` with `label` active. The caller has already checked that
    /// the label is not a redeclaration.
    pub(crate) fn with_label<T>(
        &mut self,
        label: String,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.labels.push(label);
        let result = f(self);
        self.labels.pop();
        result
    }

    pub(crate) fn is_label_active(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    fn scoped<T>(
        &mut self,
        context: ParseContext,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        // A "use strict" directive inside `f` must not leak out either.
        self.context = saved;
        result
    }

    /// Identifier in expression position
    pub(crate) fn parse_identifier_reference(&mut self) -> ParseResult<Identifier> {
        if !self.check(TokenKind::Identifier) {
            return Err(unexpected_token(&self.current));
        }
        let token = self.advance()?;
        let name = token.name().unwrap_or_default().to_string();
        if self.is_strict() && is_strict_mode_reserved_word(&name) {
            return Err(ParseError::contextual(STRICT_RESERVED_WORD, token.loc.start));
        }
        Ok(Identifier {
            name,
            loc: token.loc,
        })
    }

    /// Identifier that introduces a binding: declared variable, parameter,
    /// function name or catch parameter
    pub(crate) fn parse_binding_identifier(&mut self) -> ParseResult<Identifier> {
        let id = self.parse_identifier_reference()?;
        if self.is_strict() && matches!(id.name.as_str(), "eval" | "arguments") {
            return Err(ParseError::contextual(STRICT_EVAL_ARGUMENTS, id.loc.start));
        }
        Ok(id)
    }

    /// Identifier or reserved word, as allowed after `.` and as a
    /// property key
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Identifier> {
        if !self.current.is_identifier_name() {
            return Err(unexpected_token(&self.current));
        }
        let token = self.advance()?;
        let name = match token.name() {
            Some(name) => name.to_string(),
            None => token.kind.as_str().to_string(),
        };
        Ok(Identifier {
            name,
            loc: token.loc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    #[test]
    fn test_parse_empty_program() {
        let mut parser = Parser::new("");
        let program = parser.parse().unwrap();
        assert!(program.body.is_empty());
        assert_eq!(program.source_type, SourceType::Script);
    }

    #[test]
    fn test_parse_program_span_covers_source() {
        let mut parser = Parser::new("a;\nb;\n");
        let program = parser.parse().unwrap();
        assert_eq!(program.loc.start, Position::new(1, 0));
        assert_eq!(program.loc.end, Position::new(3, 0));
        for statement in &program.body {
            assert!(program.loc.contains(&statement.loc()));
        }
    }

    #[test]
    fn test_context_restored_after_error() {
        let mut parser = Parser::new("x");
        parser.current = parser.lexer.next_token().unwrap();

        let result: ParseResult<()> = parser.with_context(ParseContext::IN_ITERATION, |p| {
            assert!(p.has_context(ParseContext::IN_ITERATION));
            Err(unexpected_token(p.current()))
        });
        assert!(result.is_err());
        assert_eq!(parser.context(), ParseContext::empty());
    }

    #[test]
    fn test_function_scope_hides_labels() {
        let mut parser = Parser::new("");
        parser
            .with_label("outer".to_string(), |p| {
                assert_eq!(p.active_labels(), ["outer"]);
                p.with_function_scope(|p| {
                    assert!(p.active_labels().is_empty());
                    assert!(p.has_context(ParseContext::IN_FUNCTION));
                    Ok(())
                })?;
                assert!(p.is_label_active("outer"));
                Ok(())
            })
            .unwrap();
        assert!(parser.active_labels().is_empty());
    }

    #[test]
    fn test_strict_option_sets_context() {
        let parser = Parser::with_options("", ParserOptions::default().with_strict(true));
        assert!(parser.is_strict());
    }

    #[test]
    fn test_semicolon_insertion_before_brace() {
        let mut parser = Parser::new("{ a }");
        let program = parser.parse().unwrap();
        assert!(matches!(program.body[0], Statement::BlockStatement { .. }));
    }

    #[test]
    fn test_missing_semicolon_on_same_line() {
        let mut parser = Parser::new("a b");
        let err = parser.parse().unwrap_err();
        assert_eq!(err.message, "Unexpected identifier 'b'");
        assert_eq!(err.position, Position::new(1, 2));
    }
}
