//! Statement grammar

use core_types::{ParseError, ParseResult};

use crate::ast::{
    Block, CatchClause, Expression, ForInLeft, ForInit, Identifier, LiteralValue, Statement,
    SwitchCase,
};
use crate::context::ParseContext;
use crate::error::{
    label_redeclaration, undefined_label, unexpected_token, FOR_IN_MULTIPLE_BINDINGS,
    ILLEGAL_BREAK, ILLEGAL_CONTINUE, ILLEGAL_RETURN, INVALID_FOR_IN_TARGET,
    MISSING_CATCH_OR_FINALLY, MULTIPLE_DEFAULTS, NEWLINE_AFTER_THROW, STRICT_WITH,
};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser {
    /// Function declarations are only allowed where a statement list item is
    pub(crate) fn parse_statement_list_item(&mut self) -> ParseResult<Statement> {
        if self.check(TokenKind::Function) {
            self.parse_function_declaration()
        } else {
            self.parse_statement()
        }
    }

    /// Statements up to a closing `}`, a switch clause, or the end of input
    pub(crate) fn parse_statement_list(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while !matches!(
            self.current().kind,
            TokenKind::RightBrace | TokenKind::EndOfFile | TokenKind::Case | TokenKind::Default
        ) {
            statements.push(self.parse_statement_list_item()?);
        }
        Ok(statements)
    }

    /// Leading string-literal statements of a script or function body.
    /// `"use strict"` switches on strict mode for the rest of the body.
    pub(crate) fn parse_directive_prologue(&mut self) -> ParseResult<Vec<Statement>> {
        let mut directives = Vec::new();

        while self.check(TokenKind::StringLiteral) {
            let token = self.current().clone();
            let statement = self.parse_statement()?;

            match statement {
                Statement::ExpressionStatement {
                    expression,
                    directive: None,
                    loc,
                } if matches!(
                    &expression,
                    Expression::Literal { value: LiteralValue::String(_), loc: literal_loc, .. }
                        if *literal_loc == token.loc
                ) =>
                {
                    let raw = self.token_text(&token);
                    let text = raw[1..raw.len() - 1].to_string();
                    if text == "use strict" {
                        self.set_strict();
                    }
                    directives.push(Statement::ExpressionStatement {
                        expression,
                        directive: Some(text),
                        loc,
                    });
                }
                other => {
                    directives.push(other);
                    break;
                }
            }
        }

        Ok(directives)
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current().kind {
            TokenKind::LeftBrace => self.parse_block_statement(),
            TokenKind::Var => self.parse_variable_statement(),
            TokenKind::Semicolon => {
                let token = self.advance()?;
                Ok(Statement::EmptyStatement { loc: token.loc })
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::With => self.parse_with_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Debugger => {
                let start = self.start_position();
                self.advance()?;
                self.consume_semicolon()?;
                Ok(Statement::DebuggerStatement {
                    loc: self.finish(start),
                })
            }
            _ => self.parse_labeled_or_expression_statement(),
        }
    }

    fn parse_block_statement(&mut self) -> ParseResult<Statement> {
        let block = self.parse_block()?;
        Ok(Statement::BlockStatement {
            body: block.body,
            loc: block.loc,
        })
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.start_position();
        self.expect(TokenKind::LeftBrace)?;
        let body = self.parse_statement_list()?;
        self.expect(TokenKind::RightBrace)?;
        Ok(Block {
            body,
            loc: self.finish(start),
        })
    }

    fn parse_variable_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        let declaration = self.parse_variable_declaration()?;
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration {
            declarations: declaration.declarations,
            kind: declaration.kind,
            loc: self.finish(start),
        })
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::If)?;
        let test = self.parse_condition()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat(TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::IfStatement {
            test,
            consequent: Box::new(consequent),
            alternate,
            loc: self.finish(start),
        })
    }

    /// `( expression )` after `if`, `while`, `with` and `switch`
    fn parse_condition(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RightParen)?;
        Ok(test)
    }

    fn parse_loop_body(&mut self) -> ParseResult<Statement> {
        self.with_context(ParseContext::IN_ITERATION, |p| p.parse_statement())
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::While)?;
        let test = self.parse_condition()?;
        let body = self.parse_loop_body()?;

        Ok(Statement::WhileStatement {
            test,
            body: Box::new(body),
            loc: self.finish(start),
        })
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Do)?;
        let body = self.parse_loop_body()?;
        self.expect(TokenKind::While)?;
        let test = self.parse_condition()?;
        // The semicolon after `do ... while (...)` is always optional.
        self.eat(TokenKind::Semicolon)?;

        Ok(Statement::DoWhileStatement {
            body: Box::new(body),
            test,
            loc: self.finish(start),
        })
    }

    fn parse_for_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LeftParen)?;

        let init = match self.current().kind {
            TokenKind::Semicolon => None,
            TokenKind::Var => Some(ForInit::VariableDeclaration(self.with_context(
                ParseContext::DISALLOW_IN,
                |p| p.parse_variable_declaration(),
            )?)),
            _ => Some(ForInit::Expression(
                self.with_context(ParseContext::DISALLOW_IN, |p| p.parse_expression())?,
            )),
        };

        if self.check(TokenKind::In) {
            let left = match init {
                Some(init) => self.for_in_left(init)?,
                None => return Err(unexpected_token(self.current())),
            };
            self.advance()?;
            let right = self.parse_expression()?;
            self.expect(TokenKind::RightParen)?;
            let body = self.parse_loop_body()?;
            return Ok(Statement::ForInStatement {
                left,
                right,
                body: Box::new(body),
                loc: self.finish(start),
            });
        }

        self.expect(TokenKind::Semicolon)?;
        let test = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RightParen)?;
        let body = self.parse_loop_body()?;

        Ok(Statement::ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
            loc: self.finish(start),
        })
    }

    /// Validate the head of a for-in loop
    fn for_in_left(&self, init: ForInit) -> ParseResult<ForInLeft> {
        match init {
            ForInit::VariableDeclaration(declaration) => {
                if declaration.declarations.len() != 1 {
                    return Err(ParseError::contextual(
                        FOR_IN_MULTIPLE_BINDINGS,
                        declaration.loc.start,
                    ));
                }
                Ok(ForInLeft::VariableDeclaration(declaration))
            }
            ForInit::Expression(expr) => {
                if !expr.is_reference() {
                    return Err(ParseError::contextual(
                        INVALID_FOR_IN_TARGET,
                        expr.loc().start,
                    ));
                }
                self.check_strict_target(&expr)?;
                Ok(ForInLeft::Expression(expr))
            }
        }
    }

    fn parse_continue_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Continue)?;
        if !self.has_context(ParseContext::IN_ITERATION) {
            return Err(ParseError::contextual(ILLEGAL_CONTINUE, start));
        }
        let label = self.parse_jump_label()?;
        self.consume_semicolon()?;

        Ok(Statement::ContinueStatement {
            label,
            loc: self.finish(start),
        })
    }

    fn parse_break_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Break)?;
        if !self.has_context(ParseContext::IN_ITERATION | ParseContext::IN_SWITCH) {
            return Err(ParseError::contextual(ILLEGAL_BREAK, start));
        }
        let label = self.parse_jump_label()?;
        self.consume_semicolon()?;

        Ok(Statement::BreakStatement {
            label,
            loc: self.finish(start),
        })
    }

    /// Optional label after `break`/`continue`, on the same line
    fn parse_jump_label(&mut self) -> ParseResult<Option<Identifier>> {
        if !self.check(TokenKind::Identifier) || self.current().has_preceding_line_break() {
            return Ok(None);
        }
        let label = self.parse_identifier_reference()?;
        if !self.is_label_active(&label.name) {
            return Err(undefined_label(&label.name, label.loc.start));
        }
        Ok(Some(label))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        if !self.has_context(ParseContext::IN_FUNCTION)
            && !self.options().allow_return_outside_function
        {
            return Err(ParseError::contextual(ILLEGAL_RETURN, start));
        }
        self.expect(TokenKind::Return)?;

        let argument = if self.current().has_preceding_line_break()
            || matches!(
                self.current().kind,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::EndOfFile
            ) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;

        Ok(Statement::ReturnStatement {
            argument,
            loc: self.finish(start),
        })
    }

    fn parse_with_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        if self.is_strict() {
            return Err(ParseError::contextual(STRICT_WITH, start));
        }
        self.expect(TokenKind::With)?;
        let object = self.parse_condition()?;
        let body = self.parse_statement()?;

        Ok(Statement::WithStatement {
            object,
            body: Box::new(body),
            loc: self.finish(start),
        })
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Switch)?;
        let discriminant = self.parse_condition()?;
        self.expect(TokenKind::LeftBrace)?;

        let cases = self.with_context(ParseContext::IN_SWITCH, |p| {
            let mut cases = Vec::new();
            let mut seen_default = false;

            while !p.check(TokenKind::RightBrace) {
                let case_start = p.start_position();
                let test = match p.current().kind {
                    TokenKind::Case => {
                        p.advance()?;
                        Some(p.parse_expression()?)
                    }
                    TokenKind::Default => {
                        if seen_default {
                            return Err(ParseError::syntactic(MULTIPLE_DEFAULTS, case_start));
                        }
                        seen_default = true;
                        p.advance()?;
                        None
                    }
                    _ => return Err(unexpected_token(p.current())),
                };
                p.expect(TokenKind::Colon)?;
                let consequent = p.parse_statement_list()?;
                cases.push(SwitchCase {
                    test,
                    consequent,
                    loc: p.finish(case_start),
                });
            }
            Ok(cases)
        })?;
        self.expect(TokenKind::RightBrace)?;

        Ok(Statement::SwitchStatement {
            discriminant,
            cases,
            loc: self.finish(start),
        })
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Throw)?;
        if self.current().has_preceding_line_break() {
            return Err(ParseError::contextual(
                NEWLINE_AFTER_THROW,
                self.current().loc.start,
            ));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;

        Ok(Statement::ThrowStatement {
            argument,
            loc: self.finish(start),
        })
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Try)?;
        let block = self.parse_block()?;

        let handler = if self.check(TokenKind::Catch) {
            let catch_start = self.start_position();
            self.advance()?;
            self.expect(TokenKind::LeftParen)?;
            let param = self.parse_binding_identifier()?;
            self.expect(TokenKind::RightParen)?;
            let body = self.parse_block()?;
            Some(CatchClause {
                param,
                body,
                loc: self.finish(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.eat(TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(ParseError::syntactic(
                MISSING_CATCH_OR_FINALLY,
                self.current().loc.start,
            ));
        }

        Ok(Statement::TryStatement {
            block,
            handler,
            finalizer,
            loc: self.finish(start),
        })
    }

    /// A bare identifier followed by `:` labels the next statement; anything
    /// else is an expression statement.
    fn parse_labeled_or_expression_statement(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        // `(a)` also parses to a bare identifier node
        let starts_with_identifier = self.check(TokenKind::Identifier);
        let expression = self.parse_expression()?;

        if starts_with_identifier && self.check(TokenKind::Colon) {
            if let Expression::Identifier { name, loc } = &expression {
                if self.is_label_active(name) {
                    return Err(label_redeclaration(name, loc.start));
                }
                let label = Identifier {
                    name: name.clone(),
                    loc: *loc,
                };
                self.advance()?;
                let body = self.with_label(label.name.clone(), |p| p.parse_statement())?;
                return Ok(Statement::LabeledStatement {
                    label,
                    body: Box::new(body),
                    loc: self.finish(start),
                });
            }
        }

        self.consume_semicolon()?;
        Ok(Statement::ExpressionStatement {
            expression,
            directive: None,
            loc: self.finish(start),
        })
    }
}
