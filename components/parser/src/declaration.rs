//! Function and variable declarations

use core_types::ParseResult;

use crate::ast::{
    Block, Expression, Identifier, Statement, VariableDeclaration, VariableDeclarator,
    VariableKind,
};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser {
    /// `function name(params) { body }` in statement-list position
    pub(crate) fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.start_position();
        self.expect(TokenKind::Function)?;
        let id = self.parse_binding_identifier()?;
        let params = self.parse_formal_parameters()?;
        let body = self.parse_function_body()?;

        Ok(Statement::FunctionDeclaration {
            id,
            params,
            body,
            loc: self.finish(start),
        })
    }

    /// `function name?(params) { body }` in expression position
    pub(crate) fn parse_function_expression(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        self.expect(TokenKind::Function)?;
        let id = if self.check(TokenKind::Identifier) {
            Some(self.parse_binding_identifier()?)
        } else {
            None
        };
        let params = self.parse_formal_parameters()?;
        let body = self.parse_function_body()?;

        Ok(Expression::FunctionExpression {
            id,
            params,
            body,
            loc: self.finish(start),
        })
    }

    /// `(a, b, c)`
    pub(crate) fn parse_formal_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        self.expect(TokenKind::LeftParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.parse_binding_identifier()?);
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(params)
    }

    /// `{ directives statements }` with its own label set and context
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<Block> {
        let start = self.start_position();
        self.expect(TokenKind::LeftBrace)?;

        let body = self.with_function_scope(|p| {
            let mut body = p.parse_directive_prologue()?;
            body.extend(p.parse_statement_list()?);
            p.expect(TokenKind::RightBrace)?;
            Ok(body)
        })?;

        Ok(Block {
            body,
            loc: self.finish(start),
        })
    }

    /// `var a = 1, b`, without the terminating semicolon
    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let start = self.start_position();
        self.expect(TokenKind::Var)?;

        let mut declarations = vec![self.parse_variable_declarator()?];
        while self.eat(TokenKind::Comma)? {
            declarations.push(self.parse_variable_declarator()?);
        }

        Ok(VariableDeclaration {
            declarations,
            kind: VariableKind::Var,
            loc: self.finish(start),
        })
    }

    fn parse_variable_declarator(&mut self) -> ParseResult<VariableDeclarator> {
        let start = self.start_position();
        let id = self.parse_binding_identifier()?;
        let init = if self.eat(TokenKind::Assign)? {
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };

        Ok(VariableDeclarator {
            id,
            init,
            loc: self.finish(start),
        })
    }
}
