//! Expression grammar

use core_types::{ParseError, ParseResult, Position};

use crate::ast::{
    AssignmentOperator, BinaryOperator, Expression, LiteralValue, LogicalOperator, Property,
    PropertyKey, PropertyKind, RegExpLiteral, UnaryOperator, UpdateOperator,
};
use crate::context::ParseContext;
use crate::error::{
    unexpected_token, BAD_GETTER_ARITY, BAD_SETTER_ARITY, INVALID_ASSIGNMENT_TARGET,
    INVALID_POSTFIX_TARGET, INVALID_PREFIX_TARGET, STRICT_DELETE, STRICT_EVAL_ARGUMENTS,
    STRICT_OCTAL_ESCAPE,
};
use crate::parser::Parser;
use crate::token::{TokenFlags, TokenKind, TokenValue};

impl Parser {
    /// Expression, possibly a comma-separated sequence
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        let first = self.parse_assignment_expression()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat(TokenKind::Comma)? {
            expressions.push(self.parse_assignment_expression()?);
        }
        Ok(Expression::SequenceExpression {
            expressions,
            loc: self.finish(start),
        })
    }

    /// Assignment, conditional, or anything tighter
    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        let expr = self.parse_binary_expression()?;

        if self.current().kind.is_assignment_operator() {
            let operator = assignment_operator(self.current().kind)
                .ok_or_else(|| unexpected_token(self.current()))?;
            if !expr.is_reference() {
                return Err(ParseError::syntactic(
                    INVALID_ASSIGNMENT_TARGET,
                    expr.loc().start,
                ));
            }
            self.check_strict_target(&expr)?;
            self.advance()?;
            let right = self.parse_assignment_expression()?;
            return Ok(Expression::AssignmentExpression {
                operator,
                left: Box::new(expr),
                right: Box::new(right),
                loc: self.finish(start),
            });
        }

        if self.eat(TokenKind::QuestionMark)? {
            let consequent = self.without_context(ParseContext::DISALLOW_IN, |p| {
                p.parse_assignment_expression()
            })?;
            self.expect(TokenKind::Colon)?;
            let alternate = self.parse_assignment_expression()?;
            return Ok(Expression::ConditionalExpression {
                test: Box::new(expr),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
                loc: self.finish(start),
            });
        }

        Ok(expr)
    }

    fn parse_binary_expression(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        let left = self.parse_unary_expression()?;
        self.parse_binary_rest(start, left, 0)
    }

    /// Precedence climbing. Folds operators of tier `min_precedence` or
    /// tighter into `left`.
    fn parse_binary_rest(
        &mut self,
        start: Position,
        mut left: Expression,
        min_precedence: u8,
    ) -> ParseResult<Expression> {
        while let Some(precedence) = self.current_binary_precedence() {
            if precedence < min_precedence {
                break;
            }
            let operator = self.advance()?.kind;

            let right_start = self.start_position();
            let mut right = self.parse_unary_expression()?;
            while let Some(next) = self.current_binary_precedence() {
                let right_assoc = self.current().kind.is_right_associative();
                if next > precedence {
                    right = self.parse_binary_rest(right_start, right, precedence + 1)?;
                } else if next == precedence && right_assoc {
                    right = self.parse_binary_rest(right_start, right, precedence)?;
                } else {
                    break;
                }
            }

            left = self.combine_binary(start, left, operator, right)?;
        }
        Ok(left)
    }

    /// Precedence tier of the current token if it continues a binary
    /// expression here.
    fn current_binary_precedence(&self) -> Option<u8> {
        let kind = self.current().kind;
        if !kind.is_binary_operator()
            || (kind == TokenKind::In && self.has_context(ParseContext::DISALLOW_IN))
        {
            return None;
        }
        kind.precedence()
    }

    fn combine_binary(
        &self,
        start: Position,
        left: Expression,
        operator: TokenKind,
        right: Expression,
    ) -> ParseResult<Expression> {
        let left = Box::new(left);
        let right = Box::new(right);
        let loc = self.finish(start);

        let logical = match operator {
            TokenKind::LogicalAnd => Some(LogicalOperator::And),
            TokenKind::LogicalOr => Some(LogicalOperator::Or),
            _ => None,
        };
        if let Some(operator) = logical {
            return Ok(Expression::LogicalExpression {
                operator,
                left,
                right,
                loc,
            });
        }

        let operator = binary_operator(operator).ok_or_else(|| {
            ParseError::syntactic(format!("Unexpected token {}", operator), loc.start)
        })?;
        Ok(Expression::BinaryExpression {
            operator,
            left,
            right,
            loc,
        })
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        if !self.current().kind.is_unary_operator() {
            return self.parse_update_expression();
        }
        let operator =
            unary_operator(self.current().kind).ok_or_else(|| unexpected_token(self.current()))?;

        let start = self.start_position();
        self.advance()?;
        let argument = self.parse_unary_expression()?;

        if operator == UnaryOperator::Delete
            && self.is_strict()
            && matches!(argument, Expression::Identifier { .. })
        {
            return Err(ParseError::contextual(STRICT_DELETE, start));
        }

        Ok(Expression::UnaryExpression {
            operator,
            prefix: true,
            argument: Box::new(argument),
            loc: self.finish(start),
        })
    }

    fn parse_update_expression(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();

        if self.current().kind.is_update_operator() {
            let operator = update_operator(self.advance()?.kind)
                .ok_or_else(|| unexpected_token(self.current()))?;
            let argument = self.parse_unary_expression()?;
            if !argument.is_reference() {
                return Err(ParseError::syntactic(
                    INVALID_PREFIX_TARGET,
                    argument.loc().start,
                ));
            }
            self.check_strict_target(&argument)?;
            return Ok(Expression::UpdateExpression {
                operator,
                prefix: true,
                argument: Box::new(argument),
                loc: self.finish(start),
            });
        }

        let expr = self.parse_left_hand_side_expression(true)?;

        // A line break before `++`/`--` ends the expression; the operator
        // then starts the next statement.
        if self.current().has_preceding_line_break() || !self.current().kind.is_update_operator() {
            return Ok(expr);
        }
        let operator =
            update_operator(self.current().kind).ok_or_else(|| unexpected_token(self.current()))?;

        if !expr.is_reference() {
            return Err(ParseError::syntactic(
                INVALID_POSTFIX_TARGET,
                expr.loc().start,
            ));
        }
        self.check_strict_target(&expr)?;
        self.advance()?;
        Ok(Expression::UpdateExpression {
            operator,
            prefix: false,
            argument: Box::new(expr),
            loc: self.finish(start),
        })
    }

    /// Member access and call chain. With `allow_call` false the chain
    /// stops at the first `(`, which then belongs to an enclosing `new`.
    fn parse_left_hand_side_expression(&mut self, allow_call: bool) -> ParseResult<Expression> {
        let start = self.start_position();
        let mut expr = if self.check(TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        loop {
            match self.current().kind {
                TokenKind::Period => {
                    self.advance()?;
                    let property = self.parse_identifier_name()?;
                    expr = Expression::MemberExpression {
                        object: Box::new(expr),
                        property: Box::new(property.into()),
                        computed: false,
                        loc: self.finish(start),
                    };
                }
                TokenKind::LeftBracket => {
                    self.advance()?;
                    let property = self
                        .without_context(ParseContext::DISALLOW_IN, |p| p.parse_expression())?;
                    self.expect(TokenKind::RightBracket)?;
                    expr = Expression::MemberExpression {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                        loc: self.finish(start),
                    };
                }
                TokenKind::LeftParen if allow_call => {
                    let arguments = self.parse_arguments()?;
                    expr = Expression::CallExpression {
                        callee: Box::new(expr),
                        arguments,
                        loc: self.finish(start),
                    };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        self.expect(TokenKind::New)?;

        let callee = self.parse_left_hand_side_expression(false)?;
        let arguments = if self.check(TokenKind::LeftParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Expression::NewExpression {
            callee: Box::new(callee),
            arguments,
            loc: self.finish(start),
        })
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        self.expect(TokenKind::LeftParen)?;
        self.without_context(ParseContext::DISALLOW_IN, |p| {
            let mut arguments = Vec::new();
            if !p.check(TokenKind::RightParen) {
                loop {
                    arguments.push(p.parse_assignment_expression()?);
                    if !p.eat(TokenKind::Comma)? {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RightParen)?;
            Ok(arguments)
        })
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        match self.current().kind {
            TokenKind::This => {
                let token = self.advance()?;
                Ok(Expression::ThisExpression { loc: token.loc })
            }
            TokenKind::Identifier => Ok(self.parse_identifier_reference()?.into()),
            TokenKind::NumericLiteral
            | TokenKind::StringLiteral
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_literal(),
            TokenKind::Divide | TokenKind::DivideAssign => {
                self.rescan_regex()?;
                self.parse_literal()
            }
            TokenKind::LeftParen => self.parse_parenthesized_expression(),
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function_expression(),
            TokenKind::New => self.parse_new_expression(),
            _ => Err(unexpected_token(self.current())),
        }
    }

    fn parse_literal(&mut self) -> ParseResult<Expression> {
        let token = self.advance()?;
        let raw = self.token_text(&token);

        if token.kind == TokenKind::StringLiteral
            && self.is_strict()
            && token
                .flags
                .intersects(TokenFlags::OCTAL | TokenFlags::CONTAINS_INVALID_ESCAPE)
        {
            return Err(ParseError::contextual(STRICT_OCTAL_ESCAPE, token.loc.start));
        }

        let mut regex = None;
        let value = match (token.kind, token.value) {
            (TokenKind::True, _) => LiteralValue::Boolean(true),
            (TokenKind::False, _) => LiteralValue::Boolean(false),
            (TokenKind::Null, _) => LiteralValue::Null,
            (_, Some(TokenValue::Number(n))) => LiteralValue::Number(n),
            (TokenKind::StringLiteral, Some(TokenValue::String(s))) => LiteralValue::String(s),
            (_, Some(TokenValue::Regex { pattern, flags })) => {
                regex = Some(RegExpLiteral { pattern, flags });
                LiteralValue::RegExp
            }
            _ => {
                return Err(ParseError::syntactic(
                    format!("Unexpected token {}", raw),
                    token.loc.start,
                ))
            }
        };

        Ok(Expression::Literal {
            value,
            raw,
            regex,
            loc: token.loc,
        })
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult<Expression> {
        self.expect(TokenKind::LeftParen)?;
        let expr = self.without_context(ParseContext::DISALLOW_IN, |p| p.parse_expression())?;
        self.expect(TokenKind::RightParen)?;
        Ok(expr)
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        self.expect(TokenKind::LeftBracket)?;

        let elements = self.without_context(ParseContext::DISALLOW_IN, |p| {
            let mut elements = Vec::new();
            while !p.check(TokenKind::RightBracket) {
                if p.eat(TokenKind::Comma)? {
                    elements.push(None);
                    continue;
                }
                elements.push(Some(p.parse_assignment_expression()?));
                if !p.check(TokenKind::RightBracket) {
                    p.expect(TokenKind::Comma)?;
                }
            }
            Ok(elements)
        })?;

        self.expect(TokenKind::RightBracket)?;
        Ok(Expression::ArrayExpression {
            elements,
            loc: self.finish(start),
        })
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expression> {
        let start = self.start_position();
        self.expect(TokenKind::LeftBrace)?;

        let properties = self.without_context(ParseContext::DISALLOW_IN, |p| {
            let mut properties = Vec::new();
            while !p.check(TokenKind::RightBrace) {
                properties.push(p.parse_property()?);
                if !p.check(TokenKind::RightBrace) {
                    p.expect(TokenKind::Comma)?;
                }
            }
            Ok(properties)
        })?;

        self.expect(TokenKind::RightBrace)?;
        Ok(Expression::ObjectExpression {
            properties,
            loc: self.finish(start),
        })
    }

    fn parse_property(&mut self) -> ParseResult<Property> {
        let start = self.start_position();

        let accessor = match self.current().name() {
            Some("get") if self.check(TokenKind::Identifier) => Some(PropertyKind::Get),
            Some("set") if self.check(TokenKind::Identifier) => Some(PropertyKind::Set),
            _ => None,
        };

        let key = match accessor {
            Some(kind) => {
                let word = self.advance()?;
                if self.is_property_key_start() {
                    let key = self.parse_property_key()?;
                    let value = self.parse_accessor_function(kind)?;
                    return Ok(Property {
                        key,
                        value,
                        kind,
                        method: false,
                        shorthand: false,
                        computed: false,
                        loc: self.finish(start),
                    });
                }
                // `get` / `set` used as a plain key
                PropertyKey::Identifier {
                    name: word.name().unwrap_or_default().to_string(),
                    loc: word.loc,
                }
            }
            None => self.parse_property_key()?,
        };

        self.expect(TokenKind::Colon)?;
        let value = self.parse_assignment_expression()?;
        Ok(Property {
            key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: false,
            computed: false,
            loc: self.finish(start),
        })
    }

    fn is_property_key_start(&self) -> bool {
        let token = self.current();
        token.is_identifier_name()
            || matches!(
                token.kind,
                TokenKind::StringLiteral | TokenKind::NumericLiteral
            )
    }

    fn parse_property_key(&mut self) -> ParseResult<PropertyKey> {
        match self.current().kind {
            TokenKind::StringLiteral | TokenKind::NumericLiteral => {
                match self.parse_literal()? {
                    Expression::Literal { value, raw, loc, .. } => {
                        Ok(PropertyKey::Literal { value, raw, loc })
                    }
                    other => Err(ParseError::syntactic(
                        "Unexpected property key",
                        other.loc().start,
                    )),
                }
            }
            _ => {
                let id = self.parse_identifier_name()?;
                Ok(PropertyKey::Identifier {
                    name: id.name,
                    loc: id.loc,
                })
            }
        }
    }

    /// `(params) { body }` after a `get`/`set` key
    fn parse_accessor_function(&mut self, kind: PropertyKind) -> ParseResult<Expression> {
        let start = self.start_position();
        let params = self.parse_formal_parameters()?;

        match kind {
            PropertyKind::Get if !params.is_empty() => {
                return Err(ParseError::syntactic(BAD_GETTER_ARITY, start));
            }
            PropertyKind::Set if params.len() != 1 => {
                return Err(ParseError::syntactic(BAD_SETTER_ARITY, start));
            }
            _ => {}
        }

        let body = self.parse_function_body()?;
        Ok(Expression::FunctionExpression {
            id: None,
            params,
            body,
            loc: self.finish(start),
        })
    }

    /// Strict code may not assign to `eval` or `arguments`.
    pub(crate) fn check_strict_target(&self, target: &Expression) -> ParseResult<()> {
        match target.identifier_name() {
            Some("eval" | "arguments") if self.is_strict() => Err(ParseError::contextual(
                STRICT_EVAL_ARGUMENTS,
                target.loc().start,
            )),
            _ => Ok(()),
        }
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let operator = match kind {
        TokenKind::BitwiseOr => BinaryOperator::BitwiseOr,
        TokenKind::BitwiseXor => BinaryOperator::BitwiseXor,
        TokenKind::BitwiseAnd => BinaryOperator::BitwiseAnd,
        TokenKind::LooseEqual => BinaryOperator::LooseEqual,
        TokenKind::LooseNotEqual => BinaryOperator::LooseNotEqual,
        TokenKind::StrictEqual => BinaryOperator::StrictEqual,
        TokenKind::StrictNotEqual => BinaryOperator::StrictNotEqual,
        TokenKind::LessThan => BinaryOperator::LessThan,
        TokenKind::GreaterThan => BinaryOperator::GreaterThan,
        TokenKind::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
        TokenKind::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
        TokenKind::Instanceof => BinaryOperator::Instanceof,
        TokenKind::In => BinaryOperator::In,
        TokenKind::ShiftLeft => BinaryOperator::ShiftLeft,
        TokenKind::ShiftRight => BinaryOperator::ShiftRight,
        TokenKind::LogicalShiftRight => BinaryOperator::LogicalShiftRight,
        TokenKind::Add => BinaryOperator::Add,
        TokenKind::Subtract => BinaryOperator::Subtract,
        TokenKind::Multiply => BinaryOperator::Multiply,
        TokenKind::Divide => BinaryOperator::Divide,
        TokenKind::Modulo => BinaryOperator::Modulo,
        TokenKind::Exponentiate => BinaryOperator::Exponentiate,
        _ => return None,
    };
    Some(operator)
}

fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    let operator = match kind {
        TokenKind::Typeof => UnaryOperator::Typeof,
        TokenKind::Void => UnaryOperator::Void,
        TokenKind::Delete => UnaryOperator::Delete,
        TokenKind::Negate => UnaryOperator::Not,
        TokenKind::Complement => UnaryOperator::BitwiseNot,
        TokenKind::Add => UnaryOperator::Plus,
        TokenKind::Subtract => UnaryOperator::Minus,
        _ => return None,
    };
    Some(operator)
}

fn update_operator(kind: TokenKind) -> Option<UpdateOperator> {
    match kind {
        TokenKind::Increment => Some(UpdateOperator::Increment),
        TokenKind::Decrement => Some(UpdateOperator::Decrement),
        _ => None,
    }
}

fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    let operator = match kind {
        TokenKind::Assign => AssignmentOperator::Assign,
        TokenKind::AddAssign => AssignmentOperator::AddAssign,
        TokenKind::SubtractAssign => AssignmentOperator::SubtractAssign,
        TokenKind::MultiplyAssign => AssignmentOperator::MultiplyAssign,
        TokenKind::DivideAssign => AssignmentOperator::DivideAssign,
        TokenKind::ModuloAssign => AssignmentOperator::ModuloAssign,
        TokenKind::ExponentiateAssign => AssignmentOperator::ExponentiateAssign,
        TokenKind::ShiftLeftAssign => AssignmentOperator::ShiftLeftAssign,
        TokenKind::ShiftRightAssign => AssignmentOperator::ShiftRightAssign,
        TokenKind::LogicalShiftRightAssign => AssignmentOperator::LogicalShiftRightAssign,
        TokenKind::BitwiseAndAssign => AssignmentOperator::BitwiseAndAssign,
        TokenKind::BitwiseOrAssign => AssignmentOperator::BitwiseOrAssign,
        TokenKind::BitwiseXorAssign => AssignmentOperator::BitwiseXorAssign,
        _ => return None,
    };
    Some(operator)
}
