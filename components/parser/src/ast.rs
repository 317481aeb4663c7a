//! Abstract Syntax Tree node definitions
//!
//! Nodes serialize to ESTree JSON: category enums are internally tagged
//! with `type`, and the few node structs that appear outside those enums
//! carry their own tag.

use core_types::SourceSpan;
use serde::ser::Serializer;
use serde::Serialize;

/// Root of a parsed script
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Statement>,
    /// Always `script`
    pub source_type: SourceType,
    /// Source location
    pub loc: SourceSpan,
}

/// Script/module distinction; only scripts are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Classic script
    Script,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// `;`
    EmptyStatement {
        /// Source location
        loc: SourceSpan,
    },

    /// `{ ... }`
    BlockStatement {
        /// Statements in the block
        body: Vec<Statement>,
        /// Source location
        loc: SourceSpan,
    },

    /// Expression statement, possibly a directive such as `"use strict"`
    ExpressionStatement {
        /// The expression
        expression: Expression,
        /// Raw directive text without quotes, for directive prologue entries
        #[serde(skip_serializing_if = "Option::is_none")]
        directive: Option<String>,
        /// Source location
        loc: SourceSpan,
    },

    /// `var a = 1, b;`
    VariableDeclaration {
        /// Declarators in source order
        declarations: Vec<VariableDeclarator>,
        /// Declaration kind
        kind: VariableKind,
        /// Source location
        loc: SourceSpan,
    },

    /// `function name(params) { body }`
    FunctionDeclaration {
        /// Function name
        id: Identifier,
        /// Parameter names
        params: Vec<Identifier>,
        /// Function body
        body: Block,
        /// Source location
        loc: SourceSpan,
    },

    /// If statement
    IfStatement {
        /// Condition
        test: Expression,
        /// Statement run when the condition holds
        consequent: Box<Statement>,
        /// `else` branch
        alternate: Option<Box<Statement>>,
        /// Source location
        loc: SourceSpan,
    },

    /// `label: body`
    LabeledStatement {
        /// The label
        label: Identifier,
        /// Labeled statement
        body: Box<Statement>,
        /// Source location
        loc: SourceSpan,
    },

    /// Break statement
    BreakStatement {
        /// Target label
        label: Option<Identifier>,
        /// Source location
        loc: SourceSpan,
    },

    /// Continue statement
    ContinueStatement {
        /// Target label
        label: Option<Identifier>,
        /// Source location
        loc: SourceSpan,
    },

    /// With statement
    WithStatement {
        /// Scope object
        object: Expression,
        /// Body
        body: Box<Statement>,
        /// Source location
        loc: SourceSpan,
    },

    /// Switch statement
    SwitchStatement {
        /// Value being switched on
        discriminant: Expression,
        /// Clauses in source order, `default` included
        cases: Vec<SwitchCase>,
        /// Source location
        loc: SourceSpan,
    },

    /// Return statement
    ReturnStatement {
        /// Returned value
        argument: Option<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// Throw statement
    ThrowStatement {
        /// Thrown value
        argument: Expression,
        /// Source location
        loc: SourceSpan,
    },

    /// `try` with `catch` and/or `finally`
    TryStatement {
        /// Protected block
        block: Block,
        /// Catch clause
        handler: Option<CatchClause>,
        /// Finally block
        finalizer: Option<Block>,
        /// Source location
        loc: SourceSpan,
    },

    /// While loop
    WhileStatement {
        /// Loop condition
        test: Expression,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        loc: SourceSpan,
    },

    /// Do-while loop
    DoWhileStatement {
        /// Loop body
        body: Box<Statement>,
        /// Loop condition
        test: Expression,
        /// Source location
        loc: SourceSpan,
    },

    /// Three-clause for loop
    ForStatement {
        /// Initialization
        init: Option<ForInit>,
        /// Condition
        test: Option<Expression>,
        /// Update expression
        update: Option<Expression>,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        loc: SourceSpan,
    },

    /// For...in loop
    ForInStatement {
        /// Binding or assignment target
        left: ForInLeft,
        /// Object to iterate over
        right: Expression,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        loc: SourceSpan,
    },

    /// Debugger statement
    DebuggerStatement {
        /// Source location
        loc: SourceSpan,
    },
}

impl Statement {
    /// Source location of the statement
    pub fn loc(&self) -> SourceSpan {
        match self {
            Statement::EmptyStatement { loc }
            | Statement::BlockStatement { loc, .. }
            | Statement::ExpressionStatement { loc, .. }
            | Statement::VariableDeclaration { loc, .. }
            | Statement::FunctionDeclaration { loc, .. }
            | Statement::IfStatement { loc, .. }
            | Statement::LabeledStatement { loc, .. }
            | Statement::BreakStatement { loc, .. }
            | Statement::ContinueStatement { loc, .. }
            | Statement::WithStatement { loc, .. }
            | Statement::SwitchStatement { loc, .. }
            | Statement::ReturnStatement { loc, .. }
            | Statement::ThrowStatement { loc, .. }
            | Statement::TryStatement { loc, .. }
            | Statement::WhileStatement { loc, .. }
            | Statement::DoWhileStatement { loc, .. }
            | Statement::ForStatement { loc, .. }
            | Statement::ForInStatement { loc, .. }
            | Statement::DebuggerStatement { loc } => *loc,
        }
    }
}

impl From<VariableDeclaration> for Statement {
    fn from(declaration: VariableDeclaration) -> Self {
        Statement::VariableDeclaration {
            declarations: declaration.declarations,
            kind: declaration.kind,
            loc: declaration.loc,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Identifier reference
    Identifier {
        /// Identifier name
        name: String,
        /// Source location
        loc: SourceSpan,
    },

    /// Literal value
    Literal {
        /// Decoded value
        value: LiteralValue,
        /// Exact source text
        raw: String,
        /// Pattern and flags of a regular expression literal
        #[serde(skip_serializing_if = "Option::is_none")]
        regex: Option<RegExpLiteral>,
        /// Source location
        loc: SourceSpan,
    },

    /// `this`
    ThisExpression {
        /// Source location
        loc: SourceSpan,
    },

    /// Array literal; holes are `None`
    ArrayExpression {
        /// Elements in source order
        elements: Vec<Option<Expression>>,
        /// Source location
        loc: SourceSpan,
    },

    /// Object literal
    ObjectExpression {
        /// Properties in source order
        properties: Vec<Property>,
        /// Source location
        loc: SourceSpan,
    },

    /// Function expression
    FunctionExpression {
        /// Optional name
        id: Option<Identifier>,
        /// Parameter names
        params: Vec<Identifier>,
        /// Function body
        body: Block,
        /// Source location
        loc: SourceSpan,
    },

    /// Unary operation
    UnaryExpression {
        /// Operator
        operator: UnaryOperator,
        /// Always true
        prefix: bool,
        /// Operand
        argument: Box<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// `++`/`--`
    UpdateExpression {
        /// Operator
        operator: UpdateOperator,
        /// True for `++x`, false for `x++`
        prefix: bool,
        /// Target, always a reference
        argument: Box<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// Binary operation other than `&&`/`||`
    BinaryExpression {
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// `&&` or `||`
    LogicalExpression {
        /// Operator
        operator: LogicalOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// Assignment
    AssignmentExpression {
        /// Operator
        operator: AssignmentOperator,
        /// Target, always a reference
        left: Box<Expression>,
        /// Assigned value
        right: Box<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// `test ? consequent : alternate`
    ConditionalExpression {
        /// Condition
        test: Box<Expression>,
        /// Value when true
        consequent: Box<Expression>,
        /// Value when false
        alternate: Box<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// Function call
    CallExpression {
        /// Called expression
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// `new` expression
    NewExpression {
        /// Constructor expression
        callee: Box<Expression>,
        /// Arguments, empty when no list was written
        arguments: Vec<Expression>,
        /// Source location
        loc: SourceSpan,
    },

    /// `a.b` or `a[b]`
    MemberExpression {
        /// Object
        object: Box<Expression>,
        /// Property; an `Identifier` when not computed
        property: Box<Expression>,
        /// True for `a[b]`
        computed: bool,
        /// Source location
        loc: SourceSpan,
    },

    /// Comma-separated expressions, always two or more
    SequenceExpression {
        /// Expressions in source order
        expressions: Vec<Expression>,
        /// Source location
        loc: SourceSpan,
    },
}

impl Expression {
    /// Source location of the expression
    pub fn loc(&self) -> SourceSpan {
        match self {
            Expression::Identifier { loc, .. }
            | Expression::Literal { loc, .. }
            | Expression::ThisExpression { loc }
            | Expression::ArrayExpression { loc, .. }
            | Expression::ObjectExpression { loc, .. }
            | Expression::FunctionExpression { loc, .. }
            | Expression::UnaryExpression { loc, .. }
            | Expression::UpdateExpression { loc, .. }
            | Expression::BinaryExpression { loc, .. }
            | Expression::LogicalExpression { loc, .. }
            | Expression::AssignmentExpression { loc, .. }
            | Expression::ConditionalExpression { loc, .. }
            | Expression::CallExpression { loc, .. }
            | Expression::NewExpression { loc, .. }
            | Expression::MemberExpression { loc, .. }
            | Expression::SequenceExpression { loc, .. } => *loc,
        }
    }

    /// Identifiers and member expressions are the only valid assignment
    /// and update targets.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Expression::Identifier { .. } | Expression::MemberExpression { .. }
        )
    }

    /// Name of a bare identifier
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Expression::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<Identifier> for Expression {
    fn from(id: Identifier) -> Self {
        Expression::Identifier {
            name: id.name,
            loc: id.loc,
        }
    }
}

/// Identifier in binding or label position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    /// Identifier name
    pub name: String,
    /// Source location
    pub loc: SourceSpan,
}

/// `{ ... }` body of a function, `try`, `catch` or `finally`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "BlockStatement")]
pub struct Block {
    /// Statements in the block
    pub body: Vec<Statement>,
    /// Source location
    pub loc: SourceSpan,
}

/// Variable declaration in a `for` or `for-in` head
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration {
    /// Declarators in source order
    pub declarations: Vec<VariableDeclarator>,
    /// Declaration kind
    pub kind: VariableKind,
    /// Source location
    pub loc: SourceSpan,
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// `var`
    Var,
}

/// Single `name = init` in a declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    /// Bound name
    pub id: Identifier,
    /// Initializer
    pub init: Option<Expression>,
    /// Source location
    pub loc: SourceSpan,
}

/// `case test:` or `default:` clause
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase {
    /// Case test (None for `default`)
    pub test: Option<Expression>,
    /// Statements up to the next clause
    pub consequent: Vec<Statement>,
    /// Source location
    pub loc: SourceSpan,
}

/// `catch (param) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause {
    /// Bound exception name
    pub param: Identifier,
    /// Handler body
    pub body: Block,
    /// Source location
    pub loc: SourceSpan,
}

/// Initialization clause of a three-clause `for`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    /// `var` declaration
    VariableDeclaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// Left side of `for-in`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInLeft {
    /// `var x`, always exactly one declarator
    VariableDeclaration(VariableDeclaration),
    /// Identifier or member expression
    Expression(Expression),
}

/// Object literal property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Property {
    /// Property name
    pub key: PropertyKey,
    /// Value, or the accessor function for `get`/`set`
    pub value: Expression,
    /// init, get or set
    pub kind: PropertyKind,
    /// Method shorthand; never produced
    pub method: bool,
    /// `{ a }` shorthand; never produced
    pub shorthand: bool,
    /// `[key]: value`; never produced
    pub computed: bool,
    /// Source location
    pub loc: SourceSpan,
}

/// Object literal property name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PropertyKey {
    /// `name: ...`, including reserved words
    Identifier {
        /// Key name
        name: String,
        /// Source location
        loc: SourceSpan,
    },
    /// `"name": ...` or `1: ...`
    Literal {
        /// String or number value
        value: LiteralValue,
        /// Exact source text
        raw: String,
        /// Source location
        loc: SourceSpan,
    },
}

/// Property kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Plain `key: value`
    Init,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// Decoded literal value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// Regular expression literal; serialized as `null` like ESTree
    /// does for values JSON cannot represent
    RegExp,
}

impl Serialize for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LiteralValue::Null | LiteralValue::RegExp => serializer.serialize_unit(),
            LiteralValue::Boolean(b) => serializer.serialize_bool(*b),
            LiteralValue::Number(n) => serializer.serialize_f64(*n),
            LiteralValue::String(s) => serializer.serialize_str(s),
        }
    }
}

/// `regex` member of a regular expression literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegExpLiteral {
    /// Body between the slashes
    pub pattern: String,
    /// Flags after the closing slash
    pub flags: String,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// `==`
    #[serde(rename = "==")]
    LooseEqual,
    /// `!=`
    #[serde(rename = "!=")]
    LooseNotEqual,
    /// `===`
    #[serde(rename = "===")]
    StrictEqual,
    /// `!==`
    #[serde(rename = "!==")]
    StrictNotEqual,
    /// `<`
    #[serde(rename = "<")]
    LessThan,
    /// `<=`
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// `>`
    #[serde(rename = ">")]
    GreaterThan,
    /// `>=`
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    /// `<<`
    #[serde(rename = "<<")]
    ShiftLeft,
    /// `>>`
    #[serde(rename = ">>")]
    ShiftRight,
    /// `>>>`
    #[serde(rename = ">>>")]
    LogicalShiftRight,
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Subtract,
    /// `*`
    #[serde(rename = "*")]
    Multiply,
    /// `/`
    #[serde(rename = "/")]
    Divide,
    /// `%`
    #[serde(rename = "%")]
    Modulo,
    /// `**`
    #[serde(rename = "**")]
    Exponentiate,
    /// `|`
    #[serde(rename = "|")]
    BitwiseOr,
    /// `^`
    #[serde(rename = "^")]
    BitwiseXor,
    /// `&`
    #[serde(rename = "&")]
    BitwiseAnd,
    /// `in`
    #[serde(rename = "in")]
    In,
    /// `instanceof`
    #[serde(rename = "instanceof")]
    Instanceof,
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    /// `&&`
    #[serde(rename = "&&")]
    And,
    /// `||`
    #[serde(rename = "||")]
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// `-`
    #[serde(rename = "-")]
    Minus,
    /// `+`
    #[serde(rename = "+")]
    Plus,
    /// `!`
    #[serde(rename = "!")]
    Not,
    /// `~`
    #[serde(rename = "~")]
    BitwiseNot,
    /// `typeof`
    #[serde(rename = "typeof")]
    Typeof,
    /// `void`
    #[serde(rename = "void")]
    Void,
    /// `delete`
    #[serde(rename = "delete")]
    Delete,
}

/// Update operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    /// `++`
    #[serde(rename = "++")]
    Increment,
    /// `--`
    #[serde(rename = "--")]
    Decrement,
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    /// `=`
    #[serde(rename = "=")]
    Assign,
    /// `+=`
    #[serde(rename = "+=")]
    AddAssign,
    /// `-=`
    #[serde(rename = "-=")]
    SubtractAssign,
    /// `*=`
    #[serde(rename = "*=")]
    MultiplyAssign,
    /// `/=`
    #[serde(rename = "/=")]
    DivideAssign,
    /// `%=`
    #[serde(rename = "%=")]
    ModuloAssign,
    /// `**=`
    #[serde(rename = "**=")]
    ExponentiateAssign,
    /// `<<=`
    #[serde(rename = "<<=")]
    ShiftLeftAssign,
    /// `>>=`
    #[serde(rename = ">>=")]
    ShiftRightAssign,
    /// `>>>=`
    #[serde(rename = ">>>=")]
    LogicalShiftRightAssign,
    /// `&=`
    #[serde(rename = "&=")]
    BitwiseAndAssign,
    /// `|=`
    #[serde(rename = "|=")]
    BitwiseOrAssign,
    /// `^=`
    #[serde(rename = "^=")]
    BitwiseXorAssign,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Position;

    fn span() -> SourceSpan {
        SourceSpan::new(Position::new(1, 0), Position::new(1, 1))
    }

    #[test]
    fn test_reference_expressions() {
        let id = Expression::Identifier {
            name: "x".to_string(),
            loc: span(),
        };
        assert!(id.is_reference());

        let member = Expression::MemberExpression {
            object: Box::new(id.clone()),
            property: Box::new(id.clone()),
            computed: false,
            loc: span(),
        };
        assert!(member.is_reference());

        let literal = Expression::Literal {
            value: LiteralValue::Number(1.0),
            raw: "1".to_string(),
            regex: None,
            loc: span(),
        };
        assert!(!literal.is_reference());
    }

    #[test]
    fn test_variable_declaration_into_statement() {
        let decl = VariableDeclaration {
            declarations: vec![],
            kind: VariableKind::Var,
            loc: span(),
        };
        let stmt: Statement = decl.into();
        assert!(matches!(stmt, Statement::VariableDeclaration { .. }));
        assert_eq!(stmt.loc(), span());
    }

    #[test]
    fn test_statement_tag_serialization() {
        let stmt = Statement::EmptyStatement { loc: span() };
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["type"], "EmptyStatement");
        assert_eq!(json["loc"]["end"]["column"], 1);
    }

    #[test]
    fn test_operator_serializes_as_symbol() {
        assert_eq!(
            serde_json::to_value(BinaryOperator::Instanceof).unwrap(),
            "instanceof"
        );
        assert_eq!(
            serde_json::to_value(AssignmentOperator::LogicalShiftRightAssign).unwrap(),
            ">>>="
        );
    }

    #[test]
    fn test_block_tagged_as_block_statement() {
        let block = Block {
            body: vec![],
            loc: span(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "BlockStatement");
    }
}
