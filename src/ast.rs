use crate::{location::Location, token::Token};

/// An arithmetic expression.
///
/// Binary nodes keep the operator token so diagnostics can point at it.
/// Nodes own their children; a tree is built bottom-up and never changed
/// afterwards.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    NumberLiteral {
        value: f64,
        token: Token,
    },
    Add {
        token: Token,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Subtract {
        token: Token,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Multiply {
        token: Token,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Divide {
        token: Token,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    /// The token this node was built from; for binary nodes, the operator.
    pub fn token(&self) -> &Token {
        match self {
            Expression::NumberLiteral { token, .. }
            | Expression::Add { token, .. }
            | Expression::Subtract { token, .. }
            | Expression::Multiply { token, .. }
            | Expression::Divide { token, .. } => token,
        }
    }

    pub fn location(&self) -> Location {
        self.token().location.clone()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// An expression statement. Running one prints the expression's value,
    /// which is the only thing a Tally program does.
    Print(Expression),
    /// Stands in for a statement that failed to parse, after error recovery
    /// skipped it.
    Unknown,
}
