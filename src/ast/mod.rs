//! Abstract syntax tree for the Lox language
//!
//! Two closed node families, built by the parser and walked by the
//! evaluator. Exhaustive `match` in the evaluator replaces the visitor
//! double-dispatch a class hierarchy would need. Operator nodes carry the
//! operator token itself so runtime errors can point at the token nearest
//! the fault.

use crate::common::NodeId;
use crate::lexer::Token;
use serde::{Deserialize, Serialize};

/// Expression node. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// Literal value
    Literal { id: NodeId, value: Lit },
    /// Parenthesized expression; evaluates to the inner value
    Grouping { id: NodeId, inner: Box<Expr> },
    /// Unary operation; `op.kind` is `Bang` or `Minus`
    Unary {
        id: NodeId,
        op: Token,
        operand: Box<Expr>,
    },
    /// Binary operation over the arithmetic, comparison and equality operators
    Binary {
        id: NodeId,
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// Reference to a bound name
    Variable { id: NodeId, name: Token },
    /// Assignment to an existing binding; evaluates to the assigned value
    Assign {
        id: NodeId,
        name: Token,
        value: Box<Expr>,
    },
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lit {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

/// Statement node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression evaluated for side effect; result discarded
    Expression { expr: Expr },
    /// Expression evaluated and rendered to the output channel
    Print { expr: Expr },
    /// Variable declaration; binds to nil when the initializer is absent
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    /// Braced statement list executed in a fresh nested scope
    Block { statements: Vec<Stmt> },
}
