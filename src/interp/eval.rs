//! Tree-walking evaluator
//!
//! Walks the statement sequence directly, dispatching on node variant and
//! mutating the scope chain. The global frame persists for the lifetime of
//! the interpreter, so a REPL can accumulate state across `interpret` calls.

use crate::ast::{Expr, Lit, Stmt};
use crate::diagnostics::{RuntimeError, SourceFile};
use crate::lexer::{Token, TokenKind};

use super::env::Environment;
use super::value::Value;

/// Tree-walking interpreter
pub struct Interpreter {
    /// Variable environment; frame 0 is the persistent global scope
    env: Environment,
    /// Lines emitted by `print`, kept for tests and tooling
    output: Vec<String>,
    /// Source of the current batch, for runtime error reporting
    source: SourceFile,
}

impl Interpreter {
    /// Create a new interpreter with an empty global scope
    pub fn new() -> Self {
        Interpreter {
            env: Environment::new(),
            output: Vec::new(),
            source: SourceFile::new("<input>", ""),
        }
    }

    /// Get captured output (for testing)
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Clear output buffer
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Execute statements strictly in order, stopping at the first runtime
    /// error. Global bindings made here survive into later calls.
    pub fn interpret(&mut self, statements: &[Stmt], file: &SourceFile) -> Result<(), RuntimeError> {
        self.source = file.clone();
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expression { expr } => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print { expr } => {
                let value = self.evaluate(expr)?;
                let line = value.to_string();
                println!("{}", line);
                self.output.push(line);
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.env.define(name.text.clone(), value);
                Ok(())
            }
            Stmt::Block { statements } => {
                self.env.push_scope();
                let result = self.execute_block(statements);
                // The frame is discarded even when an error propagates out,
                // keeping scope entry/exit in strict LIFO order.
                self.env.pop_scope();
                result
            }
        }
    }

    fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    /// Evaluate an expression to a value
    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                Lit::Nil => Value::Nil,
                Lit::Bool(b) => Value::Bool(*b),
                Lit::Number(n) => Value::Number(*n),
                Lit::Str(s) => Value::Str(s.clone()),
            }),

            Expr::Grouping { inner, .. } => self.evaluate(inner),

            Expr::Variable { name, .. } => self
                .env
                .get(&name.text)
                .ok_or_else(|| self.undefined(name)),

            Expr::Assign { name, value, .. } => {
                let value = self.evaluate(value)?;
                if self.env.assign(&name.text, value.clone()) {
                    Ok(value)
                } else {
                    Err(self.undefined(name))
                }
            }

            Expr::Unary { op, operand, .. } => {
                let value = self.evaluate(operand)?;
                match op.kind {
                    TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
                    TokenKind::Minus => match value.as_number() {
                        Some(n) => Ok(Value::Number(-n)),
                        None => Err(RuntimeError::OperandMustBeNumber {
                            span: op.span.into(),
                            src: self.source.to_named_source(),
                        }),
                    },
                    kind => unreachable!("parser built a unary node for `{kind}`"),
                }
            }

            Expr::Binary {
                left, op, right, ..
            } => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;
                self.binary(op, lhs, rhs)
            }
        }
    }

    /// Apply a binary operator. Equality works on any value pair without
    /// coercion; `+` accepts two numbers or two strings; everything else
    /// requires numbers on both sides. Numeric operators follow IEEE double
    /// semantics, so division by zero yields an infinity rather than an
    /// error.
    fn binary(&self, op: &Token, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
        match op.kind {
            TokenKind::EqEq => Ok(Value::Bool(lhs == rhs)),
            TokenKind::Ne => Ok(Value::Bool(lhs != rhs)),

            TokenKind::Plus => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
                _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings {
                    span: op.span.into(),
                    src: self.source.to_named_source(),
                }),
            },

            TokenKind::Minus => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Slash => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Number(a / b))
            }
            TokenKind::Star => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Number(a * b))
            }

            TokenKind::Gt => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::Ge => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Bool(a >= b))
            }
            TokenKind::Lt => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::Le => {
                let (a, b) = self.numbers(op, &lhs, &rhs)?;
                Ok(Value::Bool(a <= b))
            }

            kind => unreachable!("parser built a binary node for `{kind}`"),
        }
    }

    fn numbers(&self, op: &Token, lhs: &Value, rhs: &Value) -> Result<(f64, f64), RuntimeError> {
        match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(RuntimeError::OperandsMustBeNumbers {
                op: op.text.clone(),
                span: op.span.into(),
                src: self.source.to_named_source(),
            }),
        }
    }

    fn undefined(&self, name: &Token) -> RuntimeError {
        RuntimeError::UndefinedVariable {
            name: name.text.clone(),
            span: name.span.into(),
            src: self.source.to_named_source(),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
