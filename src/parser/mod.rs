//! Parser for the Lox language
//!
//! A recursive descent parser that produces a statement sequence from a
//! token stream. Each precedence level is one method; left-associative
//! operators are built by an iterative left-fold, assignment by right
//! recursion. Syntax errors trigger panic-mode recovery: the statement under
//! construction is discarded and the parser resynchronizes at the next
//! statement boundary, so one pass reports every malformed statement.
//!
//! Grammar, lowest binding strength first:
//!
//! ```text
//! program     → declaration* EOF
//! declaration → "var" IDENT ("=" expression)? ";" | statement
//! statement   → "print" expression ";" | "{" declaration* "}" | expression ";"
//! expression  → assignment
//! assignment  → IDENT "=" assignment | equality
//! equality    → comparison (("!="|"==") comparison)*
//! comparison  → term ((">"|">="|"<"|"<=") term)*
//! term        → factor (("-"|"+") factor)*
//! factor      → unary (("/"|"*") unary)*
//! unary       → ("!"|"-") unary | primary
//! primary     → NUMBER | STRING | "true" | "false" | "nil" | IDENT | "(" expression ")"
//! ```

use crate::ast::{Expr, Lit, Stmt};
use crate::common::{IdGenerator, NodeId};
use crate::diagnostics::{SourceFile, SyntaxError};
use crate::lexer::{Token, TokenKind, TokenLiteral};

/// Parse a token stream into a statement sequence.
///
/// Returns every statement that parsed cleanly together with all syntax
/// errors found along the way. Callers must not execute the statements when
/// any errors were reported.
pub fn parse(tokens: &[Token], file: &SourceFile) -> (Vec<Stmt>, Vec<SyntaxError>) {
    let mut parser = Parser::new(tokens, file);
    let statements = parser.parse_program();
    (statements, parser.errors)
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    id_gen: IdGenerator,
    file: &'a SourceFile,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], file: &'a SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            id_gen: IdGenerator::new(),
            file,
            errors: Vec::new(),
        }
    }

    fn next_id(&mut self) -> NodeId {
        self.id_gen.next()
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should have at least EOF")
        })
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    fn advance(&mut self) -> &Token {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&Token, SyntaxError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.current();
        let found = if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("`{}`", token.text)
        };
        SyntaxError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            span: token.span.into(),
            src: self.file.to_named_source(),
        }
    }

    /// Discard tokens until a likely statement boundary: just past a `;`, or
    /// in front of a keyword that can begin a declaration. Bounds the error
    /// cascade to one report per malformed statement.
    fn synchronize(&mut self) {
        self.advance();
        while !self.at(TokenKind::Eof) {
            if self.previous().kind == TokenKind::Semi {
                return;
            }
            if self.peek().starts_statement() {
                return;
            }
            self.advance();
        }
    }

    // ==================== STATEMENTS ====================

    fn parse_program(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.at(TokenKind::Eof) {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    /// Returns `None` when the statement was malformed; its error has been
    /// recorded and the parser has resynchronized.
    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.at(TokenKind::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };
        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    fn var_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // `var`
        let name = self.expect(TokenKind::Ident, "variable name")?.clone();
        let initializer = if self.at(TokenKind::Eq) {
            self.advance();
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semi, "`;` after variable declaration")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt, SyntaxError> {
        match self.peek() {
            TokenKind::Print => self.print_statement(),
            TokenKind::LBrace => self.block(),
            _ => self.expression_statement(),
        }
    }

    fn print_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // `print`
        let expr = self.expression()?;
        self.expect(TokenKind::Semi, "`;` after value")?;
        Ok(Stmt::Print { expr })
    }

    fn block(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // `{`
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        self.expect(TokenKind::RBrace, "`}` after block")?;
        Ok(Stmt::Block { statements })
    }

    fn expression_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semi, "`;` after expression")?;
        Ok(Stmt::Expression { expr })
    }

    // ==================== EXPRESSIONS ====================

    fn expression(&mut self) -> Result<Expr, SyntaxError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.equality()?;

        if self.at(TokenKind::Eq) {
            let eq = self.advance().clone();
            let value = self.assignment()?;
            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign {
                    id: self.next_id(),
                    name,
                    value: Box::new(value),
                }),
                // Report at the `=` but keep parsing; the malformed
                // assignment node is never built.
                other => {
                    self.errors.push(SyntaxError::InvalidAssignmentTarget {
                        span: eq.span.into(),
                        src: self.file.to_named_source(),
                    });
                    Ok(other)
                }
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.comparison()?;
        while self.at_any(&[TokenKind::Ne, TokenKind::EqEq]) {
            let op = self.advance().clone();
            let right = self.comparison()?;
            expr = Expr::Binary {
                id: self.next_id(),
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.term()?;
        while self.at_any(&[TokenKind::Gt, TokenKind::Ge, TokenKind::Lt, TokenKind::Le]) {
            let op = self.advance().clone();
            let right = self.term()?;
            expr = Expr::Binary {
                id: self.next_id(),
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.factor()?;
        while self.at_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let op = self.advance().clone();
            let right = self.factor()?;
            expr = Expr::Binary {
                id: self.next_id(),
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.unary()?;
        while self.at_any(&[TokenKind::Slash, TokenKind::Star]) {
            let op = self.advance().clone();
            let right = self.unary()?;
            expr = Expr::Binary {
                id: self.next_id(),
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.at_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.advance().clone();
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                id: self.next_id(),
                op,
                operand: Box::new(operand),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            TokenKind::False => {
                self.advance();
                Ok(self.literal(Lit::Bool(false)))
            }
            TokenKind::True => {
                self.advance();
                Ok(self.literal(Lit::Bool(true)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(self.literal(Lit::Nil))
            }
            TokenKind::NumberLit => {
                let token = self.advance().clone();
                match token.literal {
                    Some(TokenLiteral::Number(n)) => Ok(self.literal(Lit::Number(n))),
                    _ => Err(self.unexpected("number literal")),
                }
            }
            TokenKind::StringLit => {
                let token = self.advance().clone();
                match token.literal {
                    Some(TokenLiteral::String(s)) => Ok(self.literal(Lit::Str(s))),
                    _ => Err(self.unexpected("string literal")),
                }
            }
            TokenKind::Ident => {
                let name = self.advance().clone();
                Ok(Expr::Variable {
                    id: self.next_id(),
                    name,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "`)` after expression")?;
                Ok(Expr::Grouping {
                    id: self.next_id(),
                    inner: Box::new(inner),
                })
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn literal(&mut self, value: Lit) -> Expr {
        Expr::Literal {
            id: self.next_id(),
            value,
        }
    }
}
