//! Parser tests

use loxide::SyntaxError;
use loxide::ast::{Expr, Lit, Stmt};
use loxide::lexer::TokenKind;

fn parse_ok(source: &str) -> Vec<Stmt> {
    loxide::parse(source).expect("source should parse cleanly")
}

fn parse_errors(source: &str) -> Vec<SyntaxError> {
    loxide::parse(source).expect_err("source should have syntax errors")
}

/// The expression inside a single expression statement
fn only_expr(source: &str) -> Expr {
    let mut statements = parse_ok(source);
    assert_eq!(statements.len(), 1);
    match statements.remove(0) {
        Stmt::Expression { expr } => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_empty() {
    assert!(parse_ok("").is_empty());
}

#[test]
fn test_parse_print_statement() {
    let statements = parse_ok("print 1;");
    assert!(matches!(&statements[0], Stmt::Print { .. }));
}

#[test]
fn test_parse_var_declaration() {
    let statements = parse_ok("var x = 42;");
    match &statements[0] {
        Stmt::Var { name, initializer } => {
            assert_eq!(name.text, "x");
            assert!(initializer.is_some());
        }
        other => panic!("expected var declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_var_without_initializer() {
    let statements = parse_ok("var x;");
    match &statements[0] {
        Stmt::Var { name, initializer } => {
            assert_eq!(name.text, "x");
            assert!(initializer.is_none());
        }
        other => panic!("expected var declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_block() {
    let statements = parse_ok("{ var x = 1; print x; }");
    match &statements[0] {
        Stmt::Block { statements } => assert_eq!(statements.len(), 2),
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_parse_nested_blocks() {
    let statements = parse_ok("{ { print 1; } }");
    match &statements[0] {
        Stmt::Block { statements } => {
            assert!(matches!(&statements[0], Stmt::Block { .. }));
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    // 1 + 2 * 3 parses as 1 + (2 * 3)
    match only_expr("1 + 2 * 3;") {
        Expr::Binary { op, right, .. } => {
            assert_eq!(op.kind, TokenKind::Plus);
            match *right {
                Expr::Binary { op, .. } => assert_eq!(op.kind, TokenKind::Star),
                other => panic!("expected binary rhs, got {:?}", other),
            }
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    // 1 - 2 - 3 parses as (1 - 2) - 3
    match only_expr("1 - 2 - 3;") {
        Expr::Binary { op, left, .. } => {
            assert_eq!(op.kind, TokenKind::Minus);
            match *left {
                Expr::Binary { op, .. } => assert_eq!(op.kind, TokenKind::Minus),
                other => panic!("expected binary lhs, got {:?}", other),
            }
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_comparison_binds_looser_than_term() {
    // 1 + 2 < 4 parses as (1 + 2) < 4
    match only_expr("1 + 2 < 4;") {
        Expr::Binary { op, .. } => assert_eq!(op.kind, TokenKind::Lt),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_equality_binds_loosest() {
    match only_expr("1 < 2 == true;") {
        Expr::Binary { op, .. } => assert_eq!(op.kind, TokenKind::EqEq),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_unary_nesting() {
    match only_expr("!!true;") {
        Expr::Unary { op, operand, .. } => {
            assert_eq!(op.kind, TokenKind::Bang);
            assert!(matches!(*operand, Expr::Unary { .. }));
        }
        other => panic!("expected unary expression, got {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    // (1 + 2) * 3 keeps the grouping node on the left
    match only_expr("(1 + 2) * 3;") {
        Expr::Binary { op, left, .. } => {
            assert_eq!(op.kind, TokenKind::Star);
            assert!(matches!(*left, Expr::Grouping { .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_literal_kinds() {
    match only_expr("nil;") {
        Expr::Literal { value, .. } => assert_eq!(value, Lit::Nil),
        other => panic!("expected literal, got {:?}", other),
    }
    match only_expr("\"text\";") {
        Expr::Literal { value, .. } => assert_eq!(value, Lit::Str("text".to_string())),
        other => panic!("expected literal, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    // a = b = 1 parses as a = (b = 1)
    match only_expr("a = b = 1;") {
        Expr::Assign { name, value, .. } => {
            assert_eq!(name.text, "a");
            match *value {
                Expr::Assign { name, .. } => assert_eq!(name.text, "b"),
                other => panic!("expected nested assignment, got {:?}", other),
            }
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_invalid_assignment_target() {
    let errors = parse_errors("1 + 2 = 3;");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        SyntaxError::InvalidAssignmentTarget { .. }
    ));
}

#[test]
fn test_missing_semicolon() {
    let errors = parse_errors("print 1");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], SyntaxError::UnexpectedToken { .. }));
}

#[test]
fn test_expect_expression() {
    let errors = parse_errors(";");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        SyntaxError::UnexpectedToken { expected, found, .. } => {
            assert_eq!(expected, "expression");
            assert_eq!(found, "`;`");
        }
        other => panic!("expected unexpected-token error, got {:?}", other),
    }
}

#[test]
fn test_error_at_end_of_input() {
    let errors = parse_errors("print 1 +");
    match &errors[0] {
        SyntaxError::UnexpectedToken { found, .. } => assert_eq!(found, "end of input"),
        other => panic!("expected unexpected-token error, got {:?}", other),
    }
}

#[test]
fn test_unclosed_block() {
    let errors = parse_errors("{ print 1;");
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_recovery_reports_both_malformed_statements() {
    // Two independently malformed declarations around a valid one: one
    // error each, found in a single parse pass.
    let errors = parse_errors("var 1;\nprint 2;\nvar 3;");
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_recovery_resumes_after_semicolon() {
    // The bad statement is discarded up to its `;`; the rest parses.
    let result = loxide::parse("1 +;\nvar ok = 2;");
    let errors = result.expect_err("first statement is malformed");
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_lex_and_parse_errors_are_pooled() {
    // A bad character and a missing semicolon surface together.
    let errors = parse_errors("@ print 1");
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], SyntaxError::UnexpectedCharacter { .. }));
    assert!(matches!(errors[1], SyntaxError::UnexpectedToken { .. }));
}
