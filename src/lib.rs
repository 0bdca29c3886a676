//! Loxide — a tree-walking interpreter for the Lox programming language
//!
//! Covers the expression/statement core of the language: variables,
//! assignment, arithmetic, comparison, string concatenation, `print`, and
//! block scoping.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → AST → Evaluator
//! ```
//!
//! # Example
//!
//! ```
//! use loxide::diagnostics::SourceFile;
//! use loxide::interp::Interpreter;
//!
//! let file = SourceFile::new("demo.lox", "var x = 1; { var x = 2; print x; } print x;");
//! let mut interpreter = Interpreter::new();
//! loxide::run(&file, &mut interpreter).unwrap();
//! assert_eq!(interpreter.output(), ["2", "1"]);
//! ```

pub mod ast;
pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-export diagnostics for convenience
pub use diagnostics::{RunError, RuntimeError, SourceFile, SyntaxError};

// Re-exports for convenience
pub use interp::{Interpreter, Value};

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan source text into tokens, collecting lexical errors.
pub fn lex(source: &str) -> (Vec<lexer::Token>, Vec<SyntaxError>) {
    let file = SourceFile::new("<input>", source);
    lexer::lex(&file)
}

/// Parse source text into a statement sequence.
///
/// Scan-time and parse-time errors are pooled into one report; any error
/// means the returned statements would be unsafe to trust, so none are
/// returned.
pub fn parse(source: &str) -> Result<Vec<ast::Stmt>, Vec<SyntaxError>> {
    let file = SourceFile::new("<input>", source);
    parse_file(&file)
}

/// Parse a named source file into a statement sequence.
pub fn parse_file(file: &SourceFile) -> Result<Vec<ast::Stmt>, Vec<SyntaxError>> {
    let (tokens, mut errors) = lexer::lex(file);
    tracing::debug!("lexed {} tokens", tokens.len());
    let (statements, parse_errors) = parser::parse(&tokens, file);
    errors.extend(parse_errors);
    if errors.is_empty() {
        Ok(statements)
    } else {
        Err(errors)
    }
}

/// Scan, parse and execute a source file against a persistent interpreter.
///
/// Syntax errors suppress execution entirely; a runtime error stops the
/// batch at the failing statement. Either way every diagnostic comes back as
/// a value, so callers (file runner, REPL) decide how to surface them.
pub fn run(file: &SourceFile, interpreter: &mut Interpreter) -> Result<(), RunError> {
    let statements = parse_file(file).map_err(RunError::Syntax)?;
    tracing::debug!("executing {} statements", statements.len());
    interpreter
        .interpret(&statements, file)
        .map_err(RunError::Runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_lex_and_parse_round() {
        let statements = parse("print 1 + 2;").unwrap();
        assert_eq!(statements.len(), 1);
    }
}
