//! Diagnostic reporting with source locations
//!
//! This module provides rich error messages with source locations using
//! miette. There are two disjoint error taxonomies: syntax errors (scan and
//! parse time) and runtime errors (evaluation time). Both are explicit
//! values returned from the pipeline, never ambient flags, so independent
//! runs (e.g. REPL lines) cannot leak error state into each other.

use crate::common::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::sync::Arc;
use thiserror::Error;

/// Source file for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// A scan-time or parse-time error.
///
/// The scanner and parser both keep going after reporting one of these, so a
/// single pass can surface every independent fault in the input. If any were
/// reported, the parsed statements must not be executed.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SyntaxError {
    #[error("Unexpected character `{ch}`")]
    #[diagnostic(code(lex::unexpected_char))]
    UnexpectedCharacter {
        ch: String,
        #[label("not valid here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unterminated string")]
    #[diagnostic(
        code(lex::unterminated_string),
        help("add a closing `\"` before the end of the file")
    )]
    UnterminatedString {
        #[label("string opens here and never closes")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Expected {expected}, found {found}")]
    #[diagnostic(code(parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Invalid assignment target")]
    #[diagnostic(
        code(parse::invalid_assignment),
        help("only a variable can appear on the left of `=`")
    )]
    InvalidAssignmentTarget {
        #[label("cannot assign to the expression before this `=`")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },
}

/// An evaluation-time error.
///
/// Each variant carries the span of the token nearest the fault. A runtime
/// error aborts the remainder of the current execution batch; it is not
/// recoverable inside the evaluator.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum RuntimeError {
    #[error("Undefined variable `{name}`")]
    #[diagnostic(
        code(runtime::undefined_var),
        help("declare it first: `var {name} = ...;`")
    )]
    UndefinedVariable {
        name: String,
        #[label("not found in any enclosing scope")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Operand must be a number")]
    #[diagnostic(code(runtime::operand_not_number))]
    OperandMustBeNumber {
        #[label("cannot negate the operand of this `-`")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Operands must be numbers")]
    #[diagnostic(code(runtime::operands_not_numbers))]
    OperandsMustBeNumbers {
        op: String,
        #[label("both sides of `{op}` must be numbers")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Operands must be two numbers or two strings")]
    #[diagnostic(
        code(runtime::invalid_addition),
        help("`+` adds two numbers or concatenates two strings")
    )]
    OperandsMustBeNumbersOrStrings {
        #[label("cannot apply `+` to these operand types")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },
}

/// Why a `run` failed: which error class fired, with every diagnostic.
///
/// Drivers decide process exit codes from the variant; nothing in the
/// library terminates the process.
#[derive(Debug, Clone)]
pub enum RunError {
    /// Scanning or parsing reported errors; nothing was executed.
    Syntax(Vec<SyntaxError>),
    /// Execution stopped at the first runtime fault.
    Runtime(RuntimeError),
}

impl RunError {
    /// Print every contained diagnostic to stderr.
    pub fn emit_all(&self) {
        match self {
            RunError::Syntax(errors) => {
                for error in errors {
                    eprintln!("{:?}", miette::Report::new(error.clone()));
                }
            }
            RunError::Runtime(error) => {
                eprintln!("{:?}", miette::Report::new(error.clone()));
            }
        }
    }
}
