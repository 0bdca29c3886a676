//! Lexer for the Lox language
//!
//! Drives the logos-generated scanner over the source text in a single
//! left-to-right pass, decoding literal payloads and collecting lexical
//! errors without aborting. The generated automaton gives maximal munch for
//! free: `<=` is never split into `<` `=`, and `<` alone is a distinct
//! less-than token.

pub mod tokens;

pub use tokens::{Token, TokenKind, TokenLiteral};

use crate::common::{LineIndex, Span};
use crate::diagnostics::{SourceFile, SyntaxError};
use logos::Logos;

/// Scan source text into a token sequence.
///
/// Never fails: lexical errors (unexpected characters, unterminated strings)
/// are collected as diagnostics and scanning continues, so one pass surfaces
/// every bad spot in the input. The returned stream always ends with a
/// zero-width `Eof` token carrying no lexeme.
pub fn lex(file: &SourceFile) -> (Vec<Token>, Vec<SyntaxError>) {
    let source: &str = &file.content;
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        match result {
            // The unterminated-string rule only matches when no closing quote
            // exists before end of input; report it and emit no token.
            Ok(TokenKind::UnterminatedString) => {
                errors.push(SyntaxError::UnterminatedString {
                    span: span.into(),
                    src: file.to_named_source(),
                });
            }
            Ok(kind) => {
                let text = lexer.slice().to_string();
                let literal = decode_literal(kind, &text);
                tokens.push(Token {
                    kind,
                    literal,
                    line: lines.line(span.start),
                    span,
                    text,
                });
            }
            Err(()) => {
                errors.push(SyntaxError::UnexpectedCharacter {
                    ch: lexer.slice().to_string(),
                    span: span.into(),
                    src: file.to_named_source(),
                });
            }
        }
    }

    let end = Span::new(source.len(), source.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        literal: None,
        line: lines.line(end.start),
        span: end,
    });

    (tokens, errors)
}

/// Decode the runtime payload of literal tokens: numbers parse as f64,
/// strings keep their content verbatim with the quotes stripped (Lox has no
/// escape sequences).
fn decode_literal(kind: TokenKind, text: &str) -> Option<TokenLiteral> {
    match kind {
        TokenKind::NumberLit => text.parse::<f64>().ok().map(TokenLiteral::Number),
        TokenKind::StringLit => Some(TokenLiteral::String(text[1..text.len() - 1].to_string())),
        _ => None,
    }
}
