//! Syntax errors.

use thiserror::Error;

use crate::diagnostics::{DiagnosticKind, Report};
use crate::lexer::Token;

/// A recoverable syntax error located at a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error at {location}: {message}")]
pub struct ParseError {
    pub line: usize,
    /// `end`, or the offending lexeme in single quotes
    pub location: String,
    pub message: String,
}

impl ParseError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.is_eof() {
            "end".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };

        Self {
            line: token.line,
            location,
            message: message.into(),
        }
    }
}

impl Report for ParseError {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::Syntax
    }
}
