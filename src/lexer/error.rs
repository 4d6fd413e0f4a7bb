//! Errors raised while scanning.

use thiserror::Error;

/// A lexical problem found in the source. Scanning continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("[line {line}] Error: Unexpected character: {lexeme}")]
    UnexpectedCharacter { line: usize, lexeme: String },

    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } | LexError::UnterminatedString { line } => {
                *line
            }
        }
    }
}

/// Misuse of a [`Scanner`](super::Scanner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("a scanner can only scan its source once")]
    AlreadyScanned,
}
