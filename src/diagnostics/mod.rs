//! Diagnostic reporting shared by the scanner, parser and interpreter.

mod reporter;

pub use reporter::DiagnosticReporter;

use std::fmt;

use crate::lexer::LexError;

/// Phase that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Runtime,
}

impl DiagnosticKind {
    pub fn exit_code(&self) -> u8 {
        match self {
            DiagnosticKind::Lexical | DiagnosticKind::Syntax => exit_codes::DATA_ERROR,
            DiagnosticKind::Runtime => exit_codes::SOFTWARE,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => f.write_str("lexical"),
            DiagnosticKind::Syntax => f.write_str("syntax"),
            DiagnosticKind::Runtime => f.write_str("runtime"),
        }
    }
}

/// Errors that end up in front of the user.
///
/// The message comes from `Display`; the kind decides the process exit code.
pub trait Report: std::error::Error {
    fn kind(&self) -> DiagnosticKind;

    fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

impl Report for LexError {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::Lexical
    }
}

/// A rendered error message with its phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn from_report<R: Report + ?Sized>(report: &R) -> Self {
        Self::new(report.kind(), report.to_string())
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Process exit codes, following the BSD `sysexits` convention
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    /// Malformed command-line invocation
    pub const USAGE: u8 = 64;
    /// Lexical or syntax error in the input
    pub const DATA_ERROR: u8 = 65;
    /// Runtime error while evaluating
    pub const SOFTWARE: u8 = 70;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_reports_exit_with_data_error() {
        let error = LexError::UnexpectedCharacter {
            line: 3,
            lexeme: "@".into(),
        };
        let diagnostic = Diagnostic::from_report(&error);
        assert_eq!(diagnostic.kind, DiagnosticKind::Lexical);
        assert_eq!(diagnostic.exit_code(), 65);
        assert_eq!(diagnostic.to_string(), "[line 3] Error: Unexpected character: @");
    }

    #[test]
    fn runtime_kind_exits_with_software_error() {
        assert_eq!(DiagnosticKind::Runtime.exit_code(), exit_codes::SOFTWARE);
        assert_eq!(DiagnosticKind::Syntax.exit_code(), exit_codes::DATA_ERROR);
    }
}
