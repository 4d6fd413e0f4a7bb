//! Diagnostic reporter that collects and manages diagnostics.

use super::{exit_codes, Diagnostic, Report};

/// Collects diagnostics in the order they were reported
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an error value
    pub fn report<R: Report + ?Sized>(&mut self, error: &R) {
        self.add(Diagnostic::from_report(error));
    }

    /// Report every error from an iterator, keeping their order
    pub fn report_all<'e, R, I>(&mut self, errors: I)
    where
        R: Report + 'e,
        I: IntoIterator<Item = &'e R>,
    {
        for error in errors {
            self.report(error);
        }
    }

    /// Add an already rendered diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Exit code of the first reported diagnostic, or success when there is none
    pub fn exit_code(&self) -> u8 {
        self.diagnostics
            .first()
            .map_or(exit_codes::SUCCESS, Diagnostic::exit_code)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume and return all diagnostics
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
