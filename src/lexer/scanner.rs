//! Scanner that turns source text into tokens.

use std::sync::Arc;

use tracing::debug;

use super::error::{LexError, ScanError};
use super::literal::scan_literal;
use super::matcher::StateMachine;
use super::source::Source;
use super::token::{Token, TokenKind};

/// Single-use scanner producing a token list and a parallel list of lexical errors
pub struct Scanner {
    source: Source,
    machine: Arc<StateMachine>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    scanned: bool,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Self::with_machine(text, Arc::new(StateMachine::new()))
    }

    /// Scan with an existing machine, sharing its transition graph.
    pub fn with_machine(text: &str, machine: Arc<StateMachine>) -> Self {
        Self {
            source: Source::new(text),
            machine,
            tokens: Vec::new(),
            errors: Vec::new(),
            scanned: false,
        }
    }

    /// Tokenize the entire source.
    ///
    /// Unexpected characters are recorded as [`LexError`]s and never stop the pass. The token
    /// list always ends with exactly one end-of-input token. Fails if called a second time.
    pub fn scan(&mut self) -> Result<(), ScanError> {
        if self.scanned {
            return Err(ScanError::AlreadyScanned);
        }
        self.scan_source();
        Ok(())
    }

    /// Scan unless that already happened, then hand back tokens and errors.
    pub fn scan_into_parts(mut self) -> (Vec<Token>, Vec<LexError>) {
        if !self.scanned {
            self.scan_source();
        }
        self.into_parts()
    }

    fn scan_source(&mut self) {
        self.scanned = true;

        loop {
            let token = self.machine.match_next(&mut self.source);
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Unexpected => self.rescan(token),
                _ => self.tokens.push(token),
            }
        }

        self.tokens.push(Token::eof(self.source.end_position()));

        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "scan complete"
        );
    }

    /// Gives a character the machine rejected to the literal pass. It is reported as unexpected
    /// only if that pass declines it too.
    fn rescan(&mut self, rejected: Token) {
        let resume = self.source.position();
        self.source.seek(rejected.cursor());

        match scan_literal(&mut self.source) {
            Some(Ok(token)) => self.tokens.push(token),
            Some(Err(error)) => self.errors.push(error),
            None => {
                self.source.seek(resume);
                self.errors.push(LexError::UnexpectedCharacter {
                    line: rejected.line,
                    lexeme: rejected.lexeme,
                });
            }
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<LexError>) {
        (self.tokens, self.errors)
    }
}

/// Scan `text` with a fresh scanner.
pub fn tokenize(text: &str) -> (Vec<Token>, Vec<LexError>) {
    Scanner::new(text).scan_into_parts()
}
