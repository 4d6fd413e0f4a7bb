//! Driver that orchestrates the scan / parse / evaluate pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::interpreter::Interpreter;
use crate::lexer::{Scanner, StateMachine, Token};
use crate::parser::Parser;

/// Pipeline stage to run a source through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tokenize,
    Parse,
    Evaluate,
    Run,
}

/// What a pipeline run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Lines for standard output
    pub stdout: Vec<String>,
    /// Errors in the order they were found, one per line of standard error
    pub diagnostics: Vec<Diagnostic>,
    pub exit_code: u8,
}

impl Outcome {
    fn new(stdout: Vec<String>, reporter: DiagnosticReporter) -> Self {
        let exit_code = reporter.exit_code();
        Self {
            stdout,
            diagnostics: reporter.take_diagnostics(),
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// The pipeline driver
pub struct Driver {
    file: String,
    source: String,
    machine: Arc<StateMachine>,
    dump_tokens: bool,
}

impl Driver {
    pub fn new(file: String, source: String) -> Self {
        Self::with_machine(file, source, Arc::new(StateMachine::new()))
    }

    /// Reuse a machine, and with it the transition graph, across drivers.
    pub fn with_machine(file: String, source: String, machine: Arc<StateMachine>) -> Self {
        Self {
            file,
            source,
            machine,
            dump_tokens: false,
        }
    }

    /// Print the token stream to stderr before parsing
    pub fn set_dump_tokens(&mut self, enabled: bool) {
        self.dump_tokens = enabled;
    }

    pub fn execute(&self, command: Command) -> Outcome {
        info!(file = %self.file, ?command, "running pipeline");
        match command {
            Command::Tokenize => self.tokenize(),
            Command::Parse => self.parse(),
            Command::Evaluate => self.evaluate(),
            Command::Run => self.run(),
        }
    }

    /// Print every token, errors or not
    pub fn tokenize(&self) -> Outcome {
        let mut reporter = DiagnosticReporter::new();
        let tokens = self.scan(&mut reporter);
        let stdout = tokens.iter().map(Token::to_string).collect();
        Outcome::new(stdout, reporter)
    }

    /// Print the expression tree, if one could be built
    pub fn parse(&self) -> Outcome {
        let mut reporter = DiagnosticReporter::new();
        let tokens = self.scan(&mut reporter);
        let expr = Parser::new(tokens, &mut reporter).parse();
        let stdout = expr.map(|e| e.to_string()).into_iter().collect();
        Outcome::new(stdout, reporter)
    }

    /// Print the value of the expression. Nothing is evaluated after a lexical or syntax error.
    pub fn evaluate(&self) -> Outcome {
        let mut reporter = DiagnosticReporter::new();
        let tokens = self.scan(&mut reporter);
        let expr = Parser::new(tokens, &mut reporter).parse();

        let mut stdout = Vec::new();
        if let (Some(expr), false) = (expr, reporter.has_errors()) {
            match Interpreter::new().evaluate(&expr) {
                Ok(value) => stdout.push(value.to_string()),
                Err(error) => reporter.report(&error),
            }
        }
        Outcome::new(stdout, reporter)
    }

    /// Execute a program of `;`-terminated statements
    pub fn run(&self) -> Outcome {
        let mut reporter = DiagnosticReporter::new();
        let tokens = self.scan(&mut reporter);
        let program = Parser::new(tokens, &mut reporter).parse_program();

        if !reporter.has_errors() {
            let mut interpreter = Interpreter::new();
            if let Err(error) = interpreter.execute(&program) {
                reporter.report(&error);
            }
            debug!(statements = interpreter.executed(), "program finished");
        }
        Outcome::new(Vec::new(), reporter)
    }

    fn scan(&self, reporter: &mut DiagnosticReporter) -> Vec<Token> {
        let (tokens, errors) =
            Scanner::with_machine(&self.source, Arc::clone(&self.machine)).scan_into_parts();
        reporter.report_all(&errors);

        if self.dump_tokens {
            eprintln!("=== Tokens ===");
            for token in &tokens {
                eprintln!("  {:?}", token);
            }
            eprintln!();
        }

        tokens
    }
}
