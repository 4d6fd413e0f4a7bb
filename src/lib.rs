//! loxscan - an automaton-driven scanner for a small expression language
//!
//! Source text is tokenized by a longest-match state machine over a transition graph of
//! fixed-length lexemes. A recursive-descent parser and a tree-walking interpreter sit on top.

pub mod diagnostics;
pub mod driver;
pub mod interpreter;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticReporter, Report};
pub use driver::{Command, Driver, Outcome};
pub use interpreter::{Interpreter, RuntimeError, Value};
pub use lexer::{Scanner, StateMachine, Token, TokenKind};
pub use parser::{Expr, ParseError, Parser, Stmt};
