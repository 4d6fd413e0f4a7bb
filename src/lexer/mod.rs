//! Lexer module for tokenizing source text.
//!
//! Fixed-length lexemes are recognised by a [`StateMachine`] walking a [`TransitionGraph`] built
//! from a [`Catalog`]. The [`Source`] it reads from can be rewound to any [`Cursor`], which lets
//! the machine explore ahead and then commit only the longest match. Numbers, strings and
//! identifiers never reach the graph: the [`Scanner`] hands characters the machine rejects to
//! [`scan_literal`].

mod cursor;
mod error;
mod graph;
mod literal;
mod matcher;
mod scanner;
mod source;
mod token;

pub use cursor::Cursor;
pub use error::{LexError, ScanError};
pub use graph::{Catalog, CatalogEntry, State, StateId, Successors, Terminal, TransitionGraph};
pub use matcher::StateMachine;
pub use scanner::{tokenize, Scanner};
pub use source::Source;
pub use literal::scan_literal;
pub use token::{lookup_keyword, Literal, Token, TokenKind};
