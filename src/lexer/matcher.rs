//! Longest-match resolution over the transition graph.

use tracing::trace;

use super::cursor::Cursor;
use super::graph::{Catalog, StateId, TransitionGraph};
use super::source::Source;
use super::token::{Token, TokenKind};

/// A terminal reached while expanding the frontier
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    kind: TokenKind,
    order: usize,
    lexeme: String,
    length: usize,
}

impl Candidate {
    /// Longer lexemes win; equal lengths fall back to catalog order.
    fn beats(&self, other: &Candidate) -> bool {
        self.length > other.length || (self.length == other.length && self.order < other.order)
    }
}

/// Matches catalog lexemes against a [`Source`].
///
/// The graph is built once in the constructor and only read afterwards, so one machine can serve
/// any number of scanners, including ones running on other threads.
#[derive(Debug)]
pub struct StateMachine {
    graph: TransitionGraph,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self::with_catalog(&Catalog::standard())
    }

    pub fn with_catalog(catalog: &Catalog) -> Self {
        Self {
            graph: TransitionGraph::build(catalog),
        }
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Match the next token, leaving the source positioned right after it.
    ///
    /// Returns a [`TokenKind::Eof`] token once only whitespace and comments remain. Characters
    /// that start no catalog lexeme come back as single-character [`TokenKind::Unexpected`]
    /// tokens; the source always moves forward by at least one character otherwise.
    pub fn match_next(&self, source: &mut Source) -> Token {
        loop {
            source.skip_whitespace();
            if source.at_end() {
                return Token::eof(source.end_position());
            }
            if !Self::skip_line_comment(source) {
                break;
            }
        }

        let start = source.position();
        let first = source.peek();

        if !self.graph.has_transition(self.graph.root(), first) {
            source.advance();
            return Self::unexpected(first, start);
        }

        let token = match self.longest_candidate(source) {
            Some(candidate) => {
                source.seek(start);
                source.advance_by(candidate.length);
                Token::at(candidate.kind, candidate.lexeme, start)
            }
            None => {
                source.seek(start);
                source.advance();
                Self::unexpected(first, start)
            }
        };

        trace!(kind = %token.kind, lexeme = %token.lexeme, at = %start, "matched token");
        token
    }

    fn unexpected(c: char, at: Cursor) -> Token {
        Token::at(TokenKind::Unexpected, c.to_string(), at)
    }

    /// Discards a `//` comment through its line break. Rewinds and returns false if the source
    /// does not start with one.
    fn skip_line_comment(source: &mut Source) -> bool {
        let mark = source.position();
        if source.consume() == '/' && source.consume() == '/' {
            source.skip_line();
            return true;
        }
        source.seek(mark);
        false
    }

    /// Breadth-first expansion from the root. Consumes source characters while exploring; the
    /// caller rewinds afterwards.
    fn longest_candidate(&self, source: &mut Source) -> Option<Candidate> {
        let mut frontier: Vec<(StateId, String)> = vec![(self.graph.root(), String::new())];
        let mut best: Option<Candidate> = None;
        let mut depth = 0;

        while !frontier.is_empty() && !source.at_end() {
            let symbol = source.consume();
            depth += 1;

            let mut next = Vec::new();
            for (state, lexeme) in &frontier {
                for &successor in self.graph.successors(*state, symbol) {
                    let mut extended = lexeme.clone();
                    extended.push(symbol);

                    if let Some(terminal) = self.graph.terminal(successor) {
                        let candidate = Candidate {
                            kind: terminal.kind,
                            order: terminal.order,
                            lexeme: extended.clone(),
                            length: depth,
                        };
                        if best.as_ref().map_or(true, |current| candidate.beats(current)) {
                            best = Some(candidate);
                        }
                    }

                    next.push((successor, extended));
                }
            }
            frontier = next;
        }

        best
    }
}
