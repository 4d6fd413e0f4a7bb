//! Transition graph over fixed-length lexemes.
//!
//! The graph is an arena of [`State`]s addressed by [`StateId`]. It is built once from a
//! [`Catalog`] and never mutated afterwards, so a single graph can be shared read-only between
//! any number of scans.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::token::TokenKind;

/// Index of a state in the graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(u32);

impl StateId {
    pub const ROOT: StateId = StateId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tag carried by a state that completes a catalog lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub kind: TokenKind,
    /// Registration order of the catalog entry; lower wins ties.
    pub order: usize,
}

/// Successor set for one `(state, char)` pair
pub type Successors = SmallVec<[StateId; 2]>;

#[derive(Debug, Default)]
pub struct State {
    terminal: Option<Terminal>,
    next: HashMap<char, Successors>,
}

impl State {
    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }
}

/// One literal lexeme and the kind it produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub lexeme: String,
    pub kind: TokenKind,
}

/// Ordered list of lexemes the graph is built from
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Single-character kinds in declaration order, followed by the two-character operators.
    const STANDARD_KINDS: [TokenKind; 19] = [
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Semicolon,
        TokenKind::Slash,
        TokenKind::Star,
        TokenKind::Bang,
        TokenKind::Equal,
        TokenKind::Greater,
        TokenKind::Less,
        TokenKind::BangEqual,
        TokenKind::EqualEqual,
        TokenKind::GreaterEqual,
        TokenKind::LessEqual,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self::STANDARD_KINDS
            .iter()
            .filter_map(|kind| kind.fixed_lexeme().map(|lexeme| (lexeme, *kind)))
            .fold(Self::new(), |catalog, (lexeme, kind)| catalog.with(lexeme, kind))
    }

    pub fn with(mut self, lexeme: impl Into<String>, kind: TokenKind) -> Self {
        self.entries.push(CatalogEntry {
            lexeme: lexeme.into(),
            kind,
        });
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable trie-shaped automaton with set-valued transitions
#[derive(Debug)]
pub struct TransitionGraph {
    states: Vec<State>,
}

impl TransitionGraph {
    pub fn build(catalog: &Catalog) -> Self {
        let mut graph = Self {
            states: vec![State::default()],
        };

        for (order, entry) in catalog.entries().iter().enumerate() {
            let chars: Vec<char> = entry.lexeme.chars().collect();
            let Some((&last, prefix)) = chars.split_last() else {
                warn!(kind = %entry.kind, order, "skipping empty catalog lexeme");
                continue;
            };

            let mut current = StateId::ROOT;
            for &c in prefix {
                current = graph.successor_or_insert(current, c);
            }
            graph.terminate(current, last, Terminal { kind: entry.kind, order });
        }

        debug!(
            entries = catalog.len(),
            states = graph.states.len(),
            "built transition graph"
        );
        graph
    }

    pub fn root(&self) -> StateId {
        StateId::ROOT
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn terminal(&self, id: StateId) -> Option<Terminal> {
        self.state(id).terminal
    }

    pub fn successors(&self, id: StateId, c: char) -> &[StateId] {
        match self.state(id).next.get(&c) {
            Some(set) => set.as_slice(),
            None => &[],
        }
    }

    pub fn has_transition(&self, id: StateId, c: char) -> bool {
        !self.successors(id, c).is_empty()
    }

    fn push_state(&mut self, terminal: Option<Terminal>) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State {
            terminal,
            next: HashMap::new(),
        });
        id
    }

    fn link(&mut self, from: StateId, c: char, to: StateId) {
        let set = self.states[from.index()].next.entry(c).or_default();
        if !set.contains(&to) {
            set.push(to);
        }
    }

    /// Follows a shared prefix, creating the state if no path exists yet.
    fn successor_or_insert(&mut self, from: StateId, c: char) -> StateId {
        if let Some(&existing) = self.successors(from, c).first() {
            return existing;
        }
        let id = self.push_state(None);
        self.link(from, c, id);
        id
    }

    /// Tags the state reached by `c`. A state already completing a different kind is left alone
    /// and a sibling is added to the successor set instead.
    fn terminate(&mut self, from: StateId, c: char, terminal: Terminal) {
        let reusable = self.successors(from, c).iter().copied().find(|&id| {
            self.terminal(id)
                .map_or(true, |existing| existing.kind == terminal.kind)
        });

        match reusable {
            Some(id) => {
                let state = &mut self.states[id.index()];
                if state.terminal.is_none() {
                    state.terminal = Some(terminal);
                }
            }
            None => {
                let id = self.push_state(Some(terminal));
                self.link(from, c, id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(graph: &TransitionGraph, lexeme: &str) -> Vec<StateId> {
        let mut frontier = vec![graph.root()];
        for c in lexeme.chars() {
            frontier = frontier
                .iter()
                .flat_map(|&id| graph.successors(id, c).iter().copied())
                .collect();
        }
        frontier
    }

    #[test]
    fn standard_catalog_order() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 19);
        assert_eq!(catalog.entries()[0].lexeme, "(");
        assert_eq!(catalog.entries()[15].kind, TokenKind::BangEqual);
        assert_eq!(catalog.entries()[18].lexeme, "<=");
    }

    #[test]
    fn shared_prefixes_reuse_states() {
        let graph = TransitionGraph::build(&Catalog::standard());
        // Root, fifteen single characters, four second characters.
        assert_eq!(graph.state_count(), 20);

        let equal = walk(&graph, "=");
        assert_eq!(equal.len(), 1);
        assert_eq!(graph.terminal(equal[0]).map(|t| t.kind), Some(TokenKind::Equal));

        let equal_equal = walk(&graph, "==");
        assert_eq!(equal_equal.len(), 1);
        assert_eq!(
            graph.terminal(equal_equal[0]).map(|t| t.kind),
            Some(TokenKind::EqualEqual)
        );
    }

    #[test]
    fn every_standard_lexeme_reaches_its_terminal() {
        let catalog = Catalog::standard();
        let graph = TransitionGraph::build(&catalog);
        for (order, entry) in catalog.entries().iter().enumerate() {
            let reached = walk(&graph, &entry.lexeme);
            assert_eq!(
                reached
                    .iter()
                    .filter_map(|&id| graph.terminal(id))
                    .collect::<Vec<_>>(),
                vec![Terminal { kind: entry.kind, order }],
                "lexeme {:?}",
                entry.lexeme
            );
        }
    }

    #[test]
    fn diverging_kinds_keep_set_semantics() {
        let catalog = Catalog::new()
            .with("ab", TokenKind::Identifier)
            .with("ab", TokenKind::Number)
            .with("abc", TokenKind::String);
        let graph = TransitionGraph::build(&catalog);

        let a = walk(&graph, "a");
        assert_eq!(graph.successors(a[0], 'b').len(), 2);

        let kinds: Vec<_> = walk(&graph, "ab")
            .iter()
            .filter_map(|&id| graph.terminal(id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Terminal { kind: TokenKind::Identifier, order: 0 },
                Terminal { kind: TokenKind::Number, order: 1 },
            ]
        );
        assert_eq!(walk(&graph, "abc").len(), 1);
    }

    #[test]
    fn duplicate_entry_keeps_first_registration() {
        let catalog = Catalog::new()
            .with("+", TokenKind::Plus)
            .with("+", TokenKind::Plus);
        let graph = TransitionGraph::build(&catalog);
        assert_eq!(graph.state_count(), 2);
        let plus = walk(&graph, "+");
        assert_eq!(graph.terminal(plus[0]).map(|t| t.order), Some(0));
    }

    #[test]
    fn empty_lexemes_are_skipped() {
        let catalog = Catalog::new().with("", TokenKind::Dot).with(".", TokenKind::Dot);
        let graph = TransitionGraph::build(&catalog);
        assert_eq!(graph.state_count(), 2);
        assert!(graph.terminal(graph.root()).is_none());
        assert!(graph.has_transition(graph.root(), '.'));
    }
}
