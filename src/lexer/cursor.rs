//! Position snapshots into a [`Source`](super::Source).

use std::fmt;

/// A zero-based `(line, column)` position.
///
/// Cursors are plain values: taking one with [`Source::position`](super::Source::position) and
/// handing it back to [`Source::seek`](super::Source::seek) restores the exact scanning state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// 1-based line number, as shown in diagnostics
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// 1-based column number
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.display_column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_line_then_column() {
        assert!(Cursor::new(0, 9) < Cursor::new(1, 0));
        assert!(Cursor::new(2, 1) < Cursor::new(2, 3));
        assert_eq!(Cursor::default(), Cursor::new(0, 0));
    }

    #[test]
    fn displays_one_based() {
        assert_eq!(Cursor::new(0, 0).to_string(), "1:1");
        assert_eq!(Cursor::new(4, 2).to_string(), "5:3");
    }
}
