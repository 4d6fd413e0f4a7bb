//! Line-oriented, rewindable view over source text.

use super::cursor::Cursor;

/// The input text split into lines, plus a current [`Cursor`].
///
/// Each line is stored without its terminator. When the cursor sits one past the last character
/// of a line, [`peek`](Source::peek) reports the line break as `'\n'`; the next advance moves to
/// the start of the following line. Past the last line the source is exhausted and `peek`
/// returns [`Source::EOF`].
#[derive(Debug, Clone)]
pub struct Source {
    lines: Vec<Vec<char>>,
    cursor: Cursor,
}

impl Source {
    pub const EOF: char = '\0';
    pub const LINE_BREAK: char = '\n';

    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(|line| line.chars().collect()).collect(),
            cursor: Cursor::default(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn at_end(&self) -> bool {
        self.cursor.line >= self.lines.len()
    }

    pub fn peek(&self) -> char {
        match self.lines.get(self.cursor.line) {
            None => Self::EOF,
            Some(line) => line.get(self.cursor.column).copied().unwrap_or(Self::LINE_BREAK),
        }
    }

    /// The character after [`peek`](Source::peek), crossing into the next line if needed.
    pub fn peek_next(&self) -> char {
        let Some(line) = self.lines.get(self.cursor.line) else {
            return Self::EOF;
        };
        if self.cursor.column < line.len() {
            return line.get(self.cursor.column + 1).copied().unwrap_or(Self::LINE_BREAK);
        }
        match self.lines.get(self.cursor.line + 1) {
            Some(next) => next.first().copied().unwrap_or(Self::LINE_BREAK),
            None => Self::EOF,
        }
    }

    /// Returns the current character and moves past it.
    pub fn consume(&mut self) -> char {
        let c = self.peek();
        self.advance();
        c
    }

    pub fn position(&self) -> Cursor {
        self.cursor
    }

    pub fn seek(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Position just past the last character of the last line.
    pub fn end_position(&self) -> Cursor {
        match self.lines.last() {
            None => Cursor::default(),
            Some(line) => Cursor::new(self.lines.len() - 1, line.len()),
        }
    }

    /// Moves one character forward. A no-op once the source is exhausted.
    pub fn advance(&mut self) {
        let Some(line) = self.lines.get(self.cursor.line) else {
            return;
        };

        if self.cursor.column >= line.len() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        } else {
            self.cursor.column += 1;
        }
    }

    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Skips blanks, crossing line breaks.
    pub fn skip_whitespace(&mut self) {
        while !self.at_end() && is_whitespace(self.peek()) {
            self.advance();
        }
    }

    /// Discards the rest of the current line, including its line break.
    pub fn skip_line(&mut self) {
        while !self.at_end() && self.peek() != Self::LINE_BREAK {
            self.advance();
        }
        self.advance();
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | Source::LINE_BREAK)
}
