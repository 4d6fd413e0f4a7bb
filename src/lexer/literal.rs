//! Second scanning pass for variable-length lexemes.
//!
//! The transition graph only knows fixed spellings. Numbers, quoted strings and identifiers are
//! read here instead, starting from a character the graph rejected.

use unicode_xid::UnicodeXID;

use super::error::LexError;
use super::source::Source;
use super::token::{lookup_keyword, Literal, Token, TokenKind};

/// Read a number, string, identifier or keyword at the current position.
///
/// Returns `None` without moving if the current character starts none of them. A string with no
/// closing quote consumes the rest of the input and comes back as an error.
pub fn scan_literal(source: &mut Source) -> Option<Result<Token, LexError>> {
    if source.at_end() {
        return None;
    }

    match source.peek() {
        '"' => Some(scan_string(source)),
        c if c.is_ascii_digit() => Some(Ok(scan_number(source))),
        c if is_ident_start(c) => Some(Ok(scan_identifier(source))),
        _ => None,
    }
}

fn scan_number(source: &mut Source) -> Token {
    let start = source.position();
    let mut lexeme = String::new();

    while source.peek().is_ascii_digit() {
        lexeme.push(source.consume());
    }

    // A fraction needs at least one digit after the dot
    if source.peek() == '.' && source.peek_next().is_ascii_digit() {
        lexeme.push(source.consume());
        while source.peek().is_ascii_digit() {
            lexeme.push(source.consume());
        }
    }

    let value = lexeme.parse().unwrap_or_default();
    Token::at(TokenKind::Number, lexeme, start).with_literal(Literal::Number(value))
}

/// Strings may span lines; the line breaks become part of the value.
fn scan_string(source: &mut Source) -> Result<Token, LexError> {
    let start = source.position();
    source.advance();

    let mut text = String::new();
    while !source.at_end() && source.peek() != '"' {
        text.push(source.consume());
    }

    if source.at_end() {
        return Err(LexError::UnterminatedString {
            line: source.end_position().display_line(),
        });
    }
    source.advance();

    let lexeme = format!("\"{}\"", text);
    Ok(Token::at(TokenKind::String, lexeme, start).with_literal(Literal::String(text)))
}

fn scan_identifier(source: &mut Source) -> Token {
    let start = source.position();
    let mut ident = String::new();

    while is_ident_continue(source.peek()) {
        ident.push(source.consume());
    }

    let kind = lookup_keyword(&ident).unwrap_or(TokenKind::Identifier);
    Token::at(kind, ident, start)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_continue(c)
}
