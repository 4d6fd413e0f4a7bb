//! Token definitions for the loxscan lexer.

use std::fmt;

use super::cursor::Cursor;

/// A token with its kind, lexeme, decoded literal and 1-based position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            column,
        }
    }

    /// Build a token positioned at a zero-based cursor.
    pub fn at(kind: TokenKind, lexeme: impl Into<String>, cursor: Cursor) -> Self {
        Self::new(kind, lexeme, cursor.display_line(), cursor.display_column())
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        debug_assert!(self.kind.requires_literal());
        self.literal = Some(literal);
        self
    }

    /// Zero-based position of the token's first character
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.line.saturating_sub(1), self.column.saturating_sub(1))
    }

    pub fn eof(cursor: Cursor) -> Self {
        Self::at(TokenKind::Eof, "", cursor)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Renders `<KIND> <lexeme> <literal>`, with `null` standing in for a missing literal.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

/// Decoded value carried by literal tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{:.1}", n),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => f.write_str(s),
        }
    }
}

/// All token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural punctuation
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    Comma,          // ,
    Dot,            // .
    Semicolon,      // ;

    // One-character operators
    Minus,          // -
    Plus,           // +
    Slash,          // /
    Star,           // *
    Bang,           // !
    Equal,          // =
    Greater,        // >
    Less,           // <

    // Two-character operators
    BangEqual,      // !=
    EqualEqual,     // ==
    GreaterEqual,   // >=
    LessEqual,      // <=

    // Variable-length kinds, read by the literal pass rather than the automaton
    Number,
    String,
    Identifier,

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // Special
    Eof,
    Unexpected,
}

impl TokenKind {
    /// Upper-case name used in token listings
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::Equal => "EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::Less => "LESS",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
            TokenKind::Unexpected => "UNEXPECTED",
        }
    }

    /// Check if tokens of this kind carry a decoded [`Literal`]
    pub fn requires_literal(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::String)
    }

    /// Check if this kind has a single fixed spelling
    pub fn is_fixed_length(&self) -> bool {
        self.fixed_lexeme().is_some()
    }

    /// The spelling of fixed-length kinds
    pub fn fixed_lexeme(&self) -> Option<&'static str> {
        let lexeme = match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Bang => "!",
            TokenKind::Equal => "=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::BangEqual => "!=",
            TokenKind::EqualEqual => "==",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LessEqual => "<=",
            _ => return None,
        };
        Some(lexeme)
    }
}

/// Keyword kind for a reserved word
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "and" => Some(TokenKind::And),
        "class" => Some(TokenKind::Class),
        "else" => Some(TokenKind::Else),
        "false" => Some(TokenKind::False),
        "for" => Some(TokenKind::For),
        "fun" => Some(TokenKind::Fun),
        "if" => Some(TokenKind::If),
        "nil" => Some(TokenKind::Nil),
        "or" => Some(TokenKind::Or),
        "print" => Some(TokenKind::Print),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "this" => Some(TokenKind::This),
        "true" => Some(TokenKind::True),
        "var" => Some(TokenKind::Var),
        "while" => Some(TokenKind::While),
        _ => None,
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_absent_literal_as_null() {
        let token = Token::new(TokenKind::LeftParen, "(", 1, 1);
        assert_eq!(token.to_string(), "LEFT_PAREN ( null");
        assert_eq!(Token::eof(Cursor::default()).to_string(), "EOF  null");
    }

    #[test]
    fn renders_literals() {
        let number = Token::new(TokenKind::Number, "42", 1, 1).with_literal(Literal::Number(42.0));
        assert_eq!(number.to_string(), "NUMBER 42 42.0");

        let fraction = Token::new(TokenKind::Number, "1.25", 1, 1).with_literal(Literal::Number(1.25));
        assert_eq!(fraction.to_string(), "NUMBER 1.25 1.25");

        let string = Token::new(TokenKind::String, "\"hi\"", 1, 1)
            .with_literal(Literal::String("hi".into()));
        assert_eq!(string.to_string(), "STRING \"hi\" hi");
    }

    #[test]
    fn cursor_position_becomes_one_based() {
        let token = Token::at(TokenKind::Star, "*", Cursor::new(2, 4));
        assert_eq!((token.line, token.column), (3, 5));
    }

    #[test]
    fn cursor_round_trips_through_display_position() {
        let at = Cursor::new(4, 0);
        assert_eq!(Token::at(TokenKind::Dot, ".", at).cursor(), at);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(lookup_keyword("while"), Some(TokenKind::While));
        assert_eq!(lookup_keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(lookup_keyword("While"), None);
        assert_eq!(lookup_keyword("whiles"), None);
    }

    #[test]
    fn only_operators_and_punctuation_are_fixed_length() {
        assert_eq!(TokenKind::GreaterEqual.fixed_lexeme(), Some(">="));
        assert!(TokenKind::Dot.is_fixed_length());
        assert!(!TokenKind::Number.is_fixed_length());
        assert!(!TokenKind::Eof.is_fixed_length());
        assert!(!TokenKind::Unexpected.is_fixed_length());
    }
}
