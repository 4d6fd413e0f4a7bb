//! Parser module for building expression trees from tokens.

mod ast;
mod error;
mod expression;
mod printer;

pub use ast::*;
pub use error::ParseError;

use crate::diagnostics::DiagnosticReporter;
use crate::lexer::{Token, TokenKind};

/// Recursive descent parser
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    reporter: &'a mut DiagnosticReporter,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token>, reporter: &'a mut DiagnosticReporter) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, "", line, column));
        }

        Self {
            tokens,
            current: 0,
            reporter,
        }
    }

    /// Parse a single expression spanning all tokens
    pub fn parse(&mut self) -> Option<Expr> {
        let result = self.expression().and_then(|expr| {
            // Leftover tokens are an error here instead of being silently dropped.
            if self.is_at_end() {
                Ok(expr)
            } else {
                Err(ParseError::at(self.peek(), "Expect end of expression."))
            }
        });

        match result {
            Ok(expr) => Some(expr),
            Err(error) => {
                self.reporter.report(&error);
                None
            }
        }
    }

    /// Parse a sequence of `;`-terminated expression statements
    pub fn parse_program(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.expression_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    self.reporter.report(&error);
                    self.synchronize();
                }
            }
        }

        statements
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    // === Helper methods ===

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has one of `kinds`
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::at(self.peek(), message))
        }
    }

    /// Error recovery: skip past the next `;`
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.advance().kind == TokenKind::Semicolon {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, Literal};

    fn tok(kind: TokenKind) -> Token {
        let lexeme = match kind {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            _ => kind.fixed_lexeme().unwrap_or_default(),
        };
        Token::new(kind, lexeme, 1, 1)
    }

    fn num(n: f64) -> Token {
        Token::new(TokenKind::Number, n.to_string(), 1, 1).with_literal(Literal::Number(n))
    }

    fn eof() -> Token {
        Token::new(TokenKind::Eof, "", 1, 1)
    }

    fn parse_tokens(tokens: Vec<Token>) -> (Option<Expr>, Vec<String>) {
        let mut reporter = DiagnosticReporter::new();
        let expr = Parser::new(tokens, &mut reporter).parse();
        let messages = reporter.diagnostics().iter().map(|d| d.to_string()).collect();
        (expr, messages)
    }

    #[test]
    fn respects_precedence() {
        // 1 + 2 * 3 == 7
        let (expr, errors) = parse_tokens(vec![
            num(1.0),
            tok(TokenKind::Plus),
            num(2.0),
            tok(TokenKind::Star),
            num(3.0),
            tok(TokenKind::EqualEqual),
            num(7.0),
            eof(),
        ]);
        assert!(errors.is_empty());
        assert_eq!(expr.unwrap().to_string(), "(== (+ 1.0 (* 2.0 3.0)) 7.0)");
    }

    #[test]
    fn binary_operators_associate_left() {
        let (expr, _) = parse_tokens(vec![
            num(8.0),
            tok(TokenKind::Minus),
            num(4.0),
            tok(TokenKind::Minus),
            num(2.0),
            eof(),
        ]);
        assert_eq!(expr.unwrap().to_string(), "(- (- 8.0 4.0) 2.0)");
    }

    #[test]
    fn unary_nests_and_groups() {
        let (expr, _) = parse_tokens(vec![
            tok(TokenKind::Bang),
            tok(TokenKind::Bang),
            tok(TokenKind::LeftParen),
            tok(TokenKind::True),
            tok(TokenKind::LessEqual),
            tok(TokenKind::Nil),
            tok(TokenKind::RightParen),
            eof(),
        ]);
        assert_eq!(expr.unwrap().to_string(), "(! (! (group (<= true nil))))");
    }

    #[test]
    fn reports_missing_operand_at_end() {
        let (tokens, _) = tokenize("(");
        let (expr, errors) = parse_tokens(tokens);
        assert!(expr.is_none());
        assert_eq!(errors, vec!["[line 1] Error at end: Expect expression."]);
    }

    #[test]
    fn reports_unclosed_group() {
        let (expr, errors) = parse_tokens(vec![tok(TokenKind::LeftParen), tok(TokenKind::False), eof()]);
        assert!(expr.is_none());
        assert_eq!(errors, vec!["[line 1] Error at end: Expect ')' after expression."]);
    }

    #[test]
    fn reports_unexpected_token_with_lexeme() {
        let (tokens, _) = tokenize("\n)");
        let (_, errors) = parse_tokens(tokens);
        assert_eq!(errors, vec!["[line 2] Error at ')': Expect expression."]);
    }

    #[test]
    fn rejects_trailing_tokens() {
        let (_, errors) = parse_tokens(vec![tok(TokenKind::True), tok(TokenKind::False), eof()]);
        assert_eq!(errors, vec!["[line 1] Error at 'false': Expect end of expression."]);
    }

    #[test]
    fn program_recovers_after_bad_statement() {
        let mut reporter = DiagnosticReporter::new();
        let tokens = vec![
            tok(TokenKind::Plus),
            tok(TokenKind::Semicolon),
            tok(TokenKind::Nil),
            tok(TokenKind::Semicolon),
            tok(TokenKind::True),
            eof(),
        ];
        let program = Parser::new(tokens, &mut reporter).parse_program();
        assert_eq!(program, vec![Stmt::Expression(Expr::Literal(LiteralValue::Nil))]);
        let messages: Vec<_> = reporter.diagnostics().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "[line 1] Error at '+': Expect expression.",
                "[line 1] Error at end: Expect ';' after expression.",
            ]
        );
    }

    #[test]
    fn missing_eof_is_tolerated() {
        let (expr, errors) = parse_tokens(vec![tok(TokenKind::Nil)]);
        assert!(errors.is_empty());
        assert_eq!(expr, Some(Expr::Literal(LiteralValue::Nil)));

        let (expr, errors) = parse_tokens(Vec::new());
        assert!(expr.is_none());
        assert_eq!(errors, vec!["[line 1] Error at end: Expect expression."]);
    }
}
