//! Expression parser.
//! Precedence climbs from equality down to primary expressions.

use super::{Expr, LiteralValue, ParseError, Parser};
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        self.equality()
    }

    /// Parse equality: a == b, a != b
    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// Parse comparison: a < b, a <= b, a > b, a >= b
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// Parse additive: a + b, a - b
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// Parse multiplicative: a * b, a / b
    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// Parse unary: !a, -a
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(operator) = self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let right = self.unary()?;
            return Ok(Expr::unary(operator, right));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();

        let value = match (token.kind, &token.literal) {
            (TokenKind::Number | TokenKind::String, Some(literal)) => {
                LiteralValue::from(literal.clone())
            }
            (TokenKind::True, _) => LiteralValue::Bool(true),
            (TokenKind::False, _) => LiteralValue::Bool(false),
            (TokenKind::Nil, _) => LiteralValue::Nil,
            (TokenKind::LeftParen, _) => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::grouping(inner));
            }
            _ => return Err(ParseError::at(&token, "Expect expression.")),
        };

        self.advance();
        Ok(Expr::Literal(value))
    }
}
