//! Parenthesised prefix rendering of expression trees.

use std::fmt;

use super::ast::{Expr, LiteralValue, Stmt};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", operator.lexeme, left, right),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Unary { operator, right } => write!(f, "({} {})", operator.lexeme, right),
        }
    }
}

/// Numbers always show a fractional part, so `1` prints as `1.0`.
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{:.1}", n),
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::String(s) => f.write_str(s),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Nil => f.write_str("nil"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "{};", expr),
        }
    }
}
