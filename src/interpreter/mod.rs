//! Tree-walking evaluator for expression trees.

mod value;

pub use value::Value;

use thiserror::Error;
use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Report};
use crate::lexer::{Token, TokenKind};
use crate::parser::{Expr, Stmt};

/// An error raised while evaluating, located at the operator that failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}\n[line {line}]")]
pub struct RuntimeError {
    pub message: String,
    pub line: usize,
}

impl RuntimeError {
    pub fn at(operator: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: operator.line,
        }
    }
}

impl Report for RuntimeError {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::Runtime
    }
}

/// Evaluates expressions and executes statements
#[derive(Debug, Default)]
pub struct Interpreter {
    executed: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements executed so far
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Execute statements in order, stopping at the first runtime error
    pub fn execute(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            match stmt {
                Stmt::Expression(expr) => {
                    let value = self.evaluate(expr)?;
                    debug!(value = %value, kind = value.type_name(), "evaluated expression statement");
                }
            }
            self.executed += 1;
        }
        Ok(())
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                self.unary(operator, right)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.binary(operator, left, right)
            }
        }
    }

    fn unary(&self, operator: &Token, right: Value) -> Result<Value, RuntimeError> {
        match operator.kind {
            TokenKind::Minus => {
                let n = number_operand(operator, &right)?;
                Ok(Value::Number(-n))
            }
            TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
            _ => Err(unsupported(operator)),
        }
    }

    fn binary(&self, operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
        match operator.kind {
            TokenKind::Plus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeError::at(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },
            TokenKind::Minus => arithmetic(operator, &left, &right, |a, b| a - b),
            TokenKind::Star => arithmetic(operator, &left, &right, |a, b| a * b),
            TokenKind::Slash => arithmetic(operator, &left, &right, |a, b| a / b),
            TokenKind::Greater => comparison(operator, &left, &right, |a, b| a > b),
            TokenKind::GreaterEqual => comparison(operator, &left, &right, |a, b| a >= b),
            TokenKind::Less => comparison(operator, &left, &right, |a, b| a < b),
            TokenKind::LessEqual => comparison(operator, &left, &right, |a, b| a <= b),
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            _ => Err(unsupported(operator)),
        }
    }
}

fn number_operand(operator: &Token, value: &Value) -> Result<f64, RuntimeError> {
    value
        .as_number()
        .ok_or_else(|| RuntimeError::at(operator, "Operand must be a number."))
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::at(operator, "Operands must be numbers.")),
    }
}

fn arithmetic(
    operator: &Token,
    left: &Value,
    right: &Value,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    let (a, b) = number_operands(operator, left, right)?;
    Ok(Value::Number(op(a, b)))
}

fn comparison(
    operator: &Token,
    left: &Value,
    right: &Value,
    op: impl Fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    let (a, b) = number_operands(operator, left, right)?;
    Ok(Value::Bool(op(a, b)))
}

fn unsupported(operator: &Token) -> RuntimeError {
    RuntimeError::at(operator, format!("Unsupported operator '{}'.", operator.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LiteralValue;

    fn op(kind: TokenKind, line: usize) -> Token {
        Token::new(kind, kind.fixed_lexeme().unwrap_or_default(), line, 1)
    }

    fn lit(value: LiteralValue) -> Expr {
        Expr::Literal(value)
    }

    fn num(n: f64) -> Expr {
        lit(LiteralValue::Number(n))
    }

    fn text(s: &str) -> Expr {
        lit(LiteralValue::String(s.into()))
    }

    #[test]
    fn arithmetic_and_grouping() {
        // (1 + 2) * 4 / 8
        let expr = Expr::binary(
            Expr::binary(
                Expr::grouping(Expr::binary(num(1.0), op(TokenKind::Plus, 1), num(2.0))),
                op(TokenKind::Star, 1),
                num(4.0),
            ),
            op(TokenKind::Slash, 1),
            num(8.0),
        );
        assert_eq!(Interpreter::new().evaluate(&expr), Ok(Value::Number(1.5)));
    }

    #[test]
    fn plus_concatenates_strings() {
        let expr = Expr::binary(text("foo"), op(TokenKind::Plus, 1), text("bar"));
        assert_eq!(
            Interpreter::new().evaluate(&expr),
            Ok(Value::String("foobar".into()))
        );
    }

    #[test]
    fn plus_rejects_mixed_operands() {
        let expr = Expr::binary(num(1.0), op(TokenKind::Plus, 4), text("a"));
        let error = Interpreter::new().evaluate(&expr).unwrap_err();
        assert_eq!(error.to_string(), "Operands must be two numbers or two strings.\n[line 4]");
        assert_eq!(error.exit_code(), 70);
    }

    #[test]
    fn comparison_requires_numbers() {
        let expr = Expr::binary(lit(LiteralValue::Bool(true)), op(TokenKind::Less, 2), num(1.0));
        let error = Interpreter::new().evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Operands must be numbers.");
        assert_eq!(error.line, 2);

        let ok = Expr::binary(num(1.0), op(TokenKind::GreaterEqual, 1), num(1.0));
        assert_eq!(Interpreter::new().evaluate(&ok), Ok(Value::Bool(true)));
    }

    #[test]
    fn unary_operators() {
        let interpreter = Interpreter::new();
        let negate = Expr::unary(op(TokenKind::Minus, 1), num(3.0));
        assert_eq!(interpreter.evaluate(&negate), Ok(Value::Number(-3.0)));

        let not_nil = Expr::unary(op(TokenKind::Bang, 1), lit(LiteralValue::Nil));
        assert_eq!(interpreter.evaluate(&not_nil), Ok(Value::Bool(true)));

        let bad = Expr::unary(op(TokenKind::Minus, 3), text("x"));
        assert_eq!(
            interpreter.evaluate(&bad).unwrap_err().to_string(),
            "Operand must be a number.\n[line 3]"
        );
    }

    #[test]
    fn equality_across_types() {
        let interpreter = Interpreter::new();
        let nil_eq_nil = Expr::binary(lit(LiteralValue::Nil), op(TokenKind::EqualEqual, 1), lit(LiteralValue::Nil));
        assert_eq!(interpreter.evaluate(&nil_eq_nil), Ok(Value::Bool(true)));

        let nil_ne_false = Expr::binary(
            lit(LiteralValue::Nil),
            op(TokenKind::BangEqual, 1),
            lit(LiteralValue::Bool(false)),
        );
        assert_eq!(interpreter.evaluate(&nil_ne_false), Ok(Value::Bool(true)));

        let num_eq_text = Expr::binary(num(1.0), op(TokenKind::EqualEqual, 1), text("1"));
        assert_eq!(interpreter.evaluate(&num_eq_text), Ok(Value::Bool(false)));
    }

    #[test]
    fn execute_stops_at_first_error() {
        let mut interpreter = Interpreter::new();
        let program = vec![
            Stmt::Expression(num(1.0)),
            Stmt::Expression(Expr::unary(op(TokenKind::Minus, 2), lit(LiteralValue::Nil))),
            Stmt::Expression(num(2.0)),
        ];
        let error = interpreter.execute(&program).unwrap_err();
        assert_eq!(error.line, 2);
        assert_eq!(interpreter.executed(), 1);
    }
}
