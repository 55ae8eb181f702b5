use crate::error::EvaluationError;
use crate::expression::RealExpression;
use crate::parse::sanitize;
use crate::FloatExt;

use tracing::trace;

/// Most operators and opening parentheses accepted in one expression. Parsing
/// and evaluation recurse per operation, so longer input is refused up front.
pub const MAX_OPERATIONS: usize = 500;

/// Outcome of evaluating keypad text: a finite value or the reason there is none.
pub type EvaluationResult = Result<f64, EvaluationError>;

impl<Real: FloatExt> RealExpression<Real> {
    /// Calculates the value of the expression with IEEE semantics, so division
    /// by zero yields an infinity rather than failing here.
    pub fn evaluate(&self) -> Real {
        self.evaluate_recursive()
    }

    fn evaluate_recursive(&self) -> Real {
        match self {
            Self::Add(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs + rhs, lhs, rhs),
            Self::Div(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs / rhs, lhs, rhs),
            Self::Literal(value) => *value,
            Self::Mul(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs * rhs, lhs, rhs),
            Self::Neg(only) => evaluate_unary_real_op(|only| -only, only),
            Self::Sub(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs - rhs, lhs, rhs),
        }
    }
}

fn evaluate_binary_real_op<Real: FloatExt>(
    op: fn(Real, Real) -> Real,
    lhs: &RealExpression<Real>,
    rhs: &RealExpression<Real>,
) -> Real {
    op(lhs.evaluate_recursive(), rhs.evaluate_recursive())
}

fn evaluate_unary_real_op<Real: FloatExt>(
    op: fn(Real) -> Real,
    only: &RealExpression<Real>,
) -> Real {
    op(only.evaluate_recursive())
}

/// Sanitizes, parses and evaluates calculator text.
///
/// Anything outside digits, `.`, parentheses and `+ - * /` is stripped first.
/// A result that is not finite (`6/0`, `0/0`) is an error, never a value,
/// and so is text with more than [`MAX_OPERATIONS`] operations.
pub fn evaluate(text: &str) -> EvaluationResult {
    let sanitized = sanitize(text);
    if sanitized.is_empty() {
        return Err(EvaluationError::Empty);
    }
    let operations = sanitized
        .chars()
        .filter(|c| matches!(c, '+' | '-' | '*' | '/' | '('))
        .count();
    if operations > MAX_OPERATIONS {
        return Err(EvaluationError::TooComplex {
            operations,
            limit: MAX_OPERATIONS,
        });
    }
    let value = RealExpression::<f64>::parse(&sanitized)?.evaluate();
    trace!(%sanitized, value, "evaluated");
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFinite(value))
    }
}
