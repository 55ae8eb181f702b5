use std::path::PathBuf;

use thiserror::Error;

use crate::parse::ParseError;

/// The buffer text could not be turned into a finite number.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("nothing to evaluate")]
    Empty,
    #[error("malformed expression: {0}")]
    Malformed(Box<ParseError>),
    #[error("result is not finite: {0}")]
    NonFinite(f64),
    #[error("expression has {operations} operations, limit is {limit}")]
    TooComplex { operations: usize, limit: usize },
}

impl From<ParseError> for EvaluationError {
    fn from(err: ParseError) -> Self {
        Self::Malformed(Box::new(err))
    }
}

/// A function was applied outside the values it is defined for.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("square root of negative number {0}")]
    NegativeSqrt(f64),
    #[error("reciprocal of zero")]
    ZeroReciprocal,
    #[error("factorial needs a non-negative integer, got {0}")]
    InvalidFactorial(f64),
    #[error("{function} of {input} is not finite")]
    NonFinite { function: &'static str, input: f64 },
}

/// Financial form input was missing or out of range.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
