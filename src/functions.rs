use std::f64::consts::PI;

use crate::error::DomainError;
use crate::format::format_number;

/// Largest `n` whose factorial fits in an `f64`.
pub const MAX_FACTORIAL: u32 = 170;

/// Scientific keys that replace the whole buffer with a function of its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Sqrt,
    Square,
    Reciprocal,
    Sin,
    Cos,
    Tan,
    Factorial,
}

impl UnaryFunction {
    pub const ALL: [UnaryFunction; 7] = [
        UnaryFunction::Sqrt,
        UnaryFunction::Square,
        UnaryFunction::Reciprocal,
        UnaryFunction::Sin,
        UnaryFunction::Cos,
        UnaryFunction::Tan,
        UnaryFunction::Factorial,
    ];

    /// Name of the keypad action.
    pub fn token(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Square => "pow",
            Self::Reciprocal => "inv",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Factorial => "factorial",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.token() == token)
    }

    /// Applies the function, rejecting inputs outside its domain and results
    /// that overflow. Trigonometric functions take degrees.
    pub fn apply(self, value: f64) -> Result<f64, DomainError> {
        let result = match self {
            Self::Sqrt if value < 0.0 => return Err(DomainError::NegativeSqrt(value)),
            Self::Sqrt => value.sqrt(),
            Self::Square => value * value,
            Self::Reciprocal if value == 0.0 => return Err(DomainError::ZeroReciprocal),
            Self::Reciprocal => 1.0 / value,
            Self::Sin => degrees_to_radians(value).sin(),
            Self::Cos => degrees_to_radians(value).cos(),
            Self::Tan => degrees_to_radians(value).tan(),
            Self::Factorial => factorial(value)?,
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(DomainError::NonFinite {
                function: self.token(),
                input: value,
            })
        }
    }

    /// How the operation reads on the expression line, e.g. `√(9)` or `5!`.
    pub fn label(self, value: f64) -> String {
        let v = format_number(value);
        match self {
            Self::Sqrt => format!("√({v})"),
            Self::Square => format!("{v}²"),
            Self::Reciprocal => format!("1/{v}"),
            Self::Sin => format!("sin({v}°)"),
            Self::Cos => format!("cos({v}°)"),
            Self::Tan => format!("tan({v}°)"),
            Self::Factorial => format!("{v}!"),
        }
    }
}

fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// `n!` as the running product `1 * 2 * ... * n`; `0! = 1`.
pub fn factorial(n: f64) -> Result<f64, DomainError> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(DomainError::InvalidFactorial(n));
    }
    if n > f64::from(MAX_FACTORIAL) {
        return Err(DomainError::NonFinite {
            function: UnaryFunction::Factorial.token(),
            input: n,
        });
    }
    let mut product = 1.0;
    for i in 1..=(n as u32) {
        product *= f64::from(i);
    }
    Ok(product)
}
