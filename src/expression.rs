use std::fmt;

/// Parsed arithmetic over the keypad's operators.
#[derive(Clone, Debug, PartialEq)]
pub enum RealExpression<Real> {
    // Binary real ops.
    Add(Box<RealExpression<Real>>, Box<RealExpression<Real>>),
    Div(Box<RealExpression<Real>>, Box<RealExpression<Real>>),
    Mul(Box<RealExpression<Real>>, Box<RealExpression<Real>>),
    Sub(Box<RealExpression<Real>>, Box<RealExpression<Real>>),

    // Unary real ops.
    Neg(Box<RealExpression<Real>>),

    // Constant.
    Literal(Real),
}

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The character this operator contributes to the expression text.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Name of the keypad action that produces this operator.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
