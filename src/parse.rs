use crate::expression::RealExpression;
use crate::FloatExt;

use once_cell::sync::Lazy;
use pest::iterators::Pairs;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"] // relative to project `src`
struct ExpressionParser;

pub type ParseError = pest::error::Error<Rule>;

/// Characters that survive [`sanitize`].
pub fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '(' | ')' | '+' | '-' | '*' | '/')
}

/// Drops every character the grammar has no use for.
///
/// This is a filter, not a validator: `"2 + x"` becomes `"2+"`, which still
/// fails to parse.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| is_expression_char(*c)).collect()
}

impl<Real: FloatExt> RealExpression<Real> {
    /// Parse the expression from `input`.
    ///
    /// `input` must already be sanitized; whitespace and any other character
    /// outside the grammar is a parse error here.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut pairs = ExpressionParser::parse(Rule::calculation, input)?;
        match pairs.next() {
            Some(root) if root.as_rule() == Rule::real_expr => Ok(parse_recursive(root.into_inner())),
            other => panic!("Unexpected top-level pair {other:?}"),
        }
    }
}

static PRATT_PARSER: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    use Assoc::*;
    use Rule::*;

    PrattParser::new()
        .op(Op::infix(add, Left) | Op::infix(subtract, Left))
        .op(Op::infix(multiply, Left) | Op::infix(divide, Left))
        .op(Op::prefix(neg))
});

fn parse_recursive<Real: FloatExt>(pairs: Pairs<Rule>) -> RealExpression<Real> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::real_expr => parse_recursive(primary.into_inner()),
            Rule::real_literal => {
                let literal_str = primary.as_str();
                if let Ok(value) = literal_str.parse::<Real>() {
                    return RealExpression::Literal(value);
                }
                panic!("Unexpected literal: {}", literal_str)
            }
            x => panic!("Unexpected primary rule {x:?}"),
        })
        .map_prefix(|op, only| match op.as_rule() {
            Rule::neg => RealExpression::Neg(Box::new(only)),
            x => panic!("Unexpected prefix operator {x:?}"),
        })
        .map_infix(|lhs, op, rhs| match op.as_rule() {
            Rule::add => RealExpression::Add(Box::new(lhs), Box::new(rhs)),
            Rule::subtract => RealExpression::Sub(Box::new(lhs), Box::new(rhs)),
            Rule::multiply => RealExpression::Mul(Box::new(lhs), Box::new(rhs)),
            Rule::divide => RealExpression::Div(Box::new(lhs), Box::new(rhs)),
            x => panic!("Unexpected operator {x:?}"),
        })
        .parse(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: f64) -> Box<RealExpression<f64>> {
        Box::new(RealExpression::Literal(value))
    }

    #[test]
    fn sanitize_keeps_only_arithmetic() {
        assert_eq!(sanitize("12 + 3"), "12+3");
        assert_eq!(sanitize("alert(1)*2"), "(1)*2");
        assert_eq!(sanitize("1.5e3"), "1.53");
        assert_eq!(sanitize("√9"), "9");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn parse_precedence() {
        let parsed = RealExpression::<f64>::parse("1+2*3").unwrap();
        assert_eq!(
            parsed,
            RealExpression::Add(
                literal(1.0),
                Box::new(RealExpression::Mul(literal(2.0), literal(3.0)))
            )
        );
    }

    #[test]
    fn parse_left_associative() {
        let parsed = RealExpression::<f64>::parse("8-4-2").unwrap();
        assert_eq!(
            parsed,
            RealExpression::Sub(
                Box::new(RealExpression::Sub(literal(8.0), literal(4.0))),
                literal(2.0)
            )
        );
    }

    #[test]
    fn parse_unary_minus() {
        let parsed = RealExpression::<f64>::parse("-(2+3)").unwrap();
        assert_eq!(
            parsed,
            RealExpression::Neg(Box::new(RealExpression::Add(literal(2.0), literal(3.0))))
        );
        RealExpression::<f64>::parse("5*-2").unwrap();
        RealExpression::<f64>::parse("(-5)").unwrap();
    }

    #[test]
    fn parse_partial_literals() {
        assert_eq!(RealExpression::<f64>::parse("5.").unwrap(), *literal(5.0));
        assert_eq!(RealExpression::<f64>::parse(".5").unwrap(), *literal(0.5));
        assert_eq!(RealExpression::<f64>::parse("007").unwrap(), *literal(7.0));
    }

    #[test]
    fn parse_rejects_malformed() {
        for input in ["", "5+", "+5", "(2", "2)", "2(3)", "(2)3", "--3", "1..2", "()", "*"] {
            assert!(
                RealExpression::<f64>::parse(input).is_err(),
                "{input:?} should not parse"
            );
        }
    }
}
