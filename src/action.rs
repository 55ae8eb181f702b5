//! Maps raw input to the semantic actions the session understands.
//!
//! Two sources feed the classifier: named keypad tokens (`"add"`,
//! `"openParen"`, a single digit) and physical keyboard keys (`"Enter"`,
//! `"Backspace"`, `"+"`).

use std::str::FromStr;

use crate::error::UnknownAction;
use crate::expression::Operator;
use crate::financial::FinancialKind;
use crate::functions::UnaryFunction;
use crate::memory::MemoryAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// An ASCII digit, `'0'..='9'`.
    Digit(char),
    Clear,
    Back,
    Dot,
    Operator(Operator),
    Equals,
    Percent,
    PlusMinus,
    Function(UnaryFunction),
    OpenParen,
    CloseParen,
    Financial(FinancialKind),
    Memory(MemoryAction),
    ClearHistory,
}

impl Action {
    /// Keypad token for this action, the inverse of [`str::parse`].
    pub fn token(self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::Clear => "clear".to_string(),
            Self::Back => "back".to_string(),
            Self::Dot => "dot".to_string(),
            Self::Operator(op) => op.token().to_string(),
            Self::Equals => "equals".to_string(),
            Self::Percent => "percent".to_string(),
            Self::PlusMinus => "plusminus".to_string(),
            Self::Function(function) => function.token().to_string(),
            Self::OpenParen => "openParen".to_string(),
            Self::CloseParen => "closeParen".to_string(),
            Self::Financial(kind) => kind.token().to_string(),
            Self::Memory(action) => action.token().to_string(),
            Self::ClearHistory => "clearHistory".to_string(),
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        if let (Some(digit), None) = (chars.next(), chars.next()) {
            if digit.is_ascii_digit() {
                return Ok(Self::Digit(digit));
            }
        }

        let action = match token {
            "clear" => Self::Clear,
            "back" => Self::Back,
            "dot" => Self::Dot,
            "equals" => Self::Equals,
            "percent" => Self::Percent,
            "plusminus" => Self::PlusMinus,
            "openParen" => Self::OpenParen,
            "closeParen" => Self::CloseParen,
            "margin" => Self::Financial(FinancialKind::Margin),
            "markup" => Self::Financial(FinancialKind::Markup),
            "pvfmpt" => Self::Financial(FinancialKind::PresentValue),
            "clearHistory" => Self::ClearHistory,
            other => {
                if let Some(op) = Operator::ALL.into_iter().find(|op| op.token() == other) {
                    Self::Operator(op)
                } else if let Some(function) = UnaryFunction::from_token(other) {
                    Self::Function(function)
                } else if let Some(memory) = MemoryAction::from_token(other) {
                    Self::Memory(memory)
                } else {
                    return Err(UnknownAction(other.to_string()));
                }
            }
        };
        Ok(action)
    }
}

/// Keyboard shortcut for a physical key, if it has one.
pub fn classify_key(key: &str) -> Option<Action> {
    let mut chars = key.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };

    match (key, single) {
        (_, Some(digit @ '0'..='9')) => Some(Action::Digit(digit)),
        (_, Some(symbol @ ('+' | '-' | '*' | '/'))) => {
            Operator::from_symbol(symbol).map(Action::Operator)
        }
        ("Enter", _) | (_, Some('=')) => Some(Action::Equals),
        (_, Some('.')) => Some(Action::Dot),
        ("Backspace", _) => Some(Action::Back),
        (_, Some('c' | 'C')) => Some(Action::Clear),
        (_, Some('%')) => Some(Action::Percent),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_tokens() {
        assert_eq!("7".parse::<Action>().unwrap(), Action::Digit('7'));
        assert_eq!(
            "subtract".parse::<Action>().unwrap(),
            Action::Operator(Operator::Subtract)
        );
        assert_eq!("openParen".parse::<Action>().unwrap(), Action::OpenParen);
        assert_eq!(
            "pow".parse::<Action>().unwrap(),
            Action::Function(UnaryFunction::Square)
        );
        assert_eq!(
            "mplus".parse::<Action>().unwrap(),
            Action::Memory(MemoryAction::Add)
        );
        assert_eq!(
            "markup".parse::<Action>().unwrap(),
            Action::Financial(FinancialKind::Markup)
        );
    }

    #[test]
    fn reject_unknown_tokens() {
        for token in ["", "12", "Add", "openparen", "x", "log"] {
            assert!(token.parse::<Action>().is_err(), "{token:?}");
        }
    }

    #[test]
    fn every_token_round_trips() {
        let mut actions = vec![
            Action::Clear,
            Action::Back,
            Action::Dot,
            Action::Equals,
            Action::Percent,
            Action::PlusMinus,
            Action::OpenParen,
            Action::CloseParen,
            Action::ClearHistory,
            Action::Financial(FinancialKind::Margin),
            Action::Financial(FinancialKind::Markup),
            Action::Financial(FinancialKind::PresentValue),
        ];
        actions.extend(('0'..='9').map(Action::Digit));
        actions.extend(Operator::ALL.map(Action::Operator));
        actions.extend(UnaryFunction::ALL.map(Action::Function));
        actions.extend(MemoryAction::ALL.map(Action::Memory));
        for action in actions {
            assert_eq!(action.token().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn keyboard_keys() {
        assert_eq!(classify_key("5"), Some(Action::Digit('5')));
        assert_eq!(classify_key("/"), Some(Action::Operator(Operator::Divide)));
        assert_eq!(classify_key("Enter"), Some(Action::Equals));
        assert_eq!(classify_key("="), Some(Action::Equals));
        assert_eq!(classify_key("."), Some(Action::Dot));
        assert_eq!(classify_key("Backspace"), Some(Action::Back));
        assert_eq!(classify_key("C"), Some(Action::Clear));
        assert_eq!(classify_key("%"), Some(Action::Percent));
        assert_eq!(classify_key("Escape"), None);
        assert_eq!(classify_key("x"), None);
        assert_eq!(classify_key("("), None);
    }
}
