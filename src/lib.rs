//! Keypad calculator engine.
//!
//! A [`CalculatorSession`] turns discrete key presses into an arithmetic
//! expression, evaluates it, and keeps a memory register and a short history
//! of finished calculations. Rendering is left to the host through the
//! [`RenderSink`] trait.
//!
//! Evaluation never hands text to a general-purpose interpreter: the buffer
//! is sanitized and parsed with a small PEG grammar that only knows numeric
//! literals, `+ - * /`, parentheses and a leading minus.
//!
//! # Example
//!
//! ```rust
//! use calcverse::*;
//!
//! let mut session = CalculatorSession::new();
//! let mut sink = RecordingSink::default();
//! for token in ["1", "2", "add", "3", "equals"] {
//!     let action: Action = token.parse().unwrap();
//!     session.apply(action, &mut sink).unwrap();
//! }
//! assert_eq!(sink.result, "15");
//! assert_eq!(
//!     session.history().newest().map(HistoryEntry::as_str),
//!     Some("12+3 = 15")
//! );
//!
//! // The next digit starts a fresh expression.
//! session.apply(Action::Digit('7'), &mut sink).unwrap();
//! assert_eq!(session.expression(), "7");
//! ```

mod action;
mod buffer;
mod config;
mod error;
mod evaluate;
mod expression;
mod financial;
mod format;
mod functions;
mod history;
mod memory;
mod mode;
mod parse;
mod render;
mod session;

/// Uses the [`pest`] parsing expression grammar language.
///
/// ```text
#[doc = include_str!("grammar.pest")]
/// ```
pub mod grammar_doc {}

pub use action::{classify_key, Action};
pub use buffer::{ExpressionBuffer, Token};
pub use config::SessionConfig;
pub use error::*;
pub use evaluate::*;
pub use expression::*;
pub use financial::{margin, markup, FinancialForm, FinancialKind};
pub use format::{format_number, format_percent};
pub use functions::{factorial, UnaryFunction, MAX_FACTORIAL};
pub use history::{HistoryEntry, HistoryLog, DEFAULT_CAPACITY};
pub use memory::{MemoryAction, MemoryRegister};
pub use mode::{Mode, UnknownMode};
pub use parse::{sanitize, ParseError};
pub use render::{RecordingSink, RenderSink};
pub use session::CalculatorSession;

pub trait FloatExt: num_traits::Float + std::str::FromStr + Send + Sync {}
impl FloatExt for f32 {}
impl FloatExt for f64 {}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(session: &mut CalculatorSession, sink: &mut RecordingSink, keys: &[&str]) {
        for key in keys {
            if let Some(action) = classify_key(key) {
                let _ = session.apply(action, sink);
            }
        }
    }

    #[test]
    fn keyboard_session() {
        let mut session = CalculatorSession::new();
        let mut sink = RecordingSink::default();
        type_keys(
            &mut session,
            &mut sink,
            &["1", "2", ".", "5", "*", "2", "Enter"],
        );
        assert_eq!(sink.result, "25");
        assert_eq!(sink.history, ["12.5*2 = 25"]);

        type_keys(&mut session, &mut sink, &["/", "4", "=", "%"]);
        assert_eq!(session.expression(), "0.0625");

        type_keys(&mut session, &mut sink, &["Backspace", "Escape", "c"]);
        assert_eq!(session.expression(), "");
        assert_eq!(sink.result, "0");
    }

    #[test]
    fn digit_sequences_evaluate_unmodified() {
        for digits in ["5", "42", "1234567890", "0"] {
            let mut session = CalculatorSession::new();
            let mut sink = RecordingSink::default();
            let keys: Vec<String> = digits.chars().map(String::from).collect();
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            type_keys(&mut session, &mut sink, &keys);
            assert_eq!(
                evaluate(&session.expression()).unwrap(),
                digits.parse::<f64>().unwrap()
            );
        }
    }

    #[test]
    fn buffer_text_always_parses_or_fails_cleanly() {
        let mut session = CalculatorSession::new();
        let mut sink = RecordingSink::default();
        let script = "1 add subtract dot dot 5 multiply openParen 2 subtract closeParen \
                      plusminus back 3 closeParen equals";
        for token in script.split_whitespace() {
            let _ = session.apply(token.parse().unwrap(), &mut sink);
            // Evaluation may fail, but it never panics on buffer text.
            let _ = evaluate(&session.expression());
        }
        assert_eq!(sink.history, ["-1-0.5*(2-3) = -0.5"]);
    }
}
