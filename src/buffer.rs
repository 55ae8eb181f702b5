//! The editable expression.
//!
//! Input is kept as a list of [`Token`]s and only rendered to text at the
//! boundary. Every key press is lowered to one or more edit commands, which are
//! the only way the token list changes. The buffer upholds these rules:
//!
//! - a number holds digits and at most one decimal point;
//! - two binary operators are never adjacent;
//! - a minus at the start of an operand is a [`Token::Sign`], not an operator.

use std::fmt;

use tracing::trace;

use crate::expression::Operator;
use crate::format::format_number;

/// One lexical unit of the expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Unary minus in front of an operand.
    Sign,
    /// Digits with at most one `.`, possibly trailing (`"5."`).
    Number(String),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

impl Token {
    fn render_into(&self, out: &mut String) {
        match self {
            Self::Sign => out.push('-'),
            Self::Number(digits) => out.push_str(digits),
            Self::Operator(op) => out.push(op.symbol()),
            Self::OpenParen => out.push('('),
            Self::CloseParen => out.push(')'),
        }
    }

    /// True where a fresh operand may begin.
    fn starts_operand(&self) -> bool {
        matches!(self, Self::Sign | Self::Operator(_) | Self::OpenParen)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Edit {
    /// Push a token. A number pushed after a number extends it.
    Append(Token),
    Prepend(Token),
    ReplaceTrailing(Token),
    RemoveTrailing,
    RemoveLeading,
    /// Drop the last rendered character.
    TruncateChar,
    Reset,
}

/// Tokens for the text form of `value`, e.g. `-2.5` is `[Sign, Number("2.5")]`.
fn value_tokens(value: f64) -> Vec<Token> {
    let text = format_number(value);
    match text.strip_prefix('-') {
        Some(magnitude) => vec![Token::Sign, Token::Number(magnitude.to_string())],
        None => vec![Token::Number(text)],
    }
}

/// Expression text under construction plus the "just produced a result" flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    tokens: Vec<Token>,
    just_calculated: bool,
}

impl ExpressionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Set right after a result lands in the buffer; the next digit starts over.
    pub fn just_calculated(&self) -> bool {
        self.just_calculated
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.render_into(&mut out);
        }
        out
    }

    /// The text shown on the main display: `"0"` stands in for nothing.
    pub fn display_text(&self) -> String {
        if self.is_empty() {
            "0".to_string()
        } else {
            self.text()
        }
    }

    fn apply(&mut self, edit: Edit) {
        trace!(?edit, "buffer edit");
        match edit {
            Edit::Append(Token::Number(digits)) => {
                if let Some(Token::Number(trailing)) = self.tokens.last_mut() {
                    trailing.push_str(&digits);
                    return;
                }
                self.tokens.push(Token::Number(digits));
            }
            Edit::Append(token) => self.tokens.push(token),
            Edit::Prepend(token) => self.tokens.insert(0, token),
            Edit::ReplaceTrailing(token) => {
                self.tokens.pop();
                self.tokens.push(token);
            }
            Edit::RemoveTrailing => {
                self.tokens.pop();
            }
            Edit::RemoveLeading => {
                if !self.tokens.is_empty() {
                    self.tokens.remove(0);
                }
            }
            Edit::TruncateChar => {
                if let Some(Token::Number(digits)) = self.tokens.last_mut() {
                    if digits.len() > 1 {
                        digits.pop();
                        return;
                    }
                }
                self.tokens.pop();
            }
            Edit::Reset => {
                self.tokens.clear();
                self.just_calculated = false;
            }
        }
    }

    /// Leave a result consumed without discarding it.
    fn take_result(&mut self) {
        self.just_calculated = false;
    }

    /// Start over if the buffer holds a finished result.
    fn restart_after_result(&mut self) {
        if self.just_calculated {
            self.apply(Edit::Reset);
        }
    }

    pub fn clear(&mut self) {
        self.apply(Edit::Reset);
    }

    pub fn push_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        self.restart_after_result();
        self.apply(Edit::Append(Token::Number(digit.to_string())));
    }

    /// Operators continue from a result. A trailing operator is replaced and
    /// a trailing `.` is dropped. Minus on an empty buffer or after `(` is a
    /// sign; any other operator on an empty buffer does nothing. A non-minus
    /// operator on a lone sign removes the sign rather than leaving `+` or `*`
    /// as the whole buffer.
    pub fn push_operator(&mut self, op: Operator) {
        self.take_result();

        if let Some(Token::Number(digits)) = self.tokens.last() {
            if let Some(whole) = digits.strip_suffix('.') {
                let whole = whole.to_string();
                self.apply(Edit::ReplaceTrailing(Token::Number(whole)));
            }
        }

        if self.tokens.last() == Some(&Token::Sign) {
            if op == Operator::Subtract {
                return;
            }
            self.apply(Edit::TruncateChar);
        }

        match self.tokens.last() {
            None | Some(Token::OpenParen) if op == Operator::Subtract => {
                self.apply(Edit::Append(Token::Sign))
            }
            None => {}
            Some(Token::Operator(_)) => self.apply(Edit::ReplaceTrailing(Token::Operator(op))),
            Some(_) => self.apply(Edit::Append(Token::Operator(op))),
        }
    }

    /// A bare point attaches to a leading zero; a second point in the same
    /// number is ignored.
    pub fn push_dot(&mut self) {
        if self.just_calculated {
            self.apply(Edit::Reset);
            self.apply(Edit::Append(Token::Number("0.".to_string())));
            return;
        }
        match self.tokens.last() {
            None => self.apply(Edit::Append(Token::Number("0.".to_string()))),
            Some(token) if token.starts_operand() => {
                self.apply(Edit::Append(Token::Number("0.".to_string())))
            }
            Some(Token::Number(digits)) if !digits.contains('.') => {
                let extended = format!("{digits}.");
                self.apply(Edit::ReplaceTrailing(Token::Number(extended)));
            }
            Some(_) => {}
        }
    }

    /// Removes one character, or clears everything after a result.
    pub fn backspace(&mut self) {
        if self.just_calculated {
            self.apply(Edit::Reset);
        } else {
            self.apply(Edit::TruncateChar);
        }
    }

    pub fn open_paren(&mut self) {
        self.restart_after_result();
        self.apply(Edit::Append(Token::OpenParen));
    }

    /// Balance is not checked; a stray `)` fails at evaluation time.
    pub fn close_paren(&mut self) {
        if !self.is_empty() {
            self.apply(Edit::Append(Token::CloseParen));
        }
    }

    /// Toggles a sign on the first token only, even when the buffer holds a
    /// longer expression: `"5+3"` becomes `"-5+3"`.
    pub fn toggle_sign(&mut self) {
        match self.tokens.first() {
            None => {}
            Some(Token::Sign) => self.apply(Edit::RemoveLeading),
            Some(_) => self.apply(Edit::Prepend(Token::Sign)),
        }
        trace!(text = %self, "sign toggled");
    }

    /// Replaces the whole buffer with `value`. `arm` marks it as a finished
    /// result.
    pub fn set_value(&mut self, value: f64, arm: bool) {
        self.apply(Edit::Reset);
        for token in value_tokens(value) {
            self.apply(Edit::Append(token));
        }
        self.just_calculated = arm;
    }

    /// Inserts a recalled value: over a finished result it replaces
    /// everything, over a trailing number it replaces that number, anywhere
    /// else it is appended.
    pub fn insert_value(&mut self, value: f64) {
        if self.just_calculated {
            self.set_value(value, false);
            return;
        }
        if let Some(Token::Number(_)) = self.tokens.last() {
            self.apply(Edit::RemoveTrailing);
        }
        let mut tokens = value_tokens(value);
        if self.tokens.last() == Some(&Token::Sign) && tokens.first() == Some(&Token::Sign) {
            // Two signs cancel.
            self.apply(Edit::RemoveTrailing);
            tokens.remove(0);
        }
        for token in tokens {
            self.apply(Edit::Append(token));
        }
    }
}

impl fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
