//! Calculator session state machine.
//!
//! One [`CalculatorSession`] owns the expression buffer, memory register,
//! history log and mode. Hosts feed it [`Action`]s one at a time together with
//! a [`RenderSink`]; each call runs to completion and leaves the session in a
//! consistent state even when the action fails.

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::buffer::ExpressionBuffer;
use crate::config::SessionConfig;
use crate::error::CalcError;
use crate::evaluate::evaluate;
use crate::financial::{self, FinancialForm, FinancialKind};
use crate::format::{format_number, format_percent};
use crate::functions::UnaryFunction;
use crate::history::HistoryLog;
use crate::memory::{MemoryAction, MemoryRegister};
use crate::mode::Mode;
use crate::render::RenderSink;

#[derive(Clone, Debug)]
pub struct CalculatorSession {
    buffer: ExpressionBuffer,
    memory: MemoryRegister,
    history: HistoryLog,
    mode: Mode,
    error_indicator: String,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::with_config(&SessionConfig::default())
    }

    pub fn with_config(config: &SessionConfig) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            memory: MemoryRegister::new(),
            history: HistoryLog::new(config.history_capacity),
            mode: config.initial_mode,
            error_indicator: config.error_indicator.clone(),
        }
    }

    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Current expression text.
    pub fn expression(&self) -> String {
        self.buffer.text()
    }

    pub fn just_calculated(&self) -> bool {
        self.buffer.just_calculated()
    }

    pub fn memory(&self) -> f64 {
        self.memory.value()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Applies one action and renders its outcome.
    ///
    /// Errors are already handled when this returns: the sink has been shown
    /// the error indicator where appropriate and the buffer follows the
    /// recovery rule for that error. The `Err` is for callers that want to
    /// know why nothing happened.
    pub fn apply(&mut self, action: Action, sink: &mut impl RenderSink) -> Result<(), CalcError> {
        debug!(action = %action.token(), expression = %self.buffer, "applying action");
        match action {
            Action::Digit(digit) => {
                self.buffer.push_digit(digit);
                self.show_buffer(sink);
            }
            Action::Clear => self.reset(sink),
            Action::Back => {
                if self.buffer.just_calculated() {
                    self.reset(sink);
                } else {
                    self.buffer.backspace();
                    self.show_buffer(sink);
                }
            }
            Action::Dot => {
                self.buffer.push_dot();
                self.show_buffer(sink);
            }
            Action::Operator(op) => {
                self.buffer.push_operator(op);
                sink.show_expression(&self.buffer.text());
                sink.show_result(&op.symbol().to_string());
            }
            Action::Equals => return self.equals(sink),
            Action::Percent => return self.percent(sink),
            Action::PlusMinus => {
                if !self.buffer.is_empty() {
                    self.buffer.toggle_sign();
                    self.show_buffer(sink);
                }
            }
            Action::Function(function) => return self.unary(function, sink),
            Action::OpenParen => {
                self.buffer.open_paren();
                self.show_buffer(sink);
            }
            Action::CloseParen => {
                if !self.buffer.is_empty() {
                    self.buffer.close_paren();
                    self.show_buffer(sink);
                }
            }
            Action::Financial(kind) => sink.request_form(kind),
            Action::Memory(memory) => return self.memory_action(memory, sink),
            Action::ClearHistory => {
                self.history.clear();
                sink.show_history(&self.history);
            }
        }
        Ok(())
    }

    /// Switches keypad layout and starts a fresh expression.
    pub fn set_mode(&mut self, mode: Mode, sink: &mut impl RenderSink) {
        info!(from = %self.mode, to = %mode, "switching mode");
        self.mode = mode;
        sink.show_mode(&mode.label());
        self.reset(sink);
    }

    /// Computes a pricing form opened by [`Action::Financial`].
    ///
    /// Invalid input produces no result: the display shows the error
    /// indicator and history is untouched.
    pub fn submit_form(
        &mut self,
        kind: FinancialKind,
        form: &FinancialForm,
        sink: &mut impl RenderSink,
    ) -> Result<(), CalcError> {
        let name = match kind {
            FinancialKind::Margin => "Margin",
            FinancialKind::Markup => "Markup",
            FinancialKind::PresentValue => {
                debug!(?form, "present value form submitted; nothing to compute");
                return Ok(());
            }
        };
        let (cost, selling) = match form.prices() {
            Ok(prices) => prices,
            Err(err) => {
                warn!(%err, form = kind.token(), "rejected form input");
                sink.show_result(&self.error_indicator);
                return Err(err.into());
            }
        };
        let percent = if kind == FinancialKind::Margin {
            financial::margin(cost, selling)
        } else {
            financial::markup(cost, selling)
        };
        let percent = format_percent(percent);
        let (cost, selling) = (format_number(cost), format_number(selling));
        sink.show_result(&percent);
        sink.show_expression(&format!("{name} ({cost}, {selling})"));
        self.record(format!("{name}: {percent}"), sink);
        Ok(())
    }

    fn equals(&mut self, sink: &mut impl RenderSink) -> Result<(), CalcError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let expression = self.buffer.text();
        match evaluate(&expression) {
            Ok(value) => {
                let result = format_number(value);
                sink.show_result(&result);
                sink.show_expression(&format!("{expression} ="));
                self.record(format!("{expression} = {result}"), sink);
                self.buffer.set_value(value, true);
                Ok(())
            }
            Err(err) => {
                warn!(%err, %expression, "evaluation failed");
                sink.show_result(&self.error_indicator);
                self.buffer.clear();
                Err(err.into())
            }
        }
    }

    /// Evaluates the buffer for a function key. Failures leave the buffer as
    /// it was and show the error indicator.
    fn operand(&self, sink: &mut impl RenderSink) -> Result<Option<f64>, CalcError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }
        match evaluate(&self.buffer.text()) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(%err, expression = %self.buffer, "cannot evaluate operand");
                sink.show_result(&self.error_indicator);
                Err(err.into())
            }
        }
    }

    fn percent(&mut self, sink: &mut impl RenderSink) -> Result<(), CalcError> {
        let Some(value) = self.operand(sink)? else {
            return Ok(());
        };
        let finished = self.buffer.just_calculated();
        self.buffer.set_value(value / 100.0, finished);
        self.show_buffer(sink);
        Ok(())
    }

    fn unary(&mut self, function: UnaryFunction, sink: &mut impl RenderSink) -> Result<(), CalcError> {
        let Some(value) = self.operand(sink)? else {
            return Ok(());
        };
        let result = match function.apply(value) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, function = function.token(), "domain error");
                sink.show_result(&self.error_indicator);
                return Err(err.into());
            }
        };
        let label = function.label(value);
        let text = format_number(result);
        self.buffer.set_value(result, true);
        sink.show_expression(&label);
        sink.show_result(&text);
        self.record(format!("{label} = {text}"), sink);
        Ok(())
    }

    fn memory_action(&mut self, action: MemoryAction, sink: &mut impl RenderSink) -> Result<(), CalcError> {
        match action {
            MemoryAction::Clear => self.memory.clear(),
            MemoryAction::Recall => {
                let value = self.memory.value();
                self.buffer.insert_value(value);
                sink.show_expression(&self.buffer.text());
                sink.show_result(&format_number(value));
                return Ok(());
            }
            MemoryAction::Add | MemoryAction::Subtract => {
                let value = match evaluate(&self.buffer.text()) {
                    Ok(value) => value,
                    Err(err) => {
                        debug!(%err, "memory update skipped");
                        return Err(err.into());
                    }
                };
                if action == MemoryAction::Add {
                    self.memory.add(value);
                } else {
                    self.memory.subtract(value);
                }
            }
        }
        sink.show_memory(self.memory.value());
        Ok(())
    }

    fn record(&mut self, entry: String, sink: &mut impl RenderSink) {
        debug!(%entry, "history");
        self.history.record(entry);
        sink.show_history(&self.history);
    }

    fn reset(&mut self, sink: &mut impl RenderSink) {
        self.buffer.clear();
        sink.show_expression("");
        sink.show_result("0");
    }

    fn show_buffer(&self, sink: &mut impl RenderSink) {
        sink.show_expression(&self.buffer.text());
        sink.show_result(&self.buffer.display_text());
    }
}
