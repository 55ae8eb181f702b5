use crate::financial::FinancialKind;
use crate::history::HistoryLog;

/// Where the session pushes what the user should see. Push-only and
/// infallible; everything beyond the two display lines is optional.
pub trait RenderSink {
    /// Secondary line: the expression being built or just evaluated.
    fn show_expression(&mut self, text: &str);

    /// Main line: the current input, result or error indicator.
    fn show_result(&mut self, text: &str);

    fn show_memory(&mut self, _value: f64) {}

    fn show_history(&mut self, _history: &HistoryLog) {}

    fn show_mode(&mut self, _label: &str) {}

    /// The host should collect a [`FinancialForm`](crate::FinancialForm) and
    /// hand it to [`CalculatorSession::submit_form`](crate::CalculatorSession::submit_form).
    fn request_form(&mut self, _kind: FinancialKind) {}
}

/// Keeps the latest value of everything it is shown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    pub expression: String,
    pub result: String,
    pub memory: Option<f64>,
    pub mode: Option<String>,
    pub history: Vec<String>,
    pub forms: Vec<FinancialKind>,
}

impl RenderSink for RecordingSink {
    fn show_expression(&mut self, text: &str) {
        self.expression = text.to_string();
    }

    fn show_result(&mut self, text: &str) {
        self.result = text.to_string();
    }

    fn show_memory(&mut self, value: f64) {
        self.memory = Some(value);
    }

    fn show_history(&mut self, history: &HistoryLog) {
        self.history = history.iter().map(|entry| entry.to_string()).collect();
    }

    fn show_mode(&mut self, label: &str) {
        self.mode = Some(label.to_string());
    }

    fn request_form(&mut self, kind: FinancialKind) {
        self.forms.push(kind);
    }
}
