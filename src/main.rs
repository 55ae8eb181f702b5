use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use calcverse::{
    classify_key, Action, CalculatorSession, FinancialForm, FinancialKind, HistoryLog, Mode,
    RenderSink, SessionConfig,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Drive a calculator session from stdin.
///
/// Each line holds whitespace-separated keypad tokens (`1 2 add 3 equals`),
/// or one of the commands `:history`, `:print`, `:memory`, `:mode <name>`,
/// `:margin <cost> <sell>`, `:markup <cost> <sell>`.
#[derive(Parser, Debug)]
#[command(name = "calcverse", version, about)]
struct Cli {
    /// TOML session configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read tokens as keyboard keys (`Enter`, `Backspace`, `c`, `+`) instead
    /// of keypad action names.
    #[arg(long)]
    keys: bool,
}

/// Collects what the session shows and prints it once per input line.
#[derive(Default)]
struct TerminalSink {
    expression: String,
    result: String,
    notes: Vec<String>,
}

impl TerminalSink {
    fn flush(&mut self) {
        for note in self.notes.drain(..) {
            println!("  {note}");
        }
        if !self.expression.is_empty() {
            println!("  {}", self.expression);
        }
        println!("= {}", self.result);
    }
}

impl RenderSink for TerminalSink {
    fn show_expression(&mut self, text: &str) {
        self.expression = text.to_string();
    }

    fn show_result(&mut self, text: &str) {
        self.result = text.to_string();
    }

    fn show_memory(&mut self, value: f64) {
        self.notes.push(format!("M = {value}"));
    }

    fn show_mode(&mut self, label: &str) {
        self.notes.push(label.to_string());
    }

    fn show_history(&mut self, history: &HistoryLog) {
        debug!(entries = history.len(), "history updated");
    }

    fn request_form(&mut self, kind: FinancialKind) {
        let fields = kind.fields().join(" ");
        self.notes
            .push(format!("{}: use :{} {fields}", kind.title(), kind.token()));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SessionConfig::default(),
    };

    let mut session = CalculatorSession::with_config(&config);
    let mut sink = TerminalSink {
        result: "0".to_string(),
        ..TerminalSink::default()
    };
    sink.show_mode(&session.mode().label());

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.strip_prefix(':') {
            Some(command) => run_command(command, &mut session, &mut sink),
            None => {
                for token in line.split_whitespace() {
                    run_token(token, cli.keys, &mut session, &mut sink);
                }
            }
        }
        sink.flush();
    }
    Ok(())
}

fn run_token(token: &str, keys: bool, session: &mut CalculatorSession, sink: &mut TerminalSink) {
    let actions: Vec<Action> = if keys {
        classify_key(token).into_iter().collect()
    } else if token.len() > 1 && token.chars().all(|c| c.is_ascii_digit()) {
        token.chars().map(Action::Digit).collect()
    } else {
        match token.parse() {
            Ok(action) => vec![action],
            Err(err) => {
                sink.notes.push(err.to_string());
                return;
            }
        }
    };
    for action in actions {
        if let Err(err) = session.apply(action, sink) {
            sink.notes.push(err.to_string());
        }
    }
}

fn run_command(command: &str, session: &mut CalculatorSession, sink: &mut TerminalSink) {
    let mut words = command.split_whitespace();
    match words.next() {
        Some("history") => {
            if session.history().is_empty() {
                sink.notes.push("No history yet".to_string());
            }
            for entry in session.history().iter() {
                sink.notes.push(entry.to_string());
            }
        }
        Some("print") => print!("{}", session.history().printable()),
        Some("memory") => sink.notes.push(format!("M = {}", session.memory())),
        Some("mode") => match words.next().map(str::parse::<Mode>) {
            Some(Ok(mode)) => session.set_mode(mode, sink),
            Some(Err(err)) => sink.notes.push(err.to_string()),
            None => sink.notes.push(session.mode().label()),
        },
        Some(name @ ("margin" | "markup" | "pvfmpt")) => {
            let kind = match name {
                "margin" => FinancialKind::Margin,
                "markup" => FinancialKind::Markup,
                _ => FinancialKind::PresentValue,
            };
            let form = FinancialForm::from_pairs(kind.fields().iter().copied().zip(words));
            if let Err(err) = session.submit_form(kind, &form, sink) {
                sink.notes.push(err.to_string());
            }
        }
        Some(other) => sink.notes.push(format!("unknown command `:{other}`")),
        None => {}
    }
}
