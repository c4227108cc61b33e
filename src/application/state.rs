//! Application state management for the terminal calculator.
//!
//! This module owns the single calculator state value and the UI mode, and
//! routes every user action through the domain engine.

use crate::domain::{Action, CalculatorEngine, CalculatorState, ERROR_MARKER, format_number};
use crate::infrastructure::{BehaviorConfig, ClipboardError, Config, ThemeConfig};
use tracing::{debug, warn};

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Keys and clicks drive the calculator
    Normal,
    /// Help screen is displayed
    Help,
}

/// Something the event loop must do outside the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the event loop
    Quit,
    /// Put this text on the system clipboard
    Copy(String),
}

/// Main application state: the calculator plus UI bookkeeping.
///
/// # Examples
///
/// ```
/// use tcalc::application::App;
/// use tcalc::domain::Action;
///
/// let mut app = App::default();
/// app.dispatch(Action::Digit('4'));
/// app.dispatch(Action::Digit('2'));
/// assert_eq!(app.calculator.display, "42");
/// ```
#[derive(Debug)]
pub struct App {
    /// The calculator; replaced wholesale on every action
    pub calculator: CalculatorState,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Most recent action, used to highlight its keypad button
    pub last_action: Option<Action>,
    pub behavior: BehaviorConfig,
    pub theme: ThemeConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            calculator: CalculatorState::default(),
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            last_action: None,
            behavior: config.behavior.clone(),
            theme: config.theme.clone(),
        }
    }

    /// Applies one user action to the calculator.
    ///
    /// Returns a clipboard copy request when `copy_on_equals` is enabled and
    /// `=` produced a number.
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        let next = CalculatorEngine::reduce(&self.calculator, action);
        debug!(
            ?action,
            from = %self.calculator.display,
            to = %next.display,
            pending = ?next.operation,
            "transition"
        );

        let failed = next.display == ERROR_MARKER && self.calculator.display != ERROR_MARKER;
        if failed {
            warn!(?action, "evaluation failed, showing error marker");
        }

        let evaluated = action == Action::Equals && next != self.calculator;
        self.calculator = next;
        self.last_action = Some(action);
        self.status_message = None;

        if evaluated && !failed && self.behavior.copy_on_equals {
            return Some(Effect::Copy(self.calculator.display.clone()));
        }
        None
    }

    /// Text of the pending operation, e.g. `12 ×`; empty when none.
    pub fn pending_expression(&self) -> String {
        match self.calculator.pending() {
            Some((previous, op)) => format!("{} {}", format_number(previous), op.symbol()),
            None => String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.calculator.display == ERROR_MARKER
    }

    /// Asks the event loop to copy the current display.
    pub fn request_copy(&self) -> Effect {
        Effect::Copy(self.calculator.display.clone())
    }

    /// Records the outcome of a clipboard copy in the status bar.
    pub fn set_copy_result(&mut self, result: Result<String, ClipboardError>) {
        match result {
            Ok(text) => {
                self.status_message = Some(format!("Copied {}", text));
            }
            Err(error) => {
                warn!(%error, "clipboard copy failed");
                self.status_message = Some(format!("Copy failed: {}", error));
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Normal => AppMode::Help,
            AppMode::Help => AppMode::Normal,
        };
        self.help_scroll = 0;
    }

    pub fn scroll_help(&mut self, delta: isize) {
        self.help_scroll = self.help_scroll.saturating_add_signed(delta);
    }
}
