//! State transitions for the calculator.
//!
//! Every operation takes the current state by reference and returns the next
//! one. Nothing here can fail: a division by zero is folded into the error
//! marker and a clean, pending-free state.

use super::format::{format_number, parse_display, ERROR_MARKER};
use super::models::{Action, CalculatorState, EntryMode, Operation};

/// Pure reducer over [`CalculatorState`].
///
/// # Examples
///
/// ```
/// use tcalc::domain::{Action, CalculatorEngine, CalculatorState, Operation};
///
/// let actions = [
///     Action::Digit('5'),
///     Action::Operation(Operation::Add),
///     Action::Digit('3'),
///     Action::Equals,
/// ];
/// let state = actions
///     .into_iter()
///     .fold(CalculatorState::default(), |s, a| CalculatorEngine::reduce(&s, a));
/// assert_eq!(state.display, "8");
/// ```
pub struct CalculatorEngine;

impl CalculatorEngine {
    /// Produces the state that follows `action`.
    pub fn reduce(state: &CalculatorState, action: Action) -> CalculatorState {
        match action {
            Action::Digit(digit) => Self::input_digit(state, digit),
            Action::Operation(op) => Self::input_operation(state, op),
            Action::Equals => Self::equals(state),
            Action::ClearEntry => Self::clear_entry(state),
            Action::AllClear => Self::all_clear(),
            Action::ToggleSign => Self::toggle_sign(state),
            Action::Percent => Self::percent(state),
            Action::Backspace => Self::backspace(state),
        }
    }

    /// Appends a digit or decimal point, or starts a new number.
    ///
    /// Characters other than `0`-`9` and `.` leave the state unchanged.
    pub fn input_digit(state: &CalculatorState, digit: char) -> CalculatorState {
        if !(digit.is_ascii_digit() || digit == '.') {
            return state.clone();
        }

        if state.is_waiting() || state.display == ERROR_MARKER {
            return CalculatorState {
                display: fresh_entry(digit),
                entry: EntryMode::Accumulating,
                ..state.clone()
            };
        }

        if state.display == "0" && digit != '.' {
            return CalculatorState {
                display: digit.to_string(),
                ..state.clone()
            };
        }

        if digit == '.' && state.display.contains('.') {
            return state.clone();
        }

        let mut display = state.display.clone();
        display.push(digit);
        CalculatorState {
            display,
            ..state.clone()
        }
    }

    /// Selects an operator, evaluating the pending one first when an
    /// operand has been entered since it was chosen.
    pub fn input_operation(state: &CalculatorState, op: Operation) -> CalculatorState {
        let input_value = parse_display(&state.display);

        match state.pending() {
            Some((previous, pending)) if !state.is_waiting() => {
                match pending.apply(previous, input_value) {
                    Ok(result) => CalculatorState {
                        display: format_number(result),
                        previous_value: Some(result),
                        operation: Some(op),
                        entry: EntryMode::AwaitingFresh,
                        last_operation: Some(op),
                    },
                    Err(_) => CalculatorState {
                        last_operation: Some(op),
                        ..failed()
                    },
                }
            }
            Some(_) => CalculatorState {
                operation: Some(op),
                entry: EntryMode::AwaitingFresh,
                last_operation: Some(op),
                ..state.clone()
            },
            None => CalculatorState {
                previous_value: Some(input_value),
                operation: Some(op),
                entry: EntryMode::AwaitingFresh,
                last_operation: Some(op),
                ..state.clone()
            },
        }
    }

    /// Applies the pending operation to the displayed value.
    pub fn equals(state: &CalculatorState) -> CalculatorState {
        let Some((previous, pending)) = state.pending() else {
            return state.clone();
        };

        let input_value = parse_display(&state.display);
        match pending.apply(previous, input_value) {
            Ok(result) => CalculatorState {
                display: format_number(result),
                previous_value: None,
                operation: None,
                entry: EntryMode::AwaitingFresh,
                last_operation: state.last_operation,
            },
            Err(_) => CalculatorState {
                last_operation: state.last_operation,
                ..failed()
            },
        }
    }

    pub fn clear_entry(state: &CalculatorState) -> CalculatorState {
        CalculatorState {
            display: "0".to_string(),
            ..state.clone()
        }
    }

    pub fn all_clear() -> CalculatorState {
        CalculatorState::default()
    }

    pub fn toggle_sign(state: &CalculatorState) -> CalculatorState {
        CalculatorState {
            display: format_number(-parse_display(&state.display)),
            ..state.clone()
        }
    }

    pub fn percent(state: &CalculatorState) -> CalculatorState {
        CalculatorState {
            display: format_number(parse_display(&state.display) / 100.0),
            ..state.clone()
        }
    }

    /// Removes the last typed character.
    ///
    /// A single character, a lone minus sign, or a display that was not typed
    /// by the user (waiting for a new value) collapses to `0`.
    pub fn backspace(state: &CalculatorState) -> CalculatorState {
        if state.display.chars().count() == 1 || state.is_waiting() {
            return Self::clear_entry(state);
        }

        let mut display = state.display.clone();
        display.pop();
        if display.is_empty() || display == "-" {
            display = "0".to_string();
        }

        CalculatorState {
            display,
            ..state.clone()
        }
    }
}

fn fresh_entry(digit: char) -> String {
    if digit == '.' {
        "0.".to_string()
    } else {
        digit.to_string()
    }
}

/// State after a failed evaluation: error shown, nothing pending.
fn failed() -> CalculatorState {
    CalculatorState {
        display: ERROR_MARKER.to_string(),
        previous_value: None,
        operation: None,
        entry: EntryMode::AwaitingFresh,
        last_operation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds a compact key script through the reducer.
    ///
    /// Digits and `.` are entered as-is, `+ - * / m` select operators, `=`
    /// evaluates, `%` is percent, `n` toggles sign, `<` is backspace, `c`
    /// clears the entry and `a` clears everything.
    fn run(script: &str) -> CalculatorState {
        script
            .chars()
            .fold(CalculatorState::default(), |state, key| run_single(&state, key))
    }

    fn assert_invariants(state: &CalculatorState) {
        assert!(!state.display.is_empty());
        assert!(state.display == ERROR_MARKER || parse_display(&state.display).is_finite());
        assert_eq!(state.operation.is_some(), state.previous_value.is_some());
    }

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(run("123").display, "123");
        assert_eq!(run("3.14").display, "3.14");
        assert_eq!(run("100").display, "100");
    }

    #[test]
    fn test_leading_zero_suppressed() {
        assert_eq!(run("0").display, "0");
        assert_eq!(run("007").display, "7");
        assert_eq!(run("0.05").display, "0.05");
    }

    #[test]
    fn test_duplicate_decimal_point_rejected() {
        assert_eq!(run("1.2.3").display, "1.23");
        assert_eq!(run("..5").display, "0.5");
    }

    #[test]
    fn test_decimal_point_after_operator_starts_fresh_number() {
        let state = run("7+.");
        assert_eq!(state.display, "0.");
        assert!(!state.is_waiting());
        assert_eq!(run("7+.5=").display, "7.5");
    }

    #[test]
    fn test_non_digit_characters_ignored() {
        let before = run("12");
        let after = CalculatorEngine::input_digit(&before, 'x');
        assert_eq!(before, after);
    }

    #[test]
    fn test_first_operator_sets_pending() {
        let state = run("12+");
        assert_eq!(state.display, "12");
        assert_eq!(state.previous_value, Some(12.0));
        assert_eq!(state.operation, Some(Operation::Add));
        assert!(state.is_waiting());
        assert_eq!(state.last_operation, Some(Operation::Add));
    }

    #[test]
    fn test_digit_after_operator_replaces_display() {
        let state = run("12+3");
        assert_eq!(state.display, "3");
        assert!(!state.is_waiting());
        assert_eq!(state.previous_value, Some(12.0));
    }

    #[test]
    fn test_simple_equals() {
        assert_eq!(run("5+3=").display, "8");
        assert_eq!(run("5-8=").display, "-3");
        assert_eq!(run("6*7=").display, "42");
        assert_eq!(run("1/4=").display, "0.25");
        assert_eq!(run("10m3=").display, "1");
    }

    #[test]
    fn test_chained_operators_evaluate_left_to_right() {
        let state = run("5+3+");
        assert_eq!(state.display, "8");
        assert_eq!(state.previous_value, Some(8.0));

        assert_eq!(run("5+3+2=").display, "10");
        assert_eq!(run("2+3*4=").display, "20");
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let state = run("5+*");
        assert_eq!(state.operation, Some(Operation::Multiply));
        assert_eq!(state.previous_value, Some(5.0));
        assert!(state.is_waiting());
        assert_eq!(state.last_operation, Some(Operation::Multiply));

        assert_eq!(run("5+*3=").display, "15");
    }

    #[test]
    fn test_equals_clears_pending_and_waits() {
        let state = run("5+3=");
        assert!(state.operation.is_none());
        assert!(state.previous_value.is_none());
        assert!(state.is_waiting());
        assert_eq!(state.last_operation, Some(Operation::Add));

        assert_eq!(run("5+3=9").display, "9");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let before = run("42");
        assert_eq!(CalculatorEngine::equals(&before), before);
        assert_eq!(run("5+3==").display, "8");
    }

    #[test]
    fn test_equals_right_after_operator_reuses_display() {
        assert_eq!(run("5+=").display, "10");
    }

    #[test]
    fn test_divide_by_zero_shows_error_and_resets() {
        let state = run("8/0=");
        assert_eq!(state.display, ERROR_MARKER);
        assert!(state.operation.is_none());
        assert!(state.previous_value.is_none());
        assert!(state.is_waiting());
        assert_invariants(&state);
    }

    #[test]
    fn test_divide_by_zero_in_chain_shows_error_and_resets() {
        let state = run("8/0+");
        assert_eq!(state.display, ERROR_MARKER);
        assert!(state.operation.is_none());
        assert!(state.previous_value.is_none());
        assert!(state.is_waiting());
        assert_eq!(state.last_operation, Some(Operation::Add));
    }

    #[test]
    fn test_error_self_heals_on_next_digit() {
        assert_eq!(run("8/0=4").display, "4");
        assert_eq!(run("8/0=4+1=").display, "5");
    }

    #[test]
    fn test_modulo_by_zero_fails_closed() {
        assert_eq!(run("7m0=").display, ERROR_MARKER);
    }

    #[test]
    fn test_clear_entry_keeps_pending() {
        let state = run("5+9c");
        assert_eq!(state.display, "0");
        assert_eq!(state.previous_value, Some(5.0));
        assert_eq!(state.operation, Some(Operation::Add));
        assert_eq!(run("5+9c2=").display, "7");
    }

    #[test]
    fn test_all_clear_resets_and_is_idempotent() {
        let once = run("5+9a");
        assert_eq!(once, CalculatorState::default());
        let twice = CalculatorEngine::reduce(&once, Action::AllClear);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toggle_sign() {
        assert_eq!(run("12n").display, "-12");
        assert_eq!(run("12nn").display, "12");
        assert_eq!(run("0n").display, "0");
        assert_eq!(run("3+4=n").display, "-7");
    }

    #[test]
    fn test_percent() {
        assert_eq!(run("50%").display, "0.5");
        assert_eq!(run("5%").display, "0.05");
        assert_eq!(run("200+50%=").display, "200.5");
    }

    #[test]
    fn test_backspace() {
        assert_eq!(run("123<").display, "12");
        assert_eq!(run("7<").display, "0");
        assert_eq!(run("1.<").display, "1");
        assert_eq!(run("12n<<").display, "0");
    }

    #[test]
    fn test_backspace_into_exponent_keeps_leading_number() {
        let state = run("1%%%%");
        assert_eq!(state.display, "1.000000e-8");
        assert!(!state.is_waiting());

        let state = run("1%%%%<");
        assert_eq!(state.display, "1.000000e-");
        assert_eq!(parse_display(&state.display), 1.0);
        assert_eq!(run("1%%%%<+2=").display, "3");
    }

    #[test]
    fn test_backspace_after_operator_resets_display() {
        let state = run("123+<");
        assert_eq!(state.display, "0");
        assert_eq!(state.previous_value, Some(123.0));
    }

    #[test]
    fn test_large_results_use_exponential() {
        assert_eq!(run("12345678*100000000=").display, "1.234568e+15");
    }

    #[test]
    fn test_invariants_hold_across_scripts() {
        let scripts = [
            "1+2*3-4/5=",
            "9/0+3",
            "5+*-/3=",
            "0.1+0.2=",
            "12n%<c",
            "8m0=+2=",
            "a",
            "3+=<n.5",
            "1%%%%<+2=",
            "1%%%%1<<<",
        ];
        for script in scripts {
            let mut state = CalculatorState::default();
            for key in script.chars() {
                state = run_single(&state, key);
                assert_invariants(&state);
            }
        }
    }

    fn run_single(state: &CalculatorState, key: char) -> CalculatorState {
        let action = match key {
            '=' => Action::Equals,
            '%' => Action::Percent,
            'n' => Action::ToggleSign,
            '<' => Action::Backspace,
            'c' => Action::ClearEntry,
            'a' => Action::AllClear,
            'm' => Action::Operation(Operation::Modulo),
            c => Operation::from_key(c)
                .map(Action::Operation)
                .unwrap_or(Action::Digit(c)),
        };
        CalculatorEngine::reduce(state, action)
    }
}
