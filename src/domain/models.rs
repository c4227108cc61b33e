use super::errors::{CalcError, CalcResult};

/// A binary operator that can be pending between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operation {
    /// Applies the operator to `a` (left) and `b` (right).
    ///
    /// Division by zero is the only failure. Modulo follows the native
    /// floating point remainder, so `a % 0` is NaN rather than an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tcalc::domain::{CalcError, Operation};
    ///
    /// assert_eq!(Operation::Multiply.apply(6.0, 7.0), Ok(42.0));
    /// assert_eq!(Operation::Divide.apply(1.0, 0.0), Err(CalcError::DivideByZero));
    /// ```
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        match self {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide => {
                if b == 0.0 {
                    Err(CalcError::DivideByZero)
                } else {
                    Ok(a / b)
                }
            }
            Operation::Modulo => Ok(a % b),
        }
    }

    /// Symbol shown on the keypad and in the pending expression line.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "−",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
            Operation::Modulo => "mod",
        }
    }

    /// Maps a typed operator character to an operation.
    ///
    /// Both the ASCII forms (`*`, `/`) and the keypad glyphs (`×`, `÷`) are
    /// accepted. `%` is deliberately absent: it is the percent key.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operation::Add),
            '-' | '−' => Some(Operation::Subtract),
            '*' | '×' => Some(Operation::Multiply),
            '/' | '÷' => Some(Operation::Divide),
            _ => None,
        }
    }
}

/// Whether the next digit extends the display or starts a new number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    /// Digits are appended to the current display.
    #[default]
    Accumulating,
    /// An operator or equals was just chosen; the next digit replaces the display.
    AwaitingFresh,
}

/// The whole calculator: what is shown plus the pending operation, if any.
///
/// Transitions never mutate a state in place; `CalculatorEngine` builds a
/// new value for every action.
///
/// # Examples
///
/// ```
/// use tcalc::domain::CalculatorState;
///
/// let state = CalculatorState::default();
/// assert_eq!(state.display, "0");
/// assert!(state.operation.is_none());
/// assert!(!state.is_waiting());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    /// Text currently shown; never empty
    pub display: String,
    /// Left operand of the pending operation
    pub previous_value: Option<f64>,
    /// Pending operator, set together with `previous_value`
    pub operation: Option<Operation>,
    /// Whether the next digit starts a fresh number
    pub entry: EntryMode,
    /// Last operator selected, kept for reference only
    pub last_operation: Option<Operation>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous_value: None,
            operation: None,
            entry: EntryMode::Accumulating,
            last_operation: None,
        }
    }
}

impl CalculatorState {
    pub fn is_waiting(&self) -> bool {
        self.entry == EntryMode::AwaitingFresh
    }

    /// Left operand and operator of the pending operation, if any.
    pub fn pending(&self) -> Option<(f64, Operation)> {
        self.previous_value.zip(self.operation)
    }
}

/// One user intent, from a key press or a keypad click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A digit `0`-`9` or the decimal point
    Digit(char),
    Operation(Operation),
    Equals,
    /// Reset the display only (C)
    ClearEntry,
    /// Reset everything (AC)
    AllClear,
    ToggleSign,
    Percent,
    Backspace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_arithmetic() {
        assert_eq!(Operation::Add.apply(5.0, 3.0), Ok(8.0));
        assert_eq!(Operation::Subtract.apply(5.0, 3.0), Ok(2.0));
        assert_eq!(Operation::Multiply.apply(5.0, 3.0), Ok(15.0));
        assert_eq!(Operation::Divide.apply(6.0, 3.0), Ok(2.0));
        assert_eq!(Operation::Modulo.apply(10.0, 3.0), Ok(1.0));
    }

    #[test]
    fn test_divide_by_zero_fails() {
        assert_eq!(Operation::Divide.apply(5.0, 0.0), Err(CalcError::DivideByZero));
        assert_eq!(Operation::Divide.apply(0.0, 0.0), Err(CalcError::DivideByZero));
        assert_eq!(Operation::Divide.apply(-3.5, -0.0), Err(CalcError::DivideByZero));
    }

    #[test]
    fn test_modulo_keeps_sign_of_dividend() {
        assert_eq!(Operation::Modulo.apply(-7.0, 3.0), Ok(-1.0));
        assert_eq!(Operation::Modulo.apply(7.0, -3.0), Ok(1.0));
        assert!(Operation::Modulo.apply(7.0, 0.0).unwrap().is_nan());
    }

    #[test]
    fn test_operation_from_key() {
        assert_eq!(Operation::from_key('+'), Some(Operation::Add));
        assert_eq!(Operation::from_key('-'), Some(Operation::Subtract));
        assert_eq!(Operation::from_key('*'), Some(Operation::Multiply));
        assert_eq!(Operation::from_key('×'), Some(Operation::Multiply));
        assert_eq!(Operation::from_key('/'), Some(Operation::Divide));
        assert_eq!(Operation::from_key('÷'), Some(Operation::Divide));
        assert_eq!(Operation::from_key('%'), None);
        assert_eq!(Operation::from_key('x'), None);
    }

    #[test]
    fn test_default_state_has_nothing_pending() {
        let state = CalculatorState::default();
        assert_eq!(state.display, "0");
        assert!(state.pending().is_none());
        assert_eq!(state.entry, EntryMode::Accumulating);
        assert!(state.last_operation.is_none());
    }
}
