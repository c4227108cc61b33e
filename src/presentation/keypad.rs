//! The on-screen button grid.
//!
//! Layout and hit testing share one function so a click always lands on the
//! button that was drawn under it.

use crate::domain::{Action, Operation};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Digit,
    Operator,
    Function,
    Equals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    pub kind: ButtonKind,
    /// Number of grid columns covered
    pub span: u16,
}

const fn digit(label: &'static str, c: char) -> Button {
    Button {
        label,
        action: Action::Digit(c),
        kind: ButtonKind::Digit,
        span: 1,
    }
}

const fn operator(label: &'static str, op: Operation) -> Button {
    Button {
        label,
        action: Action::Operation(op),
        kind: ButtonKind::Operator,
        span: 1,
    }
}

const fn function(label: &'static str, action: Action) -> Button {
    Button {
        label,
        action,
        kind: ButtonKind::Function,
        span: 1,
    }
}

const COLUMNS: u16 = 4;
const ROWS: usize = 5;

pub const KEYPAD: [&[Button]; ROWS] = [
    &[
        function("AC", Action::AllClear),
        function("±", Action::ToggleSign),
        function("%", Action::Percent),
        operator("÷", Operation::Divide),
    ],
    &[
        digit("7", '7'),
        digit("8", '8'),
        digit("9", '9'),
        operator("×", Operation::Multiply),
    ],
    &[
        digit("4", '4'),
        digit("5", '5'),
        digit("6", '6'),
        operator("−", Operation::Subtract),
    ],
    &[
        digit("1", '1'),
        digit("2", '2'),
        digit("3", '3'),
        operator("+", Operation::Add),
    ],
    &[
        Button {
            label: "0",
            action: Action::Digit('0'),
            kind: ButtonKind::Digit,
            span: 2,
        },
        digit(".", '.'),
        Button {
            label: "=",
            action: Action::Equals,
            kind: ButtonKind::Equals,
            span: 1,
        },
    ],
];

/// Positions every keypad button inside `area`.
pub fn keypad_layout(area: Rect) -> Vec<(Rect, Button)> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, ROWS as u32); ROWS])
        .split(area);

    let mut placed = Vec::new();
    for (row_area, buttons) in rows.iter().zip(KEYPAD) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, COLUMNS as u32); COLUMNS as usize])
            .split(*row_area);

        let mut column = 0usize;
        for button in buttons.iter() {
            let first = cells[column];
            let last = cells[column + button.span as usize - 1];
            let rect = Rect {
                x: first.x,
                y: first.y,
                width: last.x + last.width - first.x,
                height: first.height,
            };
            placed.push((rect, *button));
            column += button.span as usize;
        }
    }
    placed
}

/// Finds the button under a terminal cell, if any.
pub fn button_at(area: Rect, column: u16, row: u16) -> Option<Button> {
    let position = Position::new(column, row);
    keypad_layout(area)
        .into_iter()
        .find(|(rect, _)| rect.contains(position))
        .map(|(_, button)| button)
}
