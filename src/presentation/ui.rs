use crate::application::{App, AppMode};
use crate::infrastructure::ThemeConfig;
use crate::presentation::keypad::{keypad_layout, ButtonKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::str::FromStr;

/// Areas of the screen, derived only from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Bordered calculator frame around the three areas below
    pub body: Rect,
    pub expression: Rect,
    pub display: Rect,
    pub keypad: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let body = Block::default().borders(Borders::ALL).inner(chunks[1]);
    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(body);

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        expression: inner[0],
        display: inner[1],
        keypad: inner[2],
        status: chunks[2],
    }
}

/// Theme colors resolved once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub display: Color,
    pub error: Color,
    pub digit: Color,
    pub operator: Color,
    pub function: Color,
    pub highlight: Color,
}

impl Palette {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            display: parse_color(&theme.display, Color::White),
            error: parse_color(&theme.error, Color::Red),
            digit: parse_color(&theme.digit, Color::Gray),
            operator: parse_color(&theme.operator, Color::Yellow),
            function: parse_color(&theme.function, Color::DarkGray),
            highlight: parse_color(&theme.highlight, Color::LightBlue),
        }
    }

    fn button(&self, kind: ButtonKind) -> Color {
        match kind {
            ButtonKind::Digit => self.digit,
            ButtonKind::Operator | ButtonKind::Equals => self.operator,
            ButtonKind::Function => self.function,
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or(fallback)
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let layout = screen_layout(f.area());
    let palette = Palette::from_theme(&app.theme);

    f.render_widget(Block::default().borders(Borders::ALL).title("Calculator"), layout.body);

    render_header(f, app, layout.header);
    render_expression(f, app, layout.expression);
    render_display(f, app, &palette, layout.display);
    render_keypad(f, app, &palette, layout.keypad);
    render_status_bar(f, app, layout.status);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let pending = match app.calculator.operation {
        Some(op) => format!("Pending: {}", op.symbol()),
        None => "Ready".to_string(),
    };
    let header = Paragraph::new(format!("tcalc - Terminal Calculator | {}", pending))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_expression(f: &mut Frame, app: &App, area: Rect) {
    let expression = Paragraph::new(app.pending_expression())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(expression, area);
}

fn render_display(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let color = if app.is_error() { palette.error } else { palette.display };
    let display = Paragraph::new(app.calculator.display.as_str())
        .alignment(Alignment::Right)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(display, area);
}

fn render_keypad(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    for (rect, button) in keypad_layout(area) {
        let color = palette.button(button.kind);
        let pressed = app.last_action == Some(button.action);

        let (border, label) = if pressed {
            (
                Style::default().fg(palette.highlight),
                Style::default()
                    .bg(palette.highlight)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(color),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        };

        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        if inner.height == 0 {
            continue;
        }
        let label_area = Rect {
            y: inner.y + (inner.height - 1) / 2,
            height: 1,
            ..inner
        };
        let text = Paragraph::new(button.label)
            .alignment(Alignment::Center)
            .style(label);
        f.render_widget(text, label_area);
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => match app.status_message {
            Some(ref status) => status.clone(),
            None => concat!(
                "0-9 . + - * / m % = | Esc: AC | c: C | n: ± | Bksp | y: copy ",
                "| F1/?: help | q: quit"
            )
            .to_string(),
        },
        AppMode::Help => {
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string()
        }
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tcalc Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"TCALC KEY REFERENCE

=== NUMBERS ===
0-9             Enter a digit
.               Decimal point (only one per number)
Backspace       Delete the last digit
c / C / Delete  Clear the current entry (C)
Esc             Clear everything (AC)

=== OPERATORS ===
+               Add                     5 + 3 = → 8
-               Subtract                5 - 8 = → -3
* or ×          Multiply                6 * 7 = → 42
/ or ÷          Divide                  1 / 4 = → 0.25
m               Remainder               10 m 3 = → 1
Enter or =      Evaluate

Operators chain left to right:  2 + 3 * 4 = → 20
Pressing a second operator before a number replaces the first.

=== FUNCTIONS ===
%               Divide the display by 100     50 % → 0.5
n or F9         Toggle sign (±)

=== RESULTS ===
Very large or very small results use exponential notation.
Division by zero shows Error; type a digit to start again.

=== OTHER ===
Mouse           Click any on-screen button
y or Ctrl+C     Copy the display to the clipboard
F1 or ?         Show this help
q               Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

Settings live in config.toml under your config directory
(see tcalc --print-default-config)."#
}
