//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui, maps
//! keyboard and mouse input to calculator actions, and renders the display
//! and keypad.

pub mod ui;
pub mod input;
pub mod keypad;

pub use ui::*;
pub use input::*;
pub use keypad::*;
