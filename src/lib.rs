//! tcalc - Terminal Calculator Library
//!
//! A keypad calculator for the terminal: a pure state-transition engine plus
//! a ratatui front end driven by keyboard and mouse.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
