//! Application layer owning the calculator state.
//!
//! This module sits between the domain engine and the presentation layer:
//! it applies user actions, tracks UI mode and status messages, and reports
//! side effects (quit, clipboard) back to the event loop.

pub mod state;

pub use state::*;
