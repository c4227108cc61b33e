//! Infrastructure layer providing external service integrations.
//!
//! This module contains the configuration file, the log sink and the
//! system clipboard.

pub mod clipboard;
pub mod config;
pub mod logging;

pub use clipboard::*;
pub use config::*;
pub use logging::*;
