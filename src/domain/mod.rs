pub mod models;
pub mod engine;
pub mod format;
pub mod errors;

pub use models::*;
pub use engine::*;
pub use format::*;
pub use errors::*;
