//! Service configuration from the process environment.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
