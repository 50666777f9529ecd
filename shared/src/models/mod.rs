//! Data models
//!
//! Shared between the printing core and the UI shell (via JSON).

pub mod product;
pub mod sale;

// Re-exports
pub use product::*;
pub use sale::*;
