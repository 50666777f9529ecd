//! Shared types for the ASG till
//!
//! Data model, money helpers, error codes and the response envelope used
//! between the printing core and the UI shell.

pub mod error;
pub mod models;
pub mod money;
pub mod response;

// Re-exports
pub use error::ErrorCode;
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
