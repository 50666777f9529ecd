//! Unified error codes
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Product / sale errors
//! - 9xxx: System errors (printing, configuration)

pub mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};
