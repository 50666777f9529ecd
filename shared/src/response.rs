//! API Response types
//!
//! Tagged result handed to the UI shell for every boundary call.

use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All responses follow this format:
/// ```json
/// { "success": true, "code": 0, "data": ["POS-58"] }
/// { "success": false, "code": 9201, "error": "No printer matching 'POS' found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    pub success: bool,
    /// Response code (0 = success, others = [`ErrorCode`] values)
    pub code: ErrorCode,
    /// Failure message for the UI alert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success,
            error: None,
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error_with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            error: Some(message.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            success: true,
            code: ErrorCode::Success,
            error: None,
            data: None,
        }
    }
}
