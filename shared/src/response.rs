//! Uniform response envelope
//!
//! The boundary layer wraps every engine result or error into
//! `{code, message, data}`. The envelope itself carries no framework types
//! so any HTTP layer can reuse it as-is.

use serde::Serialize;

/// Stable envelope codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    NotFound,
    Insufficient,
    QuotaExceeded,
    InvalidInput,
    Database,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::InvalidInput => "E0002",
            Self::NotFound => "E0003",
            Self::Insufficient => "E0005",
            Self::QuotaExceeded => "E0006",
            Self::Database => "E9002",
        }
    }
}

/// Uniform API response structure
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response wrapping `data`
    pub fn ok(data: T) -> Self {
        Self {
            code: ErrorCode::Success.as_str().to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Error response; the message is passed through verbatim
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.into(),
            data: None,
        }
    }
}
