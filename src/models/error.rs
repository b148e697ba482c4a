use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Error body shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>, error_code: &str) -> Self {
        Self {
            detail: detail.into(),
            error_code: Some(error_code.to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(detail, "HTTP_400")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail, "HTTP_404")
    }

    pub fn too_many_requests() -> Self {
        Self::new("Rate limit exceeded. Please try again later.", "HTTP_429")
    }

    pub fn internal() -> Self {
        Self::new("Internal server error", "INTERNAL_ERROR")
    }
}
