//! Response shapes shared by every feature router.

use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message, safe to show to the caller.
    pub error: String,
    /// Stable machine-readable code.
    pub code: String,
    /// Where a browser client should send the user next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }
}

/// Plain `{message}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_is_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("FUND_NOT_FOUND", "Fund not found or inactive.")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Fund not found or inactive.", "code": "FUND_NOT_FOUND"}));
    }
}
