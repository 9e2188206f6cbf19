//! Error types shared by the admin client.

use reqwest::StatusCode;

/// A form rule that failed before anything was sent to the server.
///
/// The `Display` text is the inline message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Please select an access type")]
    AccessTypeRequired,

    #[error("Start date is required for limited access")]
    StartDateRequired,

    #[error("Expiry date is required for limited access")]
    ExpiryDateRequired,

    #[error("Invalid {field}: {value}")]
    DateInvalid { field: &'static str, value: String },

    #[error("Expiry date must be after start date")]
    ExpiryNotAfterStart,

    #[error("Please provide a comment for revoking access")]
    RevokeCommentRequired,

    #[error("Notification title is required")]
    TitleRequired,
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: session is no longer valid")]
    Unauthorized,

    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AdminError {
    /// Message for a transient notification: the server's own message where
    /// one came back, the validation text for local failures, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AdminError::Validation(e) => e.to_string(),
            AdminError::Api { message: Some(m), .. } if !m.is_empty() => m.clone(),
            AdminError::Rejected(Some(m)) if !m.is_empty() => m.clone(),
            AdminError::InvalidState(m) => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::Unauthorized)
    }
}

pub type Result<T, E = AdminError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = AdminError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("Influencer not found".to_string()),
        };
        assert_eq!(err.user_message("Failed to load"), "Influencer not found");

        let err = AdminError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message("Failed to load"), "Failed to load");
    }

    #[test]
    fn rejected_with_empty_message_falls_back() {
        let err = AdminError::Rejected(Some(String::new()));
        assert_eq!(err.user_message("Failed to send invite"), "Failed to send invite");
    }

    #[test]
    fn validation_message_is_inline_text() {
        let err: AdminError = ValidationError::ExpiryNotAfterStart.into();
        assert_eq!(err.user_message("ignored"), "Expiry date must be after start date");
    }
}
