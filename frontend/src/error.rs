//! Error types shared by the API client, the session layer and the views.
//!
//! Every variant renders as a short message suitable for showing inline next
//! to the form or list that triggered it.

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LEN: usize = 12;

/// Client-side validation failures. No request is sent when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email is required")]
    EmptyEmail,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort { len: usize },
    #[error("amount must be a number")]
    InvalidAmount { input: String },
    #[error("amount must be greater than 0")]
    NonPositiveAmount,
    #[error("select a category")]
    MissingCategory,
    #[error("invalid date: {input}")]
    InvalidDate { input: String },
    #[error("month must be between 1 and 12")]
    InvalidMonth { month: u32 },
}

/// A request that reached the network layer and failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("unexpected response from server ({status}): {reason}")]
    Malformed { status: u16, reason: String },
    /// No HTTP response was received.
    #[error("network error: {reason}")]
    Network { reason: String },
}

impl RequestError {
    /// Builds a status error, falling back to a generic message when the
    /// server sent an empty body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("request failed with status {status}")
        } else {
            body.to_string()
        };
        Self::Status { status, message }
    }

    /// HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Malformed { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }
}

/// Persisted session storage could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session storage unavailable: {reason}")]
pub struct StorageError {
    pub reason: String,
}

/// Error returned by view actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    /// True when the failure happened before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_falls_back_to_generic_message() {
        let err = RequestError::from_status(500, "  \n");
        assert_eq!(err.to_string(), "request failed with status 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn server_message_is_kept() {
        let err = RequestError::from_status(401, "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn network_errors_have_no_status() {
        let err = RequestError::Network {
            reason: "connection refused".into(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn app_error_displays_inner_message() {
        let err = AppError::from(ValidationError::PasswordTooShort { len: 3 });
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "password must be at least 12 characters");
    }
}
