//! Error taxonomy for backend auth and data calls.
//!
//! ERROR HANDLING
//! ==============
//! Every backend outcome is normalized into [`AuthError`] here, so pages only
//! ever display `to_string()` and the route guard only matches on variants.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::transport::TransportError;
use super::types::ErrorBody;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    DuplicateAccount(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Request failed ({status}): {message}")]
    ServiceError { status: u16, message: String },
    #[error("Unable to reach the server: {0}")]
    NetworkError(String),
    #[error("Your session has expired. Please log in again.")]
    ExpiredSession,
    #[error("The session changed while the request was in flight.")]
    Superseded,
}

impl AuthError {
    /// Whether a user-triggered retry can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkError(_) => true,
            Self::ServiceError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        Self::NetworkError(err.to_string())
    }
}

/// Classify a non-2xx reply to `POST /auth/login`.
pub fn login_failure(status: u16, body: &str) -> AuthError {
    let message = error_message(body);
    match status {
        400 | 401 | 403 => AuthError::InvalidCredentials(
            message.unwrap_or_else(|| "Invalid email or password.".to_owned()),
        ),
        _ => service_error(status, message),
    }
}

/// Classify a non-2xx reply to `POST /auth/signup`.
///
/// The backend reports an existing email as a plain 400, so the message text
/// is consulted before falling back to a validation error.
pub fn signup_failure(status: u16, body: &str) -> AuthError {
    let message = error_message(body);
    match status {
        409 => AuthError::DuplicateAccount(message.unwrap_or_else(duplicate_account_message)),
        400 | 422 => match message {
            Some(text) if mentions_existing_account(&text) => AuthError::DuplicateAccount(text),
            Some(text) => AuthError::ValidationError(text),
            None => AuthError::ValidationError("Please check the form and try again.".to_owned()),
        },
        _ => service_error(status, message),
    }
}

/// Classify a non-2xx reply to an authenticated data call.
pub fn data_failure(status: u16, body: &str) -> AuthError {
    if status == 401 {
        return AuthError::ExpiredSession;
    }
    service_error(status, error_message(body))
}

/// A 2xx reply whose body could not be decoded.
pub fn malformed_response(status: u16, err: &serde_json::Error) -> AuthError {
    AuthError::ServiceError { status, message: format!("malformed response: {err}") }
}

fn service_error(status: u16, message: Option<String>) -> AuthError {
    AuthError::ServiceError {
        status,
        message: message.unwrap_or_else(|| "Request failed.".to_owned()),
    }
}

fn duplicate_account_message() -> String {
    "This email is already registered. Please try logging in instead.".to_owned()
}

fn mentions_existing_account(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("already registered") || lowered.contains("already exists") || lowered.contains("already in use")
}

/// Human-readable message from an error body: `error`, then `message`, then
/// the raw text when it is not JSON. Truncated for display.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let text = match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed.error.or(parsed.message)?,
        Err(_) if trimmed.starts_with('{') => return None,
        Err(_) => trimmed.to_owned(),
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.chars().take(MAX_ERROR_CHARS).collect())
    }
}
