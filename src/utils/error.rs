use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    ModelError(String),
    NotFound(String),
    InvalidCredentials,
    InvalidRequest(String),
}

impl AppError {
    /// Raw underlying message, without the variant prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::ModelError(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidRequest(msg) => msg,
            AppError::InvalidCredentials => "Invalid credentials",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::ModelError(msg) => write!(f, "Model error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

/// JSON body returned on every failure path.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    /// Rejection without an underlying cause (404, 401).
    pub fn rejected(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            error: None,
        }
    }

    /// Failure that carries the underlying error message, unless details are hidden.
    pub fn failed(message: &str, cause: &str, expose_details: bool) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            error: expose_details.then(|| cause.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_prefix() {
        let err = AppError::DatabaseError("connection refused".to_string());
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.to_string(), "Database error: connection refused");
    }

    #[test]
    fn test_failed_envelope_hides_details() {
        let shown = serde_json::to_value(ErrorEnvelope::failed("Login failed.", "boom", true)).unwrap();
        assert_eq!(shown["error"], "boom");

        let hidden = serde_json::to_value(ErrorEnvelope::failed("Login failed.", "boom", false)).unwrap();
        assert!(hidden.get("error").is_none());
        assert_eq!(hidden["status"], "error");
        assert_eq!(hidden["message"], "Login failed.");
    }

    #[test]
    fn test_rejected_envelope_has_no_error_field() {
        let body = serde_json::to_value(ErrorEnvelope::rejected("User not found.")).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "error", "message": "User not found." }));
    }
}
