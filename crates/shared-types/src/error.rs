use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    RateLimited,
    ServiceUnavailable,
    InternalError,
    /// The request never produced an HTTP response.
    Network,
    /// The response arrived but its body did not match the expected shape.
    Decode,
}

impl AppErrorKind {
    /// Lowercase label used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppErrorKind::NotFound => "not found",
            AppErrorKind::BadRequest => "bad request",
            AppErrorKind::ValidationError => "validation failed",
            AppErrorKind::Conflict => "conflict",
            AppErrorKind::Unauthorized => "unauthorized",
            AppErrorKind::Forbidden => "forbidden",
            AppErrorKind::RateLimited => "rate limited",
            AppErrorKind::ServiceUnavailable => "service unavailable",
            AppErrorKind::InternalError => "internal error",
            AppErrorKind::Network => "network error",
            AppErrorKind::Decode => "unreadable response",
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error returned by every admin API call and local validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn with_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::BadRequest, message)
    }

    /// A failure caught before any request is made.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::ValidationError, message)
    }

    pub fn validation_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), message.clone());
        Self {
            kind: AppErrorKind::ValidationError,
            message,
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::InternalError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Decode, message)
    }

    /// Map an HTTP status code to an error kind.
    pub fn kind_for_status(status: u16) -> AppErrorKind {
        match status {
            400 => AppErrorKind::BadRequest,
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            422 => AppErrorKind::ValidationError,
            429 => AppErrorKind::RateLimited,
            502..=504 => AppErrorKind::ServiceUnavailable,
            _ => AppErrorKind::InternalError,
        }
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// The API puts a human-readable reason in `message` (older endpoints use
    /// `error`). When the body is not JSON or carries neither field, the
    /// message is left empty so callers fall back to their own wording.
    pub fn from_status(status: u16, body: &str) -> Self {
        let mut err = Self::with_kind(Self::kind_for_status(status), "");
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
            {
                err.message = msg.to_string();
            }
            if let Some(fields) = value.get("errors").and_then(|e| e.as_object()) {
                for (field, msg) in fields {
                    if let Some(msg) = msg.as_str() {
                        err.field_errors.insert(field.clone(), msg.to_string());
                    }
                }
            }
        }
        err
    }

    /// The message to show a user, or `fallback` when the server did not
    /// supply one. Transport and decode failures always use the fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        match self.kind {
            AppErrorKind::Network | AppErrorKind::Decode => fallback.to_string(),
            _ if self.message.trim().is_empty() => fallback.to_string(),
            _ => self.message.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_lifts_server_message() {
        let err = AppError::from_status(400, r#"{"success":false,"message":"User already suspended"}"#);
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "User already suspended");
    }

    #[test]
    fn from_status_accepts_error_field() {
        let err = AppError::from_status(403, r#"{"error":"Admin role required"}"#);
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert_eq!(err.message, "Admin role required");
    }

    #[test]
    fn from_status_collects_field_errors() {
        let err = AppError::from_status(
            422,
            r#"{"message":"Validation failed","errors":{"reason":"is required"}}"#,
        );
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.field_errors.get("reason").unwrap(), "is required");
    }

    #[test]
    fn from_status_with_html_body_leaves_message_empty() {
        let err = AppError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.kind, AppErrorKind::ServiceUnavailable);
        assert!(err.message.is_empty());
        assert_eq!(err.message_or("Failed to load disputes"), "Failed to load disputes");
    }

    #[test]
    fn message_or_prefers_server_message() {
        let err = AppError::bad_request("Reason too short");
        assert_eq!(err.message_or("Failed to suspend users"), "Reason too short");
    }

    #[test]
    fn message_or_hides_transport_details() {
        let err = AppError::network("error sending request for url (http://localhost:5000)");
        assert_eq!(err.message_or("Failed to export users"), "Failed to export users");
        let err = AppError::decode("missing field `id` at line 1 column 2");
        assert_eq!(err.message_or("Failed to export users"), "Failed to export users");
    }

    #[test]
    fn kind_for_status_mapping() {
        assert_eq!(AppError::kind_for_status(401), AppErrorKind::Unauthorized);
        assert_eq!(AppError::kind_for_status(404), AppErrorKind::NotFound);
        assert_eq!(AppError::kind_for_status(429), AppErrorKind::RateLimited);
        assert_eq!(AppError::kind_for_status(503), AppErrorKind::ServiceUnavailable);
        assert_eq!(AppError::kind_for_status(500), AppErrorKind::InternalError);
    }

    #[test]
    fn validation_field_records_the_field() {
        let err = AppError::validation_field("reason", "Please provide a reason for suspension");
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(
            err.field_errors.get("reason").unwrap(),
            "Please provide a reason for suspension"
        );
    }

    #[test]
    fn display_impl_formats_correctly() {
        let err = AppError::unauthorized("bad credentials");
        assert_eq!(format!("{}", err), "unauthorized: bad credentials");
        assert_eq!(format!("{}", AppError::from_status(500, "")), "internal error");
    }

    #[test]
    fn error_roundtrip_through_json() {
        let err = AppError::validation_field("amount", "must be positive");
        let json = serde_json::to_string(&err).unwrap();
        let parsed: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}
