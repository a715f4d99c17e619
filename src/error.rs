//! Error types shared by the relay.
//!
//! - `AppError` covers process-level failures (configuration, startup).
//! - `WallpaperError` is the client-facing taxonomy returned by the generate
//!   endpoint; every variant knows its wire code, HTTP status and message.
//! - `UpstreamError` describes how the outbound image API call failed.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire codes sent in the `code` field of error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPrompt,
    PromptTooLong,
    NoImageGenerated,
    AuthError,
    RateLimit,
    InvalidRequest,
    ServiceError,
    RateLimitExceeded,
    NotFound,
    PayloadTooLarge,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPrompt => "INVALID_PROMPT",
            ErrorCode::PromptTooLong => "PROMPT_TOO_LONG",
            ErrorCode::NoImageGenerated => "NO_IMAGE_GENERATED",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::ServiceError => "SERVICE_ERROR",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure outcome of a wallpaper request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WallpaperError {
    #[error("Please provide a valid prompt (at least 3 characters)")]
    InvalidPrompt,
    #[error("Prompt is too long (max 500 characters)")]
    PromptTooLong,
    #[error("No image was generated. Please try again.")]
    NoImageGenerated,
    #[error("Service configuration error. Please try again later.")]
    Auth,
    #[error("Service is busy. Please try again in a few moments.")]
    RateLimited,
    #[error("Invalid request. Please try a different prompt.")]
    InvalidRequest,
    #[error("Failed to generate wallpaper. Please try again.")]
    Service,
    #[error("Request body is too large (max 10MB)")]
    PayloadTooLarge,
}

impl WallpaperError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WallpaperError::InvalidPrompt => ErrorCode::InvalidPrompt,
            WallpaperError::PromptTooLong => ErrorCode::PromptTooLong,
            WallpaperError::NoImageGenerated => ErrorCode::NoImageGenerated,
            WallpaperError::Auth => ErrorCode::AuthError,
            WallpaperError::RateLimited => ErrorCode::RateLimit,
            WallpaperError::InvalidRequest => ErrorCode::InvalidRequest,
            WallpaperError::Service => ErrorCode::ServiceError,
            WallpaperError::PayloadTooLarge => ErrorCode::PayloadTooLarge,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WallpaperError::InvalidPrompt
            | WallpaperError::PromptTooLong
            | WallpaperError::InvalidRequest => StatusCode::BAD_REQUEST,
            WallpaperError::Auth => StatusCode::SERVICE_UNAVAILABLE,
            WallpaperError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            WallpaperError::NoImageGenerated | WallpaperError::Service => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WallpaperError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

/// `{error, code, timestamp}` body used for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: ErrorCode) -> Self {
        ErrorBody {
            error: error.into(),
            code,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for WallpaperError {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.to_string(), self.code());
        (self.status(), Json(body)).into_response()
    }
}

/// How the single outbound call failed.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No response object: connect failure, timeout, broken body.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl UpstreamError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Transport(_) => None,
            UpstreamError::Status { status, .. } => Some(*status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_in_wire_form() {
        let v = serde_json::to_value(ErrorCode::NoImageGenerated).unwrap();
        assert_eq!(v, "NO_IMAGE_GENERATED");
        let v = serde_json::to_value(ErrorCode::RateLimitExceeded).unwrap();
        assert_eq!(v, ErrorCode::RateLimitExceeded.as_str());
    }

    #[test]
    fn auth_failure_is_reported_as_unavailable() {
        assert_eq!(WallpaperError::Auth.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(WallpaperError::Auth.code(), ErrorCode::AuthError);
    }

    #[test]
    fn local_validation_errors_are_bad_requests() {
        for e in [WallpaperError::InvalidPrompt, WallpaperError::PromptTooLong] {
            assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        }
    }
}
