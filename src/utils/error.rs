use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid field '{field}': {reason}")]
    InvalidFieldError { field: String, reason: String },

    #[error("Malformed request body: {message}")]
    MalformedBodyError { message: String },

    #[error("Payload too large: limit is {limit} bytes")]
    PayloadTooLargeError { limit: usize },

    #[error("Unauthorized: {reason}")]
    UnauthorizedError { reason: String },

    #[error("Not found: {resource}")]
    NotFoundError { resource: String },

    #[error("Mail delivery failed: {message}")]
    MailError { message: String },

    #[error("Payment provider error: {message}")]
    PaymentError { message: String },

    #[error("Chat backend error: {message}")]
    ChatError { message: String },

    #[error("Webhook relay failed: {message}")]
    WebhookError { message: String },
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authentication,
    NotFound,
    Downstream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn missing(field: &str) -> Self {
        SiteError::MissingFieldError {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SiteError::InvalidFieldError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::MissingFieldError { .. }
            | SiteError::InvalidFieldError { .. }
            | SiteError::MalformedBodyError { .. }
            | SiteError::PayloadTooLargeError { .. } => ErrorCategory::Validation,
            SiteError::UnauthorizedError { .. } => ErrorCategory::Authentication,
            SiteError::NotFoundError { .. } => ErrorCategory::NotFound,
            SiteError::HttpError(_)
            | SiteError::MailError { .. }
            | SiteError::PaymentError { .. }
            | SiteError::ChatError { .. }
            | SiteError::WebhookError { .. } => ErrorCategory::Downstream,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SiteError::IoError(_) | SiteError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Authentication | ErrorCategory::Downstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::PayloadTooLargeError { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            SiteError::UnauthorizedError { .. } => StatusCode::UNAUTHORIZED,
            SiteError::NotFoundError { .. } => StatusCode::NOT_FOUND,
            _ => match self.category() {
                ErrorCategory::Validation => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message safe to hand back to a browser. Downstream and system details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::MissingFieldError { field } => format!("Missing required field: {}", field),
            SiteError::InvalidFieldError { field, reason } => format!("Invalid {}: {}", field, reason),
            SiteError::MalformedBodyError { .. } => "Request body could not be parsed".to_string(),
            SiteError::PayloadTooLargeError { limit } => {
                format!("Upload exceeds the {} byte limit", limit)
            }
            SiteError::UnauthorizedError { .. } => "Authentication required".to_string(),
            SiteError::NotFoundError { resource } => format!("{} not found", resource),
            SiteError::MailError { .. } => "Failed to send email".to_string(),
            SiteError::PaymentError { .. } | SiteError::HttpError(_) => {
                "Failed to reach an upstream service".to_string()
            }
            SiteError::ChatError { .. } => "Chat is unavailable right now".to_string(),
            SiteError::WebhookError { .. } => "Failed to process the document".to_string(),
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => {
                "The server is misconfigured".to_string()
            }
            SiteError::IoError(_) | SiteError::SerializationError(_) => {
                "Internal server error".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::MissingFieldError { .. }
            | SiteError::InvalidFieldError { .. }
            | SiteError::MalformedBodyError { .. } => "Correct the request payload and resubmit",
            SiteError::PayloadTooLargeError { .. } => {
                "Upload a smaller file or raise server.max_upload_bytes"
            }
            SiteError::UnauthorizedError { .. } => "Sign in again to obtain a fresh session",
            SiteError::NotFoundError { .. } => "Check the requested path",
            SiteError::MailError { .. } => "Check mail.api_url, mail.api_key and the provider status",
            SiteError::PaymentError { .. } => {
                "Check payment.secret_key and that the price ID exists in the provider account"
            }
            SiteError::ChatError { .. } => "Check chat.llm settings or switch chat.backend to canned",
            SiteError::WebhookError { .. } => "Check webhook.enrich_url and the workflow engine logs",
            SiteError::HttpError(_) => "Check network connectivity to the upstream service",
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and restart the server"
            }
            SiteError::IoError(_) => "Check file paths and permissions",
            SiteError::SerializationError(_) => "Check that data files contain valid JSON",
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                category = ?self.category(),
                severity = ?self.severity(),
                "❌ {}",
                self
            );
        } else {
            tracing::warn!(category = ?self.category(), "⚠️ {}", self);
        }

        let body = serde_json::json!({ "error": self.user_friendly_message() });
        (status, Json(body)).into_response()
    }
}
