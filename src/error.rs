use crate::rate_limit::RateLimits;
use thiserror::Error;

/// Structured error context for caller-side and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Parameter or configuration key that caused the error (e.g., "params.taxonomy", "config.method")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected shape, offending value)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "normalizer", "config_loader")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse classification of [`Error`], handy for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    BadRequest,
    Unauthorized,
    RateLimited,
    ServerError,
    Transport,
    Decode,
    Configuration,
    Io,
}

/// Unified error type for the Text API client.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input rejected before any network call was made.
    #[error("Invalid input: {message}{}", format_context(.context))]
    InvalidInput {
        message: String,
        context: ErrorContext,
    },

    #[error("Bad request: HTTP {status}: {message}")]
    BadRequest {
        status: u16,
        message: String,
        rate_limits: Option<RateLimits>,
    },

    #[error("Unauthorized: HTTP {status}: {message}")]
    Unauthorized {
        status: u16,
        message: String,
        rate_limits: Option<RateLimits>,
    },

    #[error("Rate limited: HTTP {status}: {message}")]
    RateLimited {
        status: u16,
        message: String,
        rate_limits: Option<RateLimits>,
    },

    #[error("Server error: HTTP {status}: {message}")]
    ServerError {
        status: u16,
        message: String,
        rate_limits: Option<RateLimits>,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn invalid_input_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidInput {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Map a non-2xx response onto an error kind.
    ///
    /// The message is the `error` field of a JSON body when there is one,
    /// otherwise the raw body text.
    pub fn from_status(status: u16, body: &str, rate_limits: Option<RateLimits>) -> Self {
        let message = message_from_body(body);
        match status {
            401 | 403 => Error::Unauthorized {
                status,
                message,
                rate_limits,
            },
            429 => Error::RateLimited {
                status,
                message,
                rate_limits,
            },
            400..=499 => Error::BadRequest {
                status,
                message,
                rate_limits,
            },
            _ => Error::ServerError {
                status,
                message,
                rate_limits,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::BadRequest { .. } => ErrorKind::BadRequest,
            Error::Unauthorized { .. } => ErrorKind::Unauthorized,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::ServerError { .. } => ErrorKind::ServerError,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    /// HTTP status code for errors derived from a service response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest { status, .. }
            | Error::Unauthorized { status, .. }
            | Error::RateLimited { status, .. }
            | Error::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Rate-limit metadata reported alongside an HTTP failure, if any.
    pub fn rate_limits(&self) -> Option<&RateLimits> {
        match self {
            Error::BadRequest { rate_limits, .. }
            | Error::Unauthorized { rate_limits, .. }
            | Error::RateLimited { rate_limits, .. }
            | Error::ServerError { rate_limits, .. } => rate_limits.as_ref(),
            _ => None,
        }
    }

    /// Structured context of input and configuration errors.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidInput { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}

fn message_from_body(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let field = json
            .get("error")
            .or_else(|| json.get("message"))
            .and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Object(o) => {
                    o.get("message").and_then(|m| m.as_str()).map(String::from)
                }
                _ => None,
            });
        if let Some(msg) = field {
            return msg;
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::from_status(400, "", None).kind(), ErrorKind::BadRequest);
        assert_eq!(Error::from_status(404, "", None).kind(), ErrorKind::BadRequest);
        assert_eq!(Error::from_status(401, "", None).kind(), ErrorKind::Unauthorized);
        assert_eq!(Error::from_status(403, "", None).kind(), ErrorKind::Unauthorized);
        assert_eq!(Error::from_status(429, "", None).kind(), ErrorKind::RateLimited);
        assert_eq!(Error::from_status(500, "", None).kind(), ErrorKind::ServerError);
        assert_eq!(Error::from_status(503, "", None).kind(), ErrorKind::ServerError);
    }

    #[test]
    fn test_message_prefers_json_error_field() {
        let err = Error::from_status(400, r#"{"error":"text is empty"}"#, None);
        match err {
            Error::BadRequest { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "text is empty");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Error::from_status(500, "upstream exploded\n", None);
        assert_eq!(err.to_string(), "Server error: HTTP 500: upstream exploded");
    }

    #[test]
    fn test_rate_limits_attached() {
        let limits = RateLimits {
            limit: Some(1000),
            remaining: Some(0),
            reset: Some(1_700_000_000),
        };
        let err = Error::from_status(429, "slow down", Some(limits.clone()));
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.rate_limits(), Some(&limits));
    }

    #[test]
    fn test_context_formatting() {
        let err = Error::invalid_input_with_context(
            "taxonomy is required",
            ErrorContext::new()
                .with_field_path("params.taxonomy")
                .with_source("normalizer"),
        );
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid input: taxonomy is required (field: params.taxonomy, source: normalizer)"
        );
        let ctx = err.context().unwrap();
        assert_eq!(ctx.field_path.as_deref(), Some("params.taxonomy"));
        assert!(ctx.details.is_none());
    }

    #[test]
    fn test_context_only_on_caller_side_errors() {
        let err = Error::configuration_with_context(
            "unsupported request method 'PATCH'",
            ErrorContext::new().with_field_path("config.method"),
        );
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("config.method")
        );
        assert!(Error::from_status(500, "boom", None).context().is_none());
    }
}
