//! Error handling module for the store client.
//!
//! Provides a single error type with stable error codes. The boolean store
//! operations collapse every variant to `false`; the `try_*` operations hand
//! the variant back to the caller.

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const REMOTE_ERROR: &str = "REMOTE_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const MALFORMED_DOCUMENT: &str = "MALFORMED_DOCUMENT";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Store client error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The server answered with a status the operation does not accept
    Status { status: u16, message: String },
    /// The request never produced a response (connection refused, timeout, ...)
    Transport(String),
    /// A received document lacks structure every store document must have
    MalformedDocument(String),
    /// The request cannot be addressed (e.g. the store has no name)
    InvalidRequest(String),
    /// An outgoing document could not be rendered
    Serialization(String),
    /// Endpoint or credentials configuration is unusable
    Config(String),
}

impl StoreError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Status { status, .. } => match status {
                401 | 403 => codes::UNAUTHORIZED,
                404 => codes::NOT_FOUND,
                409 => codes::CONFLICT,
                400 => codes::BAD_REQUEST,
                _ => codes::REMOTE_ERROR,
            },
            StoreError::Transport(_) => codes::TRANSPORT_ERROR,
            StoreError::MalformedDocument(_) => codes::MALFORMED_DOCUMENT,
            StoreError::InvalidRequest(_) => codes::INVALID_REQUEST,
            StoreError::Serialization(_) => codes::SERIALIZATION_ERROR,
            StoreError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            StoreError::Status { status, message } => format!("HTTP {}: {}", status, message),
            StoreError::Transport(msg) => msg.clone(),
            StoreError::MalformedDocument(msg) => msg.clone(),
            StoreError::InvalidRequest(msg) => msg.clone(),
            StoreError::Serialization(msg) => msg.clone(),
            StoreError::Config(msg) => msg.clone(),
        }
    }

    /// HTTP status reported by the server, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP transport error: {:?}", err);
        match err.status() {
            Some(status) => StoreError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => StoreError::Transport(format!("Transport error: {}", err)),
        }
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::Config(format!("Invalid URL: {}", err))
    }
}

impl From<xmltree::Error> for StoreError {
    fn from(err: xmltree::Error) -> Self {
        tracing::error!("XML write error: {:?}", err);
        StoreError::Serialization(format!("XML write error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_map_to_error_codes() {
        let err = |status| StoreError::Status {
            status,
            message: String::new(),
        };
        assert_eq!(err(401).error_code(), codes::UNAUTHORIZED);
        assert_eq!(err(403).error_code(), codes::UNAUTHORIZED);
        assert_eq!(err(404).error_code(), codes::NOT_FOUND);
        assert_eq!(err(409).error_code(), codes::CONFLICT);
        assert_eq!(err(400).error_code(), codes::BAD_REQUEST);
        assert_eq!(err(500).error_code(), codes::REMOTE_ERROR);
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = StoreError::Status {
            status: 404,
            message: "No such datastore".to_string(),
        };
        assert_eq!(err.to_string(), "NOT_FOUND: HTTP 404: No such datastore");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_status_errors_have_no_status() {
        let err = StoreError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.error_code(), codes::TRANSPORT_ERROR);
    }
}
