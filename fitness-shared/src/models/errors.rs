use serde::{Deserialize, Serialize};

/// Error body returned by the backend services.
///
/// Every field is optional because the gateway, the services and the identity
/// provider all shape their errors slightly differently.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status echoed in the body.
    #[serde(default)]
    pub status: Option<u16>,
    /// Short reason phrase, e.g. `Not Found`.
    #[serde(default)]
    pub error: Option<String>,
    /// Human readable detail.
    #[serde(default)]
    pub message: Option<String>,
    /// Request path that failed.
    #[serde(default)]
    pub path: Option<String>,
}

impl ErrorResponse {
    /// Creates an error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Parses a response body, returning `None` for bodies that are not JSON objects.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Most specific description available.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .or(self.error.as_deref())
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, self.summary()) {
            (Some(status), Some(summary)) => write!(f, "{status}: {summary}"),
            (None, Some(summary)) => f.write_str(summary),
            (Some(status), None) => write!(f, "{status}"),
            (None, None) => f.write_str("unknown error"),
        }
    }
}

impl std::error::Error for ErrorResponse {}
