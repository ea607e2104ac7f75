use thiserror::Error;

/// Fixed message reported when no HTTP status was obtained.
pub const TRANSPORT_ERROR_MESSAGE: &str = "An error occurred whilst sending the request.";

#[derive(Error, Debug)]
pub enum RestError {
    /// The exchange never produced a status code (connect, DNS, timeout).
    #[error("{}", TRANSPORT_ERROR_MESSAGE)]
    Transport(#[source] reqwest::Error),

    /// The server answered outside the success set. `body` is the parsed JSON
    /// error body, or `Null` when the body was empty.
    #[error("request rejected with status {status}: {body}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },

    /// The response body was not valid JSON.
    #[error("failed to decode response body (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid query parameters: {0}")]
    InvalidQuery(String),
}

impl RestError {
    /// Status code of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Rejected { status, .. } | RestError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RestError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, RestError>;
