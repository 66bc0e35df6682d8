//! Error types for the accounts API client.
//!
//! # Design
//! Every failure is returned to the immediate caller; nothing is retried or
//! swallowed. Server-side rejections (non-2xx) are kept apart from local
//! failures in `ApiError` so callers can match on the status and message the
//! API produced, while `ClientError` covers the whole pipeline.

use thiserror::Error;

use crate::http::Response;

/// Boxed error produced by a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The server answered with a status outside 200..=299.
///
/// Only ever constructed by the response classifier for non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} {}: {} {}", .response.method, .response.url, .response.status, .message)]
pub struct ApiError {
    /// Method, URL, status and headers of the failed exchange.
    pub response: Response,
    /// `error_message` from the body, or the raw body text.
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        self.response.status
    }
}

/// Errors returned by the client pipeline.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL or the relative path could not be parsed or joined.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server returned a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx body did not match the expected shape. The raw body is kept for
    /// diagnostics.
    #[error("{} {}: {} could not decode body: {source}", .response.method, .response.url, .response.status)]
    Decode {
        response: Response,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The API rejection, if this error came from a non-2xx response.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}
