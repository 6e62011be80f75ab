use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::Response;

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// A configured value cannot be sent as an HTTP header.
    #[error("invalid value for header '{name}': '{value}'")]
    InvalidHeader { name: &'static str, value: String },

    /// A required path template parameter was not provided or was empty.
    #[error("missing required path parameter '{parameter}' for '{collection}'")]
    MissingPathParameter {
        collection: &'static str,
        parameter: &'static str,
    },

    /// List options did not serialize to a flat set of query parameters.
    #[error("invalid query options: {0}")]
    InvalidQueryOptions(String),

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request body could not be serialized as JSON.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a successful response body failed part way.
    #[error("failed to read response body with status {}: {source}", .response.status)]
    Body {
        response: Box<Response>,
        source: std::io::Error,
    },

    /// A successful response carried a body that is not the expected JSON.
    #[error("failed to decode response with status {}: {source}", .response.status)]
    Decode {
        response: Box<Response>,
        source: serde_json::Error,
    },

    /// The server answered with a non-success status.
    #[error(transparent)]
    Api(#[from] Box<ApiError>),
}

impl ClientError {
    /// HTTP status of the response that caused this error.
    ///
    /// `None` means the request never produced a response, for example a local
    /// validation failure or a connection error.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|response| response.status)
    }

    /// Status and headers of the response that caused this error, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Body { response, .. } | Self::Decode { response, .. } => {
                Some(response.as_ref())
            }
            Self::Api(api) => Some(&api.response),
            _ => None,
        }
    }

    /// Returns the classified API error, if the server rejected the request.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api.as_ref()),
            _ => None,
        }
    }
}

/// A non-success response, classified.
///
/// `body` holds the decoded error envelope. When the server sent no body, or
/// one that is not an error envelope, `body` is left at its default and only
/// the status is meaningful.
#[derive(Debug)]
pub struct ApiError {
    /// Status and headers of the failed response.
    pub response: Response,
    /// Decoded `error` object of the envelope.
    pub body: ErrorBody,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body.message {
            Some(message) => write!(
                f,
                "server returned status {}: {message}",
                self.response.status
            ),
            None => write!(f, "server returned status {}", self.response.status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Top-level wrapper of an API error response: `{"error": {...}}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub(crate) error: ErrorBody,
}

/// The `error` object of an API error response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Status code echoed by the server.
    pub code: Option<u16>,
    /// Human readable message.
    pub message: Option<String>,
    /// Detailed error items, in server order.
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

/// One detail entry of an API error.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorItem {
    /// Typed error code, for example `notFound`.
    pub reason: Option<String>,
    /// Human readable description.
    pub message: Option<String>,
}
