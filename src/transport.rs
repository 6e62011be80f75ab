use std::fmt;
use std::io::Read;

use reqwest::StatusCode;
use reqwest::blocking::Request;
use reqwest::header::HeaderMap;

use crate::ClientError;

/// Executes one HTTP exchange on behalf of [`crate::Client`].
///
/// The client builds a complete [`Request`] (URL, headers, body) and hands it
/// to the transport; timeouts, proxies, TLS and connection pooling are the
/// transport's business. Implementations must be safe to share across threads
/// if the client is.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends `request` and returns the response with its body unread.
    fn execute(&self, request: Request) -> Result<HttpResponse, ClientError>;
}

/// A response as returned by a [`Transport`], body still streaming.
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    /// Creates a response whose body is read from `body`.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Read + 'static) -> Self {
        Self {
            status,
            headers,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl Transport for reqwest::blocking::Client {
    fn execute(&self, request: Request) -> Result<HttpResponse, ClientError> {
        let response = Self::execute(self, request)?;
        let status = response.status();
        let headers = response.headers().clone();
        Ok(HttpResponse::new(status, headers, response))
    }
}
