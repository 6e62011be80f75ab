use std::io::{self, Read, Write};
use std::sync::Arc;

use reqwest::blocking::{Body, Request};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ApiError, ErrorBody, ErrorEnvelope};
use crate::resources::{Annotations, Shelves, Volumes};
use crate::{ClientBuilder, ClientError, HttpResponse};

const MEDIA_TYPE: &str = "application/json";

/// Upper bound on unread body bytes consumed before a response is released.
///
/// Draining lets the transport reuse the connection; the cap keeps a large
/// unread remainder from costing more than opening a new one.
pub const DRAIN_LIMIT: u64 = 512;

/// Blocking client for the Books API.
///
/// Cloning is cheap: clones share one immutable configuration and transport.
/// The client keeps no per-call state, so it can be used from several threads
/// as long as the transport allows it.
#[derive(Clone, Debug)]
pub struct Client {
    config: Arc<Config>,
}

/// Status, headers and pagination metadata of a completed call.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Continuation token of a listing call, if the server returned one.
    ///
    /// Pass it back as `page_token` to fetch the next page. It is never
    /// followed automatically.
    pub next_page_token: Option<String>,
}

impl Response {
    fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            status,
            headers,
            next_page_token: None,
        }
    }
}

impl Client {
    /// Creates a client for the public endpoint without credentials.
    pub fn new() -> Result<Self, ClientError> {
        ClientBuilder::new().build()
    }

    /// Starts configuring a client; see [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Value of the `User-Agent` header sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent_text
    }

    /// Bookshelves of the authenticated user.
    pub fn shelves(&self) -> Shelves<'_> {
        Shelves::new(self)
    }

    /// Volumes placed on the user's bookshelves.
    pub fn volumes(&self) -> Volumes<'_> {
        Volumes::new(self)
    }

    /// Annotations made by the authenticated user.
    pub fn annotations(&self) -> Annotations<'_> {
        Annotations::new(self)
    }

    /// Builds an API request.
    ///
    /// `path` is resolved relative to the base URL and must not start with a
    /// slash; a leading slash resolves against the host root instead, which
    /// addresses a different resource. When `body` is given it is encoded as
    /// JSON; an encoding failure returns [`ClientError::Json`] and no request.
    pub fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        let payload = body.map(serde_json::to_vec).transpose()?;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(USER_AGENT, self.config.user_agent.clone());
        if let Some(authorization) = &self.config.authorization {
            headers.insert(AUTHORIZATION, authorization.clone());
        }

        if let Some(payload) = payload {
            *request.body_mut() = Some(Body::from(payload));
        }

        Ok(request)
    }

    /// Sends `request` and decodes a successful JSON body into `T`.
    ///
    /// An empty body decodes to `T::default()`. Non-success statuses are
    /// returned as [`ClientError::Api`].
    pub fn execute_json<T>(&self, request: Request) -> Result<(T, Response), ClientError>
    where
        T: DeserializeOwned + Default,
    {
        let mut http = self.send(request)?;
        let response = Response::new(http.status, http.headers.clone());

        let mut payload = Vec::new();
        if let Err(source) = http.body.read_to_end(&mut payload) {
            return Err(ClientError::Body {
                response: Box::new(response),
                source,
            });
        }
        release(http.body);

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok((T::default(), response));
        }

        match serde_json::from_slice(&payload) {
            Ok(value) => Ok((value, response)),
            Err(source) => Err(ClientError::Decode {
                response: Box::new(response),
                source,
            }),
        }
    }

    /// Sends `request` and streams a successful body into `writer` undecoded.
    ///
    /// A failed copy, on either the body or the writer side, is reported as
    /// [`ClientError::Body`] together with the response status and headers.
    pub fn execute_to_writer<W>(
        &self,
        request: Request,
        writer: &mut W,
    ) -> Result<Response, ClientError>
    where
        W: Write + ?Sized,
    {
        let mut http = self.send(request)?;
        let response = Response::new(http.status, http.headers.clone());
        if let Err(source) = io::copy(&mut http.body, writer) {
            return Err(ClientError::Body {
                response: Box::new(response),
                source,
            });
        }
        release(http.body);
        Ok(response)
    }

    /// Sends `request` and ignores a successful body.
    pub fn execute_discard(&self, request: Request) -> Result<Response, ClientError> {
        let http = self.send(request)?;
        let response = Response::new(http.status, http.headers.clone());
        release(http.body);
        Ok(response)
    }

    fn send(&self, request: Request) -> Result<HttpResponse, ClientError> {
        let method = request.method().clone();
        let url = request.url().clone();
        log::debug!("{method} {url}");

        let response = self.config.transport.execute(request)?;
        log::debug!("{method} {url} -> {}", response.status);
        check_response(response)
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        self.config
            .base_url
            .join(path)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}

/// Classifies a response by status.
///
/// Success statuses (200-299) pass through untouched. Any other status is
/// turned into [`ClientError::Api`]: the body is read in full and decoded as
/// an error envelope when present. An empty or undecodable body still yields
/// the error, carrying only the status and headers.
pub fn check_response(mut response: HttpResponse) -> Result<HttpResponse, ClientError> {
    if response.status.is_success() {
        return Ok(response);
    }

    let mut payload = Vec::new();
    if let Err(err) = response.body.read_to_end(&mut payload) {
        log::warn!(
            "failed to read error body for status {}: {err}",
            response.status
        );
    }

    let body = if payload.iter().all(u8::is_ascii_whitespace) {
        ErrorBody::default()
    } else {
        match serde_json::from_slice::<ErrorEnvelope>(&payload) {
            Ok(envelope) => envelope.error,
            Err(err) => {
                log::warn!(
                    "undecodable error body for status {}: {err}",
                    response.status
                );
                ErrorBody::default()
            }
        }
    };

    Err(ClientError::Api(Box::new(ApiError {
        response: Response::new(response.status, response.headers),
        body,
    })))
}

fn release(body: Box<dyn Read>) {
    let mut remainder = body.take(DRAIN_LIMIT);
    match io::copy(&mut remainder, &mut io::sink()) {
        Ok(0) => {}
        Ok(drained) => log::trace!("drained {drained} unread response bytes"),
        Err(err) => log::trace!("failed to drain response body: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::{self, Cursor, Read};
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use reqwest::blocking::Request;
    use reqwest::header::{
        ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT,
    };
    use reqwest::{Method, StatusCode};
    use serde::{Deserialize, Serialize};

    use super::{Client, DRAIN_LIMIT, check_response};
    use crate::{ClientError, ErrorBody, HttpResponse, Transport};

    /// Answers every request with one canned status and body.
    #[derive(Debug)]
    struct CannedTransport {
        status: StatusCode,
        body: &'static str,
    }

    impl Transport for CannedTransport {
        fn execute(&self, _request: Request) -> Result<HttpResponse, ClientError> {
            Ok(HttpResponse::new(
                self.status,
                request_id_headers(),
                Cursor::new(self.body.as_bytes().to_vec()),
            ))
        }
    }

    /// Answers 200 with a body whose connection resets after a few bytes.
    #[derive(Debug)]
    struct ResetTransport;

    struct ResetReader {
        sent: bool,
    }

    impl Read for ResetReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.sent = true;
            let chunk = br#"{"id":"#;
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    impl Transport for ResetTransport {
        fn execute(&self, _request: Request) -> Result<HttpResponse, ClientError> {
            Ok(HttpResponse::new(
                StatusCode::OK,
                request_id_headers(),
                ResetReader { sent: false },
            ))
        }
    }

    fn request_id_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-42"));
        headers
    }

    /// Counts how many bytes were pulled out of a response body.
    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        consumed: Arc<Mutex<usize>>,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            *self.consumed.lock().expect("lock") += n;
            Ok(n)
        }
    }

    #[derive(Debug)]
    struct LargeBodyTransport {
        consumed: Arc<Mutex<usize>>,
    }

    impl Transport for LargeBodyTransport {
        fn execute(&self, _request: Request) -> Result<HttpResponse, ClientError> {
            let reader = CountingReader {
                inner: Cursor::new(vec![b'x'; 4096]),
                consumed: Arc::clone(&self.consumed),
            };
            Ok(HttpResponse::new(StatusCode::OK, HeaderMap::new(), reader))
        }
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Item {
        id: Option<i64>,
    }

    fn client_with(status: StatusCode, body: &'static str) -> Client {
        Client::builder()
            .base_url("https://example.com/books/v1")
            .transport(CannedTransport { status, body })
            .build()
            .expect("valid config")
    }

    fn canned_response(status: StatusCode, body: &'static str) -> HttpResponse {
        HttpResponse::new(status, HeaderMap::new(), Cursor::new(body.as_bytes().to_vec()))
    }

    #[test]
    fn joins_paths_from_base_with_nested_prefix() {
        let client = client_with(StatusCode::OK, "");
        let resolved = client.build_url("mylibrary/bookshelves").expect("valid path");
        assert_eq!(
            resolved.as_str(),
            "https://example.com/books/v1/mylibrary/bookshelves"
        );
    }

    #[test]
    fn leading_slash_resolves_against_host_root() {
        let client = client_with(StatusCode::OK, "");
        let resolved = client.build_url("/mylibrary/bookshelves").expect("valid path");
        assert_eq!(resolved.as_str(), "https://example.com/mylibrary/bookshelves");
    }

    #[test]
    fn new_request_sets_standard_headers() {
        let client = Client::builder()
            .base_url("https://example.com/books/v1/")
            .bearer_token("token-123")
            .user_agent("tests")
            .build()
            .expect("valid config");

        let request = client
            .new_request::<()>(Method::GET, "mylibrary/annotations", None)
            .expect("request builds");

        assert_eq!(request.method(), &Method::GET);
        assert!(request.body().is_none());
        let headers = request.headers();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[USER_AGENT], client.user_agent());
        assert_eq!(headers[AUTHORIZATION], "Bearer token-123");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn new_request_encodes_json_body() {
        #[derive(Serialize)]
        struct Shelf<'a> {
            title: &'a str,
        }

        let client = client_with(StatusCode::OK, "");
        let request = client
            .new_request(
                Method::POST,
                "mylibrary/bookshelves",
                Some(&Shelf { title: "Reading" }),
            )
            .expect("request builds");

        let body = request
            .body()
            .and_then(|body| body.as_bytes())
            .expect("buffered body");
        assert_eq!(body, br#"{"title":"Reading"}"#);
    }

    #[test]
    fn new_request_without_credential_sends_no_authorization() {
        let client = client_with(StatusCode::OK, "");
        let request = client
            .new_request::<()>(Method::GET, "mylibrary/bookshelves", None)
            .expect("request builds");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn execute_json_treats_empty_body_as_default() {
        let client = client_with(StatusCode::NO_CONTENT, "");
        let request = client
            .new_request::<()>(Method::GET, "items", None)
            .expect("request builds");
        let (item, response) = client.execute_json::<Item>(request).expect("empty body is fine");
        assert_eq!(item, Item::default());
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert_eq!(response.next_page_token, None);
    }

    #[test]
    fn execute_json_reports_malformed_success_body() {
        let client = client_with(StatusCode::OK, "not json");
        let request = client
            .new_request::<()>(Method::GET, "items", None)
            .expect("request builds");
        let error = client.execute_json::<Item>(request).expect_err("invalid JSON");
        assert_matches!(
            &error,
            ClientError::Decode { response, .. } if response.status == StatusCode::OK
        );
        assert_eq!(error.status(), Some(StatusCode::OK));
        let response = error.response().expect("response metadata");
        assert_eq!(response.headers["x-request-id"], "req-42");
    }

    #[test]
    fn execute_json_reports_interrupted_body_with_metadata() {
        let client = Client::builder()
            .transport(ResetTransport)
            .build()
            .expect("valid config");
        let request = client
            .new_request::<()>(Method::GET, "items", None)
            .expect("request builds");

        let error = client
            .execute_json::<Item>(request)
            .expect_err("body read fails");

        assert_matches!(
            &error,
            ClientError::Body { source, .. } if source.kind() == io::ErrorKind::ConnectionReset
        );
        assert_eq!(error.status(), Some(StatusCode::OK));
        let response = error.response().expect("response metadata");
        assert_eq!(response.headers["x-request-id"], "req-42");
    }

    #[test]
    fn execute_to_writer_reports_interrupted_body_with_metadata() {
        let client = Client::builder()
            .transport(ResetTransport)
            .build()
            .expect("valid config");
        let request = client
            .new_request::<()>(Method::GET, "items", None)
            .expect("request builds");

        let mut sink = Vec::new();
        let error = client
            .execute_to_writer(request, &mut sink)
            .expect_err("body read fails");

        assert_matches!(&error, ClientError::Body { .. });
        assert_eq!(error.status(), Some(StatusCode::OK));
    }

    #[test]
    fn new_request_rejects_unencodable_body() {
        let client = client_with(StatusCode::OK, "");
        let body: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);

        let result = client.new_request(Method::POST, "mylibrary/bookshelves", Some(&body));

        assert_matches!(result, Err(ClientError::Json(_)));
    }

    #[test]
    fn local_failures_carry_no_response() {
        let error = ClientError::MissingPathParameter {
            collection: "books.mylibrary.bookshelves.volumes.list",
            parameter: "shelf",
        };
        assert!(error.response().is_none());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn execute_to_writer_copies_raw_body() {
        let client = client_with(StatusCode::OK, r#"{"id": 7}"#);
        let request = client
            .new_request::<()>(Method::GET, "items", None)
            .expect("request builds");
        let mut sink = Vec::new();
        let response = client
            .execute_to_writer(request, &mut sink)
            .expect("writes body");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(sink, br#"{"id": 7}"#);
    }

    #[test]
    fn execute_discard_drains_a_bounded_prefix() {
        let consumed = Arc::new(Mutex::new(0));
        let client = Client::builder()
            .transport(LargeBodyTransport {
                consumed: Arc::clone(&consumed),
            })
            .build()
            .expect("valid config");
        let request = client
            .new_request::<()>(Method::GET, "items", None)
            .expect("request builds");

        client.execute_discard(request).expect("success status");

        let drained = u64::try_from(*consumed.lock().expect("lock")).expect("fits");
        assert_eq!(drained, DRAIN_LIMIT);
    }

    #[test]
    fn check_response_passes_success_through() {
        let response = check_response(canned_response(StatusCode::CREATED, "{}")).expect("2xx");
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[test]
    fn check_response_decodes_error_envelope() {
        let body = r#"{"error":{"code":403,"message":"Daily Limit Exceeded","errors":[{"reason":"dailyLimitExceeded","message":"Daily Limit Exceeded"},{"reason":"quota","message":"Try later"}]}}"#;
        let error = check_response(canned_response(StatusCode::FORBIDDEN, body))
            .expect_err("403 is an error");

        assert_eq!(error.status(), Some(StatusCode::FORBIDDEN));
        let api = error.as_api_error().expect("api error");
        assert_eq!(api.body.code, Some(403));
        assert_eq!(api.body.message.as_deref(), Some("Daily Limit Exceeded"));
        let reasons: Vec<_> = api
            .body
            .errors
            .iter()
            .map(|item| item.reason.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(reasons, ["dailyLimitExceeded", "quota"]);
        assert_eq!(
            error.to_string(),
            "server returned status 403 Forbidden: Daily Limit Exceeded"
        );
    }

    #[test]
    fn check_response_reports_empty_error_body() {
        let error = check_response(canned_response(StatusCode::NOT_FOUND, ""))
            .expect_err("404 is an error");
        let api = error.as_api_error().expect("api error");
        assert_eq!(api.response.status, StatusCode::NOT_FOUND);
        assert_eq!(api.body, ErrorBody::default());
    }

    #[test]
    fn check_response_tolerates_non_json_error_body() {
        let error = check_response(canned_response(
            StatusCode::BAD_GATEWAY,
            "<html>upstream failed</html>",
        ))
        .expect_err("502 is an error");
        assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(error.to_string(), "server returned status 502 Bad Gateway");
    }
}
