use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use reqwest::header::HeaderValue;

use crate::{Client, ClientError, Transport};

/// Public endpoint of the Books v1 API.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/";

/// User agent sent when no suffix is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("books-client/", env!("CARGO_PKG_VERSION"));

/// Endpoint configuration shared by a [`Client`] and its resource services.
///
/// Fixed at [`ClientBuilder::build`]; nothing here changes per call.
#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) base_url: Url,
    pub(crate) user_agent: HeaderValue,
    pub(crate) user_agent_text: String,
    pub(crate) authorization: Option<HeaderValue>,
    pub(crate) transport: Arc<dyn Transport>,
}

/// Builder for [`Client`].
///
/// ```no_run
/// let client = books_client::Client::builder()
///     .bearer_token("ya29.token")
///     .user_agent("shelf-sync/1.2")
///     .build()?;
/// # Ok::<(), books_client::ClientError>(())
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    bearer_token: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a builder for the public endpoint, with no credential and the
    /// default `reqwest` transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the API endpoint. Defaults to [`DEFAULT_BASE_URL`].
    ///
    /// The URL is normalized to include a trailing slash, so relative resource
    /// paths join below it.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Prefixes the library user agent, producing `<suffix>+books-client/<version>`.
    ///
    /// The suffix must be visible ASCII; anything else fails in [`Self::build`].
    #[must_use]
    pub fn user_agent(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent = Some(suffix.into());
        self
    }

    /// Attaches `Authorization: Bearer <token>` to every request.
    ///
    /// Leave unset when the transport injects credentials itself.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Replaces the HTTP transport. Defaults to a `reqwest::blocking::Client`.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Validates the configuration and creates the client.
    pub fn build(self) -> Result<Client, ClientError> {
        let raw_base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_base_url)
            .map_err(|_| ClientError::InvalidBaseUrl(raw_base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(raw_base_url.to_owned()));
        }

        let user_agent_text = match &self.user_agent {
            Some(suffix) => format!("{suffix}+{DEFAULT_USER_AGENT}"),
            None => DEFAULT_USER_AGENT.to_owned(),
        };
        let user_agent = HeaderValue::from_str(&user_agent_text)
            .ok()
            .filter(|value| value.to_str().is_ok())
            .ok_or_else(|| ClientError::InvalidHeader {
                name: "user-agent",
                value: user_agent_text.clone(),
            })?;

        let authorization = self
            .bearer_token
            .as_deref()
            .map(|token| {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                    ClientError::InvalidHeader {
                        name: "authorization",
                        value: "Bearer <redacted>".to_owned(),
                    }
                })?;
                value.set_sensitive(true);
                Ok::<_, ClientError>(value)
            })
            .transpose()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(reqwest::blocking::Client::new()),
        };

        log::debug!("configured books client for {base_url}");

        Ok(Client::from_config(Config {
            base_url: ensure_trailing_slash(base_url),
            user_agent,
            user_agent_text,
            authorization,
            transport,
        }))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .finish()
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}
