use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::query::add_options;
use crate::{Client, ClientError, Response};

/// A listable collection of the API.
#[derive(Clone, Copy, Debug)]
pub struct Collection {
    /// API method name, used in error messages.
    pub name: &'static str,
    /// Path relative to the base URL, potentially containing `{param}`
    /// placeholders.
    pub path_template: &'static str,
    /// Required path parameter names appearing in `path_template`.
    pub path_params: &'static [&'static str],
}

/// Response envelope shared by every list method.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListEnvelope<T> {
    pub(crate) total_items: Option<u64>,
    pub(crate) next_page_token: Option<String>,
    #[serde(default = "Vec::new")]
    pub(crate) items: Vec<T>,
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        Self {
            total_items: None,
            next_page_token: None,
            items: Vec::new(),
        }
    }
}

impl Client {
    /// Lists one page of `collection`.
    ///
    /// `path_params` fills the placeholders of the path template and `options`
    /// becomes the query string. A missing or empty required parameter fails
    /// with [`ClientError::MissingPathParameter`] before anything is sent. The
    /// page's continuation token is returned in
    /// [`Response::next_page_token`].
    pub fn list_collection<T, O>(
        &self,
        collection: &Collection,
        path_params: &[(&str, &str)],
        options: Option<&O>,
    ) -> Result<(Vec<T>, Response), ClientError>
    where
        T: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        let path = render_path(collection, path_params)?;
        let path = add_options(&path, options)?;
        let request = self.new_request::<()>(Method::GET, &path, None)?;

        let (envelope, mut response) = self.execute_json::<ListEnvelope<T>>(request)?;
        log::debug!(
            "{} returned {} of {} items",
            collection.name,
            envelope.items.len(),
            envelope
                .total_items
                .map_or_else(|| "?".to_owned(), |total| total.to_string())
        );
        response.next_page_token = envelope.next_page_token;
        Ok((envelope.items, response))
    }
}

fn render_path(
    collection: &Collection,
    path_params: &[(&str, &str)],
) -> Result<String, ClientError> {
    let mut rendered = collection.path_template.to_owned();

    for required_param in collection.path_params {
        let value = path_params
            .iter()
            .find(|(name, _)| name == required_param)
            .map(|(_, value)| *value)
            .filter(|value| !value.is_empty())
            .ok_or(ClientError::MissingPathParameter {
                collection: collection.name,
                parameter: *required_param,
            })?;

        let placeholder = format!("{{{required_param}}}");
        rendered = rendered.replace(&placeholder, &encode_path_segment(value));
    }

    Ok(rendered)
}

/// Everything outside the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
