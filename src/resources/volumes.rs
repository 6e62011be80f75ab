use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::{Client, ClientError, Response};

const SHELF_VOLUMES: Collection = Collection {
    name: "books.mylibrary.bookshelves.volumes.list",
    path_template: "mylibrary/bookshelves/{shelf}/volumes",
    path_params: &["shelf"],
};

/// A volume placed on one of the user's bookshelves.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(rename = "volumeInfo", skip_serializing_if = "Option::is_none")]
    pub info: Option<VolumeInfo>,
}

/// Bibliographic data of a [`Volume`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

/// Query parameters of `books.mylibrary.bookshelves.volumes.list`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VolumesListOptions {
    /// Maximum number of results to return.
    #[serde(rename = "maxResults")]
    pub max_results: u32,
    /// Index of the first element to return (starts at 0).
    #[serde(rename = "startIndex")]
    pub start_index: u32,
    /// Full-text search query string in this bookshelf.
    #[serde(rename = "q")]
    pub query: String,
    /// `full` or `lite`.
    #[serde(rename = "projection")]
    pub projection: String,
    /// ISO-3166-1 country code, for restricting results.
    #[serde(rename = "country")]
    pub country: String,
    #[serde(rename = "source")]
    pub source: String,
    #[serde(rename = "fields")]
    pub fields: String,
}

/// Service for volumes on a bookshelf.
#[derive(Clone, Copy, Debug)]
pub struct Volumes<'a> {
    client: &'a Client,
}

impl<'a> Volumes<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Calls `books.mylibrary.bookshelves.volumes.list` for the shelf
    /// `shelf_id`.
    ///
    /// An empty `shelf_id` fails with [`ClientError::MissingPathParameter`]
    /// without sending a request.
    pub fn list(
        &self,
        shelf_id: &str,
        options: Option<&VolumesListOptions>,
    ) -> Result<(Vec<Volume>, Response), ClientError> {
        self.client
            .list_collection(&SHELF_VOLUMES, &[("shelf", shelf_id)], options)
    }
}
