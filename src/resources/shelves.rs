use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::{Client, ClientError, Response};

const BOOKSHELVES: Collection = Collection {
    name: "books.mylibrary.bookshelves.list",
    path_template: "mylibrary/bookshelves",
    path_params: &[],
};

/// A bookshelf of the authenticated user.
///
/// Fields are optional because a field mask may leave any of them out.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `PUBLIC` or `PRIVATE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes_last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Query parameters of `books.mylibrary.bookshelves.list`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ShelvesListOptions {
    /// String to identify the originator of this request.
    #[serde(rename = "source")]
    pub source: String,
    /// Field mask restricting the returned fields.
    #[serde(rename = "fields")]
    pub fields: String,
}

/// Bookshelves service.
#[derive(Clone, Copy, Debug)]
pub struct Shelves<'a> {
    client: &'a Client,
}

impl<'a> Shelves<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Calls `books.mylibrary.bookshelves.list`.
    pub fn list(
        &self,
        options: Option<&ShelvesListOptions>,
    ) -> Result<(Vec<Shelf>, Response), ClientError> {
        self.client.list_collection(&BOOKSHELVES, &[], options)
    }
}
