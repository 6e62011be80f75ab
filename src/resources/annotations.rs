use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::Collection;
use crate::{Client, ClientError, Response};

const ANNOTATIONS: Collection = Collection {
    name: "books.mylibrary.annotations.list",
    path_template: "mylibrary/annotations",
    path_params: &[],
};

/// A note, highlight or bookmark made by the user in a volume.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_style: Option<String>,
    /// User-created data, kept as raw JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Query parameters of `books.mylibrary.annotations.list`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AnnotationsListOptions {
    /// Content version for the volume; required together with `volume_id`.
    #[serde(rename = "contentVersion")]
    pub content_version: String,
    /// Layer to restrict the results to.
    #[serde(rename = "layerId")]
    pub layer_id: String,
    /// Several layers to restrict the results to.
    #[serde(rename = "layerIds")]
    pub layer_ids: Vec<String>,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
    /// Continuation token from a previous page's
    /// [`Response::next_page_token`].
    #[serde(rename = "pageToken")]
    pub page_token: String,
    /// Include deleted annotations.
    #[serde(rename = "showDeleted")]
    pub show_deleted: bool,
    #[serde(rename = "source")]
    pub source: String,
    /// RFC 3339 timestamp: only annotations updated before it.
    #[serde(rename = "updatedMax")]
    pub updated_max: String,
    /// RFC 3339 timestamp: only annotations updated at or after it.
    #[serde(rename = "updatedMin")]
    pub updated_min: String,
    #[serde(rename = "volumeId")]
    pub volume_id: String,
    #[serde(rename = "fields")]
    pub fields: String,
}

/// Annotations service.
#[derive(Clone, Copy, Debug)]
pub struct Annotations<'a> {
    client: &'a Client,
}

impl<'a> Annotations<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Calls `books.mylibrary.annotations.list`.
    ///
    /// Only one page is fetched; pass the returned
    /// [`Response::next_page_token`] as
    /// [`AnnotationsListOptions::page_token`] to continue.
    pub fn list(
        &self,
        options: Option<&AnnotationsListOptions>,
    ) -> Result<(Vec<Annotation>, Response), ClientError> {
        self.client.list_collection(&ANNOTATIONS, &[], options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Annotation, AnnotationsListOptions};
    use crate::query::add_options;

    #[test]
    fn options_use_declared_parameter_names() {
        let options = AnnotationsListOptions {
            volume_id: "VN2jCgAAAEAJ".into(),
            content_version: "full-1.0.0".into(),
            layer_id: "notes".into(),
            max_results: 1,
            source: "ge-web-app1".into(),
            fields: "items(layerId,selectedText,volumeId),totalItems".into(),
            ..Default::default()
        };

        let path = add_options("mylibrary/annotations", Some(&options)).expect("encodes");
        assert_eq!(
            path,
            "mylibrary/annotations?contentVersion=full-1.0.0\
             &fields=items%28layerId%2CselectedText%2CvolumeId%29%2CtotalItems\
             &layerId=notes&maxResults=1&source=ge-web-app1&volumeId=VN2jCgAAAEAJ"
        );
    }

    #[test]
    fn omitted_fields_stay_absent() {
        let annotation: Annotation =
            serde_json::from_str(r#"{"layerId":"notes","selectedText":""}"#).expect("decodes");
        assert_eq!(annotation.layer_id.as_deref(), Some("notes"));
        assert_eq!(annotation.selected_text.as_deref(), Some(""));
        assert_eq!(annotation.volume_id, None);
        assert_eq!(annotation.page_ids, None);
    }
}
