//! Blocking Rust client for the Google Books `mylibrary` API.
//!
//! Public API layers:
//! - [`Client`]/[`ClientBuilder`]: endpoint configuration, request building
//!   and response classification.
//! - [`Shelves`], [`Volumes`], [`Annotations`]: typed list methods for the
//!   three collections, reached through [`Client::shelves`] and friends.
//! - [`Transport`]: the seam the HTTP exchange goes through; implemented for
//!   `reqwest::blocking::Client`.
//! - [`ClientError`]: unified error type used by all calls.
//!
//! ```no_run
//! use books_client::{Client, VolumesListOptions};
//!
//! let client = Client::builder().bearer_token("ya29.token").build()?;
//! let options = VolumesListOptions {
//!     max_results: 5,
//!     ..Default::default()
//! };
//! let (volumes, response) = client.volumes().list("0", Some(&options))?;
//! println!("{} volumes, status {}", volumes.len(), response.status);
//! # Ok::<(), books_client::ClientError>(())
//! ```

mod blocking_client;
mod collection;
mod config;
mod error;
mod query;
mod resources;
mod transport;

pub use blocking_client::{Client, DRAIN_LIMIT, Response, check_response};
pub use collection::Collection;
pub use config::{ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ApiError, ClientError, ErrorBody, ErrorItem};
pub use query::add_options;
pub use resources::{
    Annotation, Annotations, AnnotationsListOptions, Shelf, Shelves, ShelvesListOptions, Volume,
    VolumeInfo, Volumes, VolumesListOptions,
};
pub use transport::{HttpResponse, Transport};
