//! Typed services for the `mylibrary` collections.
//!
//! Each service borrows a [`crate::Client`] and forwards to
//! [`crate::Client::list_collection`] with its own path, options and record
//! type.

mod annotations;
mod shelves;
mod volumes;

pub use annotations::{Annotation, Annotations, AnnotationsListOptions};
pub use shelves::{Shelf, Shelves, ShelvesListOptions};
pub use volumes::{Volume, VolumeInfo, Volumes, VolumesListOptions};
