//! Data models for GeoServer store resources.
//!
//! These models mirror the vocabulary of the GeoServer REST API so that URL
//! segments, XML element names and connection-parameter tags stay in one place.

mod backend;
mod credentials;
mod datastore;
mod store_kind;

pub use backend::*;
pub use credentials::*;
pub use datastore::*;
pub use store_kind::*;
