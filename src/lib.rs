//! GeoServer REST store client
//!
//! Blocking client for the store resources of a GeoServer REST API: decode
//! store documents, encode outgoing ones, and create, update, read or remove
//! data, coverage and WMS stores inside a workspace.
//!
//! ```no_run
//! use geoserver_rest_stores::{RestConfig, StoreEncoder, StoreKind, StoreManager};
//!
//! let config = RestConfig::new("http://localhost:8080/geoserver", "admin", "geoserver");
//! let manager = StoreManager::new(&config)?;
//!
//! let roads = StoreEncoder::new(
//!     StoreKind::DataStores,
//!     Some("sf"),
//!     Some("Shapefile"),
//!     Some("roads"),
//!     Some("file:data/sf/roads.shp"),
//!     Some(true),
//! );
//! if manager.create("sf", &roads) {
//!     let store = manager.read("sf", StoreKind::DataStores, "roads");
//!     println!("{:?}", store.map(|s| s.summary()));
//! }
//! # Ok::<(), geoserver_rest_stores::StoreError>(())
//! ```

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod manager;
pub mod models;
pub mod transport;
pub mod xml;

pub use config::RestConfig;
pub use decoder::DataStoreRepresentation;
pub use encoder::StoreEncoder;
pub use errors::StoreError;
pub use manager::StoreManager;
pub use models::{BackendType, Credentials, StoreKind, StoreSummary};
pub use transport::{HttpTransport, RestTransport};
