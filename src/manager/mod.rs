//! Store manager: create, update, read and remove stores in a workspace.
//!
//! Collection operations address `{base}/rest/workspaces/{ws}/{kind}.xml`,
//! item operations `{base}/rest/workspaces/{ws}/{kind}/{store}[.xml]`.
//! Every operation is a single blocking round trip. The boolean operations
//! collapse every failure to `false`; their `try_*` twins return the cause.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::config::RestConfig;
use crate::decoder::DataStoreRepresentation;
use crate::encoder::StoreEncoder;
use crate::errors::StoreError;
use crate::models::{Credentials, StoreKind};
use crate::transport::{HttpTransport, RestTransport};

/// Serialization format requested from and sent to the server.
pub const FORMAT: &str = "xml";

/// Characters left as-is in a path segment; matches form encoding with
/// spaces written as `%20`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'*');

/// Percent-encode a caller-supplied name for use as one path segment.
pub fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Reject names that cannot address a single path segment. URL parsing
/// resolves `.` and `..` (escaped or not) against the path, and an empty
/// name addresses the parent collection.
fn checked_segment<'a>(what: &str, segment: &'a str) -> Result<&'a str, StoreError> {
    match segment {
        "" | "." | ".." => Err(StoreError::InvalidRequest(format!(
            "{} name {:?} is not a valid path segment",
            what, segment
        ))),
        _ => Ok(segment),
    }
}

/// Manages stores through the GeoServer REST API.
///
/// Holds only the endpoint, the credentials and the transport; no resource
/// state survives between calls.
#[derive(Debug, Clone)]
pub struct StoreManager<T: RestTransport = HttpTransport> {
    base_url: String,
    credentials: Credentials,
    transport: T,
}

impl StoreManager<HttpTransport> {
    /// Manager talking HTTP to the endpoint in `config`.
    pub fn new(config: &RestConfig) -> Result<Self, StoreError> {
        let transport = HttpTransport::from_config(config)?;
        Self::with_transport(&config.base_url, config.credentials.clone(), transport)
    }
}

impl<T: RestTransport> StoreManager<T> {
    /// Manager using an arbitrary transport. The base URL must be absolute;
    /// trailing slashes are dropped.
    pub fn with_transport(
        base_url: &str,
        credentials: Credentials,
        transport: T,
    ) -> Result<Self, StoreError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() || parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(StoreError::Config(format!(
                "Base URL {} cannot be extended with REST paths",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            credentials,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a store in `workspace`. Returns `true` if the server accepted it.
    pub fn create(&self, workspace: &str, store: &StoreEncoder) -> bool {
        match self.try_create(workspace, store) {
            Ok(_) => {
                tracing::info!(
                    "Created {} {:?} in workspace {}",
                    store.kind(),
                    store.name(),
                    workspace
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create {} {:?} in workspace {}: {}",
                    store.kind(),
                    store.name(),
                    workspace,
                    e
                );
                false
            }
        }
    }

    /// POST the store document to the workspace collection and return the
    /// response body.
    pub fn try_create(&self, workspace: &str, store: &StoreEncoder) -> Result<String, StoreError> {
        checked_segment("Workspace", workspace)?;
        let url = self.collection_url(workspace, store.kind());
        let xml = store.to_xml()?;
        self.transport.post_xml(&url, &xml, &self.credentials)
    }

    /// Update the store addressed by the encoder's own name.
    pub fn update(&self, workspace: &str, store: &StoreEncoder) -> bool {
        match store.name() {
            Some(name) => self.update_named(workspace, name, store),
            None => {
                tracing::warn!(
                    "Cannot update {} in workspace {}: store has no name",
                    store.kind(),
                    workspace
                );
                false
            }
        }
    }

    /// Update the store called `store_name`. The encoded document may carry a
    /// different name, which renames the store.
    pub fn update_named(&self, workspace: &str, store_name: &str, store: &StoreEncoder) -> bool {
        match self.try_update_named(workspace, store_name, store) {
            Ok(_) => {
                tracing::info!(
                    "Updated {} {} in workspace {}",
                    store.kind(),
                    store_name,
                    workspace
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to update {} {} in workspace {}: {}",
                    store.kind(),
                    store_name,
                    workspace,
                    e
                );
                false
            }
        }
    }

    pub fn try_update(&self, workspace: &str, store: &StoreEncoder) -> Result<String, StoreError> {
        let name = required_name(store)?;
        self.try_update_named(workspace, name, store)
    }

    /// PUT the store document to the item URL and return the response body.
    pub fn try_update_named(
        &self,
        workspace: &str,
        store_name: &str,
        store: &StoreEncoder,
    ) -> Result<String, StoreError> {
        checked_segment("Workspace", workspace)?;
        checked_segment("Store", store_name)?;
        let url = self.item_url(workspace, store.kind(), store_name);
        let xml = store.to_xml()?;
        self.transport.put_xml(&url, &xml, &self.credentials)
    }

    /// Remove the store named by the encoder. With `recurse`, the server also
    /// deletes resources depending on it (layers, feature types).
    pub fn remove(&self, workspace: &str, store: &StoreEncoder, recurse: bool) -> bool {
        match self.try_remove(workspace, store, recurse) {
            Ok(()) => {
                tracing::info!(
                    "Removed {} {:?} from workspace {}",
                    store.kind(),
                    store.name(),
                    workspace
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Could not remove {} {:?} from workspace {}: {}",
                    store.kind(),
                    store.name(),
                    workspace,
                    e
                );
                false
            }
        }
    }

    pub fn try_remove(
        &self,
        workspace: &str,
        store: &StoreEncoder,
        recurse: bool,
    ) -> Result<(), StoreError> {
        checked_segment("Workspace", workspace)?;
        let name = checked_segment("Store", required_name(store)?)?;
        let url = self.remove_url(workspace, store.kind(), name, recurse);
        self.transport.delete(&url, &self.credentials)
    }

    /// Fetch and decode a store. Returns `None` if it cannot be fetched or
    /// the answer is not a store document.
    pub fn read(
        &self,
        workspace: &str,
        kind: StoreKind,
        store_name: &str,
    ) -> Option<DataStoreRepresentation> {
        match self.try_read(workspace, kind, store_name) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::debug!(
                    "Could not read {} {} in workspace {}: {}",
                    kind,
                    store_name,
                    workspace,
                    e
                );
                None
            }
        }
    }

    pub fn try_read(
        &self,
        workspace: &str,
        kind: StoreKind,
        store_name: &str,
    ) -> Result<DataStoreRepresentation, StoreError> {
        checked_segment("Workspace", workspace)?;
        checked_segment("Store", store_name)?;
        let url = self.item_url(workspace, kind, store_name);
        let body = self.transport.get(&url, &self.credentials)?;
        DataStoreRepresentation::build(Some(&body)).ok_or_else(|| {
            StoreError::MalformedDocument(format!("Response from {} is not a store document", url))
        })
    }

    fn collection_url(&self, workspace: &str, kind: StoreKind) -> Url {
        checked_url(format!(
            "{}/rest/workspaces/{}/{}.{}",
            self.base_url,
            escape_segment(workspace),
            kind.as_str(),
            FORMAT
        ))
    }

    fn item_url(&self, workspace: &str, kind: StoreKind, store_name: &str) -> Url {
        checked_url(format!(
            "{}/rest/workspaces/{}/{}/{}.{}",
            self.base_url,
            escape_segment(workspace),
            kind.as_str(),
            escape_segment(store_name),
            FORMAT
        ))
    }

    fn remove_url(&self, workspace: &str, kind: StoreKind, store_name: &str, recurse: bool) -> Url {
        let mut url = format!(
            "{}/rest/workspaces/{}/{}/{}",
            self.base_url,
            escape_segment(workspace),
            kind.as_str(),
            escape_segment(store_name)
        );
        if recurse {
            url.push_str("?recurse=true");
        }
        checked_url(url)
    }
}

fn required_name(store: &StoreEncoder) -> Result<&str, StoreError> {
    store.name().ok_or_else(|| {
        StoreError::InvalidRequest(format!("{} encoder has no store name", store.kind()))
    })
}

/// The base URL is validated at construction and every segment is checked
/// and escaped, so a parse failure here is a bug in this module.
fn checked_url(raw: String) -> Url {
    match Url::parse(&raw) {
        Ok(url) => url,
        Err(e) => panic!("constructed store URL {} is invalid: {}", raw, e),
    }
}
