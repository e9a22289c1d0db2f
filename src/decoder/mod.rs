//! Decoder for store documents returned by the REST API.
//!
//! A data store comes back from GeoServer looking like this:
//!
//! ```xml
//! <dataStore>
//!   <name>sf</name>
//!   <enabled>true</enabled>
//!   <workspace>
//!     <name>sf</name>
//!     <atom:link xmlns:atom="http://www.w3.org/2005/Atom" rel="alternate"
//!       href="http://localhost:8080/geoserver/rest/workspaces/sf.xml" type="application/xml"/>
//!   </workspace>
//!   <connectionParameters>
//!     <entry key="namespace">http://www.openplans.org/spearfish</entry>
//!     <entry key="url">file:data/sf</entry>
//!   </connectionParameters>
//! </dataStore>
//! ```
//!
//! The whole document is kept in memory; accessors project the fields that
//! matter to store management.

use std::collections::HashMap;

use xmltree::Element;

use crate::errors::StoreError;
use crate::models::{BackendType, StoreSummary, DBTYPE_PARAM};
use crate::xml;

const NAME: &str = "name";
const TYPE: &str = "type";
const DESCRIPTION: &str = "description";
const ENABLED: &str = "enabled";
const WORKSPACE: &str = "workspace";
const CONNECTION_PARAMETERS: &str = "connectionParameters";

/// Read-only view over a store document.
#[derive(Debug, Clone)]
pub struct DataStoreRepresentation {
    root: Element,
}

impl DataStoreRepresentation {
    /// Decode a document. Absent or malformed input yields `None`.
    pub fn build(document: Option<&str>) -> Option<Self> {
        let document = document?;
        xml::parse(document).map(|root| Self { root })
    }

    pub fn name(&self) -> Option<String> {
        xml::child_text(&self.root, NAME)
    }

    /// Server-assigned store type label (e.g. `PostGIS`, `GeoTIFF`).
    pub fn store_type(&self) -> Option<String> {
        xml::child_text(&self.root, TYPE)
    }

    pub fn description(&self) -> Option<String> {
        xml::child_text(&self.root, DESCRIPTION)
    }

    /// `true` only for the text `true` in any ASCII case.
    pub fn is_enabled(&self) -> bool {
        xml::child_text(&self.root, ENABLED)
            .map(|text| text.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Name of the owning workspace. Every store belongs to one, so a
    /// document without `workspace/name` is malformed.
    pub fn workspace_name(&self) -> Result<String, StoreError> {
        let workspace = xml::child(&self.root, WORKSPACE).ok_or_else(|| {
            StoreError::MalformedDocument("Store document has no workspace element".to_string())
        })?;

        xml::child_text(workspace, NAME).ok_or_else(|| {
            StoreError::MalformedDocument("Store workspace element has no name".to_string())
        })
    }

    /// All connection parameters, or `None` when the document has no
    /// `connectionParameters` element at all.
    pub fn connection_parameters(&self) -> Option<HashMap<String, String>> {
        let container = xml::child(&self.root, CONNECTION_PARAMETERS)?;

        let mut params = HashMap::new();
        for entry in xml::children(container, xml::ENTRY) {
            match xml::attribute(entry, xml::KEY_ATTR) {
                Some(key) => {
                    params.insert(key.to_string(), xml::text_trim(entry));
                }
                None => tracing::debug!("Skipping connection parameter entry without key"),
            }
        }
        Some(params)
    }

    /// Value of the first connection parameter named `key`.
    pub fn connection_parameter(&self, key: &str) -> Option<String> {
        let container = xml::child(&self.root, CONNECTION_PARAMETERS)?;

        xml::children(container, xml::ENTRY)
            .find(|entry| xml::attribute(entry, xml::KEY_ATTR) == Some(key))
            .map(xml::text_trim)
    }

    /// Backend technology, derived from the `dbtype` connection parameter.
    pub fn backend_type(&self) -> BackendType {
        BackendType::resolve(self.connection_parameter(DBTYPE_PARAM).as_deref())
    }

    /// Snapshot of every projected field. A missing workspace is reported as
    /// `None` here rather than as an error.
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            name: self.name(),
            store_type: self.store_type(),
            description: self.description(),
            enabled: self.is_enabled(),
            workspace: self.workspace_name().ok(),
            connection_parameters: self
                .connection_parameters()
                .map(|params| params.into_iter().collect()),
            backend: self.backend_type(),
        }
    }
}
