//! Serializable snapshot of a decoded store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::BackendType;

/// Plain-data view of a store document, for logging or handing to other layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_parameters: Option<BTreeMap<String, String>>,
    pub backend: BackendType,
}
