//! Store categories known to the GeoServer REST API.

use serde::{Deserialize, Serialize};

/// Category of a store. Decides the URL collection segment, the XML root
/// element and where the store location goes in an outgoing document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Vector data stores (`/datastores`)
    DataStores,
    /// Raster coverage stores (`/coveragestores`)
    CoverageStores,
    /// Cascaded WMS stores (`/wmsstores`)
    WmsStores,
}

impl StoreKind {
    /// Plural collection segment used in resource URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::DataStores => "datastores",
            StoreKind::CoverageStores => "coveragestores",
            StoreKind::WmsStores => "wmsstores",
        }
    }

    /// Root element name of the store document.
    pub fn type_name(&self) -> &'static str {
        match self {
            StoreKind::DataStores => "dataStore",
            StoreKind::CoverageStores => "coverageStore",
            StoreKind::WmsStores => "wmsStore",
        }
    }

    /// Coverage stores carry their location as a top-level `url` element
    /// instead of a connection parameter.
    pub fn url_is_top_level(&self) -> bool {
        matches!(self, StoreKind::CoverageStores)
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_and_root_names() {
        assert_eq!(StoreKind::DataStores.as_str(), "datastores");
        assert_eq!(StoreKind::CoverageStores.as_str(), "coveragestores");
        assert_eq!(StoreKind::WmsStores.as_str(), "wmsstores");
        assert_eq!(StoreKind::DataStores.type_name(), "dataStore");
        assert_eq!(StoreKind::CoverageStores.type_name(), "coverageStore");
        assert_eq!(StoreKind::WmsStores.type_name(), "wmsStore");
    }

    #[test]
    fn test_only_coverage_stores_use_top_level_url() {
        assert!(StoreKind::CoverageStores.url_is_top_level());
        assert!(!StoreKind::DataStores.url_is_top_level());
        assert!(!StoreKind::WmsStores.url_is_top_level());
    }
}
