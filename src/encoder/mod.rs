//! Encoder for outgoing store documents.

use crate::errors::StoreError;
use crate::models::StoreKind;
use crate::xml::ElementEncoder;

const CONNECTION_PARAMETERS: &str = "connectionParameters";
const URL: &str = "url";

/// One-shot builder of a store document.
///
/// Every structural decision happens in [`StoreEncoder::new`]; an absent
/// input leaves its element out of the document entirely.
#[derive(Debug, Clone)]
pub struct StoreEncoder {
    kind: StoreKind,
    name: Option<String>,
    type_label: Option<String>,
    tree: ElementEncoder,
}

impl StoreEncoder {
    pub fn new(
        kind: StoreKind,
        workspace: Option<&str>,
        type_label: Option<&str>,
        name: Option<&str>,
        url: Option<&str>,
        enabled: Option<bool>,
    ) -> Self {
        let mut tree = ElementEncoder::new(kind.type_name());

        if let Some(workspace) = workspace {
            tree.set("workspace", workspace);
        }
        if let Some(name) = name {
            tree.set("name", name);
        }
        if let Some(enabled) = enabled {
            tree.set("enabled", if enabled { "true" } else { "false" });
        }
        if let Some(type_label) = type_label {
            tree.set("type", type_label);
        }
        if let Some(url) = url {
            // Coverage stores take the location as a plain element; the
            // server rejects it inside connectionParameters for them.
            if kind.url_is_top_level() {
                tree.set(URL, url);
            } else {
                let mut params = ElementEncoder::new(CONNECTION_PARAMETERS);
                params.set_entry(URL, url);
                tree.add_content(params.into_root());
            }
        }

        Self {
            kind,
            name: name.map(str::to_string),
            type_label: type_label.map(str::to_string),
            tree,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Store name encoded in the document, used to address the item on update/remove.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_label(&self) -> Option<&str> {
        self.type_label.as_deref()
    }

    /// Render the document to send to the server.
    pub fn to_xml(&self) -> Result<String, StoreError> {
        self.tree.to_xml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DataStoreRepresentation;
    use crate::xml;

    fn reparse(encoder: &StoreEncoder) -> xmltree::Element {
        xml::parse(&encoder.to_xml().unwrap()).expect("encoder output should be well-formed")
    }

    fn element_names(root: &xmltree::Element) -> Vec<String> {
        root.children
            .iter()
            .filter_map(|node| match node {
                xmltree::XMLNode::Element(el) => Some(el.name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_coverage_store_url_is_top_level() {
        let encoder = StoreEncoder::new(
            StoreKind::CoverageStores,
            Some("nurc"),
            Some("GeoTIFF"),
            Some("dem"),
            Some("file:data/dem.tif"),
            Some(true),
        );
        let root = reparse(&encoder);

        assert_eq!(root.name, "coverageStore");
        assert_eq!(xml::child_text(&root, "url").as_deref(), Some("file:data/dem.tif"));
        assert!(xml::child(&root, "connectionParameters").is_none());
    }

    #[test]
    fn test_data_store_url_is_nested() {
        let encoder = StoreEncoder::new(
            StoreKind::DataStores,
            Some("sf"),
            None,
            Some("roads"),
            Some("file:data/roads"),
            None,
        );
        let root = reparse(&encoder);

        assert_eq!(root.name, "dataStore");
        assert!(xml::child(&root, "url").is_none());

        let params = xml::child(&root, "connectionParameters").unwrap();
        let entries: Vec<_> = xml::children(params, xml::ENTRY).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(xml::attribute(entries[0], xml::KEY_ATTR), Some("url"));
        assert_eq!(xml::text(entries[0]), "file:data/roads");
    }

    #[test]
    fn test_wms_store_url_is_nested() {
        let encoder = StoreEncoder::new(
            StoreKind::WmsStores,
            None,
            None,
            Some("remote"),
            Some("http://example.org/wms"),
            None,
        );
        let root = reparse(&encoder);

        assert_eq!(root.name, "wmsStore");
        assert!(xml::child(&root, "url").is_none());
        assert!(xml::child(&root, "connectionParameters").is_some());
    }

    #[test]
    fn test_absent_inputs_are_omitted() {
        let encoder = StoreEncoder::new(StoreKind::DataStores, None, None, Some("bare"), None, None);
        let root = reparse(&encoder);

        assert_eq!(element_names(&root), vec!["name".to_string()]);
    }

    #[test]
    fn test_all_fields_set_exactly_once() {
        let encoder = StoreEncoder::new(
            StoreKind::DataStores,
            Some("topp"),
            Some("PostGIS"),
            Some("states"),
            Some("jdbc:postgresql://db/gis"),
            Some(false),
        );
        let root = reparse(&encoder);

        assert_eq!(
            element_names(&root),
            vec!["workspace", "name", "enabled", "type", "connectionParameters"]
        );
        assert_eq!(xml::child_text(&root, "enabled").as_deref(), Some("false"));
        assert_eq!(xml::child_text(&root, "type").as_deref(), Some("PostGIS"));
    }

    #[test]
    fn test_accessors() {
        let encoder = StoreEncoder::new(
            StoreKind::CoverageStores,
            Some("nurc"),
            Some("GeoTIFF"),
            Some("dem"),
            None,
            None,
        );
        assert_eq!(encoder.kind(), StoreKind::CoverageStores);
        assert_eq!(encoder.name(), Some("dem"));
        assert_eq!(encoder.type_label(), Some("GeoTIFF"));
    }

    #[test]
    fn test_decoder_reads_encoded_document() {
        let encoder = StoreEncoder::new(
            StoreKind::DataStores,
            None,
            Some("Shapefile"),
            Some("roads"),
            Some("file:data/roads"),
            Some(true),
        );
        let store = DataStoreRepresentation::build(Some(&encoder.to_xml().unwrap())).unwrap();

        assert_eq!(store.name().as_deref(), Some("roads"));
        assert_eq!(store.store_type().as_deref(), Some("Shapefile"));
        assert!(store.is_enabled());
        assert_eq!(store.connection_parameter("url").as_deref(), Some("file:data/roads"));
    }
}
