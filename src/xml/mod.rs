//! Minimal element-tree helpers shared by the decoder and the encoder.
//!
//! Only the handful of operations store documents need are exposed: parse,
//! child lookup, attribute lookup, text extraction, set-child and
//! append-child, and rendering back to text.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::errors::StoreError;

/// Element name of a single connection-parameter entry.
pub const ENTRY: &str = "entry";
/// Attribute holding the connection-parameter key.
pub const KEY_ATTR: &str = "key";

/// Parse a document and return its root element, or `None` if it is not
/// well-formed.
pub fn parse(text: &str) -> Option<Element> {
    match Element::parse(text.as_bytes()) {
        Ok(root) => Some(root),
        Err(e) => {
            tracing::debug!("Unable to parse XML document: {}", e);
            None
        }
    }
}

/// First direct child with the given name.
pub fn child<'a>(parent: &'a Element, name: &str) -> Option<&'a Element> {
    parent.get_child(name)
}

/// All direct children with the given name, in document order.
pub fn children<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent.children.iter().filter_map(move |node| match node {
        XMLNode::Element(el) if el.name == name => Some(el),
        _ => None,
    })
}

/// Text content of the element; an element without text yields `""`.
pub fn text(element: &Element) -> String {
    element
        .get_text()
        .map(|t| t.into_owned())
        .unwrap_or_default()
}

/// Text content with surrounding whitespace removed.
pub fn text_trim(element: &Element) -> String {
    text(element).trim().to_string()
}

/// Text of the named child: `None` if the child is missing, `Some("")` if it
/// is present but empty.
pub fn child_text(parent: &Element, name: &str) -> Option<String> {
    child(parent, name).map(text)
}

pub fn attribute<'a>(element: &'a Element, key: &str) -> Option<&'a str> {
    element.attributes.get(key).map(String::as_str)
}

/// Render an element as a document without XML declaration or indentation.
pub fn render(element: &Element) -> Result<String, StoreError> {
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(false);

    let mut out = Vec::new();
    element.write_with_config(&mut out, config)?;
    String::from_utf8(out)
        .map_err(|e| StoreError::Serialization(format!("Rendered XML is not UTF-8: {}", e)))
}

/// Write-side element builder.
#[derive(Debug, Clone)]
pub struct ElementEncoder {
    root: Element,
}

impl ElementEncoder {
    pub fn new(root_name: &str) -> Self {
        Self {
            root: Element::new(root_name),
        }
    }

    /// Set `<key>value</key>` as a direct child, replacing an existing child
    /// of the same name.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut element = Element::new(key);
        element.children.push(XMLNode::Text(value.to_string()));

        let existing = self
            .root
            .children
            .iter()
            .position(|node| matches!(node, XMLNode::Element(el) if el.name == key));
        match existing {
            Some(index) => self.root.children[index] = XMLNode::Element(element),
            None => self.root.children.push(XMLNode::Element(element)),
        }
    }

    /// Append `<entry key="key">value</entry>`, the shape used inside
    /// `connectionParameters`.
    pub fn set_entry(&mut self, key: &str, value: &str) {
        let mut entry = Element::new(ENTRY);
        entry
            .attributes
            .insert(KEY_ATTR.to_string(), key.to_string());
        entry.children.push(XMLNode::Text(value.to_string()));
        self.root.children.push(XMLNode::Element(entry));
    }

    /// Append an already built element as the last child.
    pub fn add_content(&mut self, element: Element) {
        self.root.children.push(XMLNode::Element(element));
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    pub fn to_xml(&self) -> Result<String, StoreError> {
        render(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse("<dataStore><name>sf</dataStore>").is_none());
        assert!(parse("").is_none());
        assert!(parse("not xml at all").is_none());
    }

    #[test]
    fn test_child_text_distinguishes_missing_and_empty() {
        let root = parse("<a><b/><c>x</c></a>").unwrap();
        assert_eq!(child_text(&root, "b"), Some(String::new()));
        assert_eq!(child_text(&root, "c"), Some("x".to_string()));
        assert_eq!(child_text(&root, "d"), None);
    }

    #[test]
    fn test_set_replaces_existing_child() {
        let mut encoder = ElementEncoder::new("dataStore");
        encoder.set("name", "first");
        encoder.set("name", "second");

        let names: Vec<_> = children(encoder.root(), "name").collect();
        assert_eq!(names.len(), 1);
        assert_eq!(text(names[0]), "second");
    }

    #[test]
    fn test_entries_render_with_key_attribute() {
        let mut params = ElementEncoder::new("connectionParameters");
        params.set_entry("url", "file:data/sf");

        let xml = params.to_xml().unwrap();
        let reparsed = parse(&xml).unwrap();
        let entry = child(&reparsed, ENTRY).unwrap();
        assert_eq!(attribute(entry, KEY_ATTR), Some("url"));
        assert_eq!(text(entry), "file:data/sf");
    }

    #[test]
    fn test_rendering_escapes_text() {
        let mut encoder = ElementEncoder::new("dataStore");
        encoder.set("description", "roads & rivers <2024>");

        let xml = encoder.to_xml().unwrap();
        assert!(!xml.starts_with("<?xml"));
        let reparsed = parse(&xml).unwrap();
        assert_eq!(
            child_text(&reparsed, "description").as_deref(),
            Some("roads & rivers <2024>")
        );
    }
}
