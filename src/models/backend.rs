//! Backend technology of a data store, as tagged by its `dbtype` parameter.

use serde::{Deserialize, Serialize};

/// Connection parameter holding the backend tag.
pub const DBTYPE_PARAM: &str = "dbtype";

/// Storage technology behind a store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BackendType {
    PostGis,
    Oracle,
    ShapeFile,
    /// Any tag that is absent or not listed in [`BackendType::KNOWN`]
    Unknown,
}

impl BackendType {
    /// Known variants with their `dbtype` tag, in resolution order.
    pub const KNOWN: [(BackendType, &'static str); 3] = [
        (BackendType::PostGis, "postgis"),
        (BackendType::Oracle, "oracle"),
        (BackendType::ShapeFile, "shp"),
    ];

    /// Tag used by the server, `None` for [`BackendType::Unknown`].
    pub fn tag(&self) -> Option<&'static str> {
        Self::KNOWN
            .iter()
            .find(|(variant, _)| variant == self)
            .map(|(_, tag)| *tag)
    }

    /// Resolve a `dbtype` tag. Matching is exact and case-sensitive; anything
    /// else, including no tag at all, resolves to [`BackendType::Unknown`].
    pub fn resolve(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return BackendType::Unknown;
        };

        Self::KNOWN
            .iter()
            .find(|(_, known)| *known == tag)
            .map(|(variant, _)| *variant)
            .unwrap_or(BackendType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_resolve_to_their_variant() {
        for (variant, tag) in BackendType::KNOWN {
            assert_eq!(BackendType::resolve(Some(tag)), variant);
            assert_eq!(variant.tag(), Some(tag));
        }
    }

    #[test]
    fn test_unrecognized_tags_resolve_to_unknown() {
        assert_eq!(BackendType::resolve(None), BackendType::Unknown);
        assert_eq!(BackendType::resolve(Some("")), BackendType::Unknown);
        assert_eq!(BackendType::resolve(Some("PostGIS")), BackendType::Unknown);
        assert_eq!(BackendType::resolve(Some(" shp")), BackendType::Unknown);
        assert_eq!(BackendType::resolve(Some("h2")), BackendType::Unknown);
    }

    #[test]
    fn test_unknown_has_no_tag() {
        assert_eq!(BackendType::Unknown.tag(), None);
    }
}
