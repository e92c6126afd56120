//! The declared resources of a [`Package`](super::package::Package).

use crate::render::XmlFragment;

/// Whitespace-separated property tokens (e.g., `nav`, `cover-image`).
///
/// Duplicate tokens are ignored; declaration order is retained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties(Vec<String>);

impl Properties {
    /// Returns `true` if `property` is one of the tokens.
    pub fn has_property(&self, property: &str) -> bool {
        self.0.iter().any(|token| token == property)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Option<&str>> for Properties {
    fn from(raw: Option<&str>) -> Self {
        let mut tokens: Vec<String> = Vec::new();

        for token in raw.unwrap_or_default().split_whitespace() {
            if !tokens.iter().any(|existing| existing == token) {
                tokens.push(token.to_owned());
            }
        }
        Self(tokens)
    }
}

/// A single `manifest > item`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestItem {
    pub(crate) id: String,
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) properties: Properties,
    pub(crate) fallback: Option<String>,
    pub(crate) media_overlay: Option<String>,
}

impl ManifestItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The href as declared, relative to the package document.
    ///
    /// This is percent-encoded and may contain a fragment.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The declared media type (e.g., `application/xhtml+xml`).
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The id of the fallback item, if declared.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// The id of the media overlay (SMIL) item, if declared.
    pub fn media_overlay(&self) -> Option<&str> {
        self.media_overlay.as_deref()
    }
}

/// The ordered collection of [`ManifestItem`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub(crate) items: Vec<ManifestItem>,
    pub(crate) source: String,
}

impl Manifest {
    /// Returns the item with the given `id`.
    ///
    /// Item ids are expected to be unique.
    /// If an EPUB declares the same id more than once,
    /// the **first** declaration wins.
    pub fn find_by_id(&self, id: &str) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the first item whose declared href equals `href`.
    pub fn find_by_href(&self, href: &str) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.href == href)
    }

    /// Returns the first item declaring `property` (e.g., `nav`).
    pub fn find_by_property(&self, property: &str) -> Option<&ManifestItem> {
        self.items
            .iter()
            .find(|item| item.properties.has_property(property))
    }

    /// Returns every item of the given `media_type`, in declaration order.
    pub fn find_by_media_type<'a>(
        &'a self,
        media_type: &'a str,
    ) -> impl Iterator<Item = &'a ManifestItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.media_type.eq_ignore_ascii_case(media_type))
    }

    /// Item ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(ManifestItem::id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestItem;
    type IntoIter = std::slice::Iter<'a, ManifestItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl XmlFragment for Manifest {
    fn source(&self) -> &str {
        &self.source
    }
}
