//! The default reading order of a [`Package`](super::package::Package).

use crate::epub::manifest::Properties;
use crate::render::XmlFragment;

/// The `page-progression-direction` used when the spine declares none.
pub const DEFAULT_PAGE_PROGRESSION_DIRECTION: &str = "default";

/// A single `spine > itemref`.
///
/// The referenced manifest item is not checked when parsing;
/// see [`Document::find_content_by_id`](crate::Document::find_content_by_id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpineItemRef {
    pub(crate) id: Option<String>,
    pub(crate) idref: String,
    pub(crate) linear: bool,
    pub(crate) properties: Properties,
}

impl SpineItemRef {
    /// The id of the itemref itself, if declared.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The id of the referenced manifest item.
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// `false` only when declared as `linear="no"`.
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// The ordered collection of [`SpineItemRef`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spine {
    pub(crate) items: Vec<SpineItemRef>,
    pub(crate) toc: Option<String>,
    pub(crate) page_progression_direction: String,
    pub(crate) source: String,
}

impl Spine {
    /// The `toc` attribute: the manifest id of the NCX document, if declared.
    pub fn toc(&self) -> Option<&str> {
        self.toc.as_deref()
    }

    /// The declared `page-progression-direction`,
    /// or [`DEFAULT_PAGE_PROGRESSION_DIRECTION`] when absent.
    pub fn page_progression_direction(&self) -> &str {
        &self.page_progression_direction
    }

    /// Returns the first itemref referencing `idref`.
    pub fn find_by_idref(&self, idref: &str) -> Option<&SpineItemRef> {
        self.items.iter().find(|item| item.idref == idref)
    }

    /// Referenced ids in reading order.
    pub fn idrefs(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(SpineItemRef::idref)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpineItemRef> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Spine {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            toc: None,
            page_progression_direction: DEFAULT_PAGE_PROGRESSION_DIRECTION.to_owned(),
            source: String::new(),
        }
    }
}

impl<'a> IntoIterator for &'a Spine {
    type Item = &'a SpineItemRef;
    type IntoIter = std::slice::Iter<'a, SpineItemRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl XmlFragment for Spine {
    fn source(&self) -> &str {
        &self.source
    }
}
