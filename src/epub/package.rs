//! The package document (`.opf`).

use crate::epub::manifest::Manifest;
use crate::epub::metadata::Metadata;
use crate::epub::spine::Spine;
use crate::render::XmlFragment;
use std::fmt::{Display, Formatter};

/// The EPUB version declared by `package@version`.
///
/// Only majors `1`, `2`, and `3` resolve successfully.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EpubVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    raw: String,
}

impl EpubVersion {
    /// Parses `major[.minor[.patch]]`.
    ///
    /// Surrounding whitespace is ignored; anything else non-numeric is rejected.
    ///
    /// # Examples
    /// ```
    /// # use epub_utils::epub::package::EpubVersion;
    /// let version = EpubVersion::parse("3.0").unwrap();
    /// assert_eq!((3, 0, 0), (version.major, version.minor, version.patch));
    /// assert!(EpubVersion::parse("three").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let mut components = raw.trim().split('.');
        let major = parse_component(components.next()?)?;
        let minor = components.next().map_or(Some(0), parse_component)?;
        let patch = components.next().map_or(Some(0), parse_component)?;

        // Reject more than three components
        if components.next().is_some() {
            return None;
        }
        Some(Self {
            major,
            minor,
            patch,
            raw: raw.to_owned(),
        })
    }

    /// The attribute value exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_epub2(&self) -> bool {
        self.major == 2
    }

    pub fn is_epub3(&self) -> bool {
        self.major == 3
    }
}

fn parse_component(component: &str) -> Option<u16> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

impl Display for EpubVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.patch != 0 {
            write!(f, ".{}", self.patch)?;
        }
        Ok(())
    }
}

/// A single `guide > reference` (EPUB 2 landmarks).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuideReference {
    pub(crate) kind: String,
    pub(crate) title: Option<String>,
    pub(crate) href: String,
}

impl GuideReference {
    /// The `type` attribute (e.g., `toc`, `cover`, `text`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The href as declared, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }
}

/// The legacy `guide` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Guide {
    pub(crate) references: Vec<GuideReference>,
}

impl Guide {
    /// Returns the first reference of the given `type`.
    pub fn find_by_kind(&self, kind: &str) -> Option<&GuideReference> {
        self.references.iter().find(|reference| reference.kind == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuideReference> {
        self.references.iter()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// The parsed package document.
///
/// The navigation pointer depends on the [`EpubVersion`]:
/// - EPUB 3: [`Self::nav_href`] (navigation document); [`Self::toc_href`] is always [`None`].
/// - EPUB 1/2: [`Self::toc_href`] (NCX); [`Self::nav_href`] is always [`None`].
///
/// Either may be [`None`] if the package does not declare one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub(crate) version: EpubVersion,
    pub(crate) unique_identifier: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) metadata: Metadata,
    pub(crate) manifest: Manifest,
    pub(crate) spine: Spine,
    pub(crate) guide: Option<Guide>,
    pub(crate) toc_href: Option<String>,
    pub(crate) nav_href: Option<String>,
    pub(crate) source: String,
}

impl Package {
    pub fn version(&self) -> &EpubVersion {
        &self.version
    }

    /// The `unique-identifier` attribute, referencing a `dc:identifier` by id.
    pub fn unique_identifier(&self) -> Option<&str> {
        self.unique_identifier.as_deref()
    }

    /// The `xml:lang` attribute of the package element.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    /// The legacy `guide`, if present.
    pub fn guide(&self) -> Option<&Guide> {
        self.guide.as_ref()
    }

    /// The href of the NCX document (EPUB 1/2), relative to the package document.
    pub fn toc_href(&self) -> Option<&str> {
        self.toc_href.as_deref()
    }

    /// The href of the navigation document (EPUB 3),
    /// relative to the package document, without a fragment.
    pub fn nav_href(&self) -> Option<&str> {
        self.nav_href.as_deref()
    }
}

impl XmlFragment for Package {
    fn source(&self) -> &str {
        &self.source
    }
}
