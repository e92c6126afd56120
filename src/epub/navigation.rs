//! Table of contents, page lists, and landmarks.
//!
//! A [`Navigation`] originates from one of two formats:
//! - [`Ncx`](Navigation::Ncx): the legacy EPUB 2 navigation control file (`.ncx`).
//! - [`Nav`](Navigation::Nav): the EPUB 3 navigation document (`.xhtml`).
//!
//! Both normalize into trees of [`NavigationItem`],
//! so callers may query either through the same methods.

use crate::render::{self, XmlFragment};
use std::fmt::{Display, Formatter};

/// The format a [`Navigation`] was parsed from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavigationFormat {
    /// Legacy navigation control file (`application/x-dtbncx+xml`).
    Ncx,
    /// Navigation document (`nav` elements within XHTML).
    #[default]
    Nav,
}

impl NavigationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ncx => "ncx",
            Self::Nav => "nav",
        }
    }
}

impl Display for NavigationFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a table of contents, page list, landmarks, or nav list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationItem {
    pub(crate) id: Option<String>,
    pub(crate) label: String,
    pub(crate) target: String,
    pub(crate) order: Option<u32>,
    pub(crate) level: usize,
    pub(crate) item_type: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// The `id` of the underlying element, if declared.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The human-readable label, with whitespace collapsed.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The referenced location, exactly as declared (e.g., `chapter1.xhtml#s1`).
    ///
    /// Empty for grouping headers that do not link anywhere.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The reading order:
    /// - NCX: the declared `playOrder`.
    /// - Navigation document: the 1-based position among all links of the document.
    pub fn order(&self) -> Option<u32> {
        self.order
    }

    /// The nesting level, starting at `1` for top-level items.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The semantic type:
    /// - NCX `navPoint@class` or `pageTarget@type` (`front`, `normal`, `special`).
    /// - Navigation document `a@epub:type` (e.g., `bodymatter`, `cover`).
    pub fn item_type(&self) -> Option<&str> {
        self.item_type.as_deref()
    }

    /// The `pageTarget@value` of an NCX page list entry.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[NavigationItem] {
        &self.children
    }

    /// Returns `true` if this item has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates over this item and all of its descendants in document order.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(std::slice::from_ref(self))
    }
}

/// A depth-first, document-order iterator over nested [`NavigationItem`]s.
pub struct Flatten<'a> {
    stack: Vec<&'a NavigationItem>,
}

impl<'a> Flatten<'a> {
    pub(crate) fn new(items: &'a [NavigationItem]) -> Self {
        Self {
            stack: items.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a NavigationItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;

        // Push children in reverse order to maintain DFS order
        self.stack.extend(item.children.iter().rev());
        Some(item)
    }
}

/// An NCX `navList`: a labelled, flat list of auxiliary targets
/// (e.g., illustrations or tables).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavList {
    pub(crate) id: Option<String>,
    pub(crate) label: String,
    pub(crate) targets: Vec<NavigationItem>,
}

impl NavList {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn targets(&self) -> &[NavigationItem] {
        &self.targets
    }
}

/// A parsed NCX document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NcxNavigation {
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) version: Option<String>,
    pub(crate) lang: Option<String>,
    pub(crate) uid: Option<String>,
    pub(crate) depth: Option<u32>,
    pub(crate) total_page_count: Option<u32>,
    pub(crate) max_page_number: Option<u32>,
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) nav_map: Vec<NavigationItem>,
    pub(crate) page_list: Vec<NavigationItem>,
    pub(crate) nav_lists: Vec<NavList>,
    pub(crate) source: String,
}

impl NcxNavigation {
    /// The `ncx@version` attribute.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The `ncx@xml:lang` attribute.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// The `dtb:uid` head meta.
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// The `dtb:depth` head meta.
    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    /// The `dtb:totalPageCount` head meta.
    pub fn total_page_count(&self) -> Option<u32> {
        self.total_page_count
    }

    /// The `dtb:maxPageNumber` head meta.
    pub fn max_page_number(&self) -> Option<u32> {
        self.max_page_number
    }

    /// The text of `docTitle`.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The text of the first `docAuthor`.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Top-level `navPoint`s of the `navMap`.
    pub fn nav_map(&self) -> &[NavigationItem] {
        &self.nav_map
    }

    /// The `pageTarget`s of the `pageList`.
    pub fn page_list(&self) -> &[NavigationItem] {
        &self.page_list
    }

    pub fn nav_lists(&self) -> &[NavList] {
        &self.nav_lists
    }
}

/// A parsed EPUB 3 navigation document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavDocNavigation {
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) lang: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) toc: Vec<NavigationItem>,
    pub(crate) page_list: Vec<NavigationItem>,
    pub(crate) landmarks: Vec<NavigationItem>,
    pub(crate) source: String,
}

impl NavDocNavigation {
    /// The `html@xml:lang` (or `html@lang`) attribute.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// The heading of the `toc` nav, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Top-level items of the `nav[epub:type=toc]`.
    pub fn toc(&self) -> &[NavigationItem] {
        &self.toc
    }

    /// Items of the `nav[epub:type=page-list]`.
    pub fn page_list(&self) -> &[NavigationItem] {
        &self.page_list
    }

    /// Items of the `nav[epub:type=landmarks]`.
    pub fn landmarks(&self) -> &[NavigationItem] {
        &self.landmarks
    }
}

/// Navigation resolved from either format.
///
/// # Examples
/// - Printing the table of contents, regardless of format:
/// ```no_run
/// # use epub_utils::Document;
/// # fn main() -> epub_utils::EpubResult<()> {
/// let doc = Document::open("book.epub")?;
///
/// if let Some(toc) = doc.toc()? {
///     for item in toc.all_items() {
///         println!("{}{}", "  ".repeat(item.level() - 1), item.label());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Ncx(NcxNavigation),
    Nav(NavDocNavigation),
}

impl Navigation {
    pub fn format(&self) -> NavigationFormat {
        match self {
            Self::Ncx(_) => NavigationFormat::Ncx,
            Self::Nav(_) => NavigationFormat::Nav,
        }
    }

    /// The archive path of the navigation file.
    pub fn href(&self) -> &str {
        match self {
            Self::Ncx(ncx) => &ncx.href,
            Self::Nav(nav) => &nav.href,
        }
    }

    /// The declared media type of the navigation file.
    pub fn media_type(&self) -> &str {
        match self {
            Self::Ncx(ncx) => &ncx.media_type,
            Self::Nav(nav) => &nav.media_type,
        }
    }

    /// The NCX `docTitle` or the heading of the `toc` nav.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Ncx(ncx) => ncx.title(),
            Self::Nav(nav) => nav.title(),
        }
    }

    /// Top-level table of contents items.
    pub fn toc_items(&self) -> &[NavigationItem] {
        match self {
            Self::Ncx(ncx) => ncx.nav_map(),
            Self::Nav(nav) => nav.toc(),
        }
    }

    pub fn page_list(&self) -> &[NavigationItem] {
        match self {
            Self::Ncx(ncx) => ncx.page_list(),
            Self::Nav(nav) => nav.page_list(),
        }
    }

    /// Landmarks; always empty for NCX.
    pub fn landmarks(&self) -> &[NavigationItem] {
        match self {
            Self::Ncx(_) => &[],
            Self::Nav(nav) => nav.landmarks(),
        }
    }

    /// NCX nav lists; always empty for navigation documents.
    pub fn nav_lists(&self) -> &[NavList] {
        match self {
            Self::Ncx(ncx) => ncx.nav_lists(),
            Self::Nav(_) => &[],
        }
    }

    /// Every item of every collection
    /// (toc, page list, landmarks, then nav lists), flattened in document order.
    pub fn all_items(&self) -> impl Iterator<Item = &NavigationItem> + '_ {
        Flatten::new(self.toc_items())
            .chain(Flatten::new(self.page_list()))
            .chain(Flatten::new(self.landmarks()))
            .chain(
                self.nav_lists()
                    .iter()
                    .flat_map(|list| Flatten::new(&list.targets)),
            )
    }

    /// Every table of contents item, flattened in document order.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(self.toc_items())
    }

    /// Returns the first item with the given `id` across all collections.
    pub fn find_by_id(&self, id: &str) -> Option<&NavigationItem> {
        self.all_items().find(|item| item.id() == Some(id))
    }

    /// Returns every item whose target equals `target`.
    pub fn find_by_target(&self, target: &str) -> Vec<&NavigationItem> {
        self.all_items()
            .filter(|item| item.target == target)
            .collect()
    }

    /// A borrowed, nested view of the table of contents for display or export.
    pub fn hierarchy(&self) -> Vec<HierarchyNode<'_>> {
        self.toc_items().iter().map(HierarchyNode::new).collect()
    }

    /// The whitespace-normalized text content of the navigation file.
    pub fn to_plain(&self) -> String {
        render::inner_text(self.source())
    }
}

impl XmlFragment for Navigation {
    fn source(&self) -> &str {
        match self {
            Self::Ncx(ncx) => &ncx.source,
            Self::Nav(nav) => &nav.source,
        }
    }
}

/// A node of [`Navigation::hierarchy`].
///
/// The [`Display`] impl renders one indented line per node:
/// ```text
/// - Chapter 1 (chapter1.xhtml)
///   - Section 1.1 (chapter1.xhtml#s1)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode<'a> {
    pub label: &'a str,
    pub target: &'a str,
    pub order: Option<u32>,
    pub level: usize,
    pub children: Vec<HierarchyNode<'a>>,
}

impl<'a> HierarchyNode<'a> {
    fn new(item: &'a NavigationItem) -> Self {
        Self {
            label: &item.label,
            target: &item.target,
            order: item.order,
            level: item.level,
            children: item.children.iter().map(Self::new).collect(),
        }
    }

    fn write_indented(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let indent = "  ".repeat(self.level.saturating_sub(1));

        if self.target.is_empty() {
            write!(f, "{indent}- {}", self.label)?;
        } else {
            write!(f, "{indent}- {} ({})", self.label, self.target)?;
        }
        for child in &self.children {
            writeln!(f)?;
            child.write_indented(f)?;
        }
        Ok(())
    }
}

impl Display for HierarchyNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_indented(f)
    }
}
