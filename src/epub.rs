//! The EPUB [`Document`] module.
//!
//! Supports EPUB versions `1`, `2`, and `3`.
//!
//! For more information regarding the EPUB format, see:
//! <https://www.w3.org/TR/epub>

pub(crate) mod consts;
pub mod container;
pub mod content;
pub mod manifest;
pub mod metadata;
pub mod navigation;
pub mod package;
mod parser;
pub mod spine;

use crate::archive::{ArchiveEntry, EpubArchive};
use crate::epub::container::Container;
use crate::epub::content::Content;
use crate::epub::manifest::ManifestItem;
use crate::epub::navigation::{Navigation, NavigationFormat};
use crate::epub::package::Package;
use crate::epub::parser::EpubParser;
use crate::epub::parser::navigation::NavigationFile;
use crate::errors::{self, EpubError, EpubResult, ErrorDetails};
use crate::util::sync::Lazy;
use crate::util::uri;
use log::debug;
use std::fmt::{Debug, Formatter};
use std::path::Path;

/// Maximum amount of ids suggested when a lookup fails.
const SUGGESTED_IDS: usize = 5;

/// A handle to one EPUB archive.
///
/// Provides lazy access to the following structural documents:
/// - [`Container`]: `META-INF/container.xml`
/// - [`Package`]: Metadata, manifest, and spine (`.opf`)
/// - [`Navigation`]: Table of contents from the NCX or navigation document
///
/// Opening only verifies the archive.
/// Each document is parsed on first access and cached afterward;
/// failures are not cached and are returned again on the next access.
///
/// # Configuration
/// Parsing can be configured using [`DocumentOptions`].
///
/// Enabling `threadsafe` (default) makes [`Document`] implement `Send + Sync`.
///
/// # Examples
/// - Reading the structure of an epub:
/// ```no_run
/// # use epub_utils::{Document, EpubResult};
/// # use epub_utils::render::XmlFragment;
/// # fn main() -> EpubResult<()> {
/// let doc = Document::open("book.epub")?;
///
/// println!("Package: {}", doc.container()?.rootfile_path());
/// println!("Title: {:?}", doc.package()?.metadata().title());
///
/// for itemref in doc.package()?.spine() {
///     let content = doc.find_content_by_id(itemref.idref())?;
///     println!("{}: {}", content.href(), content.to_plain());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Document {
    archive: EpubArchive,
    options: DocumentOptions,
    container: Lazy<Container>,
    package: Lazy<Package>,
    ncx: Lazy<Option<Navigation>>,
    nav: Lazy<Option<Navigation>>,
}

impl Document {
    /// Opens a [`Document`] from the given [`Path`] with default [`DocumentOptions`].
    ///
    /// # Errors
    /// [`InvalidSource`](EpubError::InvalidSource): The file does not exist or is not a zip archive.
    ///
    /// # See Also
    /// - [`Self::open_with`] to specify options.
    pub fn open(path: impl AsRef<Path>) -> EpubResult<Self> {
        Self::open_with(path, DocumentOptions::default())
    }

    /// Opens a [`Document`] from the given [`Path`] with the specified [`DocumentOptions`].
    ///
    /// See [`Self::open`] for more details.
    ///
    /// # Examples
    /// - Opening an EPUB with options:
    /// ```no_run
    /// # use epub_utils::{Document, DocumentOptions, EpubResult};
    /// # use epub_utils::epub::navigation::NavigationFormat;
    /// # fn main() -> EpubResult<()> {
    /// let doc = Document::open_with(
    ///     "book.epub",
    ///     DocumentOptions::builder()
    ///         .strict(false)
    ///         .validate_metadata(true)
    ///         .preferred_toc(NavigationFormat::Ncx),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_with(
        path: impl AsRef<Path>,
        options: impl Into<DocumentOptions>,
    ) -> EpubResult<Self> {
        Ok(Self {
            archive: EpubArchive::open(path.as_ref())?,
            options: options.into(),
            container: Lazy::new(),
            package: Lazy::new(),
            ncx: Lazy::new(),
            nav: Lazy::new(),
        })
    }

    /// The options this document was opened with.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// The location of the archive on disk.
    pub fn path(&self) -> &Path {
        self.archive.path()
    }

    /// The parsed `META-INF/container.xml`.
    ///
    /// # Errors
    /// - [`NotFound`](EpubError::NotFound): The archive has no `META-INF/container.xml`.
    /// - [`Parse`](EpubError::Parse): The container is malformed.
    /// - [`InvalidSource`](EpubError::InvalidSource): No usable `rootfile` is declared.
    pub fn container(&self) -> EpubResult<&Container> {
        self.container.get_or_try_init(|| {
            let data = self.archive.read_str(consts::CONTAINER)?;
            let container = self.parser().parse_container(&data)?;

            debug!("Resolved container: package at {}", container.rootfile_path());
            Ok(container)
        })
    }

    /// The parsed package document referenced by the [`Container`].
    ///
    /// # Errors
    /// Any error of [`Self::container`], as well as:
    /// - [`NotFound`](EpubError::NotFound): The package document is missing.
    /// - [`Parse`](EpubError::Parse): The package document is malformed.
    /// - [`InvalidSource`](EpubError::InvalidSource):
    ///   A missing `version`, `metadata`, `manifest`, or `spine`.
    /// - [`UnsupportedFormat`](EpubError::UnsupportedFormat): A version other than `1`, `2`, or `3`.
    /// - [`Validation`](EpubError::Validation):
    ///   Missing required metadata, if [`DocumentOptions::validate_metadata`] is enabled.
    pub fn package(&self) -> EpubResult<&Package> {
        self.package.get_or_try_init(|| {
            let rootfile_path = self.container()?.rootfile_path();
            let data = self.archive.read_str(rootfile_path)?;

            self.parser().parse_opf(rootfile_path, &data)
        })
    }

    /// The directory containing the package document,
    /// or `""` if it is located at the root of the archive.
    ///
    /// Hrefs declared by the package are relative to this directory.
    pub fn package_directory(&self) -> EpubResult<&str> {
        Ok(uri::parent(self.container()?.rootfile_path()))
    }

    /// The legacy NCX navigation, referenced by [`Package::toc_href`].
    ///
    /// Returns [`None`] if the package references no NCX document.
    pub fn ncx(&self) -> EpubResult<Option<&Navigation>> {
        self.ncx
            .get_or_try_init(|| {
                let Some(href) = self.package()?.toc_href() else {
                    return Ok(None);
                };
                self.resolve_navigation(href, NavigationFormat::Ncx).map(Some)
            })
            .map(Option::as_ref)
    }

    /// The EPUB 3 navigation document, referenced by [`Package::nav_href`].
    ///
    /// Returns [`None`] if the package references no navigation document.
    pub fn nav(&self) -> EpubResult<Option<&Navigation>> {
        self.nav
            .get_or_try_init(|| {
                let Some(href) = self.package()?.nav_href() else {
                    return Ok(None);
                };
                self.resolve_navigation(href, NavigationFormat::Nav).map(Some)
            })
            .map(Option::as_ref)
    }

    /// The table of contents in the [`DocumentOptions::preferred_toc`] format,
    /// falling back to the other format.
    ///
    /// Returns [`None`] if neither is available.
    pub fn toc(&self) -> EpubResult<Option<&Navigation>> {
        let preferred = self.options.preferred_toc;
        let fallback = match preferred {
            NavigationFormat::Nav => NavigationFormat::Ncx,
            NavigationFormat::Ncx => NavigationFormat::Nav,
        };

        match self.navigation(preferred)? {
            Some(toc) => Ok(Some(toc)),
            None => self.navigation(fallback),
        }
    }

    fn navigation(&self, format: NavigationFormat) -> EpubResult<Option<&Navigation>> {
        match format {
            NavigationFormat::Ncx => self.ncx(),
            NavigationFormat::Nav => self.nav(),
        }
    }

    /// Retrieves the content document of the spine item `id`.
    ///
    /// # Errors
    /// - [`NotFound`](EpubError::NotFound): `id` is absent from the spine or manifest;
    ///   suggestions list available ids.
    /// - [`UnsupportedFormat`](EpubError::UnsupportedFormat):
    ///   The item is neither `application/xhtml+xml` nor `text/html`.
    ///
    /// # Examples
    /// - Retrieving the first chapter:
    /// ```no_run
    /// # use epub_utils::{Document, EpubResult};
    /// # fn main() -> EpubResult<()> {
    /// let doc = Document::open("book.epub")?;
    /// let chapter = doc.find_content_by_id("chapter1")?;
    ///
    /// assert_eq!("application/xhtml+xml", chapter.media_type());
    /// println!("{}", chapter.to_plain());
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_content_by_id(&self, id: &str) -> EpubResult<Content> {
        let package = self.package()?;
        let spine = package.spine();

        if spine.find_by_idref(id).is_none() {
            return Err(self.id_not_found(
                format!("spine item '{id}'"),
                "Verify the item is included in the spine",
                format!(
                    "Available spine items: {}",
                    errors::sample(spine.idrefs(), SUGGESTED_IDS)
                ),
            ));
        }

        let item = self.find_manifest_item(package, id)?;
        let media_type = item.media_type();
        if !consts::CONTENT_TYPES
            .iter()
            .any(|content_type| media_type.eq_ignore_ascii_case(content_type))
        {
            return Err(EpubError::unsupported(format!(
                "Unsupported media type '{media_type}' for content item '{id}'"
            ))
            .with_details(
                ErrorDetails::new()
                    .file(self.path().display().to_string())
                    .suggestion(format!(
                        "Content documents must be one of: {}",
                        consts::CONTENT_TYPES.join(", ")
                    ))
                    .suggestion("Use find_resource_by_id to read other resources"),
            ));
        }

        self.read_manifest_item(item)
    }

    /// Retrieves any manifest resource `id` as text, regardless of the spine.
    ///
    /// # Errors
    /// - [`NotFound`](EpubError::NotFound): `id` is absent from the manifest.
    /// - [`InvalidSource`](EpubError::InvalidSource): The resource is not UTF-8 text.
    pub fn find_resource_by_id(&self, id: &str) -> EpubResult<Content> {
        let package = self.package()?;
        let item = self.find_manifest_item(package, id)?;

        self.read_manifest_item(item)
    }

    /// Reads the archive entry at `path` as text.
    ///
    /// `path` is relative to the root of the archive (e.g., `OEBPS/styles.css`).
    pub fn read_file(&self, path: &str) -> EpubResult<String> {
        self.archive.read_str(path)
    }

    /// Every file entry of the archive, sorted by path.
    ///
    /// Directory entries are excluded.
    pub fn list_files(&self) -> EpubResult<Vec<ArchiveEntry>> {
        self.archive.entries()
    }

    /// Checks that the required metadata (`identifier`, `title`, `creator`) is present.
    ///
    /// # Errors
    /// Any error of [`Self::package`], or [`Validation`](EpubError::Validation)
    /// listing every missing field.
    pub fn validate(&self) -> EpubResult<()> {
        let package = self.package()?;

        package
            .metadata()
            .validate()
            .map_err(|error| error.in_file(&self.path().display().to_string()))
    }

    fn parser(&self) -> EpubParser<'_> {
        EpubParser::new(&self.options)
    }

    fn resolve_navigation(&self, href: &str, format: NavigationFormat) -> EpubResult<Navigation> {
        let package = self.package()?;
        let location = uri::to_entry_name(self.package_directory()?, href);
        let data = self.archive.read_str(&location)?;
        let media_type = package
            .manifest()
            .find_by_href(href)
            .map_or(
                match format {
                    NavigationFormat::Ncx => consts::NCX_TYPE,
                    NavigationFormat::Nav => consts::XHTML_TYPE,
                },
                ManifestItem::media_type,
            );
        let file = NavigationFile {
            href: &location,
            media_type,
        };

        match format {
            NavigationFormat::Ncx => self.parser().parse_ncx(file, &data),
            NavigationFormat::Nav => self.parser().parse_nav(file, &data),
        }
    }

    fn find_manifest_item<'a>(&self, package: &'a Package, id: &str) -> EpubResult<&'a ManifestItem> {
        let manifest = package.manifest();

        manifest.find_by_id(id).ok_or_else(|| {
            self.id_not_found(
                format!("manifest item '{id}'"),
                "Verify the item is declared in the manifest",
                format!(
                    "Available manifest items: {}",
                    errors::sample(manifest.ids(), SUGGESTED_IDS)
                ),
            )
        })
    }

    fn read_manifest_item(&self, item: &ManifestItem) -> EpubResult<Content> {
        let location = uri::to_entry_name(self.package_directory()?, item.href());

        Ok(Content {
            text: self.archive.read_str(&location)?,
            media_type: item.media_type().to_owned(),
            href: item.href().to_owned(),
        })
    }

    fn id_not_found(&self, target: String, hint: &str, available: String) -> EpubError {
        EpubError::not_found(target).with_details(
            ErrorDetails::new()
                .file(self.path().display().to_string())
                .suggestion("Check that the item ID is correct")
                .suggestion(hint)
                .suggestion(available),
        )
    }
}

impl Debug for Document {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Document")
            .field("path", &self.path())
            .field("options", &self.options)
            .field("container", &self.container)
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

/// Options upon opening a [`Document`].
///
/// To create a mutable options instance, see
/// [`DocumentOptions::builder`] or [`DocumentOptions::default`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentOptions {
    /// When set to `true`, manifest `item` elements lacking an
    /// `id`, `href`, or `media-type`, and spine `itemref` elements lacking an `idref`
    /// are rejected with [`InvalidSource`](EpubError::InvalidSource).
    ///
    /// When set to `false`, such elements are skipped.
    ///
    /// Default: `true`
    pub strict: bool,
    /// When set to `true`, resolving the [`Package`] fails with
    /// [`Validation`](EpubError::Validation) if `identifier`, `title`,
    /// or `creator` metadata is missing.
    ///
    /// Regardless of this setting, [`Document::validate`] performs the same check on demand.
    ///
    /// Default: `false`
    pub validate_metadata: bool,
    /// The navigation format returned by [`Document::toc`] when both are available.
    ///
    /// Default: [`NavigationFormat::Nav`]
    pub preferred_toc: NavigationFormat,
}

impl DocumentOptions {
    /// Returns a builder to create a [`DocumentOptions`] instance.
    pub fn builder() -> DocumentOptionsBuilder {
        DocumentOptionsBuilder(Self::default())
    }
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            strict: true,
            validate_metadata: false,
            preferred_toc: NavigationFormat::Nav,
        }
    }
}

impl From<DocumentOptionsBuilder> for DocumentOptions {
    fn from(value: DocumentOptionsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`DocumentOptions`] instance.
#[derive(Clone, Debug)]
pub struct DocumentOptionsBuilder(DocumentOptions);

impl DocumentOptionsBuilder {
    /// Turn this builder into a [`DocumentOptions`] instance.
    pub fn build(self) -> DocumentOptions {
        self.0
    }

    /// See [`DocumentOptions::strict`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.0.strict = strict;
        self
    }

    /// See [`DocumentOptions::validate_metadata`].
    pub fn validate_metadata(mut self, validate_metadata: bool) -> Self {
        self.0.validate_metadata = validate_metadata;
        self
    }

    /// See [`DocumentOptions::preferred_toc`].
    pub fn preferred_toc(mut self, format: NavigationFormat) -> Self {
        self.0.preferred_toc = format;
        self
    }

    /// Opens a [`Document`] with the options of this builder.
    ///
    /// Shorthand for [`Document::open_with`].
    pub fn open(self, path: impl AsRef<Path>) -> EpubResult<Document> {
        Document::open_with(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = DocumentOptions::builder()
            .strict(false)
            .validate_metadata(true)
            .preferred_toc(NavigationFormat::Ncx)
            .build();

        assert!(!options.strict);
        assert!(options.validate_metadata);
        assert_eq!(NavigationFormat::Ncx, options.preferred_toc);

        let defaults = DocumentOptions::default();
        assert!(defaults.strict);
        assert!(!defaults.validate_metadata);
        assert_eq!(NavigationFormat::Nav, defaults.preferred_toc);
    }

    #[cfg(feature = "threadsafe")]
    #[test]
    fn test_document_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
    }
}
