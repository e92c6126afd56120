mod guide;
mod manifest;
mod metadata;
mod spine;

use crate::epub::consts::{self, opf};
use crate::epub::manifest::{Manifest, ManifestItem};
use crate::epub::metadata::Metadata;
use crate::epub::package::{EpubVersion, Guide, GuideReference, Package};
use crate::epub::parser::EpubParser;
use crate::epub::spine::Spine;
use crate::errors::{EpubError, ErrorDetails};
use crate::parser::ParserResult;
use crate::parser::xml::{XMLNS, XmlEvent, XmlReader, XmlStartElement};
use crate::util::uri;
use log::debug;

struct PackageData {
    version: Option<String>,
    unique_identifier: Option<String>,
    language: Option<String>,
}

type ProcessedOpfData = (
    Option<PackageData>,
    Option<Metadata>,
    Option<Manifest>,
    Option<Spine>,
    Option<Guide>,
);

impl EpubParser<'_> {
    /// Parses the epub `.opf` file located at `document`.
    ///
    /// Structural requirements are only checked once the
    /// entire document is confirmed to be well-formed.
    pub(in crate::epub) fn parse_opf(&self, document: &str, data: &str) -> ParserResult<Package> {
        let (package, metadata, manifest, spine, guide) = self.handle_opf(document, data)?;
        let invalid = |message: &str, suggestions: [&str; 2]| {
            let details = suggestions
                .into_iter()
                .fold(ErrorDetails::new().file(document), ErrorDetails::suggestion);
            EpubError::invalid_source(message).with_details(details)
        };

        // Assert existence
        let package = Self::mandatory(package, || {
            invalid(
                "OPF file missing required package element",
                [
                    "Check that this is a valid EPUB OPF file",
                    "Verify the EPUB was created with compliant tools",
                ],
            )
        })?;
        let raw_version = Self::mandatory(package.version, || {
            invalid(
                "OPF file missing required 'version' attribute",
                [
                    "Ensure the package element has a version attribute",
                    "Check that this is a valid EPUB OPF file",
                ],
            )
        })?;
        let version = Self::handle_epub_version(document, &raw_version)?;
        let missing = |element: &str| {
            invalid(
                &format!("OPF file missing required {element} element"),
                [
                    "Ensure the OPF file contains metadata, manifest, and spine sections",
                    "Verify the EPUB package structure is complete",
                ],
            )
        };
        let metadata = Self::mandatory(metadata, || missing(opf::METADATA))?;
        let manifest = Self::mandatory(manifest, || missing(opf::MANIFEST))?;
        let spine = Self::mandatory(spine, || missing(opf::SPINE))?;

        if self.options.validate_metadata {
            metadata.validate().map_err(|error| error.in_file(document))?;
        }

        // Locate navigation
        let (toc_href, nav_href) = if version.is_epub3() {
            (None, Self::find_nav_href(&manifest, guide.as_ref()))
        } else {
            (Self::find_toc_href(&manifest, &spine), None)
        };
        debug!(
            "Resolved package {document} (EPUB {version}): {} manifest items, {} spine items",
            manifest.len(),
            spine.len(),
        );

        Ok(Package {
            version,
            unique_identifier: package.unique_identifier,
            language: package.language,
            metadata,
            manifest,
            spine,
            guide,
            toc_href,
            nav_href,
            source: data.to_owned(),
        })
    }

    fn handle_opf(&self, document: &str, data: &str) -> ParserResult<ProcessedOpfData> {
        let mut reader = XmlReader::new(document, data);
        let mut package = None;
        let mut metadata = None;
        let mut manifest = None;
        let mut spine = None;
        let mut guide = None;
        let mut is_root = true;

        while let Some(event) = reader.next() {
            let el = match event? {
                XmlEvent::Start(el) | XmlEvent::Empty(el) => el,
                _ => continue,
            };
            if std::mem::take(&mut is_root) {
                if el.local_name() == opf::PACKAGE {
                    package.replace(Self::parse_package(&el));
                }
                continue;
            }
            if el.namespace() != Some(opf::NAMESPACE) {
                continue;
            }
            match el.local_name() {
                opf::METADATA if metadata.is_none() => {
                    metadata.replace(self.parse_metadata(&mut reader, &el)?);
                }
                opf::MANIFEST if manifest.is_none() => {
                    manifest.replace(self.parse_manifest(&mut reader, &el)?);
                }
                opf::SPINE if spine.is_none() => {
                    spine.replace(self.parse_spine(&mut reader, &el)?);
                }
                opf::GUIDE if guide.is_none() => {
                    guide.replace(self.parse_guide(&mut reader, &el)?);
                }
                _ => {}
            }
        }

        Ok((package, metadata, manifest, spine, guide))
    }

    fn parse_package(package: &XmlStartElement) -> PackageData {
        let attribute = |name: &str| package.get_attribute(name).map(str::to_owned);

        PackageData {
            version: attribute(opf::VERSION),
            unique_identifier: attribute(opf::UNIQUE_ID),
            language: package
                .get_attribute_ns(XMLNS, consts::LANG)
                .or_else(|| package.get_attribute_any(consts::LANG))
                .map(str::to_owned),
        }
    }

    fn handle_epub_version(document: &str, raw: &str) -> ParserResult<EpubVersion> {
        let Some(version) = EpubVersion::parse(raw) else {
            return Err(EpubError::invalid_source(format!(
                "Invalid version format in OPF file: '{raw}'"
            ))
            .with_details(
                ErrorDetails::new()
                    .file(document)
                    .suggestion("Use a version of the form 'major.minor' (e.g., '3.0')"),
            ));
        };

        if !(1..=3).contains(&version.major) {
            return Err(EpubError::unsupported(format!(
                "EPUB version {}.x is not supported (EPUB {} format)",
                version.major,
                version.as_str().trim(),
            ))
            .with_details(
                ErrorDetails::new()
                    .file(document)
                    .suggestion("Try using an EPUB file with a compatible version")
                    .suggestion("Supported versions are EPUB 1, 2, and 3"),
            ));
        }
        Ok(version)
    }

    /// EPUB 3: the navigation document, without a fragment.
    fn find_nav_href(manifest: &Manifest, guide: Option<&Guide>) -> Option<String> {
        manifest
            .find_by_property(opf::NAV_PROPERTY)
            .map(ManifestItem::href)
            // Fall back to the legacy guide
            .or_else(|| {
                guide
                    .and_then(|guide| guide.find_by_kind(opf::TOC_TYPE))
                    .map(GuideReference::href)
            })
            .map(|href| uri::strip_fragment(href).to_owned())
    }

    /// EPUB 1/2: the NCX document.
    fn find_toc_href(manifest: &Manifest, spine: &Spine) -> Option<String> {
        if let Some(ncx) = manifest.find_by_media_type(consts::NCX_TYPE).next() {
            return Some(ncx.href().to_owned());
        }
        // Fall back to the spine `toc` attribute
        spine
            .toc()
            .and_then(|id| manifest.find_by_id(id))
            .map(|item| uri::strip_fragment(item.href()).to_owned())
    }
}

/// Invokes `handle` for every element nested within `parent`, at any depth,
/// until the end tag of `parent` is consumed.
///
/// Returns the source text of `parent`.
fn for_each_child<'a>(
    reader: &mut XmlReader<'a>,
    parent: &XmlStartElement,
    mut handle: impl FnMut(&mut XmlReader<'a>, XmlStartElement) -> ParserResult<()>,
) -> ParserResult<&'a str> {
    if parent.is_empty() {
        return Ok(reader.fragment(parent.start(), parent.end()));
    }
    let depth = reader.depth();

    while let Some(event) = reader.next() {
        match event? {
            XmlEvent::Start(el) | XmlEvent::Empty(el) => handle(reader, el)?,
            XmlEvent::End(el) if reader.depth() < depth => {
                return Ok(reader.fragment(parent.start(), el.end()));
            }
            _ => {}
        }
    }
    // Unreachable for well-formed input as unclosed elements are reported by the reader
    Ok(reader.fragment(parent.start(), parent.end()))
}
