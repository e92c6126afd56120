use crate::epub::util::{self, TestEpub};
use epub_utils::errors::ErrorKind;
use epub_utils::{DocumentOptions, XmlFragment};

#[test]
fn test_version_routing() {
    #[rustfmt::skip]
    let expected = [
        // (declared, major, toc_href, nav_href)
        ("1.0", 1, Some("toc.ncx"), None),
        ("2.0", 2, Some("toc.ncx"), None),
        ("3.0", 3, None, Some("nav.xhtml")),
    ];

    for (declared, major, toc_href, nav_href) in expected {
        // The EPUB 3 package declares both a nav item and an NCX
        let opf = util::EPUB3_OPF.replace(r#"version="3.0""#, &format!(r#"version="{declared}""#));
        let doc = TestEpub::epub3().package(&opf).open();
        let package = doc.package().unwrap();

        assert_eq!(major, package.version().major, "{declared}");
        assert_eq!(declared, package.version().as_str());
        assert_eq!(toc_href, package.toc_href(), "{declared}");
        assert_eq!(nav_href, package.nav_href(), "{declared}");
    }
}

#[test]
fn test_unsupported_version() {
    let opf = util::EPUB3_OPF.replace(r#"version="3.0""#, r#"version="4.0""#);
    let doc = TestEpub::epub3().package(&opf).open();
    let error = doc.package().unwrap_err();

    assert_eq!(ErrorKind::UnsupportedFormat, error.kind());
    assert_eq!("EPUB version 4.x is not supported (EPUB 4.0 format)", error.to_string());
}

#[test]
fn test_missing_metadata() {
    let start = util::EPUB2_OPF.find("<metadata").unwrap();
    let end = util::EPUB2_OPF.find("</metadata>").unwrap() + "</metadata>".len();
    let opf = format!("{}{}", &util::EPUB2_OPF[..start], &util::EPUB2_OPF[end..]);

    let doc = TestEpub::epub2().package(&opf).open();
    let error = doc.package().unwrap_err();

    assert_eq!(ErrorKind::InvalidSource, error.kind());
    assert_eq!("OPF file missing required metadata element", error.to_string());
    assert_eq!(Some("OEBPS/content.opf"), error.file());
}

#[test]
fn test_metadata() {
    let doc = TestEpub::epub3().open();
    let package = doc.package().unwrap();
    let metadata = package.metadata();

    assert_eq!(Some("uid"), package.unique_identifier());
    assert_eq!(Some("en"), package.language());
    assert_eq!(Some("Sample Book"), metadata.title());
    assert_eq!(["Jane Doe", "John Roe"], metadata.get("creator"));
    // Scalar accessor of a repeated field
    assert_eq!(Some("Jane Doe"), metadata.creator());
    assert_eq!(Some("urn:uuid:12345"), metadata.identifier());
    assert_eq!(Some("2024-01-01T00:00:00Z"), metadata.first("modified"));
    assert!(metadata.get("publisher").is_empty());
    assert_eq!(
        vec!["identifier", "title", "creator", "language", "modified"],
        metadata.iter().map(|(name, _)| name).collect::<Vec<_>>()
    );
}

#[test]
fn test_metadata_kv() {
    let doc = TestEpub::epub2().open();
    let metadata = doc.package().unwrap().metadata();

    assert_eq!(
        "identifier: isbn:0000000000\n     title: Legacy Book\n   creator: Ann Author",
        metadata.to_kv()
    );
}

#[test]
fn test_manifest_and_spine() {
    let doc = TestEpub::epub3().open();
    let package = doc.package().unwrap();
    let manifest = package.manifest();
    let spine = package.spine();

    assert_eq!(6, manifest.len());
    assert_eq!(Some("nav"), manifest.find_by_property("nav").map(|item| item.id()));
    assert_eq!(Some("text/css"), manifest.find_by_id("css").map(|item| item.media_type()));
    assert_eq!(
        Some("chapter2"),
        manifest.find_by_href("text/chapter%202.xhtml").map(|item| item.id())
    );

    assert_eq!(Some("ncx"), spine.toc());
    assert_eq!("default", spine.page_progression_direction());
    assert_eq!(
        vec!["chapter1", "chapter2", "cover-image", "missing"],
        spine.idrefs().collect::<Vec<_>>()
    );
    assert!(!spine.find_by_idref("cover-image").unwrap().is_linear());
    assert!(spine.find_by_idref("chapter1").unwrap().is_linear());
}

#[test]
fn test_fragments() {
    let doc = TestEpub::epub3().open();
    let package = doc.package().unwrap();

    assert_eq!(util::EPUB3_OPF, package.to_str());
    assert_eq!(util::CONTAINER, doc.container().unwrap().to_str());
    assert!(package.spine().to_str().starts_with("<spine toc=\"ncx\">"));
    assert!(package.spine().to_str().ends_with("</spine>"));
    assert!(package.manifest().to_xml(true).contains("\n  <item id=\"nav\""));
}

#[test]
fn test_strict_required_attributes() {
    let opf = util::EPUB2_OPF.replace(
        r#"<itemref idref="chapter2"/>"#,
        r#"<itemref idref="chapter2"/><itemref linear="no"/>"#,
    );

    let strict = TestEpub::epub2().package(&opf).open();
    let error = strict.package().unwrap_err();
    assert_eq!(ErrorKind::InvalidSource, error.kind());

    let lenient = TestEpub::epub2()
        .package(&opf)
        .open_with(DocumentOptions::builder().strict(false));
    assert_eq!(2, lenient.package().unwrap().spine().len());
}

#[test]
fn test_validate() {
    let opf = util::EPUB2_OPF.replace(r#"<dc:creator opf:role="aut">Ann Author</dc:creator>"#, "");

    // Missing metadata does not prevent resolution by default
    let doc = TestEpub::epub2().package(&opf).open();
    assert!(doc.package().is_ok());

    let error = doc.validate().unwrap_err();
    assert_eq!(ErrorKind::Validation, error.kind());
    assert!(error.to_string().contains("Missing or invalid 'creator' element"));

    let validated = TestEpub::epub2()
        .package(&opf)
        .open_with(DocumentOptions::builder().validate_metadata(true));
    assert_eq!(ErrorKind::Validation, validated.package().unwrap_err().kind());

    assert!(TestEpub::epub2().open().validate().is_ok());
}
