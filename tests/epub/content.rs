use crate::epub::util::{self, TestEpub};
use epub_utils::XmlFragment;
use epub_utils::errors::ErrorKind;

#[test]
fn test_find_content_by_id() {
    let doc = TestEpub::epub3().open();
    let chapter = doc.find_content_by_id("chapter1").unwrap();

    assert_eq!(util::CHAPTER1, chapter.text());
    assert_eq!(util::CHAPTER1, chapter.to_str());
    assert_eq!("application/xhtml+xml", chapter.media_type());
    assert_eq!("text/chapter1.xhtml", chapter.href());
    assert_eq!("Chapter 1 It was a dark and stormy night.", chapter.to_plain());

    // Percent-encoded href
    let chapter = doc.find_content_by_id("chapter2").unwrap();
    assert_eq!(util::CHAPTER2, chapter.text());
}

#[test]
fn test_content_not_in_spine() {
    let doc = TestEpub::epub3().open();
    // Declared in the manifest only
    let error = doc.find_content_by_id("css").unwrap_err();

    assert_eq!(ErrorKind::NotFound, error.kind());
    assert_eq!("spine item 'css' not found", error.to_string());
    assert!(
        error
            .suggestions()
            .iter()
            .any(|suggestion| suggestion
                == "Available spine items: chapter1, chapter2, cover-image, missing")
    );
}

#[test]
fn test_content_not_in_manifest() {
    let doc = TestEpub::epub3().open();
    let error = doc.find_content_by_id("missing").unwrap_err();

    assert_eq!(ErrorKind::NotFound, error.kind());
    assert_eq!("manifest item 'missing' not found", error.to_string());
    assert!(
        error
            .suggestions()
            .iter()
            .any(|suggestion| suggestion.starts_with("Available manifest items: nav, ncx, chapter1, chapter2, cover-image (and 1 more)"))
    );
    assert_eq!(Some(doc.path().display().to_string().as_str()), error.file());
}

#[test]
fn test_content_unsupported_media_type() {
    let doc = TestEpub::epub3().open();
    let error = doc.find_content_by_id("cover-image").unwrap_err();

    assert_eq!(ErrorKind::UnsupportedFormat, error.kind());
    assert!(error.to_string().contains("image/svg+xml"));
}

#[test]
fn test_find_resource_by_id() {
    let doc = TestEpub::epub3().open();
    let css = doc.find_resource_by_id("css").unwrap();

    assert_eq!(util::CSS, css.text());
    assert_eq!("text/css", css.media_type());

    let error = doc.find_resource_by_id("missing").unwrap_err();
    assert_eq!(ErrorKind::NotFound, error.kind());
}
