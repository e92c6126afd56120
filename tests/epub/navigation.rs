use crate::epub::util::{self, TestEpub};
use epub_utils::DocumentOptions;
use epub_utils::epub::navigation::{Navigation, NavigationFormat};
use epub_utils::errors::ErrorKind;

#[test]
fn test_epub3_nav() {
    let doc = TestEpub::epub3().open();
    let toc = doc.toc().unwrap().unwrap();

    assert_eq!(NavigationFormat::Nav, toc.format());
    assert_eq!("OEBPS/nav.xhtml", toc.href());
    assert_eq!("application/xhtml+xml", toc.media_type());
    assert_eq!(Some("Contents"), toc.title());
    assert_eq!(
        vec![("Chapter 1", "text/chapter1.xhtml"), ("Chapter 2", "text/chapter%202.xhtml")],
        toc.toc_items()
            .iter()
            .map(|item| (item.label(), item.target()))
            .collect::<Vec<_>>()
    );
    // The EPUB 3 package resolves no NCX pointer
    assert!(doc.ncx().unwrap().is_none());
}

#[test]
fn test_epub2_ncx_depth() {
    let doc = TestEpub::epub2().open();
    assert!(doc.nav().unwrap().is_none());

    let toc = doc.toc().unwrap().unwrap();
    let Navigation::Ncx(ncx) = toc else {
        panic!("expected NCX navigation");
    };

    assert_eq!("OEBPS/toc.ncx", toc.href());
    assert_eq!("application/x-dtbncx+xml", toc.media_type());
    assert_eq!(Some(2), ncx.depth());
    assert_eq!(Some("isbn:0000000000"), ncx.uid());
    assert_eq!(Some("Legacy Book"), ncx.title());

    let chapter = &ncx.nav_map()[0];
    let section = &chapter.children()[0];
    assert_eq!(2, ncx.nav_map().len());
    assert_eq!((1, Some(1)), (chapter.level(), chapter.order()));
    assert_eq!((2, Some(2)), (section.level(), section.order()));
    assert_eq!("text/chapter1.xhtml#s1", section.target());

    assert_eq!(3, toc.all_items().count());
    assert_eq!(Some("Section 1.1"), toc.find_by_id("np1-1").map(|item| item.label()));
    assert_eq!(1, toc.find_by_target("text/chapter1.xhtml").len());
}

#[test]
fn test_preferred_toc() {
    let doc = TestEpub::epub3()
        .package(&util::EPUB3_OPF.replace(r#"version="3.0""#, r#"version="2.0""#))
        .open_with(DocumentOptions::builder().preferred_toc(NavigationFormat::Nav));
    // Falls back to the NCX of an EPUB 2 package
    assert_eq!(NavigationFormat::Ncx, doc.toc().unwrap().unwrap().format());

    let doc = TestEpub::epub3().open_with(DocumentOptions::builder().preferred_toc(NavigationFormat::Ncx));
    // Falls back to the navigation document of an EPUB 3 package
    assert_eq!(NavigationFormat::Nav, doc.toc().unwrap().unwrap().format());
}

#[test]
fn test_no_navigation() {
    let opf = util::EPUB2_OPF
        .replace(r#"<item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>"#, "")
        .replace(r#"<spine toc="ncx">"#, "<spine>");
    let doc = TestEpub::epub2().package(&opf).open();

    assert!(doc.package().unwrap().toc_href().is_none());
    assert!(doc.toc().unwrap().is_none());
}

#[test]
fn test_malformed_navigation() {
    let doc = TestEpub::epub2()
        .file("OEBPS/toc.ncx", "<ncx><navMap><navPoint></navMap></ncx>")
        .open();
    let error = doc.ncx().unwrap_err();

    assert_eq!(ErrorKind::Parse, error.kind());
    assert_eq!(Some("OEBPS/toc.ncx"), error.file());
}

#[test]
fn test_malformed_nav_document() {
    let doc = TestEpub::epub3()
        .file("OEBPS/nav.xhtml", r#"<html><body><nav><ol><li></ol></nav></body></html>"#)
        .open();
    let error = doc.nav().unwrap_err();

    assert_eq!(ErrorKind::Parse, error.kind());
    assert_eq!(Some("OEBPS/nav.xhtml"), error.file());
    assert!(error.to_string().starts_with("Error parsing OEBPS/nav.xhtml"));
    // The preferred toc surfaces the same failure
    assert_eq!(ErrorKind::Parse, doc.toc().unwrap_err().kind());
}

#[test]
fn test_hierarchy() {
    let doc = TestEpub::epub2().open();
    let toc = doc.toc().unwrap().unwrap();
    let hierarchy = toc.hierarchy();

    assert_eq!(2, hierarchy.len());
    assert_eq!(
        "- Chapter 1 (text/chapter1.xhtml)\n  - Section 1.1 (text/chapter1.xhtml#s1)",
        hierarchy[0].to_string()
    );
}
