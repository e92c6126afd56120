use epub_utils::{Document, DocumentOptions};
use std::io::Write;
use std::ops::Deref;
use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

pub const EPUB3_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid" xml:lang="en">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:12345</dc:identifier>
    <dc:title>Sample Book</dc:title>
    <dc:creator>Jane Doe</dc:creator>
    <dc:creator>John Roe</dc:creator>
    <dc:language>en</dc:language>
    <meta property="dcterms:modified">2024-01-01T00:00:00Z</meta>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="chapter1" href="text/chapter1.xhtml" media-type="application/xhtml+xml"/>
    <item id="chapter2" href="text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
    <item id="cover-image" href="images/cover.svg" media-type="image/svg+xml"/>
    <item id="css" href="styles/main.css" media-type="text/css"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="chapter1"/>
    <itemref idref="chapter2"/>
    <itemref idref="cover-image" linear="no"/>
    <itemref idref="missing"/>
  </spine>
</package>"#;

pub const EPUB3_NAV: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>Navigation</title></head>
<body>
  <nav epub:type="toc">
    <h1>Contents</h1>
    <ol>
      <li><a href="text/chapter1.xhtml">Chapter 1</a></li>
      <li><a href="text/chapter%202.xhtml">Chapter 2</a></li>
    </ol>
  </nav>
</body>
</html>"#;

pub const EPUB2_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:identifier id="uid">isbn:0000000000</dc:identifier>
    <dc:title>Legacy Book</dc:title>
    <dc:creator opf:role="aut">Ann Author</dc:creator>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="chapter1" href="text/chapter1.xhtml" media-type="application/xhtml+xml"/>
    <item id="chapter2" href="text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="chapter1"/>
    <itemref idref="chapter2"/>
  </spine>
</package>"#;

pub const NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="isbn:0000000000"/>
    <meta name="dtb:depth" content="2"/>
  </head>
  <docTitle><text>Legacy Book</text></docTitle>
  <navMap>
    <navPoint id="np1" playOrder="1">
      <navLabel><text>Chapter 1</text></navLabel>
      <content src="text/chapter1.xhtml"/>
      <navPoint id="np1-1" playOrder="2">
        <navLabel><text>Section 1.1</text></navLabel>
        <content src="text/chapter1.xhtml#s1"/>
      </navPoint>
    </navPoint>
    <navPoint id="np2" playOrder="3">
      <navLabel><text>Chapter 2</text></navLabel>
      <content src="text/chapter%202.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

pub const CHAPTER1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Ignored</title></head>
<body>
  <h1>Chapter 1</h1>
  <p>It was a   dark and
  stormy night.</p>
</body>
</html>"#;

pub const CHAPTER2: &str = r#"<html xmlns="http://www.w3.org/1999/xhtml"><body><p>Chapter 2</p></body></html>"#;

pub const CSS: &str = "body { margin: 0; }";

/// An EPUB fixture, written to a temporary file upon opening.
pub struct TestEpub {
    files: Vec<(String, String)>,
}

impl TestEpub {
    /// An archive with only the `mimetype` entry.
    pub fn empty() -> Self {
        Self { files: Vec::new() }
    }

    /// An EPUB 3 fixture with a navigation document and NCX.
    ///
    /// Package document: `OEBPS/content.opf`
    pub fn epub3() -> Self {
        Self::empty()
            .file("META-INF/container.xml", CONTAINER)
            .file("OEBPS/content.opf", EPUB3_OPF)
            .file("OEBPS/nav.xhtml", EPUB3_NAV)
            .file("OEBPS/toc.ncx", NCX)
            .file("OEBPS/text/chapter1.xhtml", CHAPTER1)
            .file("OEBPS/text/chapter 2.xhtml", CHAPTER2)
            .file("OEBPS/images/cover.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>")
            .file("OEBPS/styles/main.css", CSS)
    }

    /// An EPUB 2 fixture with an NCX.
    ///
    /// Package document: `OEBPS/content.opf`
    pub fn epub2() -> Self {
        Self::empty()
            .file("META-INF/container.xml", CONTAINER)
            .file("OEBPS/content.opf", EPUB2_OPF)
            .file("OEBPS/toc.ncx", NCX)
            .file("OEBPS/text/chapter1.xhtml", CHAPTER1)
            .file("OEBPS/text/chapter 2.xhtml", CHAPTER2)
    }

    /// Adds or replaces the entry `name`.
    pub fn file(mut self, name: &str, content: &str) -> Self {
        self.files.retain(|(existing, _)| existing != name);
        self.files.push((name.to_owned(), content.to_owned()));
        self
    }

    /// Removes the entry `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.files.retain(|(existing, _)| existing != name);
        self
    }

    /// Replaces the package document with `opf`.
    pub fn package(self, opf: &str) -> Self {
        self.file("OEBPS/content.opf", opf)
    }

    pub fn write(&self) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        let mut zip = zip::ZipWriter::new(temp.as_file_mut());

        zip.start_file(
            "mimetype",
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        )
        .unwrap();
        zip.write_all(b"application/epub+zip").unwrap();
        zip.add_directory("META-INF/", SimpleFileOptions::default())
            .unwrap();

        for (name, content) in &self.files {
            zip.start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        temp
    }

    pub fn open(&self) -> OpenedEpub {
        self.open_with(DocumentOptions::default())
    }

    pub fn open_with(&self, options: impl Into<DocumentOptions>) -> OpenedEpub {
        let file = self.write();
        let doc = Document::open_with(file.path(), options).unwrap();

        OpenedEpub { _file: file, doc }
    }
}

/// A [`Document`] along with its temporary file.
pub struct OpenedEpub {
    _file: NamedTempFile,
    doc: Document,
}

impl Deref for OpenedEpub {
    type Target = Document;

    fn deref(&self) -> &Self::Target {
        &self.doc
    }
}
