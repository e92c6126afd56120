// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// General attributes
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";
pub(crate) const LANG: &str = "lang"; // xml:lang
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const TYPE: &str = "type";
pub(crate) const TITLE: &str = "title";

// Media types
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";
pub(crate) const XHTML_TYPE: &str = "application/xhtml+xml";
pub(crate) const HTML_TYPE: &str = "text/html";
/// Media types accepted for spine content documents.
pub(crate) const CONTENT_TYPES: [&str; 2] = [XHTML_TYPE, HTML_TYPE];

pub(crate) mod ocf {
    pub(crate) const NAMESPACE: &str = "urn:oasis:names:tc:opendocument:xmlns:container";

    pub(crate) const ROOT_FILE: &str = "rootfile";
    pub(crate) const FULL_PATH: &str = "full-path";
}

pub(crate) mod opf {
    pub(crate) const NAMESPACE: &str = "http://www.idpf.org/2007/opf";

    // Elements
    pub(crate) const PACKAGE: &str = "package";
    pub(crate) const METADATA: &str = "metadata";
    pub(crate) const MANIFEST: &str = "manifest";
    pub(crate) const SPINE: &str = "spine";
    pub(crate) const GUIDE: &str = "guide";
    pub(crate) const ITEM: &str = "item";
    pub(crate) const ITEMREF: &str = "itemref";
    pub(crate) const REFERENCE: &str = "reference";
    pub(crate) const META: &str = "meta";

    // Package attributes
    pub(crate) const VERSION: &str = "version";
    pub(crate) const UNIQUE_ID: &str = "unique-identifier";

    // Metadata attributes
    pub(crate) const PROPERTY: &str = "property";

    // Manifest attributes
    pub(crate) const PROPERTIES: &str = "properties";
    pub(crate) const FALLBACK: &str = "fallback";
    pub(crate) const MEDIA_OVERLAY: &str = "media-overlay";
    pub(crate) const NAV_PROPERTY: &str = "nav";

    // Spine attributes
    pub(crate) const TOC: &str = "toc";
    pub(crate) const PAGE_PROGRESSION_DIRECTION: &str = "page-progression-direction";
    pub(crate) const IDREF: &str = "idref";
    pub(crate) const LINEAR: &str = "linear";

    // Guide reference type
    pub(crate) const TOC_TYPE: &str = "toc";
}

pub(crate) mod dc {
    pub(crate) const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
    pub(crate) const TERMS_NAMESPACE: &str = "http://purl.org/dc/terms/";
    /// Prefix of `meta[property]` values mapped into the terms vocabulary.
    pub(crate) const TERMS_PREFIX: &str = "dcterms:";

    pub(crate) const IDENTIFIER: &str = "identifier";
    pub(crate) const TITLE: &str = "title";
    pub(crate) const CREATOR: &str = "creator";
    pub(crate) const LANGUAGE: &str = "language";

    /// Fields that must be present and non-blank for validation to pass.
    pub(crate) const REQUIRED: [&str; 3] = [IDENTIFIER, TITLE, CREATOR];
}

pub(crate) mod ncx {
    // Elements
    pub(crate) const NCX: &str = "ncx";
    pub(crate) const META: &str = "meta";
    pub(crate) const DOC_TITLE: &str = "docTitle";
    pub(crate) const DOC_AUTHOR: &str = "docAuthor";
    pub(crate) const NAV_MAP: &str = "navMap";
    pub(crate) const NAV_POINT: &str = "navPoint";
    pub(crate) const NAV_LABEL: &str = "navLabel";
    pub(crate) const CONTENT: &str = "content";
    pub(crate) const PAGE_LIST: &str = "pageList";
    pub(crate) const PAGE_TARGET: &str = "pageTarget";
    pub(crate) const NAV_LIST: &str = "navList";
    pub(crate) const NAV_TARGET: &str = "navTarget";

    // Attributes
    pub(crate) const NAME: &str = "name";
    pub(crate) const CONTENT_ATTR: &str = "content";
    pub(crate) const CLASS: &str = "class";
    pub(crate) const PLAY_ORDER: &str = "playOrder";
    pub(crate) const VALUE: &str = "value";
    pub(crate) const VERSION: &str = "version";

    // Head meta names
    pub(crate) const UID: &str = "dtb:uid";
    pub(crate) const DEPTH: &str = "dtb:depth";
    pub(crate) const TOTAL_PAGE_COUNT: &str = "dtb:totalPageCount";
    pub(crate) const MAX_PAGE_NUMBER: &str = "dtb:maxPageNumber";
}

pub(crate) mod xhtml {
    /// Namespace of the `epub:type` attribute.
    pub(crate) const OPS_NAMESPACE: &str = "http://www.idpf.org/2007/ops";

    // Elements
    pub(crate) const HTML: &str = "html";
    pub(crate) const BODY: &str = "body";
    pub(crate) const NAV: &str = "nav";
    pub(crate) const LIST_ITEM: &str = "li";
    pub(crate) const ANCHOR: &str = "a";
    pub(crate) const SPAN: &str = "span";
    pub(crate) const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

    // `epub:type` values
    pub(crate) const TOC: &str = "toc";
    pub(crate) const PAGE_LIST: &str = "page-list";
    pub(crate) const LANDMARKS: &str = "landmarks";
}
