//! The OCF container descriptor (`META-INF/container.xml`).

use crate::render::XmlFragment;

/// The parsed `META-INF/container.xml`.
///
/// Only the first `rootfile` is considered;
/// multi-rendition EPUBs resolve to their default rendition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub(crate) rootfile_path: String,
    pub(crate) media_type: Option<String>,
    pub(crate) source: String,
}

impl Container {
    /// The archive path of the package document (e.g., `OEBPS/content.opf`),
    /// exactly as declared by `rootfile@full-path`.
    pub fn rootfile_path(&self) -> &str {
        &self.rootfile_path
    }

    /// The declared `rootfile@media-type`, if present.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }
}

impl XmlFragment for Container {
    fn source(&self) -> &str {
        &self.source
    }
}
