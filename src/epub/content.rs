//! Content documents resolved through the spine and manifest.

use crate::render::{self, XmlFragment};

/// A content document (XHTML or HTML) read from the archive.
///
/// Returned by [`Document::find_content_by_id`](crate::Document::find_content_by_id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    pub(crate) text: String,
    pub(crate) media_type: String,
    pub(crate) href: String,
}

impl Content {
    /// The raw markup of the document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The media type declared by the manifest.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The manifest href, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The text within `body`, with whitespace collapsed.
    pub fn to_plain(&self) -> String {
        render::inner_text(&self.text)
    }

    /// Consumes this content, returning the raw markup.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl XmlFragment for Content {
    fn source(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_plain() {
        let content = Content {
            text: "<html><head><title>Ignored</title></head>\
                   <body><h1>Chapter 1</h1>\n<p>It  was a\tdark night.</p></body></html>"
                .to_owned(),
            media_type: "application/xhtml+xml".to_owned(),
            href: "text/c1.xhtml".to_owned(),
        };

        assert_eq!("Chapter 1 It was a dark night.", content.to_plain());
    }
}
