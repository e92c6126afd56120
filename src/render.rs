//! Textual renderings of parsed structures.

use crate::epub::consts::xhtml;
use crate::util::StringExt;
use quick_xml::escape;
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

/// A structure backed by an XML fragment of the EPUB.
///
/// Implemented by [`Container`](crate::epub::container::Container),
/// [`Package`](crate::epub::package::Package) and its parts,
/// [`Navigation`](crate::epub::navigation::Navigation),
/// and [`Content`](crate::epub::content::Content).
pub trait XmlFragment {
    /// The raw source text of this fragment, exactly as found in the archive.
    fn source(&self) -> &str;

    /// Plain text rendering of this fragment.
    fn to_str(&self) -> &str {
        self.source()
    }

    /// XML rendering of this fragment.
    ///
    /// When `pretty_print` is set, the markup is re-indented with two spaces.
    /// Markup that cannot be re-indented is returned unchanged.
    fn to_xml(&self, pretty_print: bool) -> String {
        let source = self.source();

        if pretty_print {
            self::pretty_print(source).unwrap_or_else(|| source.to_owned())
        } else {
            source.to_owned()
        }
    }
}

/// Re-indents `xml` with two spaces per level.
///
/// Returns [`None`] if `xml` is not well-formed.
pub fn pretty_print(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event().ok()? {
            Event::Eof => break,
            event => writer.write_event(event).ok()?,
        }
    }
    String::from_utf8(writer.into_inner()).ok()
}

/// The text content of `xml`, with whitespace runs collapsed.
///
/// If `xml` contains a `body` element, only its text is returned.
/// Text read before a markup error is kept.
pub(crate) fn inner_text(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    let mut all_text = String::new();
    let mut body_text = None;
    let mut body_depth = None;
    let mut depth = 0usize;

    loop {
        let text = match reader.read_event() {
            Ok(Event::Start(el)) => {
                depth += 1;
                if body_text.is_none() && el.local_name().as_ref() == xhtml::BODY.as_bytes() {
                    body_depth = Some(depth);
                    body_text = Some(String::new());
                }
                continue;
            }
            Ok(Event::End(_)) => {
                if body_depth == Some(depth) {
                    body_depth = None;
                }
                depth = depth.saturating_sub(1);
                continue;
            }
            Ok(Event::Text(text)) => String::from_utf8_lossy(&text).into_owned(),
            Ok(Event::CData(cdata)) => String::from_utf8_lossy(&cdata).into_owned(),
            Ok(Event::GeneralRef(reference)) => match reference.resolve_char_ref() {
                Ok(Some(ch)) => ch.to_string(),
                _ => {
                    let name = String::from_utf8_lossy(&reference);
                    escape::resolve_predefined_entity(&name)
                        .unwrap_or_default()
                        .to_owned()
                }
            },
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => continue,
        };

        all_text.push_str(&text);
        if let (Some(body), Some(_)) = (&mut body_text, body_depth) {
            body.push_str(&text);
        }
    }

    let mut text = body_text.unwrap_or(all_text);
    text.collapse_whitespace();
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fragment(&'static str);

    impl XmlFragment for Fragment {
        fn source(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_pretty_print() {
        let pretty = pretty_print("<a><b>x</b><c/></a>").unwrap();
        let lines: Vec<_> = pretty.lines().collect();

        assert_eq!("<a>", lines[0]);
        assert!(lines.contains(&"  <b>x</b>"));
        assert!(lines.contains(&"  <c/>"));
        assert_eq!(Some(&"</a>"), lines.last());
    }

    #[test]
    fn test_inner_text() {
        #[rustfmt::skip]
        let expected = [
            ("Hello & world!", "<html><head><title>T</title></head><body>\n <p>Hello &amp; <b>world</b>&#33;</p>\n</body></html>"),
            ("T Body", "<ncx><docTitle><text>T</text></docTitle>\n<x>Body</x></ncx>"),
            ("", "<html><body/></html>"),
        ];

        for (expected, xml) in expected {
            assert_eq!(expected, inner_text(xml));
        }
    }

    #[test]
    fn test_to_xml_fallback() {
        let malformed = Fragment("<a><b></a>");

        assert_eq!("<a><b></a>", malformed.to_xml(true));
        assert_eq!("<a><b></a>", malformed.to_xml(false));
        assert_eq!("<a><b></a>", malformed.to_str());
    }
}
