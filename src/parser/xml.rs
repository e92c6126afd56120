//! Namespace-aware streaming reader over [`quick_xml::NsReader`].

use crate::errors::{EpubError, ErrorDetails};
use crate::parser::ParserResult;
use crate::util::StringExt;
use quick_xml::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

pub(crate) const XMLNS: &str = "http://www.w3.org/XML/1998/namespace";

pub(crate) struct XmlReader<'a> {
    reader: NsReader<&'a [u8]>,
    data: &'a str,
    /// Name of the document, reported in errors.
    document: &'a str,
    /// Local names of currently open elements.
    open: Vec<String>,
    has_root: bool,
    finished: bool,
}

impl<'a> XmlReader<'a> {
    pub(crate) fn new(document: &'a str, data: &'a str) -> Self {
        Self {
            reader: NsReader::from_str(data),
            data,
            document,
            open: Vec::new(),
            has_root: false,
            finished: false,
        }
    }

    pub(crate) fn document(&self) -> &'a str {
        self.document
    }

    /// The current nesting depth; `0` outside the root element.
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// Iterator-like method to read the next [`XmlEvent`].
    ///
    /// Comments, processing instructions, and declarations are skipped.
    pub(crate) fn next(&mut self) -> Option<ParserResult<XmlEvent>> {
        if self.finished {
            return None;
        }
        match self.read_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }

    /// Retrieve consolidated text for the given element up to its end tag.
    ///
    /// Whitespace runs are collapsed into a single space.
    pub(crate) fn get_element_text(&mut self, el: &XmlStartElement) -> ParserResult<String> {
        let mut value = self.read_element_text(el)?;
        value.collapse_whitespace();
        Ok(value)
    }

    /// Retrieve text for the given element up to its end tag,
    /// trimming only the surrounding whitespace.
    pub(crate) fn get_trimmed_text(&mut self, el: &XmlStartElement) -> ParserResult<String> {
        let mut value = self.read_element_text(el)?;
        value.trim_in_place();
        Ok(value)
    }

    /// Concatenates nested text as found, consuming the end tag of `el`.
    fn read_element_text(&mut self, el: &XmlStartElement) -> ParserResult<String> {
        let mut value = String::new();
        if el.is_empty() {
            return Ok(value);
        }
        let depth = self.depth();

        while let Some(event) = self.next() {
            match event? {
                XmlEvent::Text(text) => value.push_str(&text),
                XmlEvent::End(_) if self.depth() < depth => break,
                _ => {}
            }
        }
        Ok(value)
    }

    /// Consumes all events up to and including the end tag of `el`.
    pub(crate) fn skip_element(&mut self, el: &XmlStartElement) -> ParserResult<()> {
        if el.is_empty() {
            return Ok(());
        }
        let depth = self.depth();

        while let Some(event) = self.next() {
            if matches!(event?, XmlEvent::End(_)) && self.depth() < depth {
                break;
            }
        }
        Ok(())
    }

    /// The raw source text between two byte offsets.
    pub(crate) fn fragment(&self, start: usize, end: usize) -> &'a str {
        self.data.get(start..end).unwrap_or_default()
    }

    fn position(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    /// The offset of the `<` opening the markup read from `position`.
    ///
    /// Depending on the preceding event, `position` is either at the `<` or just past it.
    fn markup_start(&self, position: usize) -> usize {
        let bytes = self.data.as_bytes();
        let end = (position + 1).min(bytes.len());

        bytes[..end]
            .iter()
            .rposition(|&b| b == b'<')
            .unwrap_or(position)
    }

    fn read_event(&mut self) -> ParserResult<Option<XmlEvent>> {
        loop {
            let start = self.position();
            let (resolved, event) = match self.reader.read_resolved_event() {
                Ok(result) => result,
                Err(error) => return Err(self.error(error.to_string())),
            };
            let namespace = namespace_of(&resolved);

            return Ok(Some(match event {
                Event::Start(el) => {
                    let el = self.start_element(namespace, &el, start, false)?;
                    self.has_root = true;
                    self.open.push(el.local_name.clone());
                    XmlEvent::Start(el)
                }
                Event::Empty(el) => {
                    let el = self.start_element(namespace, &el, start, true)?;
                    self.has_root = true;
                    XmlEvent::Empty(el)
                }
                Event::End(el) => {
                    self.open.pop();
                    XmlEvent::End(XmlEndElement {
                        local_name: String::from_utf8_lossy(el.local_name().as_ref())
                            .into_owned(),
                        end: self.position(),
                    })
                }
                Event::Text(text) => XmlEvent::Text(String::from_utf8_lossy(&text).into_owned()),
                Event::CData(cdata) => XmlEvent::Text(
                    cdata
                        .decode()
                        .map(|text| text.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&cdata).into_owned()),
                ),
                Event::GeneralRef(reference) => {
                    let resolved = match reference.resolve_char_ref() {
                        Ok(Some(ch)) => ch.to_string(),
                        Ok(None) => {
                            let name = String::from_utf8_lossy(&reference).into_owned();
                            escape::resolve_predefined_entity(&name)
                                .map_or_else(|| format!("&{name};"), str::to_owned)
                        }
                        Err(error) => return Err(self.error(error.to_string())),
                    };
                    XmlEvent::Text(resolved)
                }
                Event::Eof => {
                    return match self.open.last() {
                        Some(unclosed) => Err(self.error(format!(
                            "unexpected end of document; unclosed element <{unclosed}>"
                        ))),
                        None if !self.has_root => {
                            Err(self.error("document contains no root element".to_owned()))
                        }
                        None => Ok(None),
                    };
                }
                // Comments, declarations, doctype, processing instructions
                _ => continue,
            }));
        }
    }

    fn start_element(
        &self,
        namespace: Option<String>,
        el: &BytesStart,
        start: usize,
        empty: bool,
    ) -> ParserResult<XmlStartElement> {
        let mut attributes = Vec::new();

        for attribute in el.attributes() {
            let attribute = attribute.map_err(|error| self.error(error.to_string()))?;
            let key = attribute.key;

            // Namespace declarations are not attributes of interest
            if key.as_namespace_binding().is_some() {
                continue;
            }
            let (resolved, local_name) = self.reader.resolve_attribute(key);
            let value = attribute
                .unescape_value()
                .map(|value| value.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attribute.value).into_owned());

            attributes.push(XmlAttribute {
                namespace: namespace_of(&resolved),
                local_name: String::from_utf8_lossy(local_name.as_ref()).into_owned(),
                value,
            });
        }

        Ok(XmlStartElement {
            namespace,
            local_name: String::from_utf8_lossy(el.local_name().as_ref()).into_owned(),
            attributes,
            start: self.markup_start(start),
            end: self.position(),
            empty,
        })
    }

    fn error(&self, message: String) -> EpubError {
        EpubError::Parse {
            document: self.document.to_owned(),
            message,
            position: self.reader.buffer_position(),
            details: ErrorDetails::new().file(self.document),
        }
    }
}

fn namespace_of(resolved: &ResolveResult) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        _ => None,
    }
}

pub(crate) enum XmlEvent {
    Start(XmlStartElement),
    Empty(XmlStartElement),
    End(XmlEndElement),
    Text(String),
}

#[derive(Debug)]
pub(crate) struct XmlAttribute {
    namespace: Option<String>,
    local_name: String,
    value: String,
}

#[derive(Debug)]
pub(crate) struct XmlStartElement {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<XmlAttribute>,
    /// Byte offset of the opening `<`.
    start: usize,
    /// Byte offset following the closing `>` of the start tag.
    end: usize,
    empty: bool,
}

impl XmlStartElement {
    pub(crate) fn local_name(&self) -> &str {
        &self.local_name
    }

    pub(crate) fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub(crate) fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace() == Some(namespace)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.empty
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    /// For empty elements, this is the end of the entire element.
    pub(crate) fn end(&self) -> usize {
        self.end
    }

    /// Retrieves an attribute without a namespace, such as `id`.
    pub(crate) fn get_attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.namespace.is_none() && attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    /// Retrieves a namespaced attribute, such as `epub:type`.
    pub(crate) fn get_attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.namespace.as_deref() == Some(namespace) && attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    /// Retrieves an attribute by local name regardless of its namespace.
    pub(crate) fn get_attribute_any(&self, local_name: &str) -> Option<&str> {
        self.get_attribute(local_name).or_else(|| {
            self.attributes
                .iter()
                .find(|attr| attr.local_name == local_name)
                .map(|attr| attr.value.as_str())
        })
    }
}

#[derive(Debug)]
pub(crate) struct XmlEndElement {
    local_name: String,
    /// Byte offset following the closing `>`.
    end: usize,
}

impl XmlEndElement {
    pub(crate) fn local_name(&self) -> &str {
        &self.local_name
    }

    pub(crate) fn end(&self) -> usize {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    const NS: &str = "urn:test";

    fn collect(data: &str) -> ParserResult<Vec<XmlEvent>> {
        let mut reader = XmlReader::new("test.xml", data);
        let mut events = Vec::new();
        while let Some(event) = reader.next() {
            events.push(event?);
        }
        Ok(events)
    }

    #[test]
    fn test_namespaces_resolved() {
        let data = r#"<r xmlns="urn:test" xmlns:x="urn:x"><x:a x:k="1" k="2"/></r>"#;
        let mut reader = XmlReader::new("test.xml", data);

        let Some(Ok(XmlEvent::Start(root))) = reader.next() else {
            panic!("expected root");
        };
        assert!(root.is(NS, "r"));

        let Some(Ok(XmlEvent::Empty(el))) = reader.next() else {
            panic!("expected child");
        };
        assert_eq!(Some("urn:x"), el.namespace());
        assert_eq!("a", el.local_name());
        assert_eq!(Some("2"), el.get_attribute("k"));
        assert_eq!(Some("1"), el.get_attribute_ns("urn:x", "k"));
    }

    #[test]
    fn test_element_text() {
        let data = "<r><t>\n  Chapter &amp; <b>One</b>&#33;\n</t><n/></r>";
        let mut reader = XmlReader::new("test.xml", data);
        reader.next();

        let Some(Ok(XmlEvent::Start(el))) = reader.next() else {
            panic!("expected <t>");
        };
        assert_eq!("Chapter & One!", reader.get_element_text(&el).unwrap());

        // Reading continues after the consumed end tag
        let Some(Ok(XmlEvent::Empty(el))) = reader.next() else {
            panic!("expected <n/>");
        };
        assert_eq!("n", el.local_name());
    }

    #[test]
    fn test_trimmed_text() {
        let data = "<r><t>\n  Line one\n\nLine   <b>two</b> &amp; more  </t></r>";
        let mut reader = XmlReader::new("test.xml", data);
        reader.next();

        let Some(Ok(XmlEvent::Start(el))) = reader.next() else {
            panic!("expected <t>");
        };
        assert_eq!("Line one\n\nLine   two & more", reader.get_trimmed_text(&el).unwrap());
    }

    #[test]
    fn test_fragment() {
        let data = "<r><a id=\"1\">x</a></r>";
        let mut reader = XmlReader::new("test.xml", data);
        reader.next();

        let Some(Ok(XmlEvent::Start(el))) = reader.next() else {
            panic!("expected <a>");
        };
        let start = el.start();
        reader.skip_element(&el).unwrap();
        let Some(Ok(XmlEvent::End(end))) = reader.next() else {
            panic!("expected </r>");
        };

        assert_eq!("r", end.local_name());
        assert_eq!("<a id=\"1\">x</a></r>", reader.fragment(start, end.end()));
    }

    #[test]
    fn test_malformed() {
        #[rustfmt::skip]
        let malformed = [
            "<r><a></b></r>",
            "<r><a>",
            "",
            "just text",
        ];

        for data in malformed {
            let error = collect(data).err().unwrap();
            assert_eq!(ErrorKind::Parse, error.kind(), "{data}");
            assert!(error.to_string().starts_with("Error parsing test.xml"));
        }
    }
}
