use crate::epub::consts::{self, ocf};
use crate::epub::container::Container;
use crate::epub::parser::EpubParser;
use crate::errors::EpubError;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlEvent, XmlReader};

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location.
    pub(in crate::epub) fn parse_container(&self, data: &str) -> ParserResult<Container> {
        let mut reader = XmlReader::new(consts::CONTAINER, data);
        let mut rootfile = None;

        // The entire document is read to surface malformed markup
        while let Some(event) = reader.next() {
            let el = match event? {
                XmlEvent::Start(el) | XmlEvent::Empty(el) if el.is(ocf::NAMESPACE, ocf::ROOT_FILE) => el,
                _ => continue,
            };
            // Although rare, multiple package.opf locations could exist.
            // Only accept the first path as it is the default
            if rootfile.is_none() {
                rootfile = Some((
                    el.get_attribute(ocf::FULL_PATH).map(str::to_owned),
                    el.get_attribute(consts::MEDIA_TYPE).map(str::to_owned),
                ));
            }
        }

        let invalid = |message: &str| {
            EpubError::invalid_source(format!("Invalid container.xml: {message}"))
                .in_file(consts::CONTAINER)
        };
        let (full_path, media_type) =
            Self::mandatory(rootfile, || invalid("missing rootfile element"))?;
        let rootfile_path = Self::mandatory(full_path, || {
            invalid("rootfile element missing 'full-path' attribute")
        })?;

        if rootfile_path.trim().is_empty() {
            return Err(invalid("'full-path' attribute is empty"));
        }

        Ok(Container {
            rootfile_path,
            media_type,
            source: data.to_owned(),
        })
    }
}
