use crate::epub::consts::{dc, opf};
use crate::epub::metadata::Metadata;
use crate::epub::parser::EpubParser;
use crate::epub::parser::package::for_each_child;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlReader, XmlStartElement};

impl EpubParser<'_> {
    pub(super) fn parse_metadata(
        &self,
        reader: &mut XmlReader,
        metadata: &XmlStartElement,
    ) -> ParserResult<Metadata> {
        let mut fields = Vec::new();

        let source = for_each_child(reader, metadata, |reader, el| {
            let Some(name) = Self::metadata_field_name(&el) else {
                return Ok(());
            };
            // Values are trimmed as-is; blank values are dropped
            let value = reader.get_trimmed_text(&el)?;
            if !value.is_empty() {
                fields.push((name, value));
            }
            Ok(())
        })?;

        let mut metadata = Metadata::new(source.to_owned());
        for (name, value) in fields {
            metadata.push(&name, value);
        }
        Ok(metadata)
    }

    /// The field an element contributes to, if any:
    /// - `dc:*` and `dcterms:*` elements: the local name.
    /// - `meta[property="dcterms:*"]`: the property without its prefix.
    fn metadata_field_name(el: &XmlStartElement) -> Option<String> {
        match el.namespace() {
            Some(dc::NAMESPACE | dc::TERMS_NAMESPACE) => Some(el.local_name().to_owned()),
            Some(opf::NAMESPACE) | None if el.local_name() == opf::META => el
                .get_attribute(opf::PROPERTY)
                .and_then(|property| property.strip_prefix(dc::TERMS_PREFIX))
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
            _ => None,
        }
    }
}
