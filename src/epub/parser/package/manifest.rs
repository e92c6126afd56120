use crate::epub::consts::{self, opf};
use crate::epub::manifest::{Manifest, ManifestItem};
use crate::epub::parser::EpubParser;
use crate::epub::parser::package::for_each_child;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlReader, XmlStartElement};

impl EpubParser<'_> {
    pub(super) fn parse_manifest(
        &self,
        reader: &mut XmlReader,
        manifest: &XmlStartElement,
    ) -> ParserResult<Manifest> {
        let document = reader.document();
        let mut items = Vec::new();

        let source = for_each_child(reader, manifest, |_, el| {
            if !el.is(opf::NAMESPACE, opf::ITEM) {
                return Ok(());
            }

            // Required fields
            let id =
                self.require_attribute(el.get_attribute(consts::ID), "manifest > item[*id]", document)?;
            let href = self.require_attribute(
                el.get_attribute(consts::HREF),
                "manifest > item[*href]",
                document,
            )?;
            let media_type = self.require_attribute(
                el.get_attribute(consts::MEDIA_TYPE),
                "manifest > item[*media-type]",
                document,
            )?;
            let (Some(id), Some(href), Some(media_type)) = (id, href, media_type) else {
                return Ok(());
            };

            // Optional fields
            let optional = |name: &str| el.get_attribute(name).map(str::to_owned);

            items.push(ManifestItem {
                properties: el.get_attribute(opf::PROPERTIES).into(),
                fallback: optional(opf::FALLBACK),
                media_overlay: optional(opf::MEDIA_OVERLAY),
                id,
                href,
                media_type,
            });
            Ok(())
        })?;

        Ok(Manifest {
            items,
            source: source.to_owned(),
        })
    }
}
