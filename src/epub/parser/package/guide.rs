use crate::epub::consts::{self, opf};
use crate::epub::package::{Guide, GuideReference};
use crate::epub::parser::EpubParser;
use crate::epub::parser::package::for_each_child;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlReader, XmlStartElement};

impl EpubParser<'_> {
    /// Parses the legacy `guide`.
    ///
    /// References without a `type` or `href` are ignored regardless of `strict` mode.
    pub(super) fn parse_guide(
        &self,
        reader: &mut XmlReader,
        guide: &XmlStartElement,
    ) -> ParserResult<Guide> {
        let mut references = Vec::new();

        for_each_child(reader, guide, |_, el| {
            if !el.is(opf::NAMESPACE, opf::REFERENCE) {
                return Ok(());
            }
            if let (Some(kind), Some(href)) =
                (el.get_attribute(consts::TYPE), el.get_attribute(consts::HREF))
            {
                references.push(GuideReference {
                    kind: kind.to_owned(),
                    title: el.get_attribute(consts::TITLE).map(str::to_owned),
                    href: href.to_owned(),
                });
            }
            Ok(())
        })?;

        Ok(Guide { references })
    }
}
