use crate::epub::consts::{self, opf};
use crate::epub::parser::EpubParser;
use crate::epub::parser::package::for_each_child;
use crate::epub::spine::{DEFAULT_PAGE_PROGRESSION_DIRECTION, Spine, SpineItemRef};
use crate::parser::ParserResult;
use crate::parser::xml::{XmlReader, XmlStartElement};

impl EpubParser<'_> {
    pub(super) fn parse_spine(
        &self,
        reader: &mut XmlReader,
        spine: &XmlStartElement,
    ) -> ParserResult<Spine> {
        let document = reader.document();
        let mut items = Vec::new();
        let toc = spine.get_attribute(opf::TOC).map(str::to_owned);
        let page_progression_direction = spine
            .get_attribute(opf::PAGE_PROGRESSION_DIRECTION)
            .unwrap_or(DEFAULT_PAGE_PROGRESSION_DIRECTION)
            .to_owned();

        let source = for_each_child(reader, spine, |_, el| {
            if !el.is(opf::NAMESPACE, opf::ITEMREF) {
                return Ok(());
            }

            // Required fields
            let Some(idref) = self.require_attribute(
                el.get_attribute(opf::IDREF),
                "spine > itemref[*idref]",
                document,
            )?
            else {
                return Ok(());
            };

            // Optional fields
            let linear = el
                .get_attribute(opf::LINEAR)
                .is_none_or(|linear| linear.trim() != "no");

            items.push(SpineItemRef {
                id: el.get_attribute(consts::ID).map(str::to_owned),
                idref,
                linear,
                properties: el.get_attribute(opf::PROPERTIES).into(),
            });
            Ok(())
        })?;

        Ok(Spine {
            items,
            toc,
            page_progression_direction,
            source: source.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::epub::DocumentOptions;
    use crate::epub::parser::EpubParser;
    use crate::parser::xml::{XmlEvent, XmlReader};

    #[test]
    fn test_spine() {
        let data = r#"<spine xmlns="http://www.idpf.org/2007/opf" toc="ncx" page-progression-direction="rtl">
  <itemref idref="cover" linear="no" properties="page-spread-right"/>
  <itemref id="s2" idref="c1"/>
  <itemref idref="c2" linear="yes"/>
</spine>"#;
        let options = DocumentOptions::default();
        let mut reader = XmlReader::new("content.opf", data);
        let Some(Ok(XmlEvent::Start(el))) = reader.next() else {
            panic!("expected <spine>");
        };
        let spine = EpubParser::new(&options)
            .parse_spine(&mut reader, &el)
            .unwrap();

        assert_eq!(Some("ncx"), spine.toc());
        assert_eq!("rtl", spine.page_progression_direction());
        assert_eq!(vec!["cover", "c1", "c2"], spine.idrefs().collect::<Vec<_>>());
        assert_eq!(
            vec![false, true, true],
            spine.iter().map(|item| item.is_linear()).collect::<Vec<_>>()
        );
        assert_eq!(Some("s2"), spine.find_by_idref("c1").unwrap().id());
        assert!(spine.iter().next().unwrap().properties().has_property("page-spread-right"));
    }
}
