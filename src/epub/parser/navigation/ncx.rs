use crate::epub::consts::{self, ncx};
use crate::epub::navigation::{NavList, NcxNavigation};
use crate::epub::parser::navigation::NavigationParser;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlEvent, XmlStartElement};

impl NavigationParser<'_> {
    pub(super) fn parse_ncx(mut self, mut ncx: NcxNavigation) -> ParserResult<NcxNavigation> {
        // The `navList` being read, if any
        let mut nav_list = None;

        while let Some(event) = self.reader.next() {
            match event? {
                XmlEvent::Start(el) | XmlEvent::Empty(el) => match el.local_name() {
                    ncx::NCX => {
                        ncx.version = el.get_attribute(ncx::VERSION).map(str::to_owned);
                        ncx.lang = Self::get_lang(&el);
                    }
                    ncx::META => Self::handle_ncx_meta(&mut ncx, &el),
                    ncx::DOC_TITLE if ncx.title.is_none() => {
                        ncx.title = Some(self.reader.get_element_text(&el)?);
                    }
                    ncx::DOC_AUTHOR if ncx.author.is_none() => {
                        ncx.author = Some(self.reader.get_element_text(&el)?);
                    }
                    ncx::NAV_LIST => {
                        nav_list = Some(NavList {
                            id: el.get_attribute(consts::ID).map(str::to_owned),
                            ..NavList::default()
                        });
                    }
                    // Nested Entry
                    ncx::NAV_POINT | ncx::PAGE_TARGET | ncx::NAV_TARGET => {
                        self.push_ncx_child(&el);
                    }
                    ncx::NAV_LABEL => self.handle_ncx_label(&el, nav_list.as_mut())?,
                    ncx::CONTENT => self.handle_ncx_src(&el),
                    _ => {}
                },
                XmlEvent::End(el) => match el.local_name() {
                    ncx::NAV_POINT | ncx::PAGE_TARGET | ncx::NAV_TARGET => self.handle_pop(),
                    // Root Entry
                    ncx::NAV_MAP => ncx.nav_map = self.take_roots(),
                    ncx::PAGE_LIST => ncx.page_list = self.take_roots(),
                    ncx::NAV_LIST => {
                        if let Some(mut list) = nav_list.take() {
                            list.targets = self.take_roots();
                            ncx.nav_lists.push(list);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(ncx)
    }

    fn handle_ncx_meta(ncx: &mut NcxNavigation, el: &XmlStartElement) {
        let (Some(name), Some(content)) = (
            el.get_attribute(ncx::NAME),
            el.get_attribute(ncx::CONTENT_ATTR),
        ) else {
            return;
        };
        let number = || content.trim().parse().ok();

        match name {
            ncx::UID => ncx.uid = Some(content.to_owned()),
            ncx::DEPTH => ncx.depth = number(),
            ncx::TOTAL_PAGE_COUNT => ncx.total_page_count = number(),
            ncx::MAX_PAGE_NUMBER => ncx.max_page_number = number(),
            _ => {}
        }
    }

    fn push_ncx_child(&mut self, el: &XmlStartElement) {
        let mut child = Self::new_entry(el);

        child.order = el
            .get_attribute(ncx::PLAY_ORDER)
            .and_then(|order| order.trim().parse().ok());
        // `navPoint` and `navTarget` declare a class,
        // whereas `pageTarget` declares a type ("front" | "normal" | "special")
        child.item_type = match el.local_name() {
            ncx::PAGE_TARGET => el.get_attribute(consts::TYPE),
            _ => el.get_attribute(ncx::CLASS),
        }
        .map(str::to_owned);
        child.value = el.get_attribute(ncx::VALUE).map(str::to_owned);

        self.push_entry(child);
        if el.is_empty() {
            self.handle_pop();
        }
    }

    fn handle_ncx_label(
        &mut self,
        el: &XmlStartElement,
        nav_list: Option<&mut NavList>,
    ) -> ParserResult<()> {
        // Extract text content
        let label = self.reader.get_element_text(el)?;

        // Only the first label is retained; others are alternate languages
        match (self.stack.last_mut(), nav_list) {
            (Some(entry), _) if entry.label.is_empty() => entry.label = label,
            (None, Some(list)) if list.label.is_empty() => list.label = label,
            _ => {}
        }
        Ok(())
    }

    fn handle_ncx_src(&mut self, el: &XmlStartElement) {
        // Only the first `content` of an entry is its target
        if let Some(entry) = self.stack.last_mut().filter(|entry| entry.target.is_empty()) {
            entry.target = el
                .get_attribute(consts::SRC)
                .unwrap_or_default()
                .to_owned();
        }
    }
}
