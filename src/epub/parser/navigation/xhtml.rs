use crate::epub::consts::{self, xhtml};
use crate::epub::navigation::NavDocNavigation;
use crate::epub::parser::navigation::NavigationParser;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlEvent, XmlStartElement};

/// The `epub:type` of a `nav` element.
#[derive(Copy, Clone, PartialEq, Eq)]
enum NavKind {
    Toc,
    PageList,
    Landmarks,
}

impl NavigationParser<'_> {
    pub(super) fn parse_nav_doc(
        mut self,
        mut nav: NavDocNavigation,
    ) -> ParserResult<NavDocNavigation> {
        // The `nav` element being read, if any
        let mut current = None;
        // Document order of links across all `nav` elements
        let mut order = 0;

        while let Some(event) = self.reader.next() {
            match event? {
                XmlEvent::Start(el) | XmlEvent::Empty(el) => match el.local_name() {
                    xhtml::HTML => nav.lang = Self::get_lang(&el),
                    // Root Entry
                    xhtml::NAV => match Self::get_nav_kind(&el) {
                        Some(kind) if !el.is_empty() => current = Some(kind),
                        // Unclassified or unsupported (e.g., `lot`, `loi`)
                        _ => self.reader.skip_element(&el)?,
                    },
                    heading
                        if current == Some(NavKind::Toc)
                            && self.stack.is_empty()
                            && nav.title.is_none()
                            && xhtml::HEADINGS.contains(&heading) =>
                    {
                        nav.title = Some(self.reader.get_element_text(&el)?);
                    }
                    // Nested Entry
                    xhtml::LIST_ITEM if current.is_some() => self.push_nav_child(&el),
                    xhtml::ANCHOR if current.is_some() => self.handle_nav_anchor(&el, &mut order)?,
                    xhtml::SPAN if current.is_some() => self.handle_nav_span(&el)?,
                    _ => {}
                },
                XmlEvent::End(el) => match el.local_name() {
                    xhtml::LIST_ITEM if current.is_some() => self.handle_pop(),
                    xhtml::NAV => {
                        let Some(kind) = current.take() else {
                            continue;
                        };
                        let roots = self.take_roots();
                        let collection = match kind {
                            NavKind::Toc => &mut nav.toc,
                            NavKind::PageList => &mut nav.page_list,
                            NavKind::Landmarks => &mut nav.landmarks,
                        };
                        // The first `nav` of each kind is retained
                        if collection.is_empty() {
                            *collection = roots;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(nav)
    }

    fn get_nav_kind(el: &XmlStartElement) -> Option<NavKind> {
        // Although rare, `epub:type` allows several properties separated by whitespace.
        el.get_attribute_ns(xhtml::OPS_NAMESPACE, consts::TYPE)?
            .split_whitespace()
            .find_map(|epub_type| match epub_type {
                xhtml::TOC => Some(NavKind::Toc),
                xhtml::PAGE_LIST => Some(NavKind::PageList),
                xhtml::LANDMARKS => Some(NavKind::Landmarks),
                _ => None,
            })
    }

    fn push_nav_child(&mut self, el: &XmlStartElement) {
        // For EPUB 3, <li> elements may act as a grouping header
        // if there's no direct <a> element containing an href & label.
        self.push_entry(Self::new_entry(el));

        if el.is_empty() {
            self.handle_pop();
        }
    }

    fn handle_nav_anchor(&mut self, el: &XmlStartElement, order: &mut u32) -> ParserResult<()> {
        let label = self.reader.get_element_text(el)?;

        // Only the first link of an entry is retained
        let Some(entry) = self.stack.last_mut().filter(|entry| entry.order.is_none()) else {
            return Ok(());
        };
        *order += 1;

        entry.order = Some(*order);
        entry.label = label;
        entry.target = el
            .get_attribute(consts::HREF)
            .unwrap_or_default()
            .to_owned();
        entry.item_type = el
            .get_attribute_ns(xhtml::OPS_NAMESPACE, consts::TYPE)
            .map(str::to_owned);
        if entry.id.is_none() {
            entry.id = el.get_attribute(consts::ID).map(str::to_owned);
        }
        Ok(())
    }

    fn handle_nav_span(&mut self, el: &XmlStartElement) -> ParserResult<()> {
        let label = self.reader.get_element_text(el)?;

        // A heading of a grouping entry, never overriding a link label
        if let Some(entry) = self
            .stack
            .last_mut()
            .filter(|entry| entry.order.is_none() && entry.label.is_empty())
        {
            entry.label = label;
        }
        Ok(())
    }
}
