mod ncx;
mod xhtml;

use crate::epub::consts;
use crate::epub::navigation::{NavDocNavigation, Navigation, NavigationItem, NcxNavigation};
use crate::epub::parser::EpubParser;
use crate::parser::ParserResult;
use crate::parser::xml::{XMLNS, XmlReader, XmlStartElement};
use log::debug;

/// Location and declared media type of a navigation file.
pub(in crate::epub) struct NavigationFile<'a> {
    /// Archive path, reported in errors.
    pub(in crate::epub) href: &'a str,
    pub(in crate::epub) media_type: &'a str,
}

struct NavigationParser<'a> {
    reader: XmlReader<'a>,
    /// Stack to keep track of the latest (innermost) open entry
    stack: Vec<NavigationItem>,
    /// Completed top-level entries of the collection being read
    roots: Vec<NavigationItem>,
}

impl<'a> NavigationParser<'a> {
    fn new(href: &'a str, data: &'a str) -> Self {
        Self {
            reader: XmlReader::new(href, data),
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn new_entry(el: &XmlStartElement) -> NavigationItem {
        NavigationItem {
            id: el.get_attribute(consts::ID).map(str::to_owned),
            ..NavigationItem::default()
        }
    }

    fn push_entry(&mut self, mut entry: NavigationItem) {
        // Levels start at 1 for top-level entries
        entry.level = self.stack.len() + 1;
        self.stack.push(entry);
    }

    fn handle_pop(&mut self) {
        let Some(entry) = self.stack.pop() else {
            return;
        };

        match self.stack.last_mut() {
            // The entry has a parent
            Some(parent) => parent.children.push(entry),
            // The entry does not have a parent; top-level
            None => self.roots.push(entry),
        }
    }

    /// Takes the completed top-level entries of the current collection.
    fn take_roots(&mut self) -> Vec<NavigationItem> {
        // Entries left open by a collection are discarded
        while !self.stack.is_empty() {
            self.handle_pop();
        }
        std::mem::take(&mut self.roots)
    }

    fn get_lang(el: &XmlStartElement) -> Option<String> {
        el.get_attribute_ns(XMLNS, consts::LANG)
            .or_else(|| el.get_attribute_any(consts::LANG))
            .map(str::to_owned)
    }
}

impl EpubParser<'_> {
    /// Parses a legacy `.ncx` file.
    pub(in crate::epub) fn parse_ncx(
        &self,
        file: NavigationFile,
        data: &str,
    ) -> ParserResult<Navigation> {
        let parser = NavigationParser::new(file.href, data);
        let ncx = parser.parse_ncx(NcxNavigation {
            href: file.href.to_owned(),
            media_type: file.media_type.to_owned(),
            source: data.to_owned(),
            ..NcxNavigation::default()
        })?;

        debug!(
            "Resolved NCX {}: {} top-level entries, {} page targets",
            file.href,
            ncx.nav_map.len(),
            ncx.page_list.len(),
        );
        Ok(Navigation::Ncx(ncx))
    }

    /// Parses an EPUB 3 navigation document.
    pub(in crate::epub) fn parse_nav(
        &self,
        file: NavigationFile,
        data: &str,
    ) -> ParserResult<Navigation> {
        let parser = NavigationParser::new(file.href, data);
        let nav = parser.parse_nav_doc(NavDocNavigation {
            href: file.href.to_owned(),
            media_type: file.media_type.to_owned(),
            source: data.to_owned(),
            ..NavDocNavigation::default()
        })?;

        debug!(
            "Resolved navigation document {}: {} top-level entries, {} landmarks",
            file.href,
            nav.toc.len(),
            nav.landmarks.len(),
        );
        Ok(Navigation::Nav(nav))
    }
}
