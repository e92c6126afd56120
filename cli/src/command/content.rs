use crate::command::inspect::{self, Format};
use clap::Args;
use epub_utils::{Document, EpubResult};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ContentCommand {
    /// An EPUB file
    pub path: PathBuf,

    /// The id of a spine item
    pub item_id: String,

    /// Output format; `text` prints the text of the document body
    #[arg(short, long, value_enum, default_value_t = Format::Xml)]
    pub format: Format,

    /// Re-indent XML output
    #[arg(long)]
    pub pretty: bool,
}

impl ContentCommand {
    pub(super) fn print(&self) -> EpubResult<()> {
        let doc = Document::open(&self.path)?;
        let content = doc.find_content_by_id(&self.item_id)?;

        match self.format {
            Format::Text => println!("{}", content.to_plain()),
            format => println!("{}", inspect::render(&content, format, self.pretty)),
        }
        Ok(())
    }
}
