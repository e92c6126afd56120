use clap::{Args, ValueEnum};
use epub_utils::{Document, EpubResult, XmlFragment};
use std::path::PathBuf;

/// Output format of a structural document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The source text as found in the archive
    Text,
    /// XML, optionally re-indented with `--pretty`
    Xml,
    /// `key: value` lines (metadata only)
    Kv,
}

#[derive(Debug, Args)]
pub struct InspectCommand {
    /// An EPUB file
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Xml)]
    pub format: Format,

    /// Re-indent XML output
    #[arg(long)]
    pub pretty: bool,
}

/// The structural document to print.
#[derive(Copy, Clone, Debug)]
pub(super) enum Part {
    Container,
    Package,
    Toc,
    Metadata,
    Manifest,
    Spine,
}

impl InspectCommand {
    pub(super) fn print(&self, part: Part) -> EpubResult<()> {
        let doc = Document::open(&self.path)?;

        let fragment: &dyn XmlFragment = match part {
            Part::Container => doc.container()?,
            Part::Package => doc.package()?,
            Part::Metadata => {
                let metadata = doc.package()?.metadata();
                if self.format == Format::Kv {
                    println!("{}", metadata.to_kv());
                    return Ok(());
                }
                metadata
            }
            Part::Manifest => doc.package()?.manifest(),
            Part::Spine => doc.package()?.spine(),
            Part::Toc => match doc.toc()? {
                Some(toc) => toc,
                None => {
                    eprintln!("No table of contents found");
                    return Ok(());
                }
            },
        };

        println!("{}", render(fragment, self.format, self.pretty));
        Ok(())
    }
}

pub(super) fn render(fragment: &dyn XmlFragment, format: Format, pretty: bool) -> String {
    match format {
        Format::Xml => fragment.to_xml(pretty),
        Format::Text => fragment.to_str().to_owned(),
        Format::Kv => {
            eprintln!("Key-value format not supported for this document part. Falling back to text:\n");
            fragment.to_str().to_owned()
        }
    }
}
