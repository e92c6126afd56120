use clap::Subcommand;
use epub_utils::EpubResult;

mod content;
mod files;
mod inspect;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print `META-INF/container.xml`.
    Container(inspect::InspectCommand),
    /// Print the package document.
    Package(inspect::InspectCommand),
    /// Print the table of contents (navigation document or NCX).
    Toc(inspect::InspectCommand),
    /// Print the package metadata.
    Metadata(inspect::InspectCommand),
    /// Print the package manifest.
    Manifest(inspect::InspectCommand),
    /// Print the package spine.
    Spine(inspect::InspectCommand),
    /// Print a content document by its spine item id.
    Content(content::ContentCommand),
    /// List the files of the archive.
    Files(files::FilesCommand),
}

impl Commands {
    pub fn run(&self) -> EpubResult<()> {
        use inspect::Part;

        match self {
            Self::Container(inspect) => inspect.print(Part::Container),
            Self::Package(inspect) => inspect.print(Part::Package),
            Self::Toc(inspect) => inspect.print(Part::Toc),
            Self::Metadata(inspect) => inspect.print(Part::Metadata),
            Self::Manifest(inspect) => inspect.print(Part::Manifest),
            Self::Spine(inspect) => inspect.print(Part::Spine),
            Self::Content(content) => content.print(),
            Self::Files(files) => files.print(),
        }
    }
}
