//! # epub-utils
//!
//! Read-only access to the structure of EPUB archives:
//! the container, the package (metadata, manifest, spine), and navigation.
//!
//! Every structural document is resolved lazily on first access
//! and cached for the lifetime of its [`Document`].
//!
//! ## Examples
//! Opening an epub and reading its structure:
//! ```no_run
//! use epub_utils::Document;
//!
//! let doc = Document::open("book.epub")?;
//! let package = doc.package()?;
//!
//! // Retrieving the title and every creator
//! println!("Title = {:?}", package.metadata().title());
//! println!("Creators = {:?}", package.metadata().get("creator"));
//!
//! // Printing the table of contents
//! if let Some(toc) = doc.toc()? {
//!     for node in toc.hierarchy() {
//!         println!("{node}");
//!     }
//! }
//! # Ok::<(), epub_utils::EpubError>(())
//! ```
//! Rendering structural documents:
//! ```no_run
//! use epub_utils::{Document, XmlFragment};
//!
//! let doc = Document::open("book.epub")?;
//!
//! // Pretty-printed `META-INF/container.xml`
//! println!("{}", doc.container()?.to_xml(true));
//! // `key: value` metadata
//! println!("{}", doc.package()?.metadata().to_kv());
//! # Ok::<(), epub_utils::EpubError>(())
//! ```

mod archive;
mod parser;
mod util;

pub mod epub;
pub mod errors;
pub mod render;

pub use self::{
    archive::{ArchiveEntry, ModifiedTime},
    epub::{Document, DocumentOptions},
    errors::{EpubError, EpubResult},
    render::XmlFragment,
};
