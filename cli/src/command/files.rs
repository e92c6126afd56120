use clap::Args;
use epub_utils::{Document, EpubResult};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FilesCommand {
    /// An EPUB file
    pub path: PathBuf,

    /// Only print entry paths
    #[arg(short, long)]
    pub quiet: bool,
}

impl FilesCommand {
    pub(super) fn print(&self) -> EpubResult<()> {
        let doc = Document::open(&self.path)?;
        let entries = doc.list_files()?;

        if self.quiet {
            for entry in &entries {
                println!("{}", entry.path);
            }
            return Ok(());
        }

        let width = entries
            .iter()
            .map(|entry| entry.path.chars().count())
            .max()
            .unwrap_or_default();

        for entry in &entries {
            let modified = entry
                .modified
                .map_or_else(|| "-".repeat(19), |modified| modified.to_string());
            let mode = entry
                .unix_mode
                .map_or_else(|| "-".to_owned(), |mode| format!("{:o}", mode & 0o777));

            println!(
                "{:<width$}  {:>10}  {:>10}  {modified}  {mode}",
                entry.path, entry.size, entry.compressed_size,
            );
        }
        Ok(())
    }
}
