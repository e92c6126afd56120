//! Scoped access to the zip container of an EPUB.

use crate::errors::{self, EpubError, EpubResult, ErrorDetails};
use crate::util::uri;
use log::{debug, trace};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive as Zip;

/// Maximum amount of entries suggested when an entry is not found.
const SUGGESTED_ENTRIES: usize = 10;

type ZipFileArchive = Zip<BufReader<File>>;

/// A zip archive on disk.
///
/// No handle is kept open between calls;
/// every read opens the archive, reads one entry, and closes it.
#[derive(Clone, Debug)]
pub(crate) struct EpubArchive {
    path: PathBuf,
}

impl EpubArchive {
    /// Verifies `path` exists and is a readable zip archive.
    pub(crate) fn open(path: &Path) -> EpubResult<Self> {
        if !path.is_file() {
            return Err(EpubError::invalid_source(format!(
                "File not found: {}",
                path.display()
            ))
            .with_details(
                ErrorDetails::new()
                    .file(path.display().to_string())
                    .suggestion("Check that the path points to an existing .epub file"),
            ));
        }

        let archive = Self {
            path: path.to_path_buf(),
        };
        // Fail fast on non-zip input
        let entries = archive.with_archive(|zip| Ok(zip.len()))?;
        debug!("opened `{}` with {entries} entries", path.display());

        Ok(archive)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the entry `name` as bytes.
    ///
    /// When `name` does not match an entry exactly,
    /// entries are compared after percent-decoding and path normalization.
    pub(crate) fn read_bytes(&self, name: &str) -> EpubResult<Vec<u8>> {
        trace!("reading entry `{name}`");

        self.with_archive(|zip| {
            let index = Self::find_entry(zip, name)?;
            let mut file = zip
                .by_index(index)
                .map_err(|error| self.unreadable_entry(name, error))?;
            let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());

            file.read_to_end(&mut buf)
                .map_err(|error| self.unreadable_entry(name, error))?;
            Ok(buf)
        })
    }

    /// Reads the entry `name` as UTF-8 text, stripping a leading byte order mark.
    pub(crate) fn read_str(&self, name: &str) -> EpubResult<String> {
        let bytes = self.read_bytes(name)?;

        let mut text = String::from_utf8(bytes).map_err(|error| {
            EpubError::invalid_source(format!(
                "Unable to decode '{name}' as UTF-8 text: {error}"
            ))
            .with_details(ErrorDetails::new().file(name))
        })?;
        if text.starts_with('\u{feff}') {
            text.drain(..'\u{feff}'.len_utf8());
        }
        Ok(text)
    }

    /// Every non-directory entry, sorted by path.
    pub(crate) fn entries(&self) -> EpubResult<Vec<ArchiveEntry>> {
        let mut entries = self.with_archive(|zip| {
            let mut entries = Vec::with_capacity(zip.len());

            for i in 0..zip.len() {
                let file = zip
                    .by_index_raw(i)
                    .map_err(|error| self.unreadable_entry(&format!("#{i}"), error))?;
                if file.is_dir() {
                    continue;
                }
                entries.push(ArchiveEntry {
                    path: file.name().to_owned(),
                    size: file.size(),
                    compressed_size: file.compressed_size(),
                    modified: file.last_modified().map(ModifiedTime::from),
                    unix_mode: file.unix_mode(),
                });
            }
            Ok(entries)
        })?;

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn with_archive<T>(&self, f: impl FnOnce(&mut ZipFileArchive) -> EpubResult<T>) -> EpubResult<T> {
        let file = File::open(&self.path).map_err(|error| {
            EpubError::invalid_source(format!(
                "Unable to open '{}': {error}",
                self.path.display()
            ))
            .with_details(ErrorDetails::new().file(self.path.display().to_string()))
        })?;
        let mut zip = Zip::new(BufReader::new(file)).map_err(|error| {
            EpubError::invalid_source(format!(
                "Invalid EPUB file: '{}' is not a valid zip archive ({error})",
                self.path.display()
            ))
            .with_details(ErrorDetails::new().file(self.path.display().to_string()))
        })?;

        // The archive is dropped (and closed) when this scope ends
        f(&mut zip)
    }

    fn find_entry(zip: &ZipFileArchive, name: &str) -> EpubResult<usize> {
        if let Some(index) = zip.index_for_name(name) {
            return Ok(index);
        }

        let wanted = normalize_entry_name(name);
        let fallback = zip
            .file_names()
            .find(|candidate| normalize_entry_name(candidate) == wanted)
            .and_then(|candidate| zip.index_for_name(candidate));

        fallback.ok_or_else(|| {
            let available = zip
                .file_names()
                .filter(|candidate| !candidate.ends_with('/'));

            EpubError::not_found(format!("File '{name}' in EPUB archive")).with_details(
                ErrorDetails::new().file(name).suggestion(format!(
                    "Available files: {}",
                    errors::sample(available, SUGGESTED_ENTRIES)
                )),
            )
        })
    }

    fn unreadable_entry(&self, name: &str, error: impl Display) -> EpubError {
        EpubError::invalid_source(format!("Unable to read '{name}' from the archive: {error}"))
            .with_details(ErrorDetails::new().file(self.path.display().to_string()))
    }
}

fn normalize_entry_name(name: &str) -> String {
    uri::normalize(&uri::decode(name.trim_start_matches('/')))
}

/// One file within the archive, as reported by
/// [`Document::list_files`](crate::Document::list_files).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// The entry name, relative to the archive root.
    pub path: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// The last modification time, if recorded.
    pub modified: Option<ModifiedTime>,
    /// Unix permission bits, if recorded.
    pub unix_mode: Option<u32>,
}

/// A zip timestamp, displayed as `YYYY-MM-DD HH:MM:SS`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModifiedTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl From<zip::DateTime> for ModifiedTime {
    fn from(time: zip::DateTime) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        }
    }
}

impl Display for ModifiedTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
