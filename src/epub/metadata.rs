//! Descriptive metadata of a [`Package`](super::package::Package).

use crate::epub::consts::dc;
use crate::errors::{EpubError, EpubResult, ErrorDetails};
use crate::render::XmlFragment;
use indexmap::IndexMap;
use std::fmt::Write;

/// Dublin Core metadata fields, keyed by local name (e.g., `title`, `creator`).
///
/// Collected from:
/// - Elements in the DC namespace (`http://purl.org/dc/elements/1.1/`).
/// - Elements in the DC terms namespace (`http://purl.org/dc/terms/`).
/// - `meta` elements with a `property` of `dcterms:*`,
///   keyed by the part after the prefix (e.g., `dcterms:modified` → `modified`).
///
/// Every field is an ordered list of values in document order;
/// values are trimmed and blank values are dropped.
/// Fields retain the order in which they were first encountered.
///
/// # Examples
/// - Retrieving metadata:
/// ```no_run
/// # use epub_utils::Document;
/// # fn main() -> epub_utils::EpubResult<()> {
/// let doc = Document::open("book.epub")?;
/// let metadata = doc.package()?.metadata();
///
/// // Scalar convenience accessor
/// println!("{:?}", metadata.title());
/// // All values of a repeated field
/// for creator in metadata.get("creator") {
///     println!("{creator}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: IndexMap<String, Vec<String>>,
    source: String,
}

impl Metadata {
    pub(crate) fn new(source: String) -> Self {
        Self {
            fields: IndexMap::new(),
            source,
        }
    }

    /// Appends `value` to the field `name`,
    /// creating the field if this is its first occurrence.
    pub(crate) fn push(&mut self, name: &str, value: String) {
        match self.fields.get_mut(name) {
            Some(values) => values.push(value),
            None => {
                self.fields.insert(name.to_owned(), vec![value]);
            }
        }
    }

    /// All values of the field `name`, in document order.
    ///
    /// Returns an empty slice if the field is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.fields.get(name).map_or(&[], Vec::as_slice)
    }

    /// The first value of the field `name`, if present.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    /// Returns `true` if the field `name` has at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The first `dc:identifier`.
    pub fn identifier(&self) -> Option<&str> {
        self.first(dc::IDENTIFIER)
    }

    /// The first `dc:title`.
    pub fn title(&self) -> Option<&str> {
        self.first(dc::TITLE)
    }

    /// The first `dc:creator`.
    pub fn creator(&self) -> Option<&str> {
        self.first(dc::CREATOR)
    }

    /// The first `dc:language`.
    pub fn language(&self) -> Option<&str> {
        self.first(dc::LANGUAGE)
    }

    /// Iterates over `(name, values)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// The number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields were collected.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks that `identifier`, `title`, and `creator` are present and non-blank.
    ///
    /// # Errors
    /// [`EpubError::Validation`] listing *every* failing field.
    pub fn validate(&self) -> EpubResult<()> {
        let errors: Vec<_> = dc::REQUIRED
            .into_iter()
            .filter(|field| {
                self.get(field)
                    .first()
                    .is_none_or(|value| value.trim().is_empty())
            })
            .map(|field| format!("Missing or invalid '{field}' element"))
            .collect();

        if errors.is_empty() {
            return Ok(());
        }
        Err(EpubError::Validation {
            message: "EPUB metadata validation failed".to_owned(),
            errors,
            details: ErrorDetails::new()
                .suggestion("Ensure all required Dublin Core metadata elements are present")
                .suggestion("Check that metadata values are not empty"),
        })
    }

    /// One `key: value` line per field in first-insertion order,
    /// with keys right-aligned to the widest key.
    ///
    /// A repeated field renders as a bracketed list (`['A', 'B']`).
    pub fn to_kv(&self) -> String {
        let width = self.fields.keys().map(|key| key.chars().count()).max();
        let mut kv = String::new();

        for (key, values) in self.iter() {
            if !kv.is_empty() {
                kv.push('\n');
            }
            let _ = write!(kv, "{key:>width$}: ", width = width.unwrap_or_default());

            match values {
                [value] => kv.push_str(value),
                values => {
                    let quoted: Vec<_> = values.iter().map(|value| format!("'{value}'")).collect();
                    let _ = write!(kv, "[{}]", quoted.join(", "));
                }
            }
        }
        kv
    }
}

impl XmlFragment for Metadata {
    fn source(&self) -> &str {
        &self.source
    }
}
