//! Error-related types for a [`Document`](crate::Document).

use std::fmt::Write;

/// Alias for `Result<T, EpubError>`.
pub type EpubResult<T> = Result<T, EpubError>;

/// Supplementary, informational details attached to every [`EpubError`].
///
/// Details never influence control flow; they exist to help a user
/// remedy the problem (e.g., listing the ids that *do* exist when a
/// requested one is missing).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorDetails {
    /// Remediation hints, in display order.
    pub suggestions: Vec<String>,
    /// The archive entry (or filesystem path) the error relates to.
    pub file: Option<String>,
}

impl ErrorDetails {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub(crate) fn suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// The category of an [`EpubError`], without its payload.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`EpubError::Parse`].
    Parse,
    /// See [`EpubError::InvalidSource`].
    InvalidSource,
    /// See [`EpubError::UnsupportedFormat`].
    UnsupportedFormat,
    /// See [`EpubError::NotFound`].
    NotFound,
    /// See [`EpubError::Validation`].
    Validation,
}

/// Possible errors when resolving the structure of an EPUB.
///
/// Every variant carries [`ErrorDetails`], retrievable with
/// [`EpubError::suggestions`] and [`EpubError::file`].
///
/// # Variants
/// - [`Parse`](EpubError::Parse): Malformed XML in any resolved document.
/// - [`InvalidSource`](EpubError::InvalidSource): A structural requirement is violated.
/// - [`UnsupportedFormat`](EpubError::UnsupportedFormat): Unsupported version or media type.
/// - [`NotFound`](EpubError::NotFound): A missing archive entry or id.
/// - [`Validation`](EpubError::Validation): Required metadata is missing.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    ////////////////////////////////////////////////////////////////////////////////
    // Parsing
    ////////////////////////////////////////////////////////////////////////////////
    /// A document is not well-formed XML.
    ///
    /// `document` always names the archive entry being parsed.
    #[error("Error parsing {document}: {message}")]
    Parse {
        /// The archive entry being parsed, such as `META-INF/container.xml`.
        document: String,
        /// Description of the underlying XML error.
        message: String,
        /// Byte offset within the document where the error was detected.
        position: u64,
        details: ErrorDetails,
    },

    ////////////////////////////////////////////////////////////////////////////////
    // Structure
    ////////////////////////////////////////////////////////////////////////////////
    /// A structural requirement is violated.
    ///
    /// # Examples
    /// - The file does not exist or is not a zip archive.
    /// - `container.xml` declares no `rootfile`.
    /// - The package document lacks `metadata`, `manifest` or `spine`.
    /// - An archive entry cannot be decoded as UTF-8 text.
    #[error("{message}")]
    InvalidSource {
        message: String,
        details: ErrorDetails,
    },

    /// The EPUB version or a media type is not supported.
    #[error("{message}")]
    UnsupportedFormat {
        message: String,
        details: ErrorDetails,
    },

    ////////////////////////////////////////////////////////////////////////////////
    // Lookup
    ////////////////////////////////////////////////////////////////////////////////
    /// A requested archive entry or referenced id does not exist.
    ///
    /// [`EpubError::suggestions`] lists a sample of what is available instead.
    #[error("{target} not found")]
    NotFound {
        /// Description of what was requested, such as `spine item 'chapter1'`.
        target: String,
        details: ErrorDetails,
    },

    ////////////////////////////////////////////////////////////////////////////////
    // Validation
    ////////////////////////////////////////////////////////////////////////////////
    /// Required metadata fields are missing or blank.
    ///
    /// `errors` lists every failing field, not just the first.
    #[error("{message}: {}", .errors.join("; "))]
    Validation {
        message: String,
        errors: Vec<String>,
        details: ErrorDetails,
    },
}

impl EpubError {
    pub(crate) fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            details: ErrorDetails::new(),
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
            details: ErrorDetails::new(),
        }
    }

    pub(crate) fn not_found(target: impl Into<String>) -> Self {
        Self::NotFound {
            target: target.into(),
            details: ErrorDetails::new(),
        }
    }

    /// Replaces the [`ErrorDetails`] of this error.
    pub(crate) fn with_details(mut self, new_details: ErrorDetails) -> Self {
        *self.details_mut() = new_details;
        self
    }

    /// Sets the related file, if one is not already set.
    pub(crate) fn in_file(mut self, file: &str) -> Self {
        let details = self.details_mut();
        if details.file.is_none() {
            details.file = Some(file.to_owned());
        }
        self
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::InvalidSource { .. } => ErrorKind::InvalidSource,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Supplementary details of this error.
    pub fn details(&self) -> &ErrorDetails {
        match self {
            Self::Parse { details, .. }
            | Self::InvalidSource { details, .. }
            | Self::UnsupportedFormat { details, .. }
            | Self::NotFound { details, .. }
            | Self::Validation { details, .. } => details,
        }
    }

    /// Remediation hints, possibly empty.
    pub fn suggestions(&self) -> &[String] {
        &self.details().suggestions
    }

    /// The file this error relates to, if known.
    pub fn file(&self) -> Option<&str> {
        self.details().file.as_deref()
    }

    /// A multi-line, human-readable report of this error
    /// including its related file and suggestions.
    ///
    /// # Examples
    /// ```text
    /// spine item 'ch9' not found
    /// File: book.epub
    /// Suggestions:
    ///   • Available spine items: ch1, ch2, ch3
    /// ```
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let details = self.details();

        if let Some(file) = &details.file {
            // Writing to a `String` is infallible
            let _ = write!(report, "\nFile: {file}");
        }
        if !details.suggestions.is_empty() {
            report.push_str("\nSuggestions:");
            for suggestion in &details.suggestions {
                let _ = write!(report, "\n  • {suggestion}");
            }
        }
        report
    }

    fn details_mut(&mut self) -> &mut ErrorDetails {
        match self {
            Self::Parse { details, .. }
            | Self::InvalidSource { details, .. }
            | Self::UnsupportedFormat { details, .. }
            | Self::NotFound { details, .. }
            | Self::Validation { details, .. } => details,
        }
    }
}

/// Formats a short sample of `available` values,
/// appending `(and N more)` when truncated to `limit`.
pub(crate) fn sample<'a>(available: impl IntoIterator<Item = &'a str>, limit: usize) -> String {
    let available: Vec<_> = available.into_iter().collect();
    let mut sample = available
        .iter()
        .take(limit)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    if available.len() > limit {
        let _ = write!(sample, " (and {} more)", available.len() - limit);
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report() {
        let error = EpubError::not_found("spine item 'ch9'").with_details(
            ErrorDetails::new()
                .file("book.epub")
                .suggestion("Available spine items: ch1, ch2"),
        );

        assert_eq!(ErrorKind::NotFound, error.kind());
        assert_eq!(Some("book.epub"), error.file());
        assert_eq!(
            "spine item 'ch9' not found\nFile: book.epub\nSuggestions:\n  • Available spine items: ch1, ch2",
            error.report()
        );
    }

    #[test]
    fn test_report_without_details() {
        let error = EpubError::invalid_source("OPF file missing required 'spine' element");

        assert!(error.suggestions().is_empty());
        assert_eq!(error.to_string(), error.report());
    }

    #[test]
    fn test_in_file_keeps_first() {
        let error = EpubError::unsupported("x")
            .in_file("a.opf")
            .in_file("b.opf");

        assert_eq!(Some("a.opf"), error.file());
    }

    #[test]
    fn test_validation_message() {
        let error = EpubError::Validation {
            message: "EPUB metadata validation failed".to_owned(),
            errors: vec![
                "Missing or invalid 'title' element".to_owned(),
                "Missing or invalid 'creator' element".to_owned(),
            ],
            details: ErrorDetails::new(),
        };

        assert_eq!(
            "EPUB metadata validation failed: Missing or invalid 'title' element; \
             Missing or invalid 'creator' element",
            error.to_string()
        );
    }

    #[test]
    fn test_sample() {
        #[rustfmt::skip]
        let expected = [
            ("", vec![], 5),
            ("a, b", vec!["a", "b"], 5),
            ("a, b (and 1 more)", vec!["a", "b", "c"], 2),
            ("a (and 9 more)", vec!["a"; 10], 1),
        ];

        for (expected, available, limit) in expected {
            assert_eq!(expected, sample(available, limit));
        }
    }
}
