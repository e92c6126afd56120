mod container;
pub(super) mod navigation;
mod package;

use crate::epub::DocumentOptions;
use crate::errors::EpubError;
use crate::parser::ParserResult;
use log::debug;

pub(super) struct EpubParser<'a> {
    options: &'a DocumentOptions,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(options: &'a DocumentOptions) -> Self {
        Self { options }
    }

    fn is_strict(&self) -> bool {
        self.options.strict
    }

    // Helper methods
    fn mandatory<T>(value: Option<T>, if_missing: impl FnOnce() -> EpubError) -> ParserResult<T> {
        value.ok_or_else(if_missing)
    }

    /// Required attribute value.
    ///
    /// If `attribute_value` is [`None`], an error is returned if `strict` mode is enabled.
    /// Otherwise, [`None`] is returned and the owning element is expected to be skipped.
    fn require_attribute(
        &self,
        attribute_value: Option<&str>,
        selector: &'static str,
        document: &str,
    ) -> ParserResult<Option<String>> {
        match attribute_value {
            Some(value) => Ok(Some(value.to_owned())),
            None if self.is_strict() => Err(EpubError::invalid_source(format!(
                "Missing required attribute: {selector}"
            ))
            .in_file(document)),
            None => {
                debug!("Skipping element without attribute {selector} in {document}");
                Ok(None)
            }
        }
    }
}
