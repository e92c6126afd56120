pub(crate) mod xml;

use crate::errors::EpubResult;

pub(crate) type ParserResult<T> = EpubResult<T>;
