pub(crate) mod str;
pub(crate) mod sync;
pub(crate) mod uri;

pub(crate) use self::str::StringExt;
