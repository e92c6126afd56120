use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// The directory portion of an href, or `""` when it has none.
pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Removes the `#fragment` suffix of an href, if any.
pub(crate) fn strip_fragment(href: &str) -> &str {
    href.find('#').map_or(href, |position| &href[..position])
}

pub(crate) fn normalize(href: &str) -> String {
    let mut buf = PathBuf::from(href);
    normalize_href_path(&mut buf);

    // 1: `buf` is UTF-8 as its data derives from `href`.
    // 2: Ensure separators are forward slashes.
    buf.to_string_lossy().replace('\\', "/")
}

/// Resolves a manifest `href` into an archive entry name:
/// the fragment is stripped, percent-encoding decoded,
/// and the result joined onto `parent_dir`.
pub(crate) fn to_entry_name(parent_dir: &str, href: &str) -> String {
    let href = strip_fragment(href);
    // Schemes are detected prior to decoding; `%3A` is not a scheme delimiter
    if has_scheme(href) {
        return href.to_owned();
    }
    let decoded = decode(href);

    match decoded.strip_prefix('/') {
        // Container-absolute
        Some(absolute) => normalize(absolute),
        None => join(parent_dir, &decoded),
    }
}

fn join(parent_dir: &str, relative: &str) -> String {
    let mut buf = Path::new(parent_dir).join(relative);
    normalize_href_path(&mut buf);

    buf.to_string_lossy().replace('\\', "/")
}

fn normalize_href_path(original: &mut PathBuf) {
    let mut stack = Vec::new();

    for component in original.components() {
        match component {
            Component::ParentDir => {
                if stack
                    .last()
                    // The root can never be popped
                    .is_some_and(|component| !matches!(component, Component::RootDir))
                {
                    stack.pop();
                }
            }
            Component::CurDir => {}
            _ => stack.push(component),
        }
    }

    *original = PathBuf::from_iter(stack);
}

/// Whether the first path segment of `href` is prefixed by a URI scheme (e.g., `https:`).
fn has_scheme(href: &str) -> bool {
    let segment = href.split('/').next().unwrap_or_default();

    segment.split_once(':').is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
