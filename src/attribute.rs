//! Attribute lookup inside an opening tag.
//!
//! The opening tag is found the same way [`locate`](crate::locate) finds it,
//! then the region between the tag name and the first `>` is searched for
//! the literal needle ` name=`:
//!
//! ```text
//! <data type="echo" id="123">
//!      ^^^^^^^^^^^^^^^^^^^^^
//!      attribute region, searched for ` id=`
//! ```
//!
//! The byte after `=` must be `"` or `'`; the value runs to the next
//! occurrence of that same quote. Values are returned raw: no entity
//! decoding, no escaped quotes, and a `>` inside a quoted value cuts the
//! region short.

use std::num::ParseIntError;
use std::str::FromStr;

use memchr::{memchr, memmem};

use crate::locate::Needles;
use crate::{Error, Result};

/// Value of attribute `name` on the first `tag` in `text`.
///
/// ```rust
/// use tagslice::attribute;
///
/// assert_eq!(attribute("<xml attr=\"val\"/>", "xml", "attr"), Some("val"));
/// assert_eq!(attribute("<xml attr='val'>x</xml>", "xml", "attr"), Some("val"));
/// assert_eq!(attribute("<xml attr=\"val\"/>", "xml", "other"), None);
/// ```
pub fn attribute<'a>(text: &'a str, tag: &str, name: &str) -> Option<&'a str> {
    find_in_region(named_region(text, tag)?, name)
}

/// Value of attribute `name` on the first tag in `text`, whatever its name.
///
/// A leading `<?...?>` declaration is skipped.
///
/// ```rust
/// use tagslice::first_tag_attribute;
///
/// let doc = "<?xml version=\"1.0\"?><root lang=\"en\"><child lang=\"lt\"/></root>";
/// assert_eq!(first_tag_attribute(doc, "lang"), Some("en"));
/// ```
pub fn first_tag_attribute<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let bytes = text.as_bytes();
    let mut lt = memchr(b'<', bytes)?;
    if bytes.get(lt + 1) == Some(&b'?') {
        lt = lt + 2 + memchr(b'<', &bytes[lt + 2..])?;
    }
    let gt = lt + memchr(b'>', &bytes[lt..])?;
    find_in_region(&text[lt + 1..gt], name)
}

/// Attribute `name` on the first `tag`, parsed as `i32`.
///
/// # Errors
///
/// [`Error::NotANumber`] if the attribute exists but is not a base-10 `i32`.
/// A missing attribute is `Ok(None)`.
pub fn attribute_i32(text: &str, tag: &str, name: &str) -> Result<Option<i32>> {
    parse_number(name, attribute(text, tag, name))
}

/// Attribute `name` on the first `tag`, parsed as `i64`.
///
/// # Errors
///
/// [`Error::NotANumber`] if the attribute exists but is not a base-10 `i64`.
/// A missing attribute is `Ok(None)`.
pub fn attribute_i64(text: &str, tag: &str, name: &str) -> Result<Option<i64>> {
    parse_number(name, attribute(text, tag, name))
}

pub(crate) fn parse_number<T>(name: &str, raw: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.map(|value| {
        value.parse::<T>().map_err(|source| Error::NotANumber {
            attribute: name.to_owned(),
            value: value.to_owned(),
            source,
        })
    })
    .transpose()
}

/// Everything between `<tag` and the first following `>`.
fn named_region<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let needles = Needles::new(tag)?;
    let (at, _) = needles.find_opening(text, 0, text.len())?;
    let after = at + needles.open_len();
    let gt = after + memchr(b'>', &text.as_bytes()[after..])?;
    Some(&text[after..gt])
}

fn find_in_region<'a>(region: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    // Matched as if the region had a leading space, so an attribute at
    // offset 0 is found too.
    let needle = format!(" {name}=");
    let value_at = if region.starts_with(&needle[1..]) {
        needle.len() - 1
    } else {
        memmem::find(region.as_bytes(), needle.as_bytes())? + needle.len()
    };

    let bytes = region.as_bytes();
    let quote = *bytes.get(value_at)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let open = value_at + 1;
    let close = open + memchr(quote, &bytes[open..])?;
    Some(&region[open..close])
}
