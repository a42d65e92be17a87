//! Declared-charset guessing.
//!
//! Looks for `encoding="..."` (or single-quoted) near the start of a
//! document, as in
//!
//! ```text
//! <?xml version="1.0" encoding="Windows-1257"?>
//! ```
//!
//! A declaration like this is about 50 bytes, so [`HEAD_LEN`] bytes are
//! plenty. When nothing usable is declared the process locale charset is
//! returned instead.

use memchr::memmem;

/// How many leading bytes [`guess_charset_bytes`] inspects.
pub const HEAD_LEN: usize = 100;

/// Charset used when the locale names none.
pub const FALLBACK_CHARSET: &str = "UTF-8";

/// The charset declared in `head`, or [`locale_charset`].
///
/// ```rust
/// use tagslice::guess_charset;
///
/// let head = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><note/>";
/// assert_eq!(guess_charset(head), "ISO-8859-1");
/// assert_eq!(guess_charset("<?xml encoding='bla'?><dummy/>"), "bla");
/// ```
#[must_use]
pub fn guess_charset(head: &str) -> String {
    declared_charset(head).map_or_else(locale_charset, str::to_owned)
}

/// Like [`guess_charset`], over the first [`HEAD_LEN`] bytes of raw input.
///
/// Bytes that are not UTF-8 are replaced before scanning; the declaration
/// itself is ASCII in every charset this is useful for.
#[must_use]
pub fn guess_charset_bytes(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(HEAD_LEN)];
    guess_charset(&String::from_utf8_lossy(head))
}

/// The `encoding` value declared in `head`, if it is complete and non-empty.
#[must_use]
pub fn declared_charset(head: &str) -> Option<&str> {
    const KEY: &str = "encoding";

    let at = memmem::find(head.as_bytes(), KEY.as_bytes())?;
    let rest = head[at + KEY.len()..]
        .trim_start()
        .strip_prefix('=')?
        .trim_start();
    let quote = rest.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let body = &rest[1..];
    let value = &body[..body.find(quote)?];
    (!value.is_empty()).then_some(value)
}

/// The charset of the process locale.
///
/// Reads `LC_ALL`, `LC_CTYPE` and `LANG` in that order and takes the codeset
/// after the `.` (`en_US.ISO-8859-1` gives `ISO-8859-1`). Falls back to
/// [`FALLBACK_CHARSET`].
#[must_use]
pub fn locale_charset() -> String {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .as_deref()
        .and_then(codeset)
        .unwrap_or(FALLBACK_CHARSET)
        .to_owned()
}

/// `ll_CC.codeset@modifier` -> `codeset`
fn codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split_once('@').map_or(rest, |(cs, _)| cs);
    (!codeset.is_empty()).then_some(codeset)
}
