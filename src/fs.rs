//! Reading documents from disk.
//!
//! The scanners work on `&str`; this module turns a file into one, decoding
//! with the charset the document declares about itself.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::charset::{guess_charset_bytes, HEAD_LEN};
use crate::{Error, Result};

/// Read `path`, decoding with its declared charset.
///
/// The charset comes from [`guess_charset_bytes`]. An unknown charset name
/// falls back to UTF-8 with a warning; malformed sequences become U+FFFD.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let charset = guess_charset_bytes(&bytes);
    let encoding = Encoding::for_label(charset.as_bytes()).unwrap_or_else(|| {
        log::warn!(
            "unknown charset {charset:?} declared in {}, reading as UTF-8",
            path.display()
        );
        UTF_8
    });
    Ok(decode(path, &bytes, encoding))
}

/// Read `path`, decoding with the charset labelled `charset`.
///
/// # Errors
///
/// [`Error::UnsupportedCharset`] for an unknown label, [`Error::Io`] if the
/// file cannot be read.
pub fn read_file_with(path: impl AsRef<Path>, charset: &str) -> Result<String> {
    let path = path.as_ref();
    let encoding = Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| Error::UnsupportedCharset(charset.to_owned()))?;
    let bytes = std::fs::read(path)?;
    Ok(decode(path, &bytes, encoding))
}

/// Guess the charset of `path` from its first [`HEAD_LEN`] bytes.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened or read.
pub fn guess_file_charset(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut head = Vec::with_capacity(HEAD_LEN);
    File::open(path)?
        .take(HEAD_LEN as u64)
        .read_to_end(&mut head)?;
    let charset = guess_charset_bytes(&head);
    log::debug!("guessed charset {charset:?} for {}", path.display());
    Ok(charset)
}

fn decode(path: &Path, bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::debug!(
            "{} has byte sequences invalid in {}; replaced",
            path.display(),
            used.name()
        );
    }
    log::debug!("read {} bytes from {} as {}", bytes.len(), path.display(), used.name());
    text.into_owned()
}
