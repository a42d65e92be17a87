//! Output sinks for the builder.
//!
//! A sink only has to report how much it holds and accept more text. Two are
//! provided:
//!
//! - [`StringOutput`]: accumulates in memory.
//! - [`StreamOutput`]: encodes each piece with a named charset and writes it
//!   straight to any [`Write`].

use std::fmt;
use std::io::Write;

use encoding_rs::Encoding;

use crate::{Error, Result};

/// Where a [`Builder`](crate::Builder) appends its markup.
pub trait Output {
    /// Characters appended so far.
    fn len(&self) -> usize;

    /// Whether nothing was appended yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `data`.
    ///
    /// # Errors
    ///
    /// Sinks backed by I/O report write failures.
    fn append(&mut self, data: &str) -> Result<()>;

    /// Push buffered data to its destination.
    ///
    /// # Errors
    ///
    /// Sinks backed by I/O report flush failures.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOutput {
    buf: String,
    chars: usize,
}

impl StringOutput {
    /// An empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            chars: 0,
        }
    }

    /// An empty sink with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            chars: 0,
        }
    }

    /// Everything appended so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

}

impl Output for StringOutput {
    fn len(&self) -> usize {
        self.chars
    }

    fn append(&mut self, data: &str) -> Result<()> {
        self.buf.push_str(data);
        self.chars += data.chars().count();
        Ok(())
    }
}

impl fmt::Display for StringOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

/// Sink that encodes and writes immediately.
///
/// Characters the charset cannot represent are written as numeric character
/// references (`&#261;`), which keeps the output well-formed.
///
/// ```rust
/// use tagslice::{Output, StreamOutput};
///
/// let mut out = StreamOutput::new(Vec::new(), "ISO-8859-1").unwrap();
/// out.append("<n>é</n>").unwrap();
///
/// assert_eq!(out.len(), 8);
/// assert_eq!(out.into_inner(), b"<n>\xe9</n>");
/// ```
pub struct StreamOutput<W: Write> {
    target: W,
    encoding: &'static Encoding,
    len: usize,
}

impl<W: Write> StreamOutput<W> {
    /// Wrap `target`, encoding with the charset labelled `charset`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedCharset`] if the label is unknown, or names a
    /// charset that can only be decoded (the UTF-16 family).
    pub fn new(target: W, charset: &str) -> Result<Self> {
        let encoding = Encoding::for_label(charset.trim().as_bytes())
            .filter(|&enc| enc.output_encoding() == enc)
            .ok_or_else(|| Error::UnsupportedCharset(charset.to_owned()))?;
        log::debug!("stream output encodes as {} (label {charset:?})", encoding.name());
        Ok(Self {
            target,
            encoding,
            len: 0,
        })
    }

    /// Canonical name of the charset in use.
    #[must_use]
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// The wrapped writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.target
    }

    /// Unwrap the writer. Nothing is flushed.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.target
    }
}

impl<W: Write> Output for StreamOutput<W> {
    fn len(&self) -> usize {
        self.len
    }

    fn append(&mut self, data: &str) -> Result<()> {
        let (bytes, _, _) = self.encoding.encode(data);
        self.target.write_all(&bytes)?;
        self.len += data.chars().count();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.target.flush().map_err(Error::from)
    }
}

impl<W: Write> fmt::Debug for StreamOutput<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamOutput")
            .field("encoding", &self.encoding.name())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<W: Write> fmt::Display for StreamOutput<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamOutput({})[{}]", self.encoding.name(), self.len)
    }
}

impl From<StringOutput> for String {
    fn from(out: StringOutput) -> Self {
        out.buf
    }
}

/// Writer that fails every call; used to exercise error paths.
#[cfg(test)]
pub(crate) struct FailingWriter;

#[cfg(test)]
impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
}
