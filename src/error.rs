//! Error types for tagslice.
//!
//! A missing tag or attribute is not an error: the read side returns `Option`.
//! Everything here is either builder misuse, a charset problem, or I/O.

use std::num::ParseIntError;

/// Errors that can occur while building markup or decoding values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declaration was added after content was already written.
    #[error("cannot add declaration: {written} characters were written already")]
    AlreadyStarted {
        /// Characters already in the output.
        written: usize,
    },

    /// An attribute, value, or CDATA section had no tag to attach to.
    #[error("cannot add {action} now: open a tag first")]
    NoOpenTag {
        /// What the caller tried to add.
        action: &'static str,
    },

    /// `open_tag` was called with an empty name.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// `close_tag` was called with no open tags.
    #[error("all tags are closed already")]
    NothingToClose,

    /// An attribute exists but its value is not a base-10 integer.
    #[error("attribute {attribute:?} is not a number: {value:?}")]
    NotANumber {
        /// The attribute name.
        attribute: String,
        /// The raw attribute value.
        value: String,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The charset label is unknown, or cannot be used for encoding.
    #[error("unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Process-wide builder defaults were already installed.
    #[error("process-wide builder defaults are already installed")]
    DefaultsAlreadyInstalled,

    /// Writing to a stream sink or reading a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tagslice operations.
pub type Result<T> = std::result::Result<T, Error>;
