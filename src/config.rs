//! Builder configuration.
//!
//! Each [`Builder`](crate::Builder) owns a copy of its configuration, taken
//! when it is created. The process-wide default is a single snapshot:
//!
//! ```text
//! install_default(cfg)   -- optional, at most once, before first use
//! process_default()      -- first call freezes the snapshot
//! Builder::new()         -- clones the snapshot
//! ```
//!
//! Nothing a builder does afterwards reads global state.

use std::sync::OnceLock;

use crate::charset::locale_charset;
use crate::{Error, Result};

static PROCESS_DEFAULT: OnceLock<BuilderConfig> = OnceLock::new();

/// Formatting and declaration settings for a builder.
///
/// # Examples
///
/// ```rust
/// use tagslice::BuilderConfig;
///
/// let config = BuilderConfig::new().with_pretty(true).with_encoding("UTF-8");
/// assert!(config.pretty());
/// assert_eq!(config.encoding(), "UTF-8");
/// assert_eq!(config.indent(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    pretty: bool,
    encoding: String,
    indent: usize,
}

impl BuilderConfig {
    /// Compact output, two-space indent, locale charset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            encoding: locale_charset(),
            indent: 2,
        }
    }

    /// Enable or disable line breaks and indentation.
    #[must_use]
    pub fn with_pretty(self, pretty: bool) -> Self {
        Self { pretty, ..self }
    }

    /// Charset name written by [`Builder::declare_xml`](crate::Builder::declare_xml).
    #[must_use]
    pub fn with_encoding(self, encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
            ..self
        }
    }

    /// Spaces per nesting level when pretty-printing.
    #[must_use]
    pub fn with_indent(self, indent: usize) -> Self {
        Self { indent, ..self }
    }

    /// Whether pretty-printing is on.
    #[must_use]
    pub const fn pretty(&self) -> bool {
        self.pretty
    }

    /// The declared charset name.
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Spaces per nesting level.
    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    /// Make this the process-wide default for [`Builder::new`](crate::Builder::new).
    ///
    /// # Errors
    ///
    /// [`Error::DefaultsAlreadyInstalled`] if a default was installed before,
    /// or if [`process_default`](Self::process_default) already froze one.
    pub fn install_default(self) -> Result<()> {
        PROCESS_DEFAULT
            .set(self)
            .map_err(|_| Error::DefaultsAlreadyInstalled)?;
        log::debug!("installed process-wide builder defaults");
        Ok(())
    }

    /// A copy of the process-wide default.
    #[must_use]
    pub fn process_default() -> Self {
        PROCESS_DEFAULT.get_or_init(Self::new).clone()
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}
