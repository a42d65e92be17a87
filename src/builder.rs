//! Incremental markup builder.
//!
//! ## States
//!
//! ```text
//!            open_tag                 with_value / with_cdata / open_tag
//!   Empty ───────────► TagOpenPending ─────────────────────────► InBody
//!     │                  │   ▲    │                                │
//!     │ declare          │   └────┘ with_attribute                 │
//!     ▼                  │ close_tag: "/>"            close_tag: "</name>"
//!   Empty                ▼                                         ▼
//!                    (parent's InBody, or Closed when the stack is empty)
//! ```
//!
//! TagOpenPending means `<name` was written but its `>` was not: attributes
//! may still be added. Any other action writes the `>` first. Closing a tag
//! that is still pending writes the self-closed form, so
//! `open_tag("x")` + `close_tag()` gives `<x/>`.
//!
//! ## Pretty-printing
//!
//! With [`BuilderConfig::with_pretty`], every opening tag except the first
//! thing written starts on a new line indented by its depth, and a closing
//! tag goes on its own line when its element had child elements:
//!
//! ```text
//! <a>
//!   <b>c</b>
//!   <d/>
//! </a>
//! ```

use std::fmt::{self, Display};

use crate::config::BuilderConfig;
use crate::output::{Output, StringOutput};
use crate::{Error, Result};

/// Fluent builder that keeps tags balanced.
///
/// Every step returns `Result<&mut Self>`, so calls chain with `?`:
///
/// ```rust
/// use tagslice::Builder;
///
/// # fn main() -> tagslice::Result<()> {
/// let mut xml = Builder::new();
/// xml.open_tag("root")?
///     .with_attribute("id", 1)?
///     .open_tag("a")?
///     .with_value("v")?
///     .close_all_tags()?;
///
/// assert_eq!(xml.render(false)?, "<root id=\"1\"><a>v</a></root>");
/// # Ok(())
/// # }
/// ```
///
/// Attribute values and text are written verbatim; escaping is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct Builder<O = StringOutput> {
    out: O,
    open: Vec<String>,
    pending: bool,
    closed_child: bool,
    config: BuilderConfig,
}

impl Builder<StringOutput> {
    /// An in-memory builder using the process-wide default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::process_default())
    }

    /// An in-memory builder with an explicit configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        Self::with_output(StringOutput::new(), config)
    }

    /// The markup built so far, optionally closing every open tag first.
    ///
    /// Without `auto_close` this has no side effects and can be called
    /// repeatedly to inspect partial output.
    ///
    /// # Errors
    ///
    /// Never fails for the in-memory sink; the `Result` mirrors
    /// [`close_all_tags`](Self::close_all_tags).
    pub fn render(&mut self, auto_close: bool) -> Result<String> {
        if auto_close && !self.open.is_empty() {
            log::debug!("auto-closing {} open tag(s) at render", self.open.len());
            self.close_all_tags()?;
        }
        Ok(self.out.as_str().to_owned())
    }

    /// The markup built so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.out.as_str()
    }
}

impl Default for Builder<StringOutput> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Builder<StringOutput> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.out.as_str())
    }
}

impl<O: Output> Builder<O> {
    /// A builder writing to `out`.
    #[must_use]
    pub fn with_output(out: O, config: BuilderConfig) -> Self {
        Self {
            out,
            open: Vec::new(),
            pending: false,
            closed_child: false,
            config,
        }
    }

    /// The configuration captured at construction.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Declared charset name.
    #[must_use]
    pub fn encoding(&self) -> &str {
        self.config.encoding()
    }

    /// Number of tags currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether the innermost tag still accepts attributes.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The sink.
    #[must_use]
    pub fn output(&self) -> &O {
        &self.out
    }

    /// Write `declaration` verbatim. It may also carry a DOCTYPE.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyStarted`] if anything was written before.
    pub fn declare(&mut self, declaration: &str) -> Result<&mut Self> {
        if !self.out.is_empty() {
            return Err(Error::AlreadyStarted {
                written: self.out.len(),
            });
        }
        self.out.append(declaration)?;
        Ok(self)
    }

    /// Write `<?xml version="1.0" encoding="..."?>` using the configured
    /// charset name.
    ///
    /// # Errors
    ///
    /// Same as [`declare`](Self::declare).
    pub fn declare_xml(&mut self) -> Result<&mut Self> {
        let declaration = format!(
            "<?xml version=\"1.0\" encoding=\"{}\"?>",
            self.config.encoding()
        );
        self.declare(&declaration)
    }

    /// Open tag `name`. Attributes may follow until anything else is added.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTagName`] for `""`, otherwise only sink failures.
    pub fn open_tag(&mut self, name: &str) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(Error::EmptyTagName);
        }
        self.terminate_pending()?;
        if self.config.pretty() && !self.out.is_empty() {
            self.line_break(self.open.len())?;
        }
        self.out.append("<")?;
        self.out.append(name)?;
        self.open.push(name.to_owned());
        self.pending = true;
        self.closed_child = false;
        Ok(self)
    }

    /// Add ` name="value"` to the tag just opened.
    ///
    /// # Errors
    ///
    /// [`Error::NoOpenTag`] unless the innermost tag is still pending.
    pub fn with_attribute(&mut self, name: &str, value: impl Display) -> Result<&mut Self> {
        if !self.pending {
            return Err(Error::NoOpenTag { action: "attribute" });
        }
        self.out.append(&format!(" {name}=\"{value}\""))?;
        Ok(self)
    }

    /// [`with_attribute`](Self::with_attribute) when `condition` holds,
    /// otherwise nothing.
    ///
    /// # Errors
    ///
    /// As [`with_attribute`](Self::with_attribute), only when `condition` is
    /// true.
    pub fn with_attribute_if(
        &mut self,
        condition: bool,
        name: &str,
        value: impl Display,
    ) -> Result<&mut Self> {
        if condition {
            self.with_attribute(name, value)
        } else {
            Ok(self)
        }
    }

    /// Append text inside the innermost open tag.
    ///
    /// # Errors
    ///
    /// [`Error::NoOpenTag`] if no tag is open.
    pub fn with_value(&mut self, value: impl Display) -> Result<&mut Self> {
        self.body("value")?;
        self.out.append(&value.to_string())?;
        Ok(self)
    }

    /// Append `<![CDATA[value]]>` inside the innermost open tag.
    ///
    /// `value` must not contain `]]>`.
    ///
    /// # Errors
    ///
    /// [`Error::NoOpenTag`] if no tag is open.
    pub fn with_cdata(&mut self, value: impl Display) -> Result<&mut Self> {
        self.body("CDATA")?;
        self.out.append(&format!("<![CDATA[{value}]]>"))?;
        Ok(self)
    }

    /// Close the innermost open tag.
    ///
    /// # Errors
    ///
    /// [`Error::NothingToClose`] if no tag is open.
    pub fn close_tag(&mut self) -> Result<&mut Self> {
        let name = self.open.pop().ok_or(Error::NothingToClose)?;
        if self.pending {
            self.pending = false;
            self.out.append("/>")?;
        } else {
            if self.config.pretty() && self.closed_child {
                self.line_break(self.open.len())?;
            }
            self.out.append("</")?;
            self.out.append(&name)?;
            self.out.append(">")?;
        }
        self.closed_child = true;
        Ok(self)
    }

    /// Close every open tag, innermost first. A no-op when none are open.
    ///
    /// # Errors
    ///
    /// Only sink failures.
    pub fn close_all_tags(&mut self) -> Result<&mut Self> {
        while !self.open.is_empty() {
            self.close_tag()?;
        }
        Ok(self)
    }

    /// Close every open tag, flush, and hand back the sink.
    ///
    /// # Errors
    ///
    /// Sink write or flush failures.
    pub fn finish(mut self) -> Result<O> {
        self.close_all_tags()?;
        self.out.flush()?;
        Ok(self.out)
    }

    /// Hand back the sink as is, open tags and all.
    #[must_use]
    pub fn into_output(self) -> O {
        self.out
    }

    /// Enter the body of the innermost tag.
    fn body(&mut self, action: &'static str) -> Result<()> {
        if self.open.is_empty() {
            return Err(Error::NoOpenTag { action });
        }
        self.terminate_pending()?;
        self.closed_child = false;
        Ok(())
    }

    fn terminate_pending(&mut self) -> Result<()> {
        if self.pending {
            self.out.append(">")?;
            self.pending = false;
        }
        Ok(())
    }

    fn line_break(&mut self, depth: usize) -> Result<()> {
        let indent = depth * self.config.indent();
        let mut brk = String::with_capacity(indent + 1);
        brk.push('\n');
        brk.extend(std::iter::repeat(' ').take(indent));
        self.out.append(&brk)
    }
}
