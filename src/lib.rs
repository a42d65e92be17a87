//! # tagslice
//!
//! Point lookups into tag-delimited markup, and a builder that writes it.
//!
//! ## The Problem
//!
//! Plenty of code only needs one or two values out of a markup document: a
//! status field in a response, a `src` attribute on the second image, the
//! list of `<item>` names. A full parser builds a tree, resolves entities,
//! validates, and then gets walked to find three strings.
//!
//! This crate skips all of that. A lookup is a couple of substring searches
//! and a slice:
//!
//! ```text
//! text:    <order id="7"><item>tea</item><item>milk</item></order>
//! needles:               "<item"  ...  "</item>"
//! result:                      "tea"
//! ```
//!
//! There is no tokenizer, no DOM and no validation. Comments, processing
//! instructions, namespaces and entities are not interpreted: what is between
//! the tags is returned exactly as written (trimmed, in content mode).
//!
//! ## Reading
//!
//! ### Single lookups
//!
//! [`tag_value`] returns the content of the first tag with a given name,
//! [`tag_markup`] the whole tag, [`attribute`] one attribute of it:
//!
//! ```rust
//! let doc = "<data type=\"echo\" id=\"123\">give me echo!</data>";
//!
//! assert_eq!(tagslice::tag_value(doc, "data"), Some("give me echo!"));
//! assert_eq!(tagslice::attribute(doc, "data", "id"), Some("123"));
//! assert_eq!(tagslice::attribute_i32(doc, "data", "id").unwrap(), Some(123));
//! ```
//!
//! Tags nested inside a tag of the same name are kept whole:
//!
//! ```rust
//! assert_eq!(tagslice::tag_value("<a><a>x</a></a>", "a"), Some("<a>x</a>"));
//! ```
//!
//! ### Repeated tags
//!
//! [`tags`] walks every sibling with a name, lazily and in document order;
//! [`Cursor`] does the same one step at a time:
//!
//! ```rust
//! use tagslice::{tags, Mode};
//!
//! let doc = "<birds><bird>pigeon</bird><bird>crow</bird></birds>";
//! let birds: Vec<_> = tags(doc, "bird", Mode::Content).filter_map(|m| m.text).collect();
//! assert_eq!(birds, ["pigeon", "crow"]);
//! ```
//!
//! ### Chaining
//!
//! [`Slicer`] wraps the same lookups in a chainable view:
//!
//! ```rust
//! use tagslice::Slicer;
//!
//! let doc = "<root><tagB><innerTag1><tag3>6</tag3></innerTag1></tagB></root>";
//! let six = Slicer::cut(doc).get("tagB").get("innerTag1").get("tag3");
//! assert_eq!(six.value(), Some("6"));
//! ```
//!
//! ## Writing
//!
//! [`Builder`] appends markup step by step and keeps the tags balanced:
//!
//! ```rust
//! use tagslice::{Builder, BuilderConfig};
//!
//! # fn main() -> tagslice::Result<()> {
//! let mut xml = Builder::with_config(BuilderConfig::new().with_encoding("UTF-8"));
//! xml.declare_xml()?
//!     .open_tag("note")?
//!     .with_attribute("lang", "en")?
//!     .open_tag("to")?
//!     .with_value("Tove")?
//!     .close_tag()?
//!     .open_tag("urgent")?;
//!
//! assert_eq!(
//!     xml.render(true)?,
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?><note lang=\"en\"><to>Tove</to><urgent/></note>"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Output goes to an [`Output`] sink: [`StringOutput`] in memory, or
//! [`StreamOutput`] straight to any writer in a chosen charset.
//!
//! ## Limits
//!
//! | Input | Behaviour |
//! |-------|-----------|
//! | Missing tag or attribute | `None` |
//! | Unterminated tag, no closing tag | `None` |
//! | Malformed `<name/ ` before a valid `<name>` | `None`: the search stops at the first opening |
//! | `<name` literally inside text | Counted as a nested opening |
//! | `>` inside a quoted attribute value | Ends the attribute region early |
//! | Entities (`&amp;`) | Returned undecoded |
//!
//! ## Thread Safety
//!
//! Read-side values ([`Slicer`], [`SlicerList`], [`TagMatch`]) are plain
//! borrows of immutable text and are `Send + Sync`. A [`Builder`] is mutable
//! and meant to be owned by one thread at a time.

mod attribute;
mod builder;
mod charset;
mod config;
mod error;
pub mod fs;
mod locate;
mod output;
mod slicer;

pub use attribute::{attribute, attribute_i32, attribute_i64, first_tag_attribute};
pub use builder::Builder;
pub use charset::{
    declared_charset, guess_charset, guess_charset_bytes, locale_charset, FALLBACK_CHARSET,
    HEAD_LEN,
};
pub use config::BuilderConfig;
pub use error::{Error, Result};
pub use locate::{locate, tags, Cursor, Mode, TagMatch, Tags};
pub use output::{Output, StreamOutput, StringOutput};
pub use slicer::{Slicer, SlicerList, Slices};

/// Trimmed content of the first `tag` in `text`.
///
/// `None` if the tag is missing, malformed, or self-closed.
#[must_use]
pub fn tag_value<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    locate(text, tag, 0, Mode::Content).and_then(|m| m.text)
}

/// Full markup of the first `tag` in `text`, delimiters included.
///
/// ```rust
/// assert_eq!(tagslice::tag_markup("<r><t/></r>", "t"), Some("<t/>"));
/// ```
#[must_use]
pub fn tag_markup<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    locate(text, tag, 0, Mode::Markup).and_then(|m| m.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_read_side_is_send_sync() {
        assert_send_sync::<Slicer<'static>>();
        assert_send_sync::<SlicerList<'static>>();
        assert_send_sync::<TagMatch<'static>>();
    }

    #[test]
    fn test_self_closed_has_no_value() {
        assert_eq!(tag_value("<dummy/>", "dummy"), None);
        assert_eq!(tag_markup("<dummy/>", "dummy"), Some("<dummy/>"));
    }
}
