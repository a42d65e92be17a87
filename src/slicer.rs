//! Chainable narrowing over a text fragment.
//!
//! A [`Slicer`] wraps one fragment. Every operation returns a new slicer over
//! a narrower fragment, so a nested path is just repeated single-tag
//! extraction:
//!
//! ```text
//! cut(doc)        "<tagB><innerTag1><tag3>6</tag3></innerTag1></tagB>"
//!   .get("tagB")  "<innerTag1><tag3>6</tag3></innerTag1>"
//!   .get("innerTag1")                  "<tag3>6</tag3>"
//!   .get("tag3")                                    "6"
//! ```
//!
//! A lookup that finds nothing yields an absent slicer; further narrowing of
//! an absent slicer stays absent, so a chain never has to be checked halfway.

use std::fmt;

use crate::attribute::{attribute, first_tag_attribute, parse_number};
use crate::locate::{locate, tags, Mode, Tags};
use crate::Result;

/// A view over a text fragment, or over nothing if a lookup failed.
///
/// ```rust
/// use tagslice::Slicer;
///
/// let doc = "<tagB><innerTag1><tag3>6</tag3></innerTag1></tagB>";
/// let six = Slicer::cut(doc).get("tagB").get("innerTag1").get("tag3");
/// assert_eq!(six.value(), Some("6"));
///
/// let missing = Slicer::cut(doc).get("nope").get("tag3");
/// assert_eq!(missing.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slicer<'a> {
    text: Option<&'a str>,
}

impl<'a> Slicer<'a> {
    /// Start slicing `text`.
    #[must_use]
    pub const fn cut(text: &'a str) -> Self {
        Self { text: Some(text) }
    }

    /// The fragment this slicer wraps, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&'a str> {
        self.text
    }

    /// Whether the lookup that produced this slicer found anything.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.text.is_some()
    }

    /// Narrow to the trimmed content of the first `tag`.
    ///
    /// Attributes of `tag` are not part of the result; read them with
    /// [`get_attribute`](Self::get_attribute) first.
    #[must_use]
    pub fn get(&self, tag: &str) -> Self {
        self.narrow(tag, Mode::Content)
    }

    /// Narrow to the full markup of the first `tag`.
    #[must_use]
    pub fn get_tag(&self, tag: &str) -> Self {
        self.narrow(tag, Mode::Markup)
    }

    /// Content of every `tag`, in document order.
    ///
    /// Self-closed tags appear as absent slicers.
    ///
    /// ```rust
    /// use tagslice::Slicer;
    ///
    /// let birds = "<birds><bird>pigeon</bird><bird>crow</bird></birds>";
    /// let all = Slicer::cut(birds).get_all("bird");
    /// assert_eq!(all.as_strings(), ["pigeon", "crow"]);
    /// ```
    #[must_use]
    pub fn get_all(&self, tag: &str) -> SlicerList<'a> {
        self.iter_all(tag).collect()
    }

    /// Full markup of every `tag`, in document order.
    #[must_use]
    pub fn get_tags(&self, tag: &str) -> SlicerList<'a> {
        self.iter_tags(tag).collect()
    }

    /// Lazy version of [`get_all`](Self::get_all).
    pub fn iter_all(&self, tag: &str) -> Slices<'a> {
        Slices(tags(self.text.unwrap_or_default(), tag, Mode::Content))
    }

    /// Lazy version of [`get_tags`](Self::get_tags).
    pub fn iter_tags(&self, tag: &str) -> Slices<'a> {
        Slices(tags(self.text.unwrap_or_default(), tag, Mode::Markup))
    }

    /// Attribute `name` of the first `tag` in this fragment.
    #[must_use]
    pub fn get_attribute(&self, tag: &str, name: &str) -> Option<&'a str> {
        self.text.and_then(|text| attribute(text, tag, name))
    }

    /// Attribute `name` of the first `tag`, parsed as `i64`.
    ///
    /// # Errors
    ///
    /// [`Error::NotANumber`](crate::Error::NotANumber) if the attribute is
    /// present but not an integer.
    pub fn get_attribute_i64(&self, tag: &str, name: &str) -> Result<Option<i64>> {
        parse_number(name, self.get_attribute(tag, name))
    }

    /// Attribute `name` of the first tag in this fragment.
    ///
    /// Pairs with [`get_tag`](Self::get_tag):
    ///
    /// ```rust
    /// use tagslice::Slicer;
    ///
    /// let page = "<div><img alt=\"a\"/></div><div><img src=\"b.gif\"/></div>";
    /// let src = Slicer::cut(page).get_tags("div")[1].get_tag("img").attribute("src");
    /// assert_eq!(src, Some("b.gif"));
    /// ```
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.text.and_then(|text| first_tag_attribute(text, name))
    }

    fn narrow(&self, tag: &str, mode: Mode) -> Self {
        Self {
            text: self
                .text
                .and_then(|text| locate(text, tag, 0, mode))
                .and_then(|m| m.text),
        }
    }
}

impl fmt::Display for Slicer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.unwrap_or_default())
    }
}

/// Lazy iterator of slicers over repeated tags.
#[derive(Debug)]
pub struct Slices<'a>(Tags<'a>);

impl<'a> Iterator for Slices<'a> {
    type Item = Slicer<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|m| Slicer { text: m.text })
    }
}

impl std::iter::FusedIterator for Slices<'_> {}

/// Slicers for repeated tags, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlicerList<'a> {
    slices: Vec<Slicer<'a>>,
}

impl<'a> SlicerList<'a> {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { slices: Vec::new() }
    }

    /// Append a slicer.
    pub fn push(&mut self, slicer: Slicer<'a>) {
        self.slices.push(slicer);
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// The slicer at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Slicer<'a>> {
        self.slices.get(index).copied()
    }

    /// Iterate over the slicers.
    pub fn iter(&self) -> std::slice::Iter<'_, Slicer<'a>> {
        self.slices.iter()
    }

    /// The slicers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Slicer<'a>] {
        &self.slices
    }

    /// Every fragment as an owned string; absent slicers become `""`.
    #[must_use]
    pub fn as_strings(&self) -> Vec<String> {
        self.slices.iter().map(ToString::to_string).collect()
    }
}

impl<'a> std::ops::Index<usize> for SlicerList<'a> {
    type Output = Slicer<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slices[index]
    }
}

impl<'a> FromIterator<Slicer<'a>> for SlicerList<'a> {
    fn from_iter<I: IntoIterator<Item = Slicer<'a>>>(iter: I) -> Self {
        Self {
            slices: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for SlicerList<'a> {
    type Item = Slicer<'a>;
    type IntoIter = std::vec::IntoIter<Slicer<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.into_iter()
    }
}

impl<'a, 'l> IntoIterator for &'l SlicerList<'a> {
    type Item = &'l Slicer<'a>;
    type IntoIter = std::slice::Iter<'l, Slicer<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}
