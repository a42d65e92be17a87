//! Tag location by direct substring scanning.
//!
//! No tokenizer and no tree: a lookup searches for two literal needles and
//! slices the text between them.
//!
//! ## Needles
//!
//! For a tag named `forest`:
//!
//! ```text
//! opening prefix:  "<forest"     (followed by '>', ' ' or '/')
//! closing needle:  "</forest>"
//! ```
//!
//! The opening prefix has no `>` because the tag may carry attributes or be
//! self-closed. A prefix hit followed by anything other than `>`, space or `/`
//! belongs to a different tag (`<forestx>`) and is skipped.
//!
//! ## Nesting
//!
//! The same name can recur inside its own body:
//!
//! ```text
//! <a> <a>x</a> </a>
//! ^   ^      ^    ^
//! |   depth 2 |    depth 0: match ends here
//! depth 1     depth 1
//! ```
//!
//! Every `<a` opening (that is not self-closed) seen before the next `</a>`
//! raises the depth; every `</a>` lowers it. The match ends when the depth
//! returns to zero.
//!
//! This is still substring scanning. Text content that literally contains
//! `<a>` or `<a ` (say, inside an unescaped attribute value or CDATA) is
//! counted as a real opening and will push the match end further out.
//!
//! ## Offsets
//!
//! All offsets are byte offsets into the scanned `&str`. For any match,
//! `&text[m.start..m.end]` is the full markup of the tag, whichever
//! [`Mode`] was requested.

use std::iter::FusedIterator;

use memchr::{memchr, memmem};

/// What a lookup returns for a tag with a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Only the text between the opening and closing tags, trimmed.
    #[default]
    Content,
    /// The entire tag, delimiters and attributes included, untrimmed.
    Markup,
}

/// One located tag.
///
/// ```rust
/// use tagslice::{locate, Mode};
///
/// let text = "<list><item id=\"1\"> one </item></list>";
/// let m = locate(text, "item", 0, Mode::Content).unwrap();
///
/// assert_eq!(m.text, Some("one"));
/// assert_eq!(&text[m.start..m.end], "<item id=\"1\"> one </item>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Trimmed content or full markup, depending on the [`Mode`].
    ///
    /// `None` for a self-closed tag looked up in [`Mode::Content`].
    pub text: Option<&'a str>,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>` (exclusive).
    pub end: usize,
    /// Whether the tag was written as `<name/>` or `<name .../>`.
    pub self_closed: bool,
}

impl TagMatch<'_> {
    /// The byte span of the full tag markup.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Where an opening tag ends.
enum Opening {
    /// `<name/>` or `<name attr="x"/>`; `end` is past the final `>`.
    SelfClosed { end: usize },
    /// `<name ...>`; `body_start` is past its `>`.
    Body { body_start: usize },
}

/// Precompiled needles for one tag name.
#[derive(Debug, Clone)]
pub(crate) struct Needles {
    open: memmem::Finder<'static>,
    close: memmem::Finder<'static>,
}

impl Needles {
    /// Build needles for `tag`, or `None` for an empty name.
    pub(crate) fn new(tag: &str) -> Option<Self> {
        if tag.is_empty() {
            return None;
        }
        Some(Self {
            open: memmem::Finder::new(format!("<{tag}").as_bytes()).into_owned(),
            close: memmem::Finder::new(format!("</{tag}>").as_bytes()).into_owned(),
        })
    }

    pub(crate) fn open_len(&self) -> usize {
        self.open.needle().len()
    }

    fn close_len(&self) -> usize {
        self.close.needle().len()
    }

    /// Next opening prefix in `from..limit` that is followed by a valid
    /// boundary byte. Returns its offset and the boundary byte.
    pub(crate) fn find_opening(&self, text: &str, from: usize, limit: usize) -> Option<(usize, u8)> {
        let bytes = text.as_bytes();
        let mut from = from;
        loop {
            let at = from + self.open.find(bytes.get(from..limit)?)?;
            match bytes.get(at + self.open_len()) {
                Some(&b) if is_boundary(b) => return Some((at, b)),
                Some(_) => from = at + 1,
                None => return None,
            }
        }
    }

    /// Classify the opening tag that starts at `at`.
    fn opening(&self, text: &str, at: usize, boundary: u8) -> Option<Opening> {
        let bytes = text.as_bytes();
        let after = at + self.open_len();

        if boundary == b'/' {
            // `<name/` must be followed directly by `>`
            return (bytes.get(after + 1) == Some(&b'>'))
                .then_some(Opening::SelfClosed { end: after + 2 });
        }

        let gt = after + memchr(b'>', &bytes[after..])?;
        if bytes[gt - 1] == b'/' {
            Some(Opening::SelfClosed { end: gt + 1 })
        } else {
            Some(Opening::Body { body_start: gt + 1 })
        }
    }

    /// Offset of the closing needle that balances a body starting at
    /// `body_start`.
    fn matching_close(&self, text: &str, body_start: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        let mut depth = 1usize;
        let mut pos = body_start;

        loop {
            let close = pos + self.close.find(bytes.get(pos..)?)?;
            match self.find_opening(text, pos, close) {
                Some((at, boundary)) => match self.opening(text, at, boundary)? {
                    Opening::SelfClosed { end } => pos = end,
                    Opening::Body { body_start } => {
                        depth += 1;
                        pos = body_start;
                    }
                },
                None => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(close);
                    }
                    pos = close + self.close_len();
                }
            }
        }
    }

    /// Locate the first tag at or after `from`.
    pub(crate) fn locate<'a>(&self, text: &'a str, from: usize, mode: Mode) -> Option<TagMatch<'a>> {
        let (start, boundary) = self.find_opening(text, from, text.len())?;

        match self.opening(text, start, boundary)? {
            Opening::SelfClosed { end } => Some(TagMatch {
                text: match mode {
                    Mode::Content => None,
                    Mode::Markup => Some(&text[start..end]),
                },
                start,
                end,
                self_closed: true,
            }),
            Opening::Body { body_start } => {
                let close = self.matching_close(text, body_start)?;
                let end = close + self.close_len();
                let found = match mode {
                    Mode::Content => text[body_start..close].trim(),
                    Mode::Markup => &text[start..end],
                };
                Some(TagMatch {
                    text: Some(found),
                    start,
                    end,
                    self_closed: false,
                })
            }
        }
    }
}

/// Bytes that may follow `<name` in a real `name` tag.
fn is_boundary(b: u8) -> bool {
    matches!(b, b'>' | b' ' | b'/')
}

/// Locate the first `tag` at or after byte offset `from`.
///
/// Returns `None` when there is no such tag, or when the markup is too
/// broken to find where it ends (no `>`, no balancing closing tag). A
/// self-closed tag is found even in [`Mode::Content`]; its `text` is `None`.
///
/// ```rust
/// use tagslice::{locate, Mode};
///
/// let text = "<a><a>x</a></a>";
/// let outer = locate(text, "a", 0, Mode::Content).unwrap();
/// assert_eq!(outer.text, Some("<a>x</a>"));
///
/// let empty = locate("<t/>", "t", 0, Mode::Content).unwrap();
/// assert_eq!(empty.text, None);
/// assert_eq!(locate("<t/>", "t", 0, Mode::Markup).unwrap().text, Some("<t/>"));
/// ```
pub fn locate<'a>(text: &'a str, tag: &str, from: usize, mode: Mode) -> Option<TagMatch<'a>> {
    Needles::new(tag)?.locate(text, from, mode)
}

/// Resumable scan position for walking sibling tags of one name.
///
/// A cursor starts at offset 0 and moves past each tag it finds. Once a
/// lookup fails the cursor is exhausted and stays exhausted.
///
/// ```rust
/// use tagslice::{Cursor, Mode};
///
/// let text = "<b>1</b><b>2</b>";
/// let mut cursor = Cursor::new();
///
/// assert_eq!(cursor.advance(text, "b", Mode::Content).unwrap().text, Some("1"));
/// assert_eq!(cursor.advance(text, "b", Mode::Content).unwrap().text, Some("2"));
/// assert!(cursor.advance(text, "b", Mode::Content).is_none());
/// assert!(cursor.is_exhausted());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: usize,
    exhausted: bool,
}

impl Cursor {
    /// A cursor at the start of the text.
    #[must_use]
    pub const fn new() -> Self {
        Self::at(0)
    }

    /// A cursor at byte offset `position`.
    #[must_use]
    pub const fn at(position: usize) -> Self {
        Self {
            position,
            exhausted: false,
        }
    }

    /// Where the next lookup starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether a lookup has already come back empty.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Locate the next `tag` and move past it.
    pub fn advance<'a>(&mut self, text: &'a str, tag: &str, mode: Mode) -> Option<TagMatch<'a>> {
        match Needles::new(tag) {
            Some(needles) => self.step(&needles, text, mode),
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    fn step<'a>(&mut self, needles: &Needles, text: &'a str, mode: Mode) -> Option<TagMatch<'a>> {
        if self.exhausted {
            return None;
        }
        let found = needles.locate(text, self.position, mode);
        match &found {
            Some(m) => self.position = m.end,
            None => self.exhausted = true,
        }
        found
    }
}

/// Lazy iterator over every `tag` in a text, in document order.
///
/// Created by [`tags`]. Sibling tags are visited once each; tags nested
/// inside a visited tag are part of its match and are not visited again.
#[derive(Debug)]
pub struct Tags<'a> {
    text: &'a str,
    needles: Option<Needles>,
    cursor: Cursor,
    mode: Mode,
}

impl<'a> Iterator for Tags<'a> {
    type Item = TagMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let needles = self.needles.as_ref()?;
        self.cursor.step(needles, self.text, self.mode)
    }
}

impl FusedIterator for Tags<'_> {}

/// Iterate over every `tag` in `text`.
///
/// ```rust
/// use tagslice::{tags, Mode};
///
/// let birds = "<birds><bird>pigeon</bird><bird>crow</bird></birds>";
/// let names: Vec<_> = tags(birds, "bird", Mode::Content)
///     .filter_map(|m| m.text)
///     .collect();
///
/// assert_eq!(names, ["pigeon", "crow"]);
/// ```
pub fn tags<'a>(text: &'a str, tag: &str, mode: Mode) -> Tags<'a> {
    Tags {
        text,
        needles: Needles::new(tag),
        cursor: Cursor::new(),
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOREST: &str = "<data type=\"raw\" id=\"1\">\
        <tree1>\
        <forest>\
        \x20  <another>\
        \x20      <forest one='134'><forest>\
        \x20          <tree ok='true'>oak</tree>\
        \x20      </forest></forest>\
        \x20          </another>\
        \x20          </forest>\
        \x20          </tree1>\
        \x20      </data>";

    fn content<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
        locate(text, tag, 0, Mode::Content).and_then(|m| m.text)
    }

    #[test]
    fn test_simple_value() {
        assert_eq!(content("<a>b</a>", "a"), Some("b"));
    }

    #[test]
    fn test_value_is_trimmed() {
        assert_eq!(content("<a b=\"z\">\nc\n</a>\n", "a"), Some("c"));
    }

    #[test]
    fn test_attribute_named_like_tag() {
        assert_eq!(content("<a a=\"a\">a</a>", "a"), Some("a"));
    }

    #[test]
    fn test_self_closed() {
        let m = locate("<dummy/>", "dummy", 0, Mode::Content).unwrap();
        assert_eq!(m.text, None);
        assert!(m.self_closed);
        assert_eq!(m.span(), 0..8);

        let m = locate("<dummy/>", "dummy", 0, Mode::Markup).unwrap();
        assert_eq!(m.text, Some("<dummy/>"));
    }

    #[test]
    fn test_self_closed_with_attributes() {
        let text = "<r><x attr=\"val\"/></r>";
        let m = locate(text, "x", 0, Mode::Markup).unwrap();
        assert_eq!(m.text, Some("<x attr=\"val\"/>"));
        assert_eq!(&text[m.span()], "<x attr=\"val\"/>");
        assert_eq!(locate(text, "x", 0, Mode::Content).unwrap().text, None);
    }

    #[test]
    fn test_nested_same_name() {
        assert_eq!(content("<a><a>x</a></a>", "a"), Some("<a>x</a>"));
        let m = locate("<a><a>x</a></a>", "a", 0, Mode::Markup).unwrap();
        assert_eq!(m.text, Some("<a><a>x</a></a>"));
    }

    #[test]
    fn test_nested_self_closed_does_not_deepen() {
        assert_eq!(content("<a><a/>x</a><a>y</a>", "a"), Some("<a/>x"));
    }

    #[test]
    fn test_prefix_of_longer_name_skipped() {
        let text = "<forestx>no</forestx><forest>yes</forest>";
        assert_eq!(content(text, "forest"), Some("yes"));
    }

    #[test]
    fn test_deep_nesting() {
        let first = content(FOREST, "forest").unwrap();
        let compact: String = first.split_whitespace().collect();
        assert!(compact.starts_with("<another>"));
        assert!(compact.ends_with("</another>"));
        assert_eq!(content(first, "tree"), Some("oak"));
    }

    #[test]
    fn test_markup_span_invariant() {
        for mode in [Mode::Content, Mode::Markup] {
            let m = locate(FOREST, "forest", 0, mode).unwrap();
            let span = &FOREST[m.span()];
            assert!(span.starts_with("<forest>"));
            assert!(span.ends_with("</forest>"));
        }
    }

    #[test]
    fn test_missing_tag() {
        assert_eq!(locate("<a>b</a>", "c", 0, Mode::Content), None);
        assert_eq!(locate("", "c", 0, Mode::Content), None);
        assert_eq!(locate("<a>b</a>", "", 0, Mode::Content), None);
    }

    #[test]
    fn test_malformed_is_not_found() {
        // no closing tag
        assert_eq!(locate("<a>b", "a", 0, Mode::Content), None);
        // opening never terminated
        assert_eq!(locate("<a attr=\"x\"", "a", 0, Mode::Content), None);
        // prefix at end of text
        assert_eq!(locate("text <a", "a", 0, Mode::Content), None);
        // `/` not followed by `>`
        assert_eq!(locate("<a/ >", "a", 0, Mode::Content), None);
        // nested opening never closed
        assert_eq!(locate("<a><a>x</a>", "a", 0, Mode::Content), None);
    }

    #[test]
    fn test_start_offset() {
        let text = "<b>1</b><b>2</b>";
        assert_eq!(locate(text, "b", 1, Mode::Content).unwrap().text, Some("2"));
        assert_eq!(locate(text, "b", text.len() + 5, Mode::Content), None);
    }

    #[test]
    fn test_cursor_walks_siblings() {
        let text = "<b>1</b> <b x='y'>2</b> <b/>";
        let mut cursor = Cursor::new();

        let first = cursor.advance(text, "b", Mode::Content).unwrap();
        assert_eq!(first.text, Some("1"));
        assert_eq!(cursor.position(), first.end);

        assert_eq!(cursor.advance(text, "b", Mode::Content).unwrap().text, Some("2"));

        let last = cursor.advance(text, "b", Mode::Content).unwrap();
        assert!(last.self_closed);
        assert_eq!(cursor.position(), text.len());

        assert!(cursor.advance(text, "b", Mode::Content).is_none());
        assert!(cursor.is_exhausted());
        // stays exhausted even if asked from the start again
        assert!(cursor.advance("<b>z</b>", "b", Mode::Content).is_none());
    }

    #[test]
    fn test_cursor_resumes_mid_document() {
        let text = "<b>1</b><b>2</b><b>3</b>";
        let second = text.find("<b>2").unwrap();

        let mut cursor = Cursor::at(second);
        assert_eq!(cursor.position(), second);
        assert_eq!(cursor.advance(text, "b", Mode::Content).unwrap().text, Some("2"));
        assert_eq!(cursor.advance(text, "b", Mode::Content).unwrap().text, Some("3"));
        assert!(cursor.advance(text, "b", Mode::Content).is_none());

        let mut past_end = Cursor::at(text.len() + 10);
        assert!(past_end.advance(text, "b", Mode::Content).is_none());
        assert!(past_end.is_exhausted());
    }

    #[test]
    fn test_malformed_first_stops_search() {
        // a broken `<a/ ` ends the search; a later valid `<a>` is not reached
        assert_eq!(content("<a/ ><a>x</a>", "a"), None);
        assert_eq!(tags("<a/ ><a>x</a>", "a", Mode::Markup).count(), 0);
    }

    #[test]
    fn test_tags_iterator_skips_nested() {
        let text = "<i>1<i>inner</i></i><i>2</i>";
        let found: Vec<_> = tags(text, "i", Mode::Content).filter_map(|m| m.text).collect();
        assert_eq!(found, ["1<i>inner</i>", "2"]);
    }

    #[test]
    fn test_tags_iterator_is_fused() {
        let mut it = tags("<i>1</i>", "i", Mode::Markup);
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_literal_opening_in_text_is_counted() {
        // known limitation: `<a ` inside text reads as a nested opening
        let text = "<a>1 <a b</a>tail</a>";
        assert_eq!(content(text, "a"), None);
    }

    #[test]
    fn test_multibyte_content() {
        let text = "<p>日本語</p>";
        let m = locate(text, "p", 0, Mode::Content).unwrap();
        assert_eq!(m.text, Some("日本語"));
        assert_eq!(m.end, text.len());
    }
}
