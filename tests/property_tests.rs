//! Property-based tests for tag location and building.
//!
//! These tests verify the invariants the scanner and builder rely on:
//! - Round-trip: content written into a tag is found again
//! - Span: `text[start..end]` is always the full tag markup
//! - Iteration: sibling tags are visited once each, in order
//! - Balance: the builder closes exactly what it opened, innermost first

use proptest::prelude::*;
use tagslice::{attribute, locate, tag_value, tags, Builder, BuilderConfig, Mode, TagMatch};

// =============================================================================
// Test Generators
// =============================================================================

/// A plausible tag or attribute name
fn name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,8}").unwrap()
}

/// Text content with no markup characters
fn content() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 .,!?\n\t]{0,40}").unwrap()
}

/// An attribute value that needs no escaping inside double quotes
fn attr_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 ._:/-]{0,20}").unwrap()
}

fn compact() -> Builder {
    Builder::with_config(BuilderConfig::new())
}

// =============================================================================
// Invariant Helpers
// =============================================================================

/// Check that a match's span is the full markup of `tag`
fn span_is_markup(m: &TagMatch<'_>, text: &str, tag: &str) -> bool {
    let span = &text[m.start..m.end];
    let opens = span.starts_with(&format!("<{tag}"));
    let closes = if m.self_closed {
        span.ends_with("/>")
    } else {
        span.ends_with(&format!("</{tag}>"))
    };
    opens && closes
}

/// Check that matches are in order and do not overlap
fn matches_ordered(found: &[TagMatch<'_>]) -> bool {
    found.windows(2).all(|w| w[0].end <= w[1].start)
}

// =============================================================================
// Locate Tests
// =============================================================================

proptest! {
    #[test]
    fn value_round_trips(tag in name(), body in content()) {
        let text = format!("<{tag}>{body}</{tag}>");
        prop_assert_eq!(tag_value(&text, &tag), Some(body.trim()));
    }

    #[test]
    fn self_closed_has_no_content(tag in name(), prefix in content()) {
        let text = format!("{prefix}<{tag}/>");
        let m = locate(&text, &tag, 0, Mode::Content).unwrap();
        prop_assert_eq!(m.text, None);
        let markup = format!("<{tag}/>");
        let m = locate(&text, &tag, 0, Mode::Markup).unwrap();
        prop_assert_eq!(m.text, Some(markup.as_str()));
    }

    #[test]
    fn nested_same_name_kept_whole(tag in name(), body in content(), depth in 1usize..5) {
        let mut text = body.clone();
        for _ in 0..depth {
            text = format!("<{tag}>{text}</{tag}>");
        }
        let inner = locate(&text, &tag, 0, Mode::Content).unwrap();
        let mut expected = body.clone();
        for _ in 1..depth {
            expected = format!("<{tag}>{expected}</{tag}>");
        }
        prop_assert_eq!(inner.text, Some(expected.trim()));
        prop_assert_eq!(inner.span(), 0..text.len());
    }

    #[test]
    fn siblings_visited_in_order(
        tag in name(),
        bodies in prop::collection::vec(content(), 0..8),
        gap in "[ \n]{0,3}",
    ) {
        let text: String = bodies
            .iter()
            .map(|b| format!("<{tag}>{b}</{tag}>{gap}"))
            .collect();

        for mode in [Mode::Content, Mode::Markup] {
            let found: Vec<_> = tags(&text, &tag, mode).collect();
            prop_assert_eq!(found.len(), bodies.len());
            prop_assert!(matches_ordered(&found));
            for m in &found {
                prop_assert!(span_is_markup(m, &text, &tag));
            }
        }

        let values: Vec<_> = tags(&text, &tag, Mode::Content).filter_map(|m| m.text).collect();
        let expected: Vec<_> = bodies.iter().map(|b| b.trim()).collect();
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn longer_names_never_match(tag in name(), suffix in "[a-z]{1,3}", body in content()) {
        let text = format!("<{tag}{suffix}>{body}</{tag}{suffix}>");
        prop_assert_eq!(locate(&text, &tag, 0, Mode::Content), None);
    }
}

// =============================================================================
// Builder Tests
// =============================================================================

proptest! {
    #[test]
    fn built_value_is_located(tag in name(), body in content()) {
        let mut b = compact();
        b.open_tag(&tag).unwrap().with_value(&body).unwrap();
        let xml = b.render(true).unwrap();
        prop_assert_eq!(tag_value(&xml, &tag), Some(body.trim()));
    }

    #[test]
    fn built_attribute_is_located(tag in name(), attr in name(), value in attr_value()) {
        let mut b = compact();
        b.open_tag(&tag).unwrap().with_attribute(&attr, &value).unwrap();
        let xml = b.render(true).unwrap();
        prop_assert_eq!(attribute(&xml, &tag, &attr), Some(value.as_str()));
    }

    #[test]
    fn open_then_close_is_self_closed(tag in name()) {
        let mut b = compact();
        b.open_tag(&tag).unwrap().close_tag().unwrap();
        prop_assert_eq!(b.render(false).unwrap(), format!("<{tag}/>"));
    }

    #[test]
    fn close_all_closes_in_reverse(names in prop::collection::vec(name(), 1..8)) {
        let mut b = compact();
        for n in &names {
            b.open_tag(n).unwrap();
        }
        b.with_value("x").unwrap();
        prop_assert_eq!(b.depth(), names.len());

        b.close_all_tags().unwrap();
        prop_assert_eq!(b.depth(), 0);

        let opens: String = names.iter().map(|n| format!("<{n}>")).collect();
        let closes: String = names.iter().rev().map(|n| format!("</{n}>")).collect();
        prop_assert_eq!(b.render(false).unwrap(), format!("{opens}x{closes}"));
    }

    #[test]
    fn pretty_output_locates_like_compact(names in prop::collection::vec(name(), 1..5), body in content()) {
        // unique names, so the innermost tag is not nested in a namesake
        let names: Vec<_> = names.iter().enumerate().map(|(i, n)| format!("{n}{i}")).collect();
        let mut pretty = Builder::with_config(BuilderConfig::new().with_pretty(true));
        for n in &names {
            pretty.open_tag(n).unwrap();
        }
        pretty.with_value(&body).unwrap();
        let xml = pretty.render(true).unwrap();

        let innermost = &names[names.len() - 1];
        let found = tags(&xml, innermost, Mode::Content).last().and_then(|m| m.text);
        prop_assert_eq!(found, Some(body.trim()));
    }
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn empty_input_finds_nothing() {
    assert_eq!(locate("", "a", 0, Mode::Content), None);
    assert_eq!(tags("", "a", Mode::Markup).count(), 0);
    assert_eq!(attribute("", "a", "b"), None);
}

#[test]
fn lookups_are_deterministic() {
    let text = "<a x='1'>one</a><a x='2'>two</a>";
    let first: Vec<_> = tags(text, "a", Mode::Markup).collect();
    let second: Vec<_> = tags(text, "a", Mode::Markup).collect();
    assert_eq!(first, second);
}
