//! Extraction primitives and structural combinators.
//!
//! Every function here takes the document first and a selector second;
//! the singular forms read from the first matched region, the plural
//! forms from every matched region in document order. `chroot`/`chroots`
//! narrow the world to a matched region and hand it to a closure.

use magpie_dom::{TagInfo, TagSpec};
use magpie_select::{Selector, select};

/// Succeeds (with unit) when the selector matches anywhere in the
/// document.
#[must_use]
pub fn matches(spec: &TagSpec, selector: &Selector) -> Option<()> {
    if select(spec, selector).is_empty() {
        None
    } else {
        Some(())
    }
}

/// Alias for [`matches`], for call sites that read better as an
/// assertion.
#[must_use]
pub fn satisfies(spec: &TagSpec, selector: &Selector) -> Option<()> {
    matches(spec, selector)
}

/// The concatenated text content of the first matched region.
#[must_use]
pub fn text(spec: &TagSpec, selector: &Selector) -> Option<String> {
    select(spec, selector).first().map(text_of)
}

/// The concatenated text content of every matched region.
///
/// Never fails: no matches is `Some(vec![])`, not absence.
#[must_use]
pub fn texts(spec: &TagSpec, selector: &Selector) -> Option<Vec<String>> {
    Some(select(spec, selector).iter().map(text_of).collect())
}

/// The value of the named attribute (key compared case-insensitively) on
/// the first matched region's opening tag.
#[must_use]
pub fn attr(spec: &TagSpec, key: &str, selector: &Selector) -> Option<String> {
    select(spec, selector).first().and_then(|narrowed| attr_of(narrowed, key))
}

/// The named attribute gathered from each matched region: one value per
/// region that carries the attribute; regions without it are skipped.
#[must_use]
pub fn attrs(spec: &TagSpec, key: &str, selector: &Selector) -> Option<Vec<String>> {
    Some(
        select(spec, selector)
            .iter()
            .filter_map(|narrowed| attr_of(narrowed, key))
            .collect(),
    )
}

/// The first matched region re-serialized as HTML, opening and closing
/// tags included.
#[must_use]
pub fn html(spec: &TagSpec, selector: &Selector) -> Option<String> {
    select(spec, selector).first().map(|narrowed| render(&narrowed.tags))
}

/// Every matched region re-serialized as HTML.
#[must_use]
pub fn htmls(spec: &TagSpec, selector: &Selector) -> Option<Vec<String>> {
    Some(
        select(spec, selector)
            .iter()
            .map(|narrowed| render(&narrowed.tags))
            .collect(),
    )
}

/// The first matched region re-serialized without its outermost opening
/// and closing tokens. Regions shorter than two tokens (an unclosed tag,
/// a bare text node) have no inside and yield the empty string.
#[must_use]
pub fn inner_html(spec: &TagSpec, selector: &Selector) -> Option<String> {
    select(spec, selector).first().map(inner_of)
}

/// Every matched region re-serialized without its outermost tokens.
#[must_use]
pub fn inner_htmls(spec: &TagSpec, selector: &Selector) -> Option<Vec<String>> {
    Some(select(spec, selector).iter().map(inner_of).collect())
}

/// The ordinal this spec was given by the enclosing [`chroots`] (or
/// [`select`]): 0 for the first matched region, 1 for the second, and so
/// on. A never-narrowed document reports 0.
#[must_use]
pub fn position(spec: &TagSpec) -> usize {
    spec.context.position
}

/// Narrow the document to the first region the selector matches and run
/// the inner scraper there. Fails when nothing matches or the inner
/// scraper fails.
pub fn chroot<T>(
    spec: &TagSpec,
    selector: &Selector,
    inner: impl FnOnce(&TagSpec) -> Option<T>,
) -> Option<T> {
    select(spec, selector).first().and_then(inner)
}

/// Run the inner scraper once per matched region, in document order,
/// collecting the successful results.
///
/// Never fails: regions where the inner scraper returns `None` are
/// skipped, and no matches at all is `Some(vec![])`.
pub fn chroots<T>(
    spec: &TagSpec,
    selector: &Selector,
    mut inner: impl FnMut(&TagSpec) -> Option<T>,
) -> Option<Vec<T>> {
    Some(
        select(spec, selector)
            .iter()
            .filter_map(|narrowed| inner(narrowed))
            .collect(),
    )
}

/// Concatenate the text tokens of a narrowed spec's slice.
fn text_of(narrowed: &TagSpec) -> String {
    narrowed
        .tags
        .iter()
        .filter_map(|info| info.token.text_content())
        .collect()
}

/// The named attribute of the first opening tag in the slice.
fn attr_of(narrowed: &TagSpec, key: &str) -> Option<String> {
    narrowed
        .tags
        .iter()
        .find(|info| info.token.is_open())
        .and_then(|info| info.token.attribute(key))
        .map(str::to_string)
}

/// Re-serialize an annotated slice. Tokens render exactly as their
/// `Display` implementation writes them; the concatenation is the
/// region's HTML.
fn render(tags: &[TagInfo]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for info in tags {
        // Writing to a String cannot fail.
        let _ = write!(out, "{}", info.token);
    }
    out
}

/// Render a slice without its first and last token.
fn inner_of(narrowed: &TagSpec) -> String {
    let len = narrowed.tags.len();
    if len < 2 {
        return String::new();
    }
    render(&narrowed.tags[1..len - 1])
}
