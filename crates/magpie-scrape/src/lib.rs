//! Extraction combinators and the scrape driver.
//!
//! This crate is the user-facing surface of the Magpie engine. A scraper
//! is an ordinary function `&TagSpec -> Option<T>`: the primitives here
//! ([`text`], [`attr`], [`html`], …) are such functions partially applied
//! to a selector, and the structural combinators ([`chroot`], [`chroots`],
//! [`in_serial`]) take closures for their inner scrapers. Composition is
//! plain Rust (`?` for sequencing, [`Option::or_else`] for alternatives)
//! rather than a combinator DSL.
//!
//! The one failure mode is absence: every primitive reports a missing
//! value as `None` and nothing in the engine panics on malformed input.
//! `Some("")` and `Some(vec![])` are meaningful results, distinct from
//! `None`.
//!
//! ```
//! use magpie_scrape::{chroots, position, scrape, text};
//! use magpie_select::{any, nested, tag};
//!
//! let links = scrape("<ul><li>a</li><li>b</li></ul>", |doc| {
//!     chroots(doc, &nested(tag("ul"), tag("li")), |item| {
//!         Some((position(item), text(item, &any())?))
//!     })
//! });
//! assert_eq!(links, Some(vec![(0, "a".to_string()), (1, "b".to_string())]));
//! ```

/// Extraction primitives and structural combinators.
pub mod scraper;
/// Serial (zipper-based) sibling navigation.
pub mod serial;

use magpie_html::{Token, tokenize};

pub use magpie_dom::{SelectContext, TagSpec};
pub use scraper::{
    attr, attrs, chroot, chroots, html, htmls, inner_html, inner_htmls, matches, position,
    satisfies, text, texts,
};
pub use serial::{SpecZipper, in_serial};

/// Parse an HTML source string into a queryable document.
///
/// Tokenizes, drops text runs that are entirely ASCII whitespace
/// (indentation between tags carries no extractable content and would
/// otherwise clutter serial navigation), annotates tag pairings, and
/// builds the containment forest.
#[must_use]
pub fn parse(source: &str) -> TagSpec {
    let tokens = tokenize(source)
        .into_iter()
        .filter(|token| match token {
            Token::Text { text } => !text.chars().all(|c| c.is_ascii_whitespace()),
            _ => true,
        })
        .collect();
    TagSpec::from_tokens(tokens)
}

/// Parse a source string and run a scraper over it.
///
/// The result is the scraper's: `None` means the document did not contain
/// what the scraper was looking for.
pub fn scrape<T>(source: &str, scraper: impl FnOnce(&TagSpec) -> Option<T>) -> Option<T> {
    scraper(&parse(source))
}
