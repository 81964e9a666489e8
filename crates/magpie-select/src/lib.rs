//! Selector algebra and match engine for the Magpie scraping engine.
//!
//! A [`Selector`] names a family of regions in a document: a chain of
//! selection steps, each pairing a strategy (a tag name with attribute
//! predicates, any tag, or a text node) with an optional exact-depth
//! requirement. [`select`] evaluates a selector against a
//! [`TagSpec`](magpie_dom::TagSpec) and returns one narrowed spec per
//! matching region, in document order.
//!
//! Matching is deliberately forgiving about document structure (the
//! engine recovers descendants that cross-closed HTML pushed out of their
//! parent) and deliberately exact about comparison rules: tag names and
//! attribute keys compare case-insensitively, attribute values
//! case-sensitively.

/// Match verdicts and per-node evaluation.
pub mod matching;
/// Attribute predicates.
pub mod predicate;
/// The selection engine.
pub mod select;
/// Selector values and constructors.
pub mod selector;
/// The selector string syntax.
pub mod syntax;

pub use matching::MatchResult;
pub use predicate::{
    AttributePredicate, any_attribute, any_attribute_regex, attr_satisfies, attribute,
    attribute_regex, has_class,
};
pub use select::select;
pub use selector::{Selection, Selector, Strategy, any, any_with, nested, tag, tag_with, text_node};
pub use syntax::{SelectorSyntaxError, parse_selector};
