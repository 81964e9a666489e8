//! Document model for the Magpie scraping engine.
//!
//! A scraped document is not a DOM: mutation, namespaces, and tree repair
//! for rendering are all beside the point. What extraction needs is the
//! original token stream, kept intact, plus an index that says which
//! region of it each element covers. This crate builds that index:
//!
//! 1. [`annotate_tags`] pairs each opening tag with its closing tag and
//!    records the distance between them.
//! 2. [`from_tag_info`] folds the annotated stream into a forest of
//!    [`TagSpan`] regions encoding containment, reshaping spans that
//!    escape their parent (malformed HTML) into siblings.
//! 3. [`TagSpec`] bundles a view of that forest with a shared, immutable
//!    slice of the token vector — the working document that selection
//!    narrows and extraction reads.
//!
//! # Design
//!
//! Node identity is positional: a [`TagSpan`] is a `(start, end)` index
//! pair into the token vector, so narrowing a document never copies
//! tokens, only re-slices a reference-counted buffer ([`TagSlice`]).
//! All tree algorithms run on explicit stacks; pathological nesting depth
//! is bounded by available memory, not the call stack.

/// Opening/closing tag pairing over the raw token stream.
pub mod annotate;
/// Containment forest construction and normalization.
pub mod forest;
/// The working document: context, forest view, shared tokens.
pub mod spec;

pub use annotate::{TagInfo, annotate_tags};
pub use forest::{TagForest, TagSpan, TagTree, fix_forest, from_tag_info};
pub use spec::{SelectContext, TagSlice, TagSpec};
