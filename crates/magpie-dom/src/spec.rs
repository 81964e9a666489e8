//! The working document: a forest view over shared tokens.
//!
//! Selection and chroot produce new documents constantly — one per match —
//! so narrowing has to be cheap. A [`TagSpec`] therefore owns only its
//! context and forest view; the annotated token vector lives behind a
//! reference count and is re-sliced, never copied.

use std::fmt;
use std::ops::{Deref, Range};
use std::rc::Rc;

use crate::annotate::{TagInfo, annotate_tags};
use crate::forest::{TagForest, from_tag_info};
use magpie_html::Token;

/// A cheap, immutable view into a shared annotated token vector.
///
/// Cloning and subslicing are O(1): both reference the same backing
/// buffer. The buffer is immutable once built, which is what lets every
/// spec produced by selection share it safely.
#[derive(Clone)]
pub struct TagSlice {
    buf: Rc<[TagInfo]>,
    start: usize,
    len: usize,
}

impl TagSlice {
    /// Take ownership of an annotated vector as a full-range slice.
    #[must_use]
    pub fn new(infos: Vec<TagInfo>) -> Self {
        let len = infos.len();
        Self {
            buf: Rc::from(infos),
            start: 0,
            len,
        }
    }

    /// Number of tokens in this view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the view covers no tokens.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Re-slice this view. `range` is relative to the view, not the
    /// backing buffer, and must lie within it.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or decreasing.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(range.start <= range.end, "decreasing slice range");
        assert!(range.end <= self.len, "slice range out of bounds");
        Self {
            buf: Rc::clone(&self.buf),
            start: self.start + range.start,
            len: range.end - range.start,
        }
    }

    /// The tokens of this view as a plain slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TagInfo] {
        &self.buf[self.start..self.start + self.len]
    }
}

impl Deref for TagSlice {
    type Target = [TagInfo];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl fmt::Debug for TagSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Where a spec came from.
///
/// `position` is the 0-based ordinal assigned when a batch selection
/// (`chroots`) produced this spec; `in_chroot` is set once a spec has been
/// narrowed to a selected region, which changes how serial navigation
/// roots its zipper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectContext {
    /// Ordinal among the specs emitted by the producing selection.
    pub position: usize,
    /// True once the spec is a narrowed view rather than a whole document.
    pub in_chroot: bool,
}

impl SelectContext {
    /// The context of a freshly parsed, un-narrowed document.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            position: 0,
            in_chroot: false,
        }
    }

    /// The context assigned to the `position`-th spec emitted by a
    /// selection.
    #[must_use]
    pub const fn selected(position: usize) -> Self {
        Self {
            position,
            in_chroot: true,
        }
    }
}

/// The working document: context, forest view, and shared token vector.
///
/// The forest shrinks as selection narrows the document; `tags` is only
/// ever re-sliced. Spans in `hierarchy` index into `tags` (view-relative:
/// a narrowed spec's root span starts at 0).
#[derive(Debug, Clone)]
pub struct TagSpec {
    /// Provenance of this view.
    pub context: SelectContext,
    /// The forest of regions currently visible.
    pub hierarchy: TagForest,
    /// The annotated tokens the spans index into.
    pub tags: TagSlice,
}

impl TagSpec {
    /// Assemble a spec from parts. Used by the selection engine when it
    /// narrows a document.
    #[must_use]
    pub const fn new(context: SelectContext, hierarchy: TagForest, tags: TagSlice) -> Self {
        Self {
            context,
            hierarchy,
            tags,
        }
    }

    /// Build the initial spec for a token stream: annotate, build the
    /// forest, wrap with the root context.
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let tags = TagSlice::new(annotate_tags(tokens));
        let hierarchy = from_tag_info(&tags);
        Self {
            context: SelectContext::root(),
            hierarchy,
            tags,
        }
    }

    /// Render the forest as an indented outline, one node per line with
    /// its token and span. A debugging aid for inspecting what the
    /// builder made of a messy page.
    #[must_use]
    pub fn outline(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let mut stack: Vec<(&crate::forest::TagTree, usize)> =
            self.hierarchy.iter().rev().map(|tree| (tree, 0)).collect();
        while let Some((tree, depth)) = stack.pop() {
            let label = match &self.tags[tree.span.start].token {
                Token::TagOpen { name, .. } => format!("<{name}>"),
                Token::Text { text } => {
                    let mut preview: String = text.chars().take(24).collect();
                    if preview.len() < text.len() {
                        preview.push('\u{2026}');
                    }
                    format!("{preview:?}")
                }
                other => other.to_string(),
            };
            let _ = writeln!(
                out,
                "{:indent$}{label} [{}..{}]",
                "",
                tree.span.start,
                tree.span.end,
                indent = depth * 2
            );
            for child in tree.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}
