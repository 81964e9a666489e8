//! The containment forest over an annotated token vector.
//!
//! Every tag worth nesting (opening tags and text runs; never comments or
//! bare closing tags) owns a [`TagSpan`] — the index region of the token
//! vector it covers. Spans nest by containment, giving an ordered forest
//! that selection walks instead of a pointer-linked DOM.
//!
//! Structural invariants of a normalized forest:
//! 1. Sibling order matches token order by `start`.
//! 2. A child's span sits inside its parent's: `p.start < c.start` and
//!    `c.end <= p.end`.
//! 3. Root-level and normalized siblings do not overlap.
//! 4. [`fix_forest`] has hoisted every span that outlives its nominal
//!    parent up to the parent's sibling position.
//!
//! Invariant 4 is what absorbs cross-closed HTML like
//! `<a><b><c></c><a></b>`: the containment pass nests `<c>` under `<b>`
//! because that is where it opened, and the fix pass hoists it back out
//! because its region runs past `</b>`.

use magpie_html::Token;

use crate::annotate::TagInfo;

/// A closed region `start..=end` of the annotated token vector.
///
/// An opening tag with no matching close gets the degenerate span
/// `end == start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan {
    /// Index of the opening token.
    pub start: usize,
    /// Index of the matching closing token, or `start` when unmatched.
    pub end: usize,
}

impl TagSpan {
    /// Create a span. `start <= end` must hold.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True when `other` sits strictly inside this span: this span's
    /// endpoints surround it on both sides.
    #[must_use]
    pub const fn strictly_contains(&self, other: Self) -> bool {
        self.start < other.start && other.end < self.end
    }

    /// True when the two spans share no indices.
    #[must_use]
    pub const fn is_disjoint_from(&self, other: Self) -> bool {
        self.end < other.start || other.end < self.start
    }
}

/// A node of the containment forest: a span and the spans nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTree {
    /// The region this node covers.
    pub span: TagSpan,
    /// Nested regions, in document order.
    pub children: Vec<TagTree>,
}

impl TagTree {
    /// Create a leaf node.
    #[must_use]
    pub const fn leaf(span: TagSpan) -> Self {
        Self {
            span,
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    #[must_use]
    pub const fn new(span: TagSpan, children: Vec<TagTree>) -> Self {
        Self { span, children }
    }

    /// Deep-copy this tree with every span shifted left by `delta`, so the
    /// root's `start` becomes `start - delta`. Used when a selected node is
    /// re-rooted over a sliced token view.
    ///
    /// Runs on an explicit stack; nesting depth does not consume call
    /// stack.
    #[must_use]
    pub fn shifted_left(&self, delta: usize) -> TagTree {
        struct Frame<'t> {
            span: TagSpan,
            pending: std::slice::Iter<'t, TagTree>,
            done: Vec<TagTree>,
        }

        let mut stack = vec![Frame {
            span: self.span,
            pending: self.children.iter(),
            done: Vec::with_capacity(self.children.len()),
        }];

        loop {
            let top = stack.last_mut().expect("shift stack never empties early");
            if let Some(child) = top.pending.next() {
                stack.push(Frame {
                    span: child.span,
                    pending: child.children.iter(),
                    done: Vec::with_capacity(child.children.len()),
                });
                continue;
            }
            let frame = stack.pop().expect("frame just observed");
            let shifted = TagTree::new(
                TagSpan::new(frame.span.start - delta, frame.span.end - delta),
                frame.done,
            );
            match stack.last_mut() {
                Some(parent) => parent.done.push(shifted),
                None => return shifted,
            }
        }
    }
}

/// An ordered forest of [`TagTree`]s.
pub type TagForest = Vec<TagTree>;

/// Build the normalized containment forest for an annotated stream.
///
/// Containment first (every span nests under the innermost span open at
/// its index), then [`fix_forest`] to hoist spans that escape their
/// parent. Comments and bare closing tags never produce nodes.
#[must_use]
pub fn from_tag_info(tags: &[TagInfo]) -> TagForest {
    fix_forest(build_containment(tags))
}

/// The containment pass.
///
/// Walks the stream once with a stack of currently-open regions. A node
/// opening at index `i` becomes a child of the innermost region whose end
/// has not been passed; regions are finalized as soon as the walk moves
/// beyond their end index.
fn build_containment(tags: &[TagInfo]) -> TagForest {
    struct Open {
        span: TagSpan,
        children: Vec<TagTree>,
    }

    fn finalize(stack: &mut Vec<Open>, roots: &mut TagForest) {
        let open = stack.pop().expect("caller checked the stack is non-empty");
        let tree = TagTree::new(open.span, open.children);
        match stack.last_mut() {
            Some(parent) => parent.children.push(tree),
            None => roots.push(tree),
        }
    }

    let mut roots: TagForest = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    for (i, info) in tags.iter().enumerate() {
        // Not worth nesting: closing tags are span endpoints, comments are
        // noise.
        if matches!(
            info.token,
            Token::TagClose { .. } | Token::Comment { .. }
        ) {
            continue;
        }

        while stack.last().is_some_and(|open| open.span.end < i) {
            finalize(&mut stack, &mut roots);
        }

        let end = i + info.close_offset.unwrap_or(0);
        stack.push(Open {
            span: TagSpan::new(i, end),
            children: Vec::new(),
        });
    }

    while !stack.is_empty() {
        finalize(&mut stack, &mut roots);
    }

    roots
}

/// The normalization pass.
///
/// A child whose span ends beyond its parent's end cannot be contained by
/// it; it is hoisted to the parent's sibling position, immediately after
/// the parent, preserving document order. Hoisting cascades: a span that
/// escapes several levels bubbles up through each partition until a parent
/// can hold it (or it reaches the roots).
#[must_use]
pub fn fix_forest(forest: TagForest) -> TagForest {
    let mut out: TagForest = Vec::with_capacity(forest.len());
    for tree in forest {
        fix_tree_into(tree, &mut out);
    }
    out
}

/// Fix one tree bottom-up, appending the fixed tree followed by any
/// children hoisted past it to `out`. Post-order via an explicit stack.
fn fix_tree_into(tree: TagTree, out: &mut TagForest) {
    struct Frame {
        span: TagSpan,
        pending: std::vec::IntoIter<TagTree>,
        done: Vec<TagTree>,
    }

    let mut stack = vec![Frame {
        span: tree.span,
        pending: tree.children.into_iter(),
        done: Vec::new(),
    }];

    loop {
        let top = stack.last_mut().expect("fix stack never empties early");
        if let Some(child) = top.pending.next() {
            stack.push(Frame {
                span: child.span,
                pending: child.children.into_iter(),
                done: Vec::new(),
            });
            continue;
        }

        let frame = stack.pop().expect("frame just observed");
        let mut kept = Vec::with_capacity(frame.done.len());
        let mut hoisted = Vec::new();
        for child in frame.done {
            if child.span.end <= frame.span.end {
                kept.push(child);
            } else {
                hoisted.push(child);
            }
        }
        let fixed = TagTree::new(frame.span, kept);

        match stack.last_mut() {
            Some(parent) => {
                parent.done.push(fixed);
                parent.done.extend(hoisted);
            }
            None => {
                out.push(fixed);
                out.extend(hoisted);
                return;
            }
        }
    }
}
