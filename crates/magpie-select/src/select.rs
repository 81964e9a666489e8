//! The selection engine.
//!
//! [`select`] walks a spec's forest against a selector chain and emits one
//! narrowed spec per matched region, in document order (a DFS pre-order:
//! a match precedes matches inside it, which precede matches in its later
//! siblings).
//!
//! Two things make the walk more than a textbook DFS:
//!
//! - **Sibling lifting.** After normalization, a region that cross-closed
//!   out of its parent sits *next to* that parent while its span still
//!   falls inside the parent's. When a non-terminal step matches the
//!   parent, such siblings are lifted into the inner search (and into the
//!   depth-counting root) so the descendants the markup intended are still
//!   found.
//! - **Culling.** The depth check reports when a subtree is already too
//!   deep to ever satisfy an exact-depth step; the walk drops it without
//!   descending.
//!
//! The traversal runs on an explicit work stack: selector evaluation over
//! pathologically deep documents is bounded by heap, not call stack.

use std::rc::Rc;

use magpie_dom::{SelectContext, TagSpan, TagSpec, TagTree};

use crate::matching::{MatchResult, node_matches};
use crate::selector::{Selection, Selector};

/// One unit of traversal work.
enum Work<'t> {
    /// Scan `trees[index..]` against `chain[step]`, depth-relative to
    /// `root`.
    Scan {
        trees: Rc<Vec<&'t TagTree>>,
        index: usize,
        step: usize,
        root: Rc<Vec<&'t TagTree>>,
    },
    /// Emit the narrowed spec for a fully matched node.
    Emit { node: &'t TagTree },
}

/// Evaluate a selector against a spec.
///
/// Returns the matched regions as narrowed specs: each has a single-tree
/// hierarchy recentred to start at 0, a token view sliced to the region
/// (`start..=end`), and a fresh context `{ position: i, in_chroot: true }`
/// numbering the matches in emission order.
#[must_use]
pub fn select(spec: &TagSpec, selector: &Selector) -> Vec<TagSpec> {
    // The chain is stored innermost-first; the walk consumes it
    // outermost-first.
    let chain: Vec<&Selection> = selector.selections.iter().rev().collect();
    if chain.is_empty() {
        return Vec::new();
    }

    let roots: Rc<Vec<&TagTree>> = Rc::new(spec.hierarchy.iter().collect());
    let mut work = vec![Work::Scan {
        trees: Rc::clone(&roots),
        index: 0,
        step: 0,
        root: roots,
    }];
    let mut out: Vec<TagSpec> = Vec::new();

    while let Some(item) = work.pop() {
        match item {
            Work::Emit { node } => out.push(shrink_spec(spec, node)),
            Work::Scan {
                trees,
                index,
                step,
                root,
            } => {
                let Some(&node) = trees.get(index) else {
                    continue;
                };
                let verdict = node_matches(
                    chain[step],
                    &spec.tags[node.span.start],
                    node.span,
                    &root,
                );
                let terminal = step + 1 == chain.len();

                // Work is LIFO: continuations are pushed in reverse of the
                // order their results must appear in.
                match (verdict, terminal) {
                    // A terminal match emits this node, then searches its
                    // subtree for further matches, then its later siblings.
                    (MatchResult::Match, true) => {
                        work.push(Work::Scan {
                            trees: Rc::clone(&trees),
                            index: index + 1,
                            step,
                            root: Rc::clone(&root),
                        });
                        work.push(Work::Scan {
                            trees: Rc::new(node.children.iter().collect()),
                            index: 0,
                            step,
                            root,
                        });
                        work.push(Work::Emit { node });
                    }
                    // A non-terminal match descends into the node's
                    // children, plus any later siblings whose spans this
                    // node engulfs, with the next step, re-rooting depth
                    // counting at the lifted view; the sibling scan keeps
                    // the full chain.
                    (MatchResult::Match, false) => {
                        let lifted = lift_siblings(&trees[index + 1..], node.span);
                        let mut inner: Vec<&TagTree> = node.children.iter().collect();
                        inner.extend(lifted.iter().copied());
                        let mut inner_root = lifted;
                        inner_root.push(node);

                        work.push(Work::Scan {
                            trees: Rc::clone(&trees),
                            index: index + 1,
                            step,
                            root,
                        });
                        work.push(Work::Scan {
                            trees: Rc::new(inner),
                            index: 0,
                            step: step + 1,
                            root: Rc::new(inner_root),
                        });
                    }
                    // A failed node is transparent: the same step searches
                    // its children and its later siblings.
                    (MatchResult::Fail, _) => {
                        work.push(Work::Scan {
                            trees: Rc::clone(&trees),
                            index: index + 1,
                            step,
                            root: Rc::clone(&root),
                        });
                        work.push(Work::Scan {
                            trees: Rc::new(node.children.iter().collect()),
                            index: 0,
                            step,
                            root,
                        });
                    }
                    // A culled subtree is dropped wholesale.
                    (MatchResult::Cull, _) => {
                        work.push(Work::Scan {
                            trees,
                            index: index + 1,
                            step,
                            root,
                        });
                    }
                }
            }
        }
    }

    out.into_iter()
        .enumerate()
        .map(|(position, mut narrowed)| {
            narrowed.context = SelectContext::selected(position);
            narrowed
        })
        .collect()
}

/// Collect later siblings (or their descendants) whose spans fall
/// strictly inside `bound`.
///
/// A sibling strictly inside is lifted whole. A sibling that overlaps the
/// bound without fitting inside it (its span crosses the bound's end)
/// is not itself liftable, but its children may be; the walk descends.
/// Disjoint siblings end the overlap region but are cheap to skip.
fn lift_siblings<'t>(siblings: &[&'t TagTree], bound: TagSpan) -> Vec<&'t TagTree> {
    let mut lifted = Vec::new();
    let mut stack: Vec<&'t TagTree> = siblings.iter().rev().copied().collect();
    while let Some(tree) = stack.pop() {
        if bound.strictly_contains(tree.span) {
            lifted.push(tree);
        } else if !bound.is_disjoint_from(tree.span) {
            for child in tree.children.iter().rev() {
                stack.push(child);
            }
        }
    }
    lifted
}

/// Narrow a spec to one matched node: recentre the node's spans so its
/// start becomes 0 and slice the token view to `start..=end`. The caller
/// re-numbers the context afterwards.
fn shrink_spec(spec: &TagSpec, node: &TagTree) -> TagSpec {
    let delta = node.span.start;
    let recentered = node.shifted_left(delta);
    let tags = spec.tags.slice(node.span.start..node.span.end + 1);
    TagSpec::new(spec.context, vec![recentered], tags)
}
