//! Selector values and constructors.
//!
//! A selector is an ordered chain of selection steps stored
//! **innermost-first**: `nested(parent, child)` appends the parent's
//! steps after the child's. The engine walks the chain from the other
//! end, matching the outermost step at the top of the forest and
//! descending one step per matched region.

use crate::predicate::AttributePredicate;

/// How one selection step decides whether a node is a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// An opening tag with this name (case-insensitive) whose attributes
    /// satisfy every predicate.
    One {
        /// The required tag name.
        name: String,
        /// Predicates over the tag's attribute list.
        predicates: Vec<AttributePredicate>,
    },
    /// Any opening tag whose attributes satisfy every predicate; with no
    /// predicates at all, text nodes qualify too.
    Any {
        /// Predicates over the tag's attribute list.
        predicates: Vec<AttributePredicate>,
    },
    /// A text node.
    Text,
}

/// Positional constraints on one selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectSettings {
    /// When set, the step only matches at exactly this depth below the
    /// previous match (0 = the previous match's own level).
    pub depth: Option<usize>,
}

impl SelectSettings {
    /// No constraints: match at any depth.
    #[must_use]
    pub const fn any() -> Self {
        Self { depth: None }
    }

    /// Constrain to an exact depth.
    #[must_use]
    pub const fn at_depth(depth: usize) -> Self {
        Self { depth: Some(depth) }
    }
}

/// One step of a selector chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The node condition.
    pub strategy: Strategy,
    /// The positional condition.
    pub settings: SelectSettings,
}

impl Selection {
    /// A step with default settings.
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            settings: SelectSettings::any(),
        }
    }
}

/// A chain of selection steps, innermost-first.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub(crate) selections: Vec<Selection>,
}

impl Selector {
    fn single(strategy: Strategy) -> Self {
        Self {
            selections: vec![Selection::new(strategy)],
        }
    }

    /// The selection steps, innermost-first.
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Constrain the outermost step of this selector to an exact depth
    /// relative to its parent match.
    ///
    /// `tag("b").at_depth(1)` matches `<b>` elements that are direct
    /// children of the enclosing match; depth counting survives malformed
    /// nesting because hoisted siblings are counted through the same
    /// lifted view the matcher searches.
    #[must_use]
    pub fn at_depth(mut self, depth: usize) -> Self {
        if let Some(outermost) = self.selections.last_mut() {
            outermost.settings = SelectSettings::at_depth(depth);
        }
        self
    }

    /// `child.within(parent)` is [`nested`]`(parent, child)`.
    #[must_use]
    pub fn within(self, parent: Selector) -> Self {
        nested(parent, self)
    }
}

/// Select opening tags by name, e.g. `tag("a")` for every `<a>` element.
#[must_use]
pub fn tag(name: &str) -> Selector {
    Selector::single(Strategy::One {
        name: name.to_string(),
        predicates: Vec::new(),
    })
}

/// Select opening tags by name with attribute predicates.
#[must_use]
pub fn tag_with(name: &str, predicates: Vec<AttributePredicate>) -> Selector {
    Selector::single(Strategy::One {
        name: name.to_string(),
        predicates,
    })
}

/// Select any element (and, because there is nothing to test attributes
/// against, any text node).
#[must_use]
pub fn any() -> Selector {
    Selector::single(Strategy::Any {
        predicates: Vec::new(),
    })
}

/// Select any element whose attributes satisfy every predicate.
#[must_use]
pub fn any_with(predicates: Vec<AttributePredicate>) -> Selector {
    Selector::single(Strategy::Any { predicates })
}

/// Select text nodes.
#[must_use]
pub fn text_node() -> Selector {
    Selector::single(Strategy::Text)
}

/// Select regions matching `child` anywhere inside regions matching
/// `parent`.
///
/// Concatenates the chains innermost-first: the child's steps keep their
/// settings, and the combined selector matches child regions nested (at
/// any depth, unless constrained) below parent matches.
#[must_use]
pub fn nested(parent: Selector, child: Selector) -> Selector {
    let mut selections = child.selections;
    selections.extend(parent.selections);
    Selector { selections }
}
