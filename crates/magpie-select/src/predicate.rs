//! Attribute predicates.
//!
//! A predicate is a pure function over an opening tag's full attribute
//! list. All the stock constructors quantify existentially ("some
//! attribute satisfies the condition"), which is how selection over
//! unordered attribute soup behaves everywhere else in the ecosystem.
//!
//! Comparison rules are fixed: attribute keys compare case-insensitively,
//! values case-sensitively. `has_class` is the one exception on keys: it
//! looks for the literal key `class`.

use std::fmt;
use std::rc::Rc;

use magpie_html::Attribute;
use regex::Regex;

/// A predicate over an opening tag's attributes.
///
/// Clonable and cheap to copy: the closure lives behind a reference
/// count, so selectors holding predicates can be duplicated freely while
/// a selection narrows a document.
#[derive(Clone)]
pub struct AttributePredicate {
    check: Rc<dyn Fn(&[Attribute]) -> bool>,
}

impl AttributePredicate {
    /// Wrap an arbitrary check over the attribute list.
    pub fn new(check: impl Fn(&[Attribute]) -> bool + 'static) -> Self {
        Self {
            check: Rc::new(check),
        }
    }

    /// Evaluate the predicate.
    #[must_use]
    pub fn matches(&self, attributes: &[Attribute]) -> bool {
        (self.check)(attributes)
    }
}

impl fmt::Debug for AttributePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AttributePredicate(..)")
    }
}

impl PartialEq for AttributePredicate {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.check, &other.check)
    }
}

/// Some attribute has this key (case-insensitive) and exactly this value.
#[must_use]
pub fn attribute(key: &str, value: &str) -> AttributePredicate {
    let key = key.to_string();
    let value = value.to_string();
    AttributePredicate::new(move |attributes| {
        attributes
            .iter()
            .any(|attr| attr.name.eq_ignore_ascii_case(&key) && attr.value == value)
    })
}

/// Some attribute, regardless of key, has exactly this value.
#[must_use]
pub fn any_attribute(value: &str) -> AttributePredicate {
    let value = value.to_string();
    AttributePredicate::new(move |attributes| attributes.iter().any(|attr| attr.value == value))
}

/// Some attribute has this key (case-insensitive) and a value the regex
/// matches. The match is unanchored; anchor with `^…$` for exactness.
#[must_use]
pub fn attribute_regex(key: &str, regex: Regex) -> AttributePredicate {
    let key = key.to_string();
    AttributePredicate::new(move |attributes| {
        attributes
            .iter()
            .any(|attr| attr.name.eq_ignore_ascii_case(&key) && regex.is_match(&attr.value))
    })
}

/// Some attribute, regardless of key, has a value the regex matches.
#[must_use]
pub fn any_attribute_regex(regex: Regex) -> AttributePredicate {
    AttributePredicate::new(move |attributes| {
        attributes.iter().any(|attr| regex.is_match(&attr.value))
    })
}

/// The `class` attribute (exact key) contains this name as a plain
/// substring.
#[must_use]
pub fn has_class(class: &str) -> AttributePredicate {
    let class = class.to_string();
    AttributePredicate::new(move |attributes| {
        attributes
            .iter()
            .any(|attr| attr.name == "class" && attr.value.contains(&class))
    })
}

/// Some attribute's `(key, value)` pair satisfies an arbitrary check.
pub fn attr_satisfies(check: impl Fn(&str, &str) -> bool + 'static) -> AttributePredicate {
    AttributePredicate::new(move |attributes| {
        attributes
            .iter()
            .any(|attr| check(&attr.name, &attr.value))
    })
}
