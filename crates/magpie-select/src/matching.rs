//! Match verdicts and per-node evaluation.
//!
//! A node match is three-valued, not boolean, because the engine needs to
//! distinguish "not this node, keep looking" from "nothing below here can
//! ever match". The latter — [`MatchResult::Cull`] — is produced by the
//! depth check once a candidate is already deeper than an exact-depth
//! constraint allows, and it prunes the whole subtree from the search.

use magpie_dom::{TagInfo, TagSpan, TagTree};
use magpie_html::Token;

use crate::selector::{SelectSettings, Selection, Strategy};

/// The verdict of matching one selection step against one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The node satisfies the step.
    Match,
    /// The node does not satisfy the step; descendants still might.
    Fail,
    /// Neither the node nor any descendant can satisfy the step.
    Cull,
}

impl MatchResult {
    /// Combine two verdicts: `Cull` dominates, both-`Match` is `Match`,
    /// everything else is `Fail`.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Cull, _) | (_, Self::Cull) => Self::Cull,
            (Self::Match, Self::Match) => Self::Match,
            _ => Self::Fail,
        }
    }

    /// Lift a boolean condition into a verdict.
    #[must_use]
    pub const fn from_bool(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Fail }
    }
}

/// Evaluate one selection step against the node whose region starts at
/// `info`, combining the positional check (against `root`, the forest the
/// current search is rooted in) with the strategy check.
pub(crate) fn node_matches(
    selection: &Selection,
    info: &TagInfo,
    span: TagSpan,
    root: &[&TagTree],
) -> MatchResult {
    check_settings(selection.settings, span, root)
        .combine(check_strategy(&selection.strategy, &info.token))
}

/// The strategy check: does this token satisfy the step's node condition?
pub(crate) fn check_strategy(strategy: &Strategy, token: &Token) -> MatchResult {
    match strategy {
        Strategy::One { name, predicates } => match token {
            Token::TagOpen {
                name: tag_name,
                attributes,
            } if tag_name.eq_ignore_ascii_case(name)
                && predicates.iter().all(|p| p.matches(attributes)) =>
            {
                MatchResult::Match
            }
            _ => MatchResult::Fail,
        },
        Strategy::Any { predicates } => match token {
            Token::TagOpen { attributes, .. }
                if predicates.iter().all(|p| p.matches(attributes)) =>
            {
                MatchResult::Match
            }
            Token::Text { .. } if predicates.is_empty() => MatchResult::Match,
            _ => MatchResult::Fail,
        },
        Strategy::Text => MatchResult::from_bool(token.is_text()),
    }
}

/// The positional check.
///
/// With no depth constraint every position is fine. With one, the node's
/// depth below the search root decides: too shallow is a plain `Fail`
/// (descendants sit deeper and may still match), too deep is `Cull`
/// (descendants sit deeper still and never can).
pub(crate) fn check_settings(
    settings: SelectSettings,
    span: TagSpan,
    root: &[&TagTree],
) -> MatchResult {
    let Some(required) = settings.depth else {
        return MatchResult::Match;
    };
    let current = depth_within(root, span);
    if current < required {
        MatchResult::Fail
    } else if current > required {
        MatchResult::Cull
    } else {
        MatchResult::Match
    }
}

/// Count the ancestors of `span` in the given forest: the nodes whose
/// regions strictly contain it.
///
/// Within one tree, containment nests, so at most one chain of nodes
/// qualifies and the walk is a simple descent. Across root trees the
/// chains must be summed: the search root can hold a lifted subtree
/// alongside the node whose span engulfs it, and a candidate inside the
/// lifted subtree has ancestors in both.
fn depth_within(root: &[&TagTree], span: TagSpan) -> usize {
    let mut depth = 0;
    for tree in root {
        let mut node: &TagTree = tree;
        if !node.span.strictly_contains(span) {
            continue;
        }
        depth += 1;
        while let Some(child) = node
            .children
            .iter()
            .find(|child| child.span.strictly_contains(span))
        {
            depth += 1;
            node = child;
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{any, tag, text_node};
    use magpie_html::Attribute;

    fn open(name: &str, attrs: &[(&str, &str)]) -> Token {
        Token::open(
            name.to_string(),
            attrs
                .iter()
                .map(|(k, v)| Attribute::new((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn combine_propagates_cull_eagerly() {
        use MatchResult::{Cull, Fail, Match};
        assert_eq!(Cull.combine(Match), Cull);
        assert_eq!(Fail.combine(Cull), Cull);
        assert_eq!(Match.combine(Match), Match);
        assert_eq!(Match.combine(Fail), Fail);
        assert_eq!(Fail.combine(Fail), Fail);
    }

    #[test]
    fn strategy_one_is_case_insensitive_on_names() {
        let sel = tag("DIV");
        let strategy = &sel.selections()[0].strategy;
        assert_eq!(check_strategy(strategy, &open("div", &[])), MatchResult::Match);
        assert_eq!(check_strategy(strategy, &open("span", &[])), MatchResult::Fail);
    }

    #[test]
    fn strategy_any_accepts_text_only_without_predicates() {
        let bare = any();
        let text = Token::text("x".to_string());
        assert_eq!(
            check_strategy(&bare.selections()[0].strategy, &text),
            MatchResult::Match
        );

        let with_preds = crate::any_with(vec![crate::any_attribute("v")]);
        assert_eq!(
            check_strategy(&with_preds.selections()[0].strategy, &text),
            MatchResult::Fail
        );
        assert_eq!(
            check_strategy(
                &with_preds.selections()[0].strategy,
                &open("a", &[("k", "v")])
            ),
            MatchResult::Match
        );
    }

    #[test]
    fn strategy_text_matches_only_text() {
        let sel = text_node();
        let strategy = &sel.selections()[0].strategy;
        assert_eq!(
            check_strategy(strategy, &Token::text("x".to_string())),
            MatchResult::Match
        );
        assert_eq!(check_strategy(strategy, &open("a", &[])), MatchResult::Fail);
        assert_eq!(
            check_strategy(strategy, &Token::comment("c".to_string())),
            MatchResult::Fail
        );
    }

    #[test]
    fn depth_check_fails_shallow_and_culls_deep() {
        // root: (0,9) > (1,8) > (2,7)
        let tree = TagTree::new(
            TagSpan::new(0, 9),
            vec![TagTree::new(
                TagSpan::new(1, 8),
                vec![TagTree::leaf(TagSpan::new(2, 7))],
            )],
        );
        let root = vec![&tree];
        let at = |d| SelectSettings::at_depth(d);

        // (1,8) sits at depth 1.
        assert_eq!(check_settings(at(1), TagSpan::new(1, 8), &root), MatchResult::Match);
        assert_eq!(check_settings(at(2), TagSpan::new(1, 8), &root), MatchResult::Fail);
        // (2,7) sits at depth 2.
        assert_eq!(check_settings(at(1), TagSpan::new(2, 7), &root), MatchResult::Cull);
        assert_eq!(check_settings(at(2), TagSpan::new(2, 7), &root), MatchResult::Match);
        // The root itself sits at depth 0.
        assert_eq!(check_settings(at(0), TagSpan::new(0, 9), &root), MatchResult::Match);
    }
}
