//! Integration tests for forest construction and normalization.

use magpie_dom::{TagForest, TagSpan, TagTree, annotate_tags, fix_forest, from_tag_info};
use magpie_html::tokenize;

/// Helper to build the forest for an HTML snippet
fn forest(html: &str) -> TagForest {
    from_tag_info(&annotate_tags(tokenize(html)))
}

/// Helper to collect (start, end) pairs of a forest's roots
fn root_spans(forest: &TagForest) -> Vec<(usize, usize)> {
    forest
        .iter()
        .map(|tree| (tree.span.start, tree.span.end))
        .collect()
}

/// Walk a forest (explicit stack) asserting the structural invariants:
/// span sanity, parent containment, sibling ordering.
fn assert_invariants(forest: &TagForest) {
    let mut stack: Vec<(&TagForest, Option<TagSpan>)> = vec![(forest, None)];
    while let Some((siblings, parent)) = stack.pop() {
        let mut previous_start: Option<usize> = None;
        for tree in siblings {
            assert!(tree.span.start <= tree.span.end, "span is increasing");
            if let Some(p) = parent {
                assert!(p.start < tree.span.start, "child opens after parent");
                assert!(tree.span.end <= p.end, "child ends within parent");
            }
            if let Some(prev) = previous_start {
                assert!(prev < tree.span.start, "siblings are ordered by start");
            }
            previous_start = Some(tree.span.start);
            stack.push((&tree.children, Some(tree.span)));
        }
    }
}

#[test]
fn test_single_element() {
    let forest = forest("<a>1</a>");
    // <a>=0 1=1 </a>=2
    assert_eq!(root_spans(&forest), vec![(0, 2)]);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].span, TagSpan::new(1, 1));
}

#[test]
fn test_siblings_in_document_order() {
    let forest = forest("<a>1</a><a>2</a><a>3</a>");
    assert_eq!(root_spans(&forest), vec![(0, 2), (3, 5), (6, 8)]);
    assert_invariants(&forest);
}

#[test]
fn test_nesting() {
    let forest = forest("<a><b>1</b><b>2</b></a>");
    // <a>=0 <b>=1 1=2 </b>=3 <b>=4 2=5 </b>=6 </a>=7
    assert_eq!(root_spans(&forest), vec![(0, 7)]);
    let a = &forest[0];
    assert_eq!(a.children.len(), 2);
    assert_eq!(a.children[0].span, TagSpan::new(1, 3));
    assert_eq!(a.children[1].span, TagSpan::new(4, 6));
    assert_invariants(&forest);
}

#[test]
fn test_unclosed_tag_is_degenerate() {
    let forest = forest("<p><br>x</p>");
    // <p>=0 <br>=1 x=2 </p>=3
    let p = &forest[0];
    assert_eq!(p.span, TagSpan::new(0, 3));
    assert_eq!(p.children[0].span, TagSpan::new(1, 1));
    assert_eq!(p.children[1].span, TagSpan::new(2, 2));
    assert_invariants(&forest);
}

#[test]
fn test_comments_and_bare_closers_own_no_span() {
    let forest = forest("<!--c--><a>1</a></b>");
    // tokens: <!--c-->=0 <a>=1 1=2 </a>=3 </b>=4
    assert_eq!(root_spans(&forest), vec![(1, 3)]);
}

#[test]
fn test_text_outside_any_element_is_a_root() {
    let forest = forest("x<a>1</a>y");
    assert_eq!(root_spans(&forest), vec![(0, 0), (1, 3), (4, 4)]);
}

#[test]
fn test_cross_closing_hoists_the_escaping_span() {
    // <a><b><c><d>2</d></b></c></a>
    // tokens: <a>=0 <b>=1 <c>=2 <d>=3 2=4 </d>=5 </b>=6 </c>=7 </a>=8
    // <c> closes at 7, beyond </b> at 6: containment nests it under <b>,
    // normalization hoists it to <b>'s sibling.
    let forest = forest("<a><b><c><d>2</d></b></c></a>");
    assert_eq!(root_spans(&forest), vec![(0, 8)]);
    let a = &forest[0];
    assert_eq!(
        a.children
            .iter()
            .map(|t| (t.span.start, t.span.end))
            .collect::<Vec<_>>(),
        vec![(1, 6), (2, 7)]
    );
    // <d> stays inside the hoisted <c>.
    let c = &a.children[1];
    assert_eq!(c.children.len(), 1);
    assert_eq!(c.children[0].span, TagSpan::new(3, 5));
}

#[test]
fn test_hoisting_cascades_multiple_levels() {
    // <x><y><z>…</y></x> with z closing past both y and x.
    // tokens: <x>=0 <y>=1 <z>=2 t=3 </y>=4 </x>=5 </z>=6
    let forest = forest("<x><y><z>t</y></x></z>");
    // z spans (2,6): escapes y (1,4) and x (0,5), ending as a root sibling.
    assert_eq!(root_spans(&forest), vec![(0, 5), (2, 6)]);
    let x = &forest[0];
    assert_eq!(root_spans(&x.children), vec![(1, 4)]);
}

#[test]
fn test_fix_forest_is_identity_on_well_formed_input() {
    let built = forest("<a><b>1</b><c>2</c></a><d>3</d>");
    let refixed = fix_forest(built.clone());
    assert_eq!(built, refixed);
}

#[test]
fn test_fix_forest_on_hand_built_escape() {
    // Parent (0,4) holding a child (1,6) that outlives it.
    let raw = vec![TagTree::new(
        TagSpan::new(0, 4),
        vec![
            TagTree::leaf(TagSpan::new(1, 6)),
            TagTree::leaf(TagSpan::new(2, 3)),
        ],
    )];
    let fixed = fix_forest(raw);
    assert_eq!(root_spans(&fixed), vec![(0, 4), (1, 6)]);
    assert_eq!(root_spans(&fixed[0].children), vec![(2, 3)]);
}

#[test]
fn test_shifted_left_recenters_all_spans() {
    let tree = TagTree::new(
        TagSpan::new(3, 9),
        vec![TagTree::new(
            TagSpan::new(4, 6),
            vec![TagTree::leaf(TagSpan::new(5, 5))],
        )],
    );
    let shifted = tree.shifted_left(3);
    assert_eq!(shifted.span, TagSpan::new(0, 6));
    assert_eq!(shifted.children[0].span, TagSpan::new(1, 3));
    assert_eq!(shifted.children[0].children[0].span, TagSpan::new(2, 2));
}

#[test]
fn test_invariants_on_assorted_malformed_inputs() {
    let inputs = [
        "<a><b>1</a></b>",
        "</a></b><c>",
        "<a><a><a>1</a>",
        "<ul><li>x<li>y<li>z</ul>",
        "<a><b><c><d>2</d></b></c></a>",
        "<x><y><z>t</y></x></z>",
        "text only",
        "",
    ];
    for input in inputs {
        assert_invariants(&forest(input));
    }
}

#[test]
fn test_depth_ten_thousand_builds_without_overflow() {
    let depth = 10_000;
    let html = format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let forest = forest(&html);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].span, TagSpan::new(0, 2 * depth - 1));

    let mut level = &forest[0];
    let mut measured = 1;
    while let Some(child) = level.children.first() {
        measured += 1;
        level = child;
    }
    assert_eq!(measured, depth);
}
