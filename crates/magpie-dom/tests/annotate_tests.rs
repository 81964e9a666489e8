//! Integration tests for tag annotation.

use magpie_dom::annotate_tags;
use magpie_html::{Token, tokenize};

fn open(name: &str) -> Token {
    Token::open(name.to_string(), Vec::new())
}

fn close(name: &str) -> Token {
    Token::close(name.to_string())
}

fn text(t: &str) -> Token {
    Token::text(t.to_string())
}

#[test]
fn test_annotation_preserves_length_and_order() {
    let tokens = tokenize("<a><b>1</b></a><!--c--><br>");
    let infos = annotate_tags(tokens.clone());
    assert_eq!(infos.len(), tokens.len());
    let round_tripped: Vec<Token> = infos.into_iter().map(|info| info.token).collect();
    assert_eq!(round_tripped, tokens);
}

#[test]
fn test_offsets_point_at_same_name_closers() {
    let tokens = tokenize("<a><b>1</b>2</a>");
    let infos = annotate_tags(tokens);
    for (i, info) in infos.iter().enumerate() {
        if let Some(offset) = info.close_offset {
            assert!(offset > 0, "offset must be strictly positive");
            let closer = &infos[i + offset].token;
            assert!(closer.is_close());
            assert_eq!(closer.tag_name(), info.token.tag_name());
        }
    }
}

#[test]
fn test_simple_document() {
    // <a> <b> 1 </b> 2 </a>
    let infos = annotate_tags(vec![
        open("a"),
        open("b"),
        text("1"),
        close("b"),
        text("2"),
        close("a"),
    ]);
    assert_eq!(infos[0].close_offset, Some(5));
    assert_eq!(infos[1].close_offset, Some(2));
    assert_eq!(infos[2].close_offset, None);
    assert_eq!(infos[3].close_offset, None);
}

#[test]
fn test_cross_closed_tags_still_pair_by_name() {
    // <a> <b> </a> </b> — each close matches its own name.
    let infos = annotate_tags(vec![open("a"), open("b"), close("a"), close("b")]);
    assert_eq!(infos[0].close_offset, Some(2));
    assert_eq!(infos[1].close_offset, Some(2));
}

#[test]
fn test_unclosed_and_unopened_tags_carry_no_offset() {
    let infos = annotate_tags(vec![open("a"), close("b"), open("c")]);
    assert!(infos.iter().all(|info| info.close_offset.is_none()));
}

#[test]
fn test_repeated_name_uses_stack_discipline() {
    // <ul><li>x<li>y</li></ul> — the one </li> closes the nearest <li>.
    let infos = annotate_tags(vec![
        open("ul"),
        open("li"),
        text("x"),
        open("li"),
        text("y"),
        close("li"),
        close("ul"),
    ]);
    assert_eq!(infos[1].close_offset, None);
    assert_eq!(infos[3].close_offset, Some(2));
    assert_eq!(infos[0].close_offset, Some(6));
}

#[test]
fn test_comments_and_text_are_passthrough() {
    let infos = annotate_tags(vec![text("x"), Token::comment("c".to_string())]);
    assert_eq!(infos[0].close_offset, None);
    assert_eq!(infos[1].close_offset, None);
}
