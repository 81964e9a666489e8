//! Integration tests for the extraction primitives.

use magpie_scrape::{
    attr, attrs, chroot, chroots, html, htmls, inner_html, inner_htmls, matches, parse, position,
    satisfies, scrape, text, texts,
};
use magpie_select::{any, has_class, nested, tag, tag_with, text_node};

#[test]
fn test_text_takes_the_first_match() {
    let doc = parse("<a>1</a><a>2</a>");
    assert_eq!(text(&doc, &tag("a")), Some("1".to_string()));
}

#[test]
fn test_text_fails_on_no_match() {
    let doc = parse("<b>1</b>");
    assert_eq!(text(&doc, &tag("a")), None);
}

#[test]
fn test_text_concatenates_across_descendants() {
    let doc = parse("<a>1<b>2</b>3</a>");
    assert_eq!(text(&doc, &tag("a")), Some("123".to_string()));
}

#[test]
fn test_texts_never_fails() {
    let doc = parse("<b>1</b>");
    assert_eq!(texts(&doc, &tag("a")), Some(vec![]));
    assert_eq!(texts(&doc, &tag("b")), Some(vec!["1".to_string()]));
}

#[test]
fn test_attr_reads_the_first_match() {
    let doc = parse(r#"<a key="v">x</a><a key="w">y</a>"#);
    assert_eq!(attr(&doc, "key", &tag("a")), Some("v".to_string()));
    assert_eq!(attr(&doc, "KEY", &tag("a")), Some("v".to_string()));
    assert_eq!(attr(&doc, "missing", &tag("a")), None);
}

#[test]
fn test_attrs_skips_regions_without_the_attribute() {
    let doc = parse(r#"<a href="/1">x</a><a>y</a><a href="/3">z</a>"#);
    assert_eq!(
        attrs(&doc, "href", &tag("a")),
        Some(vec!["/1".to_string(), "/3".to_string()])
    );
}

#[test]
fn test_html_round_trips_the_region() {
    let doc = parse(r#"<a href="/x">1<b>2</b></a>"#);
    assert_eq!(
        html(&doc, &tag("a")),
        Some(r#"<a href="/x">1<b>2</b></a>"#.to_string())
    );
}

#[test]
fn test_html_renders_comments_and_attribute_order() {
    let doc = parse(r#"<p z="1" a="2"><!--note-->x</p>"#);
    assert_eq!(
        html(&doc, &tag("p")),
        Some(r#"<p z="1" a="2"><!--note-->x</p>"#.to_string())
    );
}

#[test]
fn test_htmls_in_document_order() {
    let doc = parse("<a>1</a><a>2</a>");
    assert_eq!(
        htmls(&doc, &tag("a")),
        Some(vec!["<a>1</a>".to_string(), "<a>2</a>".to_string()])
    );
}

#[test]
fn test_inner_html_drops_the_outer_tokens() {
    let doc = parse("<a>1<b>2</b></a>");
    assert_eq!(inner_html(&doc, &tag("a")), Some("1<b>2</b>".to_string()));
    assert_eq!(inner_html(&doc, &tag("b")), Some("2".to_string()));
}

#[test]
fn test_inner_html_of_empty_element_is_empty() {
    let doc = parse("<a></a>");
    assert_eq!(inner_html(&doc, &tag("a")), Some(String::new()));
}

#[test]
fn test_inner_html_of_degenerate_region_is_empty() {
    // <br> never closes: its region is the single opening token.
    let doc = parse("<p><br></p>");
    assert_eq!(inner_html(&doc, &tag("br")), Some(String::new()));
}

#[test]
fn test_inner_htmls() {
    let doc = parse("<a>1</a><a><b>2</b></a>");
    assert_eq!(
        inner_htmls(&doc, &tag("a")),
        Some(vec!["1".to_string(), "<b>2</b>".to_string()])
    );
}

#[test]
fn test_matches_and_satisfies() {
    let doc = parse("<a><b>1</b></a>");
    assert_eq!(matches(&doc, &nested(tag("a"), tag("b"))), Some(()));
    assert_eq!(matches(&doc, &tag("c")), None);
    assert_eq!(satisfies(&doc, &tag("a")), Some(()));
}

#[test]
fn test_chroot_narrows_to_the_first_match() {
    let doc = parse("<div><a>in</a></div><a>out</a>");
    let result = chroot(&doc, &tag("div"), |inner| text(inner, &tag("a")));
    assert_eq!(result, Some("in".to_string()));
}

#[test]
fn test_chroot_fails_when_selector_misses() {
    let doc = parse("<a>1</a>");
    let result = chroot(&doc, &tag("nope"), |inner| text(inner, &any()));
    assert_eq!(result, None);
}

#[test]
fn test_chroot_limits_visibility() {
    let doc = parse("<div><a>in</a></div><b>out</b>");
    let result = chroot(&doc, &tag("div"), |inner| text(inner, &tag("b")));
    assert_eq!(result, None);
}

#[test]
fn test_chroots_collects_successes_and_skips_failures() {
    let doc = parse(r#"<a href="/1">x</a><a>y</a>"#);
    let result = chroots(&doc, &tag("a"), |inner| attr(inner, "href", &tag("a")));
    assert_eq!(result, Some(vec!["/1".to_string()]));
}

#[test]
fn test_chroots_is_empty_list_not_failure_on_no_match() {
    let doc = parse("<b>1</b>");
    let result = chroots(&doc, &tag("a"), |inner| text(inner, &any()));
    assert_eq!(result, Some(vec![]));
}

#[test]
fn test_position_is_zero_outside_chroots() {
    let doc = parse("<a>1</a>");
    assert_eq!(position(&doc), 0);
}

#[test]
fn test_position_numbers_chroots_iterations() {
    let doc = parse("<a>x</a><a>y</a><a>z</a>");
    let result = chroots(&doc, &tag("a"), |inner| Some(position(inner)));
    assert_eq!(result, Some(vec![0, 1, 2]));
}

#[test]
fn test_scrape_driver_drops_whitespace_runs() {
    let result = scrape("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>", |doc| {
        texts(doc, &nested(tag("ul"), text_node()))
    });
    assert_eq!(result, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_scrape_propagates_absence() {
    assert_eq!(scrape("<a>1</a>", |doc| text(doc, &tag("b"))), None);
}

#[test]
fn test_extraction_with_predicates() {
    let doc = parse(r#"<p class="lead">keep</p><p>drop</p>"#);
    assert_eq!(
        texts(&doc, &tag_with("p", vec![has_class("lead")])),
        Some(vec!["keep".to_string()])
    );
}

#[test]
fn test_entities_are_decoded_in_extracted_text() {
    let doc = parse("<p>fish &amp; chips &mdash; &#163;5</p>");
    assert_eq!(
        text(&doc, &tag("p")),
        Some("fish & chips \u{2014} \u{00A3}5".to_string())
    );
}

#[test]
fn test_malformed_document_still_extracts() {
    // Scenario-3 shape: the <d> is only reachable through lifting.
    let doc = parse("<a><b><c><d>2</d></b></c></a>");
    assert_eq!(
        texts(&doc, &nested(tag("b"), tag("d"))),
        Some(vec!["2".to_string()])
    );
}
