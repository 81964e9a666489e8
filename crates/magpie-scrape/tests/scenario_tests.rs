//! End-to-end scenarios and cross-cutting laws.
//!
//! Each scenario runs the full pipeline — tokenize, annotate, build,
//! query — the way a library user would.

use magpie_scrape::{
    attr, chroot, chroots, html, htmls, in_serial, inner_html, matches, parse, position, scrape,
    text, texts,
};
use magpie_select::{any, nested, tag};

#[test]
fn test_texts_over_flat_siblings() {
    let result = scrape("<a>1</a><a>2</a><a>3</a>", |doc| texts(doc, &tag("a")));
    assert_eq!(result, Some(vec!["1".into(), "2".into(), "3".into()]));
}

#[test]
fn test_texts_over_nested_elements() {
    let result = scrape("<a><b>1</b></a><a><b>2</b></a>", |doc| {
        texts(doc, &nested(tag("a"), tag("b")))
    });
    assert_eq!(result, Some(vec!["1".into(), "2".into()]));
}

#[test]
fn test_texts_across_cross_closed_markup() {
    let result = scrape("<a><b><c><d>2</d></b></c></a>", |doc| {
        texts(doc, &nested(tag("b"), tag("d")))
    });
    assert_eq!(result, Some(vec!["2".into()]));
}

#[test]
fn test_texts_at_exact_depth() {
    let result = scrape("<a><b>1</b><c><b>2</b></c></a>", |doc| {
        texts(doc, &nested(tag("a"), tag("b").at_depth(2)))
    });
    assert_eq!(result, Some(vec!["2".into()]));
}

#[test]
fn test_attribute_extraction() {
    let result = scrape(r#"<a key="v">x</a>"#, |doc| attr(doc, "key", &tag("a")));
    assert_eq!(result, Some("v".to_string()));
}

#[test]
fn test_positions_paired_with_text() {
    let html = "<article><p>A</p><p>B</p><p>C</p></article>";
    let result = scrape(html, |doc| {
        chroots(doc, &nested(tag("article"), tag("p")), |item| {
            Some((position(item), text(item, &any())?))
        })
    });
    assert_eq!(
        result,
        Some(vec![
            (0, "A".to_string()),
            (1, "B".to_string()),
            (2, "C".to_string()),
        ])
    );
}

#[test]
fn test_serial_section_grouping() {
    let html = "<article>\
        <h2>S1</h2><p>p1</p><p>p2</p>\
        <h2>S2</h2><p>p3</p>\
        </article>";
    let result = scrape(html, |doc| {
        chroot(doc, &tag("article"), |article| {
            in_serial(article, |z| {
                Some(z.repeat(|z| {
                    let title = z.seek_next(|s| text(s, &tag("h2")))?;
                    let paragraphs = z.until_next(
                        |s| matches(s, &tag("h2")),
                        |section| {
                            Some(section.repeat(|sz| sz.seek_next(|s| text(s, &tag("p")))))
                        },
                    )?;
                    Some((title, paragraphs))
                }))
            })
        })
    });
    assert_eq!(
        result,
        Some(vec![
            ("S1".to_string(), vec!["p1".to_string(), "p2".to_string()]),
            ("S2".to_string(), vec!["p3".to_string()]),
        ])
    );
}

// Cross-cutting laws the combinators uphold.

#[test]
fn test_chroot_round_trips_serialization() {
    // chroots(s, html(any)) must equal htmls(s): narrowing to a region
    // and re-serializing it is the same as serializing the selection.
    let source = r#"<div class="x"><p>a</p></div><div><p>b</p><p>c</p></div>"#;
    for selector in [tag("div"), tag("p"), nested(tag("div"), tag("p"))] {
        let doc = parse(source);
        let via_chroots = chroots(&doc, &selector, |region| html(region, &any()));
        let direct = htmls(&doc, &selector);
        assert_eq!(via_chroots, direct);
    }
}

#[test]
fn test_html_brackets_inner_html() {
    // html(s) == "<open…>" ++ inner_html(s) ++ "</close>" for regions of
    // at least two tokens.
    let source = r#"<a href="/x">1<b>2</b></a>"#;
    let doc = parse(source);
    let outer = html(&doc, &tag("a")).unwrap();
    let inner = inner_html(&doc, &tag("a")).unwrap();
    assert_eq!(outer, format!(r#"<a href="/x">{inner}</a>"#));
}

#[test]
fn test_selection_is_monotone_in_document_order() {
    // Every region emitted for nested(a, b) heads at a <b> opener, and
    // the regions appear in document order (their texts are increasing
    // here by construction).
    let source = "<a><b>1</b><b>2</b></a><a><b>3</b></a>";
    let doc = parse(source);
    let regions = magpie_select::select(&doc, &nested(tag("a"), tag("b")));
    let heads: Vec<_> = regions
        .iter()
        .map(|r| r.tags[0].token.tag_name().unwrap().to_string())
        .collect();
    assert_eq!(heads, vec!["b", "b", "b"]);
    let texts: Vec<String> = regions
        .iter()
        .map(|r| {
            r.tags
                .iter()
                .filter_map(|i| i.token.text_content())
                .collect()
        })
        .collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
}

#[test]
fn test_repeat_then_exhausting_until_is_repeat() {
    // Draining with repeat and then running a bounded sub-walk whose
    // bound never matches adds nothing and moves nothing.
    let source = "<div><p>a</p><p>b</p></div>";
    let plain = scrape(source, |doc| {
        chroot(doc, &tag("div"), |region| {
            in_serial(region, |z| {
                Some(z.repeat(|z| z.step_next(|s| text(s, &any()))))
            })
        })
    });
    let with_until = scrape(source, |doc| {
        chroot(doc, &tag("div"), |region| {
            in_serial(region, |z| {
                let collected = z.repeat(|z| z.step_next(|s| text(s, &any())));
                let extra = z.until_next(
                    |s| matches(s, &tag("never")),
                    |sub| Some(sub.repeat(|sz| sz.step_next(|s| text(s, &any())))),
                )?;
                assert_eq!(extra, Vec::<String>::new());
                Some(collected)
            })
        })
    });
    assert_eq!(plain, with_until);
}

#[test]
fn test_absence_is_distinct_from_emptiness() {
    let doc = parse("<a></a>");
    // Present but empty:
    assert_eq!(text(&doc, &tag("a")), Some(String::new()));
    assert_eq!(inner_html(&doc, &tag("a")), Some(String::new()));
    // Absent:
    assert_eq!(text(&doc, &tag("b")), None);
    assert_eq!(html(&doc, &tag("b")), None);
}

#[test]
fn test_realistic_page_shape() {
    // A small article listing with the noise real pages carry: doctype,
    // comments, whitespace indentation, entities, attributes.
    let source = r#"<!DOCTYPE html>
<html>
  <body>
    <!-- rendered by examplecms -->
    <div id="content">
      <article class="post featured">
        <h1>First &amp; Foremost</h1>
        <a href="/posts/1">read more</a>
      </article>
      <article class="post">
        <h1>Second</h1>
        <a href="/posts/2">read more</a>
      </article>
    </div>
  </body>
</html>"#;
    let result = scrape(source, |doc| {
        chroots(doc, &nested(tag("div"), tag("article")), |post| {
            let title = text(post, &tag("h1"))?;
            let link = attr(post, "href", &tag("a"))?;
            Some((position(post), title, link))
        })
    });
    assert_eq!(
        result,
        Some(vec![
            (0, "First & Foremost".to_string(), "/posts/1".to_string()),
            (1, "Second".to_string(), "/posts/2".to_string()),
        ])
    );
}
