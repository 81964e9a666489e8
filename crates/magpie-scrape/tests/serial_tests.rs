//! Integration tests for serial sibling navigation.

use magpie_scrape::{chroot, in_serial, matches, parse, text};
use magpie_select::{any, tag};

/// Helper: run a serial scraper over the children of the first region
/// matching `name`
fn in_children_of<T>(
    html: &str,
    name: &str,
    scraper: impl FnOnce(&mut magpie_scrape::SpecZipper) -> Option<T>,
) -> Option<T> {
    let doc = parse(html);
    chroot(&doc, &tag(name), |region| in_serial(region, scraper))
}

#[test]
fn test_step_next_visits_children_in_order() {
    let result = in_children_of("<ul><li>a</li><li>b</li></ul>", "ul", |z| {
        let first = z.step_next(|s| text(s, &any()))?;
        let second = z.step_next(|s| text(s, &any()))?;
        Some((first, second))
    });
    assert_eq!(result, Some(("a".to_string(), "b".to_string())));
}

#[test]
fn test_step_next_fails_past_the_end() {
    let result = in_children_of("<ul><li>a</li></ul>", "ul", |z| {
        let _ = z.step_next(|s| text(s, &any()))?;
        // Next step lands on the trailing sentinel.
        assert_eq!(z.step_next(|s| text(s, &any())), None);
        Some(())
    });
    assert_eq!(result, Some(()));
}

#[test]
fn test_failed_step_does_not_move_the_focus() {
    let result = in_children_of("<ul><li>a</li><li>b</li></ul>", "ul", |z| {
        // A scraper that fails: looking for a tag the children don't have.
        assert_eq!(z.step_next(|s| text(s, &tag("nope"))), None);
        // The zipper is unmoved, so the next step still reads "a".
        z.step_next(|s| text(s, &any()))
    });
    assert_eq!(result, Some("a".to_string()));
}

#[test]
fn test_step_back_after_steps_forward() {
    let result = in_children_of("<ul><li>a</li><li>b</li></ul>", "ul", |z| {
        let _ = z.step_next(|s| text(s, &any()))?;
        let _ = z.step_next(|s| text(s, &any()))?;
        z.step_back(|s| text(s, &any()))
    });
    assert_eq!(result, Some("a".to_string()));
}

#[test]
fn test_step_back_fails_at_the_start() {
    let result = in_children_of("<ul><li>a</li></ul>", "ul", |z| {
        assert_eq!(z.step_back(|s| text(s, &any())), None);
        Some(())
    });
    assert_eq!(result, Some(()));
}

#[test]
fn test_seek_next_skips_non_matching_elements() {
    let html = "<div><p>skip</p><p>skip</p><h2>hit</h2><p>after</p></div>";
    let result = in_children_of(html, "div", |z| {
        let hit = z.seek_next(|s| text(s, &tag("h2")))?;
        // Focus is on the matched element; the next step reads what
        // follows it.
        let after = z.step_next(|s| text(s, &any()))?;
        Some((hit, after))
    });
    assert_eq!(result, Some(("hit".to_string(), "after".to_string())));
}

#[test]
fn test_failed_seek_restores_the_position() {
    let html = "<div><p>a</p><p>b</p></div>";
    let result = in_children_of(html, "div", |z| {
        assert_eq!(z.seek_next(|s| text(s, &tag("h2"))), None);
        // Position unchanged: stepping still reads the first element.
        z.step_next(|s| text(s, &any()))
    });
    assert_eq!(result, Some("a".to_string()));
}

#[test]
fn test_seek_back_finds_earlier_elements() {
    let html = "<div><h2>title</h2><p>a</p><p>b</p></div>";
    let result = in_children_of(html, "div", |z| {
        let _ = z.seek_next(|s| text(s, &tag("p")).filter(|t| t == "b"))?;
        z.seek_back(|s| text(s, &tag("h2")))
    });
    assert_eq!(result, Some("title".to_string()));
}

#[test]
fn test_repeat_collects_until_failure() {
    let html = "<div><p>a</p><p>b</p><h2>stop</h2><p>c</p></div>";
    let result = in_children_of(html, "div", |z| {
        Some(z.repeat(|z| z.step_next(|s| text(s, &tag("p")))))
    });
    assert_eq!(result, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_repeat_yields_empty_on_immediate_failure() {
    let result = in_children_of("<div><h2>x</h2></div>", "div", |z| {
        Some(z.repeat(|z| z.step_next(|s| text(s, &tag("p")))))
    });
    assert_eq!(result, Some(vec![]));
}

#[test]
fn test_repeat1_fails_on_immediate_failure() {
    let result = in_children_of("<div><h2>x</h2></div>", "div", |z| {
        z.repeat1(|z| z.step_next(|s| text(s, &tag("p"))))
    });
    assert_eq!(result, None);
}

#[test]
fn test_until_next_bounds_the_inner_walk() {
    let html = "<div><p>a</p><p>b</p><h2>stop</h2><p>c</p></div>";
    let result = in_children_of(html, "div", |z| {
        z.until_next(
            |s| matches(s, &tag("h2")),
            |sub| Some(sub.repeat(|sz| sz.step_next(|s| text(s, &any())))),
        )
    });
    assert_eq!(result, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_until_next_does_not_move_the_outer_zipper() {
    let html = "<div><p>a</p><h2>stop</h2></div>";
    let result = in_children_of(html, "div", |z| {
        let _ = z.until_next(
            |s| matches(s, &tag("h2")),
            |sub| Some(sub.repeat(|sz| sz.step_next(|s| text(s, &any())))),
        )?;
        // Outer focus still at the start: the first step reads "a".
        z.step_next(|s| text(s, &any()))
    });
    assert_eq!(result, Some("a".to_string()));
}

#[test]
fn test_until_next_with_never_matching_bound_collects_to_the_end() {
    let html = "<div><p>a</p><p>b</p></div>";
    let result = in_children_of(html, "div", |z| {
        z.until_next(
            |s| matches(s, &tag("nope")),
            |sub| Some(sub.repeat(|sz| sz.step_next(|s| text(s, &any())))),
        )
    });
    assert_eq!(result, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_until_back_walks_the_preceding_elements_backward() {
    let html = "<div><p>a</p><p>b</p><h2>end</h2></div>";
    let result = in_children_of(html, "div", |z| {
        let _ = z.seek_next(|s| text(s, &tag("h2")))?;
        z.until_back(
            |s| matches(s, &tag("nope")),
            |sub| Some(sub.repeat(|sz| sz.step_back(|s| text(s, &any())))),
        )
    });
    // Collected backward from the focus: nearest first.
    assert_eq!(result, Some(vec!["b".to_string(), "a".to_string()]));
}

#[test]
fn test_or_else_composes_alternatives() {
    let html = "<div><h2>title</h2></div>";
    let result = in_children_of(html, "div", |z| {
        z.step_next(|s| text(s, &tag("p")))
            .or_else(|| z.step_next(|s| text(s, &tag("h2"))))
    });
    assert_eq!(result, Some("title".to_string()));
}

#[test]
fn test_clone_checkpoints_the_walk() {
    let html = "<div><p>a</p><p>b</p></div>";
    let result = in_children_of(html, "div", |z| {
        let checkpoint = z.clone();
        let _ = z.step_next(|s| text(s, &any()))?;
        let _ = z.step_next(|s| text(s, &any()))?;
        *z = checkpoint;
        z.step_next(|s| text(s, &any()))
    });
    assert_eq!(result, Some("a".to_string()));
}

#[test]
fn test_in_serial_outside_chroot_walks_top_level_siblings() {
    let doc = parse("<a>1</a><b>2</b><c>3</c>");
    let result = in_serial(&doc, |z| {
        Some(z.repeat(|z| z.step_next(|s| text(s, &any()))))
    });
    assert_eq!(
        result,
        Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
    );
}

#[test]
fn test_in_serial_over_empty_region() {
    let result = in_children_of("<div></div>", "div", |z| {
        assert_eq!(z.step_next(|s| text(s, &any())), None);
        Some(z.repeat(|z| z.step_next(|s| text(s, &any()))))
    });
    assert_eq!(result, Some(vec![]));
}

#[test]
fn test_remaining_counts() {
    let _ = in_children_of("<div><p>a</p><p>b</p></div>", "div", |z| {
        assert_eq!(z.remaining_ahead(), 2);
        assert_eq!(z.remaining_behind(), 0);
        let _ = z.step_next(|s| text(s, &any()))?;
        assert_eq!(z.remaining_ahead(), 1);
        assert_eq!(z.remaining_behind(), 0);
        Some(())
    });
}

#[test]
fn test_repeat1_collects_like_repeat_when_first_succeeds() {
    let html = "<div><p>a</p><p>b</p></div>";
    let result = in_children_of(html, "div", |z| {
        z.repeat1(|z| z.step_next(|s| text(s, &tag("p"))))
    });
    assert_eq!(result, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_until_back_stops_at_the_bound() {
    let html = "<div><h2>skip</h2><p>a</p><p>b</p><h2>end</h2></div>";
    let result = in_children_of(html, "div", |z| {
        let _ = z.seek_next(|s| text(s, &tag("p")).filter(|t| t == "b"))?;
        // The leading <h2> is the bound; only the <p>s between it and the
        // focus are collected.
        z.until_back(
            |s| matches(s, &tag("h2")),
            |sub| Some(sub.repeat(|sz| sz.step_back(|s| text(s, &any())))),
        )
    });
    assert_eq!(result, Some(vec!["a".to_string()]));
}

#[test]
fn test_serial_inside_chroots_sections() {
    // Each <section> gets its own serial walk.
    let html = "<main>\
        <section><h3>one</h3><p>1</p></section>\
        <section><h3>two</h3><p>2</p></section>\
        </main>";
    let doc = parse(html);
    let result = magpie_scrape::chroots(&doc, &tag("section"), |section| {
        in_serial(section, |z| {
            let head = z.step_next(|s| text(s, &tag("h3")))?;
            let body = z.step_next(|s| text(s, &tag("p")))?;
            Some((head, body))
        })
    });
    assert_eq!(
        result,
        Some(vec![
            ("one".to_string(), "1".to_string()),
            ("two".to_string(), "2".to_string()),
        ])
    );
}

#[test]
fn test_mixed_forward_and_backward_navigation() {
    let html = "<div><a>1</a><b>2</b><c>3</c></div>";
    let result = in_children_of(html, "div", |z| {
        let last = z.seek_next(|s| text(s, &tag("c")))?;
        let middle = z.step_back(|s| text(s, &any()))?;
        let first = z.step_back(|s| text(s, &any()))?;
        Some((first, middle, last))
    });
    assert_eq!(
        result,
        Some(("1".to_string(), "2".to_string(), "3".to_string()))
    );
}
