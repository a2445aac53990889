//! Comprehensive tests for fos-inspect
//!
//! Selector synthesis and inspection sessions over parsed HTML.

use fos_dom::NodeId;
use fos_html::{Document, HtmlParser};
use fos_inspect::{
    css_path, CollectSink, CssPathOptions, InspectorConfig, Page, SessionState, CLEARED_OUTLINE,
    DEFAULT_HIGHLIGHT, ESCAPE_KEY,
};

fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

fn select(doc: &Document, selector: &str) -> NodeId {
    fos_css::query_selector(doc, selector).unwrap().unwrap()
}

fn select_all(doc: &Document, selector: &str) -> Vec<NodeId> {
    fos_css::query_selector_all(doc, selector).unwrap()
}

fn path(doc: &Document, node: NodeId, options: CssPathOptions) -> String {
    css_path(doc, Some(node), options)
}

const SHORT: CssPathOptions = CssPathOptions::new(false, false);
const FULL: CssPathOptions = CssPathOptions::new(true, false);
const NTH: CssPathOptions = CssPathOptions::new(false, true);

// ============================================================================
// SELECTOR SYNTHESIS
// ============================================================================

#[test]
fn test_id_element_alone() {
    let doc = parse(r#"<section><article id="post">x</article></section>"#);
    let article = select(&doc, "article");
    assert_eq!(path(&doc, article, SHORT), "article#post");
}

#[test]
fn test_id_element_with_classes() {
    let doc = parse(r#"<div id="card" class="big  red">x</div>"#);
    let div = select(&doc, "div");
    assert_eq!(path(&doc, div, SHORT), "div#card.big.red");
}

#[test]
fn test_class_under_id_ancestor() {
    let doc = parse(r#"<div id="content"><p class="top">X</p></div>"#);
    let p = select(&doc, "p");
    assert_eq!(path(&doc, p, SHORT), "div#content p.top");
}

#[test]
fn test_full_path_reaches_html() {
    let doc = parse(r#"<div id="content"><p class="top">X</p></div>"#);
    let p = select(&doc, "p");
    assert_eq!(path(&doc, p, FULL), "html body div#content p.top");
}

#[test]
fn test_bare_chain_matches_depth() {
    let doc = parse("<div><section><ul><li>x</li></ul></section></div>");
    let li = select(&doc, "li");
    let result = path(&doc, li, SHORT);

    assert_eq!(result, "html body div section ul li");
    let depth = doc.tree().ancestors(li).count() + 1;
    assert_eq!(result.split(' ').count(), depth);
}

#[test]
fn test_synthesis_is_idempotent() {
    let doc = parse(r#"<ul class="menu"><li>a</li><li>b</li></ul>"#);
    let li = select_all(&doc, "li")[1];

    for options in [SHORT, FULL, NTH] {
        assert_eq!(path(&doc, li, options), path(&doc, li, options));
    }
}

#[test]
fn test_identical_siblings_differ_by_index() {
    let doc = parse("<ul><li>a</li><li>a</li><li>a</li></ul>");
    let selectors: Vec<_> = select_all(&doc, "li")
        .into_iter()
        .map(|li| path(&doc, li, NTH))
        .collect();

    assert_eq!(
        selectors,
        vec![
            "html body ul:nth-child(1) li:nth-child(1)",
            "html body ul:nth-child(1) li:nth-child(2)",
            "html body ul:nth-child(1) li:nth-child(3)",
        ]
    );
}

#[test]
fn test_nth_child_selectors_relocate_element() {
    let doc = parse(
        r#"<main>
            <div class="row"><span>a</span><span>b</span></div>
            <div class="row"><span>c</span><span>d</span></div>
        </main>"#,
    );

    for span in select_all(&doc, "span") {
        let selector = path(&doc, span, NTH);
        assert_eq!(select_all(&doc, &selector), vec![span], "{selector}");
    }
}

#[test]
fn test_ambiguous_class_gets_index() {
    let doc = parse(r#"<div class="row">a</div><div class="row">b</div>"#);
    let second = select_all(&doc, "div.row")[1];
    assert_eq!(path(&doc, second, NTH), "html body div.row:nth-child(2)");
}

#[test]
fn test_unique_class_keeps_no_index() {
    let doc = parse(r#"<div class="row">a</div><div class="other">b</div>"#);
    let first = select(&doc, "div.row");
    assert_eq!(path(&doc, first, NTH), "html body div.row");
}

#[test]
fn test_nth_child_counts_only_elements() {
    let doc = parse("<div>text<!-- note --><em>a</em>more<em>b</em></div>");
    let second = select_all(&doc, "em")[1];
    assert_eq!(path(&doc, second, NTH), "html body div:nth-child(1) em:nth-child(2)");
}

#[test]
fn test_html_and_body_never_indexed() {
    let doc = parse("<p>x</p>");
    let body = doc.body().unwrap();
    let html = doc.document_element().unwrap();

    assert_eq!(path(&doc, html, NTH), "html");
    assert_eq!(path(&doc, body, NTH), "html body");
}

#[test]
fn test_tag_is_lowercased() {
    let doc = parse("<DIV><SPAN>x</SPAN></DIV>");
    let span = select(&doc, "span");
    assert_eq!(path(&doc, span, SHORT), "html body div span");
}

// ============================================================================
// INSPECTION SESSION
// ============================================================================

fn inspect(html: &str, config: InspectorConfig) -> Page<CollectSink> {
    Page::with_sink(parse(html), config, CollectSink::new())
}

#[test]
fn test_hover_outlines_and_leave_clears() {
    let mut page = inspect(r#"<a href="/">home</a><b>x</b>"#, InspectorConfig::default());
    let a = select(page.document(), "a");
    let b = select(page.document(), "b");
    page.start();

    page.hover(a);
    assert_eq!(page.outline(a), Some(DEFAULT_HIGHLIGHT));
    page.leave(a);
    assert_eq!(page.outline(a), None);

    page.hover(b);
    assert_eq!(page.inspector().last_highlighted(), Some(b));
    assert_eq!(page.outline(a), None);
}

#[test]
fn test_click_suppresses_default_and_emits() {
    let mut page = inspect(r#"<div id="content"><a class="link" href="/x">go</a></div>"#, InspectorConfig::default());
    let a = select(page.document(), "a");
    page.start();

    let outcome = page.click(a);
    assert!(outcome.default_prevented);
    assert_eq!(outcome.selector.as_deref(), Some("div#content a.link"));
    assert_eq!(page.sink().selectors(), ["div#content a.link".to_string()]);
}

#[test]
fn test_config_options_reach_synthesis() {
    let config = InspectorConfig::from_json(r#"{"fullPath": true, "useNthChild": true}"#).unwrap();
    let mut page = inspect(r#"<div id="content"><p>a</p><p>b</p></div>"#, config);
    let second = select_all(page.document(), "p")[1];
    page.start();

    let outcome = page.click(second);
    assert_eq!(
        outcome.selector.as_deref(),
        Some("html body div#content p:nth-child(2)")
    );
}

#[test]
fn test_cancel_clears_highlight_and_detaches() {
    let mut page = inspect("<p>a</p><p>b</p>", InspectorConfig::default());
    let items = select_all(page.document(), "p");
    page.start();
    assert_eq!(page.events().registry().listener_count(), 4);

    page.hover(items[0]);
    page.press_key(ESCAPE_KEY);

    assert_eq!(page.inspector().state(), SessionState::Idle);
    assert_eq!(page.outline(items[0]), Some(CLEARED_OUTLINE));
    assert_eq!(page.events().registry().listener_count(), 0);

    // Nothing observable after cancel
    page.hover(items[1]);
    let outcome = page.click(items[1]);
    assert_eq!(page.outline(items[1]), None);
    assert!(!outcome.default_prevented);
    assert_eq!(outcome.handled, 0);
    assert!(page.sink().is_empty());
}

#[test]
fn test_other_keys_do_not_cancel() {
    let mut page = inspect("<p>a</p>", InspectorConfig::default());
    page.start();

    page.press_key(13);
    page.press_key(65);
    assert!(page.inspector().is_active());
}

#[test]
fn test_custom_cancel_key() {
    let config = InspectorConfig::from_json(r#"{"cancelKey": 81}"#).unwrap();
    let mut page = inspect("<p>a</p>", config);
    page.start();

    page.press_key(ESCAPE_KEY);
    assert!(page.inspector().is_active());
    page.press_key(81);
    assert!(!page.inspector().is_active());
}

#[test]
fn test_legacy_host_session() {
    let config = InspectorConfig {
        legacy_events: true,
        ..Default::default()
    };
    let mut page = inspect(r#"<span class="tag">x</span>"#, config);
    let span = select(page.document(), "span");
    page.start();

    let listeners = page
        .events()
        .registry()
        .listeners(NodeId::ROOT, fos_dom::EventType::Click);
    assert!(listeners.iter().all(|l| !l.capture));

    assert_eq!(page.click(span).selector.as_deref(), Some("html body span.tag"));
    page.press_key(ESCAPE_KEY);
    assert!(!page.inspector().is_active());
}

#[test]
fn test_custom_highlight() {
    let config = InspectorConfig::from_json(r#"{"highlight": "1px dashed blue"}"#).unwrap();
    let mut page = inspect("<p>a</p>", config);
    let p = select(page.document(), "p");
    page.start();

    page.hover(p);
    assert_eq!(page.outline(p), Some("1px dashed blue"));
}

#[test]
fn test_second_session_after_cancel() {
    let mut page = inspect("<p>a</p>", InspectorConfig::default());
    let p = select(page.document(), "p");

    assert!(page.start());
    page.press_key(ESCAPE_KEY);
    assert!(page.start());
    assert_eq!(page.click(p).selector.as_deref(), Some("html body p"));
}
