use super::*;

#[test]
fn comments_doctype_and_void_tags_are_handled() -> Result<()> {
    let dom = parse_html(
        r#"<!DOCTYPE html>
        <!-- header -->
        <p id='p'>a<br>b<img src='x.png'/>c</p>"#,
    )?;
    let p = dom.by_id("p").ok_or_else(|| Error::SelectorNotFound("#p".into()))?;
    assert_eq!(dom.text_content(p), "abc");
    assert_eq!(dom.query_selector_all("p > br, p > img")?.len(), 2);
    Ok(())
}

#[test]
fn character_references_decode_in_text_and_attributes() -> Result<()> {
    let dom = parse_html(
        r#"<a id='a' data-id="x&quot;y &amp; z">1 &lt; 2 &#38; 3 &#x3E; 0 &unknown; &</a>"#,
    )?;
    let a = dom.by_id("a").ok_or_else(|| Error::SelectorNotFound("#a".into()))?;
    assert_eq!(dom.text_content(a), "1 < 2 & 3 > 0 &unknown; &");
    assert_eq!(dom.attr(a, "data-id").as_deref(), Some("x\"y & z"));
    Ok(())
}

#[test]
fn script_and_style_bodies_stay_raw_text() -> Result<()> {
    let dom = parse_html(
        r#"<script id='s'>if (a < b) { document.body.innerHTML = "<p>x</p>"; }</script><style>li > a {}</style><p id='after'>ok</p>"#,
    )?;
    let script = dom.by_id("s").ok_or_else(|| Error::SelectorNotFound("#s".into()))?;
    assert_eq!(
        dom.text_content(script),
        r#"if (a < b) { document.body.innerHTML = "<p>x</p>"; }"#
    );
    assert_eq!(dom.query_selector_all("p")?.len(), 1);
    assert!(dom.by_id("after").is_some());
    Ok(())
}

#[test]
fn unmatched_end_tags_are_ignored_and_open_tags_close_implicitly() -> Result<()> {
    let dom = parse_html("<ul id='l'><li>one</span></li><li>two</ul><p id='p'>after</p>")?;
    let list = dom.by_id("l").ok_or_else(|| Error::SelectorNotFound("#l".into()))?;
    assert_eq!(dom.query_selector_all_from(list, "li")?.len(), 2);

    let p = dom.by_id("p").ok_or_else(|| Error::SelectorNotFound("#p".into()))?;
    assert_eq!(dom.parent(p), Some(dom.root));
    Ok(())
}

#[test]
fn bare_text_with_angle_brackets_is_kept() -> Result<()> {
    let dom = parse_html("<p id='p'>a < b and 1<2</p>")?;
    let p = dom.by_id("p").ok_or_else(|| Error::SelectorNotFound("#p".into()))?;
    assert_eq!(dom.text_content(p), "a < b and 1<2");
    Ok(())
}

#[test]
fn boolean_and_unquoted_attributes_parse() -> Result<()> {
    let dom = parse_html("<button id=go data-id disabled class=filter-btn>x</button>")?;
    let button = dom.by_id("go").ok_or_else(|| Error::SelectorNotFound("#go".into()))?;
    assert_eq!(dom.attr(button, "data-id").as_deref(), Some(""));
    assert_eq!(dom.attr(button, "DISABLED").as_deref(), Some(""));
    assert!(dom.class_contains(button, "filter-btn"));
    Ok(())
}

#[test]
fn malformed_markup_reports_html_parse_errors() {
    for html in [
        "<!-- never closed",
        "<p id='x>text</p>",
        "<p",
        "<script>let a = 1;",
        "<!DOCTYPE html",
    ] {
        assert!(
            matches!(parse_html(html), Err(Error::HtmlParse(_))),
            "expected {html:?} to fail"
        );
    }
}

#[test]
fn dump_escapes_text_and_sorts_attributes() -> Result<()> {
    let dom = parse_html(r#"<a id='a' class="item-link" data-id='a&amp;b'>x &lt; y</a>"#)?;
    let a = dom.by_id("a").ok_or_else(|| Error::SelectorNotFound("#a".into()))?;
    assert_eq!(
        dom.dump_node(a),
        r#"<a class="item-link" data-id="a&amp;b" id="a">x &lt; y</a>"#
    );
    Ok(())
}
