use super::*;

mod expand_toggle_behavior;
mod markup_parsing;

const DATASET_PAGE: &str = r#"
    <body>
      <button id='toggle-docs' class='toggle-btn' data-list='documents-list'>Expand</button>
      <ul id='documents-list'>
        <li class='list-item'><a class='item-link'>doc_1</a><button id='f-doc-1' class='filter-btn' data-id='doc_1' data-type='document'>Filter</button></li>
        <li class='list-item'><a class='item-link'>doc_2</a><button id='f-doc-2' class='filter-btn' data-id='doc_2' data-type='document'>Filter</button></li>
      </ul>
      <ul id='dialogues-list'>
        <li class='list-item'><a class='item-link'>doc_1_ch[0]</a><button id='f-dlg-1' class='filter-btn' data-id='doc_1_ch[0]' data-type='dialogue'>Filter</button></li>
        <li class='list-item'><a class='item-link'>doc_2_ch[0]</a><button id='f-dlg-2' class='filter-btn' data-id='doc_2_ch[0]' data-type='dialogue'>Filter</button></li>
        <li class='list-item'><a class='item-link'>doc_10_ch[3]</a></li>
      </ul>
      <ul id='dpo-dialogues-list'>
        <li class='list-item'><a class='item-link'>doc_1_ch[0]_dpo[1]</a></li>
        <li class='list-item'><a class='item-link'>doc_1_ch[1]_dpo[2]</a></li>
        <li class='list-item'><a class='item-link'>doc_2_ch[0]_dpo[1]</a></li>
      </ul>
      <p id='outside'>elsewhere</p>
    </body>
    "#;

#[test]
fn document_filter_then_outside_click_restores_everything() -> Result<()> {
    let mut page = Page::load(DATASET_PAGE)?;

    page.click("#f-doc-1")?;
    assert_eq!(
        page.visible_item_texts("#dialogues-list")?,
        vec!["doc_1_ch[0]", "doc_10_ch[3]"]
    );
    assert_eq!(
        page.hidden_item_texts("#dpo-dialogues-list")?,
        vec!["doc_2_ch[0]_dpo[1]"]
    );

    page.click("#outside")?;
    assert!(page.hidden_item_texts("#dialogues-list")?.is_empty());
    assert!(page.hidden_item_texts("#dpo-dialogues-list")?.is_empty());
    Ok(())
}

#[test]
fn error_display_names_the_failing_selector() {
    let err = Error::SelectorNotFound("#missing".into());
    assert_eq!(err.to_string(), "selector not found: #missing");

    let err = Error::AssertionFailed {
        selector: "#toggle".into(),
        expected: "Collapse".into(),
        actual: "Expand".into(),
        dom_snippet: "<button>Expand</button>".into(),
    };
    assert_eq!(
        err.to_string(),
        "assertion failed for #toggle: expected Collapse, actual Expand, snippet <button>Expand</button>"
    );
}

#[test]
fn truncate_chars_marks_cut_snippets() {
    assert_eq!(truncate_chars("abcdef", 3), "abc...");
    assert_eq!(truncate_chars("abc", 3), "abc");
    assert_eq!(truncate_chars("", 3), "");
}
