use super::*;

const TOGGLE_PAGE: &str = r#"
    <button id='toggle-a' class='toggle-btn' data-list='list-a'>Expand</button>
    <ul id='list-a'><li>a</li></ul>
    <button id='toggle-b' class='toggle-btn' data-list='list-b'><span id='toggle-b-icon'>+</span>Expand</button>
    <ul id='list-b' class='item-list'><li>b</li></ul>
    <button id='broken' class='toggle-btn' data-list='nowhere'>Expand</button>
    <button id='unbound' class='toggle-btn'>Expand</button>
    "#;

#[test]
fn first_activation_expands_and_relabels() -> Result<()> {
    let mut page = Page::load(TOGGLE_PAGE)?;
    page.assert_expanded("#list-a", false)?;

    page.click("#toggle-a")?;
    page.assert_expanded("#list-a", true)?;
    page.assert_text("#toggle-a", "Collapse")?;
    Ok(())
}

#[test]
fn second_activation_restores_collapsed_state() -> Result<()> {
    let mut page = Page::load(TOGGLE_PAGE)?;
    page.click("#toggle-a")?;
    page.click("#toggle-a")?;
    page.assert_expanded("#list-a", false)?;
    page.assert_text("#toggle-a", "Expand")?;
    Ok(())
}

#[test]
fn toggles_only_touch_their_own_list() -> Result<()> {
    let mut page = Page::load(TOGGLE_PAGE)?;
    page.click("#toggle-b")?;
    page.assert_expanded("#list-b", true)?;
    page.assert_expanded("#list-a", false)?;
    page.assert_text("#toggle-a", "Expand")?;
    assert_eq!(
        page.dump_dom("#list-b")?,
        "<ul class=\"item-list expanded\" id=\"list-b\"><li>b</li></ul>"
    );
    Ok(())
}

#[test]
fn activation_inside_the_control_reaches_it() -> Result<()> {
    let mut page = Page::load(TOGGLE_PAGE)?;
    page.click("#toggle-b-icon")?;
    page.assert_expanded("#list-b", true)?;
    // The label replaces the control's whole content.
    page.assert_text("#toggle-b", "Collapse")?;
    assert_eq!(
        page.assert_exists("#toggle-b-icon"),
        Err(Error::SelectorNotFound("#toggle-b-icon".into()))
    );
    Ok(())
}

#[test]
fn state_is_read_from_the_list_each_time() -> Result<()> {
    let html = r#"
        <button id='t' class='toggle-btn' data-list='l'>Collapse</button>
        <ul id='l' class='expanded'></ul>
        "#;
    let mut page = Page::load(html)?;
    page.click("#t")?;
    page.assert_expanded("#l", false)?;
    page.assert_text("#t", "Expand")?;
    Ok(())
}

#[test]
fn controls_with_unresolved_targets_are_no_ops() -> Result<()> {
    let mut page = Page::load(TOGGLE_PAGE)?;
    page.click("#broken")?;
    page.click("#unbound")?;
    page.assert_text("#broken", "Expand")?;
    page.assert_text("#unbound", "Expand")?;
    page.assert_expanded("#list-a", false)?;
    page.assert_expanded("#list-b", false)?;
    Ok(())
}

#[test]
fn custom_class_and_labels_come_from_config() -> Result<()> {
    let html = r#"
        <a id='t' class='fold' data-list='l'>Show</a>
        <ol id='l'></ol>
        "#;
    let config = ViewConfig::default()
        .with_toggle_selector("a.fold")
        .with_expanded_class("open")
        .with_labels("Show", "Hide");
    let mut page = Page::with_config(html, config)?;
    page.mount()?;

    page.click("#t")?;
    page.assert_text("#t", "Hide")?;
    assert!(page.is_expanded("#l")?);
    assert_eq!(
        page.dump_dom("#l")?,
        "<ol class=\"open\" id=\"l\"></ol>"
    );
    Ok(())
}

#[test]
fn toggle_registry_resolves_targets_once() -> Result<()> {
    let dom = parse_html(TOGGLE_PAGE)?;
    let registry = ToggleRegistry::build(&dom, &ViewConfig::default())?;
    assert_eq!(registry.controls().len(), 2);
    assert_eq!(registry.diagnostics.len(), 2);
    assert!(registry.diagnostics[0].contains("#broken"));
    assert!(registry.diagnostics[1].contains("#unbound"));
    Ok(())
}
