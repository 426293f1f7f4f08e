use dataset_view::{DatasetIndex, Error, Page, ViewConfig, previous_dpo_id, unique_dpo_ids};

fn dataset() -> DatasetIndex {
    DatasetIndex::new(
        ["dc1", "dc2"],
        ["dc1_ch[0_1]", "dc2_ch[3]"],
        [
            "dc1_ch[0_1]_dpo[11]",
            "dc1_ch[0_1]_dpo[11_19]",
            "dc1_ch[0_1]_dpo[11_19_7]",
            "dc1_ch[0_1]_dpo[4]",
            "dc2_ch[3]_dpo[2]",
        ],
    )
}

#[test]
fn home_page_lists_chain_tips_only() -> dataset_view::Result<()> {
    let index = dataset();
    assert_eq!(
        index.dpo_dialogues(),
        ["dc2_ch[3]_dpo[2]", "dc1_ch[0_1]_dpo[4]", "dc1_ch[0_1]_dpo[11_19_7]"]
    );

    let page = Page::from_index(&index, ViewConfig::default())?;
    assert_eq!(
        page.visible_item_texts("#dpo-dialogues-list")?,
        vec!["dc2_ch[3]_dpo[2]", "dc1_ch[0_1]_dpo[4]", "dc1_ch[0_1]_dpo[11_19_7]"]
    );
    assert_eq!(page.text("title")?, "Dataset Visualization");
    Ok(())
}

#[test]
fn rendered_home_page_filters_end_to_end() -> dataset_view::Result<()> {
    let mut page = Page::from_index(&dataset(), ViewConfig::default())?;

    page.click("button[data-id=dc2]")?;
    assert_eq!(page.visible_item_texts("#dialogues-list")?, vec!["dc2_ch[3]"]);
    assert_eq!(
        page.visible_item_texts("#dpo-dialogues-list")?,
        vec!["dc2_ch[3]_dpo[2]"]
    );

    page.click("body")?;
    assert!(page.hidden_item_texts("#dpo-dialogues-list")?.is_empty());

    page.click("#dialogues-list .filter-btn")?;
    assert_eq!(
        page.hidden_item_texts("#dpo-dialogues-list")?,
        vec!["dc2_ch[3]_dpo[2]"]
    );
    Ok(())
}

#[test]
fn previous_ids_walk_back_to_the_chain_start() {
    let mut chain = vec!["dc1_ch[0_1]_dpo[11_19_7]".to_string()];
    while let Some(prev) = chain.last().and_then(|id| previous_dpo_id(id)) {
        chain.push(prev);
    }
    assert_eq!(
        chain,
        vec![
            "dc1_ch[0_1]_dpo[11_19_7]",
            "dc1_ch[0_1]_dpo[11_19]",
            "dc1_ch[0_1]_dpo[11]",
        ]
    );
}

#[test]
fn unique_ids_of_an_empty_listing_are_empty() {
    assert!(unique_dpo_ids(Vec::<String>::new()).is_empty());
}

#[test]
fn render_rejects_markup_names_it_cannot_emit() {
    let config = ViewConfig::default().with_toggle_selector("button[data-list]");
    assert!(matches!(
        dataset().render(&config),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        Page::from_index(&dataset(), config),
        Err(Error::InvalidConfig(_))
    ));
}
