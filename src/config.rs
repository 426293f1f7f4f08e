use super::*;

/// Names the behaviours use to find their controls and lists in the page.
///
/// The defaults match the markup rendered by [`DatasetIndex::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub toggle_selector: String,
    pub toggle_target_attr: String,
    pub expanded_class: String,
    pub expand_label: String,
    pub collapse_label: String,
    pub filter_selector: String,
    pub filter_id_attr: String,
    pub filter_category_attr: String,
    pub primary_list_id: String,
    pub dialogue_list_id: String,
    pub secondary_list_id: String,
    pub item_selector: String,
    pub item_key_selector: String,
    pub visible_display: String,
    pub hidden_display: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".toggle-btn".into(),
            toggle_target_attr: "data-list".into(),
            expanded_class: "expanded".into(),
            expand_label: "Expand".into(),
            collapse_label: "Collapse".into(),
            filter_selector: ".filter-btn".into(),
            filter_id_attr: "data-id".into(),
            filter_category_attr: "data-type".into(),
            primary_list_id: "documents-list".into(),
            dialogue_list_id: "dialogues-list".into(),
            secondary_list_id: "dpo-dialogues-list".into(),
            item_selector: ".list-item".into(),
            item_key_selector: ".item-link".into(),
            visible_display: "flex".into(),
            hidden_display: "none".into(),
        }
    }
}

impl ViewConfig {
    pub fn with_toggle_selector(mut self, selector: impl Into<String>) -> Self {
        self.toggle_selector = selector.into();
        self
    }

    pub fn with_expanded_class(mut self, class_name: impl Into<String>) -> Self {
        self.expanded_class = class_name.into();
        self
    }

    pub fn with_labels(mut self, expand: impl Into<String>, collapse: impl Into<String>) -> Self {
        self.expand_label = expand.into();
        self.collapse_label = collapse.into();
        self
    }

    pub fn with_filter_selector(mut self, selector: impl Into<String>) -> Self {
        self.filter_selector = selector.into();
        self
    }

    pub fn with_list_ids(
        mut self,
        primary: impl Into<String>,
        dialogue: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_list_id = primary.into();
        self.dialogue_list_id = dialogue.into();
        self.secondary_list_id = secondary.into();
        self
    }

    pub fn with_item_selectors(
        mut self,
        item: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.item_selector = item.into();
        self.item_key_selector = key.into();
        self
    }

    pub fn with_visible_display(mut self, display: impl Into<String>) -> Self {
        self.visible_display = display.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("toggle_target_attr", &self.toggle_target_attr),
            ("expanded_class", &self.expanded_class),
            ("filter_id_attr", &self.filter_id_attr),
            ("filter_category_attr", &self.filter_category_attr),
            ("primary_list_id", &self.primary_list_id),
            ("dialogue_list_id", &self.dialogue_list_id),
            ("secondary_list_id", &self.secondary_list_id),
            ("visible_display", &self.visible_display),
            ("hidden_display", &self.hidden_display),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{field} must not be empty")));
            }
        }

        let attr_names = [
            ("toggle_target_attr", &self.toggle_target_attr),
            ("filter_id_attr", &self.filter_id_attr),
            ("filter_category_attr", &self.filter_category_attr),
        ];
        for (field, name) in attr_names {
            if !name.bytes().all(html::is_attr_name_char) {
                return Err(Error::InvalidConfig(format!(
                    "{field} is not a valid attribute name: {name:?}"
                )));
            }
        }

        if self.visible_display == self.hidden_display {
            return Err(Error::InvalidConfig(
                "visible_display and hidden_display must differ".into(),
            ));
        }

        let selectors = [
            ("toggle_selector", &self.toggle_selector),
            ("filter_selector", &self.filter_selector),
            ("item_selector", &self.item_selector),
            ("item_key_selector", &self.item_key_selector),
        ];
        for (field, selector) in selectors {
            parse_selector_groups(selector)
                .map_err(|err| Error::InvalidConfig(format!("{field}: {err}")))?;
        }

        Ok(())
    }
}
