use super::*;

/// Which dependent lists a filter control narrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Narrows the dialogue list and the secondary list.
    Document,
    /// Narrows the secondary list only.
    Dialogue,
}

impl Category {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "document" => Some(Self::Document),
            "dialogue" => Some(Self::Dialogue),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Dialogue => "dialogue",
        }
    }

    fn targets(self) -> &'static [DependentList] {
        match self {
            Self::Document => &[DependentList::Dialogues, DependentList::Secondary],
            Self::Dialogue => &[DependentList::Secondary],
        }
    }

    fn filtered_state(self) -> FilterState {
        match self {
            Self::Document => FilterState::FilteredByDocument,
            Self::Dialogue => FilterState::FilteredByDialogue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependentList {
    Dialogues,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Unfiltered,
    FilteredByDocument,
    FilteredByDialogue,
}

/// Literal, case-sensitive, unanchored containment. The empty id matches everything.
pub fn item_matches(text: &str, selection_id: &str) -> bool {
    text.contains(selection_id)
}

#[derive(Debug, Clone)]
struct FilterControl {
    node: NodeId,
    selection_id: Option<String>,
    category: Option<Category>,
}

#[derive(Debug, Clone, Copy)]
struct ListItem {
    node: NodeId,
    key: NodeId,
}

#[derive(Debug, Clone)]
struct FilteredList {
    items: Vec<ListItem>,
    state: FilterState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilterOutcome {
    pub(crate) category: Category,
    pub(crate) selection_id: String,
    pub(crate) visible: usize,
    pub(crate) hidden: usize,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct FilterRegistry {
    controls: Vec<FilterControl>,
    control_nodes: HashSet<NodeId>,
    dialogues: Option<FilteredList>,
    secondary: Option<FilteredList>,
    pub(crate) diagnostics: Vec<String>,
}

impl FilterRegistry {
    pub(crate) fn build(dom: &Dom, config: &ViewConfig) -> Result<Self> {
        let mut registry = Self::default();

        for node in dom.query_selector_all(&config.filter_selector)? {
            let selection_id = dom.attr(node, &config.filter_id_attr);
            let raw_category = dom.attr(node, &config.filter_category_attr);
            let category = raw_category.as_deref().and_then(Category::parse);
            if selection_id.is_none() {
                registry.diagnostics.push(format!(
                    "[mount] filter {} has no {}",
                    dom.node_label(node),
                    config.filter_id_attr
                ));
            }
            if category.is_none() {
                registry.diagnostics.push(format!(
                    "[mount] filter {} has unknown {}={}",
                    dom.node_label(node),
                    config.filter_category_attr,
                    raw_category.unwrap_or_default()
                ));
            }
            registry.control_nodes.insert(node);
            registry.controls.push(FilterControl {
                node,
                selection_id,
                category,
            });
        }

        registry.dialogues = registry.build_list(dom, config, &config.dialogue_list_id)?;
        registry.secondary = registry.build_list(dom, config, &config.secondary_list_id)?;
        Ok(registry)
    }

    fn build_list(
        &mut self,
        dom: &Dom,
        config: &ViewConfig,
        list_id: &str,
    ) -> Result<Option<FilteredList>> {
        let Some(list) = dom.by_id(list_id) else {
            self.diagnostics
                .push(format!("[mount] dependent list #{list_id} is missing"));
            return Ok(None);
        };

        let mut items = Vec::new();
        for node in dom.query_selector_all_from(list, &config.item_selector)? {
            match dom.query_selector_from(node, &config.item_key_selector)? {
                Some(key) => items.push(ListItem { node, key }),
                None => self.diagnostics.push(format!(
                    "[mount] item {} in #{list_id} has no {}",
                    dom.node_label(node),
                    config.item_key_selector
                )),
            }
        }

        Ok(Some(FilteredList {
            items,
            state: FilterState::Unfiltered,
        }))
    }

    pub(crate) fn control_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.controls.iter().map(|control| control.node)
    }

    /// True when the activation started on a filter control or inside one.
    pub(crate) fn contains_origin(&self, dom: &Dom, origin: NodeId) -> bool {
        dom.ancestors_inclusive(origin)
            .into_iter()
            .any(|node| self.control_nodes.contains(&node))
    }

    pub(crate) fn state(&self, list: DependentList) -> Option<FilterState> {
        self.list(list).map(|list| list.state)
    }

    fn list(&self, list: DependentList) -> Option<&FilteredList> {
        match list {
            DependentList::Dialogues => self.dialogues.as_ref(),
            DependentList::Secondary => self.secondary.as_ref(),
        }
    }

    fn list_mut(&mut self, list: DependentList) -> Option<&mut FilteredList> {
        match list {
            DependentList::Dialogues => self.dialogues.as_mut(),
            DependentList::Secondary => self.secondary.as_mut(),
        }
    }

    /// Recomputes visibility of the lists control `index` targets.
    pub(crate) fn activate(
        &mut self,
        dom: &mut Dom,
        index: usize,
        config: &ViewConfig,
    ) -> Option<FilterOutcome> {
        let control = self.controls.get(index)?;
        let category = control.category?;
        let selection_id = control.selection_id.clone()?;

        let mut outcome = FilterOutcome {
            category,
            selection_id,
            visible: 0,
            hidden: 0,
        };
        for target in category.targets() {
            let Some(list) = self.list_mut(*target) else {
                continue;
            };
            for item in &list.items {
                let text = dom.text_content(item.key);
                if item_matches(&text, &outcome.selection_id) {
                    dom.style_set(item.node, "display", &config.visible_display);
                    outcome.visible += 1;
                } else {
                    dom.style_set(item.node, "display", &config.hidden_display);
                    outcome.hidden += 1;
                }
            }
            list.state = category.filtered_state();
        }
        Some(outcome)
    }

    /// Shows every item of every dependent list again; returns the item count.
    pub(crate) fn reset(&mut self, dom: &mut Dom, config: &ViewConfig) -> usize {
        let mut restored = 0;
        for list in [self.dialogues.as_mut(), self.secondary.as_mut()]
            .into_iter()
            .flatten()
        {
            for item in &list.items {
                dom.style_set(item.node, "display", &config.visible_display);
                restored += 1;
            }
            list.state = FilterState::Unfiltered;
        }
        restored
    }
}
