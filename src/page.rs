use super::*;

/// One of the two independent behaviours a page can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    ExpandToggle,
    SelectiveFilter,
}

/// A loaded page: the element tree plus whatever behaviours are mounted on it.
///
/// Behaviours are not attached by parsing. Call [`Page::mount`] (or use
/// [`Page::load`]) to build their registries and install listeners, and
/// [`Page::unmount`] to tear them down again.
pub struct Page {
    dom: Dom,
    config: ViewConfig,
    listeners: ListenerStore,
    toggles: Option<ToggleRegistry>,
    filters: Option<FilterRegistry>,
    trace: bool,
    trace_events: bool,
    trace_behaviors: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
    trace_to_stderr: bool,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_config(html, ViewConfig::default())
    }

    pub fn with_config(html: &str, config: ViewConfig) -> Result<Self> {
        config.validate()?;
        let dom = parse_html(html)?;
        Ok(Self {
            dom,
            config,
            listeners: ListenerStore::default(),
            toggles: None,
            filters: None,
            trace: false,
            trace_events: true,
            trace_behaviors: true,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
            trace_to_stderr: true,
        })
    }

    /// Parses `html` and mounts both behaviours.
    pub fn load(html: &str) -> Result<Self> {
        let mut page = Self::from_html(html)?;
        page.mount()?;
        Ok(page)
    }

    pub fn from_index(index: &DatasetIndex, config: ViewConfig) -> Result<Self> {
        let html = index.render(&config)?;
        let mut page = Self::with_config(&html, config)?;
        page.mount()?;
        Ok(page)
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_events = enabled;
    }

    pub fn set_trace_behaviors(&mut self, enabled: bool) {
        self.trace_behaviors = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidConfig(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        if self.trace_logs.len() > self.trace_log_limit {
            let excess = self.trace_logs.len() - self.trace_log_limit;
            self.trace_logs.drain(..excess);
        }
        Ok(())
    }

    /// Mounts both behaviours. Already mounted behaviours are rebuilt from the current tree.
    pub fn mount(&mut self) -> Result<()> {
        self.mount_behavior(Behavior::ExpandToggle)?;
        self.mount_behavior(Behavior::SelectiveFilter)
    }

    pub fn mount_behavior(&mut self, behavior: Behavior) -> Result<()> {
        self.unmount_behavior(behavior);
        let root = self.dom.root;
        let diagnostics = match behavior {
            Behavior::ExpandToggle => {
                let registry = ToggleRegistry::build(&self.dom, &self.config)?;
                for (index, binding) in registry.controls().iter().enumerate() {
                    self.listeners.add(
                        binding.control,
                        "click",
                        Listener {
                            owner: behavior,
                            kind: ListenerKind::Toggle(index),
                        },
                    );
                }
                let diagnostics = registry.diagnostics.clone();
                self.toggles = Some(registry);
                diagnostics
            }
            Behavior::SelectiveFilter => {
                let registry = FilterRegistry::build(&self.dom, &self.config)?;
                for (index, node) in registry.control_nodes().enumerate() {
                    self.listeners.add(
                        node,
                        "click",
                        Listener {
                            owner: behavior,
                            kind: ListenerKind::Filter(index),
                        },
                    );
                }
                self.listeners.add(
                    root,
                    "click",
                    Listener {
                        owner: behavior,
                        kind: ListenerKind::ResetOutside,
                    },
                );
                let diagnostics = registry.diagnostics.clone();
                self.filters = Some(registry);
                diagnostics
            }
        };

        for line in diagnostics {
            self.trace_behavior_line(line);
        }
        self.trace_behavior_line(format!(
            "[mount] {:?} listeners={}",
            behavior,
            self.listeners.len()
        ));
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.unmount_behavior(Behavior::ExpandToggle);
        self.unmount_behavior(Behavior::SelectiveFilter);
    }

    /// Removes the behaviour's listeners and registry. Returns false if it was not mounted.
    pub fn unmount_behavior(&mut self, behavior: Behavior) -> bool {
        let was_mounted = match behavior {
            Behavior::ExpandToggle => self.toggles.take().is_some(),
            Behavior::SelectiveFilter => self.filters.take().is_some(),
        };
        let removed = self.listeners.remove_owner(behavior);
        if was_mounted {
            self.trace_behavior_line(format!("[mount] {behavior:?} unmounted removed={removed}"));
        }
        was_mounted
    }

    pub fn is_mounted(&self, behavior: Behavior) -> bool {
        match behavior {
            Behavior::ExpandToggle => self.toggles.is_some(),
            Behavior::SelectiveFilter => self.filters.is_some(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Activates the first element matching `selector`.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        with_stack(|| self.dispatch_activation(target, "click"))?;
        Ok(())
    }

    pub fn filter_state(&self, list: DependentList) -> Option<FilterState> {
        self.filters.as_ref().and_then(|filters| filters.state(list))
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn is_expanded(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_contains(target, &self.config.expanded_class))
    }

    pub fn is_visible(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.is_rendered(target, &self.config.hidden_display))
    }

    /// Key texts of the items in the list matching `selector` that are currently shown.
    pub fn visible_item_texts(&self, selector: &str) -> Result<Vec<String>> {
        self.item_texts(selector, true)
    }

    pub fn hidden_item_texts(&self, selector: &str) -> Result<Vec<String>> {
        self.item_texts(selector, false)
    }

    fn item_texts(&self, selector: &str, visible: bool) -> Result<Vec<String>> {
        let list = self.select_one(selector)?;
        let items = self
            .dom
            .query_selector_all_from(list, &self.config.item_selector)?;

        let mut out = Vec::new();
        for item in items {
            if self.dom.is_rendered(item, &self.config.hidden_display) != visible {
                continue;
            }
            let key = self
                .dom
                .query_selector_from(item, &self.config.item_key_selector)?;
            if let Some(key) = key {
                out.push(self.dom.text_content(key));
            }
        }
        Ok(out)
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_visible(&self, selector: &str) -> Result<()> {
        self.assert_rendered(selector, true)
    }

    pub fn assert_hidden(&self, selector: &str) -> Result<()> {
        self.assert_rendered(selector, false)
    }

    fn assert_rendered(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.is_rendered(target, &self.config.hidden_display);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: if expected { "visible" } else { "hidden" }.into(),
                actual: if actual { "visible" } else { "hidden" }.into(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_expanded(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, &self.config.expanded_class);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    // Listeners run in bubble order from the origin up to the document. A
    // filter control stops the walk, so nothing above it sees the activation.
    // The reset listener still decides "outside" from the origin itself.
    fn dispatch_activation(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        for node in self.dom.ancestors_inclusive(target) {
            event.current_target = node;
            for listener in self.listeners.get(node, event_type) {
                self.invoke_listener(listener, &mut event)?;
            }
            if event.propagation_stopped {
                break;
            }
        }
        self.trace_event_done(&event);
        Ok(event)
    }

    fn invoke_listener(&mut self, listener: Listener, event: &mut EventState) -> Result<()> {
        self.trace_event_line(format!(
            "[event] {} target={} current={} listener={:?}",
            event.event_type,
            self.dom.node_label(event.target),
            self.dom.node_label(event.current_target),
            listener.kind
        ));

        match listener.kind {
            ListenerKind::Toggle(index) => {
                let Some(toggles) = self.toggles.as_ref() else {
                    return Ok(());
                };
                let expanded = toggles.activate(&mut self.dom, index, &self.config)?;
                if let Some(expanded) = expanded {
                    event.handled += 1;
                    let label = self.dom.node_label(event.current_target);
                    self.trace_behavior_line(format!("[toggle] {label} expanded={expanded}"));
                }
            }
            ListenerKind::Filter(index) => {
                let Some(filters) = self.filters.as_mut() else {
                    return Ok(());
                };
                // Inert controls stop the walk too.
                event.propagation_stopped = true;
                match filters.activate(&mut self.dom, index, &self.config) {
                    Some(outcome) => {
                        event.handled += 1;
                        self.trace_behavior_line(format!(
                            "[filter] {} id={:?} visible={} hidden={}",
                            outcome.category.as_str(),
                            outcome.selection_id,
                            outcome.visible,
                            outcome.hidden
                        ));
                    }
                    None => {
                        let label = self.dom.node_label(event.current_target);
                        self.trace_behavior_line(format!("[filter] {label} ignored"));
                    }
                }
            }
            ListenerKind::ResetOutside => {
                let Some(filters) = self.filters.as_mut() else {
                    return Ok(());
                };
                if filters.contains_origin(&self.dom, event.target) {
                    return Ok(());
                }
                let restored = filters.reset(&mut self.dom, &self.config);
                event.handled += 1;
                self.trace_behavior_line(format!("[filter] reset restored={restored}"));
            }
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState) {
        let target_label = self.dom.node_label(event.target);
        self.trace_event_line(format!(
            "[event] done {} target={} handled={} stopped={}",
            event.event_type, target_label, event.handled, event.propagation_stopped
        ));
    }

    fn trace_event_line(&mut self, line: String) {
        if self.trace && self.trace_events {
            self.trace_line(line);
        }
    }

    fn trace_behavior_line(&mut self, line: String) {
        if self.trace && self.trace_behaviors {
            self.trace_line(line);
        }
    }

    fn trace_line(&mut self, line: String) {
        if self.trace {
            if self.trace_to_stderr {
                eprintln!("{line}");
            }
            if self.trace_logs.len() >= self.trace_log_limit {
                self.trace_logs.remove(0);
            }
            self.trace_logs.push(line);
        }
    }
}
