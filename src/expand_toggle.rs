use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ToggleControl {
    pub(crate) control: NodeId,
    pub(crate) list: NodeId,
}

/// Toggle controls resolved once at mount, each bound to its target list.
#[derive(Debug, Default, Clone)]
pub(crate) struct ToggleRegistry {
    controls: Vec<ToggleControl>,
    pub(crate) diagnostics: Vec<String>,
}

impl ToggleRegistry {
    pub(crate) fn build(dom: &Dom, config: &ViewConfig) -> Result<Self> {
        let mut registry = Self::default();
        for control in dom.query_selector_all(&config.toggle_selector)? {
            let target = dom.attr(control, &config.toggle_target_attr);
            match target.as_deref().and_then(|id| dom.by_id(id)) {
                Some(list) => registry.controls.push(ToggleControl { control, list }),
                None => registry.diagnostics.push(format!(
                    "[mount] toggle {} skipped: {}={} does not resolve",
                    dom.node_label(control),
                    config.toggle_target_attr,
                    target.unwrap_or_default()
                )),
            }
        }
        Ok(registry)
    }

    pub(crate) fn controls(&self) -> &[ToggleControl] {
        &self.controls
    }

    /// Flips the list bound to control `index`; returns the new expanded state.
    pub(crate) fn activate(
        &self,
        dom: &mut Dom,
        index: usize,
        config: &ViewConfig,
    ) -> Result<Option<bool>> {
        let Some(binding) = self.controls.get(index) else {
            return Ok(None);
        };
        toggle_list(dom, *binding, config).map(Some)
    }
}

fn toggle_list(dom: &mut Dom, binding: ToggleControl, config: &ViewConfig) -> Result<bool> {
    if dom.class_contains(binding.list, &config.expanded_class) {
        dom.class_remove(binding.list, &config.expanded_class);
        dom.set_text_content(binding.control, &config.expand_label)?;
        Ok(false)
    } else {
        dom.class_add(binding.list, &config.expanded_class);
        dom.set_text_content(binding.control, &config.collapse_label)?;
        Ok(true)
    }
}
