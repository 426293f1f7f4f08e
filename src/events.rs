use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerKind {
    /// Index into the toggle registry.
    Toggle(usize),
    /// Index into the filter registry.
    Filter(usize),
    /// Page-level listener restoring every dependent list.
    ResetOutside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) owner: Behavior,
    pub(crate) kind: ListenerKind,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// Drops every listener installed by `owner` and returns how many went away.
    pub(crate) fn remove_owner(&mut self, owner: Behavior) -> usize {
        let mut removed = 0;
        self.map.retain(|_, events| {
            events.retain(|_, listeners| {
                let before = listeners.len();
                listeners.retain(|listener| listener.owner != owner);
                removed += before - listeners.len();
                !listeners.is_empty()
            });
            !events.is_empty()
        });
        removed
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) handled: usize,
    pub(crate) propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            handled: 0,
            propagation_stopped: false,
        }
    }
}
