use crate::VariableUpdate;
use directive::ComponentId;
use serde_json::Value;
use std::collections::HashMap;

/// Batching layer between widget emissions and the wire. Deferred updates
/// coalesce per (component, key) with last write wins; a flushed value is
/// recorded as acknowledged, and an update that matches the acknowledged
/// value is dropped instead of sent.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    pending: Vec<VariableUpdate>,
    acknowledged: HashMap<(ComponentId, String), Value>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, update: VariableUpdate) {
        if let Some(existing) = self
            .pending
            .iter_mut()
            .find(|u| u.component == update.component && u.key == update.key)
        {
            existing.value = update.value;
            existing.immediate = update.immediate;
        } else {
            self.pending.push(update);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Record a server-confirmed value without sending anything. Applied when
    /// a directive paints the variable, so echoing it back is suppressed.
    pub fn acknowledge(&mut self, component: ComponentId, key: &str, value: Value) {
        self.acknowledged.insert((component, key.to_string()), value);
    }

    /// Drain pending updates in first-touch order, skipping values equal to
    /// the last acknowledged one for their (component, key) pair.
    pub fn flush(&mut self) -> Vec<VariableUpdate> {
        let mut batch = Vec::new();
        for update in self.pending.drain(..) {
            let slot = (update.component, update.key.clone());
            if self.acknowledged.get(&slot) == Some(&update.value) {
                log::debug!(
                    "suppressing unchanged update for component {} key {}",
                    update.component,
                    update.key
                );
                continue;
            }
            self.acknowledged.insert(slot, update.value.clone());
            batch.push(update);
        }
        batch
    }

    /// Drop all queue state for a removed component.
    pub fn forget(&mut self, component: ComponentId) {
        self.pending.retain(|u| u.component != component);
        self.acknowledged.retain(|(id, _), _| *id != component);
    }
}
