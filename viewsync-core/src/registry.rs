use crate::widget::{CheckboxWidget, LabelWidget, RenderHost, Widget};
use channel::UpdateSender;
use directive::{ComponentId, Directive};
use std::collections::HashMap;

pub fn widget_for_kind(kind: &str) -> Option<Widget> {
    match kind {
        "checkbox" => Some(Widget::Checkbox(CheckboxWidget::new())),
        "label" => Some(Widget::Label(LabelWidget::new())),
        _ => None,
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown widget kind: {0}")]
    UnknownKind(String),
}

struct Host {
    updates: UpdateSender,
}

impl RenderHost for Host {
    fn replace_with_correct_implementation(
        &mut self,
        current_kind: &str,
        directive: &Directive,
    ) -> bool {
        directive.kind != current_kind
    }

    fn update_sender(&self) -> UpdateSender {
        self.updates.clone()
    }
}

/// Client-side widget table keyed by component id. Creates widgets on first
/// sight of an id, replaces them when a directive resolves to a different
/// implementation, and tears them down when the server signals removal.
pub struct WidgetRegistry {
    widgets: HashMap<ComponentId, Widget>,
    updates: UpdateSender,
}

impl WidgetRegistry {
    pub fn new(updates: UpdateSender) -> Self {
        Self {
            widgets: HashMap::new(),
            updates,
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    pub fn ids(&self) -> Vec<ComponentId> {
        let mut ids: Vec<ComponentId> = self.widgets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn apply(&mut self, directive: &Directive) -> Result<(), RegistryError> {
        let mut host = Host {
            updates: self.updates.clone(),
        };
        let needs_create = match self.widgets.get_mut(&directive.id) {
            Some(widget) => {
                // A stale widget cedes through the replacement hook without
                // being touched; the correct implementation then takes over
                // the component id below.
                widget.render(directive, &mut host);
                widget.kind() != directive.kind
            }
            None => true,
        };
        if needs_create {
            let mut fresh = widget_for_kind(&directive.kind)
                .ok_or_else(|| RegistryError::UnknownKind(directive.kind.clone()))?;
            fresh.render(directive, &mut host);
            self.widgets.insert(directive.id, fresh);
        }
        Ok(())
    }

    /// Route a user toggle to the component's checkbox. Returns false when
    /// the id is unknown or the widget takes no input.
    pub fn user_toggled(&mut self, id: ComponentId, checked: bool) -> bool {
        match self.widgets.get_mut(&id) {
            Some(Widget::Checkbox(widget)) => {
                widget.user_toggled(checked);
                true
            }
            Some(other) => {
                log::warn!("toggle for component {} ignored: {} takes no input", id, other.kind());
                false
            }
            None => {
                log::warn!("toggle for unknown component {} ignored", id);
                false
            }
        }
    }

    pub fn remove(&mut self, id: ComponentId) -> bool {
        self.widgets.remove(&id).is_some()
    }
}
