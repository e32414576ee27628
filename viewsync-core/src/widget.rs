use channel::{UpdateSender, VariableUpdate};
use directive::{ComponentId, Directive};

/// The widget's narrow view of its surroundings while rendering.
pub trait RenderHost {
    /// True when the directive calls for a different widget implementation.
    /// The caller must then leave this widget untouched and cede control.
    fn replace_with_correct_implementation(
        &mut self,
        current_kind: &str,
        directive: &Directive,
    ) -> bool;

    fn update_sender(&self) -> UpdateSender;
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub id: ComponentId,
    pub updates: UpdateSender,
}

/// Two-way mirror of a server-side boolean property.
#[derive(Debug, Default)]
pub struct CheckboxWidget {
    caption: String,
    checked: bool,
    immediate: bool,
    binding: Option<Binding>,
}

impl CheckboxWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> &'static str {
        "checkbox"
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_immediate(&self) -> bool {
        self.immediate
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn component_id(&self) -> Option<ComponentId> {
        self.binding.as_ref().map(|b| b.id)
    }

    pub fn render(&mut self, directive: &Directive, host: &mut dyn RenderHost) {
        if host.replace_with_correct_implementation(self.kind(), directive) {
            return;
        }

        self.binding = Some(Binding {
            id: directive.id,
            updates: host.update_sender(),
        });

        self.caption = directive
            .string_attribute("caption")
            .unwrap_or_default()
            .to_string();
        self.checked = directive.boolean_variable("state");
        self.immediate = directive.boolean_attribute("immediate");
    }

    /// The local user toggled the control. Unbound widgets drop the
    /// interaction without queueing it; bound widgets emit exactly one
    /// update, with no de-duplication at this layer.
    pub fn user_toggled(&mut self, checked: bool) {
        self.checked = checked;
        let Some(binding) = &self.binding else {
            log::debug!("dropping toggle on unbound checkbox");
            return;
        };
        let update = VariableUpdate::new(binding.id, "state", checked, self.immediate);
        if binding.updates.send(update).is_err() {
            log::warn!("update channel closed, toggle for component {} lost", binding.id);
        }
    }
}

/// One-way mirror: renders a caption and nothing else.
#[derive(Debug, Default)]
pub struct LabelWidget {
    caption: String,
    id: Option<ComponentId>,
}

impl LabelWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> &'static str {
        "label"
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn component_id(&self) -> Option<ComponentId> {
        self.id
    }

    pub fn render(&mut self, directive: &Directive, host: &mut dyn RenderHost) {
        if host.replace_with_correct_implementation(self.kind(), directive) {
            return;
        }
        self.id = Some(directive.id);
        self.caption = directive
            .string_attribute("caption")
            .unwrap_or_default()
            .to_string();
    }
}

#[derive(Debug)]
pub enum Widget {
    Checkbox(CheckboxWidget),
    Label(LabelWidget),
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Checkbox(w) => w.kind(),
            Widget::Label(w) => w.kind(),
        }
    }

    pub fn caption(&self) -> &str {
        match self {
            Widget::Checkbox(w) => w.caption(),
            Widget::Label(w) => w.caption(),
        }
    }

    pub fn component_id(&self) -> Option<ComponentId> {
        match self {
            Widget::Checkbox(w) => w.component_id(),
            Widget::Label(w) => w.component_id(),
        }
    }

    pub fn render(&mut self, directive: &Directive, host: &mut dyn RenderHost) {
        match self {
            Widget::Checkbox(w) => w.render(directive, host),
            Widget::Label(w) => w.render(directive, host),
        }
    }
}
