use directive::ComponentId;

/// Outcome reported by the browser for a finished drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    None,
    Copy,
    Move,
    Link,
}

#[derive(Debug, Clone)]
pub struct DragEndEvent {
    pub source: ComponentId,
    pub drop_effect: DropEffect,
}

/// Handle returned at registration time; removal goes through the handle
/// instead of comparing callbacks, which have no usable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type DragEndCallback = Box<dyn FnMut(&DragEndEvent) + Send>;

/// Drag-source extension for one component. Every registered listener is
/// invoked exactly once per completed gesture, on the caller's thread.
pub struct DragSource {
    source: ComponentId,
    listeners: Vec<(ListenerId, DragEndCallback)>,
    next_listener: u64,
}

impl DragSource {
    pub fn new(source: ComponentId) -> Self {
        Self {
            source,
            listeners: Vec::new(),
            next_listener: 1,
        }
    }

    pub fn source(&self) -> ComponentId {
        self.source
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn on_drag_end(
        &mut self,
        callback: impl FnMut(&DragEndEvent) + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    pub fn remove_drag_end_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    pub fn drag_end(&mut self, drop_effect: DropEffect) {
        let event = DragEndEvent {
            source: self.source,
            drop_effect,
        };
        for (_, callback) in &mut self.listeners {
            callback(&event);
        }
    }
}
