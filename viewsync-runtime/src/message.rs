use directive::{ComponentId, Directive};
use std::sync::mpsc::Sender;
use viewsync_core::{DragEndEvent, DropEffect, ListenerId};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Batch window for deferred updates, in milliseconds.
    pub flush_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: 200,
        }
    }
}

pub enum SessionMessage {
    ApplyDirectives(Vec<Directive>),
    UserToggle(ComponentId, bool),
    RemoveComponent(ComponentId),
    AttachDragListener(
        ComponentId,
        Box<dyn FnMut(&DragEndEvent) + Send>,
        Sender<ListenerId>,
    ),
    RemoveDragListener(ComponentId, ListenerId),
    DragEnd(ComponentId, DropEffect),
    FlushDeferred,
    QueryState(Sender<SessionState>),
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct ComponentSnapshot {
    pub id: ComponentId,
    pub kind: String,
    pub caption: String,
    pub checked: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub components: Vec<ComponentSnapshot>,
    pub queued_updates: usize,
    pub flushed_batches: u64,
}
