use channel::{InProcessChannel, UpdateChannel, UpdateQueue, VariableUpdate};
use directive::ComponentId;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use viewsync_core::{DragSource, Widget, WidgetRegistry};

use crate::message::{ComponentSnapshot, SessionConfig, SessionMessage, SessionState};

pub fn spawn_session(
    config: SessionConfig,
    outbound: Sender<Vec<VariableUpdate>>,
) -> (Sender<SessionMessage>, JoinHandle<()>) {
    let (control_tx, control_rx) = mpsc::channel();
    let handle = thread::spawn(move || run_session_loop(config, control_rx, outbound));
    (control_tx, handle)
}

/// Single-threaded client session: widgets, drag sources, and the batching
/// queue are owned by this loop and never touched from outside it.
pub fn run_session_loop(
    config: SessionConfig,
    control_rx: Receiver<SessionMessage>,
    outbound: Sender<Vec<VariableUpdate>>,
) {
    let emissions = InProcessChannel::new();
    let mut registry = WidgetRegistry::new(emissions.sender());
    let mut queue = UpdateQueue::new();
    let mut drag_sources: HashMap<ComponentId, DragSource> = HashMap::new();
    let mut flushed_batches: u64 = 0;
    let flush_interval = Duration::from_millis(config.flush_interval_ms);
    let mut last_flush = Instant::now();

    loop {
        let mut disconnected = false;
        loop {
            match control_rx.try_recv() {
                Ok(message) => match message {
                    SessionMessage::ApplyDirectives(directives) => {
                        for directive in &directives {
                            if let Err(err) = registry.apply(directive) {
                                log::warn!(
                                    "directive for component {} rejected: {err}",
                                    directive.id
                                );
                                continue;
                            }
                            // The painted values are the server truth; echoing
                            // them back would be a no-change update.
                            for (name, value) in &directive.variables {
                                queue.acknowledge(directive.id, name, value.clone());
                            }
                            drag_sources
                                .entry(directive.id)
                                .or_insert_with(|| DragSource::new(directive.id));
                        }
                    }
                    SessionMessage::UserToggle(id, checked) => {
                        registry.user_toggled(id, checked);
                    }
                    SessionMessage::RemoveComponent(id) => {
                        registry.remove(id);
                        queue.forget(id);
                        drag_sources.remove(&id);
                    }
                    SessionMessage::AttachDragListener(id, callback, reply) => {
                        let source = drag_sources
                            .entry(id)
                            .or_insert_with(|| DragSource::new(id));
                        let _ = reply.send(source.on_drag_end(callback));
                    }
                    SessionMessage::RemoveDragListener(id, listener) => {
                        if let Some(source) = drag_sources.get_mut(&id) {
                            source.remove_drag_end_listener(listener);
                        }
                    }
                    SessionMessage::DragEnd(id, effect) => {
                        if let Some(source) = drag_sources.get_mut(&id) {
                            source.drag_end(effect);
                        }
                    }
                    SessionMessage::FlushDeferred => {
                        flushed_batches += flush(&mut queue, &outbound);
                        last_flush = Instant::now();
                    }
                    SessionMessage::QueryState(reply) => {
                        let _ = reply.send(snapshot(&registry, &queue, flushed_batches));
                    }
                    SessionMessage::Shutdown => return,
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if disconnected {
            break;
        }

        let mut force_flush = false;
        while let Ok(Some(update)) = emissions.try_recv() {
            force_flush |= update.immediate;
            queue.push(update);
        }

        if force_flush || (!queue.is_empty() && last_flush.elapsed() >= flush_interval) {
            flushed_batches += flush(&mut queue, &outbound);
            last_flush = Instant::now();
        }

        thread::sleep(Duration::from_millis(1));
    }
}

fn flush(queue: &mut UpdateQueue, outbound: &Sender<Vec<VariableUpdate>>) -> u64 {
    let batch = queue.flush();
    if batch.is_empty() {
        return 0;
    }
    if outbound.send(batch).is_err() {
        log::warn!("outbound channel closed, dropping update batch");
        return 0;
    }
    1
}

fn snapshot(registry: &WidgetRegistry, queue: &UpdateQueue, flushed_batches: u64) -> SessionState {
    let components = registry
        .ids()
        .into_iter()
        .filter_map(|id| registry.get(id).map(|widget| (id, widget)))
        .map(|(id, widget)| ComponentSnapshot {
            id,
            kind: widget.kind().to_string(),
            caption: widget.caption().to_string(),
            checked: match widget {
                Widget::Checkbox(w) => Some(w.is_checked()),
                Widget::Label(_) => None,
            },
        })
        .collect();
    SessionState {
        components,
        queued_updates: queue.len(),
        flushed_batches,
    }
}
