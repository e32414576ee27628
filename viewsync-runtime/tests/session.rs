use directive::Directive;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use viewsync_core::DropEffect;
use viewsync_runtime::{spawn_session, SessionConfig, SessionMessage, SessionState};

fn checkbox_directive(id: u64, caption: &str, state: bool, immediate: bool) -> Directive {
    let mut directive = Directive::new(id, "checkbox");
    directive.set_attribute("caption", caption);
    directive.set_attribute("immediate", immediate);
    directive.set_variable("state", state);
    directive
}

fn label_directive(id: u64, caption: &str) -> Directive {
    let mut directive = Directive::new(id, "label");
    directive.set_attribute("caption", caption);
    directive
}

fn query_state(control: &mpsc::Sender<SessionMessage>) -> SessionState {
    let (tx, rx) = mpsc::channel();
    control
        .send(SessionMessage::QueryState(tx))
        .expect("session alive");
    rx.recv_timeout(Duration::from_secs(2)).expect("state reply")
}

#[test]
fn apply_directives_builds_widgets() {
    let (outbound_tx, _outbound_rx) = mpsc::channel();
    let (control, handle) = spawn_session(SessionConfig::default(), outbound_tx);

    control
        .send(SessionMessage::ApplyDirectives(vec![
            checkbox_directive(1, "Accept", true, false),
            label_directive(2, "Info"),
        ]))
        .expect("send");

    let state = query_state(&control);
    assert_eq!(state.components.len(), 2);
    let checkbox = state.components.iter().find(|c| c.id == 1).expect("c1");
    assert_eq!(checkbox.kind, "checkbox");
    assert_eq!(checkbox.caption, "Accept");
    assert_eq!(checkbox.checked, Some(true));
    let label = state.components.iter().find(|c| c.id == 2).expect("c2");
    assert_eq!(label.checked, None);

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}

#[test]
fn immediate_toggle_flushes_right_away() {
    let (outbound_tx, outbound_rx) = mpsc::channel();
    let config = SessionConfig {
        flush_interval_ms: 60_000,
    };
    let (control, handle) = spawn_session(config, outbound_tx);

    control
        .send(SessionMessage::ApplyDirectives(vec![checkbox_directive(
            1, "Accept", false, true,
        )]))
        .expect("send");
    control
        .send(SessionMessage::UserToggle(1, true))
        .expect("send");

    let batch = outbound_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("immediate batch");
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].component, 1);
    assert_eq!(batch[0].key, "state");
    assert_eq!(batch[0].value, Value::Bool(true));
    assert!(batch[0].immediate);

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}

#[test]
fn deferred_toggle_waits_for_explicit_flush() {
    let (outbound_tx, outbound_rx) = mpsc::channel();
    let config = SessionConfig {
        flush_interval_ms: 60_000,
    };
    let (control, handle) = spawn_session(config, outbound_tx);

    control
        .send(SessionMessage::ApplyDirectives(vec![checkbox_directive(
            1, "Accept", false, false,
        )]))
        .expect("send");
    control
        .send(SessionMessage::UserToggle(1, true))
        .expect("send");

    assert!(outbound_rx.recv_timeout(Duration::from_millis(200)).is_err());

    control.send(SessionMessage::FlushDeferred).expect("send");
    let batch = outbound_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("deferred batch");
    assert_eq!(batch.len(), 1);
    assert!(!batch[0].immediate);

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}

#[test]
fn toggle_matching_painted_value_sends_nothing() {
    let (outbound_tx, outbound_rx) = mpsc::channel();
    let (control, handle) = spawn_session(SessionConfig::default(), outbound_tx);

    control
        .send(SessionMessage::ApplyDirectives(vec![checkbox_directive(
            1, "Accept", true, true,
        )]))
        .expect("send");
    // Toggling to the value the server already painted changes nothing.
    control
        .send(SessionMessage::UserToggle(1, true))
        .expect("send");

    assert!(outbound_rx.recv_timeout(Duration::from_millis(300)).is_err());

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}

#[test]
fn toggle_before_any_directive_sends_nothing() {
    let (outbound_tx, outbound_rx) = mpsc::channel();
    let (control, handle) = spawn_session(SessionConfig::default(), outbound_tx);

    control
        .send(SessionMessage::UserToggle(1, true))
        .expect("send");
    control.send(SessionMessage::FlushDeferred).expect("send");

    assert!(outbound_rx.recv_timeout(Duration::from_millis(200)).is_err());

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}

#[test]
fn removed_component_is_torn_down() {
    let (outbound_tx, outbound_rx) = mpsc::channel();
    let (control, handle) = spawn_session(SessionConfig::default(), outbound_tx);

    control
        .send(SessionMessage::ApplyDirectives(vec![checkbox_directive(
            1, "Accept", false, true,
        )]))
        .expect("send");
    control
        .send(SessionMessage::RemoveComponent(1))
        .expect("send");

    let state = query_state(&control);
    assert!(state.components.is_empty());

    control
        .send(SessionMessage::UserToggle(1, true))
        .expect("send");
    assert!(outbound_rx.recv_timeout(Duration::from_millis(200)).is_err());

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}

#[test]
fn drag_listeners_fire_until_removed() {
    let (outbound_tx, _outbound_rx) = mpsc::channel();
    let (control, handle) = spawn_session(SessionConfig::default(), outbound_tx);

    control
        .send(SessionMessage::ApplyDirectives(vec![checkbox_directive(
            3, "Drag me", false, false,
        )]))
        .expect("send");

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let (reply_tx, reply_rx) = mpsc::channel();
    control
        .send(SessionMessage::AttachDragListener(
            3,
            Box::new(move |event| {
                assert_eq!(event.source, 3);
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            reply_tx,
        ))
        .expect("send");
    let listener = reply_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("listener id");

    control
        .send(SessionMessage::DragEnd(3, DropEffect::Move))
        .expect("send");
    // QueryState acts as a barrier: the drag event precedes it in the queue.
    let _ = query_state(&control);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    control
        .send(SessionMessage::RemoveDragListener(3, listener))
        .expect("send");
    control
        .send(SessionMessage::DragEnd(3, DropEffect::Copy))
        .expect("send");
    let _ = query_state(&control);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    control.send(SessionMessage::Shutdown).expect("shutdown");
    handle.join().expect("join");
}
