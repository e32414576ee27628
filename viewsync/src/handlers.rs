use crate::commands::{Commands, ComponentCommands};
use crate::output::*;
use channel::VariableUpdate;
use directive::{ComponentDefinition, ViewDefinition};
use std::sync::mpsc;
use std::time::Duration;
use viewsync_cli::protocol::{ServerRequest, ServerResponse};
use viewsync_cli::{client, daemon, ServerConfig, ServerState};
use viewsync_core::DropEffect;
use viewsync_runtime::{spawn_session, SessionConfig, SessionMessage};

pub fn handle_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve {
            socket,
            view,
            config,
        } => handle_serve(socket, view, config)?,
        Commands::Stop { socket } => send_and_print(&socket, ServerRequest::ServerStop),
        Commands::Render { socket } => send_and_print(&socket, ServerRequest::Render),
        Commands::Set {
            id,
            value,
            deferred,
            socket,
        } => {
            let update = VariableUpdate::new(id, "state", value, !deferred);
            send_and_print(
                &socket,
                ServerRequest::VariableUpdates {
                    updates: vec![update],
                },
            );
        }
        Commands::Component { command } => match command {
            ComponentCommands::List { socket } => {
                send_and_print(&socket, ServerRequest::ComponentList)
            }
            ComponentCommands::Show { id, socket } => {
                send_and_print(&socket, ServerRequest::ComponentShow { id })
            }
        },
        Commands::ViewLoad { path, socket } => match std::fs::canonicalize(&path) {
            Ok(resolved) => send_and_print(
                &socket,
                ServerRequest::ViewLoad {
                    path: resolved.to_string_lossy().to_string(),
                },
            ),
            Err(err) => print_error(&format!("Failed to resolve view path: {err}")),
        },
        Commands::Demo { toggles, view } => handle_demo(toggles, view)?,
    }
    Ok(())
}

fn send_and_print(socket: &Option<String>, request: ServerRequest) {
    let result = match socket {
        Some(path) => client::send_request_to(path, &request),
        None => client::send_request(&request),
    };
    match result {
        Ok(response) => print_response(response),
        Err(err) => print_error(&err),
    }
}

fn print_response(response: ServerResponse) {
    match response {
        ServerResponse::Ok { message } => print_info(&message),
        ServerResponse::Error { message } => print_error(&message),
        ServerResponse::Directives { directives } => print_directives(&directives),
        ServerResponse::ComponentList { components } => print_component_list(&components),
        ServerResponse::ComponentShow { component } => print_component(&component),
    }
}

fn handle_serve(
    socket: Option<String>,
    view: Option<String>,
    config: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut server_config = match config {
        Some(path) => ServerConfig::load_from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(socket) = socket {
        server_config.socket_path = socket;
    }
    if let Some(view) = view {
        server_config.view_path = Some(view);
    }

    let view = match &server_config.view_path {
        Some(path) => ViewDefinition::load_from_file(path)?,
        None => demo_view(),
    };
    daemon::run_server_at(&server_config.socket_path, view)?;
    Ok(())
}

fn demo_view() -> ViewDefinition {
    ViewDefinition {
        name: "demo".to_string(),
        description: "Built-in demo view".to_string(),
        components: vec![
            ComponentDefinition {
                id: 1,
                kind: "checkbox".to_string(),
                caption: "Accept terms".to_string(),
                state: false,
                immediate: true,
            },
            ComponentDefinition {
                id: 2,
                kind: "checkbox".to_string(),
                caption: "Subscribe to updates".to_string(),
                state: true,
                immediate: false,
            },
            ComponentDefinition {
                id: 3,
                kind: "label".to_string(),
                caption: "Preferences".to_string(),
                state: false,
                immediate: false,
            },
        ],
    }
}

/// Drive a local session against an in-process server: paint the view,
/// simulate user toggles, and feed each flushed batch back through the
/// server so the round trip is visible on stdout.
fn handle_demo(toggles: u64, view: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let view = match view {
        Some(path) => ViewDefinition::load_from_file(path)?,
        None => demo_view(),
    };
    let mut server = ServerState::new(view);

    let (outbound_tx, outbound_rx) = mpsc::channel();
    let config = SessionConfig {
        flush_interval_ms: 50,
    };
    let (control, handle) = spawn_session(config, outbound_tx);
    let _ = control.send(SessionMessage::ApplyDirectives(server.paint_all()));

    let checkbox_ids: Vec<u64> = server
        .view()
        .components
        .iter()
        .filter(|c| c.kind == "checkbox")
        .map(|c| c.id)
        .collect();
    if checkbox_ids.is_empty() {
        print_error("View has no checkboxes to demo");
        let _ = control.send(SessionMessage::Shutdown);
        let _ = handle.join();
        return Ok(());
    }

    for i in 0..toggles {
        let id = checkbox_ids[(i as usize) % checkbox_ids.len()];
        let current = server
            .view()
            .component(id)
            .map(|c| c.state)
            .unwrap_or(false);
        let _ = control.send(SessionMessage::UserToggle(id, !current));

        match outbound_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(batch) => {
                print_update_batch(&batch);
                let repaints = server.change_variables(&batch);
                if !repaints.is_empty() {
                    print_directives(&repaints);
                    let _ = control.send(SessionMessage::ApplyDirectives(repaints));
                }
            }
            Err(_) => log::warn!("no batch flushed for toggle {i}"),
        }
    }

    let (event_tx, event_rx) = mpsc::channel();
    let drag_id = checkbox_ids[0];
    let (listener_tx, listener_rx) = mpsc::channel();
    let _ = control.send(SessionMessage::AttachDragListener(
        drag_id,
        Box::new(move |event| {
            let _ = event_tx.send((event.source, event.drop_effect));
        }),
        listener_tx,
    ));
    let _ = listener_rx.recv_timeout(Duration::from_secs(1));
    let _ = control.send(SessionMessage::DragEnd(drag_id, DropEffect::Move));
    if let Ok((source, effect)) = event_rx.recv_timeout(Duration::from_secs(1)) {
        print_info(&format!("Drag ended on component {source} ({effect:?})"));
    }

    let (state_tx, state_rx) = mpsc::channel();
    let _ = control.send(SessionMessage::QueryState(state_tx));
    if let Ok(state) = state_rx.recv_timeout(Duration::from_secs(1)) {
        print_info(&format!(
            "Session done: {} components, {} batches flushed",
            state.components.len(),
            state.flushed_batches
        ));
    }

    let _ = control.send(SessionMessage::Shutdown);
    let _ = handle.join();
    Ok(())
}
