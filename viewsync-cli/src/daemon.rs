use crate::protocol::{
    ComponentSummary, ServerRequest, ServerResponse, DEFAULT_SOCKET_PATH,
};
use channel::VariableUpdate;
use directive::{ComponentDefinition, ComponentId, Directive, ViewDefinition};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};

/// Authoritative server-side model: component values live in the view
/// definition and every directive is painted from it.
pub struct ServerState {
    view: ViewDefinition,
}

impl ServerState {
    pub fn new(view: ViewDefinition) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &ViewDefinition {
        &self.view
    }

    pub fn replace_view(&mut self, view: ViewDefinition) {
        self.view = view;
    }

    pub fn paint(&self, component: &ComponentDefinition) -> Directive {
        let mut directive = Directive::new(component.id, component.kind.clone());
        directive.set_attribute("caption", component.caption.clone());
        if component.kind == "checkbox" {
            directive.set_attribute("immediate", component.immediate);
            directive.set_variable("state", component.state);
        }
        directive
    }

    pub fn paint_all(&self) -> Vec<Directive> {
        self.view.components.iter().map(|c| self.paint(c)).collect()
    }

    pub fn paint_component(&self, id: ComponentId) -> Option<Directive> {
        self.view.component(id).map(|c| self.paint(c))
    }

    /// Apply client variable updates to the server truth and repaint the
    /// components whose value actually changed. Unknown ids and keys are
    /// dropped with a warning; the client is never failed for them.
    pub fn change_variables(&mut self, updates: &[VariableUpdate]) -> Vec<Directive> {
        let mut changed: Vec<ComponentId> = Vec::new();
        for update in updates {
            let Some(component) = self.view.component_mut(update.component) else {
                log::warn!("update for unknown component {} dropped", update.component);
                continue;
            };
            if component.kind != "checkbox" || update.key != "state" {
                log::warn!(
                    "update for component {} key {} dropped: not a writable variable",
                    update.component,
                    update.key
                );
                continue;
            }
            let Some(value) = update.value.as_bool() else {
                log::warn!(
                    "update for component {} dropped: state must be a boolean",
                    update.component
                );
                continue;
            };
            if component.state != value {
                component.state = value;
                if !changed.contains(&component.id) {
                    changed.push(component.id);
                }
            }
        }
        changed
            .into_iter()
            .filter_map(|id| self.paint_component(id))
            .collect()
    }

    pub fn summaries(&self) -> Vec<ComponentSummary> {
        self.view
            .components
            .iter()
            .map(|c| ComponentSummary {
                id: c.id,
                kind: c.kind.clone(),
                caption: c.caption.clone(),
                state: c.state,
                immediate: c.immediate,
            })
            .collect()
    }

    pub fn summary(&self, id: ComponentId) -> Option<ComponentSummary> {
        self.summaries().into_iter().find(|c| c.id == id)
    }
}

pub fn run_server(view: ViewDefinition) -> Result<(), String> {
    run_server_at(DEFAULT_SOCKET_PATH, view)
}

pub fn run_server_at(socket_path: &str, view: ViewDefinition) -> Result<(), String> {
    let mut state = ServerState::new(view);

    if std::path::Path::new(socket_path).exists() {
        let _ = std::fs::remove_file(socket_path);
    }
    let listener = UnixListener::bind(socket_path)
        .map_err(|e| format!("Failed to bind server socket: {e}"))?;
    log::info!("serving view '{}' at {socket_path}", state.view.name);

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => match handle_client(stream, &mut state) {
                Ok(stop) => {
                    if stop {
                        break;
                    }
                }
                Err(err) => eprintln!("Server client error: {err}"),
            },
            Err(err) => {
                eprintln!("Server accept error: {err}");
            }
        }
    }

    let _ = std::fs::remove_file(socket_path);
    Ok(())
}

fn handle_client(stream: UnixStream, state: &mut ServerState) -> Result<bool, String> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| e.to_string())?;
    let request: ServerRequest = serde_json::from_str(line.trim()).map_err(|e| e.to_string())?;
    let mut stream = reader.into_inner();

    let mut stop = false;
    let response = match request {
        ServerRequest::Render => ServerResponse::Directives {
            directives: state.paint_all(),
        },
        ServerRequest::VariableUpdates { updates } => ServerResponse::Directives {
            directives: state.change_variables(&updates),
        },
        ServerRequest::ComponentList => ServerResponse::ComponentList {
            components: state.summaries(),
        },
        ServerRequest::ComponentShow { id } => match state.summary(id) {
            Some(component) => ServerResponse::ComponentShow { component },
            None => ServerResponse::Error {
                message: format!("No component with id {id}"),
            },
        },
        ServerRequest::ViewLoad { path } => match ViewDefinition::load_from_file(&path) {
            Ok(view) => {
                let name = view.name.clone();
                state.replace_view(view);
                ServerResponse::Ok {
                    message: format!("View '{name}' loaded"),
                }
            }
            Err(err) => ServerResponse::Error {
                message: format!("Failed to load view: {err}"),
            },
        },
        ServerRequest::ServerStop => {
            stop = true;
            ServerResponse::Ok {
                message: "Server stopping".to_string(),
            }
        }
    };

    send_response(&mut stream, &response)?;
    Ok(stop)
}

fn send_response(stream: &mut impl Write, response: &ServerResponse) -> Result<(), String> {
    let payload = serde_json::to_string(response).map_err(|e| e.to_string())?;
    stream
        .write_all(format!("{payload}\n").as_bytes())
        .map_err(|e| e.to_string())?;
    Ok(())
}
