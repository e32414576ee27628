use channel::VariableUpdate;
use directive::{ComponentId, Directive};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/viewsync-server.sock";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub id: ComponentId,
    pub kind: String,
    pub caption: String,
    pub state: bool,
    pub immediate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerRequest {
    Render,
    VariableUpdates { updates: Vec<VariableUpdate> },
    ComponentList,
    ComponentShow { id: ComponentId },
    ViewLoad { path: String },
    ServerStop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerResponse {
    Ok { message: String },
    Error { message: String },
    Directives { directives: Vec<Directive> },
    ComponentList { components: Vec<ComponentSummary> },
    ComponentShow { component: ComponentSummary },
}
