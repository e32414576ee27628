use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub type ComponentId = u64;

/// Server-to-client payload describing one component's current attributes.
/// Attributes are server-owned presentation data; variables are two-way state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directive {
    pub id: ComponentId,
    pub kind: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl Directive {
    pub fn new(id: ComponentId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            attributes: Map::new(),
            variables: Map::new(),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_string(), value.into());
    }

    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }

    /// Missing or non-boolean attributes read as false.
    pub fn boolean_attribute(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Missing or non-boolean variables read as false.
    pub fn boolean_variable(&self, name: &str) -> bool {
        self.variables
            .get(name)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDefinition {
    pub name: String,
    pub description: String,
    pub components: Vec<ComponentDefinition>,
}

impl Default for ViewDefinition {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            description: String::new(),
            components: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub id: ComponentId,
    pub kind: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub state: bool,
    #[serde(default)]
    pub immediate: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum DefinitionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ComponentRuleError {
    #[error("component id is already taken")]
    DuplicateId,
    #[error("component kind must not be empty")]
    EmptyKind,
    #[error("component id must be nonzero")]
    ZeroId,
}

pub fn validate_component(
    components: &[ComponentDefinition],
    id: ComponentId,
    kind: &str,
) -> Result<(), ComponentRuleError> {
    if id == 0 {
        return Err(ComponentRuleError::ZeroId);
    }
    if kind.is_empty() {
        return Err(ComponentRuleError::EmptyKind);
    }
    if components.iter().any(|c| c.id == id) {
        return Err(ComponentRuleError::DuplicateId);
    }
    Ok(())
}

pub fn add_component(
    components: &mut Vec<ComponentDefinition>,
    component: ComponentDefinition,
) -> Result<(), ComponentRuleError> {
    validate_component(components, component.id, &component.kind)?;
    components.push(component);
    Ok(())
}

pub fn next_component_id(components: &[ComponentDefinition]) -> ComponentId {
    components.iter().map(|c| c.id).max().unwrap_or(0) + 1
}

impl ViewDefinition {
    pub fn component(&self, id: ComponentId) -> Option<&ComponentDefinition> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut ComponentDefinition> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DefinitionError> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DefinitionError> {
        let data = fs::read(path)?;
        let definition = serde_json::from_slice(&data)?;
        Ok(definition)
    }
}
