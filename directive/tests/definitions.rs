use directive::{
    add_component, next_component_id, validate_component, ComponentDefinition,
    ComponentRuleError, Directive, ViewDefinition,
};

fn checkbox(id: u64, caption: &str) -> ComponentDefinition {
    ComponentDefinition {
        id,
        kind: "checkbox".to_string(),
        caption: caption.to_string(),
        state: false,
        immediate: false,
    }
}

#[test]
fn add_component_rejects_duplicate_id() {
    let mut components = Vec::new();
    add_component(&mut components, checkbox(1, "Accept")).expect("first component");
    let result = add_component(&mut components, checkbox(1, "Other"));
    assert_eq!(result, Err(ComponentRuleError::DuplicateId));
}

#[test]
fn add_component_rejects_empty_kind() {
    let mut components = Vec::new();
    let mut component = checkbox(1, "Accept");
    component.kind = String::new();
    let result = add_component(&mut components, component);
    assert_eq!(result, Err(ComponentRuleError::EmptyKind));
}

#[test]
fn validate_component_rejects_zero_id() {
    let result = validate_component(&[], 0, "checkbox");
    assert_eq!(result, Err(ComponentRuleError::ZeroId));
}

#[test]
fn next_component_id_skips_taken_ids() {
    let components = vec![checkbox(1, "a"), checkbox(5, "b")];
    assert_eq!(next_component_id(&components), 6);
    assert_eq!(next_component_id(&[]), 1);
}

#[test]
fn directive_accessors_default_missing_entries() {
    let directive = Directive::new(7, "checkbox");
    assert_eq!(directive.string_attribute("caption"), None);
    assert!(!directive.boolean_attribute("immediate"));
    assert!(!directive.boolean_variable("state"));
}

#[test]
fn directive_accessors_read_typed_entries() {
    let mut directive = Directive::new(7, "checkbox");
    directive.set_attribute("caption", "Accept");
    directive.set_attribute("immediate", true);
    directive.set_variable("state", true);
    assert_eq!(directive.string_attribute("caption"), Some("Accept"));
    assert!(directive.boolean_attribute("immediate"));
    assert!(directive.boolean_variable("state"));
}

#[test]
fn directive_accessors_ignore_wrongly_typed_entries() {
    let mut directive = Directive::new(7, "checkbox");
    directive.set_attribute("caption", 12);
    directive.set_variable("state", "yes");
    assert_eq!(directive.string_attribute("caption"), None);
    assert!(!directive.boolean_variable("state"));
}

#[test]
fn definition_save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("view.json");

    let mut definition = ViewDefinition {
        name: "settings".to_string(),
        description: "demo view".to_string(),
        components: Vec::new(),
    };
    add_component(&mut definition.components, checkbox(1, "Accept")).expect("add");

    definition.save_to_file(&path).expect("save");
    let loaded = ViewDefinition::load_from_file(&path).expect("load");
    assert_eq!(loaded.name, "settings");
    assert_eq!(loaded.components.len(), 1);
    assert_eq!(loaded.components[0].caption, "Accept");
}

#[test]
fn definition_load_defaults_optional_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("view.json");
    std::fs::write(
        &path,
        r#"{"name":"v","description":"","components":[{"id":3,"kind":"label"}]}"#,
    )
    .expect("write");

    let loaded = ViewDefinition::load_from_file(&path).expect("load");
    let component = loaded.component(3).expect("component");
    assert_eq!(component.caption, "");
    assert!(!component.state);
    assert!(!component.immediate);
}
