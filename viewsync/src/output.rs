use channel::VariableUpdate;
use directive::Directive;
use viewsync_cli::protocol::ComponentSummary;

pub fn print_info(message: &str) {
    println!("[viewsync][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[viewsync][ERROR] {message}");
}

pub fn print_component_list(components: &[ComponentSummary]) {
    if components.is_empty() {
        print_info("No components");
    } else {
        print_info("Components:");
        for component in components {
            print_component(component);
        }
    }
}

pub fn print_component(component: &ComponentSummary) {
    if component.kind == "checkbox" {
        println!(
            "{} ({}) \"{}\" state={} immediate={}",
            component.id, component.kind, component.caption, component.state, component.immediate
        );
    } else {
        println!(
            "{} ({}) \"{}\"",
            component.id, component.kind, component.caption
        );
    }
}

pub fn print_directives(directives: &[Directive]) {
    if directives.is_empty() {
        print_info("No directives");
        return;
    }
    print_info("Directives:");
    for directive in directives {
        match serde_json::to_string(directive) {
            Ok(json) => println!("{json}"),
            Err(err) => print_error(&format!("Failed to encode directive: {err}")),
        }
    }
}

pub fn print_update_batch(batch: &[VariableUpdate]) {
    print_info(&format!("Flushed batch of {}:", batch.len()));
    for update in batch {
        println!(
            "  component={} key={} value={} immediate={}",
            update.component, update.key, update.value, update.immediate
        );
    }
}
