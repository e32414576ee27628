pub mod dnd;
pub mod registry;
pub mod widget;

pub use dnd::{DragEndEvent, DragSource, DropEffect, ListenerId};
pub use registry::{widget_for_kind, RegistryError, WidgetRegistry};
pub use widget::{CheckboxWidget, LabelWidget, RenderHost, Widget};
