//! What a host renders for a modal id.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::state::{ModalId, ModalState};

/// A renderable modal.
///
/// The manager never renders anything itself; it only hands components
/// back to the host through [`Placeholder`]s.
pub trait ModalComponent: Send + Sync {
    /// Human-readable name, used in logs
    fn name(&self) -> &str;

    /// Fixed id to register under when shown by reference. `None` lets the
    /// manager derive one.
    fn modal_id(&self) -> Option<&str> {
        None
    }
}

/// Shared handle to a component
pub type ComponentRef = Arc<dyn ModalComponent>;

/// Compare two components by identity (data pointer only).
pub(crate) fn same_component(a: &ComponentRef, b: &ComponentRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Something `show` can be called with: an id, or a component reference.
#[derive(Clone)]
pub enum ModalTarget {
    Id(ModalId),
    Component(ComponentRef),
}

impl ModalTarget {
    /// Target a concrete component type
    pub fn component<C: ModalComponent + 'static>(component: Arc<C>) -> Self {
        ModalTarget::Component(component)
    }
}

impl fmt::Debug for ModalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalTarget::Id(id) => f.debug_tuple("Id").field(id).finish(),
            ModalTarget::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
        }
    }
}

impl From<&str> for ModalTarget {
    fn from(id: &str) -> Self {
        ModalTarget::Id(id.into())
    }
}

impl From<String> for ModalTarget {
    fn from(id: String) -> Self {
        ModalTarget::Id(id.into())
    }
}

impl From<ModalId> for ModalTarget {
    fn from(id: ModalId) -> Self {
        ModalTarget::Id(id)
    }
}

impl From<ComponentRef> for ModalTarget {
    fn from(component: ComponentRef) -> Self {
        ModalTarget::Component(component)
    }
}

/// One modal the host should render right now.
#[derive(Clone)]
pub struct Placeholder {
    pub id: ModalId,
    pub component: ComponentRef,
    /// Registered default props overlaid with the latest show arguments
    pub props: Value,
    pub state: ModalState,
    /// Rendered from an on-screen declaration rather than the registry
    pub declared: bool,
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("id", &self.id)
            .field("component", &self.component.name())
            .field("props", &self.props)
            .field("state", &self.state)
            .field("declared", &self.declared)
            .finish()
    }
}

/// Overlay `args` on `defaults`: objects merge key by key, anything else
/// replaces the defaults unless it is null.
pub(crate) fn merge_props(defaults: &Value, args: &Value) -> Value {
    match (defaults, args) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (_, Value::Null) => defaults.clone(),
        _ => args.clone(),
    }
}
