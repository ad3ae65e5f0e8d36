//! The view a rendered modal has of itself.

use serde_json::Value;

use crate::manager::ModalManager;
use crate::state::{ModalId, ModalState};
use crate::ticket::ModalTicket;

/// Controls for one modal id, handed to the component rendering it.
#[derive(Clone)]
pub struct ModalHandle {
    manager: ModalManager,
    id: ModalId,
}

impl ModalHandle {
    pub(crate) fn new(manager: ModalManager, id: ModalId) -> Self {
        Self { manager, id }
    }

    /// The id this handle controls
    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// Current state, or `None` if the modal was removed
    pub fn state(&self) -> Option<ModalState> {
        self.manager.state(self.id.as_str())
    }

    /// Arguments of the latest show, or null if the modal has no state
    pub fn args(&self) -> Value {
        self.state().map(|s| s.args).unwrap_or(Value::Null)
    }

    /// Check if the modal is on screen
    pub fn visible(&self) -> bool {
        self.manager.is_visible(self.id.as_str())
    }

    /// Show this modal again (see [`ModalManager::show`])
    pub fn show(&self, args: Value) -> ModalTicket {
        self.manager.show(self.id.clone(), args)
    }

    /// Hide this modal; a pending result stays pending
    pub fn hide(&self) {
        self.manager.hide(self.id.as_str());
    }

    /// Remove this modal and cancel its pending result
    pub fn remove(&self) {
        self.manager.remove(self.id.as_str());
    }

    /// Settle the pending result with `value`
    pub fn resolve(&self, value: Value) -> bool {
        self.manager.resolve(self.id.as_str(), value)
    }

    /// Settle the pending result as rejected with `reason`
    pub fn reject(&self, reason: Value) -> bool {
        self.manager.reject(self.id.as_str(), reason)
    }

    /// Resolve with `value`, then hide.
    pub fn resolve_hide(&self, value: Value) -> bool {
        let settled = self.resolve(value);
        self.hide();
        settled
    }

    /// Report that the component is on screen
    pub fn mounted(&self) {
        self.manager.mounted(self.id.as_str());
    }

    /// Report that the hide transition finished
    pub fn hidden(&self) {
        self.manager.hidden(self.id.as_str());
    }

    /// Keep the component mounted after hiding
    pub fn keep_mounted(&self, keep: bool) {
        self.manager.set_keep_mounted(self.id.as_str(), keep);
    }
}

impl std::fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalHandle").field("id", &self.id).finish()
    }
}
