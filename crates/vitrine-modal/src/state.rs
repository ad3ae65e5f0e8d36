//! Per-id modal state and the reducer that drives it.
//!
//! Every change to modal state goes through [`reduce`] as a [`ModalAction`],
//! so the manager only ever has one code path that mutates the state map.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Identifier a modal is shown, hidden and removed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(String);

impl ModalId {
    /// Wrap a string id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ModalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Visibility flags and arguments of one modal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalState {
    /// The modal should be on screen
    pub visible: bool,
    /// Shown before its component mounted; becomes `visible` on mount
    pub delay_visible: bool,
    /// Stay mounted after hiding instead of being removed
    pub keep_mounted: bool,
    /// Arguments from the latest `show`
    pub args: Value,
}

/// Partial update of a modal's flags; `None` leaves a flag unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalFlags {
    /// New [`ModalState::visible`]
    pub visible: Option<bool>,
    pub delay_visible: Option<bool>,
    pub keep_mounted: Option<bool>,
}

/// State transitions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Show `id` with `args`. `mounted` tells whether its component is
    /// already on screen.
    Show {
        id: ModalId,
        args: Value,
        mounted: bool,
    },
    /// Take `id` off screen, keeping its state and args
    Hide {
        id: ModalId,
    },
    /// Delete the state of `id`
    Remove {
        id: ModalId,
    },
    /// Overwrite the flags `flags` sets, leaving the rest
    SetFlags {
        id: ModalId,
        flags: ModalFlags,
    },
}

impl ModalAction {
    /// The modal this action targets
    pub fn id(&self) -> &ModalId {
        match self {
            ModalAction::Show { id, .. }
            | ModalAction::Hide { id }
            | ModalAction::Remove { id }
            | ModalAction::SetFlags { id, .. } => id,
        }
    }
}

/// State of every modal that has been shown and not removed
pub type ModalStates = HashMap<ModalId, ModalState>;

/// Apply one action to the state map.
///
/// `Hide` and `SetFlags` on an unknown id are ignored; `Remove` is valid in
/// every state.
pub fn reduce(states: &mut ModalStates, action: ModalAction) {
    match action {
        ModalAction::Show { id, args, mounted } => {
            let state = states.entry(id).or_default();
            state.args = args;
            state.visible = mounted;
            state.delay_visible = !mounted;
        }
        ModalAction::Hide { id } => {
            if let Some(state) = states.get_mut(&id) {
                state.visible = false;
                state.delay_visible = false;
            }
        }
        ModalAction::Remove { id } => {
            states.remove(&id);
        }
        ModalAction::SetFlags { id, flags } => {
            if let Some(state) = states.get_mut(&id) {
                if let Some(visible) = flags.visible {
                    state.visible = visible;
                }
                if let Some(delay_visible) = flags.delay_visible {
                    state.delay_visible = delay_visible;
                }
                if let Some(keep_mounted) = flags.keep_mounted {
                    state.keep_mounted = keep_mounted;
                }
            }
        }
    }
}
