//! The modal manager: one context object owning every modal's state,
//! registrations and pending results.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;

use crate::component::{merge_props, same_component, ComponentRef, ModalTarget, Placeholder};
use crate::error::ModalError;
use crate::handle::ModalHandle;
use crate::state::{reduce, ModalAction, ModalFlags, ModalId, ModalState, ModalStates};
use crate::ticket::{ModalTicket, PendingTicket};

const DERIVED_ID_PREFIX: &str = "_vitrine_modal_";

#[derive(Clone)]
struct Registration {
    component: ComponentRef,
    default_props: Value,
}

#[derive(Default)]
struct Inner {
    states: ModalStates,
    registry: HashMap<ModalId, Registration>,
    declared: HashMap<ModalId, ComponentRef>,
    mounted: HashSet<ModalId>,
    pending: HashMap<ModalId, PendingTicket>,
    next_derived: u64,
}

impl Inner {
    /// Id a component reference is shown under, registering it with `args`
    /// as default props the first time it is seen.
    fn id_for_component(&mut self, component: ComponentRef, args: &Value) -> ModalId {
        if let Some(id) = self
            .registry
            .iter()
            .find(|(_, reg)| same_component(&reg.component, &component))
            .map(|(id, _)| id.clone())
        {
            return id;
        }

        let id = match component.modal_id() {
            Some(fixed) => {
                let id = ModalId::from(fixed);
                if let Some(existing) = self.registry.get(&id) {
                    // The first registration of an id keeps it
                    tracing::warn!(
                        %id,
                        registered = existing.component.name(),
                        shown = component.name(),
                        "modal id already registered to another component"
                    );
                    return id;
                }
                id
            }
            None => {
                self.next_derived += 1;
                ModalId::new(format!("{DERIVED_ID_PREFIX}{}", self.next_derived))
            }
        };

        tracing::debug!(%id, component = component.name(), "registering modal on first show");
        self.registry.insert(
            id.clone(),
            Registration {
                component,
                default_props: args.clone(),
            },
        );
        id
    }

    fn dispatch(&mut self, action: ModalAction) {
        tracing::debug!(?action, "modal dispatch");
        if let ModalAction::Remove { id } = &action {
            self.mounted.remove(id);
        }
        reduce(&mut self.states, action);
    }
}

/// Shows, hides and removes modals by id.
///
/// Cloning is cheap; all clones share one set of maps, and every change is
/// a single reducer dispatch under one lock. Subscribers to
/// [`ModalManager::subscribe`] see a new version after each dispatch.
#[derive(Clone)]
pub struct ModalManager {
    inner: Arc<Mutex<Inner>>,
    version: Arc<watch::Sender<u64>>,
}

impl Default for ModalManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalManager {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            version: Arc::new(version),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v += 1);
    }

    /// Register `component` under `id` for later shows by plain id.
    pub fn register(&self, id: impl Into<ModalId>, component: ComponentRef, default_props: Value) {
        let id = id.into();
        tracing::debug!(%id, component = component.name(), "registering modal");
        self.lock().registry.insert(
            id,
            Registration {
                component,
                default_props,
            },
        );
        self.bump();
    }

    pub fn unregister(&self, id: &str) {
        self.lock().registry.remove(id);
        self.bump();
    }

    /// Record an on-screen declaration of `component` under `id`.
    ///
    /// Declared modals render from [`ModalManager::placeholders`] without a
    /// registry entry.
    pub fn declare(&self, id: impl Into<ModalId>, component: ComponentRef) {
        self.lock().declared.insert(id.into(), component);
        self.bump();
    }

    pub fn undeclare(&self, id: &str) {
        self.lock().declared.remove(id);
        self.bump();
    }

    /// Show a modal and get a ticket for its result.
    ///
    /// While a result is pending, every `show` for the same id returns the
    /// same ticket.
    pub fn show(&self, target: impl Into<ModalTarget>, args: Value) -> ModalTicket {
        let ticket = {
            let mut inner = self.lock();
            let id = match target.into() {
                ModalTarget::Id(id) => id,
                ModalTarget::Component(component) => inner.id_for_component(component, &args),
            };

            let mounted = inner.mounted.contains(&id);
            inner.dispatch(ModalAction::Show {
                id: id.clone(),
                args,
                mounted,
            });

            inner
                .pending
                .entry(id.clone())
                .or_insert_with(|| PendingTicket::new(id))
                .ticket()
        };
        self.bump();
        ticket
    }

    /// Hide a modal, keeping its state. Pending results stay pending.
    pub fn hide(&self, id: &str) {
        self.lock().dispatch(ModalAction::Hide { id: id.into() });
        self.bump();
    }

    /// Delete a modal's state and drop its pending result.
    ///
    /// Waiters on the dropped ticket observe [`ModalError::Cancelled`];
    /// later `resolve`/`reject` calls for the id are no-ops.
    pub fn remove(&self, id: &str) {
        {
            let mut inner = self.lock();
            inner.dispatch(ModalAction::Remove { id: id.into() });
            if inner.pending.remove(id).is_some() {
                tracing::debug!(id, "dropped pending modal result");
            }
        }
        self.bump();
    }

    /// The host finished hiding `id`: remove it unless it keeps mounted.
    pub fn hidden(&self, id: &str) {
        let keep = self
            .lock()
            .states
            .get(id)
            .map(|s| s.keep_mounted || s.visible)
            .unwrap_or(true);
        if !keep {
            self.remove(id);
        }
    }

    /// The host mounted the component for `id`.
    ///
    /// A modal shown before it was mounted becomes visible now.
    pub fn mounted(&self, id: &str) {
        {
            let mut inner = self.lock();
            inner.mounted.insert(id.into());
            let delayed = inner.states.get(id).is_some_and(|s| s.delay_visible);
            if delayed {
                inner.dispatch(ModalAction::SetFlags {
                    id: id.into(),
                    flags: ModalFlags {
                        visible: Some(true),
                        delay_visible: Some(false),
                        keep_mounted: None,
                    },
                });
            }
        }
        self.bump();
    }

    /// The host unmounted the component for `id`.
    pub fn unmounted(&self, id: &str) {
        self.lock().mounted.remove(id);
        self.bump();
    }

    pub fn set_keep_mounted(&self, id: &str, keep_mounted: bool) {
        self.lock().dispatch(ModalAction::SetFlags {
            id: id.into(),
            flags: ModalFlags {
                keep_mounted: Some(keep_mounted),
                ..Default::default()
            },
        });
        self.bump();
    }

    /// Settle `id`'s pending ticket with a value. Returns `false` if
    /// nothing was pending.
    pub fn resolve(&self, id: &str, value: Value) -> bool {
        let pending = self.lock().pending.remove(id);
        match pending {
            Some(pending) => {
                pending.settle(Ok(value));
                true
            }
            None => {
                tracing::trace!(id, "resolve with no pending result");
                false
            }
        }
    }

    /// Settle `id`'s pending ticket with a rejection. Returns `false` if
    /// nothing was pending.
    pub fn reject(&self, id: &str, reason: Value) -> bool {
        let pending = self.lock().pending.remove(id);
        match pending {
            Some(pending) => {
                pending.settle(Err(ModalError::Rejected {
                    id: id.into(),
                    reason,
                }));
                true
            }
            None => {
                tracing::trace!(id, "reject with no pending result");
                false
            }
        }
    }

    pub fn state(&self, id: &str) -> Option<ModalState> {
        self.lock().states.get(id).cloned()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.lock().states.get(id).is_some_and(|s| s.visible)
    }

    pub fn has_pending(&self, id: &str) -> bool {
        self.lock().pending.contains_key(id)
    }

    /// Ids with state, sorted
    pub fn ids(&self) -> Vec<ModalId> {
        let mut ids: Vec<_> = self.lock().states.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Modals the host should render, sorted by id.
    ///
    /// Ids with state but neither a registration nor a declaration render
    /// nothing and log a warning.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let inner = self.lock();
        let mut ids: Vec<_> = inner.states.keys().collect();
        ids.sort();

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let state = &inner.states[id];
            if let Some(reg) = inner.registry.get(id) {
                out.push(Placeholder {
                    id: id.clone(),
                    component: reg.component.clone(),
                    props: merge_props(&reg.default_props, &state.args),
                    state: state.clone(),
                    declared: false,
                });
            } else if let Some(component) = inner.declared.get(id) {
                out.push(Placeholder {
                    id: id.clone(),
                    component: component.clone(),
                    props: state.args.clone(),
                    state: state.clone(),
                    declared: true,
                });
            } else {
                tracing::warn!(
                    %id,
                    "no modal found for id; register it or declare it before showing"
                );
            }
        }
        out
    }

    /// Receive a new version number after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// The in-modal view of one id
    pub fn handle(&self, id: impl Into<ModalId>) -> ModalHandle {
        ModalHandle::new(self.clone(), id.into())
    }
}
