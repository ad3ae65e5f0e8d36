//! Pending modal results.
//!
//! A [`ModalTicket`] is handed to whoever called `show`; the matching
//! [`PendingTicket`] stays in the manager's table until the modal resolves,
//! rejects or is removed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use crate::error::{ModalError, Result};
use crate::state::ModalId;

type Slot = Option<Result<Value>>;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct TicketKey {
    id: ModalId,
    serial: u64,
}

/// Handle to the eventual result of one `show`.
///
/// Clones refer to the same request. Dropping every ticket does not cancel
/// the modal.
#[derive(Debug, Clone)]
pub struct ModalTicket {
    key: Arc<TicketKey>,
    rx: watch::Receiver<Slot>,
}

impl ModalTicket {
    /// Id of the modal this ticket waits on
    pub fn id(&self) -> &ModalId {
        &self.key.id
    }

    /// Check if two tickets stand for the same pending request
    pub fn same(a: &ModalTicket, b: &ModalTicket) -> bool {
        Arc::ptr_eq(&a.key, &b.key)
    }

    /// The result, if the modal has already settled
    pub fn try_result(&self) -> Option<Result<Value>> {
        self.rx.borrow().clone()
    }

    /// Wait for the modal to resolve or reject.
    ///
    /// Returns [`ModalError::Cancelled`] if the modal is removed first.
    pub async fn wait(mut self) -> Result<Value> {
        let id = self.key.id.clone();
        match self.rx.wait_for(Option::is_some).await {
            Ok(slot) => slot.clone().unwrap_or(Err(ModalError::Cancelled(id))),
            Err(_) => Err(ModalError::Cancelled(id)),
        }
    }
}

/// The settling side of a ticket, owned by the manager.
#[derive(Debug)]
pub(crate) struct PendingTicket {
    tx: watch::Sender<Slot>,
    ticket: ModalTicket,
}

impl PendingTicket {
    pub(crate) fn new(id: ModalId) -> Self {
        let (tx, rx) = watch::channel(None);
        let serial = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        Self {
            tx,
            ticket: ModalTicket {
                key: Arc::new(TicketKey { id, serial }),
                rx,
            },
        }
    }

    pub(crate) fn ticket(&self) -> ModalTicket {
        self.ticket.clone()
    }

    pub(crate) fn settle(self, outcome: Result<Value>) {
        tracing::trace!(id = %self.ticket.key.id, serial = self.ticket.key.serial, "settling modal ticket");
        self.tx.send_replace(Some(outcome));
    }
}
