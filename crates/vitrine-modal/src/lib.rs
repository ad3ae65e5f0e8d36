//! # vitrine-modal
//!
//! Show, hide and remove modals by id from anywhere, without holding a
//! reference to the rendered modal.
//!
//! A [`ModalManager`] owns three tables: the per-id [`ModalState`], the
//! registered components, and the pending results. `show` returns a
//! [`ModalTicket`] that settles when the modal calls `resolve` or `reject`
//! through its [`ModalHandle`], or is cancelled when the modal is removed.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use vitrine_modal::{ModalComponent, ModalManager};
//!
//! struct Confirm;
//! impl ModalComponent for Confirm {
//!     fn name(&self) -> &str { "Confirm" }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let modals = ModalManager::new();
//! modals.register("confirm", Arc::new(Confirm), json!({ "title": "Delete?" }));
//!
//! let ticket = modals.show("confirm", json!({ "item": 7 }));
//! modals.handle("confirm").resolve_hide(json!(true));
//!
//! assert_eq!(ticket.wait().await.unwrap(), json!(true));
//! # }
//! ```

pub mod component;
pub mod error;
pub mod handle;
pub mod manager;
pub mod state;
pub mod ticket;

pub use component::{ComponentRef, ModalComponent, ModalTarget, Placeholder};
pub use error::{ModalError, Result};
pub use handle::ModalHandle;
pub use manager::ModalManager;
pub use state::{reduce, ModalAction, ModalFlags, ModalId, ModalState, ModalStates};
pub use ticket::ModalTicket;
