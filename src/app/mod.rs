//! Application layer: the client-side synchronization state machine.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Requests
//!                           ↑                                          ↓
//!                           └────────────── Worker Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: catalog synchronizer (list, cursor, query, loading/error flags)
//! - [`selection`]: selection reconciler (selected article, detail error)
//! - [`epoch`]: request tickets used to discard stale list responses
//! - [`state`]: [`AppState`], composing the two components
//! - [`handler`]: [`Event`] processing
//! - [`actions`]: side effects emitted by the handler

pub mod actions;
pub mod catalog;
pub mod epoch;
pub mod handler;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use catalog::{CatalogSync, ListRequest};
pub use epoch::{Epoch, ListKind, RequestTicket};
pub use handler::{handle_event, Event};
pub use selection::Selection;
pub use state::AppState;
