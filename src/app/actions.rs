//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order: requests go to the [`Dispatcher`], and
//! `Shutdown` tears the session down.
//!
//! [`Dispatcher`]: crate::worker::Dispatcher

use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issues a request in the background.
    PostToWorker(WorkerMessage),

    /// Ends the session.
    ///
    /// The runtime disposes its dispatcher, so responses still in flight are
    /// discarded instead of mutating state after teardown.
    Shutdown,
}
