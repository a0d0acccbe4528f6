//! Background execution of worker messages.
//!
//! Each posted message runs on its own short-lived thread so that a slow request
//! never delays a newer one (a fresh search is issued immediately even while an
//! older page is still downloading). Completed responses are delivered on an
//! `mpsc` channel as the caller's event type.
//!
//! # Teardown
//!
//! A dispatcher is a scoped resource. After [`Dispatcher::dispose`] (or drop),
//! responses of requests that are still running are discarded instead of being
//! delivered, so nothing can mutate state after its owner went away.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::domain::error::{CatalogError, Result};
use crate::worker::{CatalogWorker, WorkerMessage, WorkerResponse};

/// Runs worker messages on background threads and forwards their responses.
pub struct Dispatcher<T> {
    worker: Arc<CatalogWorker>,
    /// `None` once disposed. Request threads send while holding the lock, so
    /// nothing is delivered after [`Dispatcher::dispose`] returns.
    sink: Arc<Mutex<Option<Sender<T>>>>,
    in_flight: Arc<AtomicUsize>,
}

fn lock_sink<T>(sink: &Mutex<Option<Sender<T>>>) -> MutexGuard<'_, Option<Sender<T>>> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sends `value` unless the dispatcher was disposed. Returns `true` if delivered.
fn deliver<T>(sink: &Mutex<Option<Sender<T>>>, value: T) -> bool {
    match lock_sink(sink).as_ref() {
        Some(sender) => {
            if sender.send(value).is_err() {
                tracing::debug!("event loop gone, dropping response");
                return false;
            }
            true
        }
        None => {
            tracing::debug!("dropping response after teardown");
            false
        }
    }
}

impl<T> Dispatcher<T>
where
    T: From<WorkerResponse> + Send + 'static,
{
    #[must_use]
    pub fn new(worker: CatalogWorker, sink: Sender<T>) -> Self {
        Self {
            worker: Arc::new(worker),
            sink: Arc::new(Mutex::new(Some(sink))),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Starts executing `message` in the background.
    ///
    /// Messages posted after disposal are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Worker`] if no thread could be spawned. The
    /// matching failure response is still delivered so the requesting state slot
    /// does not stay in its loading state.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        if self.is_disposed() {
            tracing::debug!(message_type = ?message, "dispatcher disposed, dropping message");
            return Ok(());
        }

        let fallback = message.failed("Could not start request.");
        let worker = Arc::clone(&self.worker);
        let sink = Arc::clone(&self.sink);
        let in_flight = Arc::clone(&self.in_flight);

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name("catalog-request".to_string())
            .spawn(move || {
                let event = T::from(worker.handle_message(message));
                deliver(&sink, event);
                in_flight.fetch_sub(1, Ordering::SeqCst);
            });

        if let Err(e) = spawned {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            tracing::error!(error = %e, "failed to spawn request thread");
            if !deliver(&self.sink, T::from(fallback)) {
                tracing::debug!("fallback response for unspawned request not delivered");
            }
            return Err(CatalogError::Worker(format!("failed to spawn request thread: {e}")));
        }

        Ok(())
    }
}

impl<T> Dispatcher<T> {
    /// Stops delivering responses. Idempotent.
    pub fn dispose(&self) {
        if lock_sink(&self.sink).take().is_some() {
            tracing::debug!(in_flight = self.in_flight(), "dispatcher disposed");
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        lock_sink(&self.sink).is_none()
    }

    /// Number of requests whose threads have not finished yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl<T> Drop for Dispatcher<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("disposed", &self.is_disposed())
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}
