//! Background request execution.
//!
//! The event loop posts [`WorkerMessage`]s and receives [`WorkerResponse`]s as
//! events; network I/O never runs on the loop itself.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: [`CatalogWorker`], which executes a message against an `ArticleApi`
//! - `dispatcher`: [`Dispatcher`], one background thread per request, with teardown

pub mod dispatcher;
pub mod handler;
pub mod messages;

pub use dispatcher::Dispatcher;
pub use handler::CatalogWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
