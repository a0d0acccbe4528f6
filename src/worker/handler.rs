//! Request execution against the catalog API.
//!
//! [`CatalogWorker`] turns a [`WorkerMessage`] into a [`WorkerResponse`] by calling
//! the configured [`ArticleApi`]. It is stateless apart from the API handle, so a
//! single worker can serve many request threads at once.

use crate::api::ArticleApi;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Executes catalog requests.
pub struct CatalogWorker {
    api: Box<dyn ArticleApi>,
}

impl CatalogWorker {
    #[must_use]
    pub fn new(api: Box<dyn ArticleApi>) -> Self {
        Self { api }
    }

    /// Maps an API result to a response with consistent logging.
    ///
    /// Failures keep only the error's display text, which is the message shown
    /// to the user.
    fn handle_api_result<T, S, F>(operation: &str, result: Result<T>, on_success: S, on_failure: F) -> WorkerResponse
    where
        S: FnOnce(T) -> WorkerResponse,
        F: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "catalog request successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, status = ?e.status(), "catalog request failed");
                on_failure(e.to_string())
            }
        }
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// The returned guard must be held for the duration of the request.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Executes one request and returns its response.
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::FetchPage { ticket, params, .. } => Self::handle_api_result(
                "fetch page",
                self.api.list_articles(&params),
                |page| WorkerResponse::PageLoaded { ticket, page },
                |message| WorkerResponse::PageFailed { ticket, message },
            ),
            WorkerMessage::FetchArticle { slug, .. } => {
                let result = self.api.article_by_slug(&slug);
                Self::handle_api_result(
                    "fetch article",
                    result,
                    |article| WorkerResponse::ArticleLoaded { article },
                    |message| WorkerResponse::ArticleFailed { slug, message },
                )
            }
        }
    }
}

impl std::fmt::Debug for CatalogWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWorker").finish_non_exhaustive()
    }
}
