//! Request/response protocol between the event loop and background requests.
//!
//! The event loop never blocks on the network. It posts a [`WorkerMessage`] and
//! later receives the matching [`WorkerResponse`] as an event. List messages carry
//! the [`RequestTicket`] they were issued under, so a response can be matched
//! against the current query epoch when it arrives. Messages also carry a
//! [`TraceContext`] that links spans on request threads to the span that issued
//! the request.

use crate::api::ListParams;
use crate::app::epoch::RequestTicket;
use crate::domain::{Article, Page};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when no valid span context is active (for example when
    /// tracing was never initialized).
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_page(FetchPage { ticket: RequestTicket, params: ListParams }),
    fetch_article(FetchArticle { slug: String }),
}

/// Requests posted by the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch one page of the article list.
    FetchPage {
        /// Epoch and slot the request was issued under.
        ticket: RequestTicket,

        /// Query, cursor and draft filter.
        params: ListParams,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch a single article by slug.
    FetchArticle {
        /// Slug of the article to refresh.
        slug: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchPage { trace_context, .. } | Self::FetchArticle { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }

    /// The failure response this message resolves to when it cannot be executed.
    #[must_use]
    pub fn failed(&self, message: impl Into<String>) -> WorkerResponse {
        match self {
            Self::FetchPage { ticket, .. } => WorkerResponse::PageFailed {
                ticket: *ticket,
                message: message.into(),
            },
            Self::FetchArticle { slug, .. } => WorkerResponse::ArticleFailed {
                slug: slug.clone(),
                message: message.into(),
            },
        }
    }
}

/// Completed requests delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A list page arrived.
    PageLoaded {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// The page, with `next_cursor` already reconciled.
        page: Page,
    },

    /// A list request failed.
    PageFailed {
        /// Ticket of the originating request.
        ticket: RequestTicket,
        /// Human-readable failure message.
        message: String,
    },

    /// A single article was fetched.
    ArticleLoaded {
        /// The fresh copy.
        article: Article,
    },

    /// A single-article fetch failed.
    ArticleFailed {
        /// Slug that was requested.
        slug: String,
        /// Human-readable failure message.
        message: String,
    },
}
