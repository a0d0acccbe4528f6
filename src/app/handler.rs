//! Event handling and state transition logic.
//!
//! This module implements the single entry point through which every trigger
//! reaches the state: user input (search, load more, select, refresh, quit) and
//! completed background requests.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the runtime (user input or worker responses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! Events are handled one at a time and run to completion, so no state is ever
//! mutated concurrently.
//!
//! # Example
//!
//! ```rust
//! use catalog_sync::{handle_event, Action, AppState, Config, Event};
//!
//! let mut state = AppState::new(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::SearchSubmitted("rust".into()))?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), catalog_sync::CatalogError>(())
//! ```

use crate::app::catalog::ListRequest;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Article;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input or by completed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Search form submitted with raw input text.
    ///
    /// Whitespace-only text means "no filter".
    SearchSubmitted(String),

    /// Search cleared; equivalent to submitting an empty query.
    SearchCleared,

    /// Request the next page, if there is one and none is in flight.
    LoadMore,

    /// The user picked an article from the rendered list.
    Select(Article),

    /// Fetch a fresh copy of the article with this slug.
    Refresh {
        /// Slug of the article to refresh.
        slug: String,
    },

    /// Fetch a fresh copy of the currently selected article.
    RefreshSelected,

    /// A background request completed.
    WorkerResponse(WorkerResponse),

    /// End the session.
    Quit,
}

impl From<WorkerResponse> for Event {
    fn from(response: WorkerResponse) -> Self {
        Self::WorkerResponse(response)
    }
}

fn post_list_request(request: ListRequest) -> Action {
    Action::PostToWorker(WorkerMessage::fetch_page(request.ticket, request.params))
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the visible state changed, and the side effects
/// to run in order. Stale list responses and no-op triggers return
/// `(false, vec![])`.
///
/// # Errors
///
/// Currently infallible; the `Result` is kept so the runtime handles every
/// event uniformly.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchSubmitted(raw) => {
            let request = state.set_query(Some(raw.as_str()));
            Ok((true, vec![post_list_request(request)]))
        }
        Event::SearchCleared => {
            let request = state.set_query(None);
            Ok((true, vec![post_list_request(request)]))
        }
        Event::LoadMore => match state.load_more() {
            Some(request) => Ok((true, vec![post_list_request(request)])),
            None => Ok((false, vec![])),
        },
        Event::Select(article) => {
            state.select(article.clone());
            Ok((true, vec![]))
        }
        Event::Refresh { slug } => {
            tracing::debug!(slug = %slug, "refreshing article");
            state.begin_refresh();
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::fetch_article(slug.clone()))],
            ))
        }
        Event::RefreshSelected => {
            let Some(slug) = state.selected().map(|a| a.slug.clone()) else {
                tracing::debug!("no article selected to refresh");
                return Ok((false, vec![]));
            };
            handle_event(state, &Event::Refresh { slug })
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::PageLoaded { ticket, page } => {
                let applied = state.apply_list_result(*ticket, Ok(page.clone()));
                Ok((applied, vec![]))
            }
            WorkerResponse::PageFailed { ticket, message } => {
                let applied = state.apply_list_result(*ticket, Err(message.clone()));
                Ok((applied, vec![]))
            }
            WorkerResponse::ArticleLoaded { article } => {
                state.apply_refresh(Ok(article.clone()));
                Ok((true, vec![]))
            }
            WorkerResponse::ArticleFailed { slug, message } => {
                tracing::debug!(slug = %slug, "refresh failed");
                state.apply_refresh(Err(message.clone()));
                Ok((true, vec![]))
            }
        },
        Event::Quit => Ok((false, vec![Action::Shutdown])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::epoch::RequestTicket;
    use crate::domain::article::sample;
    use crate::domain::{Cursor, Page};
    use crate::Config;

    fn ticket_of(actions: &[Action]) -> RequestTicket {
        match actions {
            [Action::PostToWorker(WorkerMessage::FetchPage { ticket, .. })] => *ticket,
            other => panic!("expected one page request, got {other:?}"),
        }
    }

    fn loaded(cursor: Option<&str>) -> AppState {
        let mut state = AppState::new(&Config::default());
        let (_, actions) = handle_event(&mut state, &Event::SearchCleared).unwrap();
        let response = WorkerResponse::PageLoaded {
            ticket: ticket_of(&actions),
            page: Page {
                items: vec![sample(1, "a"), sample(2, "b")],
                next_cursor: cursor.and_then(Cursor::from_token),
            },
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        state
    }

    #[test]
    fn load_more_without_cursor_emits_nothing() {
        let mut state = loaded(None);
        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_response_does_not_render() {
        let mut state = loaded(Some("c1"));
        let (_, more) = handle_event(&mut state, &Event::LoadMore).unwrap();
        handle_event(&mut state, &Event::SearchSubmitted("foo".into())).unwrap();

        let late = WorkerResponse::PageLoaded {
            ticket: ticket_of(&more),
            page: Page::default(),
        };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(late)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.catalog().is_loading());
    }

    #[test]
    fn refresh_selected_targets_the_selection() {
        let mut state = loaded(None);
        let (_, actions) = handle_event(&mut state, &Event::RefreshSelected).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::FetchArticle { slug, .. })] if slug == "a"
        ));
    }

    #[test]
    fn refresh_selected_without_selection_is_a_no_op() {
        let mut state = AppState::new(&Config::default());
        let (render, actions) = handle_event(&mut state, &Event::RefreshSelected).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn quit_requests_shutdown() {
        let mut state = AppState::new(&Config::default());
        let (_, actions) = handle_event(&mut state, &Event::Quit).unwrap();
        assert_eq!(actions, vec![Action::Shutdown]);
    }
}
