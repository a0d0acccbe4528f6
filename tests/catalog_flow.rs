//! End-to-end state transitions driven through `handle_event`.

mod common;

use catalog_sync::ui::{DetailView, LoadMoreHint};
use catalog_sync::worker::WorkerResponse;
use catalog_sync::{handle_event, initialize, AppState, Config, Event};
use common::{article, list_request, page, refresh_slug};

fn deliver(state: &mut AppState, response: WorkerResponse) -> bool {
    let (render, actions) = handle_event(state, &Event::from(response)).unwrap();
    assert!(actions.is_empty());
    render
}

fn slugs(state: &AppState) -> Vec<String> {
    state
        .catalog()
        .articles()
        .iter()
        .map(|a| a.slug.clone())
        .collect()
}

#[test]
fn pages_accumulate_and_selection_defaults_to_first() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, params) = list_request(&actions);
    assert!(params.query.is_none() && params.cursor.is_none());

    assert!(deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a"), article(2, "b")], Some("c1")),
        }
    ));
    assert_eq!(slugs(&state), ["a", "b"]);
    assert_eq!(state.selected().map(|a| a.id), Some(1));
    assert!(state.catalog().has_more());

    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let (ticket, params) = list_request(&actions);
    assert_eq!(params.cursor.as_ref().map(|c| c.as_str()), Some("c1"));
    assert!(state.catalog().is_loading_more());

    // a second trigger while the first is in flight is a no-op
    assert_eq!(handle_event(&mut state, &Event::LoadMore).unwrap(), (false, vec![]));

    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(3, "c")], None),
        },
    );
    assert_eq!(slugs(&state), ["a", "b", "c"]);
    assert_eq!(state.selected().map(|a| a.id), Some(1));
    assert!(!state.catalog().has_more());
    assert_eq!(state.compute_viewmodel().load_more, LoadMoreHint::AllShown);

    assert_eq!(handle_event(&mut state, &Event::LoadMore).unwrap(), (false, vec![]));
}

#[test]
fn response_for_superseded_query_is_discarded() {
    let (mut state, actions) = initialize(&Config::default());
    let (stale, _) = list_request(&actions);

    let (_, actions) = handle_event(&mut state, &Event::SearchSubmitted("rust".into())).unwrap();
    let (current, params) = list_request(&actions);
    assert_eq!(params.query.as_deref(), Some("rust"));

    let render = deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket: stale,
            page: page(vec![article(9, "old")], Some("old-cursor")),
        },
    );
    assert!(!render);
    assert!(state.catalog().articles().is_empty());
    assert!(state.catalog().is_loading());
    assert!(state.catalog().cursor().is_none());

    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket: current,
            page: page(vec![article(4, "rust-intro")], None),
        },
    );
    assert_eq!(slugs(&state), ["rust-intro"]);
    assert!(!state.catalog().is_loading());
}

#[test]
fn load_more_from_previous_query_never_appends() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a")], Some("c1")),
        },
    );

    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let (append, _) = list_request(&actions);

    let (_, actions) = handle_event(&mut state, &Event::SearchSubmitted("go".into())).unwrap();
    let (reset, _) = list_request(&actions);
    assert!(!state.catalog().is_loading_more());

    assert!(!deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket: append,
            page: page(vec![article(2, "b")], Some("c2")),
        }
    ));
    assert!(state.catalog().articles().is_empty());

    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket: reset,
            page: page(vec![article(5, "go-intro")], None),
        },
    );
    assert_eq!(slugs(&state), ["go-intro"]);
}

#[test]
fn blank_search_means_no_filter() {
    let (mut state, _) = initialize(&Config::default());
    let (_, actions) = handle_event(&mut state, &Event::SearchSubmitted("   ".into())).unwrap();
    let (_, params) = list_request(&actions);
    assert!(params.query.is_none());
    assert!(state.catalog().query().is_none());
    assert!(params.query_pairs().is_empty());
}

#[test]
fn first_page_failure_empties_list_and_reports() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageFailed {
            ticket,
            message: "503 Service Unavailable".into(),
        },
    );

    assert!(state.catalog().articles().is_empty());
    assert!(!state.catalog().is_loading());
    assert_eq!(state.catalog().error(), Some("503 Service Unavailable"));
    assert!(state.selected().is_none());
    let vm = state.compute_viewmodel();
    assert_eq!(vm.list_error.map(|n| n.text).as_deref(), Some("503 Service Unavailable"));
}

#[test]
fn load_more_failure_keeps_loaded_articles() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a")], Some("c1")),
        },
    );

    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageFailed {
            ticket,
            message: String::new(),
        },
    );

    assert_eq!(slugs(&state), ["a"]);
    assert_eq!(state.catalog().error(), Some("Failed to load more articles."));
    assert!(!state.catalog().is_loading_more());
    assert!(state.catalog().has_more());
}

#[test]
fn refresh_replaces_entry_in_place() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a"), article(2, "b"), article(3, "c")], Some("c1")),
        },
    );

    let b = state.catalog().articles()[1].clone();
    handle_event(&mut state, &Event::Select(b)).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::RefreshSelected).unwrap();
    assert_eq!(refresh_slug(&actions), "b");

    let mut fresh = article(2, "b");
    fresh.title = "Renamed".into();
    fresh.updated_at = catalog_sync::Timestamp::new("2024-06-01T00:00:00Z");
    deliver(&mut state, WorkerResponse::ArticleLoaded { article: fresh.clone() });

    assert_eq!(slugs(&state), ["a", "b", "c"]);
    assert_eq!(state.catalog().articles()[1], fresh);
    assert_eq!(state.selected(), Some(&fresh));
    assert_eq!(state.catalog().cursor().map(|c| c.as_str()), Some("c1"));
    assert!(state.catalog().error().is_none());
    assert!(!state.catalog().is_loading() && !state.catalog().is_loading_more());
}

#[test]
fn refresh_failure_touches_only_detail_error() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a")], None),
        },
    );
    let before = state.catalog().clone();

    let (_, actions) = handle_event(&mut state, &Event::Refresh { slug: "a".into() }).unwrap();
    assert_eq!(refresh_slug(&actions), "a");
    deliver(
        &mut state,
        WorkerResponse::ArticleFailed {
            slug: "a".into(),
            message: "Article not found".into(),
        },
    );

    assert_eq!(state.selection().detail_error(), Some("Article not found"));
    assert_eq!(state.catalog().articles(), before.articles());
    assert_eq!(state.selected().map(|a| a.id), Some(1));
    match state.compute_viewmodel().detail {
        DetailView::Article { error, .. } => {
            assert_eq!(error.map(|n| n.text).as_deref(), Some("Article not found"));
        }
        other @ DetailView::Placeholder { .. } => panic!("expected article detail, got {other:?}"),
    }

    // issuing another refresh clears the previous error
    handle_event(&mut state, &Event::RefreshSelected).unwrap();
    assert!(state.selection().detail_error().is_none());
}

#[test]
fn selection_moves_to_first_of_new_results() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a"), article(2, "b")], None),
        },
    );
    let b = state.catalog().articles()[1].clone();
    handle_event(&mut state, &Event::Select(b)).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::SearchSubmitted("zig".into())).unwrap();
    assert!(state.selected().is_none());
    assert!(matches!(
        state.compute_viewmodel().detail,
        DetailView::Placeholder { loading: true }
    ));

    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(8, "zig-1"), article(2, "b")], None),
        },
    );
    assert_eq!(state.selected().map(|a| a.id), Some(8));
}

#[test]
fn quit_requests_shutdown_only() {
    let (mut state, _) = initialize(&Config::default());
    let (render, actions) = handle_event(&mut state, &Event::Quit).unwrap();
    assert!(!render);
    assert_eq!(actions, vec![catalog_sync::Action::Shutdown]);
}

#[test]
fn refresh_failure_leaves_list_flags_alone() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a"), article(2, "b")], Some("c1")),
        },
    );
    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    let (append, _) = list_request(&actions);
    assert!(state.catalog().is_loading_more());

    let before = state.catalog().clone();
    let selected_before = state.selected().cloned();

    handle_event(&mut state, &Event::RefreshSelected).unwrap();
    deliver(
        &mut state,
        WorkerResponse::ArticleFailed {
            slug: "a".into(),
            message: "502 Bad Gateway".into(),
        },
    );

    let after = state.catalog();
    assert_eq!(after.articles(), before.articles());
    assert_eq!(after.cursor(), before.cursor());
    assert_eq!(after.error(), before.error());
    assert_eq!(after.is_loading(), before.is_loading());
    assert_eq!(after.is_loading_more(), before.is_loading_more());
    assert_eq!(state.selected().cloned(), selected_before);
    assert_eq!(state.selection().detail_error(), Some("502 Bad Gateway"));

    // the pending page still lands afterwards
    assert!(deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket: append,
            page: page(vec![article(3, "c")], None),
        }
    ));
    assert_eq!(slugs(&state), ["a", "b", "c"]);
}

#[test]
fn refreshed_article_outside_list_falls_back_to_first() {
    let (mut state, actions) = initialize(&Config::default());
    let (ticket, _) = list_request(&actions);
    deliver(
        &mut state,
        WorkerResponse::PageLoaded {
            ticket,
            page: page(vec![article(1, "a"), article(2, "b")], None),
        },
    );
    let b = state.catalog().articles()[1].clone();
    handle_event(&mut state, &Event::Select(b)).unwrap();

    deliver(
        &mut state,
        WorkerResponse::ArticleLoaded {
            article: article(42, "elsewhere"),
        },
    );

    assert_eq!(slugs(&state), ["a", "b"]);
    assert_eq!(state.selected().map(|a| a.id), Some(1));
}
