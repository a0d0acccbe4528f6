//! Application state: the catalog synchronizer and the selection reconciler.
//!
//! [`AppState`] is the single source of truth for everything the UI shows. It
//! composes [`CatalogSync`] and [`Selection`] and is the only place where the
//! two meet: every operation that can change the article list reconciles the
//! selection afterwards, so callers cannot forget to.
//!
//! # Example
//!
//! ```rust
//! use catalog_sync::{AppState, Config};
//!
//! let mut state = AppState::new(&Config::default());
//! let request = state.set_query(Some("  rust "));
//! assert_eq!(request.params.query.as_deref(), Some("rust"));
//! assert!(state.catalog().is_loading());
//! assert!(state.selection().selected().is_none());
//! ```

use crate::app::catalog::{CatalogSync, ListRequest};
use crate::app::epoch::RequestTicket;
use crate::app::selection::Selection;
use crate::domain::{Article, Page};
use crate::ui::helpers;
use crate::ui::viewmodel::{
    ArticleRow, CatalogViewModel, DetailView, HeaderInfo, LoadMoreHint, Notice,
};
use crate::Config;

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: CatalogSync,
    selection: Selection,
    /// Origin the catalog is fetched from, shown in the header.
    api_base_url: String,
}

impl AppState {
    /// Creates an empty state. Nothing is loading until [`AppState::set_query`]
    /// is called (see [`crate::initialize`]).
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: CatalogSync::new(config.include_drafts),
            selection: Selection::default(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogSync {
        &self.catalog
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Article> {
        self.selection.selected()
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Starts a new query epoch. The list is emptied, so the selection is
    /// cleared along with it.
    pub fn set_query(&mut self, query: Option<&str>) -> ListRequest {
        let request = self.catalog.set_query(query);
        self.selection.on_list_changed(self.catalog.articles());
        request
    }

    /// Requests the next page, or `None` when that is not possible right now.
    pub fn load_more(&mut self) -> Option<ListRequest> {
        self.catalog.load_more()
    }

    pub fn select(&mut self, article: Article) {
        self.selection.select(article);
    }

    pub fn begin_refresh(&mut self) {
        self.selection.begin_refresh();
    }

    /// Merges a list response. Returns `false` if it was stale.
    pub fn apply_list_result(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<Page, String>,
    ) -> bool {
        let applied = self.catalog.apply_list_result(ticket, result);
        if applied {
            self.selection.on_list_changed(self.catalog.articles());
        }
        applied
    }

    /// Merges a single-article refresh response.
    pub fn apply_refresh(&mut self, result: std::result::Result<Article, String>) {
        self.selection.apply_refresh(result, &mut self.catalog);
    }

    /// Computes a plain-text view model of the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> CatalogViewModel {
        let selected_id = self.selected().map(|a| a.id);

        let rows = self
            .catalog
            .articles()
            .iter()
            .enumerate()
            .map(|(index, article)| ArticleRow {
                number: index + 1,
                title: article.title.clone(),
                is_draft: article.is_draft(),
                updated_at: helpers::format_timestamp(&article.updated_at),
                excerpt: helpers::excerpt(&article.body),
                is_selected: selected_id == Some(article.id),
            })
            .collect();

        let load_more = if !self.catalog.has_more() {
            LoadMoreHint::AllShown
        } else if self.catalog.is_loading_more() {
            LoadMoreHint::Loading
        } else {
            LoadMoreHint::Available
        };

        CatalogViewModel {
            header: HeaderInfo {
                api_base_url: self.api_base_url.clone(),
                query: self.catalog.query().map(String::from),
            },
            count_label: helpers::count_label(self.catalog.is_loading(), self.catalog.articles().len()),
            rows,
            list_error: self.catalog.error().map(Notice::error),
            load_more,
            detail: self.compute_detail(),
        }
    }

    fn compute_detail(&self) -> DetailView {
        let Some(article) = self.selected() else {
            return DetailView::Placeholder {
                loading: self.catalog.is_loading(),
            };
        };

        DetailView::Article {
            title: article.title.clone(),
            slug: article.slug.clone(),
            created_at: helpers::format_timestamp(&article.created_at),
            updated_at: helpers::format_timestamp(&article.updated_at),
            status: helpers::publication_status(article),
            paragraphs: helpers::paragraphs(&article.body),
            error: self.selection.detail_error().map(Notice::error),
        }
    }
}
