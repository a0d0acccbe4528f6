//! Catalog synchronizer: the accumulated article list of the current query.
//!
//! [`CatalogSync`] owns the loaded articles, the pagination cursor, the active
//! query and the loading/error flags. It never performs I/O itself: operations
//! return a [`ListRequest`] describing the fetch to issue, and the eventual
//! outcome is fed back through [`CatalogSync::apply_list_result`].
//!
//! # Epochs
//!
//! `set_query` starts a new epoch. A list result is applied only if its ticket
//! belongs to the current epoch and the slot it was issued for (`loading` or
//! `loading_more`) is still waiting. Anything else is stale and leaves the
//! state untouched.

use std::collections::HashMap;

use crate::api::ListParams;
use crate::app::epoch::{Epoch, ListKind, RequestTicket};
use crate::domain::{normalize_query, Article, Cursor, Page};

/// Shown when a first-page fetch fails without a message.
pub const LIST_FAILURE_FALLBACK: &str = "Failed to load articles.";

/// Shown when a load-more fetch fails without a message.
pub const LOAD_MORE_FAILURE_FALLBACK: &str = "Failed to load more articles.";

/// A list fetch the runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub ticket: RequestTicket,
    pub params: ListParams,
}

/// Loaded articles and pagination state for one query epoch at a time.
#[derive(Debug, Clone, Default)]
pub struct CatalogSync {
    articles: Vec<Article>,
    /// Position of each slug in `articles`, maintained incrementally.
    slug_index: HashMap<String, usize>,
    cursor: Option<Cursor>,
    query: Option<String>,
    loading: bool,
    loading_more: bool,
    error: Option<String>,
    epoch: Epoch,
    include_drafts: bool,
}

impl CatalogSync {
    #[must_use]
    pub fn new(include_drafts: bool) -> Self {
        Self {
            include_drafts,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Returns `true` if another page can be requested.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Position of the article with `slug`, if loaded.
    #[must_use]
    pub fn position_of_slug(&self, slug: &str) -> Option<usize> {
        self.slug_index.get(slug).copied()
    }

    /// Starts a new query epoch and returns the first-page request for it.
    ///
    /// `query` is normalized first: surrounding whitespace is trimmed and an
    /// empty result means "no filter". All accumulated articles, the cursor and
    /// the error are discarded, and any outstanding list request becomes stale.
    pub fn set_query(&mut self, query: Option<&str>) -> ListRequest {
        let query = normalize_query(query);

        self.epoch = self.epoch.next();
        self.query.clone_from(&query);
        self.clear_articles();
        self.cursor = None;
        self.error = None;
        self.loading = true;
        self.loading_more = false;

        tracing::debug!(epoch = %self.epoch, query = ?self.query, "query epoch started");

        ListRequest {
            ticket: RequestTicket::reset(self.epoch),
            params: ListParams::first_page(query, self.include_drafts),
        }
    }

    /// Requests the next page of the current epoch.
    ///
    /// Returns `None` without touching any state when there is no cursor or a
    /// load-more request is already in flight.
    pub fn load_more(&mut self) -> Option<ListRequest> {
        if self.loading_more {
            tracing::debug!("load more ignored, already in flight");
            return None;
        }
        let cursor = self.cursor.clone()?;

        self.loading_more = true;
        self.error = None;

        tracing::debug!(epoch = %self.epoch, cursor = %cursor, "loading next page");

        Some(ListRequest {
            ticket: RequestTicket::append(self.epoch),
            params: ListParams {
                query: self.query.clone(),
                cursor: Some(cursor),
                include_drafts: self.include_drafts,
            },
        })
    }

    /// Merges the outcome of a list request.
    ///
    /// Returns `true` if the result was applied, `false` if it was stale and
    /// discarded. `articles` changes only when this returns `true`.
    pub fn apply_list_result(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<Page, String>,
    ) -> bool {
        let waiting = match ticket.kind {
            ListKind::Reset => self.loading,
            ListKind::Append => self.loading_more,
        };
        if !ticket.is_current(self.epoch) || !waiting {
            tracing::debug!(
                ticket_epoch = %ticket.epoch,
                current_epoch = %self.epoch,
                kind = ?ticket.kind,
                "discarding stale list response"
            );
            return false;
        }

        match (ticket.kind, result) {
            (ListKind::Reset, Ok(page)) => {
                tracing::debug!(
                    items = page.items.len(),
                    has_more = page.has_more(),
                    "first page loaded"
                );
                self.clear_articles();
                self.append_items(page.items);
                self.cursor = page.next_cursor;
                self.loading = false;
            }
            (ListKind::Reset, Err(message)) => {
                tracing::debug!(error = %message, "first page failed");
                self.clear_articles();
                self.cursor = None;
                self.error = Some(non_empty(message, LIST_FAILURE_FALLBACK));
                self.loading = false;
            }
            (ListKind::Append, Ok(page)) => {
                tracing::debug!(
                    items = page.items.len(),
                    total = self.articles.len() + page.items.len(),
                    has_more = page.has_more(),
                    "next page appended"
                );
                self.append_items(page.items);
                self.cursor = page.next_cursor;
                self.loading_more = false;
            }
            (ListKind::Append, Err(message)) => {
                tracing::debug!(error = %message, "next page failed");
                self.error = Some(non_empty(message, LOAD_MORE_FAILURE_FALLBACK));
                self.loading_more = false;
            }
        }
        true
    }

    /// Replaces the loaded article whose slug matches `fresh.slug`.
    ///
    /// Every other entry and the order are left as they are. Returns `false` if
    /// no loaded article has that slug.
    pub fn replace_by_slug(&mut self, fresh: &Article) -> bool {
        match self.slug_index.get(&fresh.slug) {
            Some(&position) => {
                self.articles[position] = fresh.clone();
                true
            }
            None => false,
        }
    }

    fn clear_articles(&mut self) {
        self.articles.clear();
        self.slug_index.clear();
    }

    fn append_items(&mut self, items: Vec<Article>) {
        for article in items {
            let position = self.articles.len();
            self.slug_index
                .entry(article.slug.clone())
                .or_insert(position);
            self.articles.push(article);
        }
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
