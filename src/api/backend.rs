//! Catalog API abstraction.
//!
//! This module defines the [`ArticleApi`] trait, the fixed contract of the remote
//! article catalog. The worker executes every request through this trait, so the
//! state machine never depends on HTTP details and tests can substitute a
//! scripted implementation.
//!
//! The trait maps one-to-one onto the two read
//! endpoints the client uses. There are no write operations.

use crate::domain::error::Result;
use crate::domain::{Article, Cursor, Page};
use serde::{Deserialize, Serialize};

/// Parameters for one list-page request.
///
/// Absent values are omitted from the request entirely; the transport never
/// sends empty-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Normalized search query, `None` for "no filter".
    pub query: Option<String>,
    /// Cursor of the page to fetch, `None` for the first page.
    pub cursor: Option<Cursor>,
    /// Whether drafts should be included in the listing.
    pub include_drafts: bool,
}

impl ListParams {
    /// Parameters for the first page of `query`.
    #[must_use]
    pub const fn first_page(query: Option<String>, include_drafts: bool) -> Self {
        Self {
            query,
            cursor: None,
            include_drafts,
        }
    }

    /// Query-string pairs in the order they are sent, skipping absent values.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor", cursor.as_str()));
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", query));
        }
        if self.include_drafts {
            pairs.push(("include_drafts", "true"));
        }
        pairs
    }
}

/// Read-only access to the remote article catalog.
///
/// Implementations must be shareable across request threads.
///
/// # Implementations
///
/// - [`HttpArticleApi`](crate::api::HttpArticleApi): blocking HTTP client (default)
pub trait ArticleApi: Send + Sync {
    /// Fetches one page of articles.
    ///
    /// # Errors
    ///
    /// Returns a transport-class [`CatalogError`](crate::domain::CatalogError) on
    /// network failure, non-2xx status, or a malformed body.
    fn list_articles(&self, params: &ListParams) -> Result<Page>;

    /// Fetches a single article by its slug.
    ///
    /// # Errors
    ///
    /// Same failure classes as [`ArticleApi::list_articles`].
    fn article_by_slug(&self, slug: &str) -> Result<Article>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_parameters_are_omitted() {
        let params = ListParams::first_page(None, false);
        assert!(params.query_pairs().is_empty());

        let params = ListParams {
            query: Some(String::new()),
            cursor: None,
            include_drafts: false,
        };
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn pairs_keep_cursor_query_drafts_order() {
        let params = ListParams {
            query: Some("rust".into()),
            cursor: Cursor::from_token("c2"),
            include_drafts: true,
        };
        assert_eq!(
            params.query_pairs(),
            vec![("cursor", "c2"), ("q", "rust"), ("include_drafts", "true")]
        );
    }
}
