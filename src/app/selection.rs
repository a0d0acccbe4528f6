//! Selection reconciler: which article the detail view shows.
//!
//! The selection is kept valid against the synchronizer's list: whenever the
//! list changes, a selection that is still present (by `id`) survives, anything
//! else falls back to the first article, and an empty list clears it.

use crate::app::catalog::CatalogSync;
use crate::domain::Article;

/// Shown when a refresh fails without a message.
pub const DETAIL_FAILURE_FALLBACK: &str = "Failed to load article details.";

/// Selected article and the last detail-refresh failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Article>,
    detail_error: Option<String>,
}

impl Selection {
    #[must_use]
    pub const fn selected(&self) -> Option<&Article> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    /// Re-validates the selection after `articles` changed.
    ///
    /// Returns `true` if the selection changed.
    pub fn on_list_changed(&mut self, articles: &[Article]) -> bool {
        let Some(first) = articles.first() else {
            return self.selected.take().is_some();
        };

        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|current| articles.iter().any(|a| a.id == current.id));
        if still_present {
            return false;
        }

        tracing::debug!(
            previous = ?self.selected.as_ref().map(|a| a.id),
            article_id = first.id,
            "selection falls back to first article"
        );
        self.selected = Some(first.clone());
        true
    }

    /// User-driven selection. Clears any previous detail error.
    pub fn select(&mut self, article: Article) {
        tracing::debug!(article_id = article.id, slug = %article.slug, "article selected");
        self.detail_error = None;
        self.selected = Some(article);
    }

    /// Marks the start of a refresh: the previous detail error is cleared.
    pub fn begin_refresh(&mut self) {
        self.detail_error = None;
    }

    /// Merges the outcome of a single-article refresh.
    ///
    /// On success the fresh copy becomes the selection and replaces the list entry
    /// with the same slug, then the selection is reconciled against the list. On
    /// failure only `detail_error` changes. Nothing here touches the
    /// synchronizer's loading flags, cursor or list error.
    pub fn apply_refresh(
        &mut self,
        result: std::result::Result<Article, String>,
        catalog: &mut CatalogSync,
    ) {
        match result {
            Ok(fresh) => {
                let replaced = catalog.replace_by_slug(&fresh);
                tracing::debug!(
                    article_id = fresh.id,
                    slug = %fresh.slug,
                    replaced_in_list = replaced,
                    "article refreshed"
                );
                self.selected = Some(fresh);
                self.on_list_changed(catalog.articles());
            }
            Err(message) => {
                tracing::debug!(error = %message, "article refresh failed");
                self.detail_error = Some(if message.is_empty() {
                    DETAIL_FAILURE_FALLBACK.to_string()
                } else {
                    message
                });
            }
        }
    }
}
